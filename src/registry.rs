//! The function table a query engine binds against: names, argument types,
//! null policy, and a dynamic entry point taking already-extracted values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::date::{date_key_to_date, date_to_date_key, reformat_date};
use crate::digest::md5_hex;
use crate::prelude::*;
use crate::substring::substring_index;
use crate::url::{url_decode, url_decode_with};
use DataType::{Bigint, Varchar};

/// SQL type of an argument or result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[display(fmt = "varchar")]
    Varchar,
    #[display(fmt = "bigint")]
    Bigint,
}

/// How a function treats absent input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Absent when an argument is absent or the value cannot be computed.
    #[display(fmt = "nullable")]
    Nullable,
    /// Always text; the empty string stands in for absent input and failures.
    #[display(fmt = "never null")]
    NeverNull,
}

/// One argument or result value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Null,
    Bigint(i64),
    Varchar(String),
}

impl ScalarValue {
    /// `None` for `Null`, which fits every type.
    pub const fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Null => None,
            Self::Bigint(_) => Some(DataType::Bigint),
            Self::Varchar(_) => Some(DataType::Varchar),
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Varchar(s) => Some(s),
            Self::Null | Self::Bigint(_) => None,
        }
    }

    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Bigint(n) => Some(*n),
            Self::Null | Self::Varchar(_) => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bigint(n) => write!(f, "{n}"),
            Self::Varchar(s) => f.write_str(s),
        }
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        Self::Varchar(s)
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        Self::Varchar(s.to_owned())
    }
}

impl From<i64> for ScalarValue {
    fn from(n: i64) -> Self {
        Self::Bigint(n)
    }
}

impl<T: Into<Self>> From<Option<T>> for ScalarValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Error type for binding and invoking functions by name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FunctionError {
    #[error("Unknown function: {name} with {arity} argument(s)")]
    UnknownFunction { name: String, arity: usize },

    #[error("{function}: expected {expected} argument(s), got {actual}")]
    ArgumentCount {
        function: &'static str,
        expected: usize,
        actual: usize,
    },

    /// `position` is 1-based, as in SQL error messages.
    #[error("{function}: argument {position} must be {expected}, got {actual}")]
    ArgumentType {
        function: &'static str,
        position: usize,
        expected: DataType,
        actual: DataType,
    },
}

/// Name, argument types, result type and null policy of one function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionSignature {
    pub name: &'static str,
    pub arguments: &'static [DataType],
    pub return_type: DataType,
    pub null_policy: NullPolicy,
    pub description: &'static str,
}

impl FunctionSignature {
    pub const fn arity(&self) -> usize {
        self.arguments.len()
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{argument}")?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}

/// Every exported function, in `ScalarFunction` order.
pub static FUNCTIONS: [FunctionSignature; 7] = [
    FunctionSignature {
        name: "d2d",
        arguments: &[Varchar, Varchar, Varchar],
        return_type: Varchar,
        null_policy: NullPolicy::Nullable,
        description: "Cast datekey to date, or otherwise datekey to date",
    },
    FunctionSignature {
        name: "date2datekey",
        arguments: &[Varchar],
        return_type: Varchar,
        null_policy: NullPolicy::Nullable,
        description: "Cast date to datekey, eg: 2012-08-23 -> 20120823",
    },
    FunctionSignature {
        name: "datekey2date",
        arguments: &[Varchar],
        return_type: Varchar,
        null_policy: NullPolicy::Nullable,
        description: "Cast datekey to date, eg: 20120823 -> 2012-08-23",
    },
    FunctionSignature {
        name: "substring_index",
        arguments: &[Varchar, Varchar, Bigint],
        return_type: Varchar,
        null_policy: NullPolicy::Nullable,
        description: "Return a substring from a string before the specified number of \
                      occurrences of the delimiter, eg: \
                      SUBSTRING_INDEX('www.mysql.com', '.', 2) -> 'www.mysql'",
    },
    FunctionSignature {
        name: "md5",
        arguments: &[Varchar],
        return_type: Varchar,
        null_policy: NullPolicy::Nullable,
        description: "Calculate md5 of the string",
    },
    FunctionSignature {
        name: "urldecode",
        arguments: &[Varchar],
        return_type: Varchar,
        null_policy: NullPolicy::NeverNull,
        description: "Decode a URL-encoded string, eg: 'abc%20def' -> 'abc def'",
    },
    FunctionSignature {
        name: "urldecode",
        arguments: &[Varchar, Varchar],
        return_type: Varchar,
        null_policy: NullPolicy::NeverNull,
        description: "Decode a URL-encoded string in the given charset, eg: 'abc%20def' -> 'abc def'",
    },
];

/// Handle to one entry of [`FUNCTIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarFunction {
    D2d = 0,
    DateToDateKey = 1,
    DateKeyToDate = 2,
    SubstringIndex = 3,
    Md5 = 4,
    UrlDecode = 5,
    UrlDecodeWithCharset = 6,
}

impl ScalarFunction {
    pub const ALL: [Self; 7] = [
        Self::D2d,
        Self::DateToDateKey,
        Self::DateKeyToDate,
        Self::SubstringIndex,
        Self::Md5,
        Self::UrlDecode,
        Self::UrlDecodeWithCharset,
    ];

    /// Resolves an overload by case-insensitive name and argument count.
    pub fn lookup(name: &str, arity: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|function| {
            let signature = function.signature();
            signature.name.eq_ignore_ascii_case(name) && signature.arity() == arity
        })
    }

    pub fn signature(self) -> &'static FunctionSignature {
        &FUNCTIONS[self as usize]
    }

    /// Type-checks `args` against the signature and evaluates the function.
    /// `Null` is accepted for any argument.
    ///
    /// # Errors
    /// `ArgumentCount` or `ArgumentType` when `args` do not fit the signature.
    /// Evaluation itself never fails.
    pub fn invoke(self, args: &[ScalarValue]) -> Result<ScalarValue, FunctionError> {
        let signature = self.signature();
        if args.len() != signature.arity() {
            return Err(FunctionError::ArgumentCount {
                function: signature.name,
                expected: signature.arity(),
                actual: args.len(),
            });
        }
        for (i, (arg, &expected)) in args.iter().zip(signature.arguments).enumerate() {
            match arg.data_type() {
                Some(actual) if actual != expected => {
                    return Err(FunctionError::ArgumentType {
                        function: signature.name,
                        position: i + 1,
                        expected,
                        actual,
                    });
                }
                _ => {}
            }
        }

        let text = |i: usize| args[i].as_str();
        let result = match self {
            Self::D2d => match (text(1), text(2)) {
                (Some(source), Some(target)) => reformat_date(text(0), source, target),
                _ => None,
            },
            Self::DateToDateKey => date_to_date_key(text(0)),
            Self::DateKeyToDate => date_key_to_date(text(0)),
            Self::SubstringIndex => args[2]
                .as_i64()
                .and_then(|count| substring_index(text(0), text(1), count)),
            Self::Md5 => md5_hex(text(0)),
            Self::UrlDecode => Some(url_decode(text(0))),
            Self::UrlDecodeWithCharset => Some(url_decode_with(text(0), text(1))),
        };
        Ok(result.into())
    }
}

impl fmt::Display for ScalarFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.signature(), f)
    }
}

/// Looks `name` up by the number of `args` and invokes it.
///
/// # Errors
/// `UnknownFunction` when no overload matches, otherwise as [`ScalarFunction::invoke`].
pub fn invoke(name: &str, args: &[ScalarValue]) -> Result<ScalarValue, FunctionError> {
    ScalarFunction::lookup(name, args.len())
        .ok_or_else(|| FunctionError::UnknownFunction {
            name: name.to_owned(),
            arity: args.len(),
        })?
        .invoke(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: Vec<ScalarValue>) -> ScalarValue {
        invoke(name, &args).unwrap()
    }

    fn text(s: &str) -> ScalarValue {
        ScalarValue::from(s)
    }

    #[test]
    fn test_table_matches_handles() {
        for function in ScalarFunction::ALL {
            assert_eq!(
                ScalarFunction::lookup(function.signature().name, function.signature().arity()),
                Some(function)
            );
        }
        assert_eq!(FUNCTIONS.len(), ScalarFunction::ALL.len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(ScalarFunction::lookup("md5", 1), Some(ScalarFunction::Md5));
        assert_eq!(
            ScalarFunction::lookup("SUBSTRING_INDEX", 3),
            Some(ScalarFunction::SubstringIndex)
        );
        assert_eq!(
            ScalarFunction::lookup("urldecode", 1),
            Some(ScalarFunction::UrlDecode)
        );
        assert_eq!(
            ScalarFunction::lookup("urldecode", 2),
            Some(ScalarFunction::UrlDecodeWithCharset)
        );
        assert_eq!(ScalarFunction::lookup("urldecode", 3), None);
        assert_eq!(ScalarFunction::lookup("greatest", 2), None);
    }

    #[test]
    fn test_invoke_functions() {
        assert_eq!(
            call("d2d", vec!["2013-09-02".into(), "-".into(), "".into()]),
            text("20130902")
        );
        assert_eq!(
            call("date2datekey", vec!["2013-09-02".into()]),
            text("20130902")
        );
        assert_eq!(
            call("datekey2date", vec!["20130902".into()]),
            text("2013-09-02")
        );
        assert_eq!(
            call(
                "substring_index",
                vec!["www.mysql.com".into(), ".".into(), 2_i64.into()]
            ),
            text("www.mysql")
        );
        assert_eq!(
            call("md5", vec!["presto".into()]),
            text("1e954771813210da5673f51da7e4394c")
        );
        assert_eq!(call("urldecode", vec!["abc%20def".into()]), text("abc def"));
        assert_eq!(
            call("urldecode", vec!["abc%".into(), "utf-8".into()]),
            text("")
        );
    }

    #[test]
    fn test_null_policies() {
        use ScalarValue::Null;

        assert_eq!(call("d2d", vec![Null, "-".into(), "".into()]), Null);
        assert_eq!(call("d2d", vec!["2013-09-02".into(), Null, "".into()]), Null);
        assert_eq!(call("d2d", vec!["garbage".into(), "-".into(), "".into()]), Null);
        assert_eq!(call("date2datekey", vec![Null]), Null);
        assert_eq!(call("datekey2date", vec![Null]), Null);
        assert_eq!(call("md5", vec![Null]), Null);
        assert_eq!(call("substring_index", vec![Null, ".".into(), 1_i64.into()]), Null);
        assert_eq!(call("substring_index", vec!["a.b".into(), Null, 1_i64.into()]), Null);
        assert_eq!(call("substring_index", vec!["a.b".into(), ".".into(), Null]), Null);

        assert_eq!(call("urldecode", vec![Null]), text(""));
        assert_eq!(call("urldecode", vec!["abc".into(), Null]), text(""));
    }

    #[test]
    fn test_never_null_functions_are_flagged() {
        for signature in &FUNCTIONS {
            let expected = if signature.name == "urldecode" {
                NullPolicy::NeverNull
            } else {
                NullPolicy::Nullable
            };
            assert_eq!(signature.null_policy, expected, "{signature}");
        }
    }

    #[test]
    fn test_invoke_errors() {
        assert_eq!(
            invoke("md5", &["a".into(), "b".into()]),
            Err(FunctionError::UnknownFunction {
                name: "md5".to_owned(),
                arity: 2
            })
        );
        assert_eq!(
            ScalarFunction::Md5.invoke(&[]),
            Err(FunctionError::ArgumentCount {
                function: "md5",
                expected: 1,
                actual: 0
            })
        );
        assert_eq!(
            invoke("substring_index", &["a.b".into(), ".".into(), "2".into()]),
            Err(FunctionError::ArgumentType {
                function: "substring_index",
                position: 3,
                expected: DataType::Bigint,
                actual: DataType::Varchar
            })
        );
    }

    #[test]
    fn test_signature_display() {
        assert_eq!(
            ScalarFunction::SubstringIndex.to_string(),
            "substring_index(varchar, varchar, bigint) -> varchar"
        );
        assert_eq!(
            ScalarFunction::UrlDecode.to_string(),
            "urldecode(varchar) -> varchar"
        );
    }

    #[test]
    fn test_scalar_value_serde() {
        let values: Vec<ScalarValue> = serde_json::from_str(r#"[null, 2, "www.mysql.com"]"#).unwrap();
        assert_eq!(
            values,
            vec![ScalarValue::Null, 2_i64.into(), "www.mysql.com".into()]
        );
        assert_eq!(
            serde_json::to_string(&values).unwrap(),
            r#"[null,2,"www.mysql.com"]"#
        );
    }

    #[test]
    fn test_catalog_serializes() {
        let json = serde_json::to_value(FUNCTIONS[3]).unwrap();
        assert_eq!(json["name"], "substring_index");
        assert_eq!(
            json["arguments"],
            serde_json::json!(["varchar", "varchar", "bigint"])
        );
        assert_eq!(json["null_policy"], "nullable");
    }

    #[test]
    fn test_scalar_value_accessors() {
        let text = ScalarValue::from("abc");
        assert_eq!(text.as_str(), Some("abc"));
        assert_eq!(text.as_i64(), None);
        assert_eq!(text.data_type(), Some(DataType::Varchar));
        assert_eq!(ScalarValue::from(None::<String>), ScalarValue::Null);
        assert!(ScalarValue::Null.is_null());
        assert_eq!(ScalarValue::Null.to_string(), "NULL");
    }
}
