//! Scalar SQL functions in the MySQL/Hive dialect: date key conversion,
//! `substring_index`, `md5` and `urldecode`.
//!
//! Every function is pure and takes already-extracted argument values, with
//! `None` standing for SQL `NULL`. The [`registry`] module describes them as a
//! table a query engine can bind against.

mod consts;
mod date;
mod digest;
mod prelude;
pub mod registry;
mod substring;
mod types;
mod url;

pub use consts::*;
pub use date::{CalendarDate, date_key_to_date, date_to_date_key, reformat_date};
pub use digest::md5_hex;
pub use registry::{
    DataType, FUNCTIONS, FunctionError, FunctionSignature, NullPolicy, ScalarFunction, ScalarValue,
    invoke,
};
pub use substring::substring_index;
pub use types::{Day, Month, Year, days_in_month, is_leap_year};
pub use url::{Charset, UrlDecodeError, try_url_decode, url_decode, url_decode_with};

use crate::prelude::*;

/// Why a text value is not a `yyyy{sep}MM{sep}dd` calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year:04}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}
