use std::str::FromStr;

use log::debug;

use crate::consts::{DATE_KEY_SEPARATOR, DATE_SEPARATOR, DAY_WIDTH, MONTH_WIDTH, YEAR_WIDTH};
use crate::prelude::*;
use crate::types::{Day, Month, Year};
use crate::ParseError;

/// A validated calendar date read from, and written to, the fixed-width
/// `yyyy{sep}MM{sep}dd` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}-{day}")]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

impl CalendarDate {
    /// # Errors
    /// Returns the first component that is out of range for the calendar.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> Day {
        self.day
    }

    /// Parses `yyyy{sep}MM{sep}dd`. Fields are read by width, not by
    /// splitting on `sep`, so an empty separator is as unambiguous as any other.
    /// The whole input must be consumed.
    ///
    /// # Errors
    /// `EmptyInput` for `""`, `InvalidFormat` when the layout does not match,
    /// or the component error when the date does not exist.
    pub fn parse_with_separator(s: &str, separator: &str) -> Result<Self, ParseError> {
        if s.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let invalid = || ParseError::InvalidFormat(s.to_owned());

        let (year, rest) = take_digits(s, YEAR_WIDTH).ok_or_else(invalid)?;
        let rest = rest.strip_prefix(separator).ok_or_else(invalid)?;
        let (month, rest) = take_digits(rest, MONTH_WIDTH).ok_or_else(invalid)?;
        let rest = rest.strip_prefix(separator).ok_or_else(invalid)?;
        let (day, rest) = take_digits(rest, DAY_WIDTH).ok_or_else(invalid)?;
        if !rest.is_empty() {
            return Err(invalid());
        }

        let year = u16::try_from(year).map_err(|_| invalid())?;
        let month = u8::try_from(month).map_err(|_| invalid())?;
        let day = u8::try_from(day).map_err(|_| invalid())?;
        Self::new(year, month, day)
    }

    /// Renders `yyyy{sep}MM{sep}dd` with every field zero padded.
    pub fn format_with_separator(&self, separator: &str) -> String {
        format!(
            "{}{separator}{}{separator}{}",
            self.year, self.month, self.day
        )
    }
}

/// Splits `width` leading ASCII digits off `s` and returns their value.
fn take_digits(s: &str, width: usize) -> Option<(u32, &str)> {
    let digits = s.get(..width)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = digits.parse().ok()?;
    Some((value, &s[width..]))
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_separator(s, DATE_SEPARATOR)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// `d2d`: reads `input` as `yyyy{source}MM{source}dd` and writes it back as
/// `yyyy{target}MM{target}dd`. Absent input and anything that is not a real
/// date both yield `None`.
pub fn reformat_date(input: Option<&str>, source: &str, target: &str) -> Option<String> {
    let input = input?;
    match CalendarDate::parse_with_separator(input, source) {
        Ok(date) => Some(date.format_with_separator(target)),
        Err(err) => {
            debug!("d2d: {input:?} is not yyyy{source}MM{source}dd: {err}");
            None
        }
    }
}

/// `date2datekey`: `2012-08-23` -> `20120823`
pub fn date_to_date_key(date: Option<&str>) -> Option<String> {
    reformat_date(date, DATE_SEPARATOR, DATE_KEY_SEPARATOR)
}

/// `datekey2date`: `20120823` -> `2012-08-23`
pub fn date_key_to_date(date_key: Option<&str>) -> Option<String> {
    reformat_date(date_key, DATE_KEY_SEPARATOR, DATE_SEPARATOR)
}
