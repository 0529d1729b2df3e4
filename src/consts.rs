/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Digits in the `yyyy` field
pub const YEAR_WIDTH: usize = 4;
/// Digits in the `MM` field
pub const MONTH_WIDTH: usize = 2;
/// Digits in the `dd` field
pub const DAY_WIDTH: usize = 2;

/// Separator of a calendar date, `2012-08-23`
pub const DATE_SEPARATOR: &str = "-";
/// Separator of a date key, `20120823`
pub const DATE_KEY_SEPARATOR: &str = "";

/// Charset used by `urldecode` when none is given
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Escape introducer in URL-encoded text
pub const ESCAPE_CHAR: char = '%';
/// Form-encoded space
pub const FORM_SPACE: char = '+';
/// Charset label read as big-endian UTF-16 with byte order mark detection
pub const UTF_16_LABEL: &str = "utf-16";
