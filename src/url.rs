use std::fmt;
use std::str::FromStr;

use encoding_rs::{Encoding, REPLACEMENT, UTF_16BE};
use log::debug;
use percent_encoding::percent_decode_str;

use crate::consts::{DEFAULT_CHARSET, ESCAPE_CHAR, FORM_SPACE, UTF_16_LABEL};

/// Charset the bytes of each `%XX` run are read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    encoding:  &'static Encoding,
    sniff_bom: bool,
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encoding.name())
    }
}

/// Error type for URL decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlDecodeError {
    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    /// A `%` without two characters after it.
    #[error("Incomplete trailing escape (%) pattern at byte {position}")]
    IncompleteEscape { position: usize },

    #[error("Illegal hex characters in escape (%) pattern at byte {position}: {escape:?}")]
    IllegalHexDigits { position: usize, escape: String },
}

impl FromStr for Charset {
    type Err = UrlDecodeError;

    /// Accepts WHATWG encoding labels, case-insensitively. Bare `utf-16` is
    /// big-endian unless the bytes start with a byte order mark.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsupported = || UrlDecodeError::UnsupportedCharset(s.to_owned());
        // `for_label` trims whitespace itself; a padded name is not a charset name.
        if s.is_empty() || s.trim() != s {
            return Err(unsupported());
        }
        if s.eq_ignore_ascii_case(UTF_16_LABEL) {
            return Ok(Self {
                encoding:  UTF_16BE,
                sniff_bom: true,
            });
        }
        match Encoding::for_label(s.as_bytes()) {
            Some(encoding) if encoding != REPLACEMENT => Ok(Self {
                encoding,
                sniff_bom: false,
            }),
            _ => Err(unsupported()),
        }
    }
}

impl Charset {
    /// Malformed sequences become U+FFFD.
    fn decode(self, bytes: &[u8]) -> String {
        let decoded = if self.sniff_bom {
            self.encoding.decode(bytes).0
        } else {
            self.encoding.decode_without_bom_handling(bytes).0
        };
        decoded.into_owned()
    }
}

/// Form-decodes `input`: `+` is a space, each run of `%XX` escapes is turned
/// into bytes and read in `charset`, everything else is copied as is.
///
/// # Errors
/// Unknown charset names and `%` escapes that are cut short or not hex.
pub fn try_url_decode(input: &str, charset: &str) -> Result<String, UrlDecodeError> {
    let charset: Charset = charset.parse()?;
    let mut decoded = String::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        let special = input[pos..]
            .find([ESCAPE_CHAR, FORM_SPACE])
            .map_or(input.len(), |i| pos + i);
        decoded.push_str(&input[pos..special]);
        pos = special;

        if input[pos..].starts_with(FORM_SPACE) {
            decoded.push(' ');
            pos += FORM_SPACE.len_utf8();
        } else if pos < input.len() {
            let end = escape_run_end(input, pos)?;
            let bytes: Vec<u8> = percent_decode_str(&input[pos..end]).collect();
            decoded.push_str(&charset.decode(&bytes));
            pos = end;
        }
    }

    Ok(decoded)
}

/// End of the run of consecutive, well-formed `%XX` escapes starting at `start`.
fn escape_run_end(input: &str, start: usize) -> Result<usize, UrlDecodeError> {
    let bytes = input.as_bytes();
    let mut pos = start;
    while bytes.get(pos) == Some(&b'%') {
        let escape = bytes
            .get(pos + 1..pos + 3)
            .ok_or(UrlDecodeError::IncompleteEscape { position: pos })?;
        if !escape.iter().all(u8::is_ascii_hexdigit) {
            return Err(UrlDecodeError::IllegalHexDigits {
                position: pos,
                escape: String::from_utf8_lossy(escape).into_owned(),
            });
        }
        pos += 3;
    }
    Ok(pos)
}

/// `urldecode(text, encoding)`. Never absent: a missing argument or any
/// decoding failure gives the empty string.
pub fn url_decode_with(input: Option<&str>, charset: Option<&str>) -> String {
    let (Some(input), Some(charset)) = (input, charset) else {
        return String::new();
    };
    try_url_decode(input, charset).unwrap_or_else(|err| {
        debug!("urldecode: {input:?} ({charset}): {err}");
        String::new()
    })
}

/// `urldecode(text)` in the default charset.
pub fn url_decode(input: Option<&str>) -> String {
    url_decode_with(input, Some(DEFAULT_CHARSET))
}
