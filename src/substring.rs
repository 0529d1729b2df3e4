//! MySQL `SUBSTRING_INDEX`.

/// Returns the part of `input` before the `count`-th occurrence of
/// `delimiter` when `count` is positive, or after the `count`-th occurrence
/// counted from the right when it is negative.
///
/// `input` comes back unchanged when `count` is zero, the delimiter is empty,
/// or there are fewer than `|count|` occurrences. Occurrences may overlap:
/// every search resumes one character past the start of the previous match
/// (or, from the right, strictly before it).
///
/// ```
/// use sql_udf::substring_index;
///
/// assert_eq!(substring_index(Some("www.mysql.com"), Some("."), 2).as_deref(), Some("www.mysql"));
/// assert_eq!(substring_index(Some("www.mysql.com"), Some("."), -2).as_deref(), Some("mysql.com"));
/// ```
pub fn substring_index(input: Option<&str>, delimiter: Option<&str>, count: i64) -> Option<String> {
    let (input, delimiter) = (input?, delimiter?);
    if count == 0 || delimiter.is_empty() {
        return Some(input.to_owned());
    }

    let sliced = if count > 0 {
        nth_from_left(input, delimiter, count.unsigned_abs()).map(|start| &input[..start])
    } else {
        nth_from_right(input, delimiter, count.unsigned_abs())
            .map(|start| &input[start + delimiter.len()..])
    };
    Some(sliced.unwrap_or(input).to_owned())
}

/// Byte offset where the `n`-th occurrence scanning forward starts.
fn nth_from_left(haystack: &str, needle: &str, n: u64) -> Option<usize> {
    // `needle` is non-empty, so its first char is also the first char of every match.
    let step = needle.chars().next().map_or(1, char::len_utf8);
    let mut from = 0;
    let mut found = None;
    for _ in 0..n {
        let start = from + haystack.get(from..)?.find(needle)?;
        found = Some(start);
        from = start + step;
    }
    found
}

/// Byte offset where the `n`-th occurrence scanning backward starts.
fn nth_from_right(haystack: &str, needle: &str, n: u64) -> Option<usize> {
    let mut before = haystack.len();
    let mut found = None;
    for _ in 0..n {
        let start = haystack[..before]
            .char_indices()
            .rev()
            .map(|(i, _)| i)
            .find(|&i| haystack[i..].starts_with(needle))?;
        found = Some(start);
        before = start;
    }
    found
}
