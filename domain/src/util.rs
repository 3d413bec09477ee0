//! Shared utility functions.

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Single-line preview of engine output for logs and error messages.
///
/// Newlines are collapsed to spaces and an ellipsis marks truncation.
pub fn preview(s: &str, max_bytes: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    let cut = truncate_str(&flat, max_bytes);
    if cut.len() < flat.len() {
        format!("{}…", cut)
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_str("namaste world", 7), "namaste");
    }

    #[test]
    fn truncate_multibyte_boundary() {
        // '₹' is 3 bytes
        let s = "₹₹₹";
        assert_eq!(truncate_str(s, 4), "₹");
        assert_eq!(truncate_str(s, 6), "₹₹");
        assert_eq!(truncate_str(s, 9), "₹₹₹");
    }

    #[test]
    fn preview_flattens_and_marks_truncation() {
        assert_eq!(preview("Here is\nthe   plan", 100), "Here is the plan");
        assert_eq!(preview("abcdefgh", 3), "abc…");
        assert_eq!(preview("", 3), "");
    }
}
