//! Key extraction: picks the part of a line that takes part in comparisons

/// Return the 1-based whitespace-delimited `column` of `line`.
///
/// A column of zero or less, or one past the last field, selects the whole
/// line. Extraction never fails.
pub fn extract_key(line: &str, column: i64) -> &str {
    if column <= 0 {
        return line;
    }

    usize::try_from(column - 1)
        .ok()
        .and_then(|idx| line.split_whitespace().nth(idx))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_line_for_non_positive_column() {
        assert_eq!(extract_key("item 30", 0), "item 30");
        assert_eq!(extract_key("item 30", -1), "item 30");
    }

    #[test]
    fn test_column_selection() {
        assert_eq!(extract_key("item 30", 1), "item");
        assert_eq!(extract_key("item 30", 2), "30");
        assert_eq!(extract_key("  a\t\tb   c ", 3), "c");
    }

    #[test]
    fn test_out_of_range_falls_back_to_line() {
        assert_eq!(extract_key("item 30", 3), "item 30");
        assert_eq!(extract_key("", 1), "");
        assert_eq!(extract_key("   ", 1), "   ");
    }
}
