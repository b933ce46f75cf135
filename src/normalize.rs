//! Key normalization
//!
//! A key goes through an ordered list of optional transforms chosen from the
//! configuration: blank trimming, month conversion, then magnitude-suffix
//! conversion. Integer comparison is pairwise and therefore applied by
//! [`KeyPipeline::compare_keys`] rather than as a stage.
//!
//! Numbers are compared through a fixed-width decimal encoding so that plain
//! string comparison agrees with numeric order ("9" would otherwise sort after
//! "10").

use crate::config::SortConfig;
use std::borrow::Cow;
use std::cmp::Ordering;

/// Width of the zero-padded integer encoding
pub const KEY_WIDTH: usize = 64;

/// Month abbreviations, indexed by month number - 1
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Magnitude suffixes and their multipliers
const SUFFIXES: [(char, i128); 3] = [
    ('K', 1_000),
    ('M', 1_000_000),
    ('G', 1_000_000_000),
];

/// Encode an integer as a fixed-width string whose byte order matches numeric order.
///
/// Non-negative values are zero-padded to [`KEY_WIDTH`] digits. Negative
/// values become `-` followed by the nines' complement of their padded
/// magnitude, which places them before every non-negative value and reverses
/// their order by magnitude.
pub fn encode_integer(value: i128) -> String {
    if value >= 0 {
        return format!("{:0>width$}", value, width = KEY_WIDTH);
    }

    let magnitude = format!("{:0>width$}", value.unsigned_abs(), width = KEY_WIDTH - 1);
    let complement: String = magnitude
        .bytes()
        .map(|b| char::from(b'9' - (b - b'0')))
        .collect();
    format!("-{complement}")
}

/// Parse a base-10 integer: optional sign, then ASCII digits, within `i64` range.
pub fn parse_integer(s: &str) -> Option<i128> {
    s.parse::<i64>().ok().map(i128::from)
}

/// Two-digit month number for the first token that is a month abbreviation.
pub fn month_number(key: &str) -> Option<String> {
    key.split_whitespace().find_map(|token| {
        MONTHS
            .iter()
            .position(|&month| month == token)
            .map(|idx| format!("{:02}", idx + 1))
    })
}

/// Value of a key written with a K, M or G magnitude suffix.
pub fn suffix_value(key: &str) -> Option<i128> {
    SUFFIXES.iter().find_map(|&(suffix, multiplier)| {
        key.strip_suffix(suffix)
            .and_then(parse_integer)
            .map(|n| n * multiplier)
    })
}

/// A key in the middle of normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey<'a> {
    /// Comparison text
    pub text: Cow<'a, str>,
    /// Integer value, once a stage has recognised one
    pub value: Option<i128>,
}

impl<'a> SortKey<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            value: None,
        }
    }

    /// Integer reading of the key for numeric comparison
    pub fn numeric_value(&self) -> Option<i128> {
        self.value.or_else(|| parse_integer(&self.text))
    }
}

/// One key transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Strip leading and trailing whitespace
    TrimBlanks,
    /// Replace the key with the number of the first month token found
    Month,
    /// Expand K/M/G suffixes and zero-pad any integer key
    Suffix,
}

impl Stage {
    /// Apply this transform. Keys the stage does not recognise pass through unchanged.
    pub fn apply<'a>(self, key: SortKey<'a>) -> SortKey<'a> {
        match self {
            Stage::TrimBlanks => {
                let text = match key.text {
                    Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
                    Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
                };
                SortKey {
                    text,
                    value: key.value,
                }
            }
            Stage::Month => match month_number(&key.text) {
                Some(month) => SortKey {
                    text: Cow::Owned(month),
                    value: None,
                },
                None => key,
            },
            Stage::Suffix => {
                match suffix_value(&key.text).or_else(|| parse_integer(&key.text)) {
                    Some(value) => SortKey {
                        text: Cow::Owned(encode_integer(value)),
                        value: Some(value),
                    },
                    None => key,
                }
            }
        }
    }
}

/// Ordered transforms plus the pairwise numeric switch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPipeline {
    stages: Vec<Stage>,
    numeric: bool,
}

impl KeyPipeline {
    /// Pipeline with the given stages, applied in slice order
    pub fn new(stages: Vec<Stage>, numeric: bool) -> Self {
        Self { stages, numeric }
    }

    /// Build the pipeline for a configuration: trim, month, suffix.
    pub fn from_config(config: &SortConfig) -> Self {
        let mut stages = Vec::with_capacity(3);
        if config.ignore_blanks {
            stages.push(Stage::TrimBlanks);
        }
        if config.by_month {
            stages.push(Stage::Month);
        }
        if config.numeric_suffix {
            stages.push(Stage::Suffix);
        }
        Self::new(stages, config.numeric)
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    /// True when no transform is active and keys compare as extracted
    pub fn is_identity(&self) -> bool {
        self.stages.is_empty() && !self.numeric
    }

    /// Run every stage over an extracted key
    pub fn normalize<'a>(&self, key: &'a str) -> SortKey<'a> {
        self.stages
            .iter()
            .fold(SortKey::new(key), |key, stage| stage.apply(key))
    }

    /// Compare two normalized keys.
    ///
    /// In numeric mode two integer keys compare by value, which is the order of
    /// their fixed-width encodings; if either side does not hold an integer,
    /// both fall back to their text.
    pub fn compare_keys(&self, a: &SortKey<'_>, b: &SortKey<'_>) -> Ordering {
        if self.numeric {
            if let (Some(x), Some(y)) = (a.numeric_value(), b.numeric_value()) {
                return x.cmp(&y);
            }
        }
        a.text.cmp(&b.text)
    }

    /// Normalize and compare two extracted keys
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.compare_keys(&self.normalize(a), &self.normalize(b))
    }

    /// Final comparison string for a single key, for diagnostics.
    ///
    /// In numeric mode this is the encoding when the key holds an integer.
    pub fn comparison_string(&self, key: &str) -> String {
        let key = self.normalize(key);
        match key.numeric_value() {
            Some(value) if self.numeric => encode_integer(value),
            _ => key.text.into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline(config: SortConfig) -> KeyPipeline {
        KeyPipeline::from_config(&config)
    }

    #[test]
    fn test_encode_integer_width_and_padding() {
        let encoded = encode_integer(42);
        assert_eq!(encoded.len(), KEY_WIDTH);
        assert!(encoded.ends_with("42"));
        assert!(encoded[..KEY_WIDTH - 2].bytes().all(|b| b == b'0'));
        assert_eq!(encode_integer(-5).len(), KEY_WIDTH);
    }

    #[test]
    fn test_encode_integer_orders_like_numbers() {
        let values = [-1_000_000_000_000i128, -10, -5, -1, 0, 1, 9, 10, 1500, 2000];
        for pair in values.windows(2) {
            assert!(
                encode_integer(pair[0]) < encode_integer(pair[1]),
                "{} should encode before {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("123"), Some(123));
        assert_eq!(parse_integer("-456"), Some(-456));
        assert_eq!(parse_integer("+789"), Some(789));
        assert_eq!(parse_integer("007"), Some(7));
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("12.5"), None);
        assert_eq!(parse_integer(" 12"), None);
        assert_eq!(parse_integer("99999999999999999999"), None);
    }

    #[test]
    fn test_month_number() {
        assert_eq!(month_number("Mar"), Some("03".to_string()));
        assert_eq!(month_number("born 12 Jan 1990"), Some("01".to_string()));
        assert_eq!(month_number("Dec"), Some("12".to_string()));
        assert_eq!(month_number("Feb Mar"), Some("02".to_string()));
        assert_eq!(month_number("MAR"), None);
        assert_eq!(month_number("March"), None);
        assert_eq!(month_number(""), None);
    }

    #[test]
    fn test_suffix_value() {
        assert_eq!(suffix_value("2K"), Some(2_000));
        assert_eq!(suffix_value("999M"), Some(999_000_000));
        assert_eq!(suffix_value("1G"), Some(1_000_000_000));
        assert_eq!(suffix_value("-3K"), Some(-3_000));
        assert_eq!(suffix_value("K"), None);
        assert_eq!(suffix_value("1.5K"), None);
        assert_eq!(suffix_value("2k"), None);
        assert_eq!(suffix_value("1500"), None);
    }

    #[test]
    fn test_suffix_does_not_overflow() {
        let value = suffix_value(&format!("{}G", i64::MAX)).expect("suffix should parse");
        assert_eq!(value, i128::from(i64::MAX) * 1_000_000_000);
        assert!(encode_integer(value) > encode_integer(i128::from(i64::MAX)));
    }

    #[test]
    fn test_stage_order_is_fixed() {
        let config = SortConfig::new()
            .with_numeric_suffix(true)
            .with_by_month(true)
            .with_ignore_blanks(true);
        assert_eq!(
            pipeline(config).stages(),
            &[Stage::TrimBlanks, Stage::Month, Stage::Suffix]
        );
    }

    #[test]
    fn test_trim_blanks() {
        let p = pipeline(SortConfig::new().with_ignore_blanks(true));
        assert_eq!(p.normalize("  b  ").text, "b");
        assert_eq!(p.compare("  b", "a "), Ordering::Greater);

        let plain = pipeline(SortConfig::new());
        assert_eq!(plain.compare("  b", "a "), Ordering::Less);
    }

    #[test]
    fn test_month_stage() {
        let p = pipeline(SortConfig::new().with_by_month(true));
        assert_eq!(p.normalize("Mar").text, "03");
        assert_eq!(p.normalize("Jan").text, "01");
        assert_eq!(p.compare("Jan", "Dec"), Ordering::Less);
        assert_eq!(p.compare("Dec", "Feb"), Ordering::Greater);
        assert_eq!(p.normalize("no month").text, "no month");
    }

    #[test]
    fn test_suffix_stage_orders_by_magnitude() {
        let p = pipeline(SortConfig::new().with_numeric_suffix(true));
        assert_eq!(p.compare("1500", "2K"), Ordering::Less);
        assert_eq!(p.compare("1G", "999M"), Ordering::Greater);
        assert_eq!(p.compare("2K", "2000"), Ordering::Equal);
        assert_eq!(p.normalize("2K").text, encode_integer(2_000));
        assert_eq!(p.normalize("abcK").text, "abcK");
    }

    #[test]
    fn test_numeric_stage() {
        let p = pipeline(SortConfig::new().with_numeric(true));
        assert_eq!(p.compare("9", "10"), Ordering::Less);
        assert_eq!(p.compare("-10", "-9"), Ordering::Less);
        assert_eq!(p.compare("010", "10"), Ordering::Equal);

        let plain = pipeline(SortConfig::new());
        assert_eq!(plain.compare("9", "10"), Ordering::Greater);
    }

    #[test]
    fn test_numeric_mixed_pair_falls_back_to_text() {
        let p = pipeline(SortConfig::new().with_numeric(true));
        // "10" parses, "abc" does not: both compare as raw text
        assert_eq!(p.compare("10", "abc"), Ordering::Less);
        assert_eq!(p.compare("9", "10x"), Ordering::Greater);
    }

    #[test]
    fn test_numeric_compare_matches_encoded_order() {
        let p = pipeline(SortConfig::new().with_numeric(true).with_numeric_suffix(true));
        let keys = ["-7000", "-12", "-3", "0", "8", "10", "2K", "1500", "3M", "1G"];
        for a in keys {
            for b in keys {
                assert_eq!(
                    p.compare(a, b),
                    p.comparison_string(a).cmp(&p.comparison_string(b)),
                    "{a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn test_numeric_after_month() {
        let p = pipeline(SortConfig::new().with_by_month(true).with_numeric(true));
        assert_eq!(p.compare("Oct", "Feb"), Ordering::Greater);
        assert_eq!(p.comparison_string("Mar"), encode_integer(3));
    }

    #[test]
    fn test_numeric_with_suffix() {
        let p = pipeline(
            SortConfig::new()
                .with_numeric(true)
                .with_numeric_suffix(true),
        );
        assert_eq!(p.compare("-2K", "-1500"), Ordering::Less);
        assert_eq!(p.compare("3M", "2999999"), Ordering::Greater);
    }

    #[test]
    fn test_identity_pipeline() {
        let p = pipeline(SortConfig::new());
        assert!(p.is_identity());
        assert_eq!(p.comparison_string(" x "), " x ");
        assert!(!pipeline(SortConfig::new().with_numeric(true)).is_identity());
    }
}
