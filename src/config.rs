//! Configuration management for sort operations

use crate::error::{SortError, SortResult};
use std::str::FromStr;

/// Upper bound on file operands accepted in one run
pub const MAX_INPUT_FILES: usize = 10_000;

/// Which direction check mode enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckDirection {
    /// Input must already be in the requested order (ascending, or descending with `reverse`)
    #[default]
    FollowReverse,
    /// Input must be ascending whatever `reverse` says
    Ascending,
}

/// Main configuration structure for sort operations
#[derive(Debug, Clone, Default)]
pub struct SortConfig {
    /// 1-based column used as the key; zero or negative means the whole line
    pub key: i64,
    /// Compare keys as base-10 integers
    pub numeric: bool,
    /// Reverse the result of comparisons
    pub reverse: bool,
    /// Drop exact duplicate lines before sorting
    pub unique: bool,
    /// Compare by abbreviated month name
    pub by_month: bool,
    /// Trim surrounding whitespace from the key
    pub ignore_blanks: bool,
    /// Check if input is already sorted
    pub check: bool,
    /// Compare human readable numbers (2K, 10M, 1G)
    pub numeric_suffix: bool,
    /// Direction enforced by check mode
    pub check_direction: CheckDirection,
    /// Output file path
    pub output_file: Option<String>,
    /// Files to read from (if not specified, use stdin)
    pub input_files: Vec<String>,
    /// Debug mode (verbose logging)
    pub debug: bool,
}

impl SortConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key column
    pub fn with_key(mut self, key: i64) -> Self {
        self.key = key;
        self
    }

    /// Enable numeric comparison
    pub fn with_numeric(mut self, numeric: bool) -> Self {
        self.numeric = numeric;
        self
    }

    /// Enable reverse sorting
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Enable unique output
    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Enable month comparison
    pub fn with_by_month(mut self, by_month: bool) -> Self {
        self.by_month = by_month;
        self
    }

    /// Enable blank trimming
    pub fn with_ignore_blanks(mut self, ignore_blanks: bool) -> Self {
        self.ignore_blanks = ignore_blanks;
        self
    }

    /// Enable check mode
    pub fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    /// Enable magnitude suffix comparison
    pub fn with_numeric_suffix(mut self, numeric_suffix: bool) -> Self {
        self.numeric_suffix = numeric_suffix;
        self
    }

    /// Set the direction check mode enforces
    pub fn with_check_direction(mut self, direction: CheckDirection) -> Self {
        self.check_direction = direction;
        self
    }

    /// Set output file
    pub fn with_output_file(mut self, output_file: Option<String>) -> Self {
        self.output_file = output_file;
        self
    }

    /// Set input files
    pub fn with_input_files(mut self, files: Vec<String>) -> Self {
        self.input_files = files;
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> SortResult<()> {
        if self.input_files.len() > MAX_INPUT_FILES {
            return Err(SortError::invalid_config(&format!(
                "too many input files: {} (max: {})",
                self.input_files.len(),
                MAX_INPUT_FILES
            )));
        }

        if matches!(self.output_file.as_deref(), Some("")) {
            return Err(SortError::invalid_config("output file name is empty"));
        }

        Ok(())
    }

    /// Column index if a key column is in effect
    pub fn key_column(&self) -> Option<usize> {
        usize::try_from(self.key).ok().filter(|&k| k > 0)
    }

    /// Check if reading from stdin
    pub fn reading_from_stdin(&self) -> bool {
        self.input_files.is_empty() || (self.input_files.len() == 1 && self.input_files[0] == "-")
    }

    /// Names of the active key transforms, in application order
    pub fn active_stages(&self) -> Vec<&'static str> {
        let mut stages = Vec::new();
        if self.ignore_blanks {
            stages.push("trim-blanks");
        }
        if self.by_month {
            stages.push("month");
        }
        if self.numeric_suffix {
            stages.push("human-numeric");
        }
        if self.numeric {
            stages.push("numeric");
        }
        stages
    }
}

impl FromStr for CheckDirection {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "follow" | "follow-reverse" => Ok(CheckDirection::FollowReverse),
            "ascending" | "asc" => Ok(CheckDirection::Ascending),
            _ => Err(SortError::parse_error(&format!(
                "unknown check direction: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for CheckDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CheckDirection::FollowReverse => "follow",
            CheckDirection::Ascending => "ascending",
        };
        write!(f, "{name}")
    }
}

/// Builder pattern for creating configurations
pub struct SortConfigBuilder {
    config: SortConfig,
}

impl SortConfigBuilder {
    /// Start building a new configuration
    pub fn new() -> Self {
        Self {
            config: SortConfig::default(),
        }
    }

    /// Sort by the given 1-based column
    pub fn key(mut self, key: i64) -> Self {
        self.config.key = key;
        self
    }

    /// Enable numeric comparison
    pub fn numeric(mut self) -> Self {
        self.config.numeric = true;
        self
    }

    /// Enable reverse sorting
    pub fn reverse(mut self) -> Self {
        self.config.reverse = true;
        self
    }

    /// Enable unique output
    pub fn unique(mut self) -> Self {
        self.config.unique = true;
        self
    }

    /// Enable month comparison
    pub fn by_month(mut self) -> Self {
        self.config.by_month = true;
        self
    }

    /// Enable blank trimming
    pub fn ignore_blanks(mut self) -> Self {
        self.config.ignore_blanks = true;
        self
    }

    /// Enable check mode
    pub fn check(mut self) -> Self {
        self.config.check = true;
        self
    }

    /// Enable magnitude suffix comparison
    pub fn numeric_suffix(mut self) -> Self {
        self.config.numeric_suffix = true;
        self
    }

    /// Set the direction check mode enforces
    pub fn check_direction(mut self, direction: CheckDirection) -> Self {
        self.config.check_direction = direction;
        self
    }

    /// Set output file
    pub fn output_file(mut self, file: String) -> Self {
        self.config.output_file = Some(file);
        self
    }

    /// Add an input file
    pub fn input_file(mut self, file: String) -> Self {
        self.config.input_files.push(file);
        self
    }

    /// Enable debug logging
    pub fn debug(mut self) -> Self {
        self.config.debug = true;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SortResult<SortConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for SortConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Preset configurations for common use cases
pub mod presets {
    use super::*;

    /// Configuration for numeric sorting
    pub fn numeric() -> SortConfig {
        SortConfig::new().with_numeric(true)
    }

    /// Configuration for month sorting
    pub fn month() -> SortConfig {
        SortConfig::new().with_by_month(true)
    }

    /// Configuration for human-readable sizes
    pub fn human_numeric() -> SortConfig {
        SortConfig::new().with_numeric_suffix(true)
    }

    /// Configuration for sorting with unique output
    pub fn unique() -> SortConfig {
        SortConfig::new().with_unique(true)
    }

    /// Configuration for reverse sorting
    pub fn reverse() -> SortConfig {
        SortConfig::new().with_reverse(true)
    }

    /// Configuration for check mode
    pub fn check() -> SortConfig {
        SortConfig::new().with_check(true)
    }
}
