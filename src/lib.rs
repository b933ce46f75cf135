//! Multi-mode line sorting in Rust
//!
//! Orders text lines by a whole-line or column key, compared as text, as
//! integers, by month abbreviation or by human-readable magnitude (2K, 1G).
//! Lines can be deduplicated and the order reversed, and check mode verifies
//! that input is already sorted instead of reordering it.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

pub mod error;
pub mod config;

// Key extraction, normalization and ordering
pub mod key;
pub mod normalize;
pub mod core_sort;

// Line source and sink
pub mod input;
pub mod output;

pub mod logging;

// Re-export commonly used types
pub use config::{CheckDirection, SortConfig, SortConfigBuilder};
pub use core_sort::CoreSort;
pub use error::{SortError, SortResult};

/// Exit codes matching GNU sort
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const SORT_FAILURE: i32 = 2;

/// Order `lines` under `config` without touching any file or stream
pub fn order_lines(lines: Vec<String>, config: &SortConfig) -> SortResult<Vec<String>> {
    CoreSort::new(config.clone()).order(lines)
}

/// Main sort function: reads the configured inputs and writes the ordered lines
pub fn sort(config: &SortConfig) -> SortResult<i32> {
    config.validate()?;
    CoreSort::new(config.clone()).sort()?;
    Ok(EXIT_SUCCESS)
}
