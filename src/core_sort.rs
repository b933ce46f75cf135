use crate::config::{CheckDirection, SortConfig};
use crate::error::{SortError, SortResult};
use crate::input::read_input;
use crate::key::extract_key;
use crate::normalize::{KeyPipeline, SortKey};
use crate::output::write_output;
use itertools::Itertools;
use std::cmp::Ordering;
use tracing::{debug, info};

/// Ordering driver: dedup, order check and the final sort
pub struct CoreSort {
    config: SortConfig,
    pipeline: KeyPipeline,
}

impl CoreSort {
    pub fn new(config: SortConfig) -> Self {
        let pipeline = KeyPipeline::from_config(&config);
        debug!(
            key = config.key,
            stages = ?config.active_stages(),
            reverse = config.reverse,
            "built key pipeline"
        );
        Self { config, pipeline }
    }

    /// Extract and normalize the key of a line. Recomputed on every comparison.
    #[inline]
    fn sort_key<'a>(&self, line: &'a str) -> SortKey<'a> {
        self.pipeline.normalize(extract_key(line, self.config.key))
    }

    /// Compare two lines by key in ascending order, ignoring `reverse`
    #[inline]
    pub fn compare_ascending(&self, a: &str, b: &str) -> Ordering {
        self.pipeline
            .compare_keys(&self.sort_key(a), &self.sort_key(b))
    }

    /// Compare two lines in the requested order
    #[inline]
    pub fn compare_lines(&self, a: &str, b: &str) -> Ordering {
        let cmp = self.compare_ascending(a, b);
        if self.config.reverse {
            cmp.reverse()
        } else {
            cmp
        }
    }

    /// The string a line is compared by, for diagnostics and tests
    pub fn comparison_key(&self, line: &str) -> String {
        self.pipeline
            .comparison_string(extract_key(line, self.config.key))
    }

    /// Keep the first occurrence of each distinct line, in encounter order.
    ///
    /// Whole lines are compared, so lines sharing a key but differing in
    /// text all survive.
    pub fn dedup_lines(lines: Vec<String>) -> Vec<String> {
        lines.into_iter().unique().collect()
    }

    /// Verify `lines` are already in order.
    ///
    /// The first adjacent pair found out of order fails with the key of the
    /// earlier line and its 1-based position.
    pub fn check_order(&self, lines: &[String]) -> SortResult<()> {
        for (idx, (prev, next)) in lines.iter().tuple_windows().enumerate() {
            let cmp = match self.config.check_direction {
                CheckDirection::FollowReverse => self.compare_lines(prev, next),
                CheckDirection::Ascending => self.compare_ascending(prev, next),
            };

            if cmp == Ordering::Greater {
                let key = extract_key(prev, self.config.key);
                debug!(line = idx + 1, key, "disorder detected");
                return Err(SortError::disorder(idx + 1, key));
            }
        }

        Ok(())
    }

    /// Order `lines` according to the configuration.
    ///
    /// Nothing is returned when check mode finds a violation.
    pub fn order(&self, lines: Vec<String>) -> SortResult<Vec<String>> {
        let mut lines = if self.config.unique {
            let before = lines.len();
            let lines = Self::dedup_lines(lines);
            debug!(removed = before - lines.len(), "removed duplicate lines");
            lines
        } else {
            lines
        };

        if self.config.check {
            self.check_order(&lines)?;
        }

        if self.has_mixed_numeric_keys(&lines) {
            debug!("numeric and text keys mixed, using fallback merge sort");
            lines = self.merge_sort_lines(lines);
        } else if !self.pipeline.is_identity() || self.config.key_column().is_some() {
            // Stable: equal keys keep their input order
            lines.sort_by(|a, b| self.compare_lines(a, b));
        } else if self.config.reverse {
            lines.sort_unstable_by(|a, b| b.cmp(a));
        } else {
            lines.sort_unstable();
        }

        Ok(lines)
    }

    /// True when numeric mode sees both integer and non-integer keys.
    ///
    /// Such pairs fall back to text comparison, which can make the comparator
    /// intransitive (9 < 10 < 1K < 9), so the std sorts must not see them.
    fn has_mixed_numeric_keys(&self, lines: &[String]) -> bool {
        if !self.pipeline.is_numeric() {
            return false;
        }

        let (mut numbers, mut text) = (false, false);
        for line in lines {
            if self.sort_key(line).numeric_value().is_some() {
                numbers = true;
            } else {
                text = true;
            }
            if numbers && text {
                return true;
            }
        }
        false
    }

    /// Bottom-up stable merge sort driven by [`compare_lines`](Self::compare_lines).
    ///
    /// Runs in O(n log n) comparisons whatever the comparator answers, and
    /// always returns a permutation of its input. Runs already in order are
    /// joined with a single comparison.
    fn merge_sort_lines(&self, lines: Vec<String>) -> Vec<String> {
        let len = lines.len();
        let mut order: Vec<usize> = (0..len).collect();
        let mut merged = vec![0usize; len];

        let mut width = 1;
        while width < len {
            for start in (0..len).step_by(2 * width) {
                let mid = (start + width).min(len);
                let end = (start + 2 * width).min(len);

                if mid == end
                    || self.compare_lines(&lines[order[mid - 1]], &lines[order[mid]])
                        != Ordering::Greater
                {
                    merged[start..end].copy_from_slice(&order[start..end]);
                    continue;
                }

                let (mut left, mut right) = (start, mid);
                for slot in &mut merged[start..end] {
                    let take_left = right == end
                        || (left < mid
                            && self.compare_lines(&lines[order[left]], &lines[order[right]])
                                != Ordering::Greater);
                    if take_left {
                        *slot = order[left];
                        left += 1;
                    } else {
                        *slot = order[right];
                        right += 1;
                    }
                }
            }
            std::mem::swap(&mut order, &mut merged);
            width *= 2;
        }

        let mut slots: Vec<Option<String>> = lines.into_iter().map(Some).collect();
        order
            .into_iter()
            .filter_map(|idx| slots[idx].take())
            .collect()
    }

    /// Read the configured inputs, order them and write the result
    pub fn sort(&self) -> SortResult<()> {
        let lines = read_input(&self.config)?;
        debug!(lines = lines.len(), "loaded input");

        let ordered = self.order(lines)?;
        write_output(&self.config, &ordered)?;

        info!(lines = ordered.len(), "sort completed");
        Ok(())
    }
}
