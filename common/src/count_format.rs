//! Display formatting for facet counts.

use serde::{Deserialize, Serialize};

use crate::facet_summary::FacetCell;

/// Text shown for [`FacetCell::Missing`] unless configured otherwise.
pub const DEFAULT_MISSING_MARKER: &str = "-9999";

/// Display settings for table cells, handed from the server config to the
/// tables that render counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountFormat {
    pub missing_marker: String,
}

impl Default for CountFormat {
    fn default() -> Self {
        Self { missing_marker: DEFAULT_MISSING_MARKER.to_string() }
    }
}

impl CountFormat {
    pub fn cell(&self, value: Option<FacetCell>) -> String {
        format_count(value, &self.missing_marker)
    }
}

/// Renders a table cell for display.
///
/// An absent cell renders as an empty string and a missing cell as
/// `missing_marker` verbatim, so the UI can tell it apart from a real zero.
pub fn format_count(value: Option<FacetCell>, missing_marker: &str) -> String {
    match value {
        None => String::new(),
        Some(FacetCell::Missing) => missing_marker.to_string(),
        Some(FacetCell::Count(c)) => group_thousands(c),
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut result = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}
