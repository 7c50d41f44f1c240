//! Cross-tabulated facet summary shared between frontend and backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Label of the synthetic row and column holding totals.
pub const TOTAL_KEY: &str = "Total";

/// One cell of a facet table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacetCell {
    Count(u64),
    /// No meaningful count exists here (the grand total of the "Total" row).
    Missing,
}

impl FacetCell {
    pub fn count(&self) -> Option<u64> {
        match self {
            FacetCell::Count(c) => Some(*c),
            FacetCell::Missing => None,
        }
    }
}

impl From<u64> for FacetCell {
    fn from(value: u64) -> Self {
        FacetCell::Count(value)
    }
}

/// Counts for one facet field, one row per facet value plus a trailing "Total" row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FacetTable {
    pub ordered_keys: Vec<String>,
    pub rows: BTreeMap<String, BTreeMap<String, FacetCell>>,
}

impl FacetTable {
    pub fn cell(&self, row: &str, column: &str) -> Option<FacetCell> {
        self.rows.get(row).and_then(|r| r.get(column)).copied()
    }

    pub fn set(&mut self, row: &str, column: &str, cell: FacetCell) {
        self.rows
            .entry(row.to_string())
            .or_default()
            .insert(column.to_string(), cell);
    }

    /// Appends `key` to the display order and makes sure it has a row.
    pub fn push_key(&mut self, key: &str) {
        self.ordered_keys.push(key.to_string());
        self.rows.entry(key.to_string()).or_default();
    }

    /// Iterates rows in display order.
    pub fn ordered_rows(&self) -> impl Iterator<Item = (&str, Option<&BTreeMap<String, FacetCell>>)> {
        self.ordered_keys
            .iter()
            .map(|k| (k.as_str(), self.rows.get(k)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FacetSummary {
    /// Requested facet fields, in request order.
    pub fields: Vec<String>,
    pub total_records: u64,
    /// Distinct sources, in the order the index reported them.
    pub sources: Vec<String>,
    pub totals: BTreeMap<String, u64>,
    pub facets: BTreeMap<String, FacetTable>,
}

impl FacetSummary {
    pub fn table(&self, field: &str) -> Option<&FacetTable> {
        self.facets.get(field)
    }
}
