//! Lookups over the nested pivot lists returned by the search index.
//!
//! A pivot for `source,field` is a list of source nodes, each optionally
//! carrying the list of field values counted within that source. Lists are
//! bounded by the index's facet limit, so lookups scan linearly.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotNode {
    pub value: String,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<Vec<PivotNode>>,
}

impl PivotNode {
    pub fn leaf(value: &str, count: u64) -> Self {
        Self { value: value.to_string(), count, pivot: None }
    }

    pub fn with_children(value: &str, count: u64, children: Vec<PivotNode>) -> Self {
        Self { value: value.to_string(), count, pivot: Some(children) }
    }
}

fn find<'a>(nodes: &'a [PivotNode], value: &str) -> Option<&'a PivotNode> {
    nodes.iter().find(|n| n.value == value)
}

/// Count of `f1` nested under top-level value `f0`, or 0 when either level is absent.
pub fn pivot_value(pivot: &[PivotNode], f0: &str, f1: &str) -> u64 {
    let Some(node) = find(pivot, f0) else {
        return 0;
    };
    let Some(children) = node.pivot.as_deref() else {
        return 0;
    };
    find(children, f1).map(|n| n.count).unwrap_or(0)
}

/// Top-level count for `f0`, or 0 when absent.
pub fn pivot_total(pivot: &[PivotNode], f0: &str) -> u64 {
    find(pivot, f0).map(|n| n.count).unwrap_or(0)
}
