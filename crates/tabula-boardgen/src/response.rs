//! Board Generator response wire types (§3, §6).

use crate::request::ItemRef;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    #[serde(rename = "boardNumber")]
    pub board_number: usize,
    pub items: Vec<ItemRef>,
    pub grid: Vec<Vec<ItemRef>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardGenResult {
    pub success: bool,
    pub boards: Vec<Board>,
    pub stats: Option<FullStats>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub errors: Option<Vec<String>>,
}

/// §6's `stats` fields plus the Jaccard/frequency-variance diagnostics
/// §4.7 calls "quality metrics returned alongside results" — flattened
/// into one object rather than nested, matching §6's single `stats`
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FullStats {
    #[serde(rename = "maxOverlap")]
    pub max_overlap: usize,
    #[serde(rename = "avgOverlap")]
    pub avg_overlap: f64,
    #[serde(rename = "jaccardMin")]
    pub jaccard_min: f64,
    #[serde(rename = "jaccardAvg")]
    pub jaccard_avg: f64,
    #[serde(rename = "jaccardMax")]
    pub jaccard_max: f64,
    #[serde(rename = "frequencyVariance")]
    pub frequency_variance: f64,
    #[serde(rename = "seedUsed")]
    pub seed_used: i32,
    #[serde(rename = "solverUsed")]
    pub solver_used: &'static str,
    #[serde(rename = "generationTimeMs")]
    pub generation_time_ms: u64,
    #[serde(rename = "bestEffort")]
    pub best_effort: bool,
}

impl BoardGenResult {
    pub fn infeasible(reasons: Vec<String>) -> Self {
        Self {
            success: false,
            boards: Vec::new(),
            stats: None,
            errors: Some(reasons),
        }
    }
}
