//! Board Generator request/response wire types (§3, §6).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
}

impl BoardConfig {
    pub fn slots(&self) -> usize {
        self.rows * self.cols
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupFrequency {
    #[serde(rename = "startIndex")]
    pub start_index: usize,
    #[serde(rename = "endIndex")]
    pub end_index: usize,
    pub frequency: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFrequency {
    #[serde(rename = "itemId")]
    pub item_id: String,
    pub frequency: u32,
}

/// §6: `{type: "uniform"} | {type: "grouped", groups: [...]} | {type:
/// "custom", frequencies: [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Distribution {
    Uniform,
    Grouped { groups: Vec<GroupFrequency> },
    Custom { frequencies: Vec<ItemFrequency> },
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardGenRequest {
    pub items: Vec<ItemRef>,
    #[serde(rename = "numBoards")]
    pub num_boards: usize,
    #[serde(rename = "boardConfig")]
    pub board_config: BoardConfig,
    pub distribution: Distribution,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub seed: Option<i32>,
    /// Not in §6's wire table, which leaves grid layout "policy fixed per
    /// request" without naming a field for it. Defaults to randomized
    /// per-board placement; `false` uses the solver's canonical order.
    #[serde(rename = "shuffleGrid", default = "default_true")]
    pub shuffle_grid: bool,
}
