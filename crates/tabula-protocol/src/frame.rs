//! The closed frame set (§6). One enum covers both directions: whether a
//! given variant is legal from a given role is an authorization concern
//! that lives in `tabula-gameroom`, not here — this crate only knows how
//! to tell frames apart and encode/decode them.

use crate::{Emoji, SoundScope, SoundSource};
use serde::{Deserialize, Serialize};
use tabula_deck::Item;

/// The room's game-status enum as it appears on the wire (§6). `Waiting`
/// is the pre-Host state, visible only through sync messages — nothing in
/// this workspace ever constructs it server-side, but it stays part of
/// the enum so `STATE_UPDATE.status` round-trips for any future caller
/// that sends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Waiting,
    Ready,
    Playing,
    Paused,
    Finished,
}

/// One entry of a `REACTION_BURST` (§4.6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCount {
    pub emoji: Emoji,
    pub count: u32,
}

/// The full frame set exchanged over a room connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Frame {
    #[serde(rename = "STATE_UPDATE")]
    StateUpdate {
        #[serde(rename = "currentItem", skip_serializing_if = "Option::is_none", default)]
        current_item: Option<Item>,
        #[serde(rename = "currentIndex")]
        current_index: i64,
        #[serde(rename = "totalItems")]
        total_items: usize,
        status: GameStatus,
        #[serde(rename = "historyCount")]
        history_count: usize,
        history: Vec<Item>,
        #[serde(rename = "isFlipped")]
        is_flipped: bool,
        #[serde(rename = "isDetailedExpanded")]
        is_detailed_expanded: bool,
    },
    #[serde(rename = "DRAW_CARD")]
    DrawCard,
    #[serde(rename = "PAUSE_GAME")]
    PauseGame,
    #[serde(rename = "RESUME_GAME")]
    ResumeGame,
    #[serde(rename = "RESET_GAME")]
    ResetGame,
    #[serde(rename = "FLIP_CARD")]
    FlipCard {
        #[serde(rename = "isFlipped")]
        is_flipped: bool,
    },
    #[serde(rename = "TOGGLE_DETAILED")]
    ToggleDetailed {
        #[serde(rename = "isExpanded")]
        is_expanded: bool,
    },
    #[serde(rename = "SOUND_PREFERENCE")]
    SoundPreference {
        enabled: bool,
        source: SoundSource,
        scope: SoundScope,
    },
    #[serde(rename = "SOUND_PREFERENCE_ACK")]
    SoundPreferenceAck { enabled: bool, scope: SoundScope },
    #[serde(rename = "REACTION")]
    Reaction { emoji: Emoji },
    #[serde(rename = "REACTION_BURST")]
    ReactionBurst { reactions: Vec<ReactionCount> },
    #[serde(rename = "SPECTATOR_COUNT")]
    SpectatorCount { count: usize },
}

impl Frame {
    /// Compact label for logging; avoids pulling the full payload into a
    /// `debug!` line.
    pub fn label(&self) -> &'static str {
        match self {
            Frame::StateUpdate { .. } => "STATE_UPDATE",
            Frame::DrawCard => "DRAW_CARD",
            Frame::PauseGame => "PAUSE_GAME",
            Frame::ResumeGame => "RESUME_GAME",
            Frame::ResetGame => "RESET_GAME",
            Frame::FlipCard { .. } => "FLIP_CARD",
            Frame::ToggleDetailed { .. } => "TOGGLE_DETAILED",
            Frame::SoundPreference { .. } => "SOUND_PREFERENCE",
            Frame::SoundPreferenceAck { .. } => "SOUND_PREFERENCE_ACK",
            Frame::Reaction { .. } => "REACTION",
            Frame::ReactionBurst { .. } => "REACTION_BURST",
            Frame::SpectatorCount { .. } => "SPECTATOR_COUNT",
        }
    }
}
