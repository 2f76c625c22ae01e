//! Wire-visible connection-closure reasons (§6, §7).

use std::fmt::Display;

/// The closed set of reasons a connection may be closed for. Every error
/// kind in §7 that terminates a connection maps to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    RoomNotFound,
    AlreadyConnected,
    GameEnded,
    BadFrame,
    SlowConsumer,
    HeartbeatLost,
    InternalError,
}

impl Display for CloseReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CloseReason::RoomNotFound => "room_not_found",
            CloseReason::AlreadyConnected => "already_connected",
            CloseReason::GameEnded => "game_ended",
            CloseReason::BadFrame => "bad_frame",
            CloseReason::SlowConsumer => "slow_consumer",
            CloseReason::HeartbeatLost => "heartbeat_lost",
            CloseReason::InternalError => "internal_error",
        };
        write!(f, "{label}")
    }
}

impl std::error::Error for CloseReason {}
