//! The closed reaction alphabet (§6). An emoji outside this set fails to
//! deserialize, which the codec turns into `DecodeError::BadFrame`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emoji {
    #[serde(rename = "👏")]
    Clap,
    #[serde(rename = "🎉")]
    Party,
    #[serde(rename = "❤️")]
    Heart,
    #[serde(rename = "🔥")]
    Fire,
    #[serde(rename = "😂")]
    Laugh,
    #[serde(rename = "😮")]
    Wow,
}
