//! The typed, tagged-union wire protocol (§4.2, §6).
//!
//! ## Wire types
//!
//! - [`Frame`] — the closed set of messages exchanged over a room
//!   connection, discriminated by a `type` field
//! - [`GameStatus`] — the room's game-status enum as it appears on the wire
//! - [`Emoji`] — the closed reaction alphabet
//! - [`SoundSource`] / [`SoundScope`] — sound-preference routing fields
//!
//! ## Codec
//!
//! - [`decode`] / [`encode`] — total, stable encode; decode that never
//!   panics on malformed input

mod codec;
mod emoji;
mod frame;
mod sound;

pub use codec::{decode, encode, DecodeError};
pub use emoji::Emoji;
pub use frame::{Frame, GameStatus, ReactionCount};
pub use sound::{SoundScope, SoundSource};
