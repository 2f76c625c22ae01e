//! Per-room authoritative runtime (§3, §4.3–§4.6, §4.8 excluded — the
//! connection loop itself lives in `tabula-hosting`).
//!
//! ## State
//!
//! - [`RoomState`] — the game-status machine: deck position, history,
//!   flip/detail flags (§4.4)
//!
//! ## Membership
//!
//! - [`Membership`] — Host/Controller/Spectator slots (§3, §4.5)
//!
//! ## Routing
//!
//! - [`dispatcher::audience_for`] — per-frame-class audience (§4.3)
//! - [`Coalescer`] — Reaction tumbling-window aggregation (§4.6)
//!
//! ## Actor
//!
//! - [`Room`] — owns `RoomState` + `Membership` + `Coalescer`, processed
//!   serially by a single inbox worker (§5)
//! - [`RoomHandle`] / [`Command`] — the external API into a running room

mod coalescer;
mod dispatcher;
mod membership;
mod room;
mod state;

pub use coalescer::Coalescer;
pub use dispatcher::{audience_for, Audience};
pub use membership::{JoinError, Membership};
pub use room::{Command, JoinOutcome, Room, RoomHandle};
pub use state::{RoomError, RoomState};
