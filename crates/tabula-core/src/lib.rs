//! Shared identifiers, constants, and runtime bootstrap for the tabula workspace.
//!
//! ## Identity
//!
//! - [`ID`] — compile-time typed wrapper over `uuid::Uuid`
//! - [`Unique`] — trait for entities that carry an [`ID`]
//! - [`RoomCode`] — the 4-character room identifier (not a UUID)
//! - [`Role`] — Host, Controller, or Spectator
//!
//! ## Errors
//!
//! - [`CloseReason`] — the wire-visible set of connection-closure reasons
//!
//! ## Constants
//!
//! Timing and sizing knobs shared by the gameroom and hosting crates.
#![allow(dead_code)]

mod close_reason;
mod room_code;

pub use close_reason::CloseReason;
pub use room_code::RoomCode;

// ============================================================================
// TRAITS
// ============================================================================

/// Random instance generation for testing.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over `uuid::Uuid`.
///
/// Used for entities that need a stable, connection-spanning identity
/// (currently: participants). `RoomCode` is deliberately *not* an `ID<T>` —
/// it is a short human-transcribable code, not a UUID.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }

    /// Cast `ID<T>` to `ID<U>` while preserving the underlying UUID.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

/// Marker type for participant identity (`ID<Participant>`). Never
/// constructed; only used as the generic parameter of [`ID`].
pub struct Participant;

/// Stable identity assigned to a connection at join time. Survives for the
/// life of that connection; a reconnect gets a fresh one (§6: "server
/// treats reconnection as fresh join").
pub type ParticipantId = ID<Participant>;

/// The role a connection was accepted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Host,
    Controller,
    Spectator,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Host => write!(f, "host"),
            Role::Controller => write!(f, "controller"),
            Role::Spectator => write!(f, "spectator"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(Role::Host),
            "controller" => Ok(Role::Controller),
            "spectator" => Ok(Role::Spectator),
            _ => Err("unrecognized role"),
        }
    }
}

// ============================================================================
// CONSTANTS
// ============================================================================
use std::time::Duration;

/// Heartbeat ping interval per connection (§4.8).
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
/// Consecutive missed pongs before a connection is closed with `HeartbeatLost`.
pub const HEARTBEAT_MISS_LIMIT: u32 = 2;
/// Depth of the per-connection outbound write queue (§4.8).
pub const WRITE_QUEUE_DEPTH: usize = 64;
/// Reaction Coalescer tumbling window (§4.6).
pub const COALESCER_WINDOW: Duration = Duration::from_millis(100);
/// Default Board Generator soft time budget (§4.7, §5), overridable via
/// `BOARD_GEN_TIME_BUDGET_MS`.
pub const BOARD_GEN_TIME_BUDGET: Duration = Duration::from_secs(60);
/// Optional grace window for Host reconnection (§5, §9) — not enabled by
/// default; see DESIGN.md's Open Question resolution.
pub const HOST_RECONNECT_GRACE: Duration = Duration::from_secs(5);

/// Seeds are drawn uniformly from `[0, SEED_BOUND)` (§4.1).
pub const SEED_BOUND: i64 = 1 << 31;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================

/// Initialize dual logging (terminal + file) with a timestamped log file.
/// Creates a `logs/` directory; writes DEBUG to file, INFO to terminal.
pub fn init_logging() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves forward")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Global interrupt flag, set once Ctrl+C is observed.
static INTERRUPTED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// True once a Ctrl+C has been observed by [`install_interrupt_handler`].
pub fn interrupted() -> bool {
    INTERRUPTED.load(std::sync::atomic::Ordering::Relaxed)
}

/// Register a Ctrl+C handler that flips [`interrupted`] and logs once.
/// Unlike a hard `process::exit`, this lets `actix-web`'s own shutdown
/// machinery drain in-flight connections.
pub fn install_interrupt_handler() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupt received, shutting down");
            INTERRUPTED.store(true, std::sync::atomic::Ordering::Relaxed);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Thing;

    #[test]
    fn id_round_trips_through_uuid() {
        let id: ID<Thing> = ID::default();
        let raw: uuid::Uuid = id.into();
        let back: ID<Thing> = raw.into();
        assert_eq!(id, back);
    }

    #[test]
    fn role_parses_known_values_only() {
        assert_eq!("host".parse::<Role>(), Ok(Role::Host));
        assert_eq!("controller".parse::<Role>(), Ok(Role::Controller));
        assert_eq!("spectator".parse::<Role>(), Ok(Role::Spectator));
        assert!("referee".parse::<Role>().is_err());
    }
}
