//! The process-wide room registry, per-connection pumps, and HTTP/WS
//! handlers that turn `tabula-gameroom` and `tabula-boardgen` into a
//! runnable service (§4.8, §5, §6, SPEC_FULL §10.1).
//!
//! - [`Casino`] — room registry (§5); owns room creation/destruction
//! - [`connection::run`] — per-connection read/write pumps, heartbeat
//!   (§4.8)
//! - [`handlers`] — `GET /ws/{roomId}`, `POST /generate` (§6)
//! - [`Server`] — actix-web bootstrap

mod casino;
mod config;
mod connection;
pub mod handlers;
mod server;

pub use casino::{Casino, HostJoinError};
pub use config::{bind_addr, board_gen_time_budget};
pub use server::Server;
