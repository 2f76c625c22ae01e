//! Environment-variable configuration (SPEC_FULL §10.3). No config-file
//! parser, no new dependency — `std::env::var` the way the reference
//! workspace's hosting layer reads `BIND_ADDR`.

use std::time::Duration;

/// `BIND_ADDR`, default `127.0.0.1:8080`.
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string())
}

/// `BOARD_GEN_TIME_BUDGET_MS`, default [`tabula_core::BOARD_GEN_TIME_BUDGET`]
/// (60s), overridable for tests so a generator test doesn't wait a minute
/// to discover infeasibility.
pub fn board_gen_time_budget() -> Duration {
    match std::env::var("BOARD_GEN_TIME_BUDGET_MS") {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                log::warn!("BOARD_GEN_TIME_BUDGET_MS={raw:?} is not a valid integer, using default");
                tabula_core::BOARD_GEN_TIME_BUDGET
            }
        },
        Err(_) => tabula_core::BOARD_GEN_TIME_BUDGET,
    }
}
