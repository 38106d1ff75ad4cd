// handlers/mod.rs - HTTP handlers
//
// One file per route under problems/, plus the health check and the
// fallbacks shared by every route.
pub mod fallback;
pub mod health;
pub mod problems;

pub use fallback::{method_not_allowed, not_found};
pub use health::healthcheck;
