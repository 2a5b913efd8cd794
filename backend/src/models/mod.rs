//! Database models for the Stock Control System
//!
//! Re-exports the plain domain models from the shared crate; services map
//! their storage rows into these before anything leaves the ledger.

pub use shared::models::*;
