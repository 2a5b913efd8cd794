//! Shared types and business rules for the Stock Control System
//!
//! This crate contains the plain domain records and the derived stock rules
//! shared between the backend and any presentation or export collaborator.
//! Nothing in here depends on the storage layer.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
