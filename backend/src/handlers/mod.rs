//! HTTP handlers for the Stock Control System

pub mod catalog;
pub mod health;
pub mod movement;
pub mod product;
pub mod report;

pub use catalog::*;
pub use health::*;
pub use movement::*;
pub use product::*;
pub use report::*;
