//! Domain models for the Stock Control System

mod category;
mod movement;
mod product;
mod report;
mod supplier;

pub use category::*;
pub use movement::*;
pub use product::*;
pub use report::*;
pub use supplier::*;
