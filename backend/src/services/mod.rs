//! Business logic services for the Stock Control System

pub mod catalog;
pub mod movement;
pub mod product;
pub mod report;

pub use catalog::CatalogService;
pub use movement::MovementService;
pub use product::ProductService;
pub use report::ReportService;
