//! DESPENSA Inventory — the snapshot engine.
//!
//! Creation captures the live catalog into an immutable "cierre";
//! comparison joins two stored cierres into a per-line delta view.

pub mod compute;
pub mod report;
pub mod service;

pub use report::LowStockLine;
pub use service::InventoryService;
