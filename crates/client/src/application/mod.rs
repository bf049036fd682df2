pub mod config;
pub mod inventory_service;
pub mod purchase_service;

pub use config::{ClientConfig, InventoryConfig, PurchaseConfig};
pub use inventory_service::{FetchCycle, InventoryService};
pub use purchase_service::{PURCHASE_FAILED_NOTICE, PurchaseService};
