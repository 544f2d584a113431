pub mod client;
pub mod error;

pub use client::InventoryClient;
pub use error::InventoryError;
