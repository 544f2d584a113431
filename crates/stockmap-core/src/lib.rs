pub mod app_config;
pub mod competitiveness;
pub mod config;
pub mod format;
pub mod model;

pub use app_config::{AppConfig, Environment};
pub use competitiveness::{classify, CompetitivenessTier};
pub use config::{load_app_config, load_app_config_from_env};
pub use model::{Coordinates, Historic, InventoryResponse, Product, StockStatus, Warehouse};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
