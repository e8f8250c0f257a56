pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::memory::InMemoryOrderRepository;
pub use config::script_config::ScriptConfig;
pub use self::core::{script::ScriptRunner, service::OrderService, strategy::StrategyResolver};
pub use domain::model::{FreightParameters, Modality, Order};
pub use utils::error::{OrderError, Result};
