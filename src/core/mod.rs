pub mod script;
pub mod service;
pub mod strategy;

pub use crate::domain::model::{FreightParameters, Modality, Order};
pub use crate::domain::ports::{FreightStrategy, OrderRepository};
pub use crate::utils::error::Result;
