// Application layer: serializable projections exchanged with whatever transport drives the core.

pub mod dto;

pub use dto::{CreateOrderRequest, ErrorResponse, OrderResponse, UpdateOrderRequest};
