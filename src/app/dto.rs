use crate::domain::model::{Modality, Order};
use crate::utils::error::{OrderError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 建立訂單的請求。`modality` 保留原始字串，由 [`CreateOrderRequest::modality`] 解析
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub client_id: Uuid,
    pub modality: String,
    pub weight: Decimal,
    pub distance: Decimal,
    pub fixed_fee: Decimal,
}

impl CreateOrderRequest {
    pub fn modality(&self) -> Result<Modality> {
        self.modality.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub modality: String,
    pub weight: Decimal,
    pub distance: Decimal,
    pub fixed_fee: Decimal,
}

impl UpdateOrderRequest {
    pub fn modality(&self) -> Result<Modality> {
        self.modality.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub client_id: Uuid,
    pub modality: Modality,
    pub shipping_cost: Decimal,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id(),
            client_id: order.client_id(),
            modality: order.modality(),
            shipping_cost: order.shipping_cost(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, 404, None)
    }

    pub fn bad_request(message: impl Into<String>, details: Option<String>) -> Self {
        Self::new(message, 400, details)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(message, 409, None)
    }

    pub fn internal_error() -> Self {
        Self::new("An internal error occurred", 500, None)
    }

    fn new(message: impl Into<String>, status: u16, details: Option<String>) -> Self {
        Self {
            error: message.into(),
            status,
            details,
        }
    }
}

impl From<&OrderError> for ErrorResponse {
    fn from(error: &OrderError) -> Self {
        match error {
            OrderError::NotFound { .. } => Self::not_found(error.to_string()),
            OrderError::AlreadyExists { .. } => Self::conflict(error.to_string()),
            OrderError::InvalidArgument { field, message } => {
                Self::bad_request(message.clone(), Some(field.clone()))
            }
            OrderError::InvalidFreightParameters { field, reason, .. } => {
                Self::bad_request(reason.clone(), Some(field.clone()))
            }
            OrderError::InvalidModality { value } => {
                Self::bad_request(error.to_string(), Some(value.clone()))
            }
            OrderError::ScriptError { source, .. } => Self::from(source.as_ref()),
            _ => Self::internal_error(),
        }
    }
}
