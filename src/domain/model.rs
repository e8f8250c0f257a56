use crate::utils::error::{OrderError, Result};
use crate::utils::validation::{
    validate_decimal_at_most, validate_non_empty_id, validate_non_negative_decimal,
    validate_positive_decimal,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 運送模式：封閉集合，未知值一律為 `InvalidModality`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Normal,
    Express,
    Scheduled,
}

impl Modality {
    pub const ALL: [Modality; 3] = [Modality::Normal, Modality::Express, Modality::Scheduled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Normal => "normal",
            Modality::Express => "express",
            Modality::Scheduled => "scheduled",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Modality::Normal => 0,
            Modality::Express => 1,
            Modality::Scheduled => 2,
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modality {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "0" => Ok(Modality::Normal),
            "express" | "expressa" | "1" => Ok(Modality::Express),
            "scheduled" | "agendada" | "2" => Ok(Modality::Scheduled),
            _ => Err(OrderError::invalid_modality(s)),
        }
    }
}

impl TryFrom<i32> for Modality {
    type Error = OrderError;

    fn try_from(code: i32) -> Result<Self> {
        Modality::ALL
            .into_iter()
            .find(|modality| modality.code() == code)
            .ok_or_else(|| OrderError::invalid_modality(code))
    }
}

/// 每個計價參數的上限 (10^27)。三項都在上限內時，最貴的公式
/// 0.5·w + 1.0·d + f 最多 2.5·10^27，遠低於 `Decimal::MAX`，計價不會溢位
pub const MAX_FREIGHT_MAGNITUDE: Decimal = dec!(1000000000000000000000000000);

/// 計價參數：重量、距離、固定費用，建構時即驗證
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreightParameters {
    weight: Decimal,
    distance: Decimal,
    fixed_fee: Decimal,
}

impl FreightParameters {
    pub fn new(weight: Decimal, distance: Decimal, fixed_fee: Decimal) -> Result<Self> {
        validate_positive_decimal("weight", weight)?;
        validate_positive_decimal("distance", distance)?;
        validate_non_negative_decimal("fixed_fee", fixed_fee)?;
        validate_decimal_at_most("weight", weight, MAX_FREIGHT_MAGNITUDE)?;
        validate_decimal_at_most("distance", distance, MAX_FREIGHT_MAGNITUDE)?;
        validate_decimal_at_most("fixed_fee", fixed_fee, MAX_FREIGHT_MAGNITUDE)?;

        Ok(Self {
            weight,
            distance,
            fixed_fee,
        })
    }

    pub fn weight(&self) -> Decimal {
        self.weight
    }

    pub fn distance(&self) -> Decimal {
        self.distance
    }

    pub fn fixed_fee(&self) -> Decimal {
        self.fixed_fee
    }
}

/// 已儲存的訂單。所有變更都回傳新值，不會就地修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: Uuid,
    client_id: Uuid,
    modality: Modality,
    shipping_cost: Decimal,
}

impl Order {
    pub fn new(
        id: Uuid,
        client_id: Uuid,
        shipping_cost: Decimal,
        modality: Modality,
    ) -> Result<Self> {
        validate_non_empty_id("id", &id)?;
        validate_non_empty_id("client_id", &client_id)?;
        ensure_non_negative_cost(shipping_cost)?;

        Ok(Self {
            id,
            client_id,
            modality,
            shipping_cost,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn client_id(&self) -> Uuid {
        self.client_id
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn shipping_cost(&self) -> Decimal {
        self.shipping_cost
    }

    pub fn with_shipping_cost(&self, shipping_cost: Decimal) -> Result<Self> {
        ensure_non_negative_cost(shipping_cost)?;
        Ok(Self {
            shipping_cost,
            ..self.clone()
        })
    }

    pub fn with_modality(&self, modality: Modality) -> Self {
        Self {
            modality,
            ..self.clone()
        }
    }
}

fn ensure_non_negative_cost(shipping_cost: Decimal) -> Result<()> {
    if shipping_cost < Decimal::ZERO {
        return Err(OrderError::invalid_argument(
            "shipping_cost",
            "shipping_cost cannot be negative",
        ));
    }
    Ok(())
}
