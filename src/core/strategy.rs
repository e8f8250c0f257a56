use crate::domain::model::{FreightParameters, Modality};
use crate::domain::ports::FreightStrategy;
use crate::utils::error::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const WEIGHT_RATE: Decimal = dec!(0.5);

fn linear_cost(params: &FreightParameters, distance_rate: Decimal) -> Decimal {
    params.weight() * WEIGHT_RATE + params.distance() * distance_rate + params.fixed_fee()
}

/// 0.5·重量 + 0.1·距離 + 固定費用
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalStrategy;

impl FreightStrategy for NormalStrategy {
    fn calculate(&self, params: &FreightParameters) -> Decimal {
        linear_cost(params, dec!(0.1))
    }
}

/// 0.5·重量 + 1.0·距離 + 固定費用
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressStrategy;

impl FreightStrategy for ExpressStrategy {
    fn calculate(&self, params: &FreightParameters) -> Decimal {
        linear_cost(params, dec!(1.0))
    }
}

/// 0.5·重量 + 0.5·距離 + 固定費用
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduledStrategy;

impl FreightStrategy for ScheduledStrategy {
    fn calculate(&self, params: &FreightParameters) -> Decimal {
        linear_cost(params, dec!(0.5))
    }
}

static NORMAL: NormalStrategy = NormalStrategy;
static EXPRESS: ExpressStrategy = ExpressStrategy;
static SCHEDULED: ScheduledStrategy = ScheduledStrategy;

#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyResolver;

impl StrategyResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, modality: Modality) -> &'static dyn FreightStrategy {
        tracing::debug!("Resolving freight strategy for modality {}", modality);
        match modality {
            Modality::Normal => &NORMAL,
            Modality::Express => &EXPRESS,
            Modality::Scheduled => &SCHEDULED,
        }
    }

    /// 從外部輸入 (名稱) 解析，未知值回傳 `InvalidModality`
    pub fn resolve_name(&self, raw: &str) -> Result<&'static dyn FreightStrategy> {
        Ok(self.resolve(raw.parse()?))
    }

    pub fn resolve_code(&self, code: i32) -> Result<&'static dyn FreightStrategy> {
        Ok(self.resolve(Modality::try_from(code)?))
    }
}
