use crate::app::dto::{ErrorResponse, OrderResponse};
use crate::config::script_config::{OnError, ScriptConfig, StepDefinition};
use crate::core::service::OrderService;
use crate::domain::model::Modality;
use crate::domain::ports::OrderRepository;
use crate::utils::error::{OrderError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// 單一步驟的結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StepResult {
    Order(OrderResponse),
    Orders(Vec<OrderResponse>),
    Absent,
    Deleted,
    Cost(Decimal),
    Failed(ErrorResponse),
}

#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub step: usize,
    pub action: &'static str,
    pub result: StepResult,
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self.result, StepResult::Failed(_))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScriptReport {
    pub name: String,
    pub executed_at: DateTime<Utc>,
    pub succeeded: usize,
    pub failed: usize,
    pub stored_orders: usize,
    pub steps: Vec<StepOutcome>,
}

impl ScriptReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// 依序對同一個 [`OrderService`] 執行腳本步驟
pub struct ScriptRunner<R: OrderRepository> {
    service: OrderService<R>,
    on_error_override: Option<OnError>,
}

impl<R: OrderRepository> ScriptRunner<R> {
    pub fn new(service: OrderService<R>) -> Self {
        Self {
            service,
            on_error_override: None,
        }
    }

    pub fn with_on_error(mut self, on_error: OnError) -> Self {
        self.on_error_override = Some(on_error);
        self
    }

    pub fn service(&self) -> &OrderService<R> {
        &self.service
    }

    /// dry run：只列出每個步驟要做的事
    pub fn plan(config: &ScriptConfig) -> Vec<String> {
        config
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| format!("{:>3}. {}", index + 1, step.describe()))
            .collect()
    }

    pub fn run(&self, config: &ScriptConfig) -> Result<ScriptReport> {
        let on_error = match self.on_error_override {
            Some(policy) => policy,
            None => config.on_error()?,
        };

        tracing::info!(
            "Running script '{}' with {} step(s)",
            config.script.name,
            config.steps.len()
        );

        let mut aliases: HashMap<String, Uuid> = HashMap::new();
        let mut outcomes = Vec::with_capacity(config.steps.len());

        for (index, step) in config.steps.iter().enumerate() {
            let number = index + 1;
            tracing::debug!("Step {}: {}", number, step.describe());

            let result = match self.execute_step(step, &mut aliases) {
                Ok(result) => result,
                Err(e) if on_error == OnError::Continue => {
                    tracing::warn!("Step {} ({}) failed: {}", number, step.action(), e);
                    StepResult::Failed(ErrorResponse::from(&e))
                }
                Err(e) => {
                    tracing::error!("Step {} ({}) failed, stopping: {}", number, step.action(), e);
                    return Err(OrderError::ScriptError {
                        step: number,
                        source: Box::new(e),
                    });
                }
            };

            outcomes.push(StepOutcome {
                step: number,
                action: step.action(),
                result,
            });
        }

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        let report = ScriptReport {
            name: config.script.name.clone(),
            executed_at: Utc::now(),
            succeeded,
            failed: outcomes.len() - succeeded,
            stored_orders: self.service.get_all().len(),
            steps: outcomes,
        };

        tracing::info!(
            "Script '{}' finished: {} succeeded, {} failed, {} order(s) stored",
            report.name,
            report.succeeded,
            report.failed,
            report.stored_orders
        );
        Ok(report)
    }

    fn execute_step(
        &self,
        step: &StepDefinition,
        aliases: &mut HashMap<String, Uuid>,
    ) -> Result<StepResult> {
        match step {
            StepDefinition::Create {
                client_id,
                modality,
                weight,
                distance,
                fixed_fee,
                alias,
            } => {
                let client_id = parse_client_id(client_id)?;
                let modality: Modality = modality.parse()?;
                let order = self
                    .service
                    .create(client_id, modality, *weight, *distance, *fixed_fee)?;

                if let Some(alias) = alias {
                    aliases.insert(alias.clone(), order.id());
                }
                Ok(StepResult::Order(OrderResponse::from(&order)))
            }
            StepDefinition::Update {
                order,
                modality,
                weight,
                distance,
                fixed_fee,
            } => {
                let id = resolve_reference(order, aliases)?;
                let modality: Modality = modality.parse()?;
                let updated = self
                    .service
                    .update(id, modality, *weight, *distance, *fixed_fee)?;
                Ok(StepResult::Order(OrderResponse::from(&updated)))
            }
            StepDefinition::Get { order } => {
                let id = resolve_reference(order, aliases)?;
                Ok(match self.service.get_by_id(id)? {
                    Some(found) => StepResult::Order(OrderResponse::from(&found)),
                    None => StepResult::Absent,
                })
            }
            StepDefinition::List => Ok(StepResult::Orders(
                self.service
                    .get_all()
                    .iter()
                    .map(OrderResponse::from)
                    .collect(),
            )),
            StepDefinition::Delete { order } => {
                let id = resolve_reference(order, aliases)?;
                self.service.delete(id)?;
                Ok(StepResult::Deleted)
            }
            StepDefinition::Quote {
                modality,
                weight,
                distance,
                fixed_fee,
            } => {
                let modality: Modality = modality.parse()?;
                let cost = self
                    .service
                    .quote(modality, *weight, *distance, *fixed_fee)?;
                Ok(StepResult::Cost(cost))
            }
        }
    }
}

/// 空字串視為空 id，交由服務層回報 `InvalidArgument`
fn parse_client_id(raw: &str) -> Result<Uuid> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Uuid::nil());
    }
    Uuid::parse_str(raw).map_err(|e| {
        OrderError::invalid_argument("client_id", format!("'{}' is not a valid id: {}", raw, e))
    })
}

fn resolve_reference(reference: &str, aliases: &HashMap<String, Uuid>) -> Result<Uuid> {
    if let Some(id) = aliases.get(reference) {
        return Ok(*id);
    }
    Uuid::parse_str(reference.trim()).map_err(|_| {
        OrderError::invalid_argument(
            "order",
            format!("'{}' is neither an order id nor a known alias", reference),
        )
    })
}
