use crate::domain::model::Modality;
use crate::utils::error::{OrderError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    pub script: ScriptInfo,
    pub logging: Option<LoggingConfig>,
    pub error_handling: Option<ErrorHandlingConfig>,
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    pub on_error: Option<String>, // "stop" or "continue"
}

/// 腳本中的一個步驟。`order` 可以是 UUID，也可以是先前 create 步驟的 alias
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum StepDefinition {
    Create {
        client_id: String,
        modality: String,
        weight: Decimal,
        distance: Decimal,
        fixed_fee: Decimal,
        alias: Option<String>,
    },
    Update {
        order: String,
        modality: String,
        weight: Decimal,
        distance: Decimal,
        fixed_fee: Decimal,
    },
    Get {
        order: String,
    },
    List,
    Delete {
        order: String,
    },
    Quote {
        modality: String,
        weight: Decimal,
        distance: Decimal,
        fixed_fee: Decimal,
    },
}

impl StepDefinition {
    pub fn action(&self) -> &'static str {
        match self {
            StepDefinition::Create { .. } => "create",
            StepDefinition::Update { .. } => "update",
            StepDefinition::Get { .. } => "get",
            StepDefinition::List => "list",
            StepDefinition::Delete { .. } => "delete",
            StepDefinition::Quote { .. } => "quote",
        }
    }

    fn modality(&self) -> Option<&str> {
        match self {
            StepDefinition::Create { modality, .. }
            | StepDefinition::Update { modality, .. }
            | StepDefinition::Quote { modality, .. } => Some(modality.as_str()),
            _ => None,
        }
    }

    fn order_reference(&self) -> Option<&str> {
        match self {
            StepDefinition::Update { order, .. }
            | StepDefinition::Get { order }
            | StepDefinition::Delete { order } => Some(order.as_str()),
            _ => None,
        }
    }

    /// 給 dry run 顯示的單行描述
    pub fn describe(&self) -> String {
        match self {
            StepDefinition::Create {
                client_id,
                modality,
                weight,
                distance,
                fixed_fee,
                alias,
            } => format!(
                "create {} order for client {} (weight={}, distance={}, fixed_fee={}){}",
                modality,
                client_id,
                weight,
                distance,
                fixed_fee,
                alias
                    .as_ref()
                    .map(|a| format!(" as '{}'", a))
                    .unwrap_or_default()
            ),
            StepDefinition::Update {
                order,
                modality,
                weight,
                distance,
                fixed_fee,
            } => format!(
                "update order {} to {} (weight={}, distance={}, fixed_fee={})",
                order, modality, weight, distance, fixed_fee
            ),
            StepDefinition::Get { order } => format!("get order {}", order),
            StepDefinition::List => "list all orders".to_string(),
            StepDefinition::Delete { order } => format!("delete order {}", order),
            StepDefinition::Quote {
                modality,
                weight,
                distance,
                fixed_fee,
            } => format!(
                "quote {} freight (weight={}, distance={}, fixed_fee={})",
                modality, weight, distance, fixed_fee
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnError {
    Stop,
    Continue,
}

impl ScriptConfig {
    /// 從 TOML 檔案載入腳本
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(OrderError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析腳本
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| OrderError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CLIENT_ID})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| OrderError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn on_error(&self) -> Result<OnError> {
        let value = self
            .error_handling
            .as_ref()
            .and_then(|e| e.on_error.as_deref())
            .unwrap_or("stop");

        match value {
            "stop" => Ok(OnError::Stop),
            "continue" => Ok(OnError::Continue),
            other => Err(OrderError::ConfigValidationError {
                field: "error_handling.on_error".to_string(),
                message: format!("Unsupported value '{}'. Valid values: stop, continue", other),
            }),
        }
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// 驗證腳本的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("script.name", &self.script.name)?;
        self.on_error()?;

        let mut aliases: HashSet<&str> = HashSet::new();

        for (index, step) in self.steps.iter().enumerate() {
            let field = format!("steps[{}]", index + 1);

            if let Some(modality) = step.modality() {
                modality.parse::<Modality>()?;
            }

            if let Some(reference) = step.order_reference() {
                if Uuid::parse_str(reference).is_err() && !aliases.contains(reference) {
                    return Err(OrderError::ConfigValidationError {
                        field: format!("{}.order", field),
                        message: format!(
                            "'{}' is neither an order id nor an alias defined by an earlier step",
                            reference
                        ),
                    });
                }
            }

            if let StepDefinition::Create {
                alias: Some(alias), ..
            } = step
            {
                validate_non_empty_string(&format!("{}.alias", field), alias)?;
                if !aliases.insert(alias.as_str()) {
                    return Err(OrderError::ConfigValidationError {
                        field: format!("{}.alias", field),
                        message: format!("Alias '{}' is already defined", alias),
                    });
                }
            }
        }

        Ok(())
    }
}

impl Validate for ScriptConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
