use crate::config::variant::{CalculatorRules, Variant};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub calculator: CalculatorSection,
    pub rules: Option<RulesOverride>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculatorSection {
    pub name: Option<String>,
    pub variant: Option<Variant>,
}

/// Per-field overrides applied on top of the selected variant preset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesOverride {
    pub min_index: Option<f64>,
    pub max_index: Option<f64>,
    pub include_percentage: Option<bool>,
    pub supports_target_solve: Option<bool>,
    pub min_best_factor: Option<f64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CalcError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CalcError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MIP_MIN_INDEX})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CalcError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn variant(&self) -> Variant {
        self.calculator.variant.unwrap_or_default()
    }

    pub fn name(&self) -> Option<&str> {
        self.calculator.name.as_deref()
    }

    /// 以指定變體為基礎，套用 `[rules]` 覆寫
    pub fn rules_for(&self, variant: Variant) -> CalculatorRules {
        let mut rules = variant.rules();
        if let Some(overrides) = &self.rules {
            if let Some(min_index) = overrides.min_index {
                rules.min_index = min_index;
            }
            if let Some(max_index) = overrides.max_index {
                rules.max_index = max_index;
            }
            if let Some(include_percentage) = overrides.include_percentage {
                rules.include_percentage = include_percentage;
            }
            if let Some(supports_target_solve) = overrides.supports_target_solve {
                rules.supports_target_solve = supports_target_solve;
            }
            if let Some(min_best_factor) = overrides.min_best_factor {
                rules.min_best_factor = min_best_factor;
            }
        }
        rules
    }

    pub fn rules(&self) -> CalculatorRules {
        self.rules_for(self.variant())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(name) = &self.calculator.name {
            validate_non_empty_string("calculator.name", name)?;
        }
        self.rules().validate()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
