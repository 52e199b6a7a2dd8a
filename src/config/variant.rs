use crate::domain::ports::RuleProvider;
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{validate_finite_config, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two shipped rule sets of the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Indexes in [0, 54], shows percentage improvement.
    Classic,
    /// Indexes in [-10, 54], adds the target-to-win calculator.
    #[default]
    Extended,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Extended => "extended",
        }
    }

    pub fn rules(&self) -> CalculatorRules {
        match self {
            Variant::Classic => CalculatorRules {
                variant: *self,
                min_index: 0.0,
                max_index: 54.0,
                include_percentage: true,
                supports_target_solve: false,
                min_best_factor: 1.0,
            },
            Variant::Extended => CalculatorRules {
                variant: *self,
                min_index: -10.0,
                max_index: 54.0,
                include_percentage: false,
                supports_target_solve: true,
                min_best_factor: 1.0,
            },
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business rules selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculatorRules {
    pub variant: Variant,
    pub min_index: f64,
    pub max_index: f64,
    pub include_percentage: bool,
    pub supports_target_solve: bool,
    pub min_best_factor: f64,
}

impl Default for CalculatorRules {
    fn default() -> Self {
        Variant::default().rules()
    }
}

impl RuleProvider for CalculatorRules {
    fn variant_name(&self) -> &str {
        self.variant.as_str()
    }

    fn min_index(&self) -> f64 {
        self.min_index
    }

    fn max_index(&self) -> f64 {
        self.max_index
    }

    fn include_percentage(&self) -> bool {
        self.include_percentage
    }

    fn supports_target_solve(&self) -> bool {
        self.supports_target_solve
    }

    fn min_best_factor(&self) -> f64 {
        self.min_best_factor
    }
}

impl Validate for CalculatorRules {
    fn validate(&self) -> Result<()> {
        validate_finite_config("rules.min_index", self.min_index)?;
        validate_finite_config("rules.max_index", self.max_index)?;
        validate_finite_config("rules.min_best_factor", self.min_best_factor)?;

        if self.min_index > self.max_index {
            return Err(CalcError::InvalidConfigValueError {
                field: "rules.min_index".to_string(),
                value: self.min_index.to_string(),
                reason: format!("Must not exceed rules.max_index ({})", self.max_index),
            });
        }

        if self.min_index <= -12.0 {
            tracing::warn!(
                "⚠️ rules.min_index {} allows an ending index of -12; such inputs will be rejected as non-finite",
                self.min_index
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let classic = Variant::Classic.rules();
        assert_eq!(classic.min_index, 0.0);
        assert!(classic.include_percentage);
        assert!(!classic.supports_target_solve);

        let extended = Variant::Extended.rules();
        assert_eq!(extended.min_index, -10.0);
        assert_eq!(extended.max_index, 54.0);
        assert!(!extended.include_percentage);
        assert!(extended.supports_target_solve);
    }

    #[test]
    fn test_rules_validation() {
        assert!(Variant::Classic.rules().validate().is_ok());

        let mut rules = Variant::Extended.rules();
        rules.min_index = 60.0;
        assert!(rules.validate().is_err());

        rules.min_index = f64::NAN;
        assert!(rules.validate().is_err());
    }
}
