pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::{CalculatorRules, TomlConfig, Variant};
pub use core::{calculator::Calculator, formula::StandardFormula, view::ViewState};
pub use utils::error::{CalcError, Result};
