#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;
pub mod variant;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, LogFormat};
pub use toml_config::TomlConfig;
pub use variant::{CalculatorRules, Variant};
