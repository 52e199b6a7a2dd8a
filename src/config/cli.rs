use crate::config::toml_config::TomlConfig;
use crate::config::variant::{CalculatorRules, Variant};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
pub use crate::utils::logger::LogFormat;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "mip-calc")]
#[command(about = "Most improved player calculator: improvement factor and target to win")]
pub struct CliConfig {
    /// Rule set to use; overrides the variant in the config file
    #[arg(long, value_enum, global = true)]
    pub variant: Option<Variant>,

    /// Path to a TOML rules file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Print the rendered view as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Calculate the improvement factor from two handicap indexes
    Improve {
        #[arg(long, allow_hyphen_values = true)]
        start: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        end: Option<String>,
    },
    /// Calculate the ending index needed to beat a given factor
    Target {
        #[arg(long, allow_hyphen_values = true)]
        start: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        best_factor: Option<String>,
    },
    /// Show the input form for the active variant
    Form,
    /// Rank players from a CSV of player,starting_index,ending_index
    Leaderboard {
        #[arg(short, long)]
        input: String,

        /// Write the standings to this CSV file
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl CliConfig {
    pub fn load_file_config(&self) -> Result<TomlConfig> {
        match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                TomlConfig::from_file(path)
            }
            None => Ok(TomlConfig::default()),
        }
    }

    /// 命令列的 --variant 優先於設定檔
    pub fn resolve_rules(&self, file_config: &TomlConfig) -> CalculatorRules {
        let variant = self.variant.unwrap_or_else(|| file_config.variant());
        file_config.rules_for(variant)
    }

    /// 載入並驗證設定檔，再解析出最終規則
    pub fn load_rules(&self) -> Result<(TomlConfig, CalculatorRules)> {
        let file_config = self.load_file_config()?;
        file_config.validate()?;

        let rules = self.resolve_rules(&file_config);
        rules.validate()?;
        Ok((file_config, rules))
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_non_empty_string("config", path)?;
        }
        if let Command::Leaderboard { input, output } = &self.command {
            validate_non_empty_string("input", input)?;
            if let Some(output) = output {
                validate_non_empty_string("output", output)?;
            }
        }
        Ok(())
    }
}
