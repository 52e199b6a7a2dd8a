use anyhow::Context;
use clap::Parser;
use mip_calc::config::{CliConfig, Command};
use mip_calc::core::leaderboard;
use mip_calc::core::view::RenderedView;
use mip_calc::utils::error::{CalcError, ErrorSeverity};
use mip_calc::utils::{logger, validation::Validate};
use mip_calc::{Calculator, StandardFormula, ViewState};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.log_format, config.verbose);

    tracing::info!("🚀 Starting mip-calc");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(&config) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => std::process::exit(report_error(&e)),
    }
}

fn run(config: &CliConfig) -> anyhow::Result<i32> {
    // 驗證配置
    config.validate()?;
    let (file_config, rules) = config.load_rules()?;

    if let Some(name) = file_config.name() {
        tracing::info!("📋 Calculator: {}", name);
    }
    tracing::info!(
        "✅ Using '{}' rules (index {} to {})",
        rules.variant,
        rules.min_index,
        rules.max_index
    );

    let calculator = Calculator::new(StandardFormula, rules);

    let state = match &config.command {
        Command::Improve { start, end } => {
            calculator.submit_improvement(start.as_deref(), end.as_deref())
        }
        Command::Target { start, best_factor } => {
            calculator.submit_target(start.as_deref(), best_factor.as_deref())
        }
        Command::Form => ViewState::Idle,
        Command::Leaderboard { input, output } => {
            let rows = leaderboard::read_rows_from_path(input)
                .with_context(|| format!("Failed to read players from '{}'", input))?;
            let board = leaderboard::build_leaderboard(&calculator, &rows);

            if config.json {
                println!("{}", serde_json::to_string_pretty(&board)?);
            } else {
                print!("{}", board);
            }

            if let Some(output) = output {
                leaderboard::write_csv_to_path(output, &board)
                    .with_context(|| format!("Failed to write standings to '{}'", output))?;
                tracing::info!("📁 Standings saved to: {}", output);
                println!("📁 Standings saved to: {}", output);
            }
            return Ok(0);
        }
    };

    emit(&calculator.render(&state), config.json)?;

    // 表單被拒絕時以可重試的錯誤碼結束
    Ok(if state.is_rejected() { 2 } else { 0 })
}

fn emit(view: &RenderedView, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{}", view);
    }
    Ok(())
}

fn report_error(error: &anyhow::Error) -> i32 {
    let Some(e) = error.downcast_ref::<CalcError>() else {
        tracing::error!("❌ mip-calc failed: {:#}", error);
        eprintln!("❌ {:#}", error);
        return 1;
    };

    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ mip-calc failed: {:#} (Category: {:?}, Severity: {:?})",
        error,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
