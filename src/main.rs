use clap::Parser;
use freight_orders::config::{Command, OnError};
use freight_orders::utils::error::{ErrorSeverity, OrderError};
use freight_orders::utils::{logger, validation::Validate};
use freight_orders::{
    CliConfig, InMemoryOrderRepository, Modality, OrderService, ScriptConfig, ScriptRunner,
};
use std::path::Path;

fn main() {
    let config = CliConfig::parse();

    // 腳本可以在 [logging] 中要求詳細或 JSON 日誌，所以先載入
    let script = match &config.command {
        Command::Run { script, .. } => Some(ScriptConfig::from_file(script)),
        Command::Quote { .. } => None,
    };
    let (verbose, json_logs) = match &script {
        Some(Ok(loaded)) => (
            config.verbose || loaded.verbose_logging(),
            config.json_logs || loaded.json_logging(),
        ),
        _ => (config.verbose, config.json_logs),
    };

    // 初始化日誌
    if json_logs {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting freight-orders CLI");
    tracing::debug!("CLI config: {:?}", config);

    let outcome = config
        .validate()
        .and_then(|_| script.transpose())
        .and_then(|script| execute(&config, script));

    if let Err(e) = outcome {
        report_failure(&e);
    }
}

fn execute(config: &CliConfig, script: Option<ScriptConfig>) -> Result<(), OrderError> {
    let service = OrderService::new(InMemoryOrderRepository::new());

    match (&config.command, script) {
        (
            Command::Quote {
                modality,
                weight,
                distance,
                fixed_fee,
            },
            _,
        ) => {
            let modality: Modality = modality.parse()?;
            let cost = service.quote(modality, *weight, *distance, *fixed_fee)?;
            tracing::info!("Quoted {} freight: {}", modality, cost);
            println!("{}", cost);
            Ok(())
        }
        (
            Command::Run {
                script: path,
                dry_run,
                continue_on_error,
            },
            Some(script),
        ) => run_script(service, path, script, *dry_run, *continue_on_error),
        (Command::Run { script: path, .. }, None) => Err(OrderError::ConfigError {
            message: format!("Script '{}' was not loaded", path.display()),
        }),
    }
}

fn run_script(
    service: OrderService<InMemoryOrderRepository>,
    path: &Path,
    script: ScriptConfig,
    dry_run: bool,
    continue_on_error: bool,
) -> Result<(), OrderError> {
    tracing::info!("📁 Loaded script from: {}", path.display());

    // 驗證腳本
    script.validate()?;
    tracing::info!(
        "✅ Script '{}' validated ({} step(s))",
        script.script.name,
        script.steps.len()
    );

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - No orders will be stored");
        for line in ScriptRunner::<InMemoryOrderRepository>::plan(&script) {
            println!("{}", line);
        }
        return Ok(());
    }

    let mut runner = ScriptRunner::new(service);
    if continue_on_error {
        runner = runner.with_on_error(OnError::Continue);
        tracing::info!("🔧 on_error overridden to: continue");
    }

    let report = runner.run(&script)?;
    println!("{}", report.to_json()?);
    Ok(())
}

fn report_failure(e: &OrderError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Operation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
