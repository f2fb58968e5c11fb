use clap::Parser;
use precio_luz::adapters::{holidays_from_config, notifier_from_config, state_from_config};
use precio_luz::utils::{logger, validation::Validate};
use precio_luz::{
    CliConfig, LogFormat, NotificationService, PeriodCalculator, PrecioLuzError, Settings,
    TomlConfig,
};

fn exit_with(e: &PrecioLuzError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let file = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let settings = Settings::from_env(file.clone(), cli.overrides());

    match settings.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::debug!("Starting precio-luz");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
        if let Ok(summary) = serde_json::to_string(&settings) {
            tracing::debug!("Effective settings: {}", summary);
        }
    }

    let validated = file
        .as_ref()
        .map(|f| f.validate())
        .unwrap_or(Ok(()))
        .and_then(|_| settings.validate());
    if let Err(e) = validated {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let notifier = match notifier_from_config(&settings) {
        Ok(notifier) => notifier,
        Err(e) => exit_with(&e),
    };
    let service = NotificationService::new(
        PeriodCalculator::new(holidays_from_config(&settings)),
        notifier,
        state_from_config(&settings),
    )
    .dry_run(!settings.notifications_enabled);

    let now = cli
        .at
        .unwrap_or_else(|| chrono::Local::now().naive_local());

    match service.run(now).await {
        Ok(outcome) => {
            tracing::debug!(
                "period={:?} reason={:?} changed={} notified={}",
                outcome.report.period,
                outcome.report.reason,
                outcome.changed,
                outcome.notified
            );
        }
        Err(e) => exit_with(&e),
    }
}
