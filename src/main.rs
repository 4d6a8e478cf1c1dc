use clap::Parser;
use schedule_etl::utils::{logger, validation::Validate};
use schedule_etl::{CliConfig, EtlEngine, LocalStorage, SchedulePipeline, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting schedule-etl CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // input and output paths resolve against the working directory
    let storage = LocalStorage::new(".".to_string());

    let result = match &config.config {
        Some(config_path) => {
            tracing::info!("📁 Loading configuration from: {}", config_path);
            let toml_config = match TomlConfig::from_file(config_path) {
                Ok(toml_config) => toml_config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", config_path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };

            if let Err(e) = toml_config.validate() {
                tracing::error!("❌ Configuration validation failed: {}", e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(1);
            }

            tracing::info!(
                "Running pipeline '{}' ({})",
                toml_config.pipeline.name,
                toml_config.pipeline.version
            );

            let monitor = monitor_enabled || toml_config.monitoring_enabled();
            let pipeline = SchedulePipeline::new(storage, toml_config);
            EtlEngine::new_with_monitoring(pipeline, monitor).run().await
        }
        None => {
            let pipeline = SchedulePipeline::new(storage, config.clone());
            EtlEngine::new_with_monitoring(pipeline, monitor_enabled)
                .run()
                .await
        }
    };

    match result {
        Ok(output_path) => {
            tracing::info!("✅ Schedule ETL completed successfully!");
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("✅ Schedule ETL completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Schedule ETL failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                schedule_etl::utils::error::ErrorSeverity::Low => 0,
                schedule_etl::utils::error::ErrorSeverity::Medium => 2,
                schedule_etl::utils::error::ErrorSeverity::High => 1,
                schedule_etl::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
