use ad_feed::adapters::renderer_for;
use ad_feed::config::toml_config::TomlConfig;
use ad_feed::utils::error::ErrorSeverity;
use ad_feed::utils::{logger, validation::Validate};
use ad_feed::{CliConfig, FeedEngine, FileMenuSource};
use anyhow::Context;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting ad-feed");

    let file_config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            Some(
                TomlConfig::from_file(path)
                    .with_context(|| format!("failed to load config file '{}'", path))?,
            )
        }
        None => None,
    };

    let settings = cli.resolve(file_config.as_ref());
    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let ad_source = settings.build_ad_source()?;
    let engine = FeedEngine::new(
        FileMenuSource::from_config(&settings),
        ad_source,
        settings.number_of_ads,
        renderer_for(settings.format, settings.pretty),
    )
    .with_menu_error_policy(settings.on_menu_error);

    match engine.run().await {
        Ok(output) => {
            tracing::info!(
                "Feed ready: {} rows, {} of {} ad requests filled",
                output.display.len(),
                output.report.loaded,
                output.report.attempts
            );
            println!("{}", output.rendered.trim_end());
        }
        Err(e) => {
            tracing::error!("Feed build failed: {} (Severity: {:?})", e, e.severity());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Critical => 3,
                _ => 2,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
