use crate::adapters::OutputFormat;
use crate::config::toml_config::TomlConfig;
use crate::config::FeedSettings;
use crate::core::feed::MenuErrorPolicy;
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "ad-feed")]
#[command(about = "Builds a menu feed with native ads spread through it")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// JSON file with the menu items
    #[arg(long)]
    pub menu_path: Option<String>,

    /// Ad unit endpoint; one GET per ad
    #[arg(long)]
    pub ad_endpoint: Option<String>,

    /// How many ad requests to make
    #[arg(long)]
    pub number_of_ads: Option<usize>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    #[arg(long, value_enum)]
    pub on_menu_error: Option<MenuErrorPolicy>,

    /// Serve built-in sample ads instead of calling an endpoint
    #[arg(long)]
    pub demo: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Layers flags over the optional file config; flags win.
    pub fn resolve(&self, file: Option<&TomlConfig>) -> FeedSettings {
        let base = file.map(FeedSettings::from_toml).unwrap_or_default();
        FeedSettings {
            menu_path: self.menu_path.clone().unwrap_or(base.menu_path),
            ad_endpoint: self.ad_endpoint.clone().or(base.ad_endpoint),
            number_of_ads: self.number_of_ads.unwrap_or(base.number_of_ads),
            timeout_seconds: self.timeout_seconds.unwrap_or(base.timeout_seconds),
            format: self.format.unwrap_or(base.format),
            pretty: self.pretty || base.pretty,
            on_menu_error: self.on_menu_error.unwrap_or(base.on_menu_error),
            demo: self.demo,
        }
    }
}
