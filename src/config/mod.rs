#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::{HttpAdSource, OutputFormat, ScriptedAdSource};
use crate::core::feed::MenuErrorPolicy;
use crate::core::{AdSource, ConfigProvider};
use crate::domain::model::DEFAULT_NUMBER_OF_ADS;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_path, validate_range, validate_required_field, validate_url, Validate,
};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_MENU_PATH: &str = "menu_items.json";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const MAX_NUMBER_OF_ADS: usize = 100;

/// Fully resolved settings for one feed run.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSettings {
    pub menu_path: String,
    pub ad_endpoint: Option<String>,
    pub number_of_ads: usize,
    pub timeout_seconds: u64,
    pub format: OutputFormat,
    pub pretty: bool,
    pub on_menu_error: MenuErrorPolicy,
    pub demo: bool,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            menu_path: DEFAULT_MENU_PATH.to_string(),
            ad_endpoint: None,
            number_of_ads: DEFAULT_NUMBER_OF_ADS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            format: OutputFormat::default(),
            pretty: false,
            on_menu_error: MenuErrorPolicy::default(),
            demo: false,
        }
    }
}

impl FeedSettings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            menu_path: config.menu.path.clone().unwrap_or(defaults.menu_path),
            ad_endpoint: config.ads.endpoint.clone(),
            number_of_ads: config.ads.number_of_ads.unwrap_or(defaults.number_of_ads),
            timeout_seconds: config.ads.timeout_seconds.unwrap_or(defaults.timeout_seconds),
            format: config.output.format.unwrap_or(defaults.format),
            pretty: config.output.pretty.unwrap_or(defaults.pretty),
            on_menu_error: config
                .error_handling
                .on_menu_error
                .unwrap_or(defaults.on_menu_error),
            demo: false,
        }
    }

    /// Picks the ad source these settings describe. A zero quota with no
    /// endpoint gets a source that is never asked for anything.
    pub fn build_ad_source(&self) -> Result<Box<dyn AdSource>> {
        if self.demo {
            tracing::info!("Demo mode: serving built-in sample ads");
            return Ok(Box::new(ScriptedAdSource::pattern(vec![true, true, false])));
        }
        if self.number_of_ads == 0 && self.ad_endpoint.is_none() {
            tracing::debug!("No ads requested and no endpoint configured");
            return Ok(Box::new(ScriptedAdSource::always_fail()));
        }
        let timeout = Duration::from_secs(self.timeout_seconds);
        Ok(Box::new(HttpAdSource::from_config(self, timeout)?))
    }
}

impl Validate for FeedSettings {
    fn validate(&self) -> Result<()> {
        validate_path("menu.path", &self.menu_path)?;
        validate_range("ads.number_of_ads", self.number_of_ads, 0, MAX_NUMBER_OF_ADS)?;
        validate_range("ads.timeout_seconds", self.timeout_seconds, 1, 300)?;

        if !self.demo && self.number_of_ads > 0 {
            let endpoint = validate_required_field("ads.endpoint", &self.ad_endpoint)?;
            validate_url("ads.endpoint", endpoint)?;
        } else if let Some(endpoint) = &self.ad_endpoint {
            validate_url("ads.endpoint", endpoint)?;
        }

        Ok(())
    }
}

impl ConfigProvider for FeedSettings {
    fn menu_path(&self) -> &str {
        &self.menu_path
    }

    fn ad_endpoint(&self) -> Option<&str> {
        self.ad_endpoint.as_deref()
    }

    fn number_of_ads(&self) -> usize {
        self.number_of_ads
    }
}
