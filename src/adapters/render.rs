use crate::core::{DisplayItem, DisplayList, DisplayRenderer, MenuEntry, NativeAd};
use crate::domain::model::{AppInstallAd, ContentAd};
use crate::utils::error::{FeedError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
    pretty: bool,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl DisplayRenderer for JsonRenderer {
    fn render(&self, list: &DisplayList) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(list)?
        } else {
            serde_json::to_string(list)?
        };
        Ok(json)
    }
}

/// One line block per row; each item kind has its own template.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer;

impl TextRenderer {
    fn menu_row(out: &mut String, entry: &MenuEntry) -> std::fmt::Result {
        writeln!(out, "{}  {}", entry.name, entry.price)?;
        writeln!(out, "    {} | {}", entry.category, entry.description)
    }

    fn app_install_row(out: &mut String, ad: &AppInstallAd) -> std::fmt::Result {
        writeln!(out, "[Ad] {}", ad.headline)?;
        write!(out, "    {}", ad.body)?;
        if let Some(rating) = ad.star_rating {
            write!(out, " | {:.1} stars", rating)?;
        }
        if let Some(store) = &ad.store {
            write!(out, " | {}", store)?;
        }
        if let Some(price) = &ad.price {
            write!(out, " | {}", price)?;
        }
        writeln!(out, " | <{}>", ad.call_to_action)
    }

    fn content_row(out: &mut String, ad: &ContentAd) -> std::fmt::Result {
        writeln!(out, "[Ad] {}", ad.headline)?;
        write!(out, "    {}", ad.body)?;
        if let Some(advertiser) = &ad.advertiser {
            write!(out, " | by {}", advertiser)?;
        }
        writeln!(out, " | <{}>", ad.call_to_action)
    }
}

impl DisplayRenderer for TextRenderer {
    fn render(&self, list: &DisplayList) -> Result<String> {
        let mut out = String::new();
        for item in list {
            let written = match item {
                DisplayItem::Menu(entry) => Self::menu_row(&mut out, entry),
                DisplayItem::Ad(NativeAd::AppInstall(ad)) => Self::app_install_row(&mut out, ad),
                DisplayItem::Ad(NativeAd::Content(ad)) => Self::content_row(&mut out, ad),
            };
            written.map_err(|e| FeedError::RenderError {
                message: e.to_string(),
            })?;
        }
        Ok(out)
    }
}

pub fn renderer_for(format: OutputFormat, pretty: bool) -> Box<dyn DisplayRenderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer),
        OutputFormat::Json if pretty => Box::new(JsonRenderer::pretty()),
        OutputFormat::Json => Box::new(JsonRenderer::new()),
    }
}
