pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{FileMenuSource, HttpAdSource, JsonRenderer, ScriptedAdSource, TextRenderer};
pub use config::FeedSettings;
pub use crate::core::{
    ad_loader::{AdLoadSequence, SequentialAdLoader},
    feed::{FeedEngine, MenuErrorPolicy},
    interleave::interleave,
    menu::parse_menu,
};
pub use domain::model::{DisplayItem, DisplayList, MenuEntry, NativeAd};
pub use utils::error::{FeedError, Result};
