use crate::core::menu::parse_menu;
use crate::core::{ConfigProvider, MenuEntry, MenuSource};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads the menu JSON from a file on disk.
#[derive(Debug, Clone)]
pub struct FileMenuSource {
    path: PathBuf,
}

impl FileMenuSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.menu_path())
    }
}

#[async_trait]
impl MenuSource for FileMenuSource {
    async fn load_menu(&self) -> Result<Vec<MenuEntry>> {
        tracing::debug!("Reading menu from: {}", self.path.display());
        let raw = tokio::fs::read_to_string(&self.path).await?;
        parse_menu(&raw)
    }
}
