use crate::core::ad_loader::{AdLoadReport, CancellationSignal, LoadOutcome, SequentialAdLoader};
use crate::core::interleave::interleave;
use crate::core::{AdSource, DisplayList, DisplayRenderer, MenuEntry, MenuSource, NativeAd};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// What to do when the menu cannot be loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum MenuErrorPolicy {
    /// Fail the whole run.
    Abort,
    /// Log the error and build an ads-only feed.
    #[default]
    Empty,
}

#[derive(Debug, Clone)]
pub struct FeedOutput {
    pub display: DisplayList,
    pub rendered: String,
    pub report: AdLoadReport,
}

pub struct FeedEngine<M: MenuSource, A: AdSource, R: DisplayRenderer> {
    menu: M,
    loader: SequentialAdLoader<A>,
    renderer: R,
    on_menu_error: MenuErrorPolicy,
}

impl<M: MenuSource, A: AdSource, R: DisplayRenderer> FeedEngine<M, A, R> {
    pub fn new(menu: M, ads: A, number_of_ads: usize, renderer: R) -> Self {
        Self {
            menu,
            loader: SequentialAdLoader::new(ads, number_of_ads),
            renderer,
            on_menu_error: MenuErrorPolicy::default(),
        }
    }

    pub fn with_menu_error_policy(mut self, policy: MenuErrorPolicy) -> Self {
        self.on_menu_error = policy;
        self
    }

    pub fn ad_source(&self) -> &A {
        self.loader.source()
    }

    pub async fn run(&self) -> Result<FeedOutput> {
        let entries = self.load_entries().await?;

        tracing::info!("Loading up to {} native ads...", self.loader.quota());
        let (ads, report) = self.loader.load_with_report().await;

        self.assemble(entries, ads, report)
    }

    /// Like [`run`](Self::run), but stops loading ads once `signal` fires.
    /// Returns `Ok(None)` when cancelled; nothing is rendered in that case.
    pub async fn run_until_cancelled(&self, signal: CancellationSignal) -> Result<Option<FeedOutput>> {
        let entries = self.load_entries().await?;

        tracing::info!("Loading up to {} native ads...", self.loader.quota());
        match self.loader.load_until_cancelled(signal).await {
            LoadOutcome::Completed(ads, report) => self.assemble(entries, ads, report).map(Some),
            LoadOutcome::Cancelled { attempts } => {
                tracing::info!("Feed build cancelled after {} ad attempts", attempts);
                Ok(None)
            }
        }
    }

    async fn load_entries(&self) -> Result<Vec<MenuEntry>> {
        tracing::info!("Loading menu...");
        let entries = match self.menu.load_menu().await {
            Ok(entries) => entries,
            Err(e) => match self.on_menu_error {
                MenuErrorPolicy::Abort => return Err(e),
                MenuErrorPolicy::Empty => {
                    tracing::error!("Unable to load menu, continuing without it: {}", e);
                    Vec::new()
                }
            },
        };
        tracing::info!("Loaded {} menu items", entries.len());
        Ok(entries)
    }

    fn assemble(
        &self,
        entries: Vec<MenuEntry>,
        ads: Vec<NativeAd>,
        report: AdLoadReport,
    ) -> Result<FeedOutput> {
        let list = interleave(entries, ads);
        let (rows, ad_rows) = (list.len(), list.ad_count());
        tracing::info!("Built feed of {} rows ({} ads)", rows, ad_rows);

        let rendered = self.renderer.render(&list)?;
        Ok(FeedOutput {
            display: list,
            rendered,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{JsonRenderer, ScriptedAdSource};
    use crate::core::ad_loader::cancellation;
    use std::time::Duration;
    use crate::utils::error::FeedError;
    use async_trait::async_trait;

    struct StaticMenu(Vec<MenuEntry>);

    #[async_trait]
    impl MenuSource for StaticMenu {
        async fn load_menu(&self) -> Result<Vec<MenuEntry>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenMenu;

    #[async_trait]
    impl MenuSource for BrokenMenu {
        async fn load_menu(&self) -> Result<Vec<MenuEntry>> {
            Err(FeedError::menu_parse("unexpected end of input"))
        }
    }

    fn entry(name: &str) -> MenuEntry {
        MenuEntry {
            name: name.to_string(),
            description: "d".to_string(),
            price: "$1.00".to_string(),
            category: "c".to_string(),
            image_ref: "p".to_string(),
        }
    }

    #[tokio::test]
    async fn test_run_interleaves_loaded_ads() {
        let menu = StaticMenu((0..10).map(|i| entry(&format!("m{}", i))).collect());
        let engine = FeedEngine::new(menu, ScriptedAdSource::alternating(), 5, JsonRenderer::new());

        let output = engine.run().await.unwrap();
        assert_eq!(output.report.attempts, 5);
        assert_eq!(output.report.loaded, 3);
        assert_eq!(output.display.len(), 13);
        assert!(output.display.iter().next().unwrap().is_ad());
        assert!(output.rendered.starts_with('['));
    }

    #[tokio::test]
    async fn test_broken_menu_continues_with_ads_only() {
        let engine = FeedEngine::new(BrokenMenu, ScriptedAdSource::always_fill(), 2, JsonRenderer::new());
        let output = engine.run().await.unwrap();
        assert_eq!(output.display.len(), 2);
        assert_eq!(output.display.menu_count(), 0);
    }

    #[tokio::test]
    async fn test_broken_menu_aborts_when_asked() {
        let engine = FeedEngine::new(BrokenMenu, ScriptedAdSource::always_fill(), 2, JsonRenderer::new())
            .with_menu_error_policy(MenuErrorPolicy::Abort);
        let result = engine.run().await;
        assert!(matches!(result, Err(FeedError::MenuParseError { .. })));
        assert_eq!(engine.ad_source().requests(), 0);
    }

    #[tokio::test]
    async fn test_run_until_cancelled_completes_without_cancel() {
        let menu = StaticMenu((0..4).map(|i| entry(&format!("m{}", i))).collect());
        let engine = FeedEngine::new(menu, ScriptedAdSource::always_fill(), 2, JsonRenderer::new());
        let (_handle, signal) = cancellation();

        let output = engine.run_until_cancelled(signal).await.unwrap().unwrap();
        assert_eq!(output.display.len(), 6);
        assert_eq!(output.report.loaded, 2);
    }

    #[tokio::test]
    async fn test_run_until_cancelled_stops_ad_loading() {
        let menu = StaticMenu(vec![entry("m0")]);
        let ads = ScriptedAdSource::always_fill().with_delay(Duration::from_millis(500));
        let engine = FeedEngine::new(menu, ads, 5, JsonRenderer::new());
        let (handle, signal) = cancellation();

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            handle.cancel();
        });

        let output = engine.run_until_cancelled(signal).await.unwrap();
        canceller.await.unwrap();
        assert!(output.is_none());
        assert_eq!(engine.ad_source().requests(), 1);
    }
}
