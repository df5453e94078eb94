use serde::{Deserialize, Serialize};

/// Ads requested per feed when nothing else is configured.
pub const DEFAULT_NUMBER_OF_ADS: usize = 5;

/// One dish from the bundled menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    #[serde(rename = "photo")]
    pub image_ref: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppInstallAd {
    pub headline: String,
    pub body: String,
    pub call_to_action: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAd {
    pub headline: String,
    pub body: String,
    pub call_to_action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertiser: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// A loaded advertisement. The feed core carries these without looking inside;
/// only renderers care which variant they hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NativeAd {
    AppInstall(AppInstallAd),
    Content(ContentAd),
}

impl NativeAd {
    pub fn headline(&self) -> &str {
        match self {
            NativeAd::AppInstall(ad) => &ad.headline,
            NativeAd::Content(ad) => &ad.headline,
        }
    }
}

/// Why a single ad request produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdLoadError {
    pub code: i32,
    pub message: String,
}

impl AdLoadError {
    pub const ERROR_CODE_INTERNAL_ERROR: i32 = 0;
    pub const ERROR_CODE_INVALID_REQUEST: i32 = 1;
    pub const ERROR_CODE_NETWORK_ERROR: i32 = 2;
    pub const ERROR_CODE_NO_FILL: i32 = 3;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn no_fill() -> Self {
        Self::new(Self::ERROR_CODE_NO_FILL, "no ad available")
    }
}

impl std::fmt::Display for AdLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ad failed to load (code {}): {}", self.code, self.message)
    }
}

pub type AdResult = std::result::Result<NativeAd, AdLoadError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "item", rename_all = "snake_case")]
pub enum DisplayItem {
    Menu(MenuEntry),
    Ad(NativeAd),
}

impl DisplayItem {
    pub fn is_ad(&self) -> bool {
        matches!(self, DisplayItem::Ad(_))
    }
}

/// The final ordered rows handed to a renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayList(Vec<DisplayItem>);

impl DisplayList {
    pub fn new(items: Vec<DisplayItem>) -> Self {
        Self(items)
    }

    pub fn from_menu(entries: Vec<MenuEntry>) -> Self {
        Self(entries.into_iter().map(DisplayItem::Menu).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DisplayItem> {
        self.0.iter()
    }

    pub fn ad_count(&self) -> usize {
        self.0.iter().filter(|item| item.is_ad()).count()
    }

    pub fn menu_count(&self) -> usize {
        self.len() - self.ad_count()
    }

    pub fn into_items(self) -> Vec<DisplayItem> {
        self.0
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a DisplayItem;
    type IntoIter = std::slice::Iter<'a, DisplayItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
