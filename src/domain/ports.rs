use crate::domain::model::{AdResult, DisplayList, MenuEntry};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Something that can hand out one native ad per call.
#[async_trait]
pub trait AdSource: Send + Sync {
    async fn request_ad(&self) -> AdResult;
}

#[async_trait]
impl<T: AdSource + ?Sized> AdSource for Box<T> {
    async fn request_ad(&self) -> AdResult {
        (**self).request_ad().await
    }
}

#[async_trait]
pub trait MenuSource: Send + Sync {
    async fn load_menu(&self) -> Result<Vec<MenuEntry>>;
}

pub trait DisplayRenderer: Send + Sync {
    fn render(&self, list: &DisplayList) -> Result<String>;
}

impl<T: DisplayRenderer + ?Sized> DisplayRenderer for Box<T> {
    fn render(&self, list: &DisplayList) -> Result<String> {
        (**self).render(list)
    }
}

pub trait ConfigProvider: Send + Sync {
    fn menu_path(&self) -> &str;
    fn ad_endpoint(&self) -> Option<&str>;
    fn number_of_ads(&self) -> usize;
}
