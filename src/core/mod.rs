pub mod ad_loader;
pub mod feed;
pub mod interleave;
pub mod menu;

pub use crate::domain::model::{
    AdLoadError, AdResult, DisplayItem, DisplayList, MenuEntry, NativeAd,
};
pub use crate::domain::ports::{AdSource, ConfigProvider, DisplayRenderer, MenuSource};
pub use crate::utils::error::Result;
