// Adapters layer: concrete menu sources, ad sources and renderers.

pub mod ads;
pub mod menu;
pub mod render;

pub use ads::{HttpAdSource, ScriptedAdSource};
pub use menu::FileMenuSource;
pub use render::{renderer_for, JsonRenderer, OutputFormat, TextRenderer};
