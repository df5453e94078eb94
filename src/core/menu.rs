use crate::core::MenuEntry;
use crate::utils::error::{FeedError, Result};

/// Parses the bundled menu document: a JSON array of objects carrying
/// `name`, `description`, `price`, `category` and `photo` strings.
///
/// An empty array is a valid, empty menu. Anything else that does not match
/// the shape is a [`FeedError::MenuParseError`].
pub fn parse_menu(raw: &str) -> Result<Vec<MenuEntry>> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| FeedError::menu_parse(e.to_string()))?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(FeedError::menu_parse(format!(
                "expected a JSON array of menu items, found {}",
                json_kind(&other)
            )))
        }
    };

    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let entry: MenuEntry = serde_json::from_value(item)
            .map_err(|e| FeedError::menu_parse(format!("menu item {}: {}", index, e)))?;
        entries.push(entry);
    }

    tracing::debug!("Parsed {} menu items", entries.len());
    Ok(entries)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
