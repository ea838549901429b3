use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::core::{DEFAULT_MAX_ROWS, ItemKind, ItemRequest, RibbonPanel, RowSpan};
use crate::error::Result;
use crate::layout::SearchMode;

/// Declarative description of a panel and its controls, in placement order.
///
/// ```json
/// {
///   "title": "Clipboard",
///   "max_rows": 6,
///   "items": [
///     { "id": "paste", "kind": "button" },
///     { "id": "cut", "kind": "button", "row_span": "small" },
///     { "id": "styles", "kind": "gallery", "col_span": 4 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_rows: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium_rows: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_rows: Option<usize>,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemConfig {
    pub id: String,
    pub kind: ItemKind,
    /// A row count or `"small"`, `"medium"`, `"large"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<RowSpan>,
    #[serde(default = "default_col_span")]
    pub col_span: usize,
    #[serde(default)]
    pub mode: SearchMode,
}

fn default_max_rows() -> usize {
    DEFAULT_MAX_ROWS
}

fn default_col_span() -> usize {
    1
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            max_rows: DEFAULT_MAX_ROWS,
            large_rows: None,
            medium_rows: None,
            small_rows: None,
            items: Vec::new(),
        }
    }
}

impl PanelConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

impl ItemConfig {
    pub fn to_request(&self) -> ItemRequest {
        ItemRequest {
            id: self.id.clone(),
            kind: self.kind,
            row_span: self.row_span,
            col_span: self.col_span,
            mode: self.mode,
        }
    }
}

impl RibbonPanel {
    /// Build a panel and place every configured item in order.
    pub fn from_config(config: &PanelConfig) -> Result<Self> {
        let mut panel = RibbonPanel::new(config.title.clone(), config.max_rows)?;
        if let Some(rows) = config.large_rows {
            panel.set_large_rows(rows)?;
        }
        if let Some(rows) = config.medium_rows {
            panel.set_medium_rows(rows)?;
        }
        if let Some(rows) = config.small_rows {
            panel.set_small_rows(rows)?;
        }
        for item in &config.items {
            panel.add_item(item.to_request())?;
        }
        Ok(panel)
    }
}
