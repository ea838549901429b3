use thiserror::Error;

use crate::layout::GridError;

/// Unified result type for the ribbon grid crate.
pub type Result<T> = std::result::Result<T, RibbonError>;

/// Errors surfaced by panels and their configuration.
#[derive(Debug, Error)]
pub enum RibbonError {
    #[error("grid allocation error: {0}")]
    Grid(#[from] GridError),
    #[error("invalid {kind} row count {rows}: expected 1..={max}")]
    InvalidRowCount {
        kind: &'static str,
        rows: usize,
        max: usize,
    },
    #[error("item `{0}` already exists in the panel")]
    DuplicateItem(String),
    #[error("panel grid already has {0} occupied cell(s); maximum rows can only change on an empty panel")]
    PanelNotEmpty(usize),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
