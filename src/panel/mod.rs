//! Ribbon panel placement.
//!
//! A panel turns control descriptions (kind, size style, column span) into
//! grid cells using a [`GridSpaceAllocator`](crate::layout::GridSpaceAllocator).
//! Turning those cells into pixels is left to the UI layer.

mod config;
mod core;

pub use self::config::{ItemConfig, PanelConfig};
pub use self::core::{
    ButtonStyle, DEFAULT_MAX_ROWS, ItemKind, ItemRequest, PanelItem, RibbonPanel, RowCapacities,
    RowSpan,
};
