//! Error module orchestrator.
//!
//! The concrete error enums live in `types`; everything downstream imports
//! them from here or from the crate root.

mod types;

pub use types::{Result, RibbonError};
