//! Cell allocation for ribbon toolbar panels.
//!
//! A ribbon panel lays its controls out on a grid with a fixed number of rows
//! and as many columns as the controls need. This crate owns the logical side
//! of that: which cells each control occupies, how the grid widens, and the
//! panel bookkeeping around it. Pixel geometry and painting belong to the UI
//! toolkit that consumes the returned cell areas.

pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod panel;

pub use error::{Result, RibbonError};
pub use geometry::{CellArea, CellOrigin};
pub use layout::{
    Allocation, AllocationKind, CellRequest, GridError, GridSpaceAllocator, OccupancyGrid,
    SearchMode,
};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{AllocatorMetrics, MetricSnapshot};
pub use panel::{
    ButtonStyle, DEFAULT_MAX_ROWS, ItemConfig, ItemKind, ItemRequest, PanelConfig, PanelItem,
    RibbonPanel, RowCapacities, RowSpan,
};
