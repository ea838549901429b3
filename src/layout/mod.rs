//! Layout module orchestrator.
//!
//! Panels import the allocator types from here; the occupancy matrix lives in
//! `grid` and the search policy in `allocator`.

pub mod allocator;
pub mod grid;

pub use allocator::{Allocation, AllocationKind, CellRequest, GridSpaceAllocator, SearchMode};
pub use grid::{GridError, OccupancyGrid};
