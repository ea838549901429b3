use crate::layout::{Allocation, AllocationKind};
use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters describing how a panel's grid has been used.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AllocatorMetrics {
    requests: u64,
    gap_fills: u64,
    extensions: u64,
    growths: u64,
    columns_added: u64,
    rejections: u64,
}

impl AllocatorMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_allocation(&mut self, allocation: &Allocation) {
        self.requests = self.requests.saturating_add(1);
        match allocation.kind {
            AllocationKind::Found => self.gap_fills = self.gap_fills.saturating_add(1),
            AllocationKind::Extended => self.extensions = self.extensions.saturating_add(1),
            AllocationKind::Grown => self.growths = self.growths.saturating_add(1),
        }
        self.columns_added = self
            .columns_added
            .saturating_add(allocation.columns_added as u64);
    }

    pub fn record_rejection(&mut self) {
        self.requests = self.requests.saturating_add(1);
        self.rejections = self.rejections.saturating_add(1);
    }

    pub fn snapshot(&self, rows: usize, columns: usize, occupied: usize) -> MetricSnapshot {
        MetricSnapshot {
            requests: self.requests,
            gap_fills: self.gap_fills,
            extensions: self.extensions,
            growths: self.growths,
            columns_added: self.columns_added,
            rejections: self.rejections,
            rows: rows as u64,
            columns: columns as u64,
            occupied_cells: occupied as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub requests: u64,
    pub gap_fills: u64,
    pub extensions: u64,
    pub growths: u64,
    pub columns_added: u64,
    pub rejections: u64,
    pub rows: u64,
    pub columns: u64,
    pub occupied_cells: u64,
}

impl MetricSnapshot {
    /// Share of grid cells in use, 0.0 for an empty grid.
    pub fn fill_ratio(&self) -> f64 {
        let total = self.rows * self.columns;
        if total == 0 {
            0.0
        } else {
            self.occupied_cells as f64 / total as f64
        }
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "allocator_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("requests".to_string(), json!(self.requests));
        map.insert("gap_fills".to_string(), json!(self.gap_fills));
        map.insert("extensions".to_string(), json!(self.extensions));
        map.insert("growths".to_string(), json!(self.growths));
        map.insert("columns_added".to_string(), json!(self.columns_added));
        map.insert("rejections".to_string(), json!(self.rejections));
        map.insert("rows".to_string(), json!(self.rows));
        map.insert("columns".to_string(), json!(self.columns));
        map.insert("occupied_cells".to_string(), json!(self.occupied_cells));
        map
    }
}
