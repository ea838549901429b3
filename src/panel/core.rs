use serde::{Deserialize, Serialize};

use crate::error::{Result, RibbonError};
use crate::geometry::CellArea;
use crate::layout::{Allocation, CellRequest, GridSpaceAllocator, SearchMode};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::metrics::{AllocatorMetrics, MetricSnapshot};

pub const DEFAULT_MAX_ROWS: usize = 6;

const LOG_TARGET: &str = "ribbon::panel";

/// Size class of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Small,
    Medium,
    Large,
}

/// Row span of a control, either explicit or resolved from the panel's capacities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowSpan {
    Rows(usize),
    Style(ButtonStyle),
}

impl From<ButtonStyle> for RowSpan {
    fn from(style: ButtonStyle) -> Self {
        Self::Style(style)
    }
}

impl From<usize> for RowSpan {
    fn from(rows: usize) -> Self {
        Self::Rows(rows)
    }
}

/// Controls a panel can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Button,
    ToggleButton,
    ComboBox,
    FontComboBox,
    LineEdit,
    TextEdit,
    PlainTextEdit,
    Label,
    ProgressBar,
    SpinBox,
    DoubleSpinBox,
    DateEdit,
    TimeEdit,
    DateTimeEdit,
    TableWidget,
    TreeWidget,
    ListWidget,
    CalendarWidget,
    Separator,
    Gallery,
    Widget,
}

impl ItemKind {
    /// Size used when a request does not name one.
    pub fn default_style(self) -> ButtonStyle {
        match self {
            Self::Button
            | Self::ToggleButton
            | Self::TableWidget
            | Self::TreeWidget
            | Self::ListWidget
            | Self::CalendarWidget
            | Self::Separator
            | Self::Gallery => ButtonStyle::Large,
            _ => ButtonStyle::Small,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::ToggleButton => "toggle_button",
            Self::ComboBox => "combo_box",
            Self::FontComboBox => "font_combo_box",
            Self::LineEdit => "line_edit",
            Self::TextEdit => "text_edit",
            Self::PlainTextEdit => "plain_text_edit",
            Self::Label => "label",
            Self::ProgressBar => "progress_bar",
            Self::SpinBox => "spin_box",
            Self::DoubleSpinBox => "double_spin_box",
            Self::DateEdit => "date_edit",
            Self::TimeEdit => "time_edit",
            Self::DateTimeEdit => "date_time_edit",
            Self::TableWidget => "table_widget",
            Self::TreeWidget => "tree_widget",
            Self::ListWidget => "list_widget",
            Self::CalendarWidget => "calendar_widget",
            Self::Separator => "separator",
            Self::Gallery => "gallery",
            Self::Widget => "widget",
        }
    }
}

/// Row spans used for each size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCapacities {
    pub max: usize,
    pub large: usize,
    pub medium: usize,
    pub small: usize,
}

impl RowCapacities {
    /// Large controls take every row, medium half and small a third, rounding
    /// half to even and never below one row.
    pub fn from_max(max: usize) -> Self {
        let share = |parts: f64| ((max as f64 / parts).round_ties_even() as usize).max(1);
        Self {
            max,
            large: max,
            medium: share(2.0),
            small: share(3.0),
        }
    }

    pub fn rows_for(&self, style: ButtonStyle) -> usize {
        match style {
            ButtonStyle::Small => self.small,
            ButtonStyle::Medium => self.medium,
            ButtonStyle::Large => self.large,
        }
    }
}

impl Default for RowCapacities {
    fn default() -> Self {
        Self::from_max(DEFAULT_MAX_ROWS)
    }
}

/// Description of a control to place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    pub id: String,
    pub kind: ItemKind,
    /// Falls back to the kind's default style.
    pub row_span: Option<RowSpan>,
    pub col_span: usize,
    pub mode: SearchMode,
}

impl ItemRequest {
    pub fn new(id: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            kind,
            row_span: None,
            col_span: 1,
            mode: SearchMode::ColumnWise,
        }
    }

    pub fn row_span(mut self, row_span: impl Into<RowSpan>) -> Self {
        self.row_span = Some(row_span.into());
        self
    }

    pub fn col_span(mut self, col_span: usize) -> Self {
        self.col_span = col_span;
        self
    }

    pub fn mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }
}

/// A placed control. `area` is what the UI layer lays the control out in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelItem {
    pub id: String,
    pub kind: ItemKind,
    pub area: CellArea,
    pub mode: SearchMode,
}

/// Logical model of a ribbon panel: a titled grid of controls.
#[derive(Debug)]
pub struct RibbonPanel {
    title: String,
    capacities: RowCapacities,
    allocator: GridSpaceAllocator,
    items: Vec<PanelItem>,
    metrics: AllocatorMetrics,
    logger: Option<Logger>,
}

impl RibbonPanel {
    pub fn new(title: impl Into<String>, max_rows: usize) -> Result<Self> {
        Ok(Self {
            title: title.into(),
            capacities: RowCapacities::from_max(max_rows),
            allocator: GridSpaceAllocator::with_columns(max_rows, 1)?,
            items: Vec::new(),
            metrics: AllocatorMetrics::new(),
            logger: None,
        })
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn set_logger(&mut self, logger: Option<Logger>) {
        self.logger = logger;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn capacities(&self) -> RowCapacities {
        self.capacities
    }

    pub fn maximum_rows(&self) -> usize {
        self.capacities.max
    }

    pub fn large_rows(&self) -> usize {
        self.capacities.large
    }

    pub fn medium_rows(&self) -> usize {
        self.capacities.medium
    }

    pub fn small_rows(&self) -> usize {
        self.capacities.small
    }

    /// Change the row count. Only allowed before any cell has been used,
    /// since the grid cannot change height.
    pub fn set_maximum_rows(&mut self, max_rows: usize) -> Result<()> {
        let occupied = self.allocator.occupied_cells();
        if occupied > 0 {
            return Err(RibbonError::PanelNotEmpty(occupied));
        }
        self.allocator = GridSpaceAllocator::with_columns(max_rows, 1)?;
        self.capacities = RowCapacities::from_max(max_rows);
        Ok(())
    }

    pub fn set_large_rows(&mut self, rows: usize) -> Result<()> {
        self.capacities.large = self.checked_rows("large", rows)?;
        Ok(())
    }

    pub fn set_medium_rows(&mut self, rows: usize) -> Result<()> {
        self.capacities.medium = self.checked_rows("medium", rows)?;
        Ok(())
    }

    pub fn set_small_rows(&mut self, rows: usize) -> Result<()> {
        self.capacities.small = self.checked_rows("small", rows)?;
        Ok(())
    }

    fn checked_rows(&self, kind: &'static str, rows: usize) -> Result<usize> {
        let max = self.capacities.max;
        if rows == 0 || rows > max {
            return Err(RibbonError::InvalidRowCount { kind, rows, max });
        }
        Ok(rows)
    }

    pub fn default_row_span(&self, row_span: RowSpan) -> usize {
        match row_span {
            RowSpan::Rows(rows) => rows,
            RowSpan::Style(style) => self.capacities.rows_for(style),
        }
    }

    /// Columns the UI grid needs right now.
    pub fn column_count(&self) -> usize {
        self.allocator.col_count()
    }

    pub fn allocator(&self) -> &GridSpaceAllocator {
        &self.allocator
    }

    pub fn items(&self) -> &[PanelItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&PanelItem> {
        self.items.get(index)
    }

    pub fn item_by_id(&self, id: &str) -> Option<&PanelItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Reserve cells for a control and record where it went.
    pub fn add_item(&mut self, request: ItemRequest) -> Result<&PanelItem> {
        if self.item_by_id(&request.id).is_some() {
            return Err(RibbonError::DuplicateItem(request.id));
        }

        let row_span = self.default_row_span(
            request
                .row_span
                .unwrap_or_else(|| request.kind.default_style().into()),
        );
        let cells = CellRequest::new(row_span, request.col_span).mode(request.mode);

        let allocation = match self.allocator.allocate(cells) {
            Ok(allocation) => allocation,
            Err(err) => {
                self.metrics.record_rejection();
                self.emit(
                    LogLevel::Warn,
                    "item_rejected",
                    [
                        json_str("id", request.id.as_str()),
                        json_kv("row_span", row_span),
                        json_kv("col_span", request.col_span),
                        json_str("error", err.to_string()),
                    ],
                );
                return Err(err.into());
            }
        };
        self.metrics.record_allocation(&allocation);

        let item = PanelItem {
            id: request.id,
            kind: request.kind,
            area: CellArea::new(allocation.origin(), row_span, request.col_span),
            mode: request.mode,
        };
        self.log_placement(&item, &allocation);
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn add_small_item(&mut self, id: impl Into<String>, kind: ItemKind) -> Result<&PanelItem> {
        self.add_item(ItemRequest::new(id, kind).row_span(ButtonStyle::Small))
    }

    pub fn add_medium_item(&mut self, id: impl Into<String>, kind: ItemKind) -> Result<&PanelItem> {
        self.add_item(ItemRequest::new(id, kind).row_span(ButtonStyle::Medium))
    }

    pub fn add_large_item(&mut self, id: impl Into<String>, kind: ItemKind) -> Result<&PanelItem> {
        self.add_item(ItemRequest::new(id, kind).row_span(ButtonStyle::Large))
    }

    pub fn add_separator(&mut self, id: impl Into<String>) -> Result<&PanelItem> {
        self.add_item(ItemRequest::new(id, ItemKind::Separator))
    }

    pub fn add_gallery(&mut self, id: impl Into<String>, col_span: usize) -> Result<&PanelItem> {
        self.add_item(ItemRequest::new(id, ItemKind::Gallery).col_span(col_span))
    }

    /// Forget a control. Its cells stay occupied.
    pub fn remove_item(&mut self, id: &str) -> Option<PanelItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let item = self.items.remove(index);
        self.emit(LogLevel::Debug, "item_removed", [json_str("id", id)]);
        Some(item)
    }

    pub fn metrics_snapshot(&self) -> MetricSnapshot {
        self.metrics.snapshot(
            self.allocator.rows(),
            self.allocator.col_count(),
            self.allocator.occupied_cells(),
        )
    }

    /// Push the current metrics snapshot to the logger, if any.
    pub fn log_metrics(&self) {
        if let Some(logger) = self.logger.as_ref() {
            let event = self.metrics_snapshot().to_log_event("ribbon::panel.metrics");
            let _ = logger.log_event(event);
        }
    }

    fn log_placement(&self, item: &PanelItem, allocation: &Allocation) {
        self.emit(
            LogLevel::Debug,
            "item_placed",
            [
                json_str("id", item.id.as_str()),
                json_str("kind", item.kind.as_str()),
                json_kv("row", item.area.origin.row),
                json_kv("col", item.area.origin.col),
                json_kv("row_span", item.area.row_span),
                json_kv("col_span", item.area.col_span),
            ],
        );
        if allocation.columns_added > 0 {
            self.emit(
                LogLevel::Info,
                "grid_widened",
                [
                    json_str("id", item.id.as_str()),
                    json_kv("columns_added", allocation.columns_added),
                    json_kv("columns", self.allocator.col_count()),
                ],
            );
        }
    }

    fn emit<const N: usize>(
        &self,
        level: LogLevel,
        message: &str,
        fields: [(String, serde_json::Value); N],
    ) {
        if let Some(logger) = self.logger.as_ref() {
            let event = event_with_fields(level, LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }
}
