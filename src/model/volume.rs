//! Paged model over the slices of one volume.
//!
//! Rows are not stored anywhere: row `i` is slice `i` along the current
//! axis of volume `volume_index`, and its cells are computed on demand.

use tracing::{debug, warn};

use crate::address::{Address, Axis};
use crate::config::PagingConfig;
use crate::error::SourceError;
use crate::source::{Dimensions, PixelSource};
use crate::store::{CellValue, ColumnDescriptor, ColumnFlag, ColumnType, Row};

use super::events::{ModelEvent, Observers};
use super::paging::Paging;
use super::PagedModel;

/// Column holding the 1-based slice number.
pub const INDEX_COLUMN: usize = 0;
/// Column holding the always-true enabled flag.
pub const ENABLED_COLUMN: usize = 1;
/// Column holding the slice address, rendered as a thumbnail.
pub const SLICE_COLUMN: usize = 2;

fn volume_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("index", ColumnType::Int).with_label("Index"),
        ColumnDescriptor::new("enabled", ColumnType::Bool).with_label("Enabled"),
        ColumnDescriptor::new("slice", ColumnType::String)
            .with_label("Slice")
            .with_renderable(ColumnFlag::locked(true)),
    ]
}

/// Windowed view over the slices of a volume along one axis.
pub struct VolumeAxisModel {
    path: String,
    dimensions: Dimensions,
    axis: Axis,
    volume_index: usize,
    columns: Vec<ColumnDescriptor>,
    paging: Paging,
    window: Vec<Row>,
    observers: Observers,
}

impl VolumeAxisModel {
    /// Open the volume at `path`, reading its dimensions from `source`.
    ///
    /// An undefined axis falls back to Z.
    pub fn new<P: PixelSource>(
        source: &P,
        path: impl Into<String>,
        axis: Axis,
        config: PagingConfig,
    ) -> Result<Self, SourceError> {
        let path = path.into();
        let dimensions = source.dimensions(&path)?;
        Ok(Self::with_dimensions(path, dimensions, axis, config))
    }

    /// Build a model for a volume whose dimensions are already known.
    pub fn with_dimensions(
        path: impl Into<String>,
        dimensions: Dimensions,
        axis: Axis,
        config: PagingConfig,
    ) -> Self {
        let axis = if axis.is_defined() { axis } else { Axis::Z };
        let mut model = Self {
            path: path.into(),
            dimensions,
            axis,
            volume_index: 0,
            columns: volume_columns(),
            paging: Paging::new(dimensions.extent(axis), config.page_size()),
            window: Vec::new(),
            observers: Observers::new(),
        };
        model.fill_window();
        model
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn volume_index(&self) -> usize {
        self.volume_index
    }

    /// Number of volumes in the file, at least one.
    pub fn volume_count(&self) -> usize {
        self.dimensions.n.max(1)
    }

    /// Select volume `index` of the stack and reload the current page.
    ///
    /// Indexes outside `[0, volume_count)` select volume 0.
    pub fn set_volume_index(&mut self, index: usize) {
        let index = if index < self.volume_count() {
            index
        } else {
            warn!(
                index,
                volume_count = self.volume_count(),
                "volume index out of range, using 0"
            );
            0
        };

        self.volume_index = index;
        self.observers
            .emit(&ModelEvent::VolumeIndexChanged { index });
        let page = self.paging.page();
        self.load_page(page, true);
    }

    /// Address of slice `row` in the current axis and volume.
    pub fn slice_address(&self, row: usize) -> Option<Address> {
        (row < self.paging.total()).then(|| {
            Address::volume_stack(row, self.axis, self.volume_index, self.path.as_str())
        })
    }

    fn compute_row(&self, row: usize) -> Row {
        (0..self.columns.len()).map(|c| self.cell(row, c)).collect()
    }

    fn fill_window(&mut self) {
        self.window = self
            .paging
            .current_range()
            .map(|row| self.compute_row(row))
            .collect();
    }
}

impl PagedModel for VolumeAxisModel {
    fn paging(&self) -> &Paging {
        &self.paging
    }

    fn configure_paging(&mut self, page_size: usize, requested_page: usize) {
        self.paging.set_total(self.dimensions.extent(self.axis));
        let page = self.paging.configure(page_size, requested_page);

        self.observers.emit(&ModelEvent::PageConfigChanged {
            page,
            page_count: self.paging.page_count(),
            page_size: self.paging.page_size(),
        });
        self.load_page(page, true);
    }

    fn load_page(&mut self, index: usize, force: bool) {
        if index == self.paging.page() && !force {
            return;
        }
        if !self.paging.set_page(index) {
            warn!(
                page = index,
                page_count = self.paging.page_count(),
                "ignoring out-of-range page request"
            );
            return;
        }

        self.fill_window();
        self.observers.emit(&ModelEvent::PageChanged { page: index });
    }

    fn columns(&self) -> Vec<ColumnDescriptor> {
        self.columns.clone()
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn cell(&self, row: usize, column: usize) -> CellValue {
        if row >= self.paging.total() {
            return CellValue::Empty;
        }
        match column {
            INDEX_COLUMN => CellValue::Int(row as i64 + 1),
            ENABLED_COLUMN => CellValue::Bool(true),
            SLICE_COLUMN => self
                .slice_address(row)
                .map(|address| CellValue::Text(address.to_string()))
                .unwrap_or_default(),
            _ => CellValue::Empty,
        }
    }

    fn window(&self) -> &[Row] {
        &self.window
    }

    fn observers(&mut self) -> &mut Observers {
        &mut self.observers
    }

    /// Switch the slicing axis and go back to page 0.
    fn set_axis(&mut self, axis: Axis) -> bool {
        if !axis.is_defined() {
            return false;
        }

        debug!(path = %self.path, axis = %axis, "switching volume axis");
        self.axis = axis;
        let page_size = self.paging.page_size();
        self.configure_paging(page_size, 0);
        self.observers.emit(&ModelEvent::AxisChanged { axis });
        true
    }
}

// =============================================================================
// Tests
// =============================================================================
