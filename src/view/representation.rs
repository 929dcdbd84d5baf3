//! View representations of a paged model.
//!
//! The same window can be shown as a grid of thumbnails, a list of rows or a
//! single item. Each variant reports what it supports through
//! [`Capabilities`] and how many rows fit in a viewport; the coordinator
//! does the rest.

use std::fmt;

/// Feature flags of a view representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Shows and edits the shared selection
    pub selection: bool,
    /// Accepts [`ViewRepresentation::set_icon_size`]
    pub icon_size: bool,
    /// Can browse a volume along an axis
    pub axis: bool,
}

/// Visible geometry of a view, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The three kinds of representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Grid of thumbnails
    Gallery,
    /// One row per item
    Columns,
    /// One item at a time
    Items,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewKind::Gallery => "gallery",
            ViewKind::Columns => "columns",
            ViewKind::Items => "items",
        };
        f.write_str(name)
    }
}

/// A widget-independent view of a paged model.
///
/// Rows are passed as offsets inside the current page.
pub trait ViewRepresentation {
    fn kind(&self) -> ViewKind;

    fn capabilities(&self) -> Capabilities;

    /// Rows that fit in `viewport`, at least 1.
    fn page_size_for(&self, viewport: Viewport) -> usize;

    /// Mark the current row.
    fn highlight(&mut self, offset: Option<usize>);

    /// Offset of the marked row, if any.
    fn highlighted(&self) -> Option<usize>;

    /// Show the selected rows of the current page.
    ///
    /// Only called on views whose capabilities include selection.
    fn render_selection(&mut self, offsets: &[usize]);

    /// Offsets last passed to [`render_selection`](Self::render_selection).
    fn rendered_selection(&self) -> &[usize] {
        &[]
    }

    /// Change the thumbnail size. Returns `false` when unsupported.
    fn set_icon_size(&mut self, _width: u32, _height: u32) -> bool {
        false
    }
}

// =============================================================================
// Gallery
// =============================================================================

/// Default spacing between gallery cells, in pixels.
pub const DEFAULT_SPACING: u32 = 4;

/// Grid of thumbnails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    icon_width: u32,
    icon_height: u32,
    spacing: u32,
    highlighted: Option<usize>,
    selected: Vec<usize>,
}

impl GalleryView {
    pub fn new(icon_width: u32, icon_height: u32) -> Self {
        Self {
            icon_width: icon_width.max(1),
            icon_height: icon_height.max(1),
            spacing: DEFAULT_SPACING,
            highlighted: None,
            selected: Vec::new(),
        }
    }

    pub fn with_spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn icon_size(&self) -> (u32, u32) {
        (self.icon_width, self.icon_height)
    }

    /// `(columns, rows)` of whole cells that fit in `viewport`.
    pub fn grid_for(&self, viewport: Viewport) -> (usize, usize) {
        let cell_width = self.icon_width + self.spacing;
        let cell_height = self.icon_height + self.spacing;
        let columns = (viewport.width / cell_width).max(1) as usize;
        let rows = (viewport.height / cell_height).max(1) as usize;
        (columns, rows)
    }
}

impl ViewRepresentation for GalleryView {
    fn kind(&self) -> ViewKind {
        ViewKind::Gallery
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            selection: true,
            icon_size: true,
            axis: true,
        }
    }

    fn page_size_for(&self, viewport: Viewport) -> usize {
        let (columns, rows) = self.grid_for(viewport);
        columns * rows
    }

    fn highlight(&mut self, offset: Option<usize>) {
        self.highlighted = offset;
    }

    fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    fn render_selection(&mut self, offsets: &[usize]) {
        self.selected = offsets.to_vec();
    }

    fn rendered_selection(&self) -> &[usize] {
        &self.selected
    }

    fn set_icon_size(&mut self, width: u32, height: u32) -> bool {
        self.icon_width = width.max(1);
        self.icon_height = height.max(1);
        true
    }
}

// =============================================================================
// Columns
// =============================================================================

/// One row per item, with a header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnsView {
    row_height: u32,
    header_height: u32,
    highlighted: Option<usize>,
    selected: Vec<usize>,
}

impl ColumnsView {
    pub fn new(row_height: u32, header_height: u32) -> Self {
        Self {
            row_height: row_height.max(1),
            header_height,
            highlighted: None,
            selected: Vec::new(),
        }
    }
}

impl ViewRepresentation for ColumnsView {
    fn kind(&self) -> ViewKind {
        ViewKind::Columns
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            selection: true,
            icon_size: false,
            axis: false,
        }
    }

    fn page_size_for(&self, viewport: Viewport) -> usize {
        let body = viewport.height.saturating_sub(self.header_height);
        (body / self.row_height).max(1) as usize
    }

    fn highlight(&mut self, offset: Option<usize>) {
        self.highlighted = offset;
    }

    fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    fn render_selection(&mut self, offsets: &[usize]) {
        self.selected = offsets.to_vec();
    }

    fn rendered_selection(&self) -> &[usize] {
        &self.selected
    }
}

// =============================================================================
// Items
// =============================================================================

/// Detail view of a single item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemsView {
    highlighted: Option<usize>,
}

impl ItemsView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ViewRepresentation for ItemsView {
    fn kind(&self) -> ViewKind {
        ViewKind::Items
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    fn page_size_for(&self, _viewport: Viewport) -> usize {
        1
    }

    fn highlight(&mut self, offset: Option<usize>) {
        self.highlighted = offset;
    }

    fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    fn render_selection(&mut self, _offsets: &[usize]) {}
}

// =============================================================================
// Tests
// =============================================================================
