//! Coordination of paging, current row and selection across views.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::address::Axis;
use crate::model::{row_to_page, EventKind, ModelEvent, PagedModel};

use super::representation::{Viewport, ViewRepresentation};
use super::selection::SelectionSet;

// =============================================================================
// Paging Control
// =============================================================================

/// State of the page spinner shown next to a paged view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingControl {
    page: usize,
    page_count: usize,
    page_size: usize,
}

impl PagingControl {
    pub fn new(page: usize, page_count: usize, page_size: usize) -> Self {
        Self {
            page,
            page_count: page_count.max(1),
            page_size,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Pages the control lets the user pick.
    pub fn bounds(&self) -> Range<usize> {
        0..self.page_count
    }

    /// Whether the control needs to be shown at all.
    pub fn is_visible(&self) -> bool {
        self.page_count > 1
    }

    pub fn on_page_config_changed(&mut self, page: usize, page_count: usize, page_size: usize) {
        *self = Self::new(page, page_count, page_size);
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count - 1);
    }
}

// =============================================================================
// View Coordinator
// =============================================================================

/// Keeps every view of one model on the same page, current row and
/// selection.
///
/// The coordinator owns the model and the views. Page events from the model
/// are forwarded to the [`PagingControl`] through the model's observers, so
/// the control stays in sync even when the model is driven directly.
///
/// # Example
///
/// ```
/// use em_gallery::config::PagingConfig;
/// use em_gallery::model::{PagedModel, PagedTableModel};
/// use em_gallery::store::{shared, ColumnDescriptor, ColumnType, MemoryRowStore};
/// use em_gallery::view::{ColumnsView, ViewCoordinator, ViewRepresentation};
///
/// let rows = (0..105).map(|i| vec![(i as i64).into()]).collect();
/// let store = MemoryRowStore::with_rows(vec![ColumnDescriptor::new("id", ColumnType::Int)], rows);
/// let model = PagedTableModel::new(shared(store), PagingConfig::new(10).unwrap());
///
/// let mut coordinator = ViewCoordinator::new(model);
/// coordinator.add_view(Box::new(ColumnsView::new(20, 0)));
///
/// assert!(coordinator.select_row(104));
/// assert_eq!(coordinator.model().page(), 10);
/// assert_eq!(coordinator.views()[0].highlighted(), Some(4));
/// ```
pub struct ViewCoordinator<M: PagedModel> {
    model: M,
    views: Vec<Box<dyn ViewRepresentation>>,
    active: usize,
    selection: SelectionSet,
    current_row: Option<usize>,
    control: Rc<RefCell<PagingControl>>,
    viewport: Option<Viewport>,
}

impl<M: PagedModel> ViewCoordinator<M> {
    pub fn new(mut model: M) -> Self {
        let paging = *model.paging();
        let control = Rc::new(RefCell::new(PagingControl::new(
            paging.page(),
            paging.page_count(),
            paging.page_size(),
        )));

        let on_config = Rc::clone(&control);
        model
            .observers()
            .subscribe(EventKind::PageConfigChanged, move |event| {
                if let ModelEvent::PageConfigChanged {
                    page,
                    page_count,
                    page_size,
                } = *event
                {
                    on_config
                        .borrow_mut()
                        .on_page_config_changed(page, page_count, page_size);
                }
            });

        let on_page = Rc::clone(&control);
        model
            .observers()
            .subscribe(EventKind::PageChanged, move |event| {
                if let ModelEvent::PageChanged { page } = *event {
                    on_page.borrow_mut().set_page(page);
                }
            });

        Self {
            model,
            views: Vec::new(),
            active: 0,
            selection: SelectionSet::new(),
            current_row: None,
            control,
            viewport: None,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the model.
    ///
    /// Page events still reach the paging control; call
    /// [`refresh_views`](Self::refresh_views) after changes that move rows.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }

    // ===== Views =====

    /// Bind a view; returns its index. The first view bound becomes active.
    pub fn add_view(&mut self, view: Box<dyn ViewRepresentation>) -> usize {
        self.views.push(view);
        let index = self.views.len() - 1;
        self.refresh_views();
        index
    }

    pub fn views(&self) -> &[Box<dyn ViewRepresentation>] {
        &self.views
    }

    pub fn active_view(&self) -> Option<&dyn ViewRepresentation> {
        self.views.get(self.active).map(|v| &**v)
    }

    /// Switch the view that drives page size and axis handling.
    pub fn set_active_view(&mut self, index: usize) -> bool {
        if index >= self.views.len() {
            return false;
        }
        self.active = index;
        if let Some(viewport) = self.viewport {
            self.on_viewport_resized(viewport);
        }
        true
    }

    // ===== Paging =====

    /// Page holding `row` at the current page size.
    pub fn row_to_page(&self, row: usize) -> Option<usize> {
        row_to_page(row, self.model.page_size())
    }

    /// Snapshot of the paging control.
    pub fn paging_control(&self) -> PagingControl {
        *self.control.borrow()
    }

    /// Reflect a page configuration in the paging control.
    pub fn on_page_config_changed(&mut self, page: usize, page_count: usize, page_size: usize) {
        self.control
            .borrow_mut()
            .on_page_config_changed(page, page_count, page_size);
    }

    /// Load `page` and redraw the views.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if !self.model.paging().contains_page(page) {
            warn!(page, page_count = self.model.page_count(), "page out of range");
            return false;
        }
        self.model.load_page(page, false);
        self.refresh_views();
        true
    }

    /// Recompute the page size for the active view after a geometry change.
    ///
    /// Paging is only reconfigured when the page size actually changes; the
    /// new page is the one holding the current row, or the first row of the
    /// old page when no row is current. Returns whether paging changed.
    pub fn on_viewport_resized(&mut self, viewport: Viewport) -> bool {
        self.viewport = Some(viewport);
        let Some(view) = self.views.get(self.active) else {
            return false;
        };

        let page_size = view.page_size_for(viewport).max(1);
        if page_size == self.model.page_size() {
            return false;
        }

        let anchor = self
            .current_row
            .unwrap_or_else(|| self.model.paging().current_range().start);
        debug!(
            width = viewport.width,
            height = viewport.height,
            page_size,
            anchor,
            "viewport resized"
        );
        self.model.configure_paging(page_size, anchor / page_size);
        self.refresh_views();
        true
    }

    // ===== Current Row =====

    pub fn current_row(&self) -> Option<usize> {
        self.current_row
    }

    /// Make `row` current, loading its page if needed.
    ///
    /// Every view highlights the row's offset in the page and the model
    /// emits `RowChanged`. Returns `false` for rows outside the dataset.
    pub fn select_row(&mut self, row: usize) -> bool {
        let total = self.model.total();
        if row >= total {
            warn!(row, total, "ignoring out-of-range row");
            return false;
        }
        let Some(page) = self.row_to_page(row) else {
            return false;
        };

        if page != self.model.page() {
            self.model.load_page(page, false);
        }
        self.current_row = Some(row);
        debug!(row, page, "current row changed");

        self.refresh_views();
        self.model
            .observers()
            .emit(&ModelEvent::RowChanged { row });
        true
    }

    // ===== Selection =====

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// In-page offsets of the selected rows of the current page.
    pub fn selected_in_page(&self) -> Vec<usize> {
        self.selection
            .offsets_in(self.model.paging().current_range())
    }

    pub fn select(&mut self, row: usize) {
        if row < self.model.total() {
            self.selection.select(row);
            self.sync_selection();
        }
    }

    pub fn deselect(&mut self, row: usize) {
        self.selection.deselect(row);
        self.sync_selection();
    }

    pub fn toggle(&mut self, row: usize) {
        if row < self.model.total() {
            self.selection.toggle(row);
            self.sync_selection();
        }
    }

    /// Select `from..=to` in either order, clipped to the dataset.
    pub fn select_range(&mut self, from: usize, to: usize) {
        let Some(last) = self.model.total().checked_sub(1) else {
            return;
        };
        if from.min(to) > last {
            return;
        }
        self.selection.select_range(from.min(last), to.min(last));
        self.sync_selection();
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(self.model.total());
        self.sync_selection();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.sync_selection();
    }

    pub fn invert_selection(&mut self) {
        self.selection.invert(self.model.total());
        self.sync_selection();
    }

    /// Push the selected offsets of the current page to every view that
    /// shows a selection. The offsets are computed once for all views.
    pub fn sync_selection(&mut self) {
        let offsets = self.selected_in_page();
        for view in self.views.iter_mut() {
            if view.capabilities().selection {
                view.render_selection(&offsets);
            }
        }
    }

    /// Re-apply highlight and selection to every view.
    pub fn refresh_views(&mut self) {
        let range = self.model.paging().current_range();
        let offset = self
            .current_row
            .filter(|row| range.contains(row))
            .map(|row| row - range.start);
        for view in self.views.iter_mut() {
            view.highlight(offset);
        }
        self.sync_selection();
    }

    // ===== Capabilities =====

    /// Switch the slicing axis of a volume model.
    ///
    /// Requires the active view to support axes and the model to have one.
    /// The selection and current row refer to the old axis and are cleared.
    pub fn set_axis(&mut self, axis: Axis) -> bool {
        let supported = self.active_view().is_some_and(|v| v.capabilities().axis);
        if !supported || !self.model.set_axis(axis) {
            return false;
        }

        self.selection.clear();
        self.current_row = None;
        self.refresh_views();
        true
    }

    /// Change the icon size of the active view; the page size follows on the
    /// next resize.
    pub fn set_icon_size(&mut self, width: u32, height: u32) -> bool {
        match self.views.get_mut(self.active) {
            Some(view) if view.capabilities().icon_size => view.set_icon_size(width, height),
            _ => false,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
