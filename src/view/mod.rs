//! View layer.
//!
//! Several representations of the same model can be visible at once. The
//! [`ViewCoordinator`] keeps them on the same page, the same current row and
//! the same selection.
//!
//! ```text
//!        select_row / select_* / resize
//!                     │
//!                     ▼
//! ┌────────────────────────────────────────┐
//! │            ViewCoordinator             │
//! │  SelectionSet   current row   control  │
//! └───────┬───────────────┬────────────────┘
//!         │ load_page     │ highlight / render_selection
//!         ▼               ▼
//!   ┌───────────┐   ┌─────────┬─────────┬───────┐
//!   │PagedModel │   │ Gallery │ Columns │ Items │
//!   └───────────┘   └─────────┴─────────┴───────┘
//! ```
//!
//! Views only ever see in-page offsets. The selection itself holds absolute
//! rows, so it survives page changes and page-size changes.

mod coordinator;
mod representation;
mod selection;

pub use coordinator::{PagingControl, ViewCoordinator};
pub use representation::{
    Capabilities, ColumnsView, GalleryView, ItemsView, ViewKind, ViewRepresentation, Viewport,
    DEFAULT_SPACING,
};
pub use selection::SelectionSet;
