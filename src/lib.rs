//! # EM Gallery
//!
//! Paginated data access and thumbnail caching for electron-microscopy
//! datasets.
//!
//! This library exposes huge tables and the slices of 3D volumes one page at
//! a time, so a viewer never materializes the whole dataset. Renderable cells
//! hold compact slice addresses that resolve to cached thumbnails.
//!
//! ## Features
//!
//! - **Slice addresses**: `path`, `index@path`, `index@axis@path` and `index@axis@volume@path`
//! - **Paged models**: windowed access to row stores and to volume slices along X, Y or Z
//! - **Thumbnail cache**: bounded LRU of normalized, aspect-preserving thumbnails
//! - **View coordination**: shared page, current row and selection across gallery, list and detail views
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`address`] - Slice address codec
//! - [`source`] - Pixel sources and numeric arrays
//! - [`store`] - Row stores, typed cells and column descriptors
//! - [`thumbnail`] - Thumbnail rendering and caching
//! - [`model`] - Paged table and volume models with change events
//! - [`view`] - View representations and the coordinator keeping them in sync
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust
//! use em_gallery::{
//!     Address, CacheConfig, MemoryPixelSource, PixelArray, ThumbnailCache,
//! };
//!
//! let image = PixelArray::from_2d(800, 600, vec![0.5; 800 * 600]).unwrap();
//! let source = MemoryPixelSource::new().with_images("stack.mrcs", vec![image]);
//!
//! let mut cache = ThumbnailCache::new(source, CacheConfig::new(16, None).unwrap());
//! let address: Address = "0@stack.mrcs".parse().unwrap();
//!
//! let thumbnail = cache.get_or_create(&address, Some((100, 100))).unwrap();
//! assert_eq!(thumbnail.dimensions(), (100, 75));
//! ```

pub mod address;
pub mod config;
pub mod error;
pub mod model;
pub mod source;
pub mod store;
pub mod thumbnail;
pub mod view;

// Re-export commonly used types
pub use address::{format, parse, parse_with_root, Address, Axis, ImageType};
pub use config::{CacheConfig, Cli, Command, PageConfig, PagingConfig, ParseConfig, ThumbnailConfig};
pub use error::{AddressError, ConfigError, SourceError, StoreError, ThumbnailError};
pub use model::{
    EventKind, ModelEvent, Observers, PagedModel, PagedTableModel, Paging, SubscriptionId,
    VolumeAxisModel,
};
pub use source::{Dimensions, ImageFileSource, MemoryPixelSource, PixelArray, PixelSource};
pub use store::{
    shared, CellValue, ColumnDescriptor, ColumnFlag, ColumnType, MemoryRowStore, Row, RowStore,
    SortKey, StoreHandle,
};
pub use thumbnail::{CacheStats, Thumbnail, ThumbnailCache, ThumbnailKey};
pub use view::{
    Capabilities, ColumnsView, GalleryView, ItemsView, SelectionSet, ViewCoordinator, ViewKind,
    ViewRepresentation, Viewport,
};
