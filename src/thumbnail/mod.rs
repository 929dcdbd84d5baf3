//! Thumbnail layer.
//!
//! Renderable cells hold addresses; this layer turns an address into pixels
//! the UI can paint.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Renderable cell (address)       │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │            ThumbnailCache               │
//! │  ┌──────────────┐  ┌─────────────────┐  │
//! │  │  LRU map     │  │  render()       │  │
//! │  │  (key ->     │  │  (normalize ->  │  │
//! │  │   Thumbnail) │  │   resize)       │  │
//! │  └──────────────┘  └─────────────────┘  │
//! └────────────────────┬────────────────────┘
//!                      │ miss
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │             PixelSource                 │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`ThumbnailCache`]: bounded LRU map from [`ThumbnailKey`] to [`Thumbnail`]
//! - [`thumbnail_size`]: aspect-preserving fit that never upscales
//! - [`render`]: intensity normalization and resizing of one slice

mod cache;
mod render;

pub use cache::{CacheStats, ThumbnailCache, ThumbnailKey};
pub use render::{render, thumbnail_size, Thumbnail};
