//! Pixel source layer.
//!
//! Decoding is delegated to a codec behind the [`PixelSource`] trait. The
//! rest of the crate only sees [`Dimensions`] and [`PixelArray`].
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │     ThumbnailCache / VolumeAxisModel    │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │          PixelSource Trait              │
//! └────────────────────┬────────────────────┘
//!          ┌───────────┴───────────┐
//!          ▼                       ▼
//! ┌─────────────────┐    ┌─────────────────────┐
//! │ ImageFileSource │    │ MemoryPixelSource   │
//! │ (image crate)   │    │ (decoded arrays)    │
//! └─────────────────┘    └─────────────────────┘
//! ```

mod array;
mod image_file;
mod memory;
mod pixel;

pub use array::{Dimensions, PixelArray};
pub use image_file::ImageFileSource;
pub use memory::MemoryPixelSource;
pub use pixel::PixelSource;
