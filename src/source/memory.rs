//! In-memory pixel source.
//!
//! Holds already-decoded stacks and volumes under a path-like key. Used when
//! pixels come from somewhere other than a file and by the test suites.

use std::cell::Cell;
use std::collections::HashMap;

use tracing::debug;

use crate::address::Axis;
use crate::error::SourceError;

use super::array::{Dimensions, PixelArray};
use super::pixel::PixelSource;

/// Pixel source over arrays kept in memory.
///
/// Each key maps to a list of images: 2D planes for a stack, 3D arrays for a
/// stack of volumes. Volume reads return the whole volume and leave the cut
/// to the caller.
#[derive(Debug, Default)]
pub struct MemoryPixelSource {
    images: HashMap<String, Vec<PixelArray>>,
    reads: Cell<usize>,
}

impl MemoryPixelSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a list of images (or volumes) under `path`.
    pub fn insert(&mut self, path: impl Into<String>, images: Vec<PixelArray>) {
        self.images.insert(path.into(), images);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_images(mut self, path: impl Into<String>, images: Vec<PixelArray>) -> Self {
        self.insert(path, images);
        self
    }

    /// Number of successful `read_slice` calls so far.
    pub fn read_count(&self) -> usize {
        self.reads.get()
    }

    fn entry(&self, path: &str) -> Result<&[PixelArray], SourceError> {
        self.images
            .get(path)
            .map(Vec::as_slice)
            .ok_or_else(|| SourceError::NotFound(path.into()))
    }
}

impl PixelSource for MemoryPixelSource {
    fn dimensions(&self, path: &str) -> Result<Dimensions, SourceError> {
        let images = self.entry(path)?;
        let first = images.first().ok_or_else(|| SourceError::Decode {
            path: path.into(),
            message: "no images stored".to_string(),
        })?;

        Ok(Dimensions::new(
            first.width(),
            first.height(),
            first.depth(),
            images.len(),
        ))
    }

    fn read_slice(
        &self,
        path: &str,
        index: usize,
        axis: Axis,
        volume_index: usize,
    ) -> Result<PixelArray, SourceError> {
        let images = self.entry(path)?;

        // 2D content is addressed by stack index, volumes by volume index
        let (position, label) = if axis.is_defined() {
            (volume_index, "volume")
        } else {
            (index, "stack")
        };

        let image = images
            .get(position)
            .ok_or(SourceError::SliceOutOfRange {
                index: position,
                axis: label,
                extent: images.len(),
            })?;

        debug!(path, position, "reading in-memory {}", label);
        self.reads.set(self.reads.get() + 1);
        Ok(image.clone())
    }
}

// =============================================================================
// Tests
// =============================================================================
