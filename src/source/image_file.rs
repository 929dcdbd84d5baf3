//! Pixel source backed by the `image` crate.
//!
//! Handles ordinary 2D files (PNG, JPEG, TIFF). Every file is one image, so
//! only single addresses, stack index 0 and volume 0 resolve.

use std::path::Path;

use image::ImageReader;
use tracing::debug;

use crate::address::Axis;
use crate::error::SourceError;

use super::array::{Dimensions, PixelArray};
use super::pixel::PixelSource;

/// Decodes 2D image files from the local filesystem as grayscale.
#[derive(Debug, Clone, Default)]
pub struct ImageFileSource {}

impl ImageFileSource {
    pub fn new() -> Self {
        Self {}
    }

    fn open(&self, path: &str) -> Result<ImageReader<std::io::BufReader<std::fs::File>>, SourceError> {
        if !Path::new(path).exists() {
            return Err(SourceError::NotFound(path.into()));
        }

        ImageReader::open(path)
            .map_err(|e| SourceError::Io(e.to_string()))?
            .with_guessed_format()
            .map_err(|e| SourceError::Io(e.to_string()))
    }
}

impl PixelSource for ImageFileSource {
    fn dimensions(&self, path: &str) -> Result<Dimensions, SourceError> {
        let (width, height) =
            self.open(path)?
                .into_dimensions()
                .map_err(|e| SourceError::Decode {
                    path: path.into(),
                    message: e.to_string(),
                })?;

        Ok(Dimensions::new(width as usize, height as usize, 1, 1))
    }

    fn read_slice(
        &self,
        path: &str,
        index: usize,
        axis: Axis,
        volume_index: usize,
    ) -> Result<PixelArray, SourceError> {
        // A volume address treats the file as one volume a single slice deep
        if !axis.is_defined() && index > 0 {
            return Err(SourceError::SliceOutOfRange {
                index,
                axis: "stack",
                extent: 1,
            });
        }
        if volume_index > 0 {
            return Err(SourceError::SliceOutOfRange {
                index: volume_index,
                axis: "volume",
                extent: 1,
            });
        }

        debug!(path, "decoding image file");

        let img = self.open(path)?.decode().map_err(|e| SourceError::Decode {
            path: path.into(),
            message: e.to_string(),
        })?;

        let luma = img.to_luma32f();
        let (width, height) = luma.dimensions();
        PixelArray::from_2d(width as usize, height as usize, luma.into_raw())
    }
}

// =============================================================================
// Tests
// =============================================================================
