//! Test utilities for integration tests.
//!
//! This module provides pixel sources with call tracking, failing sources and
//! helpers for building tables, stacks and volumes.

use std::cell::{Cell, RefCell};

use image::{GrayImage, Luma};

use em_gallery::address::Axis;
use em_gallery::error::SourceError;
use em_gallery::source::{Dimensions, MemoryPixelSource, PixelArray, PixelSource};
use em_gallery::store::{CellValue, ColumnDescriptor, ColumnFlag, ColumnType, MemoryRowStore};

// =============================================================================
// Pixel Sources
// =============================================================================

/// A pixel source that records every slice request.
pub struct TrackingSource {
    inner: MemoryPixelSource,
    requests: RefCell<Vec<(String, usize, Axis, usize)>>,
}

impl TrackingSource {
    pub fn new(inner: MemoryPixelSource) -> Self {
        Self {
            inner,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn requests(&self) -> Vec<(String, usize, Axis, usize)> {
        self.requests.borrow().clone()
    }
}

impl PixelSource for TrackingSource {
    fn dimensions(&self, path: &str) -> Result<Dimensions, SourceError> {
        self.inner.dimensions(path)
    }

    fn read_slice(
        &self,
        path: &str,
        index: usize,
        axis: Axis,
        volume_index: usize,
    ) -> Result<PixelArray, SourceError> {
        self.requests
            .borrow_mut()
            .push((path.to_string(), index, axis, volume_index));
        self.inner.read_slice(path, index, axis, volume_index)
    }
}

/// A pixel source whose reads fail until `heal` is called.
#[derive(Default)]
pub struct FlakySource {
    inner: MemoryPixelSource,
    healed: Cell<bool>,
    attempts: Cell<usize>,
}

impl FlakySource {
    pub fn new(inner: MemoryPixelSource) -> Self {
        Self {
            inner,
            healed: Cell::new(false),
            attempts: Cell::new(0),
        }
    }

    pub fn heal(&self) {
        self.healed.set(true);
    }

    pub fn attempts(&self) -> usize {
        self.attempts.get()
    }
}

impl PixelSource for FlakySource {
    fn dimensions(&self, path: &str) -> Result<Dimensions, SourceError> {
        self.inner.dimensions(path)
    }

    fn read_slice(
        &self,
        path: &str,
        index: usize,
        axis: Axis,
        volume_index: usize,
    ) -> Result<PixelArray, SourceError> {
        self.attempts.set(self.attempts.get() + 1);
        if !self.healed.get() {
            return Err(SourceError::Decode {
                path: path.into(),
                message: "simulated codec failure".to_string(),
            });
        }
        self.inner.read_slice(path, index, axis, volume_index)
    }
}

// =============================================================================
// Pixel Data
// =============================================================================

/// A `width x height` image whose value grows left to right, offset by `seed`.
pub fn gradient(width: usize, height: usize, seed: f32) -> PixelArray {
    let values = (0..height)
        .flat_map(|_| (0..width).map(move |x| seed + x as f32))
        .collect();
    PixelArray::from_2d(width, height, values).unwrap()
}

/// A volume where each voxel holds `z * 10000 + y * 100 + x`.
pub fn coordinate_volume(width: usize, height: usize, depth: usize) -> PixelArray {
    let mut values = Vec::with_capacity(width * height * depth);
    for z in 0..depth {
        for y in 0..height {
            for x in 0..width {
                values.push((z * 10000 + y * 100 + x) as f32);
            }
        }
    }
    PixelArray::from_3d(width, height, depth, values).unwrap()
}

/// A stack of `count` gradient images under `path`.
pub fn stack_source(path: &str, count: usize, width: usize, height: usize) -> MemoryPixelSource {
    let images = (0..count)
        .map(|i| gradient(width, height, i as f32))
        .collect();
    MemoryPixelSource::new().with_images(path, images)
}

/// A gray PNG written with the `image` crate.
pub fn gray_png(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([((x + y) % 256) as u8]))
}

// =============================================================================
// Tables
// =============================================================================

/// Columns of a particle table: id, micrograph address, defocus, selected.
pub fn particle_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("id", ColumnType::Int),
        ColumnDescriptor::new("image", ColumnType::String).with_renderable(ColumnFlag::new(true)),
        ColumnDescriptor::new("defocus", ColumnType::Float).with_editable(ColumnFlag::new(true)),
        ColumnDescriptor::new("enabled", ColumnType::Bool).with_editable(ColumnFlag::new(true)),
    ]
}

/// A particle table of `rows` rows referencing `particles.mrcs`.
pub fn particle_store(rows: usize) -> MemoryRowStore {
    let rows = (0..rows)
        .map(|i| {
            vec![
                CellValue::Int(i as i64),
                CellValue::Text(format!("{}@particles.mrcs", i)),
                CellValue::Float(10000.0 + (i % 7) as f64 * 250.0),
                CellValue::Bool(i % 3 != 0),
            ]
        })
        .collect();
    MemoryRowStore::with_rows(particle_columns(), rows)
}
