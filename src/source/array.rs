//! Numeric pixel arrays and dimension metadata.

use ndarray::{Array2, Array3, Axis as NdAxis};
use serde::Serialize;

use crate::address::Axis;
use crate::error::SourceError;

/// Dimensions of an image file: `x` columns, `y` rows, `z` slices per
/// volume and `n` images or volumes in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    pub x: usize,
    pub y: usize,
    pub z: usize,
    pub n: usize,
}

impl Dimensions {
    pub fn new(x: usize, y: usize, z: usize, n: usize) -> Self {
        Self { x, y, z, n }
    }

    /// Number of slices along `axis`; zero for [`Axis::Undefined`].
    pub fn extent(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
            Axis::Undefined => 0,
        }
    }

    /// True when the file holds 3D data.
    pub fn is_volume(&self) -> bool {
        self.z > 1
    }
}

/// A decoded 2D or 3D array of intensities, stored `[z, y, x]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelArray {
    data: Array3<f32>,
}

impl PixelArray {
    /// Wrap a `[z, y, x]` array.
    pub fn new(data: Array3<f32>) -> Self {
        Self { data }
    }

    /// Build a 2D array from row-major values.
    pub fn from_2d(width: usize, height: usize, values: Vec<f32>) -> Result<Self, SourceError> {
        let plane = Array2::from_shape_vec((height, width), values).map_err(|e| {
            SourceError::Io(format!("invalid {}x{} pixel buffer: {}", width, height, e))
        })?;
        Ok(Self {
            data: plane.insert_axis(NdAxis(0)),
        })
    }

    /// Build a 3D array from values ordered slice by slice, row by row.
    pub fn from_3d(
        width: usize,
        height: usize,
        depth: usize,
        values: Vec<f32>,
    ) -> Result<Self, SourceError> {
        let data = Array3::from_shape_vec((depth, height, width), values).map_err(|e| {
            SourceError::Io(format!(
                "invalid {}x{}x{} voxel buffer: {}",
                width, height, depth, e
            ))
        })?;
        Ok(Self { data })
    }

    pub fn width(&self) -> usize {
        self.data.dim().2
    }

    pub fn height(&self) -> usize {
        self.data.dim().1
    }

    pub fn depth(&self) -> usize {
        self.data.dim().0
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }

    /// Extract the 2D plane at `index` along `axis`.
    ///
    /// Z planes are `x` by `y`, Y planes are `x` by `z` and X planes are `y`
    /// by `z`. An undefined axis selects the Z plane at `index`.
    pub fn cut(&self, axis: Axis, index: usize) -> Result<PixelArray, SourceError> {
        // ndarray axis for [z, y, x] storage
        let nd_axis = match axis {
            Axis::X => 2,
            Axis::Y => 1,
            Axis::Z | Axis::Undefined => 0,
        };
        let extent = self.data.len_of(NdAxis(nd_axis));
        if index >= extent {
            return Err(SourceError::SliceOutOfRange {
                index,
                axis: axis.name(),
                extent,
            });
        }

        let plane = self.data.index_axis(NdAxis(nd_axis), index).to_owned();
        Ok(Self {
            data: plane.insert_axis(NdAxis(0)),
        })
    }

    /// Smallest and largest finite values, `None` when there are none.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None::<(f32, f32)>, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Values of the first plane in row-major order.
    pub fn plane_values(&self) -> impl Iterator<Item = f32> + '_ {
        self.data.index_axis(NdAxis(0), 0).into_iter().copied()
    }
}

// =============================================================================
// Tests
// =============================================================================
