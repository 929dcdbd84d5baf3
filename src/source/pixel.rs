//! PixelSource trait for codec-agnostic slice access.
//!
//! The cache and the volume model only need two things from the native image
//! codec: the dimensions of a file and the decoded pixels of one slice. This
//! trait is that seam; implementations wrap whatever decoder is available.

use crate::address::{Address, Axis};
use crate::error::SourceError;

use super::array::{Dimensions, PixelArray};

/// Decoder for image files referenced by slice addresses.
///
/// # Contract
///
/// `read_slice` receives the address components verbatim. For 2D content
/// (single images and stacks, `axis == Axis::Undefined`) it must return the
/// 2D image at `index`. For volumes it must return the whole 3D volume
/// `volume_index`, including volumes only one slice deep; the cut along
/// `axis` at `index` happens in [`read_address`](Self::read_address).
///
/// Calls are blocking and run to completion.
pub trait PixelSource {
    /// Get `(x, y, z, n)` for the file at `path`.
    fn dimensions(&self, path: &str) -> Result<Dimensions, SourceError>;

    /// Decode pixel data for one slice.
    fn read_slice(
        &self,
        path: &str,
        index: usize,
        axis: Axis,
        volume_index: usize,
    ) -> Result<PixelArray, SourceError>;

    /// Decode the 2D slice located by `address`.
    ///
    /// Volume addresses are always cut along their axis, so `index` is
    /// checked against the extent of that axis.
    fn read_address(&self, address: &Address) -> Result<PixelArray, SourceError> {
        let array = self.read_slice(
            address.path(),
            address.index(),
            address.axis(),
            address.volume_index(),
        )?;

        if address.axis().is_defined() {
            array.cut(address.axis(), address.index())
        } else {
            Ok(array)
        }
    }
}

impl<P: PixelSource + ?Sized> PixelSource for &P {
    fn dimensions(&self, path: &str) -> Result<Dimensions, SourceError> {
        (**self).dimensions(path)
    }

    fn read_slice(
        &self,
        path: &str,
        index: usize,
        axis: Axis,
        volume_index: usize,
    ) -> Result<PixelArray, SourceError> {
        (**self).read_slice(path, index, axis, volume_index)
    }
}

impl<P: PixelSource + ?Sized> PixelSource for std::rc::Rc<P> {
    fn dimensions(&self, path: &str) -> Result<Dimensions, SourceError> {
        (**self).dimensions(path)
    }

    fn read_slice(
        &self,
        path: &str,
        index: usize,
        axis: Axis,
        volume_index: usize,
    ) -> Result<PixelArray, SourceError> {
        (**self).read_slice(path, index, axis, volume_index)
    }
}
