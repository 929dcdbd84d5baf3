//! Slice address grammar.
//!
//! An address locates one 2D slice inside a single image, an image stack, a
//! volume or a stack of volumes. It is a string of `@`-separated segments
//! whose last segment is always the file path:
//!
//! ```text
//! path                                  -> SINGLE
//! index@path                            -> STACK
//! index@axis@path                       -> VOLUME
//! index@axis@volumeIndex@path           -> STACK|VOLUME
//! ```
//!
//! `axis` is `0` (X), `1` (Y) or `2` (Z). All numeric segments are base-10.

use std::fmt;
use std::ops::BitOr;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AddressError;

/// Separator between address segments.
pub const SEGMENT_SEPARATOR: char = '@';

// =============================================================================
// Axis
// =============================================================================

/// Axis of a 3D array along which slices are taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    #[default]
    Z,
    /// Only valid for single 2D images
    Undefined,
}

impl Axis {
    /// All defined axes, in code order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Integer code used in the address grammar.
    pub fn code(self) -> i64 {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
            Axis::Undefined => -1,
        }
    }

    /// Position of the axis in `(x, y, z)` order, `None` when undefined.
    pub fn index(self) -> Option<usize> {
        match self {
            Axis::X => Some(0),
            Axis::Y => Some(1),
            Axis::Z => Some(2),
            Axis::Undefined => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
            Axis::Undefined => "undefined",
        }
    }

    pub fn is_defined(self) -> bool {
        self != Axis::Undefined
    }
}

impl TryFrom<i64> for Axis {
    type Error = AddressError;

    /// Only the defined axes are accepted; `-1` is never written in an address.
    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            2 => Ok(Axis::Z),
            other => Err(AddressError::InvalidAxis(other)),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Image Type
// =============================================================================

/// Bitmask describing the container an address points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageType(u8);

impl ImageType {
    pub const SINGLE: ImageType = ImageType(0b001);
    pub const STACK: ImageType = ImageType(0b010);
    pub const VOLUME: ImageType = ImageType(0b100);
    pub const STACK_VOLUME: ImageType = ImageType(0b110);

    pub fn bits(self) -> u8 {
        self.0
    }

    /// True when every bit of `other` is set in `self`.
    pub fn contains(self, other: ImageType) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ImageType {
    type Output = ImageType;

    fn bitor(self, rhs: ImageType) -> ImageType {
        ImageType(self.0 | rhs.0)
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ImageType::SINGLE => f.write_str("SINGLE"),
            ImageType::STACK => f.write_str("STACK"),
            ImageType::VOLUME => f.write_str("VOLUME"),
            ImageType::STACK_VOLUME => f.write_str("STACK|VOLUME"),
            ImageType(bits) => write!(f, "ImageType({:#05b})", bits),
        }
    }
}

// =============================================================================
// Address
// =============================================================================

/// Location of one 2D slice.
///
/// Fields are only reachable through the constructors, which keep the
/// invariant that a 2D address has `axis == Axis::Undefined` and
/// `volume_index == 0` while a volume address always has a defined axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Address {
    index: usize,
    axis: Axis,
    volume_index: usize,
    path: String,
    image_type: ImageType,
}

impl Address {
    /// A single 2D image.
    pub fn single(path: impl Into<String>) -> Self {
        Self {
            index: 0,
            axis: Axis::Undefined,
            volume_index: 0,
            path: path.into(),
            image_type: ImageType::SINGLE,
        }
    }

    /// One image of a 2D stack.
    pub fn stack(index: usize, path: impl Into<String>) -> Self {
        Self {
            index,
            axis: Axis::Undefined,
            volume_index: 0,
            path: path.into(),
            image_type: ImageType::STACK,
        }
    }

    /// One slice along `axis` of a single volume.
    ///
    /// [`Axis::Undefined`] is replaced by [`Axis::Z`].
    pub fn volume(index: usize, axis: Axis, path: impl Into<String>) -> Self {
        Self {
            index,
            axis: volume_axis(axis),
            volume_index: 0,
            path: path.into(),
            image_type: ImageType::VOLUME,
        }
    }

    /// One slice along `axis` of volume `volume_index` in a stack of volumes.
    ///
    /// [`Axis::Undefined`] is replaced by [`Axis::Z`].
    pub fn volume_stack(
        index: usize,
        axis: Axis,
        volume_index: usize,
        path: impl Into<String>,
    ) -> Self {
        Self {
            index,
            axis: volume_axis(axis),
            volume_index,
            path: path.into(),
            image_type: ImageType::STACK_VOLUME,
        }
    }

    /// Slice index inside the stack or along the axis.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Volume index inside a stack of volumes.
    pub fn volume_index(&self) -> usize {
        self.volume_index
    }

    /// File path, always the last segment.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn image_type(&self) -> ImageType {
        self.image_type
    }

    /// True when the address points into a 3D array.
    pub fn is_volume(&self) -> bool {
        self.image_type.contains(ImageType::VOLUME)
    }

    /// Number of `@`-separated segments the address formats to.
    pub fn segment_count(&self) -> usize {
        match self.image_type {
            ImageType::SINGLE => 1,
            ImageType::STACK => 2,
            ImageType::VOLUME => 3,
            _ => 4,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.image_type {
            ImageType::SINGLE => write!(f, "{}", self.path),
            ImageType::STACK => write!(f, "{}@{}", self.index, self.path),
            ImageType::VOLUME => write!(f, "{}@{}@{}", self.index, self.axis.code(), self.path),
            _ => write!(
                f,
                "{}@{}@{}@{}",
                self.index,
                self.axis.code(),
                self.volume_index,
                self.path
            ),
        }
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

fn volume_axis(axis: Axis) -> Axis {
    if axis.is_defined() {
        axis
    } else {
        Axis::Z
    }
}

// =============================================================================
// Codec
// =============================================================================

/// Parse an address without checking that the path exists.
pub fn parse(text: &str) -> Result<Address, AddressError> {
    if text.is_empty() {
        return Err(AddressError::SegmentCount(0));
    }

    let segments: Vec<&str> = text.split(SEGMENT_SEPARATOR).collect();
    match segments.as_slice() {
        [path] => Ok(Address::single(*path)),
        [index, path] => Ok(Address::stack(parse_uint("index", index)?, *path)),
        [index, axis, path] => Ok(Address::volume(
            parse_uint("index", index)?,
            parse_axis(axis)?,
            *path,
        )),
        [index, axis, volume, path] => Ok(Address::volume_stack(
            parse_uint("index", index)?,
            parse_axis(axis)?,
            parse_uint("volume index", volume)?,
            *path,
        )),
        _ => Err(AddressError::SegmentCount(segments.len())),
    }
}

/// Parse an address and resolve its path against `root`.
///
/// With a root, a path that does not exist as written is looked up relative
/// to the root; the resolved path replaces it. If neither exists the parse
/// fails. Without a root no existence check is made.
pub fn parse_with_root(text: &str, root: Option<&Path>) -> Result<Address, AddressError> {
    let mut address = parse(text)?;

    if let Some(root) = root {
        if !Path::new(&address.path).exists() {
            let candidate = root.join(&address.path);
            if !candidate.exists() {
                return Err(AddressError::PathNotFound(candidate));
            }
            address.path = candidate.to_string_lossy().into_owned();
        }
    }

    Ok(address)
}

/// Format an address; inverse of [`parse`].
pub fn format(address: &Address) -> String {
    address.to_string()
}

fn parse_uint(field: &'static str, value: &str) -> Result<usize, AddressError> {
    value
        .parse::<usize>()
        .map_err(|_| AddressError::InvalidInteger {
            field,
            value: value.to_string(),
        })
}

fn parse_axis(value: &str) -> Result<Axis, AddressError> {
    let code = value
        .parse::<i64>()
        .map_err(|_| AddressError::InvalidInteger {
            field: "axis",
            value: value.to_string(),
        })?;
    Axis::try_from(code)
}

// =============================================================================
// Tests
// =============================================================================
