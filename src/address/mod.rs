//! Slice addresses.
//!
//! Every renderable cell holds an address string that locates the 2D slice
//! to draw. The same string, prefixed with the requested size, is the key of
//! the thumbnail cache.
//!
//! # Example
//!
//! ```
//! use em_gallery::address::{Address, Axis, ImageType};
//!
//! let address: Address = "3@1@2@/data/vol.mrc".parse().unwrap();
//! assert_eq!(address.index(), 3);
//! assert_eq!(address.axis(), Axis::Y);
//! assert_eq!(address.volume_index(), 2);
//! assert_eq!(address.image_type(), ImageType::STACK_VOLUME);
//!
//! assert_eq!(address.to_string(), "3@1@2@/data/vol.mrc");
//! ```

mod codec;

pub use codec::{format, parse, parse_with_root, Address, Axis, ImageType, SEGMENT_SEPARATOR};
