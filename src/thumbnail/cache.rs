//! Thumbnail cache keyed by slice address.
//!
//! This module provides an LRU cache of rendered thumbnails so scrolling back
//! to a page does not decode its slices again.
//!
//! # Cache Key
//!
//! Entries are keyed by the slice address and the requested size; the same
//! slice rendered at two sizes is two entries. The string form of a key is
//! the formatted address prefixed with the size, e.g. `128x128:3@2@vol.mrc`.
//!
//! # Eviction
//!
//! The cache holds at most `capacity` entries. Inserting into a full cache
//! evicts exactly one entry, the least recently used.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use lru::LruCache;
use serde::Serialize;
use tracing::debug;

use crate::address::{self, Address};
use crate::config::CacheConfig;
use crate::error::ThumbnailError;
use crate::source::PixelSource;

use super::render::{render, Thumbnail};

// =============================================================================
// Cache Key
// =============================================================================

/// Cache key: one slice at one requested size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThumbnailKey {
    pub address: Address,

    /// `(max_width, max_height)`, `None` for full size
    pub size: Option<(u32, u32)>,
}

impl ThumbnailKey {
    pub fn new(address: Address, size: Option<(u32, u32)>) -> Self {
        Self { address, size }
    }
}

impl fmt::Display for ThumbnailKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.size {
            Some((w, h)) => write!(f, "{}x{}:{}", w, h, address::format(&self.address)),
            None => f.write_str(&address::format(&self.address)),
        }
    }
}

/// Counters describing cache behaviour since creation or the last clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub len: usize,
    pub capacity: usize,
}

// =============================================================================
// Thumbnail Cache
// =============================================================================

/// Bounded LRU cache of rendered thumbnails backed by a [`PixelSource`].
///
/// # Example
///
/// ```
/// use em_gallery::address::Address;
/// use em_gallery::config::CacheConfig;
/// use em_gallery::source::{MemoryPixelSource, PixelArray};
/// use em_gallery::thumbnail::ThumbnailCache;
///
/// let image = PixelArray::from_2d(800, 600, vec![0.0; 800 * 600]).unwrap();
/// let source = MemoryPixelSource::new().with_images("stack", vec![image]);
/// let mut cache = ThumbnailCache::new(source, CacheConfig::new(16, None).unwrap());
///
/// let address = Address::stack(0, "stack");
/// let thumb = cache.get_or_create(&address, Some((100, 100))).unwrap();
/// assert_eq!(thumb.dimensions(), (100, 75));
/// assert!(cache.get(&address, Some((100, 100))).is_some());
/// ```
pub struct ThumbnailCache<P: PixelSource> {
    /// Decoder used on cache misses
    source: P,

    /// The underlying LRU map
    cache: LruCache<ThumbnailKey, Thumbnail>,

    /// Maximum number of entries
    capacity: NonZeroUsize,

    /// Size used by [`get_or_create_default`](Self::get_or_create_default)
    default_size: Option<(u32, u32)>,

    /// Directory relative paths are resolved against
    root: Option<PathBuf>,

    stats: CacheStats,
}

impl<P: PixelSource> ThumbnailCache<P> {
    pub fn new(source: P, config: CacheConfig) -> Self {
        Self {
            source,
            cache: LruCache::new(config.capacity()),
            capacity: config.capacity(),
            default_size: config.target_size(),
            root: None,
            stats: CacheStats::default(),
        }
    }

    /// Resolve relative address paths against `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    /// Look up a thumbnail without decoding anything.
    ///
    /// Marks the entry as recently used.
    pub fn get(&mut self, address: &Address, size: Option<(u32, u32)>) -> Option<Thumbnail> {
        let key = ThumbnailKey::new(address.clone(), size);
        self.cache.get(&key).cloned()
    }

    /// Check for an entry without updating LRU order.
    pub fn contains(&self, address: &Address, size: Option<(u32, u32)>) -> bool {
        self.cache
            .contains(&ThumbnailKey::new(address.clone(), size))
    }

    /// Return the cached thumbnail or decode, render and cache it.
    ///
    /// # Errors
    ///
    /// Decode failures from the pixel source are returned as-is; nothing is
    /// cached for a failed address. A size with a zero dimension is rejected
    /// with [`ThumbnailError::InvalidSize`] before anything is decoded.
    pub fn get_or_create(
        &mut self,
        address: &Address,
        size: Option<(u32, u32)>,
    ) -> Result<Thumbnail, ThumbnailError> {
        if let Some((width, height)) = size {
            if width == 0 || height == 0 {
                return Err(ThumbnailError::InvalidSize { width, height });
            }
        }

        let key = ThumbnailKey::new(address.clone(), size);

        if let Some(thumbnail) = self.cache.get(&key) {
            self.stats.hits += 1;
            return Ok(thumbnail.clone());
        }

        self.stats.misses += 1;
        debug!(key = %key, "thumbnail cache miss");

        let slice = self.source.read_address(address)?;
        let thumbnail = render(&slice, size, &key.to_string())?;

        self.put(key, thumbnail.clone());
        Ok(thumbnail)
    }

    /// [`get_or_create`](Self::get_or_create) at the configured default size.
    pub fn get_or_create_default(&mut self, address: &Address) -> Result<Thumbnail, ThumbnailError> {
        self.get_or_create(address, self.default_size)
    }

    /// Parse `text` (resolving against the cache root) and fetch its thumbnail.
    pub fn get_or_create_text(
        &mut self,
        text: &str,
        size: Option<(u32, u32)>,
    ) -> Result<Thumbnail, ThumbnailError> {
        let address = address::parse_with_root(text, self.root.as_deref())?;
        self.get_or_create(&address, size)
    }

    /// Store a thumbnail, evicting the least recently used entry when full.
    pub fn put(&mut self, key: ThumbnailKey, thumbnail: Thumbnail) {
        if !self.cache.contains(&key) && self.cache.len() >= self.capacity.get() {
            if let Some((evicted, _)) = self.cache.pop_lru() {
                self.stats.evictions += 1;
                debug!(key = %evicted, "evicted thumbnail");
            }
        }
        self.cache.put(key, thumbnail);
    }

    pub fn remove(&mut self, address: &Address, size: Option<(u32, u32)>) -> Option<Thumbnail> {
        self.cache.pop(&ThumbnailKey::new(address.clone(), size))
    }

    /// Drop every entry whose address points into `path`, at any size.
    ///
    /// Returns the number of entries removed. O(n) in the cache size.
    pub fn invalidate_path(&mut self, path: &str) -> usize {
        let stale: Vec<ThumbnailKey> = self
            .cache
            .iter()
            .filter(|(key, _)| key.address.path() == path)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale {
            self.cache.pop(key);
        }
        if !stale.is_empty() {
            debug!(path, removed = stale.len(), "invalidated thumbnails");
        }
        stale.len()
    }

    /// Remove all entries and reset the counters.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.stats = CacheStats::default();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            len: self.cache.len(),
            capacity: self.capacity.get(),
            ..self.stats
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
