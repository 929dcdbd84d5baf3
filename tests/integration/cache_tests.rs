//! Thumbnail cache integration tests.
//!
//! Tests verify:
//! - The cache never holds more than its capacity
//! - Thumbnails keep their aspect ratio and never upscale
//! - Cache hits do not touch the pixel source
//! - Failed decodes are not cached
//! - Volume slices are cut along the requested axis

use proptest::prelude::*;

use em_gallery::address::{Address, Axis};
use em_gallery::config::CacheConfig;
use em_gallery::error::{SourceError, ThumbnailError};
use em_gallery::source::{ImageFileSource, MemoryPixelSource, PixelSource};
use em_gallery::thumbnail::{thumbnail_size, ThumbnailCache};

use super::test_utils::{
    coordinate_volume, gray_png, stack_source, FlakySource, TrackingSource,
};

// =============================================================================
// Capacity
// =============================================================================

proptest! {
    #[test]
    fn test_capacity_bound(capacity in 1usize..8, requests in prop::collection::vec(0usize..20, 1..60)) {
        let source = stack_source("stack.mrcs", 20, 8, 8);
        let mut cache = ThumbnailCache::new(source, CacheConfig::new(capacity, None).unwrap());

        for index in requests {
            cache.get_or_create(&Address::stack(index, "stack.mrcs"), None).unwrap();
            prop_assert!(cache.len() <= capacity);
        }
    }

    #[test]
    fn test_never_upscales(
        width in 1u32..4000,
        height in 1u32..4000,
        max_width in 1u32..512,
        max_height in 1u32..512,
    ) {
        let (w, h) = thumbnail_size((width, height), (max_width, max_height));
        prop_assert!(w <= width && h <= height);
        prop_assert!(w >= 1 && h >= 1);
    }
}

#[test]
fn test_lru_eviction_order() {
    let source = TrackingSource::new(stack_source("stack.mrcs", 4, 8, 8));
    let mut cache = ThumbnailCache::new(source, CacheConfig::new(2, None).unwrap());
    let a = Address::stack(0, "stack.mrcs");
    let b = Address::stack(1, "stack.mrcs");
    let c = Address::stack(2, "stack.mrcs");

    cache.get_or_create(&a, None).unwrap();
    cache.get_or_create(&b, None).unwrap();
    // Touch a so b is least recently used
    cache.get_or_create(&a, None).unwrap();
    cache.get_or_create(&c, None).unwrap();

    assert!(cache.contains(&a, None));
    assert!(!cache.contains(&b, None));
    assert!(cache.contains(&c, None));
    assert_eq!(cache.stats().evictions, 1);
    assert_eq!(cache.source().request_count(), 3);
}

// =============================================================================
// Sizing
// =============================================================================

#[test]
fn test_800x600_into_100x100() {
    let source = stack_source("micrographs.mrcs", 1, 800, 600);
    let mut cache = ThumbnailCache::new(source, CacheConfig::new(4, None).unwrap());

    let thumbnail = cache
        .get_or_create(&Address::stack(0, "micrographs.mrcs"), Some((100, 100)))
        .unwrap();
    assert_eq!(thumbnail.dimensions(), (100, 75));
}

#[test]
fn test_small_image_kept_at_full_size() {
    let source = stack_source("small.mrcs", 1, 40, 30);
    let mut cache = ThumbnailCache::new(source, CacheConfig::new(4, None).unwrap());

    let thumbnail = cache
        .get_or_create(&Address::stack(0, "small.mrcs"), Some((100, 100)))
        .unwrap();
    assert_eq!(thumbnail.dimensions(), (40, 30));
}

#[test]
fn test_sizes_are_distinct_entries() {
    let source = TrackingSource::new(stack_source("stack.mrcs", 1, 64, 64));
    let mut cache = ThumbnailCache::new(source, CacheConfig::new(8, None).unwrap());
    let address = Address::stack(0, "stack.mrcs");

    cache.get_or_create(&address, Some((32, 32))).unwrap();
    cache.get_or_create(&address, Some((16, 16))).unwrap();
    cache.get_or_create(&address, Some((32, 32))).unwrap();

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.source().request_count(), 2);
    assert_eq!(cache.stats().hits, 1);
}

#[test]
fn test_default_size_from_config() {
    let source = stack_source("stack.mrcs", 1, 256, 128);
    let mut cache = ThumbnailCache::new(source, CacheConfig::default());

    let thumbnail = cache
        .get_or_create_default(&Address::stack(0, "stack.mrcs"))
        .unwrap();
    assert_eq!(thumbnail.dimensions(), (128, 64));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_failed_decode_not_cached() {
    let source = FlakySource::new(stack_source("stack.mrcs", 1, 8, 8));
    let mut cache = ThumbnailCache::new(source, CacheConfig::new(4, None).unwrap());
    let address = Address::stack(0, "stack.mrcs");

    let result = cache.get_or_create(&address, None);
    assert!(matches!(
        result,
        Err(ThumbnailError::Source(SourceError::Decode { .. }))
    ));
    assert!(cache.is_empty());

    cache.source().heal();
    assert!(cache.get_or_create(&address, None).is_ok());
    assert_eq!(cache.source().attempts(), 2);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_zero_size_rejected_before_decode() {
    let source = TrackingSource::new(stack_source("stack.mrcs", 2, 8, 8));
    let mut cache = ThumbnailCache::new(source, CacheConfig::new(4, None).unwrap());
    let address = Address::stack(0, "stack.mrcs");

    for size in [(0, 0), (0, 32), (32, 0)] {
        assert!(matches!(
            cache.get_or_create(&address, Some(size)),
            Err(ThumbnailError::InvalidSize { .. })
        ));
    }
    assert!(cache.is_empty());
    assert_eq!(cache.source().request_count(), 0);
}

#[test]
fn test_missing_file_propagates() {
    let mut cache = ThumbnailCache::new(MemoryPixelSource::new(), CacheConfig::new(4, None).unwrap());
    let result = cache.get_or_create(&Address::single("nowhere.mrc"), None);
    assert!(matches!(
        result,
        Err(ThumbnailError::Source(SourceError::NotFound(_)))
    ));
}

// =============================================================================
// Volumes
// =============================================================================

#[test]
fn test_volume_slices_cut_along_axis() {
    let source = TrackingSource::new(
        MemoryPixelSource::new().with_images("tomo.mrc", vec![coordinate_volume(6, 5, 4)]),
    );
    let mut cache = ThumbnailCache::new(source, CacheConfig::new(8, None).unwrap());

    let z = cache
        .get_or_create(&Address::volume(2, Axis::Z, "tomo.mrc"), None)
        .unwrap();
    assert_eq!(z.dimensions(), (6, 5));

    let x = cache
        .get_or_create(&Address::volume(1, Axis::X, "tomo.mrc"), None)
        .unwrap();
    assert_eq!(x.dimensions(), (5, 4));

    let y = cache
        .get_or_create(&Address::volume(3, Axis::Y, "tomo.mrc"), None)
        .unwrap();
    assert_eq!(y.dimensions(), (6, 4));

    let requests = cache.source().requests();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|(path, _, _, volume)| path == "tomo.mrc" && *volume == 0));
}

#[test]
fn test_single_slice_volume_cut_along_axis() {
    // 4 wide, 3 high, one slice deep
    let source = MemoryPixelSource::new().with_images("thin.mrc", vec![coordinate_volume(4, 3, 1)]);

    let x = source
        .read_address(&Address::volume(2, Axis::X, "thin.mrc"))
        .unwrap();
    assert_eq!((x.width(), x.height(), x.depth()), (3, 1, 1));
    assert_eq!(x.plane_values().collect::<Vec<_>>(), vec![2.0, 102.0, 202.0]);

    let y = source
        .read_address(&Address::volume(1, Axis::Y, "thin.mrc"))
        .unwrap();
    assert_eq!((y.width(), y.height()), (4, 1));

    assert!(matches!(
        source.read_address(&Address::volume(99, Axis::Z, "thin.mrc")),
        Err(SourceError::SliceOutOfRange { index: 99, .. })
    ));
    assert!(matches!(
        source.read_address(&Address::volume(4, Axis::X, "thin.mrc")),
        Err(SourceError::SliceOutOfRange { index: 4, .. })
    ));

    let mut cache = ThumbnailCache::new(source, CacheConfig::new(8, None).unwrap());
    let thumbnail = cache
        .get_or_create(&Address::volume(0, Axis::X, "thin.mrc"), None)
        .unwrap();
    assert_eq!(thumbnail.dimensions(), (3, 1));
    assert!(cache
        .get_or_create(&Address::volume(1, Axis::Z, "thin.mrc"), None)
        .is_err());
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_slice_out_of_range() {
    let source = MemoryPixelSource::new().with_images("tomo.mrc", vec![coordinate_volume(6, 5, 4)]);
    let mut cache = ThumbnailCache::new(source, CacheConfig::new(8, None).unwrap());

    let result = cache.get_or_create(&Address::volume(4, Axis::Z, "tomo.mrc"), None);
    assert!(matches!(
        result,
        Err(ThumbnailError::Source(SourceError::SliceOutOfRange { .. }))
    ));
}

#[test]
fn test_invalidate_path() {
    let source = stack_source("a.mrcs", 3, 8, 8);
    let mut cache = ThumbnailCache::new(source, CacheConfig::new(16, None).unwrap());
    for index in 0..3 {
        cache.get_or_create(&Address::stack(index, "a.mrcs"), None).unwrap();
        cache
            .get_or_create(&Address::stack(index, "a.mrcs"), Some((4, 4)))
            .unwrap();
    }
    assert_eq!(cache.len(), 6);
    assert_eq!(cache.invalidate_path("a.mrcs"), 6);
    assert!(cache.is_empty());
}

// =============================================================================
// Image Files
// =============================================================================

#[test]
fn test_png_through_root() {
    let dir = tempfile::tempdir().unwrap();
    gray_png(200, 50).save(dir.path().join("preview.png")).unwrap();

    let mut cache = ThumbnailCache::new(ImageFileSource::new(), CacheConfig::new(4, None).unwrap())
        .with_root(dir.path());

    let thumbnail = cache
        .get_or_create_text("preview.png", Some((100, 100)))
        .unwrap();
    assert_eq!(thumbnail.dimensions(), (100, 25));
    assert_eq!(thumbnail.to_gray_image().unwrap().dimensions(), (100, 25));
}
