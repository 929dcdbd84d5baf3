//! Volume model integration tests.
//!
//! Tests verify:
//! - Row count follows the selected axis
//! - Slice cells resolve to thumbnails of the right plane
//! - Volume index changes reload the window

use std::cell::RefCell;
use std::rc::Rc;

use em_gallery::address::{parse, Axis};
use em_gallery::config::{CacheConfig, PagingConfig};
use em_gallery::model::{EventKind, ModelEvent, PagedModel, VolumeAxisModel, SLICE_COLUMN};
use em_gallery::source::{Dimensions, MemoryPixelSource};
use em_gallery::store::CellValue;
use em_gallery::thumbnail::ThumbnailCache;

use super::test_utils::{coordinate_volume, TrackingSource};

fn tomogram_source() -> TrackingSource {
    TrackingSource::new(MemoryPixelSource::new().with_images(
        "tomograms.mrcs",
        vec![coordinate_volume(12, 10, 8), coordinate_volume(12, 10, 8)],
    ))
}

#[test]
fn test_set_axis_z_on_64x64x32() {
    let mut model = VolumeAxisModel::with_dimensions(
        "/data/tomo.mrc",
        Dimensions::new(64, 64, 32, 1),
        Axis::X,
        PagingConfig::new(10).unwrap(),
    );
    model.load_page(3, false);

    assert!(model.set_axis(Axis::Z));
    assert_eq!(model.total(), 32);
    assert_eq!(model.page(), 0);
}

#[test]
fn test_dimensions_from_source() {
    let source = tomogram_source();
    let model = VolumeAxisModel::new(
        &source,
        "tomograms.mrcs",
        Axis::Y,
        PagingConfig::new(4).unwrap(),
    )
    .unwrap();

    assert_eq!(model.dimensions(), Dimensions::new(12, 10, 8, 2));
    assert_eq!(model.total(), 10);
    assert_eq!(model.page_count(), 3);
    assert_eq!(model.volume_count(), 2);
    // Reading dimensions does not decode pixels
    assert_eq!(source.request_count(), 0);
}

#[test]
fn test_slice_cells_render_through_cache() {
    let source = tomogram_source();
    let mut model = VolumeAxisModel::new(
        &source,
        "tomograms.mrcs",
        Axis::X,
        PagingConfig::new(5).unwrap(),
    )
    .unwrap();
    model.set_volume_index(1);

    let mut cache = ThumbnailCache::new(&source, CacheConfig::new(32, None).unwrap());
    for row in model.paging().current_range() {
        let CellValue::Text(text) = model.cell(row, SLICE_COLUMN) else {
            panic!("slice cell is not text");
        };
        let address = parse(&text).unwrap();
        assert_eq!(address.axis(), Axis::X);
        assert_eq!(address.volume_index(), 1);

        let thumbnail = cache.get_or_create(&address, None).unwrap();
        // X planes are y by z
        assert_eq!(thumbnail.dimensions(), (10, 8));
    }

    let requests = source.requests();
    assert_eq!(requests.len(), 5);
    assert!(requests.iter().all(|(_, _, axis, volume)| *axis == Axis::X && *volume == 1));
}

#[test]
fn test_volume_index_events_and_reload() {
    let mut model = VolumeAxisModel::with_dimensions(
        "stack.mrcs",
        Dimensions::new(16, 16, 16, 3),
        Axis::Z,
        PagingConfig::new(8).unwrap(),
    );
    model.load_page(1, false);

    let events = Rc::new(RefCell::new(Vec::new()));
    for kind in [EventKind::VolumeIndexChanged, EventKind::PageChanged] {
        let sink = Rc::clone(&events);
        model
            .observers()
            .subscribe(kind, move |e| sink.borrow_mut().push(*e));
    }

    model.set_volume_index(2);
    assert_eq!(
        *events.borrow(),
        vec![
            ModelEvent::VolumeIndexChanged { index: 2 },
            ModelEvent::PageChanged { page: 1 },
        ]
    );
    assert_eq!(
        model.window()[0][SLICE_COLUMN],
        CellValue::Text("8@2@2@stack.mrcs".to_string())
    );

    // Out of range falls back to the first volume
    model.set_volume_index(9);
    assert_eq!(model.volume_index(), 0);
}
