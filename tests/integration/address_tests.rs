//! Address codec integration tests.
//!
//! Tests verify:
//! - Round-trip law for every image type
//! - Exact parsing of the four address forms
//! - Root-relative path resolution against real files

use std::fs;

use proptest::prelude::*;

use em_gallery::address::{format, parse, parse_with_root, Address, Axis, ImageType};
use em_gallery::error::AddressError;

// =============================================================================
// Generators
// =============================================================================

/// Paths never contain the separator.
fn arb_path() -> impl Strategy<Value = String> {
    r"(/[a-z0-9_]{1,8}){1,4}\.(mrc|mrcs|tif|png|spi)"
}

fn arb_axis() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::X), Just(Axis::Y), Just(Axis::Z)]
}

fn arb_address() -> impl Strategy<Value = Address> {
    prop_oneof![
        arb_path().prop_map(Address::single),
        (0usize..100_000, arb_path()).prop_map(|(i, p)| Address::stack(i, p)),
        (0usize..4096, arb_axis(), arb_path()).prop_map(|(i, a, p)| Address::volume(i, a, p)),
        (0usize..4096, arb_axis(), 0usize..512, arb_path())
            .prop_map(|(i, a, v, p)| Address::volume_stack(i, a, v, p)),
    ]
}

proptest! {
    #[test]
    fn test_round_trip(address in arb_address()) {
        let text = format(&address);
        prop_assert_eq!(parse(&text), Ok(address.clone()));
        prop_assert_eq!(text.split('@').count(), address.segment_count());
    }

    #[test]
    fn test_non_numeric_index_rejected(word in "[a-z]{1,10}", path in arb_path()) {
        let text = format!("{}@{}", word, path);
        let is_integer_error = matches!(
            parse(&text),
            Err(AddressError::InvalidInteger { .. })
        );
        prop_assert!(is_integer_error);
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_parse_stack_volume() {
    let address = parse("3@1@2@/data/vol.mrc").unwrap();
    assert_eq!(address.index(), 3);
    assert_eq!(address.axis(), Axis::Y);
    assert_eq!(address.volume_index(), 2);
    assert_eq!(address.path(), "/data/vol.mrc");
    assert_eq!(address.image_type(), ImageType::STACK | ImageType::VOLUME);
}

#[test]
fn test_parse_failures_are_whole() {
    assert!(parse("notanumber@/data/x.mrc").is_err());
    assert!(parse("1@7@/data/x.mrc").is_err());
    assert!(parse("1@-1@/data/x.mrc").is_err());
    assert!(parse("1@2@3@4@/data/x.mrc").is_err());
    assert!(parse("").is_err());

    // Callers that only care whether a cell is renderable
    assert!(parse("1@x@/data/x.mrc").ok().is_none());
}

#[test]
fn test_single_has_undefined_axis() {
    let address = parse("/data/micrograph.mrc").unwrap();
    assert_eq!(address.axis(), Axis::Undefined);
    assert_eq!(address.volume_index(), 0);
    assert_eq!(address.image_type(), ImageType::SINGLE);
}

// =============================================================================
// Root Resolution
// =============================================================================

#[test]
fn test_root_resolution() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("Runs")).unwrap();
    fs::write(dir.path().join("Runs/particles.mrcs"), b"").unwrap();

    let address = parse_with_root("12@Runs/particles.mrcs", Some(dir.path())).unwrap();
    assert_eq!(address.index(), 12);
    assert_eq!(
        address.path(),
        dir.path().join("Runs/particles.mrcs").to_string_lossy()
    );

    let missing = parse_with_root("12@Runs/missing.mrcs", Some(dir.path()));
    assert!(matches!(missing, Err(AddressError::PathNotFound(_))));
}

#[test]
fn test_existing_path_not_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("volume.mrc");
    fs::write(&file, b"").unwrap();
    let absolute = file.to_string_lossy().into_owned();

    let other_root = tempfile::tempdir().unwrap();
    let text = format!("0@2@{}", absolute);
    let address = parse_with_root(&text, Some(other_root.path())).unwrap();
    assert_eq!(address.path(), absolute);
}
