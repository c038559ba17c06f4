use std::path::Path;

use lfig_core::{codes, compose_name, extract_id, AssetId, AssetRef};
use proptest::prelude::*;

#[test]
fn extracts_token_between_affixes() {
    let id = extract_id("coalescent_tree_3f2a-77.png", "coalescent_tree_", ".png").unwrap();
    assert_eq!(id.as_str(), "3f2a-77");
}

#[test]
fn rejects_missing_prefix() {
    let err = extract_id("spatial_mapping_abc.png", "coalescent_tree_", ".png").unwrap_err();
    assert!(err.is(codes::MALFORMED_NAME));
    assert_eq!(
        err.info().context.get("filename").map(String::as_str),
        Some("spatial_mapping_abc.png")
    );
}

#[test]
fn rejects_missing_suffix() {
    let err = extract_id("coalescent_tree_abc.jpg", "coalescent_tree_", ".png").unwrap_err();
    assert!(err.is(codes::MALFORMED_NAME));
}

#[test]
fn rejects_overlapping_affixes() {
    assert!(extract_id("ab", "ab", "b").is_err());
    assert!(extract_id("tree_.png", "tree_", ".png").is_err());
}

#[test]
fn asset_ref_uses_filename_only() {
    let asset = AssetRef::from_path(
        Path::new("/data/coalescent_tree_x/coalescent_tree_p1.png"),
        "coalescent_tree_",
        ".png",
    )
    .unwrap();
    assert_eq!(asset.id, AssetId::new("p1"));
}

proptest! {
    #[test]
    fn extraction_recovers_composed_token(token in "[A-Za-z0-9_-]{1,40}") {
        let id = AssetId::new(token.clone());
        let name = compose_name("coalescent_tree_", &id, ".png");
        let recovered = extract_id(&name, "coalescent_tree_", ".png").unwrap();
        prop_assert_eq!(recovered.as_str(), token.as_str());
    }
}
