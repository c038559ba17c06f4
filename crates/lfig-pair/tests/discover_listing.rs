use std::fs;

use lfig_pair::{count_matching, discover_assets};
use tempfile::tempdir;

#[test]
fn listing_is_sorted_and_filtered_by_affixes() {
    let dir = tempdir().unwrap();
    for name in [
        "coalescent_tree_zeta.png",
        "coalescent_tree_alpha.png",
        "coalescent_tree_mid.png",
        "coalescent_tree_notes.txt",
        "spatial_mapping_alpha.png",
        "README.md",
    ] {
        fs::write(dir.path().join(name), b"x").unwrap();
    }
    fs::create_dir(dir.path().join("coalescent_tree_dir.png")).unwrap();

    let assets = discover_assets(dir.path(), "coalescent_tree_", ".png").unwrap();
    let ids: Vec<&str> = assets.iter().map(|asset| asset.id.as_str()).collect();
    assert_eq!(ids, ["alpha", "mid", "zeta"]);
    assert_eq!(
        assets[0].path,
        dir.path().join("coalescent_tree_alpha.png")
    );
}

#[test]
fn missing_directory_lists_nothing() {
    let dir = tempdir().unwrap();
    let assets = discover_assets(&dir.path().join("absent"), "coalescent_tree_", ".png").unwrap();
    assert!(assets.is_empty());
}

#[test]
fn empty_identifiers_are_skipped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("coalescent_tree_.png"), b"x").unwrap();
    fs::write(dir.path().join("coalescent_tree_p2.png"), b"x").unwrap();
    let assets = discover_assets(dir.path(), "coalescent_tree_", ".png").unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].id.as_str(), "p2");
}

#[test]
fn glob_metacharacters_in_directory_are_literal() {
    let root = tempdir().unwrap();
    let dir = root.path().join("run [1]");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("combined_a.png"), b"x").unwrap();
    fs::write(dir.join("combined_b.png"), b"x").unwrap();
    assert_eq!(count_matching(&dir, "combined_", ".png").unwrap(), 2);
}
