use super::*;

fn temp_layer_root(label: &str) -> std::path::PathBuf {
    let root = std::env::temp_dir().join(format!(
        "layerforge_scan_{label}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&root).unwrap();
    root
}

fn touch(path: &std::path::Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"").unwrap();
}

#[test]
fn scan_indexes_type_bucket_and_file() {
    let root = temp_layer_root("basic");
    touch(&root.join("background/common/red.png"));
    touch(&root.join("background/common/blue.png"));
    touch(&root.join("hat/rare/crown__gold.png"));

    let catalog = scan_layer_directory(&root).unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.traits_for("background", "common").len(), 2);

    let crown = catalog.find("hat", "rare", "crown").unwrap();
    assert_eq!(crown.file_name, "crown__gold.png");
    assert_eq!(crown.labels, ["gold"]);
    assert_eq!(crown.trait_type, "hat");
    assert_eq!(crown.rarity, "rare");

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn scan_skips_non_image_files_and_wrong_depth() {
    let root = temp_layer_root("filter");
    touch(&root.join("background/common/red.png"));
    touch(&root.join("background/common/notes.txt"));
    touch(&root.join("background/stray.png"));
    touch(&root.join("background/common/nested/deep.png"));

    let catalog = scan_layer_directory(&root).unwrap();
    assert_eq!(catalog.len(), 1);

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn scan_missing_root_is_an_error() {
    let root = temp_layer_root("gone");
    std::fs::remove_dir_all(&root).unwrap();
    let err = scan_layer_directory(&root).unwrap_err();
    assert!(err.to_string().contains("asset error:"), "{err}");
}

#[test]
fn scan_of_empty_root_yields_empty_catalog() {
    let root = temp_layer_root("empty");
    let catalog = scan_layer_directory(&root).unwrap();
    assert!(catalog.is_empty());
    std::fs::remove_dir_all(&root).ok();
}
