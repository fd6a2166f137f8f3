use super::*;

#[test]
fn stem_without_delimiter_is_all_display_name() {
    let parsed = parse_stem("plain-cap");
    assert_eq!(parsed.name, "plain-cap");
    assert!(parsed.labels.is_empty());
}

#[test]
fn stem_splits_name_and_labels() {
    let parsed = parse_stem("red__fire_glow");
    assert_eq!(parsed.name, "red");
    assert_eq!(parsed.labels, ["fire", "glow"]);
}

#[test]
fn only_first_delimiter_is_significant() {
    let parsed = parse_stem("a__b__c");
    assert_eq!(parsed.name, "a");
    assert_eq!(parsed.labels, ["b", "c"]);
}

#[test]
fn empty_label_segments_are_dropped() {
    let parsed = parse_stem("red__fire__glow_");
    assert_eq!(parsed.name, "red");
    assert_eq!(parsed.labels, ["fire", "glow"]);
}

#[test]
fn single_label_after_delimiter() {
    let parsed = parse_stem("lava__fire");
    assert_eq!(parsed.name, "lava");
    assert_eq!(parsed.labels, ["fire"]);
}

#[test]
fn image_extension_filter_is_case_insensitive() {
    assert!(is_image_file("a.png"));
    assert!(is_image_file("a.PNG"));
    assert!(is_image_file("b.jpeg"));
    assert!(is_image_file("c.webp"));
    assert!(!is_image_file("notes.txt"));
    assert!(!is_image_file("archive.png.bak"));
    assert!(!is_image_file("no_extension"));
}
