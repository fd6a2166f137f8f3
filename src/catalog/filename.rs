//! Filename-encoded trait metadata.
//!
//! A layer file is named `<display>__<label>_<label>.<ext>`. Everything
//! before the first `__` is the display name; the remainder splits on `_`
//! into labels. A stem without the delimiter is all display name.

/// Two-character delimiter separating the display name from the label block.
pub const LABEL_DELIMITER: &str = "__";

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStem {
    pub name: String,
    pub labels: Vec<String>,
}

/// Split a file stem into display name and labels.
///
/// Only the first delimiter is significant: `a__b__c` parses as name `a`
/// with the rest treated as one label block. Empty label segments are
/// dropped.
pub fn parse_stem(stem: &str) -> ParsedStem {
    match stem.split_once(LABEL_DELIMITER) {
        Some((name, rest)) => ParsedStem {
            name: name.to_string(),
            labels: rest
                .split('_')
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        },
        None => ParsedStem {
            name: stem.to_string(),
            labels: Vec::new(),
        },
    }
}

/// Whether `file_name` carries a recognized image extension.
pub fn is_image_file(file_name: &str) -> bool {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            let e = e.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&e.as_str())
        })
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/filename.rs"]
mod tests;
