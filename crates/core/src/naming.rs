//! Upload key generation for product media.
//!
//! Keys look like `{folder}/{slug}/{millis}-{rand}{ext}`: a sanitized
//! category subfolder and slug, a millisecond timestamp, a 6-byte random
//! hex suffix, and the original file extension. Unique enough to avoid
//! overwrite collisions at single-operator scale; not cryptographic.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

static EXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[a-z0-9]+$").expect("extension regex"));

/// Extract a lowercased file extension, dot included. Empty when the name
/// has none.
pub fn safe_ext(filename: &str) -> String {
    let lower = filename.to_lowercase();
    EXT_RE
        .find(&lower)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Sanitize one key segment: lowercase, everything outside `[a-z0-9-_]`
/// replaced with `-`, falling back to `fallback` when nothing is left.
fn safe_segment(raw: &str, fallback: &str) -> String {
    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        fallback.to_string()
    } else {
        cleaned
    }
}

/// Build a storage key for an uploaded file.
pub fn make_file_key(folder: &str, slug: &str, original_name: &str) -> String {
    let ext = safe_ext(original_name);
    let mut bytes = [0u8; 6];
    rand::rng().fill(&mut bytes);
    let rand_hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();

    let folder = safe_segment(folder, "product");
    let slug = safe_segment(slug, "item");
    let millis = chrono::Utc::now().timestamp_millis();

    format!("{folder}/{slug}/{millis}-{rand_hex}{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ext_is_lowercased_and_dot_prefixed() {
        assert_eq!(safe_ext("photo.JPG"), ".jpg");
        assert_eq!(safe_ext("clip.v2.Mp4"), ".mp4");
        assert_eq!(safe_ext("noext"), "");
        assert_eq!(safe_ext("trailing."), "");
    }

    #[test]
    fn segments_are_sanitized() {
        assert_eq!(safe_segment("Toplight/Main", "product"), "toplight-main");
        assert_eq!(safe_segment("제품", "product"), "--");
        assert_eq!(safe_segment("", "product"), "product");
        assert_eq!(safe_segment("ok_name-1", "product"), "ok_name-1");
    }

    #[test]
    fn key_shape_folder_slug_stamp_ext() {
        let key = make_file_key("toplight/main", "Beacon X", "Photo.PNG");
        let parts: Vec<&str> = key.split('/').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "toplight-main");
        assert_eq!(parts[1], "beacon-x");
        assert!(parts[2].ends_with(".png"));
        // {millis}-{12 hex chars}
        let stem = parts[2].trim_end_matches(".png");
        let (millis, rand) = stem.split_once('-').unwrap();
        assert!(millis.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(rand.len(), 12);
        assert!(rand.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn successive_keys_differ() {
        let a = make_file_key("f", "s", "x.png");
        let b = make_file_key("f", "s", "x.png");
        assert_ne!(a, b);
    }
}
