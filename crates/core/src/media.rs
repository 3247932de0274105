//! Detail-media list handling: parsing the stored serialized URL list,
//! merging kept and newly-uploaded URLs on edit, and the video/image
//! rendering split.

use serde_json::Value;

/// File extensions rendered as `<video>` instead of `<img>`.
const VIDEO_EXTS: &[&str] = &[".mp4", ".webm", ".ogg", ".mov", ".m4v", ".avi"];

/// True when a URL points at a video, judged by the path extension with
/// any query string stripped. Purely a rendering decision; never stored.
pub fn is_video_url(url: &str) -> bool {
    let clean = url.split('?').next().unwrap_or("").to_lowercase();
    VIDEO_EXTS.iter().any(|ext| clean.ends_with(ext))
}

/// Parse a stored detail-media value into an ordered URL list.
///
/// Accepts an already-parsed array, a string holding a JSON array, a
/// comma-separated string, or a single bare URL. Blanks are filtered;
/// order is preserved.
pub fn parse_media_list(stored: &Value) -> Vec<String> {
    match stored {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                return Vec::new();
            }
            if t.starts_with('[') && t.ends_with(']') {
                if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(t) {
                    return parse_media_list(&Value::Array(items));
                }
            }
            if t.contains(',') {
                return t
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            vec![t.to_string()]
        }
        _ => Vec::new(),
    }
}

/// Merge the operator-confirmed keep list with freshly uploaded URLs.
/// Kept URLs come first, in their given order, then uploads in upload
/// order. No de-duplication: item identity is the URL string itself.
pub fn merge_detail_media(keep: &[String], uploaded: &[String]) -> Vec<String> {
    keep.iter()
        .chain(uploaded.iter())
        .filter(|u| !u.trim().is_empty())
        .cloned()
        .collect()
}

/// Serialize a URL list into the stored form (a JSON array string).
/// The empty list still serializes to `[]`: an edit that removes every
/// item must overwrite the previous stored value.
pub fn serialize_media_list(urls: &[String]) -> String {
    serde_json::to_string(urls).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn video_url_detection_ignores_case_and_query() {
        assert!(is_video_url("http://x/clip.MP4?v=2"));
        assert!(is_video_url("http://x/a/b/clip.webm"));
        assert!(!is_video_url("http://x/pic.png"));
        assert!(!is_video_url("http://x/pic.png?fake=.mp4"));
        assert!(!is_video_url(""));
    }

    #[test]
    fn parse_accepts_json_array_string() {
        let v = json!(r#"["http://x/1.png", " http://x/2.mp4 ", ""]"#);
        assert_eq!(
            parse_media_list(&v),
            vec!["http://x/1.png", "http://x/2.mp4"]
        );
    }

    #[test]
    fn parse_accepts_comma_separated_string() {
        let v = json!("http://x/1.png, http://x/2.mp4");
        assert_eq!(
            parse_media_list(&v),
            vec!["http://x/1.png", "http://x/2.mp4"]
        );
    }

    #[test]
    fn parse_round_trips_with_serialize() {
        let urls = vec!["http://x/1.png".to_string(), "http://x/2.mp4".to_string()];
        let stored = serialize_media_list(&urls);
        assert_eq!(parse_media_list(&json!(stored)), urls);
    }

    #[test]
    fn parse_bare_url_is_single_item() {
        assert_eq!(parse_media_list(&json!("http://x/1.png")), vec!["http://x/1.png"]);
    }

    #[test]
    fn parse_blank_and_null_are_empty() {
        assert!(parse_media_list(&Value::Null).is_empty());
        assert!(parse_media_list(&json!("")).is_empty());
        assert!(parse_media_list(&json!("   ")).is_empty());
    }

    #[test]
    fn merge_keeps_then_uploads_in_order() {
        let keep = vec!["A".to_string(), "C".to_string()];
        let uploaded = vec!["D".to_string()];
        assert_eq!(merge_detail_media(&keep, &uploaded), vec!["A", "C", "D"]);
    }

    #[test]
    fn merge_filters_blank_entries() {
        let keep = vec!["A".to_string(), "".to_string()];
        let uploaded: Vec<String> = vec![];
        assert_eq!(merge_detail_media(&keep, &uploaded), vec!["A"]);
    }

    #[test]
    fn empty_merge_serializes_to_empty_array() {
        assert_eq!(serialize_media_list(&[]), "[]");
    }
}
