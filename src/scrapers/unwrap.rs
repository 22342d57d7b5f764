//! Isolates a JSON payload from a raw response body.
//!
//! A body is either plain JSON or a page with the JSON assigned inside a
//! script (`window.IBU_HOTEL={...};`). The text is cut between two markers,
//! each a regular expression rather than literal text.
//! A marker that does not match leaves its side of the text untouched, so a
//! changed page comes back whole and fails later at JSON decoding with the
//! full text attached.

use crate::error::{Result, ScrapeError};
use regex::Regex;
use serde_json::Value;
use std::ops::Range;
use std::sync::OnceLock;

/// A pattern that can locate its first match in a text
pub trait Marker {
    /// Byte range of the first match
    fn find_in(&self, haystack: &str) -> Option<Range<usize>>;
}

impl Marker for Regex {
    fn find_in(&self, haystack: &str) -> Option<Range<usize>> {
        self.find(haystack).map(|m| m.range())
    }
}

/// Cuts `body` after `start` and before `end`.
///
/// The end marker is searched in what remains after the start cut. The
/// `include_*` flags keep the matched marker text on that side.
pub fn extract_payload<'a>(
    body: &'a str,
    start: Option<&dyn Marker>,
    end: Option<&dyn Marker>,
    include_start: bool,
    include_end: bool,
) -> &'a str {
    let mut text = body;

    if let Some(found) = start.and_then(|marker| marker.find_in(text)) {
        text = if include_start {
            &text[found.start..]
        } else {
            &text[found.end..]
        };
    }

    if let Some(found) = end.and_then(|marker| marker.find_in(text)) {
        text = if include_end {
            &text[..found.end]
        } else {
            &text[..found.start]
        };
    }

    text
}

fn hotel_markers() -> &'static (Regex, Regex) {
    static MARKERS: OnceLock<(Regex, Regex)> = OnceLock::new();
    MARKERS.get_or_init(|| {
        (
            Regex::new(r"window\.IBU_HOTEL=").expect("valid start marker"),
            Regex::new(r"\}\};").expect("valid end marker"),
        )
    })
}

/// The object assigned to `window.IBU_HOTEL` in the listing page
pub fn unwrap_embedded_hotel_json(body: &str) -> &str {
    let (start, end) = hotel_markers();
    let text = extract_payload(
        body,
        Some(start as &dyn Marker),
        Some(end as &dyn Marker),
        false,
        true,
    );
    text.strip_suffix(';').unwrap_or(text)
}

/// Parses unwrapped text, keeping the text on failure
pub fn decode_payload(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|source| ScrapeError::PayloadDecode {
        raw: text.to_string(),
        source,
    })
}
