//! Popup HTML for earthquake markers.

use quakemap_types::EarthquakeRecord;

/// Text shown when the feed omits the place.
pub const UNKNOWN_PLACE: &str = "Unknown";

/// Build the popup fragment for a record.
///
/// Numbers print in shortest form (`4.5`, `10`). Unlike a raw
/// interpolation, the place text is HTML-escaped and a missing place reads
/// [`UNKNOWN_PLACE`] rather than `undefined`.
pub fn popup_html(record: &EarthquakeRecord) -> String {
    let place = record.place.as_deref().unwrap_or(UNKNOWN_PLACE);
    format!(
        "Magnitude: <b>{}</b><br>Depth: <b>{}</b><br>Location: <b>{}</b>",
        record.magnitude,
        record.depth_km,
        escape_html(place)
    )
}

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
