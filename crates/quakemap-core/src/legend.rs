//! Depth legend generator.
//!
//! Pure formatting over the fixed [`DepthBucket`] table: one swatch and
//! range label per bucket, shallowest first.

use quakemap_types::{DepthBucket, Legend, LegendEntry, LegendPosition};

/// Range label for a bucket: `"{lo}km - {hi}km"`, or `"{lo}+"` for the
/// deepest bucket.
pub fn label_for(bucket: DepthBucket) -> String {
    let start = bucket.legend_start_km();
    match bucket.deeper() {
        Some(next) => format!("{start}km - {}km", next.legend_start_km()),
        None => format!("{start}+"),
    }
}

/// Legend rows for every bucket, shallowest first.
pub fn legend_entries() -> Vec<LegendEntry> {
    DepthBucket::ALL
        .iter()
        .map(|bucket| LegendEntry {
            bucket: *bucket,
            color: bucket.color().to_owned(),
            label: label_for(*bucket),
        })
        .collect()
}

/// Render legend rows as the HTML body of the legend control.
///
/// Each row is a colored `<i>` swatch followed by its label; rows are
/// separated by `<br>`.
pub fn render_html(entries: &[LegendEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("<i style=\"background: {}\"></i> {}", entry.color, entry.label))
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Build the full legend control anchored at `position`.
pub fn build_legend(position: LegendPosition) -> Legend {
    let entries = legend_entries();
    let html = render_html(&entries);
    Legend {
        position,
        entries,
        html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_cover_every_range() {
        let labels: Vec<String> = legend_entries().into_iter().map(|e| e.label).collect();
        assert_eq!(
            labels,
            vec![
                "-10km - 10km",
                "10km - 30km",
                "30km - 50km",
                "50km - 70km",
                "70km - 90km",
                "90+",
            ]
        );
    }

    #[test]
    fn seventy_to_ninety_label() {
        assert_eq!(label_for(DepthBucket::VeryDeep), "70km - 90km");
        assert_eq!(label_for(DepthBucket::Deepest), "90+");
    }

    #[test]
    fn entries_carry_bucket_colors() {
        let entries = legend_entries();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries.first().map(|e| e.color.as_str()), Some("#1a9850"));
        assert_eq!(entries.last().map(|e| e.color.as_str()), Some("#d73027"));
    }

    #[test]
    fn html_has_one_swatch_per_bucket() {
        let legend = build_legend(LegendPosition::BottomRight);
        assert_eq!(legend.html.matches("<i style=").count(), 6);
        assert_eq!(legend.html.matches("<br>").count(), 5);
        assert!(legend
            .html
            .starts_with("<i style=\"background: #1a9850\"></i> -10km - 10km<br>"));
        assert!(legend.html.ends_with("<i style=\"background: #d73027\"></i> 90+"));
        assert_eq!(legend.position, LegendPosition::BottomRight);
    }

    #[test]
    fn html_separators_only_between_rows() {
        assert_eq!(render_html(&[]), "");
        let one: Vec<LegendEntry> = legend_entries().into_iter().take(1).collect();
        assert_eq!(render_html(&one), "<i style=\"background: #1a9850\"></i> -10km - 10km");
    }
}
