//! Basemap tile layer catalog and initial map view.
//!
//! The catalog is plain configuration for the browser's map library:
//! URL templates, zoom ranges and attributions. Tiles are never fetched
//! server-side.

use quakemap_types::{MapView, TileLayer};

const OSM_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

const STADIA_ATTRIBUTION: &str = "&copy; <a href=\"https://www.stadiamaps.com/\" target=\"_blank\">Stadia Maps</a> &copy; <a href=\"https://www.stamen.com/\" target=\"_blank\">Stamen Design</a> &copy; <a href=\"https://openmaptiles.org/\" target=\"_blank\">OpenMapTiles</a> &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

const TOPO_ATTRIBUTION: &str = "Map data: &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors, <a href=\"http://viewfinderpanoramas.org\">SRTM</a> | Map style: &copy; <a href=\"https://opentopomap.org\">OpenTopoMap</a> (<a href=\"https://creativecommons.org/licenses/by-sa/3.0/\">CC-BY-SA</a>)";

/// Name of the basemap shown when the page loads.
pub const DEFAULT_BASEMAP: &str = "Default";

/// Display name of the earthquake overlay in the layer control.
pub const EARTHQUAKE_OVERLAY: &str = "Earthquake Data";

/// The four built-in basemaps in layer-control order.
pub fn default_basemaps() -> Vec<TileLayer> {
    vec![
        TileLayer {
            name: String::from("Grayscale"),
            url_template: String::from(
                "https://tiles.stadiamaps.com/tiles/stamen_toner/{z}/{x}/{y}{r}.{ext}",
            ),
            min_zoom: 0,
            max_zoom: 20,
            attribution: STADIA_ATTRIBUTION.to_owned(),
            ext: Some(String::from("png")),
        },
        TileLayer {
            name: String::from("Watercolor"),
            url_template: String::from(
                "https://tiles.stadiamaps.com/tiles/stamen_watercolor/{z}/{x}/{y}.{ext}",
            ),
            min_zoom: 1,
            max_zoom: 16,
            attribution: STADIA_ATTRIBUTION.to_owned(),
            ext: Some(String::from("jpg")),
        },
        TileLayer {
            name: String::from("Topography"),
            url_template: String::from("https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png"),
            min_zoom: 0,
            max_zoom: 17,
            attribution: TOPO_ATTRIBUTION.to_owned(),
            ext: None,
        },
        TileLayer {
            name: String::from(DEFAULT_BASEMAP),
            url_template: String::from("https://tile.openstreetmap.org/{z}/{x}/{y}.png"),
            min_zoom: 0,
            max_zoom: 19,
            attribution: OSM_ATTRIBUTION.to_owned(),
            ext: None,
        },
    ]
}

/// Initial view: centred on California at zoom 3.
pub const fn default_view() -> MapView {
    MapView {
        latitude: 36.7783,
        longitude: -119.4179,
        zoom: 3,
    }
}

/// Find a basemap by display name.
pub fn find_basemap<'a>(layers: &'a [TileLayer], name: &str) -> Option<&'a TileLayer> {
    layers.iter().find(|layer| layer.name == name)
}
