//! Map page rendering via `minijinja`.
//!
//! The page is the thin browser-side collaborator: it loads Leaflet, builds
//! the basemap tile layers and legend from the embedded settings, and draws
//! the pre-styled features served by `/api/earthquakes`. It is rendered
//! once when the [`AppState`](crate::state::AppState) is built.

use minijinja::{Environment, context};
use quakemap_core::config::MapSettings;
use quakemap_types::Legend;

use crate::server::ServerError;

/// Embedded page template.
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Render the map page for the given settings and legend.
///
/// # Errors
///
/// Returns [`ServerError::Template`] if the template fails to compile or
/// render, or the settings cannot be serialized.
pub fn render_index(settings: &MapSettings, legend: &Legend) -> Result<String, ServerError> {
    let mut env = Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)
        .map_err(|e| ServerError::Template(format!("failed to add index template: {e}")))?;

    let page_config = serde_json::json!({
        "view": settings.view,
        "basemaps": settings.basemaps,
        "default_basemap": settings.default_basemap,
        "overlay_name": settings.overlay_name,
        "legend_position": legend.position,
        "legend_html": legend.html,
    });
    let config_json = script_safe_json(&page_config)?;

    env.get_template("index.html")
        .map_err(|e| ServerError::Template(format!("missing index template: {e}")))?
        .render(context! {
            title => settings.title,
            config_json => config_json,
        })
        .map_err(|e| ServerError::Template(format!("index render failed: {e}")))
}

/// Serialize a value for embedding inside a `<script>` element.
///
/// `</` is escaped so attribution or legend HTML cannot close the script.
fn script_safe_json(value: &serde_json::Value) -> Result<String, ServerError> {
    let json = serde_json::to_string(value)
        .map_err(|e| ServerError::Template(format!("failed to serialize page config: {e}")))?;
    Ok(json.replace("</", "<\\/"))
}
