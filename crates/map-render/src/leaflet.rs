//! Standalone Leaflet page showing a footprint over OpenStreetMap tiles.

use std::path::{Path, PathBuf};

use footprint::BoundaryPolygon;
use tracing::debug;

use crate::error::{RenderError, RenderResult};
use crate::{finite_points, MapRenderer};

pub const DEFAULT_ZOOM: u8 = 3;
pub const MAP_FILE_NAME: &str = "map.html";

const LEAFLET_VERSION: &str = "1.9.4";
const OSM_TILES: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Writes `map.html` with the footprint drawn as a black filled polygon,
/// centered on the mean of its vertices.
#[derive(Debug, Clone)]
pub struct LeafletHtmlRenderer {
    zoom: u8,
    tile_url: String,
}

impl Default for LeafletHtmlRenderer {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            tile_url: OSM_TILES.to_string(),
        }
    }
}

impl LeafletHtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_tile_url(mut self, tile_url: impl Into<String>) -> Self {
        self.tile_url = tile_url.into();
        self
    }

    /// Build the page, or `None` when there is nothing finite to draw.
    pub fn render_html(&self, title: &str, polygon: &BoundaryPolygon) -> Option<String> {
        let points = finite_points(polygon);
        if points.is_empty() {
            return None;
        }

        let n = points.len() as f64;
        let center_lat = points.iter().map(|p| p[0]).sum::<f64>() / n;
        let center_lon = points.iter().map(|p| p[1]).sum::<f64>() / n;

        // serde_json gives valid JS literals for the strings and the point list.
        let title_js = serde_json::to_string(title).ok()?;
        let points_js = serde_json::to_string(&points).ok()?;
        let tiles_js = serde_json::to_string(&self.tile_url).ok()?;

        Some(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8"/>
<title>{title_html}</title>
<meta name="viewport" content="width=device-width, initial-scale=1.0"/>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{version}/dist/leaflet.css"/>
<script src="https://unpkg.com/leaflet@{version}/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map").setView([{center_lat}, {center_lon}], {zoom});
L.tileLayer({tiles_js}, {{ maxZoom: 19, attribution: "&copy; OpenStreetMap contributors" }}).addTo(map);
L.polygon({points_js}, {{ color: "black", fill: true }}).bindTooltip({title_js}).addTo(map);
</script>
</body>
</html>
"#,
            title_html = escape_html(title),
            version = LEAFLET_VERSION,
            center_lat = center_lat,
            center_lon = center_lon,
            zoom = self.zoom,
            tiles_js = tiles_js,
            points_js = points_js,
            title_js = title_js,
        ))
    }
}

impl MapRenderer for LeafletHtmlRenderer {
    fn name(&self) -> &'static str {
        "html"
    }

    fn render(&self, title: &str, polygon: &BoundaryPolygon, dir: &Path) -> RenderResult<Option<PathBuf>> {
        let Some(html) = self.render_html(title, polygon) else {
            debug!(dataset = title, "No finite points, skipping HTML map");
            return Ok(None);
        };

        let path = dir.join(MAP_FILE_NAME);
        std::fs::create_dir_all(dir)
            .and_then(|_| std::fs::write(&path, html))
            .map_err(|source| RenderError::Io {
                path: path.clone(),
                source,
            })?;
        Ok(Some(path))
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
