//! Debug map rendering for dataset footprints.
//!
//! Renderers sit behind the [`MapRenderer`] trait so the collector can be
//! configured with any combination (or none) of them. Every renderer skips
//! empty polygons and returns the path it wrote, if any.
//!
//! | Kind   | Output          | Notes                                     |
//! |--------|-----------------|-------------------------------------------|
//! | `html` | `map.html`      | Leaflet page, zoom 3, black polygon       |
//! | `png`  | `footprint.png` | Outline on white, vertices in red         |

use std::path::{Path, PathBuf};
use std::sync::Arc;

use footprint::BoundaryPolygon;
use serde::{Deserialize, Serialize};

pub mod error;
pub mod leaflet;
pub mod outline;
pub mod png;

pub use error::{RenderError, RenderResult};
pub use leaflet::LeafletHtmlRenderer;
pub use outline::PngOutlineRenderer;

/// Renders a footprint into a dataset's output directory.
pub trait MapRenderer: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Write the rendering into `dir`. `Ok(None)` when nothing was drawn.
    fn render(&self, title: &str, polygon: &BoundaryPolygon, dir: &Path) -> RenderResult<Option<PathBuf>>;
}

/// Renderer that never writes anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

impl MapRenderer for NoopRenderer {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn render(&self, _title: &str, _polygon: &BoundaryPolygon, _dir: &Path) -> RenderResult<Option<PathBuf>> {
        Ok(None)
    }
}

/// Renderer selection as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    Html,
    Png,
}

impl RendererKind {
    pub fn build(self) -> Arc<dyn MapRenderer> {
        match self {
            RendererKind::Html => Arc::new(LeafletHtmlRenderer::default()),
            RendererKind::Png => Arc::new(PngOutlineRenderer::default()),
        }
    }
}

/// Instantiate renderers in configuration order, ignoring repeats.
pub fn build_renderers(kinds: &[RendererKind]) -> Vec<Arc<dyn MapRenderer>> {
    let mut seen = Vec::new();
    kinds
        .iter()
        .filter(|kind| {
            if seen.contains(*kind) {
                false
            } else {
                seen.push(**kind);
                true
            }
        })
        .map(|kind| kind.build())
        .collect()
}

/// Points with finite coordinates as `[lat, lon]` pairs.
pub(crate) fn finite_points(polygon: &BoundaryPolygon) -> Vec<[f64; 2]> {
    polygon
        .points()
        .filter(|(lat, lon)| lat.is_finite() && lon.is_finite())
        .map(|(lat, lon)| [lat, lon])
        .collect()
}
