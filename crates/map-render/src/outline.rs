//! Footprint outline rasterized to a PNG.
//!
//! Longitude maps linearly to x and latitude to y (north up) over the
//! polygon's own extent plus a margin. Good enough to eyeball a footprint
//! without a browser.

use std::path::{Path, PathBuf};

use footprint::BoundaryPolygon;
use tracing::debug;

use crate::error::{RenderError, RenderResult};
use crate::png::create_png;
use crate::{finite_points, MapRenderer};

pub const OUTLINE_FILE_NAME: &str = "footprint.png";

const BACKGROUND: [u8; 4] = [255, 255, 255, 255];
const LINE: [u8; 4] = [0, 0, 0, 255];
const VERTEX: [u8; 4] = [220, 30, 30, 255];
const MARGIN_PX: f64 = 8.0;

/// Writes `footprint.png` with the closed outline and its vertices.
#[derive(Debug, Clone)]
pub struct PngOutlineRenderer {
    width: usize,
    height: usize,
}

impl Default for PngOutlineRenderer {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
        }
    }
}

impl PngOutlineRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Rasterize to RGBA pixels, or `None` when there is nothing to draw.
    pub fn rasterize(&self, polygon: &BoundaryPolygon) -> Option<Vec<u8>> {
        let points = finite_points(polygon);
        if points.is_empty() || self.width == 0 || self.height == 0 {
            return None;
        }

        let mut canvas = Canvas::new(self.width, self.height);
        let project = Projection::fit(&points, self.width, self.height);
        let pixels: Vec<(i64, i64)> = points.iter().map(|p| project.apply(p[0], p[1])).collect();

        for (i, &start) in pixels.iter().enumerate() {
            let end = pixels[(i + 1) % pixels.len()];
            canvas.line(start, end, LINE);
        }
        for &(x, y) in &pixels {
            canvas.dot(x, y, VERTEX);
        }

        Some(canvas.pixels)
    }
}

impl MapRenderer for PngOutlineRenderer {
    fn name(&self) -> &'static str {
        "png"
    }

    fn render(&self, title: &str, polygon: &BoundaryPolygon, dir: &Path) -> RenderResult<Option<PathBuf>> {
        let Some(pixels) = self.rasterize(polygon) else {
            debug!(dataset = title, "No finite points, skipping PNG outline");
            return Ok(None);
        };

        let png = create_png(&pixels, self.width, self.height)?;
        let path = dir.join(OUTLINE_FILE_NAME);
        std::fs::create_dir_all(dir)
            .and_then(|_| std::fs::write(&path, png))
            .map_err(|source| RenderError::Io {
                path: path.clone(),
                source,
            })?;
        Ok(Some(path))
    }
}

/// Linear lat/lon to pixel mapping that fits all points inside the margin.
struct Projection {
    min_lat: f64,
    min_lon: f64,
    scale: f64,
    x_offset: f64,
    y_offset: f64,
    height: usize,
}

impl Projection {
    fn fit(points: &[[f64; 2]], width: usize, height: usize) -> Self {
        let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_lon, mut max_lon) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in points {
            min_lat = min_lat.min(p[0]);
            max_lat = max_lat.max(p[0]);
            min_lon = min_lon.min(p[1]);
            max_lon = max_lon.max(p[1]);
        }

        let usable_w = (width as f64 - 2.0 * MARGIN_PX).max(1.0);
        let usable_h = (height as f64 - 2.0 * MARGIN_PX).max(1.0);
        let span_lon = (max_lon - min_lon).max(f64::EPSILON);
        let span_lat = (max_lat - min_lat).max(f64::EPSILON);
        // Same scale on both axes, centered in the unused direction.
        let scale = (usable_w / span_lon).min(usable_h / span_lat);

        Self {
            min_lat,
            min_lon,
            scale,
            x_offset: MARGIN_PX + (usable_w - span_lon * scale) / 2.0,
            y_offset: MARGIN_PX + (usable_h - span_lat * scale) / 2.0,
            height,
        }
    }

    fn apply(&self, lat: f64, lon: f64) -> (i64, i64) {
        let x = self.x_offset + (lon - self.min_lon) * self.scale;
        let y_up = self.y_offset + (lat - self.min_lat) * self.scale;
        let y = self.height as f64 - 1.0 - y_up;
        (x.round() as i64, y.round() as i64)
    }
}

struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        let pixels = BACKGROUND
            .iter()
            .copied()
            .cycle()
            .take(width * height * 4)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    fn set(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        self.pixels[idx..idx + 4].copy_from_slice(&color);
    }

    /// Bresenham line, endpoints included.
    fn line(&mut self, (x0, y0): (i64, i64), (x1, y1): (i64, i64), color: [u8; 4]) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn dot(&mut self, x: i64, y: i64, color: [u8; 4]) {
        for dy in -1..=1 {
            for dx in -1..=1 {
                self.set(x + dx, y + dy, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(pixels: &[u8], width: usize, x: usize, y: usize) -> [u8; 4] {
        let idx = (y * width + x) * 4;
        [pixels[idx], pixels[idx + 1], pixels[idx + 2], pixels[idx + 3]]
    }

    #[test]
    fn test_square_outline_touches_margins() {
        let renderer = PngOutlineRenderer::new(64, 64);
        let polygon = BoundaryPolygon::from_points([(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let pixels = renderer.rasterize(&polygon).unwrap();

        assert_eq!(pixels.len(), 64 * 64 * 4);
        // middle of the left edge (lon 0) is on the line
        assert_eq!(pixel(&pixels, 64, 8, 32), LINE);
        // interior stays background
        assert_eq!(pixel(&pixels, 64, 32, 32), BACKGROUND);
        // south-west vertex is marked, north up
        assert_eq!(pixel(&pixels, 64, 8, 55), VERTEX);
    }

    #[test]
    fn test_single_point_does_not_panic() {
        let renderer = PngOutlineRenderer::new(16, 16);
        let polygon = BoundaryPolygon::from_points([(5.0, 5.0)]);
        assert!(renderer.rasterize(&polygon).is_some());
    }

    #[test]
    fn test_empty_polygon_is_skipped() {
        assert!(PngOutlineRenderer::default()
            .rasterize(&BoundaryPolygon::empty())
            .is_none());
    }
}
