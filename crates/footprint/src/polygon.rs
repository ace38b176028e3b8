//! The decimated boundary polygon.

use serde::{Deserialize, Deserializer, Serialize};

/// Geographic extent of a polygon in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

/// Ordered boundary points of a dataset, implicitly closed.
///
/// Stored as two parallel arrays so it serializes directly into the
/// `latitudes` / `longitudes` fields of a catalog record. The first and last
/// points are not forced to be equal. JSON has no NaN, so missing
/// coordinates are written as `null` and read back as NaN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPolygon {
    #[serde(deserialize_with = "nullable_coordinates")]
    latitudes: Vec<f64>,
    #[serde(deserialize_with = "nullable_coordinates")]
    longitudes: Vec<f64>,
}

fn nullable_coordinates<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

impl BoundaryPolygon {
    /// The polygon of a dataset whose boundary extraction is disabled.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Collect a polygon from (latitude, longitude) pairs.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (latitudes, longitudes) = points.into_iter().unzip();
        Self {
            latitudes,
            longitudes,
        }
    }

    pub fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }

    pub fn len(&self) -> usize {
        self.latitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latitudes.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.latitudes
            .iter()
            .copied()
            .zip(self.longitudes.iter().copied())
    }

    /// Split into the parallel latitude and longitude sequences.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.latitudes, self.longitudes)
    }

    /// Arithmetic mean of the vertices as (latitude, longitude).
    ///
    /// Used to center debug maps; `None` for an empty polygon.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let n = self.len() as f64;
        let lat = self.latitudes.iter().sum::<f64>() / n;
        let lon = self.longitudes.iter().sum::<f64>() / n;
        Some((lat, lon))
    }

    /// Min/max of the vertices, ignoring NaN. `None` when no finite vertex exists.
    pub fn extent(&self) -> Option<Extent> {
        let mut extent: Option<Extent> = None;
        for (lat, lon) in self.points().filter(|(a, b)| a.is_finite() && b.is_finite()) {
            let e = extent.get_or_insert(Extent {
                min_lat: lat,
                min_lon: lon,
                max_lat: lat,
                max_lon: lon,
            });
            e.min_lat = e.min_lat.min(lat);
            e.min_lon = e.min_lon.min(lon);
            e.max_lat = e.max_lat.max(lat);
            e.max_lon = e.max_lon.max(lon);
        }
        extent
    }

    /// Copy with consecutive identical vertices collapsed.
    ///
    /// The walk keeps every corner twice and the decimator may append a side's
    /// last point twice. Consumers that need a simple ring (area, winding) can
    /// call this; the stored polygon is never altered.
    pub fn dedup_consecutive(&self) -> Self {
        let mut out: Vec<(f64, f64)> = Vec::with_capacity(self.len());
        for point in self.points() {
            if out.last() != Some(&point) {
                out.push(point);
            }
        }
        if out.len() > 1 && out.first() == out.last() {
            out.pop();
        }
        Self::from_points(out)
    }

    /// Exterior ring as GeoJSON `[lon, lat]` positions, closed on the first point.
    pub fn to_geojson_ring(&self) -> Vec<[f64; 2]> {
        let mut ring: Vec<[f64; 2]> = self.points().map(|(lat, lon)| [lon, lat]).collect();
        if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
            if first != last {
                ring.push(first);
            }
        }
        ring
    }
}
