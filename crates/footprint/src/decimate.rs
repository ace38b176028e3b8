//! Fixed-interval decimation of a perimeter walk.
//!
//! A single step is computed across all four sides:
//!
//! ```text
//! step = floor(total_points / target)
//! ```
//!
//! and applied to each side independently: the first point is always kept,
//! interior index `i` is kept when `i % step == 0`, and the last point is kept
//! when `len % step != 0`. The last point may therefore appear twice; this is
//! part of the observable output and is not deduplicated.
//!
//! A step of 0 or 1 keeps the walk unchanged.

use tracing::debug;

use crate::error::{FootprintError, Result};
use crate::perimeter::{BoundarySide, PerimeterWalk};
use crate::polygon::BoundaryPolygon;

/// Global sampling interval for `total_points` reduced to about `target` points.
///
/// Returns 0 when `total_points < target`; callers treat any step below 2 as
/// "keep everything".
pub fn decimation_step(total_points: usize, target: usize) -> Result<usize> {
    if target == 0 {
        return Err(FootprintError::invalid_target(
            "target point count must be greater than zero",
        ));
    }
    Ok(total_points / target)
}

/// Reduce `walk` to approximately `target` points.
///
/// The result may exceed `target` by the mandatory first points and the
/// optional trailing point of each side.
pub fn decimate(walk: &PerimeterWalk, target: usize) -> Result<BoundaryPolygon> {
    let total = walk.total_points();
    if total == 0 {
        return Err(FootprintError::degenerate("perimeter walk has no points"));
    }

    let step = decimation_step(total, target)?;

    if step <= 1 {
        debug!(total, target, step, "Step below 2, keeping every boundary point");
        return Ok(BoundaryPolygon::from_points(walk.points()));
    }

    let mut points = Vec::with_capacity(target + 2 * walk.sides().len());
    for side in walk.sides() {
        sample_side(side, step, &mut points);
    }

    debug!(total, target, step, kept = points.len(), "Decimated perimeter");

    Ok(BoundaryPolygon::from_points(points))
}

fn sample_side(side: &BoundarySide, step: usize, out: &mut Vec<(f64, f64)>) {
    let len = side.len();
    if len == 0 {
        return;
    }

    out.push(side.point(0));

    for i in 1..len.saturating_sub(1) {
        if i % step == 0 {
            out.push(side.point(i));
        }
    }

    if len % step != 0 {
        out.push(side.point(len - 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perimeter::Side;

    fn side(side: Side, values: std::ops::Range<usize>) -> BoundarySide {
        let lats: Vec<f64> = values.clone().map(|v| v as f64).collect();
        let lons: Vec<f64> = values.map(|v| -(v as f64)).collect();
        BoundarySide::new(side, lats, lons).unwrap()
    }

    fn walk_with_lengths(lengths: [usize; 4]) -> PerimeterWalk {
        let mut start = 0;
        let sides = Side::ALL.map(|s| {
            let len = lengths[s as usize];
            let side = side(s, start..start + len);
            start += len;
            side
        });
        PerimeterWalk::from_sides(sides).unwrap()
    }

    #[test]
    fn test_step_computation() {
        assert_eq!(decimation_step(4000, 100).unwrap(), 40);
        assert_eq!(decimation_step(4039, 100).unwrap(), 40);
        assert_eq!(decimation_step(99, 100).unwrap(), 0);
    }

    #[test]
    fn test_zero_target_rejected() {
        let walk = walk_with_lengths([3, 3, 3, 3]);
        let err = decimate(&walk, 0).unwrap_err();
        assert!(matches!(err, FootprintError::InvalidTarget(_)));
    }

    #[test]
    fn test_target_above_total_keeps_everything() {
        let walk = walk_with_lengths([3, 3, 3, 3]);
        let polygon = decimate(&walk, 100).unwrap();
        assert_eq!(polygon.len(), 12);
        assert!(polygon.points().eq(walk.points()));
    }

    #[test]
    fn test_step_one_keeps_last_points() {
        // 12 / 10 = 1, every point including each side's last one survives
        let walk = walk_with_lengths([3, 3, 3, 3]);
        let polygon = decimate(&walk, 10).unwrap();
        assert_eq!(polygon.len(), 12);
    }

    #[test]
    fn test_interior_modulus_and_trailing_point() {
        // 4 sides of 10 points, target 10 -> step 4
        // per side: first (0), interior 4 and 8, last (10 % 4 != 0) -> 4 points
        let walk = walk_with_lengths([10, 10, 10, 10]);
        let polygon = decimate(&walk, 10).unwrap();

        assert_eq!(polygon.len(), 16);
        let top: Vec<f64> = polygon.latitudes()[..4].to_vec();
        assert_eq!(top, vec![0.0, 4.0, 8.0, 9.0]);
    }

    #[test]
    fn test_trailing_point_dropped_when_length_divisible() {
        // 4 sides of 8 points, target 8 -> step 4, 8 % 4 == 0
        // per side: first (0) and interior 4, last point not appended
        let walk = walk_with_lengths([8, 8, 8, 8]);
        let polygon = decimate(&walk, 8).unwrap();

        assert_eq!(polygon.len(), 8);
        assert_eq!(&polygon.latitudes()[..2], &[0.0, 4.0]);
    }

    #[test]
    fn test_last_point_can_repeat() {
        // 20 points, target 5 -> step 4
        // a single-point side has first == last and 1 % 4 != 0 appends it again
        let walk = walk_with_lengths([1, 9, 5, 5]);
        let polygon = decimate(&walk, 5).unwrap();

        let top: Vec<_> = polygon.points().take(2).collect();
        assert_eq!(top, vec![(0.0, -0.0), (0.0, -0.0)]);
    }
}
