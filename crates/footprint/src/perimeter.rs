//! Perimeter walk around a coordinate grid.
//!
//! The four sides are produced in a fixed order and orientation so that
//! concatenating them yields a continuous loop:
//!
//! ```text
//!   (0,0) ──── Top ────► (0,C-1)
//!     ▲                     │
//!    Left                 Right
//!     │                     ▼
//! (R-1,0) ◄── Bottom ── (R-1,C-1)
//! ```
//!
//! Each corner is the last point of one side and the first point of the
//! next, so it appears twice in the raw walk.

use serde::{Deserialize, Serialize};

use crate::error::{FootprintError, Result};
use crate::grid::CoordinateGrid;

/// One edge of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// First row, column index ascending
    Top,
    /// Last column, row index ascending
    Right,
    /// Last row, column index descending
    Bottom,
    /// First column, row index descending
    Left,
}

impl Side {
    /// Walk order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];
}

/// Ordered latitude/longitude sequences for one side, index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySide {
    side: Side,
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
}

impl BoundarySide {
    /// Build a side from parallel sequences. Lengths must match.
    pub fn new(side: Side, latitudes: Vec<f64>, longitudes: Vec<f64>) -> Result<Self> {
        if latitudes.len() != longitudes.len() {
            return Err(FootprintError::degenerate(format!(
                "{:?} side has {} latitudes but {} longitudes",
                side,
                latitudes.len(),
                longitudes.len()
            )));
        }
        Ok(Self {
            side,
            latitudes,
            longitudes,
        })
    }

    pub fn side(&self) -> Side {
        self.side
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

    /// (latitude, longitude) at position `i` along the side.
    pub fn point(&self, i: usize) -> (f64, f64) {
        (self.latitudes[i], self.longitudes[i])
    }

    pub fn first(&self) -> Option<(f64, f64)> {
        (!self.is_empty()).then(|| self.point(0))
    }

    pub fn last(&self) -> Option<(f64, f64)> {
        (!self.is_empty()).then(|| self.point(self.len() - 1))
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.latitudes
            .iter()
            .copied()
            .zip(self.longitudes.iter().copied())
    }

    fn from_cells(side: Side, grid: &CoordinateGrid, cells: impl Iterator<Item = (usize, usize)>) -> Self {
        let (latitudes, longitudes) = cells.map(|(row, col)| grid.point(row, col)).unzip();
        Self {
            side,
            latitudes,
            longitudes,
        }
    }
}

/// The four raw sides of a grid, in walk order.
#[derive(Debug, Clone, PartialEq)]
pub struct PerimeterWalk {
    sides: [BoundarySide; 4],
}

impl PerimeterWalk {
    /// Assemble a walk from four externally produced sides.
    ///
    /// Sides must be tagged top, right, bottom, left in that order and each must
    /// hold at least one point.
    pub fn from_sides(sides: [BoundarySide; 4]) -> Result<Self> {
        for (expected, side) in Side::ALL.iter().zip(sides.iter()) {
            if side.side != *expected {
                return Err(FootprintError::degenerate(format!(
                    "expected {:?} side, found {:?}",
                    expected, side.side
                )));
            }
            if side.is_empty() {
                return Err(FootprintError::degenerate(format!(
                    "{:?} side has no points",
                    side.side
                )));
            }
        }
        Ok(Self { sides })
    }

    pub fn sides(&self) -> &[BoundarySide; 4] {
        &self.sides
    }

    pub fn side(&self, side: Side) -> &BoundarySide {
        &self.sides[side as usize]
    }

    /// Sum of all side lengths, corners counted twice.
    pub fn total_points(&self) -> usize {
        self.sides.iter().map(BoundarySide::len).sum()
    }

    /// All points of the walk in order, corners duplicated.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.sides.iter().flat_map(BoundarySide::points)
    }
}

/// Walk the outermost rows and columns of `grid`.
///
/// Returns sides of lengths C, R, C, R. Pure function of the grid.
pub fn walk(grid: &CoordinateGrid) -> PerimeterWalk {
    let last_row = grid.rows() - 1;
    let last_col = grid.cols() - 1;

    let top = BoundarySide::from_cells(Side::Top, grid, (0..=last_col).map(|c| (0, c)));
    let right = BoundarySide::from_cells(Side::Right, grid, (0..=last_row).map(|r| (r, last_col)));
    let bottom = BoundarySide::from_cells(
        Side::Bottom,
        grid,
        (0..=last_col).rev().map(|c| (last_row, c)),
    );
    let left = BoundarySide::from_cells(Side::Left, grid, (0..=last_row).rev().map(|r| (r, 0)));

    PerimeterWalk {
        sides: [top, right, bottom, left],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_by_three() -> CoordinateGrid {
        CoordinateGrid::from_rows(
            &[
                vec![0.0, 0.0, 0.0],
                vec![1.0, 1.0, 1.0],
                vec![2.0, 2.0, 2.0],
            ],
            &[
                vec![0.0, 1.0, 2.0],
                vec![0.0, 1.0, 2.0],
                vec![0.0, 1.0, 2.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_walk_three_by_three() {
        let walk = walk(&three_by_three());

        let top: Vec<_> = walk.side(Side::Top).points().collect();
        let right: Vec<_> = walk.side(Side::Right).points().collect();
        let bottom: Vec<_> = walk.side(Side::Bottom).points().collect();
        let left: Vec<_> = walk.side(Side::Left).points().collect();

        assert_eq!(top, vec![(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]);
        assert_eq!(right, vec![(0.0, 2.0), (1.0, 2.0), (2.0, 2.0)]);
        assert_eq!(bottom, vec![(2.0, 2.0), (2.0, 1.0), (2.0, 0.0)]);
        assert_eq!(left, vec![(2.0, 0.0), (1.0, 0.0), (0.0, 0.0)]);
    }

    #[test]
    fn test_corners_shared_between_sides() {
        let walk = walk(&three_by_three());
        let sides = walk.sides();

        for i in 0..4 {
            let next = &sides[(i + 1) % 4];
            assert_eq!(sides[i].last(), next.first());
        }
        assert_eq!(walk.total_points(), 12);
    }

    #[test]
    fn test_walk_rectangular_lengths() {
        let grid = CoordinateGrid::from_axes(&[0.0, 1.0, 2.0, 3.0, 4.0], &[0.0, 1.0]).unwrap();
        let walk = walk(&grid);

        let lengths: Vec<_> = walk.sides().iter().map(BoundarySide::len).collect();
        assert_eq!(lengths, vec![2, 5, 2, 5]);
    }

    #[test]
    fn test_from_sides_rejects_wrong_order() {
        let side = |s| BoundarySide::new(s, vec![0.0], vec![0.0]).unwrap();
        let err = PerimeterWalk::from_sides([
            side(Side::Right),
            side(Side::Top),
            side(Side::Bottom),
            side(Side::Left),
        ])
        .unwrap_err();
        assert!(matches!(err, FootprintError::DegenerateGrid(_)));
    }

    #[test]
    fn test_boundary_side_rejects_unequal_lengths() {
        assert!(BoundarySide::new(Side::Top, vec![0.0, 1.0], vec![0.0]).is_err());
    }
}
