//! Cell geometry: grid-space points and per-shape polygon outlines.
//!
//! Every cell is allotted one square unit of space. Hexagons interlock by
//! spanning a quarter unit into the next row and shifting half a column to
//! the right on odd rows.

use serde::{Deserialize, Serialize};

/// A (row, column) coordinate in grid space.
///
/// Vertices produced for hexagon outlines carry a size hint that rendering
/// consumers use to scale the polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub row: f64,
    pub col: f64,
    pub size: Option<f64>,
}

impl Point {
    pub fn new(row: f64, col: f64) -> Self {
        Self {
            row,
            col,
            size: None,
        }
    }

    pub fn with_size(row: f64, col: f64, size: f64) -> Self {
        Self {
            row,
            col,
            size: Some(size),
        }
    }
}

/// Size hint attached to every hexagon vertex.
const HEX_VERTEX_SIZE: f64 = 0.5;

/// Tessellation shape shared by every cell in a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellShape {
    #[default]
    Square,
    Hexagon,
}

impl CellShape {
    /// Polygon outline of the cell at (row, col), in traversal order.
    ///
    /// Squares get their four unit corners. Hexagons are pointy-top: the
    /// outline runs upper-left, lower-left, bottom point, lower-right,
    /// upper-right, top point over rows `row..row + 1.25`, and odd rows
    /// shift half a column right so the tiling interlocks.
    pub fn vertices(self, row: usize, col: usize) -> Vec<Point> {
        let r = row as f64;
        let c = col as f64;
        match self {
            CellShape::Square => vec![
                Point::new(r, c),
                Point::new(r, c + 1.0),
                Point::new(r + 1.0, c + 1.0),
                Point::new(r + 1.0, c),
            ],
            CellShape::Hexagon => {
                let off = if row % 2 == 1 { 0.5 } else { 0.0 };
                vec![
                    Point::with_size(r + 0.25, c + off, HEX_VERTEX_SIZE),
                    Point::with_size(r + 1.0, c + off, HEX_VERTEX_SIZE),
                    Point::with_size(r + 1.25, c + 0.5 + off, HEX_VERTEX_SIZE),
                    Point::with_size(r + 1.0, c + 1.0 + off, HEX_VERTEX_SIZE),
                    Point::with_size(r + 0.25, c + 1.0 + off, HEX_VERTEX_SIZE),
                    Point::with_size(r, c + 0.5 + off, HEX_VERTEX_SIZE),
                ]
            }
        }
    }
}

/// Center of mass of a polygon outline: the mean of its vertices.
pub fn centroid(vertices: &[Point]) -> Point {
    if vertices.is_empty() {
        return Point::new(0.0, 0.0);
    }
    let n = vertices.len() as f64;
    let row = vertices.iter().map(|p| p.row).sum::<f64>() / n;
    let col = vertices.iter().map(|p| p.col).sum::<f64>() / n;
    Point::new(row, col)
}
