//! Grid geometry — cell size and row-major cell offsets.
//!
//! Units are abstract: the demo feeds terminal cells, but nothing here
//! depends on a renderer.

use thiserror::Error;

/// A 2D position (top-left of a cell, or an animated tile position).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `target` by `fraction` (not clamped, so
    /// overshooting easings stay representable).
    pub fn lerp(self, target: Offset, fraction: f32) -> Offset {
        Offset {
            x: self.x + (target.x - self.x) * fraction,
            y: self.y + (target.y - self.y) * fraction,
        }
    }
}

/// Available width/height the grid is laid out in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Uniform size of every cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("grid needs at least one column")]
    ZeroColumns,
    #[error("grid needs at least one row")]
    ZeroRows,
    #[error("grid bounds must be positive and finite, got {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },
}

/// Validated grid shape: `columns × rows` cells filling `bounds`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    columns: usize,
    rows: usize,
    bounds: Bounds,
}

impl GridGeometry {
    pub fn new(columns: usize, rows: usize, bounds: Bounds) -> Result<Self, GeometryError> {
        if columns == 0 {
            return Err(GeometryError::ZeroColumns);
        }
        if rows == 0 {
            return Err(GeometryError::ZeroRows);
        }
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(bounds.width) || !valid(bounds.height) {
            return Err(GeometryError::InvalidBounds {
                width: bounds.width,
                height: bounds.height,
            });
        }
        Ok(Self {
            columns,
            rows,
            bounds,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cells, i.e. how many items can be placed.
    pub fn capacity(&self) -> usize {
        self.columns * self.rows
    }

    pub fn cell_size(&self) -> CellSize {
        CellSize {
            width: self.bounds.width / self.columns as f32,
            height: self.bounds.height / self.rows as f32,
        }
    }

    /// Top-left of cell `index` in row-major order, or `None` past the last cell.
    pub fn cell_offset(&self, index: usize) -> Option<Offset> {
        if index >= self.capacity() {
            return None;
        }
        let cell = self.cell_size();
        let row = index / self.columns;
        let col = index % self.columns;
        Some(Offset::new(cell.width * col as f32, cell.height * row as f32))
    }

    /// All cell offsets in row-major order.
    pub fn cell_offsets(&self) -> Vec<Offset> {
        (0..self.capacity())
            .filter_map(|i| self.cell_offset(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(4, 4, 400.0, 400.0, 100.0, 100.0)]
    #[case(3, 2, 90.0, 30.0, 30.0, 15.0)]
    #[case(6, 5, 100.0, 50.0, 100.0 / 6.0, 10.0)]
    #[case(1, 1, 7.0, 3.0, 7.0, 3.0)]
    fn cell_size_divides_bounds(
        #[case] columns: usize,
        #[case] rows: usize,
        #[case] width: f32,
        #[case] height: f32,
        #[case] cell_w: f32,
        #[case] cell_h: f32,
    ) {
        let g = GridGeometry::new(columns, rows, Bounds::new(width, height)).unwrap();
        assert_eq!(g.cell_size(), CellSize { width: cell_w, height: cell_h });
    }

    #[test]
    fn index_five_of_four_by_four_is_row_one_col_one() {
        let g = GridGeometry::new(4, 4, Bounds::new(400.0, 400.0)).unwrap();
        assert_eq!(g.cell_offset(5), Some(Offset::new(100.0, 100.0)));
    }

    #[test]
    fn offsets_are_row_major() {
        let g = GridGeometry::new(3, 2, Bounds::new(60.0, 40.0)).unwrap();
        let offsets = g.cell_offsets();
        assert_eq!(offsets.len(), 6);
        for (i, off) in offsets.iter().enumerate() {
            assert_eq!(off.x, 20.0 * (i % 3) as f32);
            assert_eq!(off.y, 20.0 * (i / 3) as f32);
        }
        assert_eq!(g.cell_offset(6), None);
    }

    #[test]
    fn rejects_degenerate_geometry() {
        let b = Bounds::new(10.0, 10.0);
        assert_eq!(GridGeometry::new(0, 2, b), Err(GeometryError::ZeroColumns));
        assert_eq!(GridGeometry::new(2, 0, b), Err(GeometryError::ZeroRows));
        assert!(matches!(
            GridGeometry::new(2, 2, Bounds::new(0.0, 10.0)),
            Err(GeometryError::InvalidBounds { .. })
        ));
        assert!(GridGeometry::new(2, 2, Bounds::new(f32::NAN, 10.0)).is_err());
    }

    #[test]
    fn lerp_hits_endpoints() {
        let a = Offset::new(0.0, 10.0);
        let b = Offset::new(20.0, 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Offset::new(10.0, 5.0));
    }
}
