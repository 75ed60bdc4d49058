// src/model/cell.rs

use crate::error::GeometryError;
use crate::geometry::{CellMatrix, Point3};

/// Unit cell: Cartesian row vectors `a, b, c`, their cached inverse, and the
/// scalar lengths/angles/volume parsed from the input record (spec.md §3).
#[derive(Clone, Debug)]
pub struct Cell {
    matrix: CellMatrix,
    pub lengths: (f64, f64, f64),
    pub angles_deg: (f64, f64, f64),
    pub volume: f64,
}

impl Cell {
    pub fn new(
        vectors: [Point3; 3],
        lengths: (f64, f64, f64),
        angles_deg: (f64, f64, f64),
    ) -> Result<Self, GeometryError> {
        let matrix = CellMatrix::new(vectors)?;
        let volume = matrix.volume();
        if volume <= 0.0 {
            return Err(GeometryError::NonPositiveVolume(volume));
        }
        Ok(Self {
            matrix,
            lengths,
            angles_deg,
            volume,
        })
    }

    pub fn vector(&self, axis: usize) -> Point3 {
        self.matrix.row(axis)
    }

    pub fn translate(&self, coord: Point3, shift: Point3) -> Point3 {
        self.matrix.translate(coord, shift)
    }

    pub fn frac_from_cart(&self, cart: Point3) -> Point3 {
        self.matrix.frac_from_cart(cart)
    }

    pub fn cart_from_frac(&self, frac: Point3) -> Point3 {
        self.matrix.cart_from_frac(frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_cell_volume() {
        let cell = Cell::new(
            [[5.9306, 0.0, 0.0], [0.0, 5.9306, 0.0], [0.0, 0.0, 5.9306]],
            (5.9306, 5.9306, 5.9306),
            (90.0, 90.0, 90.0),
        )
        .unwrap();
        assert!((cell.volume - 208.591_160_224_616).abs() < 1e-6);
    }

    #[test]
    fn singular_cell_is_rejected() {
        let result = Cell::new(
            [[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            (1.0, 2.0, 1.0),
            (90.0, 90.0, 90.0),
        );
        assert!(result.is_err());
    }
}
