// src/grid.rs
//
// C5: voxel grid. Sizes a rectilinear grid aligned with the cell vectors to
// honor a requested spatial resolution, and maps voxel indices to Cartesian
// positions. Grounded on the teacher's grid-sampling loop in
// `physics/analysis/voids.rs` (same ceil-to-resolution sizing, same
// fractional -> Cartesian mapping), generalized from a flat occupancy scan
// to a dense scalar field with three independently-sized axes.

use crate::geometry::Point3;
use crate::model::Cell;

/// Rounds `m` up to the next multiple of 12 (spec.md §4.5: a minimum voxel
/// count granularity, chosen so downstream block-based consumers can assume
/// dimensions divisible by small factors).
fn round_up_to_twelve(m: usize) -> usize {
    m.div_ceil(12) * 12
}

fn axis_voxel_count(length: f64, resolution: f64) -> usize {
    let minimum = (length / resolution).ceil().max(1.0) as usize;
    round_up_to_twelve(minimum)
}

/// A dense 3D scalar field over the unit cell, indexed `(h, k, l)` with `l`
/// fastest-varying.
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    pub nh: usize,
    pub nk: usize,
    pub nl: usize,
    data: Vec<f64>,
}

impl VoxelGrid {
    /// Sizes a grid for `cell` at the requested `resolution` (Å per axis,
    /// before rounding).
    pub fn new(cell: &Cell, resolution: f64) -> Self {
        let nh = axis_voxel_count(cell.lengths.0, resolution);
        let nk = axis_voxel_count(cell.lengths.1, resolution);
        let nl = axis_voxel_count(cell.lengths.2, resolution);
        Self {
            nh,
            nk,
            nl,
            data: vec![0.0; nh * nk * nl],
        }
    }

    /// Cartesian position of voxel `(h, k, l)`: `pos(h,k,l) = (h/Nh)a +
    /// (k/Nk)b + (l/Nl)c` (spec.md §4.5). The grid origin coincides with the
    /// unit-cell origin.
    pub fn pos(&self, cell: &Cell, h: usize, k: usize, l: usize) -> Point3 {
        let frac = [
            h as f64 / self.nh as f64,
            k as f64 / self.nk as f64,
            l as f64 / self.nl as f64,
        ];
        cell.cart_from_frac(frac)
    }

    #[inline]
    fn index(&self, h: usize, k: usize, l: usize) -> usize {
        (h * self.nk + k) * self.nl + l
    }

    pub fn get(&self, h: usize, k: usize, l: usize) -> f64 {
        self.data[self.index(h, k, l)]
    }

    pub fn set(&mut self, h: usize, k: usize, l: usize, value: f64) {
        let idx = self.index(h, k, l);
        self.data[idx] = value;
    }

    /// Fills an `h`-plane from an already-computed row-major `(k, l)` slice,
    /// used by the map driver's per-plane parallel fan-out.
    pub(crate) fn set_plane(&mut self, h: usize, plane: &[f64]) {
        debug_assert_eq!(plane.len(), self.nk * self.nl);
        let start = h * self.nk * self.nl;
        self.data[start..start + plane.len()].copy_from_slice(plane);
    }

    pub fn reset(&mut self) {
        self.data.iter_mut().for_each(|v| *v = 0.0);
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.nh, self.nk, self.nl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;

    fn cubic_cell(len: f64) -> Cell {
        Cell::new(
            [[len, 0.0, 0.0], [0.0, len, 0.0], [0.0, 0.0, len]],
            (len, len, len),
            (90.0, 90.0, 90.0),
        )
        .unwrap()
    }

    #[test]
    fn resolution_half_angstrom_yields_twelve_voxels_per_axis() {
        // scenario S4 in spec.md
        let cell = cubic_cell(5.9306);
        let grid = VoxelGrid::new(&cell, 0.5);
        assert_eq!(grid.shape(), (12, 12, 12));
    }

    #[test]
    fn voxel_count_is_always_a_positive_multiple_of_twelve() {
        let cell = cubic_cell(17.3);
        let grid = VoxelGrid::new(&cell, 0.37);
        assert!(grid.nh % 12 == 0 && grid.nh > 0);
        assert!(grid.nk % 12 == 0 && grid.nk > 0);
        assert!(grid.nl % 12 == 0 && grid.nl > 0);
    }

    #[test]
    fn set_and_get_roundtrip() {
        let cell = cubic_cell(5.9306);
        let mut grid = VoxelGrid::new(&cell, 0.5);
        grid.set(3, 4, 5, 42.0);
        assert_eq!(grid.get(3, 4, 5), 42.0);
        assert_eq!(grid.get(0, 0, 0), 0.0);
    }

    #[test]
    fn pos_of_origin_voxel_is_cell_origin() {
        let cell = cubic_cell(5.9306);
        let grid = VoxelGrid::new(&cell, 0.5);
        let p = grid.pos(&cell, 0, 0, 0);
        assert_eq!(p, [0.0, 0.0, 0.0]);
    }
}
