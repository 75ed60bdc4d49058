// src/buffer.rs
//
// C4: buffer builder. Expands the core site table into a periodic
// supercell of images large enough that every point in the core cell has
// its cutoff-radius neighborhood fully covered, then filters down to the
// images that actually fall inside that required volume.

use crate::geometry::{inside, Point3};
use crate::model::{Cell, Structure};

/// One periodic image of a core site, carrying a single canonical
/// `oxidation_state` rather than a separate per-column copy (spec.md §9
/// open question: "carry a single canonical oxidation state per image").
#[derive(Clone, Debug)]
pub struct BufferedSite {
    /// `"{p1_label}({h}{k}{l})"`.
    pub label: String,
    pub element: String,
    pub oxidation_state: i32,
    pub coords: Point3,
    /// Carried over from the parent core site so C8 can find every image of
    /// a lone-pair-flagged site without a second pass over the core table.
    /// Synthesized lone-pair dummies themselves carry `false`.
    pub lp_flag: bool,
}

impl BufferedSite {
    pub fn is_lone_pair(&self) -> bool {
        self.element == "LP"
    }
}

/// Buffer shape `(Bh, Bk, Bl)`: `(3,3,3)`, plus 2 on any axis whose cell
/// length is below `r_cutoff` (spec.md §4.4).
pub fn buffer_shape(cell: &Cell, r_cutoff: f64) -> (i32, i32, i32) {
    let lengths = [cell.lengths.0, cell.lengths.1, cell.lengths.2];
    let mut shape = [3i32; 3];
    for (axis, &len) in lengths.iter().enumerate() {
        if len < r_cutoff {
            shape[axis] += 2;
        }
    }
    (shape[0], shape[1], shape[2])
}

/// Fractional bounding box of the Cartesian region `[-rC*1, a+b+c+rC*1]`
/// (spec.md §4.4), inside which a buffered image must lie to be admitted.
pub fn required_volume(cell: &Cell, r_cutoff: f64) -> (Point3, Point3) {
    let a = cell.vector(0);
    let b = cell.vector(1);
    let c = cell.vector(2);
    let sum = [a[0] + b[0] + c[0], a[1] + b[1] + c[1], a[2] + b[2] + c[2]];

    let start_cart = [-r_cutoff, -r_cutoff, -r_cutoff];
    let end_cart = [sum[0] + r_cutoff, sum[1] + r_cutoff, sum[2] + r_cutoff];

    (cell.frac_from_cart(start_cart), cell.frac_from_cart(end_cart))
}

/// `[-floor(b/2), ceil(b/2))`, the half-open integer translation range for
/// one axis of shape `b` (always odd, since `b` starts at 3 and only grows
/// by 2).
fn axis_range(b: i32) -> std::ops::Range<i32> {
    let low = -(b / 2);
    let high = (b + 1) / 2;
    low..high
}

/// Enumerates periodic images of every core site and admits those whose
/// fractional coordinate lies inside the required volume. Always includes
/// the `(0,0,0)` translation, so the core cell itself is present in the
/// buffered set.
pub fn build_buffer(structure: &Structure) -> Vec<BufferedSite> {
    let cell = &structure.cell;
    let r_cutoff = structure.r_cutoff;
    let (bh, bk, bl) = buffer_shape(cell, r_cutoff);
    let (start, end) = required_volume(cell, r_cutoff);

    let mut buffered = Vec::new();
    for site in structure.sites() {
        for h in axis_range(bh) {
            for k in axis_range(bk) {
                for l in axis_range(bl) {
                    let shift = [h as f64, k as f64, l as f64];
                    let cart = cell.translate(site.coords, shift);
                    let frac = cell.frac_from_cart(cart);
                    if !inside(start, end, frac) {
                        continue;
                    }
                    buffered.push(BufferedSite {
                        label: format!("{}({h}{k}{l})", site.p1_label),
                        element: site.ion.element.clone(),
                        oxidation_state: site.ion.oxidation_state,
                        coords: cart,
                        lp_flag: site.lp_flag,
                    });
                }
            }
        }
    }
    buffered
}
