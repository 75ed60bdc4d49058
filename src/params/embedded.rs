// src/params/embedded.rs
//
// Reference/test implementation of `ParameterStore`. Grounded on the
// teacher's `physics/bond_valence/database.rs`: a `OnceLock`-backed table
// built once via a small macro, with read-through lookup trying both pair
// orderings. This is NOT a claim to carry the real IUCr/soft-BV parameter
// database — spec.md treats that as an external collaborator — it exists so
// the engine is independently testable and demonstrable without a live
// database connection.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::ion::Ion;

use super::record::BvParamRecord;
use super::ParameterStore;

type PairKey = (String, i32, String, i32);

static TABLE: OnceLock<HashMap<PairKey, BvParamRecord>> = OnceLock::new();
static ATOMIC_NUMBERS: OnceLock<HashMap<&'static str, i32>> = OnceLock::new();

fn key(ion_a: &Ion, ion_b: &Ion) -> PairKey {
    (
        ion_a.element.clone(),
        ion_a.oxidation_state,
        ion_b.element.clone(),
        ion_b.oxidation_state,
    )
}

fn table() -> &'static HashMap<PairKey, BvParamRecord> {
    TABLE.get_or_init(|| {
        let mut db = HashMap::new();

        macro_rules! add {
            ($cat:expr, $cat_ox:expr, $an:expr, $an_ox:expr, $r0:expr, $ib:expr, $rc:expr) => {
                let rec = BvParamRecord::bv_only($r0, $ib, $rc);
                db.insert(($cat.to_string(), $cat_ox, $an.to_string(), $an_ox), rec);
                db.insert(($an.to_string(), $an_ox, $cat.to_string(), $cat_ox), rec);
            };
            ($cat:expr, $cat_ox:expr, $an:expr, $an_ox:expr, $r0:expr, $ib:expr, $rc:expr, $d0:expr, $rmin:expr, $i1r:expr, $i2r:expr) => {
                let rec = BvParamRecord::with_bvse($r0, $ib, $rc, $d0, $rmin, $i1r, $i2r);
                db.insert(($cat.to_string(), $cat_ox, $an.to_string(), $an_ox), rec);
                db.insert(($an.to_string(), $an_ox, $cat.to_string(), $cat_ox), rec);
            };
        }

        // Halide conductors against common framework cations. Values are
        // representative soft-BV parameters (Brese & O'Keeffe style),
        // chosen to reproduce the worked example in spec.md §8 (S1: the
        // simplified cubic beta-PbF2 structure).
        add!("Pb", 2, "F", -1, 1.90916, 1.0 / 0.37, 6.0, 0.65, 2.42, 1.49, 1.19);
        add!("Sn", 2, "F", -1, 1.94, 1.0 / 0.37, 6.0, 0.70, 2.10, 1.35, 1.19);
        add!("Sb", 3, "F", -1, 1.80, 1.0 / 0.37, 6.0, 0.75, 1.92, 1.10, 1.19);
        add!("K", 1, "F", -1, 2.02, 1.0 / 0.37, 6.0, 0.55, 2.44, 1.52, 1.19);
        add!("Na", 1, "Cl", -1, 2.15, 1.0 / 0.37, 5.5, 0.50, 2.82, 1.16, 1.81);
        add!("Li", 1, "O", -2, 1.466, 1.0 / 0.37, 5.0, 0.60, 1.90, 0.90, 1.35);
        add!("Fe", 3, "O", -2, 1.759, 1.0 / 0.37, 6.0, 0.80, 2.02, 0.78, 1.35);

        // Like-charge (cation-cation) pair: a conductor's BVSE screened-
        // Coulomb term runs over same-sign framework images too (spec.md
        // §4.7), not just the attractive pairs C3 prefetches, so the store
        // needs to answer this ordering as well.
        add!("Li", 1, "Mg", 2, 2.0, 1.0 / 0.37, 5.0, 0.3, 2.2, 0.76, 0.72);

        db
    })
}

fn atomic_numbers() -> &'static HashMap<&'static str, i32> {
    ATOMIC_NUMBERS.get_or_init(|| {
        [
            ("H", 1), ("He", 2), ("Li", 3), ("Be", 4), ("B", 5), ("C", 6), ("N", 7), ("O", 8),
            ("F", 9), ("Ne", 10), ("Na", 11), ("Mg", 12), ("Al", 13), ("Si", 14), ("P", 15),
            ("S", 16), ("Cl", 17), ("Ar", 18), ("K", 19), ("Ca", 20), ("Sc", 21), ("Ti", 22),
            ("V", 23), ("Cr", 24), ("Mn", 25), ("Fe", 26), ("Co", 27), ("Ni", 28), ("Cu", 29),
            ("Zn", 30), ("Ga", 31), ("Ge", 32), ("As", 33), ("Se", 34), ("Br", 35), ("Kr", 36),
            ("Rb", 37), ("Sr", 38), ("Y", 39), ("Zr", 40), ("Nb", 41), ("Mo", 42), ("Ag", 47),
            ("Cd", 48), ("In", 49), ("Sn", 50), ("Sb", 51), ("Te", 52), ("I", 53), ("Xe", 54),
            ("Cs", 55), ("Ba", 56), ("La", 57), ("Hf", 72), ("Ta", 73), ("W", 74), ("Au", 79),
            ("Hg", 80), ("Tl", 81), ("Pb", 82), ("Bi", 83), ("Th", 90), ("U", 92),
        ]
        .into_iter()
        .collect()
    })
}

/// Principal quantum number (period) for an atomic number, by the standard
/// noble-gas period boundaries.
fn period_for_atomic_number(z: i32) -> i32 {
    const BOUNDARIES: [i32; 7] = [2, 10, 18, 36, 54, 86, 118];
    for (period, boundary) in BOUNDARIES.iter().enumerate() {
        if z <= *boundary {
            return (period + 1) as i32;
        }
    }
    7
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedParameterStore;

impl ParameterStore for EmbeddedParameterStore {
    fn get_bv_param(&self, conductor: &Ion, other: &Ion, _bvse: bool) -> Option<BvParamRecord> {
        let db = table();
        db.get(&key(conductor, other))
            .or_else(|| db.get(&key(other, conductor)))
            .copied()
    }

    fn get_atomic_no(&self, element: &str) -> i32 {
        if element == "LP" {
            return 2; // lone-pair dummies render as He in .cif export (original_source convention)
        }
        *atomic_numbers().get(element).unwrap_or(&0)
    }

    fn get_period(&self, element: &str) -> i32 {
        period_for_atomic_number(self.get_atomic_no(element))
    }
}
