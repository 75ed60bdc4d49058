// src/params/record.rs

use serde::{Deserialize, Serialize};

/// A bond-valence parameter record for an ordered ion pair.
///
/// `r0`, `ib`, `r_cutoff` are required for the BVSM kernel. `d0`, `rmin`,
/// `i1r`, `i2r` are additionally required by the BVSE kernel; a record with
/// any of those absent is admissible (spec.md §3) but will cause a fatal
/// `ParamError::MissingRequired` if BVSE asks for it during a kernel run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BvParamRecord {
    /// Equilibrium bond radius, Å.
    pub r0: f64,
    /// Inverse softness, 1/Å.
    pub ib: f64,
    /// Per-pair cutoff radius, Å.
    pub r_cutoff: f64,
    /// Bond dissociation energy (BVSE only).
    pub d0: Option<f64>,
    /// Equilibrium distance (BVSE only).
    pub rmin: Option<f64>,
    /// Ionic radius of the conductor ion (BVSE Coulomb screening only).
    pub i1r: Option<f64>,
    /// Ionic radius of the counter-ion (BVSE Coulomb screening only).
    pub i2r: Option<f64>,
}

impl BvParamRecord {
    pub fn bv_only(r0: f64, ib: f64, r_cutoff: f64) -> Self {
        Self {
            r0,
            ib,
            r_cutoff,
            d0: None,
            rmin: None,
            i1r: None,
            i2r: None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn with_bvse(r0: f64, ib: f64, r_cutoff: f64, d0: f64, rmin: f64, i1r: f64, i2r: f64) -> Self {
        Self {
            r0,
            ib,
            r_cutoff,
            d0: Some(d0),
            rmin: Some(rmin),
            i1r: Some(i1r),
            i2r: Some(i2r),
        }
    }

    /// `true` if all of the BVSE-only fields are present.
    pub fn has_bvse_fields(&self) -> bool {
        self.d0.is_some() && self.rmin.is_some() && self.i1r.is_some() && self.i2r.is_some()
    }
}
