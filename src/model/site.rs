// src/model/site.rs

use serde::{Deserialize, Serialize};

use crate::geometry::Point3;
use crate::ion::Ion;

/// A site within the core unit cell (spec.md §3). Immutable after
/// construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Site {
    /// Unique label within the cell, e.g. `"Pb1-0"`.
    pub p1_label: String,
    pub ion: Ion,
    /// Does this site carry a stereochemically active lone pair?
    pub lp_flag: bool,
    pub coords: Point3,
}

impl Site {
    pub fn new(p1_label: impl Into<String>, ion: Ion, lp_flag: bool, coords: Point3) -> Self {
        Self {
            p1_label: p1_label.into(),
            ion,
            lp_flag,
            coords,
        }
    }
}
