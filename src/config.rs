// src/config.rs
//
// A3: configuration surface. Kernel mode and penalty-form flags are
// tagged-variant enums rather than raw integers/strings (spec.md §9 Design
// Note "Dynamic-mode dispatch ... should be tagged-variant inputs ... to
// make all branches exhaustive at compile time"), `Serialize`/`Deserialize`
// so a config round-trips through JSON the way the teacher's own
// `preferences.rs` persisted view settings.

use serde::{Deserialize, Serialize};

/// BVSM kernel mode (spec.md §4.6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BvsmMode {
    /// Mode 0: the bond-valence mismatch sum only, no penalty term.
    SumOnly,
    /// Mode 1: mismatch sum plus the like-charge penalty.
    Both,
    /// Mode 2: penalty term only; the mismatch sum is treated as `|V_cond|`.
    PenaltyOnly,
}

/// BVSE kernel mode (spec.md §4.7).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BvseMode {
    /// Mode 0: Morse bonding energy only.
    BondingOnly,
    /// Mode 1: bonding plus screened-Coulomb repulsion.
    Both,
    /// Mode 2: screened-Coulomb repulsion only.
    CoulombOnly,
}

/// Like-charge penalty functional form for the BVSM kernel (spec.md §4.6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyKind {
    Linear,
    Quadratic,
}

/// Top-level map-generation configuration (spec.md §6).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MapConfig {
    /// Target grid spacing, Å; actual spacing is rounded to a multiple of
    /// 12 voxels per axis (see `grid::VoxelGrid::new`).
    pub resolution: f64,
    pub bvsm_mode: BvsmMode,
    pub bvse_mode: BvseMode,
    /// Penalty strength constant; `0.0` disables the penalty term outright.
    pub penalty_k: f64,
    pub penalty_kind: PenaltyKind,
    /// When set, the BVSE Coulomb term uses the C9 effective-charge table
    /// instead of formal oxidation states.
    pub effective_charge: bool,
    /// Offset of lone-pair dummy sites from their host atom, Å (default 1).
    pub lone_pair_distance: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            resolution: 0.5,
            bvsm_mode: BvsmMode::Both,
            bvse_mode: BvseMode::Both,
            penalty_k: 0.05,
            penalty_kind: PenaltyKind::Linear,
            effective_charge: true,
            lone_pair_distance: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_defaults() {
        let config = MapConfig::default();
        assert_eq!(config.bvsm_mode, BvsmMode::Both);
        assert_eq!(config.bvse_mode, BvseMode::Both);
        assert!((config.penalty_k - 0.05).abs() < 1e-12);
        assert!((config.lone_pair_distance - 1.0).abs() < 1e-12);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = MapConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: MapConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.penalty_kind, config.penalty_kind);
    }
}
