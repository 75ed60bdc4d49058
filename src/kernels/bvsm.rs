// src/kernels/bvsm.rs
//
// C6: bond-valence sum mismatch kernel.

use crate::config::{BvsmMode, PenaltyKind};
use crate::geometry::{distance, Point3};

use super::common::{AttractiveImage, PenaltyImage};

fn penalty(r: f64, conductor_ox: f64, q: f64, k: f64, r_cutoff: f64, kind: PenaltyKind) -> f64 {
    match kind {
        PenaltyKind::Linear => k * (conductor_ox * q) * (1.0 / r - 1.0 / r_cutoff),
        PenaltyKind::Quadratic => k * (conductor_ox * q) * (1.0 / (r * r) - 1.0 / (r_cutoff * r_cutoff)),
    }
}

/// Fixed penalty charge (spec.md §4.6: "`q = −2` for the dummy charge in
/// the BVSM context").
const PENALTY_CHARGE: f64 = -2.0;

/// 1 Å collision guard sentinel (spec.md §4.6 edge case).
const COLLISION_SENTINEL: f64 = 20.0;

#[allow(clippy::too_many_arguments)]
pub fn bvsm_at(
    pos: Point3,
    r_cutoff: f64,
    conductor_ox: i32,
    mode: BvsmMode,
    penalty_k: f64,
    penalty_kind: PenaltyKind,
    attractive: &[AttractiveImage],
    penalty_images: &[PenaltyImage],
) -> f64 {
    let conductor_ox = conductor_ox as f64;

    let s = if mode == BvsmMode::PenaltyOnly {
        conductor_ox.abs()
    } else {
        let mut sum = 0.0;
        for image in attractive {
            let r = distance(pos, image.pos, r_cutoff);
            if r > r_cutoff {
                continue;
            }
            if r < 1.0 {
                sum = COLLISION_SENTINEL;
                break;
            }
            sum += ((image.r0 - r) * image.ib).exp();
        }
        sum
    };

    let mut penalty_sum = 0.0;
    if mode != BvsmMode::SumOnly {
        for image in penalty_images {
            let r = distance(pos, image.pos, r_cutoff);
            if r > r_cutoff {
                continue;
            }
            penalty_sum += penalty(r, conductor_ox, PENALTY_CHARGE, penalty_k, r_cutoff, penalty_kind);
        }
    }

    (s - conductor_ox.abs()).abs() + penalty_sum
}
