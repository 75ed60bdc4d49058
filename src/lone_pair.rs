// src/lone_pair.rs
//
// C8: lone-pair synthesizer. Computes a vector bond-valence sum at each
// lone-pair-flagged core site; where its magnitude clears a threshold, every
// buffered image of that site gets a dummy anion-like image inserted along
// the unit direction.

use std::collections::HashMap;

use crate::buffer::BufferedSite;
use crate::geometry::{distance, Point3};
use crate::ion::Ion;
use crate::model::{Site, Structure};
use crate::params::ParameterStore;

/// Magnitude threshold above which a lone pair is considered
/// stereochemically active (spec.md §4.8).
pub const STRENGTH_CUTOFF: f64 = 0.5;

fn norm(v: Point3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Vector bond-valence sum at `site`: `Σ bv_j · (p_site − p_j)/r_j` over
/// buffered images whose ion has opposite oxidation-state sign to `site`'s
/// own ion (spec.md §4.8) — note this is relative to the site's own charge,
/// not the conductor's, unlike the voxel kernels.
fn vector_bvs(
    structure: &mut Structure,
    site: &Site,
    buffered: &[BufferedSite],
    store: &dyn ParameterStore,
) -> Point3 {
    let mut sum = [0.0; 3];
    let site_ox = site.ion.oxidation_state as i64;

    for image in buffered {
        if (image.oxidation_state as i64) * site_ox >= 0 {
            continue;
        }

        let r = distance(site.coords, image.coords, structure.r_cutoff);
        if r < 1.0 {
            // Chemically unreasonable overlap; original propagates a large
            // sentinel here too. A vector with overwhelming magnitude
            // guarantees the threshold check below fires.
            return [100.0, 100.0, 100.0];
        }
        if r > structure.r_cutoff {
            continue;
        }

        let other = Ion::new(image.element.clone(), image.oxidation_state);
        let Some(record) = structure.fetch_bv_param(&other, &site.ion, store, false) else {
            continue;
        };
        let bv = ((record.r0 - r) * record.ib).exp();
        let disp = [
            site.coords[0] - image.coords[0],
            site.coords[1] - image.coords[1],
            site.coords[2] - image.coords[2],
        ];
        sum[0] += bv * disp[0] / r;
        sum[1] += bv * disp[1] / r;
        sum[2] += bv * disp[2] / r;
    }

    sum
}

/// Extends `buffered` in place with lone-pair dummy images (element `"LP"`,
/// oxidation state -2) for every image of a site whose vector BVS magnitude
/// clears [`STRENGTH_CUTOFF`]. Sites below the threshold contribute nothing.
pub fn synthesize(
    structure: &mut Structure,
    buffered: &mut Vec<BufferedSite>,
    store: &dyn ParameterStore,
    lone_pair_distance: f64,
) {
    let flagged: Vec<Site> = structure
        .sites()
        .iter()
        .filter(|site| site.lp_flag)
        .cloned()
        .collect();
    if flagged.is_empty() {
        return;
    }

    let mut directions: HashMap<String, Point3> = HashMap::new();
    for site in &flagged {
        let vbvs = vector_bvs(structure, site, buffered, store);
        let magnitude = norm(vbvs);
        if magnitude > STRENGTH_CUTOFF {
            directions.insert(
                site.p1_label.clone(),
                [vbvs[0] / magnitude, vbvs[1] / magnitude, vbvs[2] / magnitude],
            );
        }
    }
    if directions.is_empty() {
        return;
    }

    let mut dummies = Vec::new();
    for image in buffered.iter().filter(|image| image.lp_flag) {
        let Some(paren_idx) = image.label.find('(') else {
            continue;
        };
        let parent_label = &image.label[..paren_idx];
        let Some(direction) = directions.get(parent_label) else {
            continue;
        };
        dummies.push(BufferedSite {
            label: format!("lp{}", image.label),
            element: "LP".to_string(),
            oxidation_state: -2,
            coords: [
                image.coords[0] + direction[0] * lone_pair_distance,
                image.coords[1] + direction[1] * lone_pair_distance,
                image.coords[2] + direction[2] * lone_pair_distance,
            ],
            lp_flag: false,
        });
    }
    buffered.extend(dummies);
}
