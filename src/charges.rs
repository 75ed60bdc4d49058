// src/charges.rs
//
// C9: effective-charge solver. Balances total cation/anion Coulomb weight
// across the distinct ion species present in the core cell while preserving
// each ion's `1/sqrt(n)` period scaling (spec.md §4.9).

use std::collections::HashMap;

use crate::ion::Ion;
use crate::model::site::Site;
use crate::params::ParameterStore;

struct Partition {
    oxidation_state: i32,
    period: i32,
    multiplicity: i32,
    part: f64,
}

/// Computes effective charges for every distinct ion present in `sites`.
/// Ions with `oxidation_state == 0` have no defined effective charge (neither
/// branch of spec.md §4.9 applies to them, matching the original's
/// `ion.ox_state < 0` / `> 0` branching) and are omitted from the result.
pub fn compute_effective_charges(sites: &[Site], store: &dyn ParameterStore) -> HashMap<Ion, f64> {
    let mut multiplicities: Vec<(Ion, i32)> = Vec::new();
    for site in sites {
        match multiplicities.iter_mut().find(|(ion, _)| *ion == site.ion) {
            Some((_, count)) => *count += 1,
            None => multiplicities.push((site.ion.clone(), 1)),
        }
    }

    let partitions: Vec<(Ion, Partition)> = multiplicities
        .into_iter()
        .map(|(ion, multiplicity)| {
            let period = store.get_period(&ion.element);
            let oxidation_state = ion.oxidation_state;
            let part = oxidation_state as f64 * multiplicity as f64 / (period as f64).sqrt();
            (
                ion,
                Partition {
                    oxidation_state,
                    period,
                    multiplicity,
                    part,
                },
            )
        })
        .collect();

    let anion_sum: f64 = partitions
        .iter()
        .filter(|(_, p)| p.oxidation_state < 0)
        .map(|(_, p)| p.part)
        .sum();
    let cation_sum: f64 = partitions
        .iter()
        .filter(|(_, p)| p.oxidation_state > 0)
        .map(|(_, p)| p.part)
        .sum();

    let mut out = HashMap::with_capacity(partitions.len());
    for (ion, p) in &partitions {
        let v = p.oxidation_state as f64;
        let sqrt_n = (p.period as f64).sqrt();
        if p.oxidation_state < 0 {
            out.insert(ion.clone(), v / sqrt_n * (cation_sum / anion_sum).abs().sqrt());
        } else if p.oxidation_state > 0 {
            out.insert(ion.clone(), v / sqrt_n * (anion_sum / cation_sum).abs().sqrt());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::EmbeddedParameterStore;

    #[test]
    fn balances_cation_and_anion_weight_for_beta_pbf2() {
        let sites = vec![
            Site::new("Pb1-0", Ion::new("Pb", 2), true, [0.0, 0.0, 0.0]),
            Site::new("F1-0", Ion::new("F", -1), false, [0.5, 0.5, 0.5]),
            Site::new("F1-1", Ion::new("F", -1), false, [0.5, 0.0, 0.0]),
        ];
        let store = EmbeddedParameterStore;
        let charges = compute_effective_charges(&sites, &store);

        let pb = charges.get(&Ion::new("Pb", 2)).copied().unwrap();
        let f = charges.get(&Ion::new("F", -1)).copied().unwrap();
        assert!(pb > 0.0);
        assert!(f < 0.0);

        // P_cation = 2*1/sqrt(n_Pb), P_anion = -1*2/sqrt(n_F); charges solved
        // so that |P_cation| == |P_anion| once scaled back up by multiplicity
        // is NOT required (only the raw partition sums balance) — check the
        // defining ratio directly instead.
        let n_pb = store.get_period("Pb") as f64;
        let n_f = store.get_period("F") as f64;
        let cation_sum = 2.0 * 1.0 / n_pb.sqrt();
        let anion_sum = -1.0 * 2.0 / n_f.sqrt();
        let expected_pb = 2.0 / n_pb.sqrt() * (anion_sum / cation_sum).abs().sqrt();
        let expected_f = -1.0 / n_f.sqrt() * (cation_sum / anion_sum).abs().sqrt();
        assert!((pb - expected_pb).abs() < 1e-12);
        assert!((f - expected_f).abs() < 1e-12);
    }

    #[test]
    fn neutral_ion_has_no_effective_charge() {
        let sites = vec![Site::new("X1-0", Ion::new("X", 0), false, [0.0, 0.0, 0.0])];
        let store = EmbeddedParameterStore;
        let charges = compute_effective_charges(&sites, &store);
        assert!(charges.is_empty());
    }
}
