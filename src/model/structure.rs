// src/model/structure.rs
//
// C3: structure container. Parses the already-split wire record of
// spec.md §6 (the P1-expanded crystallographic input), builds the cell,
// prefetches attractive-pair bond-valence parameters, and derives
// effective charges (C9).

use std::collections::HashMap;

use log::debug;

use crate::charges;
use crate::error::ParseError;
use crate::ion::{pair_key, Ion};
use crate::params::{BvParamRecord, ParameterStore};

use super::cell::Cell;
use super::site::Site;

/// Default cutoff radius (Å) used when no attractive-pair parameter record
/// carries a per-pair cutoff (spec.md §3 invariant).
pub const DEFAULT_CUTOFF: f64 = 6.0;

#[derive(Clone, Debug)]
pub struct Structure {
    pub cell: Cell,
    /// Ordered, label-indexed site table. Order matches the input record.
    sites: Vec<Site>,
    labels: HashMap<String, usize>,
    pub conductor: Ion,
    /// Global cutoff radius: max `r_cutoff` over attractive-pair records
    /// actually used, or `DEFAULT_CUTOFF` if none were found.
    pub r_cutoff: f64,
    /// Cache of fetched bond-valence parameter records, keyed `"ion1.ion2"`.
    bv_params: HashMap<String, BvParamRecord>,
    pub effective_charges: HashMap<Ion, f64>,
}

impl Structure {
    /// Builds a `Structure` from an already-parsed wire record, fetching
    /// attractive-pair parameters from `store` and deriving effective
    /// charges (spec.md §4.3).
    pub fn build(
        conductor: Ion,
        cell: Cell,
        sites: Vec<Site>,
        store: &dyn ParameterStore,
        bvse: bool,
    ) -> Self {
        let mut labels = HashMap::with_capacity(sites.len());
        for (i, site) in sites.iter().enumerate() {
            labels.insert(site.p1_label.clone(), i);
        }

        let mut bv_params = HashMap::new();
        let mut max_cutoff: f64 = 0.0;
        let mut seen_ions: Vec<&Ion> = Vec::new();

        for site in &sites {
            let ion = &site.ion;
            if *ion == conductor {
                continue;
            }
            // attractive pairs only: opposite sign of oxidation state
            if ion.oxidation_state.signum() == conductor.oxidation_state.signum() {
                continue;
            }
            if seen_ions.iter().any(|seen| *seen == ion) {
                continue;
            }
            seen_ions.push(ion);

            let key = pair_key(&conductor, ion);
            if bv_params.contains_key(&key) {
                continue;
            }
            if let Some(record) = store.get_bv_param(&conductor, ion, bvse) {
                max_cutoff = max_cutoff.max(record.r_cutoff);
                bv_params.insert(key, record);
            }
        }

        let r_cutoff = if max_cutoff > 0.0 {
            max_cutoff
        } else {
            DEFAULT_CUTOFF
        };

        let effective_charges = charges::compute_effective_charges(&sites, store);

        debug!(
            "structure built: {} sites, conductor={}, r_cutoff={:.3}",
            sites.len(),
            conductor,
            r_cutoff
        );

        Self {
            cell,
            sites,
            labels,
            conductor,
            r_cutoff,
            bv_params,
            effective_charges,
        }
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn site(&self, label: &str) -> Option<&Site> {
        self.labels.get(label).map(|&i| &self.sites[i])
    }

    /// Look up a cached bond-valence parameter record for an ordered or
    /// unordered ion pair, trying both orderings (`"ion1.ion2"` then
    /// `"ion2.ion1"`). Unlike the original's `get_bv_param`, a miss here does
    /// not lazily insert a placeholder — lazy top-up (used by the lone-pair
    /// synthesizer for vector-BVS pairs it didn't prefetch) goes through
    /// [`Structure::fetch_bv_param`] instead.
    pub fn bv_param(&self, ion1: &Ion, ion2: &Ion) -> Option<BvParamRecord> {
        self.bv_params
            .get(&pair_key(ion1, ion2))
            .or_else(|| self.bv_params.get(&pair_key(ion2, ion1)))
            .copied()
    }

    pub fn conductor_bv_param(&self, ion: &Ion) -> Option<BvParamRecord> {
        self.bv_param(&self.conductor, ion)
    }

    /// The conductor's own ionic radius, read off any cached attractive-pair
    /// record (`i1r` is documented as the conductor's radius, constant
    /// across every pair record for a given conductor). Used by the BVSE
    /// Coulomb term for lone-pair dummy images, which have no bond-valence
    /// parameter record of their own.
    pub fn conductor_radius(&self) -> Option<f64> {
        self.bv_params.values().find_map(|record| record.i1r)
    }

    /// Lazy top-up: fetch-and-cache a parameter pair not covered by the
    /// eager prefetch at construction (spec.md §5, "lazy top-up for
    /// rarely-needed vector-BVS pairs in C8").
    pub fn fetch_bv_param(
        &mut self,
        ion1: &Ion,
        ion2: &Ion,
        store: &dyn ParameterStore,
        bvse: bool,
    ) -> Option<BvParamRecord> {
        if let Some(record) = self.bv_param(ion1, ion2) {
            return Some(record);
        }
        let record = store.get_bv_param(ion1, ion2, bvse)?;
        self.bv_params.insert(pair_key(ion1, ion2), record);
        Some(record)
    }
}

/// Parses the tab-separated wire record of spec.md §6 into its constituent
/// parts. One line of header between the lattice vectors and the site table
/// is skipped, matching the source format.
pub fn parse_input(input: &str) -> Result<(Ion, (f64, f64, f64, f64, f64, f64), f64, [[f64; 3]; 3], Vec<Site>), ParseError> {
    let lines: Vec<&str> = input.lines().collect();
    if lines.len() < 8 {
        return Err(ParseError::Malformed(format!(
            "expected at least 8 lines, got {}",
            lines.len()
        )));
    }

    let conductor = parse_conductor(lines[0])?;
    let params = parse_six_floats(lines[1])?;
    let volume = parse_volume(lines[2])?;

    let mut vectors = [[0.0; 3]; 3];
    for (i, vector) in vectors.iter_mut().enumerate() {
        *vector = parse_three_floats(lines[3 + i])?;
    }

    // lines[6] is the header row, skipped.

    let mut sites = Vec::with_capacity(lines.len().saturating_sub(7));
    for line in &lines[7..] {
        if line.trim().is_empty() {
            continue;
        }
        sites.push(parse_site_line(line)?);
    }

    Ok((conductor, params, volume, vectors, sites))
}

fn parse_conductor(line: &str) -> Result<Ion, ParseError> {
    let cols: Vec<&str> = line.split('\t').collect();
    if cols.len() < 2 {
        return Err(ParseError::Malformed(format!(
            "conductor line needs 2 columns, got {:?}",
            line
        )));
    }
    let ox = cols[1]
        .trim()
        .parse::<i32>()
        .map_err(|e| ParseError::Malformed(format!("bad conductor oxidation state: {e}")))?;
    Ok(Ion::new(cols[0].trim(), ox))
}

fn parse_six_floats(line: &str) -> Result<(f64, f64, f64, f64, f64, f64), ParseError> {
    let v = parse_floats(line, 6)?;
    Ok((v[0], v[1], v[2], v[3], v[4], v[5]))
}

fn parse_three_floats(line: &str) -> Result<[f64; 3], ParseError> {
    let v = parse_floats(line, 3)?;
    Ok([v[0], v[1], v[2]])
}

fn parse_volume(line: &str) -> Result<f64, ParseError> {
    let cols: Vec<&str> = line.split('\t').collect();
    cols.first()
        .ok_or_else(|| ParseError::Malformed("missing volume column".into()))?
        .trim()
        .parse::<f64>()
        .map_err(|e| ParseError::Malformed(format!("bad volume: {e}")))
}

fn parse_floats(line: &str, n: usize) -> Result<Vec<f64>, ParseError> {
    let cols: Vec<&str> = line.split('\t').collect();
    if cols.len() < n {
        return Err(ParseError::Malformed(format!(
            "expected {n} tab-separated columns, got {:?}",
            line
        )));
    }
    cols[..n]
        .iter()
        .map(|c| {
            c.trim()
                .parse::<f64>()
                .map_err(|e| ParseError::Malformed(format!("bad float {:?}: {e}", c)))
        })
        .collect()
}

fn parse_site_line(line: &str) -> Result<Site, ParseError> {
    let cols: Vec<&str> = line.split('\t').collect();
    if cols.len() < 7 {
        return Err(ParseError::Malformed(format!(
            "site line needs 7 columns, got {:?}",
            line
        )));
    }
    let p1_label = cols[0].trim().to_string();
    let element = cols[1].trim().to_string();
    let ox_state: f64 = cols[2]
        .trim()
        .parse()
        .map_err(|e| ParseError::Malformed(format!("bad oxidation state: {e}")))?;
    let lp_flag = cols[3].trim() != "0";
    let x: f64 = cols[4]
        .trim()
        .parse()
        .map_err(|e| ParseError::Malformed(format!("bad x: {e}")))?;
    let y: f64 = cols[5]
        .trim()
        .parse()
        .map_err(|e| ParseError::Malformed(format!("bad y: {e}")))?;
    let z: f64 = cols[6]
        .trim()
        .parse()
        .map_err(|e| ParseError::Malformed(format!("bad z: {e}")))?;

    Ok(Site::new(
        p1_label,
        Ion::new(element, ox_state.round() as i32),
        lp_flag,
        [x, y, z],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::EmbeddedParameterStore;

    fn beta_pbf2_input() -> String {
        [
            "F\t-1",
            "5.9306\t5.9306\t5.9306\t90\t90\t90",
            "208.591160224616\t0",
            "5.9306\t0\t0",
            "0\t5.9306\t0",
            "0\t0\t5.9306",
            "label\telement\tox\tlp\tx\ty\tz",
            "Pb1-0\tPb\t2\t1\t0\t0\t0",
            "F1-0\tF\t-1\t0\t2.9653\t2.9653\t2.9653",
            "F1-1\tF\t-1\t0\t2.9653\t0\t0",
            "F1-2\tF\t-1\t0\t0\t2.9653\t0",
        ]
        .join("\n")
    }

    #[test]
    fn parses_wire_record() {
        let (conductor, params, volume, vectors, sites) = parse_input(&beta_pbf2_input()).unwrap();
        assert_eq!(conductor, Ion::new("F", -1));
        assert!((params.1 - 5.9306).abs() < 1e-9);
        assert!((volume - 208.591_160_224_616).abs() < 1e-6);
        assert!((vectors[1][1] - 5.9306).abs() < 1e-9);
        assert_eq!(sites.len(), 4);
        assert!((sites[1].coords[1] - 2.9653).abs() < 1e-9);
        assert!(sites[0].lp_flag);
        assert!(!sites[1].lp_flag);
    }

    #[test]
    fn builds_structure_with_attractive_pair_prefetched() {
        let (conductor, _params, _volume, vectors, sites) = parse_input(&beta_pbf2_input()).unwrap();
        let cell = Cell::new(vectors, (5.9306, 5.9306, 5.9306), (90.0, 90.0, 90.0)).unwrap();
        let store = EmbeddedParameterStore;
        let structure = Structure::build(conductor, cell, sites, &store, false);

        let param = structure
            .conductor_bv_param(&Ion::new("Pb", 2))
            .expect("Pb-F attractive pair should be prefetched");
        assert!((param.r0 - 1.90916).abs() < 1e-6);
        assert!((structure.r_cutoff - 6.0).abs() < 1e-9);
    }

    #[test]
    fn malformed_input_is_rejected() {
        let err = parse_input("too\tshort").unwrap_err();
        matches!(err, ParseError::Malformed(_));
    }
}
