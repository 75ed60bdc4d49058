// src/params/mod.rs
//
// C2: parameter store client. The real tabulated bond-valence parameter
// database is an external collaborator (spec.md §1); this module defines
// the trait boundary the rest of the engine calls through, plus a small
// embedded reference implementation for tests and examples.

mod embedded;
mod record;

pub use embedded::EmbeddedParameterStore;
pub use record::BvParamRecord;

use crate::ion::Ion;

/// External bond-valence parameter database contract (spec.md §6).
///
/// Implementations are read-through caches, keyed by ordered ion pair; a
/// conforming implementation tries both `(conductor, other)` and
/// `(other, conductor)` if the underlying table only stores one ordering of
/// a pair (this crate's own `Structure::from_input` does that trying itself,
/// so implementations need not duplicate it, but may).
pub trait ParameterStore {
    /// Fetch bond-valence parameters for an ordered ion pair. `bvse` selects
    /// whether the caller needs the BVSE-only fields populated (`d0`,
    /// `rmin`, `i1r`, `i2r`); a store is free to ignore the flag and always
    /// return a fully-populated record.
    fn get_bv_param(&self, conductor: &Ion, other: &Ion, bvse: bool) -> Option<BvParamRecord>;

    /// Atomic number, used for `.cube`-style export metadata and downstream
    /// consumers; kept on the trait since the external database is the
    /// natural owner of this lookup (spec.md §6).
    fn get_atomic_no(&self, element: &str) -> i32;

    /// Principal quantum number (period), used by the effective-charge
    /// solver (C9, spec.md §4.9).
    fn get_period(&self, element: &str) -> i32;
}
