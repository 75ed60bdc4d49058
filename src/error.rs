// src/error.rs
//
// Hand-rolled error types, no thiserror/anyhow — the teacher crate does not
// pull either in, and expresses its own fallible-input types the same way
// (see `physics/analysis/voids.rs`'s `VoidError`).

use std::fmt;

use crate::ion::Ion;

/// The input wire record (spec.md §6) was truncated or badly formatted.
#[derive(Debug, Clone)]
pub enum ParseError {
    Malformed(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Malformed(reason) => write!(f, "malformed input: {reason}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// The cell vectors do not describe a valid unit cell.
#[derive(Debug, Clone, Copy)]
pub enum GeometryError {
    SingularCell,
    NonPositiveVolume(f64),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::SingularCell => {
                write!(f, "cell vectors are singular (non-invertible)")
            }
            GeometryError::NonPositiveVolume(v) => {
                write!(f, "cell volume must be positive, got {v}")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// A required bond-valence parameter record was not found.
///
/// Fatal for BVSE (Morse parameters are non-optional); in BVSM the caller is
/// expected to skip the pair instead of constructing this error.
#[derive(Debug, Clone)]
pub enum ParamError {
    MissingRequired { conductor: Ion, other: Ion },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::MissingRequired { conductor, other } => write!(
                f,
                "no BVSE parameters for pair {conductor}.{other} (required, not optional)"
            ),
        }
    }
}

impl std::error::Error for ParamError {}
