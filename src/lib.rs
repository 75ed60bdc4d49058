//! Bond valence mismatch (BVSM) and bond valence site energy (BVSE) field
//! engine for solid-electrolyte conduction pathway analysis.
//!
//! Given a parsed unit cell and a conductor ion, this crate builds a
//! buffered periodic image of the structure and evaluates per-voxel scalar
//! fields over a grid aligned with the cell vectors. See [`driver::MapDriver`]
//! for the top-level entry point.

pub mod buffer;
pub mod charges;
pub mod config;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod ion;
pub mod kernels;
pub mod lone_pair;
pub mod model;
pub mod params;
pub mod grid;

pub use config::{BvseMode, BvsmMode, MapConfig, PenaltyKind};
pub use driver::MapDriver;
pub use error::{GeometryError, ParamError, ParseError};
pub use grid::VoxelGrid;
pub use ion::Ion;
pub use model::structure::Structure;
pub use params::{BvParamRecord, ParameterStore};
