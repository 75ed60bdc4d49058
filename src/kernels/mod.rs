// src/kernels/mod.rs
//
// C6/C7: per-voxel kernels. `common` stages the buffered set into the
// compact, contiguous arrays spec.md §4.10/§9 calls for ("the kernels
// expect those contiguous arrays as their hot input"), built fresh
// immediately before each kernel run rather than carried as persistent
// row-indexed tables.

pub mod bvse;
pub mod bvsm;
pub mod common;

pub use bvse::bvse_at;
pub use bvsm::bvsm_at;
pub use common::{
    build_attractive_images, build_bond_images, build_coulomb_images, build_penalty_images,
    AttractiveImage, BondImage, CoulombImage, PenaltyImage,
};
