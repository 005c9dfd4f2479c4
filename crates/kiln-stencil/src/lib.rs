//! Finite-difference stencils for kiln grids.
//!
//! This crate defines the [`DifferenceOperator`], which computes discrete
//! spatial derivatives of a [`Grid`](kiln_grid::Grid) using centered
//! second-order stencils, together with the [`BoundaryRule`] that decides
//! what happens on the outer ring of points where a centered stencil would
//! read out of bounds.
//!
//! The operator is a small configured value: construct it once with a
//! boundary rule and reuse it for any number of grids. It never mutates its
//! input and allocates nothing beyond the output grid.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod error;
pub mod operator;
pub mod stencil;

pub use boundary::BoundaryRule;
pub use error::StencilError;
pub use operator::DifferenceOperator;
pub use stencil::{Axis, Stencil, Tap};
