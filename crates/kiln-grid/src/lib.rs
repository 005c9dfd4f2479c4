//! Owning 2D field container for kiln.
//!
//! A [`Grid`] stores one [`Element`](kiln_core::Element) value per point of
//! an `nx` by `ny` structured grid in a single contiguous buffer, addressed
//! x-fastest. Arithmetic between grids is shape-checked and elementwise;
//! arithmetic against a scalar broadcasts. Shapes are never coerced, and a
//! mismatch is always an error, never a silent truncation.
//!
//! With the `parallel` feature the elementwise kernels partition the buffer
//! across rayon worker threads. Each output cell depends only on its own
//! inputs, so the results are identical to the sequential path.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
mod ops;

pub use error::GridError;
pub use grid::Grid;
