//! Explicit time-stepping solver for the diffusion (heat) equation.
//!
//! [`HeatSolver`] advances a [`Grid`](kiln_grid::Grid) field under
//! `du/dt = alpha * laplacian(u)` with the forward-Euler scheme, one
//! owned field per solver, staged ping-pong buffers, and an eagerly
//! validated configuration. The time step is bounded by the explicit
//! stability condition `alpha * dt * (1/dx^2 + 1/dy^2) <= 1/2`; a step
//! above the bound is rejected or clamped according to [`DtPolicy`],
//! never silently exceeded.
//!
//! # Ownership model
//!
//! All mutation goes through `&mut self`, and [`HeatSolver::snapshot`]
//! returns a [`Snapshot`] borrowing from the solver, so a held snapshot
//! blocks further stepping at compile time. Export goes through the
//! narrow [`SnapshotSink`] seam; the solver never touches files or
//! formats itself.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod initial;
pub mod report;
pub mod sink;
pub mod snapshot;
pub mod solver;

pub use config::{stability_limit, DtPolicy, SolverConfig, TimeStep, AUTO_DT_SAFETY};
pub use error::{SinkError, SolverError};
pub use initial::InitialCondition;
pub use kiln_stencil::BoundaryRule;
pub use report::StepReport;
pub use sink::{MemoryRecorder, SnapshotSink};
pub use snapshot::{OwnedSnapshot, Snapshot};
pub use solver::HeatSolver;
