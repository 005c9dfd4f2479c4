//! Kiln: structured-grid numerical fields and an explicit diffusion solver.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Kiln sub-crates. For most users, adding `kiln` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use kiln::prelude::*;
//!
//! // Diffuse a hot point across a 17 x 17 plate.
//! let mut config = SolverConfig::new(17, 17, 0.1, 0.1, 1.0);
//! config.initial = InitialCondition::HotSpot {
//!     background: 0.0,
//!     spot: 100.0,
//!     i: 8,
//!     j: 8,
//! };
//!
//! let mut solver = HeatSolver::new(config)?;
//! let mut recorder = MemoryRecorder::new();
//! let report = solver.run_with_sink(100, 25, &mut recorder)?;
//!
//! assert_eq!(report.step.0, 100);
//! assert_eq!(recorder.len(), 4, "one snapshot per 25 steps");
//! assert!(solver.field()[(8, 8)] < 100.0, "the peak has cooled");
//! # Ok::<(), SolverError>(())
//! ```
//!
//! The layers below the solver stand on their own: [`grid::Grid`] is a
//! general owning 2D container and [`stencil::DifferenceOperator`] computes
//! derivatives of any grid, no solver required.
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `kiln-core` | Fixed-size vectors, the [`types::Element`] trait, step IDs |
//! | [`grid`] | `kiln-grid` | The owning 2D [`grid::Grid`] and its elementwise operations |
//! | [`stencil`] | `kiln-stencil` | Finite-difference stencils, boundary rules, the operator |
//! | [`solver`] | `kiln-solver` | The heat solver, configuration, snapshots, and sinks |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Scalar and vector cell types (`kiln-core`).
///
/// Contains [`types::Vector`] with its [`types::Vec2`] and [`types::Vec3`]
/// aliases, the [`types::Element`] capability trait implemented by every
/// cell type, and [`types::StepId`].
pub use kiln_core as types;

/// The owning 2D grid (`kiln-grid`).
///
/// [`grid::Grid`] stores any [`types::Element`] in a flat x-fastest buffer
/// and provides shape-checked elementwise arithmetic.
pub use kiln_grid as grid;

/// Finite-difference stencils and the derivative operator (`kiln-stencil`).
///
/// [`stencil::DifferenceOperator`] computes first derivatives and the
/// five-point Laplacian under a configurable [`stencil::BoundaryRule`].
pub use kiln_stencil as stencil;

/// The explicit diffusion solver (`kiln-solver`).
///
/// [`solver::HeatSolver`] time-steps `du/dt = alpha * laplacian(u)` with a
/// stability-checked step size, snapshot views, and pluggable
/// [`solver::SnapshotSink`]s.
pub use kiln_solver as solver;

/// Common imports for typical Kiln usage.
///
/// ```rust
/// use kiln::prelude::*;
/// ```
///
/// This imports the cell types, the grid, the difference operator, and the
/// whole solver surface.
pub mod prelude {
    // Cell types
    pub use kiln_core::{Element, StepId, Vec2, Vec3, Vector};

    // Grid
    pub use kiln_grid::{Grid, GridError};

    // Derivatives
    pub use kiln_stencil::{BoundaryRule, DifferenceOperator, StencilError};

    // Solver
    pub use kiln_solver::{
        stability_limit, DtPolicy, HeatSolver, InitialCondition, MemoryRecorder, OwnedSnapshot,
        SinkError, Snapshot, SnapshotSink, SolverConfig, SolverError, StepReport, TimeStep,
    };
}
