//! Error types for solver construction, stepping, and export.

use std::fmt;

use kiln_core::StepId;
use kiln_grid::GridError;
use kiln_stencil::StencilError;

/// Errors detected during solver construction or stepping.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// A physical or numerical parameter is not a finite, positive number.
    InvalidParameter {
        /// Parameter name as it appears in [`SolverConfig`](crate::SolverConfig).
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// The configured initial condition cannot produce the configured grid.
    InvalidInitial {
        /// Description of the mismatch.
        reason: String,
    },
    /// A fixed time step exceeds the stability limit under the strict policy.
    UnstableTimestep {
        /// The configured step.
        requested: f64,
        /// The largest stable step for these parameters.
        max_stable: f64,
    },
    /// A step produced a non-finite value and was rolled back.
    ///
    /// The field remains at its last good state; previously exported
    /// snapshots are unaffected.
    NumericalDivergence {
        /// The step that was attempted and rolled back.
        step: StepId,
        /// Flat index of the first offending cell.
        index: usize,
    },
    /// The solver was finalized; stepping is no longer allowed.
    Finalized {
        /// The step at which the solver was finalized.
        step: StepId,
    },
    /// A grid operation failed.
    Grid(GridError),
    /// A stencil or spacing validation failed.
    Stencil(StencilError),
    /// A snapshot sink refused or failed to record.
    Sink(SinkError),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
            Self::InvalidInitial { reason } => {
                write!(f, "invalid initial condition: {reason}")
            }
            Self::UnstableTimestep {
                requested,
                max_stable,
            } => {
                write!(
                    f,
                    "dt {requested} exceeds the stability limit {max_stable} for an explicit step"
                )
            }
            Self::NumericalDivergence { step, index } => {
                write!(
                    f,
                    "step {step} produced a non-finite value at cell {index}; rolled back"
                )
            }
            Self::Finalized { step } => {
                write!(f, "solver was finalized at step {step}")
            }
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Stencil(e) => write!(f, "stencil: {e}"),
            Self::Sink(e) => write!(f, "sink: {e}"),
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Stencil(e) => Some(e),
            Self::Sink(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SolverError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<StencilError> for SolverError {
    fn from(e: StencilError) -> Self {
        Self::Stencil(e)
    }
}

impl From<SinkError> for SolverError {
    fn from(e: SinkError) -> Self {
        Self::Sink(e)
    }
}

/// Errors a [`SnapshotSink`](crate::SnapshotSink) may report.
///
/// Writers living outside this crate map their own failures into these
/// variants; the solver only forwards them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The sink refuses further snapshots.
    Full {
        /// The sink's capacity.
        capacity: usize,
    },
    /// An underlying output operation failed.
    Io {
        /// Description of the failure.
        reason: String,
    },
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full { capacity } => {
                write!(f, "sink is full at {capacity} snapshots")
            }
            Self::Io { reason } => write!(f, "sink output failed: {reason}"),
        }
    }
}

impl std::error::Error for SinkError {}
