//! Error types for derivative operations.

use std::fmt;

use kiln_grid::GridError;

use crate::stencil::Axis;

/// Errors arising from stencil configuration or derivative sweeps.
#[derive(Debug, Clone, PartialEq)]
pub enum StencilError {
    /// A grid spacing is not a finite, strictly positive number.
    InvalidSpacing {
        /// Which axis the spacing belongs to.
        axis: Axis,
        /// The offending value.
        value: f64,
    },
    /// The underlying grid operation failed.
    Grid(GridError),
}

impl fmt::Display for StencilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpacing { axis, value } => {
                write!(f, "spacing d{axis} must be finite and positive, got {value}")
            }
            Self::Grid(err) => write!(f, "grid operation failed: {err}"),
        }
    }
}

impl std::error::Error for StencilError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(err) => Some(err),
            Self::InvalidSpacing { .. } => None,
        }
    }
}

impl From<GridError> for StencilError {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}
