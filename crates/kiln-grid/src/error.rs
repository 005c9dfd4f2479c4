//! Error types for grid construction and arithmetic.

use std::fmt;

/// Errors arising from grid construction or fieldwise arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A grid extent is zero.
    InvalidDimension {
        /// Requested x extent.
        nx: usize,
        /// Requested y extent.
        ny: usize,
    },
    /// The requested extents overflow the addressable cell count.
    TooLarge {
        /// Requested x extent.
        nx: usize,
        /// Requested y extent.
        ny: usize,
    },
    /// The backing buffer could not be allocated.
    OutOfMemory {
        /// Number of cells requested.
        requested: usize,
    },
    /// Two grids in a binary operation have different shapes.
    ShapeMismatch {
        /// Shape `(nx, ny)` of the left operand.
        left: (usize, usize),
        /// Shape `(nx, ny)` of the right operand.
        right: (usize, usize),
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { nx, ny } => {
                write!(f, "grid extents must be positive, got {nx}x{ny}")
            }
            Self::TooLarge { nx, ny } => {
                write!(f, "grid extents {nx}x{ny} overflow the addressable cell count")
            }
            Self::OutOfMemory { requested } => {
                write!(f, "failed to allocate a buffer of {requested} cells")
            }
            Self::ShapeMismatch { left, right } => {
                write!(
                    f,
                    "grid shapes differ: {}x{} vs {}x{}",
                    left.0, left.1, right.0, right.1
                )
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_shapes() {
        let err = GridError::ShapeMismatch {
            left: (4, 3),
            right: (4, 2),
        };
        assert_eq!(err.to_string(), "grid shapes differ: 4x3 vs 4x2");
    }

    #[test]
    fn display_reports_zero_extent() {
        let err = GridError::InvalidDimension { nx: 0, ny: 5 };
        assert!(err.to_string().contains("0x5"), "got: {err}");
    }
}
