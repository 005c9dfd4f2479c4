//! Boundary treatment for derivative sweeps.

/// How a derivative sweep treats the outer ring of grid points.
///
/// A centered stencil cannot be evaluated where it would read past the
/// edge of the grid. The rule below is chosen once when the
/// [`DifferenceOperator`](crate::DifferenceOperator) is constructed and is
/// applied to every ring point of every output, so no ring cell is ever
/// left at an accidental default.
///
/// # Examples
///
/// ```
/// use kiln_grid::Grid;
/// use kiln_stencil::{BoundaryRule, DifferenceOperator};
///
/// let ramp = Grid::from_fn(5, 5, |i, _| i as f64)?;
///
/// // CopyThrough: the ring derivative is defined as zero.
/// let op = DifferenceOperator::new(BoundaryRule::CopyThrough);
/// let d = op.first_derivative_x(&ramp, 1.0)?;
/// assert_eq!(d[(0, 2)], 0.0);
/// assert_eq!(d[(2, 2)], 1.0);
///
/// // OneSided: the ring uses a two-point difference instead.
/// let op = DifferenceOperator::new(BoundaryRule::OneSided);
/// let d = op.first_derivative_x(&ramp, 1.0)?;
/// assert_eq!(d[(0, 2)], 1.0);
/// # Ok::<(), kiln_stencil::StencilError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundaryRule {
    /// The derivative is defined as zero on the ring.
    ///
    /// Under an explicit update `next = value + dt * derivative` this holds
    /// every boundary value fixed, which is why the rule is named for the
    /// values copying through unchanged.
    #[default]
    CopyThrough,
    /// Ring points use one-sided differences.
    ///
    /// First derivatives fall back to the forward or backward two-point
    /// difference; the Laplacian evaluates the three-point second
    /// difference shifted one cell inward. First-order accurate on the
    /// ring, second-order in the interior.
    OneSided,
}
