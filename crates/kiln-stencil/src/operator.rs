//! The centered finite-difference operator.

use kiln_core::Element;
use kiln_grid::Grid;

use crate::boundary::BoundaryRule;
use crate::error::StencilError;
use crate::stencil::{Axis, Stencil};

/// Computes discrete spatial derivatives of a grid.
///
/// Interior points use centered second-order stencils; the outer ring
/// follows the configured [`BoundaryRule`]. The operator holds no per-call
/// state, never mutates its input, and returns a new grid of identical
/// shape (or writes into a caller-provided one, see
/// [`laplacian_into`](DifferenceOperator::laplacian_into)).
///
/// # Examples
///
/// ```
/// use kiln_grid::Grid;
/// use kiln_stencil::DifferenceOperator;
///
/// // Laplacian of x^2 + y^2 is 4 at every interior point.
/// let g = Grid::from_fn(8, 8, |i, j| (i * i + j * j) as f64)?;
/// let lap = DifferenceOperator::default().laplacian(&g, 1.0, 1.0)?;
/// assert_eq!(lap[(3, 4)], 4.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DifferenceOperator {
    rule: BoundaryRule,
}

/// Validate one spacing value.
fn check_spacing(axis: Axis, value: f64) -> Result<(), StencilError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(StencilError::InvalidSpacing { axis, value });
    }
    Ok(())
}

/// Calls `f(i, j)` for every point outside the interior defined by the
/// stencil reach `(rx, ry)`. Each ring point is visited exactly once.
fn for_each_ring(
    nx: usize,
    ny: usize,
    rx: usize,
    ry: usize,
    mut f: impl FnMut(usize, usize),
) {
    let j_lo = ry.min(ny);
    let j_hi = ny.saturating_sub(ry).max(j_lo);
    let i_lo = rx.min(nx);
    let i_hi = nx.saturating_sub(rx).max(i_lo);

    for j in 0..j_lo {
        for i in 0..nx {
            f(i, j);
        }
    }
    for j in j_hi..ny {
        for i in 0..nx {
            f(i, j);
        }
    }
    for j in j_lo..j_hi {
        for i in 0..i_lo {
            f(i, j);
        }
        for i in i_hi..nx {
            f(i, j);
        }
    }
}

/// Two-point one-sided first difference along one axis, scaled by `inv_h`.
///
/// Zero when the axis has fewer than two points.
fn one_sided_first<T: Element>(
    grid: &Grid<T>,
    i: usize,
    j: usize,
    axis: Axis,
    inv_h: f64,
) -> T {
    let n = match axis {
        Axis::X => grid.nx(),
        Axis::Y => grid.ny(),
    };
    if n < 2 {
        return T::default();
    }
    let p = match axis {
        Axis::X => i,
        Axis::Y => j,
    };
    let sample = |q: usize| match axis {
        Axis::X => grid[(q, j)],
        Axis::Y => grid[(i, q)],
    };
    if p == 0 {
        (sample(1) - sample(0)) * inv_h
    } else {
        (sample(n - 1) - sample(n - 2)) * inv_h
    }
}

/// Three-point second difference along one axis, scaled by `inv_h2`.
///
/// Centered where possible, shifted one cell inward at the two edge
/// points. Zero when the axis has fewer than three points.
fn one_sided_second<T: Element>(
    grid: &Grid<T>,
    i: usize,
    j: usize,
    axis: Axis,
    inv_h2: f64,
) -> T {
    let n = match axis {
        Axis::X => grid.nx(),
        Axis::Y => grid.ny(),
    };
    if n < 3 {
        return T::default();
    }
    let p = match axis {
        Axis::X => i,
        Axis::Y => j,
    };
    let sample = |q: usize| match axis {
        Axis::X => grid[(q, j)],
        Axis::Y => grid[(i, q)],
    };
    let (a, b, c) = if p == 0 {
        (sample(0), sample(1), sample(2))
    } else if p == n - 1 {
        (sample(n - 1), sample(n - 2), sample(n - 3))
    } else {
        (sample(p + 1), sample(p), sample(p - 1))
    };
    (a - b * 2.0 + c) * inv_h2
}

impl DifferenceOperator {
    /// Creates an operator with the given boundary rule.
    pub fn new(rule: BoundaryRule) -> Self {
        Self { rule }
    }

    /// The configured boundary rule.
    pub fn rule(&self) -> BoundaryRule {
        self.rule
    }

    /// First derivative along x with spacing `dx`, as a new grid.
    ///
    /// Interior points use the centered difference
    /// `(g(i+1, j) - g(i-1, j)) / (2 dx)`; the two edge columns follow the
    /// boundary rule.
    pub fn first_derivative_x<T: Element>(
        &self,
        grid: &Grid<T>,
        dx: f64,
    ) -> Result<Grid<T>, StencilError> {
        check_spacing(Axis::X, dx)?;
        self.derivative(grid, Axis::X, Stencil::central_x(dx), 1.0 / dx)
    }

    /// First derivative along y with spacing `dy`, as a new grid.
    ///
    /// Interior points use the centered difference
    /// `(g(i, j+1) - g(i, j-1)) / (2 dy)`; the two edge rows follow the
    /// boundary rule.
    pub fn first_derivative_y<T: Element>(
        &self,
        grid: &Grid<T>,
        dy: f64,
    ) -> Result<Grid<T>, StencilError> {
        check_spacing(Axis::Y, dy)?;
        self.derivative(grid, Axis::Y, Stencil::central_y(dy), 1.0 / dy)
    }

    /// Five-point Laplacian with spacings `dx` and `dy`, as a new grid.
    ///
    /// Spacing is validated before the output grid is allocated.
    pub fn laplacian<T: Element>(
        &self,
        grid: &Grid<T>,
        dx: f64,
        dy: f64,
    ) -> Result<Grid<T>, StencilError> {
        check_spacing(Axis::X, dx)?;
        check_spacing(Axis::Y, dy)?;
        let mut out = if grid.is_empty() {
            Grid::default()
        } else {
            Grid::new(grid.nx(), grid.ny())?
        };
        self.laplacian_into(grid, &mut out, dx, dy)?;
        Ok(out)
    }

    /// Five-point Laplacian written into a caller-provided grid.
    ///
    /// `out` must have exactly the input's shape and be a distinct grid;
    /// the borrows make aliasing unrepresentable. Every cell of `out` is
    /// overwritten, ring included, so a dirty buffer is safe to reuse.
    pub fn laplacian_into<T: Element>(
        &self,
        grid: &Grid<T>,
        out: &mut Grid<T>,
        dx: f64,
        dy: f64,
    ) -> Result<(), StencilError> {
        check_spacing(Axis::X, dx)?;
        check_spacing(Axis::Y, dy)?;
        grid.check_same_shape(out)?;
        if grid.is_empty() {
            return Ok(());
        }

        let stencil = Stencil::laplacian_5pt(dx, dy);
        stencil.sweep_interior(grid, out);

        let (nx, ny) = grid.shape();
        let (rx, ry) = stencil.reach();
        match self.rule {
            BoundaryRule::CopyThrough => {
                for_each_ring(nx, ny, rx, ry, |i, j| {
                    out[(i, j)] = T::default();
                });
            }
            BoundaryRule::OneSided => {
                let inv_dx2 = 1.0 / (dx * dx);
                let inv_dy2 = 1.0 / (dy * dy);
                for_each_ring(nx, ny, rx, ry, |i, j| {
                    out[(i, j)] = one_sided_second(grid, i, j, Axis::X, inv_dx2)
                        + one_sided_second(grid, i, j, Axis::Y, inv_dy2);
                });
            }
        }
        Ok(())
    }

    /// Shared path for the two first derivatives.
    fn derivative<T: Element>(
        &self,
        grid: &Grid<T>,
        axis: Axis,
        stencil: Stencil,
        inv_h: f64,
    ) -> Result<Grid<T>, StencilError> {
        if grid.is_empty() {
            return Ok(Grid::default());
        }
        let (nx, ny) = grid.shape();
        let mut out = Grid::new(nx, ny)?;
        stencil.sweep_interior(grid, &mut out);

        let (rx, ry) = stencil.reach();
        match self.rule {
            BoundaryRule::CopyThrough => {
                // Freshly allocated output: the ring is already zero.
            }
            BoundaryRule::OneSided => {
                for_each_ring(nx, ny, rx, ry, |i, j| {
                    out[(i, j)] = one_sided_first(grid, i, j, axis, inv_h);
                });
            }
        }
        Ok(out)
    }
}
