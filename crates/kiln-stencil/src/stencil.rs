//! Stencils as explicit tap lists.

use std::fmt;

use kiln_core::Element;
use kiln_grid::Grid;
use smallvec::{smallvec, SmallVec};

/// A grid axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis, fastest-varying in memory.
    X,
    /// The y axis.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// A single stencil tap: a relative grid offset and its coefficient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tap {
    /// Offset along x, in cells.
    pub di: i32,
    /// Offset along y, in cells.
    pub dj: i32,
    /// Coefficient applied to the sampled value.
    pub weight: f64,
}

/// A fixed pattern of neighboring grid points with fixed coefficients.
///
/// Applying a stencil at a point sums `weight * value` over its taps. The
/// classic derivative stencils are provided as constructors with the grid
/// spacing folded into the weights, so application is pure multiply-add.
#[derive(Clone, Debug, PartialEq)]
pub struct Stencil {
    taps: SmallVec<[Tap; 5]>,
}

impl Stencil {
    /// Builds a stencil from explicit taps.
    pub fn new(taps: impl IntoIterator<Item = Tap>) -> Self {
        Self {
            taps: taps.into_iter().collect(),
        }
    }

    /// Centered first derivative along x: `(east - west) / (2 dx)`.
    pub fn central_x(dx: f64) -> Self {
        let w = 1.0 / (2.0 * dx);
        Self {
            taps: smallvec![
                Tap { di: -1, dj: 0, weight: -w },
                Tap { di: 1, dj: 0, weight: w },
            ],
        }
    }

    /// Centered first derivative along y: `(north - south) / (2 dy)`.
    pub fn central_y(dy: f64) -> Self {
        let w = 1.0 / (2.0 * dy);
        Self {
            taps: smallvec![
                Tap { di: 0, dj: -1, weight: -w },
                Tap { di: 0, dj: 1, weight: w },
            ],
        }
    }

    /// Five-point Laplacian with spacings `dx` and `dy`.
    ///
    /// `(east - 2 center + west) / dx^2 + (north - 2 center + south) / dy^2`.
    pub fn laplacian_5pt(dx: f64, dy: f64) -> Self {
        let wx = 1.0 / (dx * dx);
        let wy = 1.0 / (dy * dy);
        Self {
            taps: smallvec![
                Tap { di: -1, dj: 0, weight: wx },
                Tap { di: 1, dj: 0, weight: wx },
                Tap { di: 0, dj: -1, weight: wy },
                Tap { di: 0, dj: 1, weight: wy },
                Tap { di: 0, dj: 0, weight: -2.0 * (wx + wy) },
            ],
        }
    }

    /// The taps in application order.
    pub fn taps(&self) -> &[Tap] {
        &self.taps
    }

    /// Largest tap offset along each axis, as `(reach_x, reach_y)`.
    ///
    /// A point needs at least this many neighbors toward every edge for the
    /// stencil to be applied directly.
    pub fn reach(&self) -> (usize, usize) {
        let mut rx = 0usize;
        let mut ry = 0usize;
        for t in &self.taps {
            rx = rx.max(t.di.unsigned_abs() as usize);
            ry = ry.max(t.dj.unsigned_abs() as usize);
        }
        (rx, ry)
    }

    /// Evaluates the stencil at `(i, j)`, or `None` if any tap would land
    /// out of bounds.
    pub fn apply<T: Element>(&self, grid: &Grid<T>, i: usize, j: usize) -> Option<T> {
        let mut acc = T::default();
        for t in &self.taps {
            let ii = usize::try_from(i as i64 + i64::from(t.di)).ok()?;
            let jj = usize::try_from(j as i64 + i64::from(t.dj)).ok()?;
            acc += *grid.get(ii, jj)? * t.weight;
        }
        Some(acc)
    }

    /// Evaluates the stencil at every interior point of `grid`, writing the
    /// results into `out`. Ring points of `out` are left untouched.
    ///
    /// Interior means at least [`reach`](Stencil::reach) points from every
    /// edge. `grid` and `out` must have the same shape; the caller has
    /// checked this.
    pub(crate) fn sweep_interior<T: Element>(&self, grid: &Grid<T>, out: &mut Grid<T>) {
        let (nx, ny) = grid.shape();
        debug_assert_eq!(grid.shape(), out.shape());
        let (rx, ry) = self.reach();
        if nx < 2 * rx + 1 || ny < 2 * ry + 1 {
            // No interior along some axis; everything is ring.
            return;
        }

        // Flat offsets, valid for any interior point in x-fastest layout.
        let offsets: SmallVec<[(isize, f64); 5]> = self
            .taps
            .iter()
            .map(|t| (t.di as isize + nx as isize * t.dj as isize, t.weight))
            .collect();

        let src = grid.as_slice();
        let dst = out.as_mut_slice();
        for j in ry..ny - ry {
            let row = nx * j;
            for i in rx..nx - rx {
                let k = row + i;
                let mut acc = T::default();
                for &(off, w) in &offsets {
                    acc += src[(k as isize + off) as usize] * w;
                }
                dst[k] = acc;
            }
        }
    }
}
