//! Solver configuration and validation.
//!
//! [`SolverConfig`] is the construction input for [`HeatSolver`](crate::HeatSolver).
//! [`validate()`](SolverConfig::validate) checks every invariant up front;
//! a solver is never observable half-initialized.

use std::fmt;

use kiln_core::Element;
use kiln_stencil::{Axis, BoundaryRule, StencilError};

use crate::error::SolverError;
use crate::initial::InitialCondition;

/// Fraction of the stability limit used when the time step is [`TimeStep::Auto`].
pub const AUTO_DT_SAFETY: f64 = 0.9;

/// Largest stable explicit step for diffusivity `alpha` and spacings `dx`, `dy`.
///
/// The forward-Euler diffusion update stays bounded exactly when
/// `alpha * dt * (1/dx^2 + 1/dy^2) <= 1/2`; this returns the `dt` that
/// meets the bound with equality.
///
/// # Examples
///
/// ```
/// use kiln_solver::stability_limit;
///
/// let limit = stability_limit(1.0, 1.0, 1.0);
/// assert_eq!(limit, 0.25);
/// ```
pub fn stability_limit(alpha: f64, dx: f64, dy: f64) -> f64 {
    1.0 / (2.0 * alpha * (1.0 / (dx * dx) + 1.0 / (dy * dy)))
}

/// How the solver's time step is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TimeStep {
    /// Resolve to [`AUTO_DT_SAFETY`] times the stability limit.
    #[default]
    Auto,
    /// Use exactly this step, subject to the configured [`DtPolicy`].
    Fixed(f64),
}

/// What to do when a fixed time step exceeds the stability limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DtPolicy {
    /// Refuse construction with [`SolverError::UnstableTimestep`].
    #[default]
    Strict,
    /// Clamp the step to the limit and report it.
    ///
    /// The clamp is never silent: it is queryable as
    /// [`HeatSolver::dt_clamped`](crate::HeatSolver::dt_clamped) and carried
    /// on every [`StepReport`](crate::StepReport).
    Clamp,
}

/// Complete configuration for constructing a [`HeatSolver`](crate::HeatSolver).
pub struct SolverConfig<T: Element> {
    /// Grid extent along x.
    pub nx: usize,
    /// Grid extent along y.
    pub ny: usize,
    /// Grid spacing along x.
    pub dx: f64,
    /// Grid spacing along y.
    pub dy: f64,
    /// Diffusion coefficient, strictly positive.
    pub alpha: f64,
    /// Time-step selection.
    pub time_step: TimeStep,
    /// Policy for a fixed step above the stability limit.
    pub dt_policy: DtPolicy,
    /// Boundary rule for the derivative sweep.
    pub boundary: BoundaryRule,
    /// Scan each step's result for non-finite values and roll back on hit.
    pub divergence_check: bool,
    /// Initial field contents.
    pub initial: InitialCondition<T>,
}

impl<T: Element> SolverConfig<T> {
    /// A configuration with the given geometry and physics and defaults
    /// everywhere else: automatic time step, strict policy, copy-through
    /// boundary, divergence checking on, zero initial field.
    pub fn new(nx: usize, ny: usize, dx: f64, dy: f64, alpha: f64) -> Self {
        Self {
            nx,
            ny,
            dx,
            dy,
            alpha,
            time_step: TimeStep::Auto,
            dt_policy: DtPolicy::Strict,
            boundary: BoundaryRule::default(),
            divergence_check: true,
            initial: InitialCondition::default(),
        }
    }

    /// Validate every invariant.
    ///
    /// Pure validation pass; the solver constructor calls this first and
    /// then [`resolve_dt()`](SolverConfig::resolve_dt) and
    /// [`InitialCondition::materialize`].
    pub fn validate(&self) -> Result<(), SolverError> {
        // 1. Extents must be positive.
        if self.nx == 0 || self.ny == 0 {
            return Err(SolverError::Grid(kiln_grid::GridError::InvalidDimension {
                nx: self.nx,
                ny: self.ny,
            }));
        }
        // 2. Spacings follow the same rule the difference operator applies.
        if !self.dx.is_finite() || self.dx <= 0.0 {
            return Err(SolverError::Stencil(StencilError::InvalidSpacing {
                axis: Axis::X,
                value: self.dx,
            }));
        }
        if !self.dy.is_finite() || self.dy <= 0.0 {
            return Err(SolverError::Stencil(StencilError::InvalidSpacing {
                axis: Axis::Y,
                value: self.dy,
            }));
        }
        // 3. Diffusivity must be finite and positive.
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(SolverError::InvalidParameter {
                name: "alpha",
                value: self.alpha,
            });
        }
        // 4. A fixed step must be finite and positive before the stability
        //    question even arises.
        if let TimeStep::Fixed(dt) = self.time_step {
            if !dt.is_finite() || dt <= 0.0 {
                return Err(SolverError::InvalidParameter {
                    name: "dt",
                    value: dt,
                });
            }
        }
        // 5. The initial condition must be able to fill an nx-by-ny grid.
        self.initial.check(self.nx, self.ny)?;
        // 6. Stability under the configured policy.
        let _ = self.resolve_dt()?;
        Ok(())
    }

    /// Resolve the time step the solver will actually use.
    ///
    /// Returns `(dt, clamped)`. `clamped` is true only under
    /// [`DtPolicy::Clamp`] when the fixed step was reduced to the limit.
    pub fn resolve_dt(&self) -> Result<(f64, bool), SolverError> {
        let limit = stability_limit(self.alpha, self.dx, self.dy);
        match self.time_step {
            TimeStep::Auto => Ok((AUTO_DT_SAFETY * limit, false)),
            TimeStep::Fixed(dt) => {
                if dt <= limit {
                    Ok((dt, false))
                } else {
                    match self.dt_policy {
                        DtPolicy::Strict => Err(SolverError::UnstableTimestep {
                            requested: dt,
                            max_stable: limit,
                        }),
                        DtPolicy::Clamp => Ok((limit, true)),
                    }
                }
            }
        }
    }
}

impl<T: Element> fmt::Debug for SolverConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverConfig")
            .field("nx", &self.nx)
            .field("ny", &self.ny)
            .field("dx", &self.dx)
            .field("dy", &self.dy)
            .field("alpha", &self.alpha)
            .field("time_step", &self.time_step)
            .field("dt_policy", &self.dt_policy)
            .field("boundary", &self.boundary)
            .field("divergence_check", &self.divergence_check)
            .field("initial", &self.initial)
            .finish()
    }
}
