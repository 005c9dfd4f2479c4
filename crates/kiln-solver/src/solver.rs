//! The explicit diffusion solver.
//!
//! [`HeatSolver`] owns two equally shaped grids and ping-pongs between
//! them: each step computes the Laplacian of the committed field into the
//! staging grid, forms the forward-Euler update there, and swaps. The
//! committed field is never half-written; a failed step leaves it exactly
//! as the previous step left it.

use std::mem;

use kiln_core::{Element, StepId};
use kiln_grid::Grid;
use kiln_stencil::{BoundaryRule, DifferenceOperator};

use crate::config::{stability_limit, SolverConfig};
use crate::error::SolverError;
use crate::report::StepReport;
use crate::sink::SnapshotSink;
use crate::snapshot::Snapshot;

/// Time-steps the diffusion equation `du/dt = alpha * laplacian(u)` on an
/// owned 2D field.
///
/// Constructed from a validated [`SolverConfig`]; a value of this type is
/// always ready to step. After [`finalize`](HeatSolver::finalize) the field
/// stays readable but stepping returns [`SolverError::Finalized`].
///
/// All mutation goes through `&mut self`, so a shared reference is safe to
/// read from anywhere.
///
/// # Examples
///
/// ```
/// use kiln_solver::{HeatSolver, InitialCondition, SolverConfig};
///
/// let mut config = SolverConfig::new(9, 9, 1.0, 1.0, 1.0);
/// config.initial = InitialCondition::HotSpot {
///     background: 0.0,
///     spot: 100.0,
///     i: 4,
///     j: 4,
/// };
/// let mut solver = HeatSolver::new(config)?;
/// let report = solver.run(10)?;
/// assert_eq!(report.step.0, 10);
/// assert!(solver.field()[(4, 4)] < 100.0, "heat spreads off the peak");
/// # Ok::<(), kiln_solver::SolverError>(())
/// ```
pub struct HeatSolver<T: Element> {
    field: Grid<T>,
    staged: Grid<T>,
    operator: DifferenceOperator,
    alpha: f64,
    dx: f64,
    dy: f64,
    dt: f64,
    dt_limit: f64,
    dt_clamped: bool,
    divergence_check: bool,
    time: f64,
    step: StepId,
    finalized: bool,
}

impl<T: Element> HeatSolver<T> {
    /// Construct from a configuration.
    ///
    /// Validates everything, resolves the time step, and materializes the
    /// initial field. The first call to [`step`](HeatSolver::step) advances
    /// from `StepId(0)` at time zero.
    pub fn new(config: SolverConfig<T>) -> Result<Self, SolverError> {
        config.validate()?;
        let (dt, dt_clamped) = config.resolve_dt()?;
        let dt_limit = stability_limit(config.alpha, config.dx, config.dy);
        let SolverConfig {
            nx,
            ny,
            dx,
            dy,
            alpha,
            boundary,
            divergence_check,
            initial,
            ..
        } = config;
        let field = initial.materialize(nx, ny)?;
        let staged = Grid::new(nx, ny)?;
        Ok(Self {
            field,
            staged,
            operator: DifferenceOperator::new(boundary),
            alpha,
            dx,
            dy,
            dt,
            dt_limit,
            dt_clamped,
            divergence_check,
            time: 0.0,
            step: StepId(0),
            finalized: false,
        })
    }

    /// Advance one step.
    ///
    /// On success the new field is committed and described by the returned
    /// report. On [`SolverError::NumericalDivergence`] the update is
    /// discarded and the committed field, step, and time are unchanged;
    /// stepping again reproduces the error.
    pub fn step(&mut self) -> Result<StepReport, SolverError> {
        if self.finalized {
            return Err(SolverError::Finalized { step: self.step });
        }

        // laplacian(u) into the staging grid, every cell overwritten.
        self.operator
            .laplacian_into(&self.field, &mut self.staged, self.dx, self.dy)?;

        // u' = u + alpha * dt * laplacian(u), in one pass over staged.
        // Under CopyThrough the ring Laplacian is zero, so ring values
        // carry over from the committed field unchanged.
        let c = self.alpha * self.dt;
        self.staged
            .zip_assign(&self.field, move |s, f| *s = f + *s * c)?;

        if self.divergence_check {
            if let Some(index) = self.staged.first_non_finite() {
                return Err(SolverError::NumericalDivergence {
                    step: self.step.next(),
                    index,
                });
            }
        }

        mem::swap(&mut self.field, &mut self.staged);
        self.step = self.step.next();
        self.time += self.dt;
        Ok(self.report())
    }

    /// Advance `steps` steps, returning the final report.
    ///
    /// With `steps` zero this takes no step and reports the current state.
    pub fn run(&mut self, steps: usize) -> Result<StepReport, SolverError> {
        let mut last = self.report();
        for _ in 0..steps {
            last = self.step()?;
        }
        Ok(last)
    }

    /// Advance `steps` steps, recording into `sink` every `every` steps.
    ///
    /// The last step of the run is always recorded; `every` of zero is
    /// treated as one. A sink error aborts the run after the step that was
    /// being recorded has already committed.
    pub fn run_with_sink<S>(
        &mut self,
        steps: usize,
        every: usize,
        sink: &mut S,
    ) -> Result<StepReport, SolverError>
    where
        S: SnapshotSink<T>,
    {
        let every = every.max(1);
        let mut last = self.report();
        for k in 1..=steps {
            last = self.step()?;
            if k % every == 0 || k == steps {
                sink.record(&self.snapshot())?;
            }
        }
        Ok(last)
    }

    /// Record the current state into `sink` once.
    pub fn export_to<S>(&self, sink: &mut S) -> Result<(), SolverError>
    where
        S: SnapshotSink<T>,
    {
        sink.record(&self.snapshot()).map_err(SolverError::from)
    }

    /// A borrowed view of the committed field with its metadata.
    pub fn snapshot(&self) -> Snapshot<'_, T> {
        Snapshot::new(&self.field, self.step, self.time, self.dx, self.dy)
    }

    /// Stop accepting steps. Idempotent; reads stay available.
    pub fn finalize(&mut self) {
        self.finalized = true;
    }

    /// Consume the solver, keeping only the committed field.
    pub fn into_grid(self) -> Grid<T> {
        self.field
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// The committed field.
    pub fn field(&self) -> &Grid<T> {
        &self.field
    }

    /// Grid extent along x.
    pub fn nx(&self) -> usize {
        self.field.nx()
    }

    /// Grid extent along y.
    pub fn ny(&self) -> usize {
        self.field.ny()
    }

    /// Grid shape as `(nx, ny)`.
    pub fn shape(&self) -> (usize, usize) {
        self.field.shape()
    }

    /// Grid spacing as `(dx, dy)`.
    pub fn spacing(&self) -> (f64, f64) {
        (self.dx, self.dy)
    }

    /// Diffusion coefficient.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// The step size applied on every step.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// The stability limit for this geometry and diffusivity.
    pub fn max_dt(&self) -> f64 {
        self.dt_limit
    }

    /// True when the configured step was clamped to the limit.
    pub fn dt_clamped(&self) -> bool {
        self.dt_clamped
    }

    /// The boundary rule in use.
    pub fn boundary(&self) -> BoundaryRule {
        self.operator.rule()
    }

    /// Simulated time of the committed field.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of committed steps.
    pub fn step_id(&self) -> StepId {
        self.step
    }

    /// True once [`finalize`](HeatSolver::finalize) has been called.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    fn report(&self) -> StepReport {
        StepReport {
            step: self.step,
            time: self.time,
            dt: self.dt,
            dt_clamped: self.dt_clamped,
            max_abs: self.field.max_abs(),
        }
    }
}

// The grids are plain owned buffers, so the solver moves between threads
// and shares read access freely.
const _: () = {
    const fn assert_send_sync<S: Send + Sync>() {}
    assert_send_sync::<HeatSolver<f64>>();
    assert_send_sync::<HeatSolver<kiln_core::Vec3>>();
};

impl<T: Element> std::fmt::Debug for HeatSolver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeatSolver")
            .field("shape", &self.shape())
            .field("alpha", &self.alpha)
            .field("dt", &self.dt)
            .field("boundary", &self.boundary())
            .field("step", &self.step)
            .field("time", &self.time)
            .field("finalized", &self.finalized)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DtPolicy, TimeStep, AUTO_DT_SAFETY};
    use crate::error::SinkError;
    use crate::initial::InitialCondition;
    use crate::sink::MemoryRecorder;

    fn hot_spot_config(n: usize) -> SolverConfig<f64> {
        let mut config = SolverConfig::new(n, n, 1.0, 1.0, 1.0);
        config.initial = InitialCondition::HotSpot {
            background: 0.0,
            spot: 100.0,
            i: n / 2,
            j: n / 2,
        };
        config
    }

    #[test]
    fn construction_materializes_the_initial_field() {
        let solver = HeatSolver::new(hot_spot_config(5)).unwrap();
        assert_eq!(solver.shape(), (5, 5));
        assert_eq!(solver.field()[(2, 2)], 100.0);
        assert_eq!(solver.step_id(), StepId(0));
        assert_eq!(solver.time(), 0.0);
        assert!(!solver.is_finalized());
    }

    #[test]
    fn invalid_config_fails_construction() {
        let mut config = hot_spot_config(5);
        config.alpha = -1.0;
        match HeatSolver::new(config) {
            Err(SolverError::InvalidParameter { name: "alpha", .. }) => {}
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn heat_spreads_from_a_hot_point() {
        let mut config = hot_spot_config(5);
        config.alpha = 0.1;
        let mut solver = HeatSolver::new(config).unwrap();
        let report = solver.step().unwrap();
        assert_eq!(report.step, StepId(1));

        let field = solver.field();
        assert!(field[(2, 2)] < 100.0, "peak must cool");
        for (i, j) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
            assert!(field[(i, j)] > 0.0, "neighbor ({i}, {j}) must warm");
        }
        assert_eq!(field[(0, 0)], 0.0, "heat cannot reach the corner yet");
    }

    #[test]
    fn values_stay_between_initial_extremes() {
        // A stable explicit step is a convex combination of neighbors, so
        // the field can never leave [min, max] of the initial data.
        let mut solver = HeatSolver::new(hot_spot_config(9)).unwrap();
        for _ in 0..200 {
            let report = solver.step().unwrap();
            assert!(report.max_abs <= 100.0 + 1e-9);
        }
        assert!(solver.field().iter().all(|&v| (-1e-9..=100.0).contains(&v)));
    }

    #[test]
    fn uniform_field_is_a_fixed_point() {
        for rule in [BoundaryRule::CopyThrough, BoundaryRule::OneSided] {
            let mut config = SolverConfig::new(6, 4, 0.5, 0.5, 2.0);
            config.initial = InitialCondition::Uniform(7.25);
            config.boundary = rule;
            let mut solver = HeatSolver::new(config).unwrap();
            let before = solver.field().clone();
            solver.run(5).unwrap();
            assert_eq!(*solver.field(), before, "rule {rule:?}");
        }
    }

    #[test]
    fn auto_dt_sits_below_the_stability_limit() {
        let solver = HeatSolver::new(hot_spot_config(5)).unwrap();
        let expected = AUTO_DT_SAFETY * solver.max_dt();
        assert!((solver.dt() - expected).abs() < 1e-15);
        assert!(!solver.dt_clamped());
    }

    #[test]
    fn strict_policy_rejects_an_unstable_step() {
        let mut config = hot_spot_config(5);
        config.time_step = TimeStep::Fixed(1.0);
        match HeatSolver::new(config) {
            Err(SolverError::UnstableTimestep {
                requested,
                max_stable,
            }) => {
                assert_eq!(requested, 1.0);
                assert_eq!(max_stable, 0.25);
            }
            other => panic!("expected UnstableTimestep, got {other:?}"),
        }
    }

    #[test]
    fn clamp_policy_caps_dt_and_reports_it() {
        let mut config = hot_spot_config(5);
        config.time_step = TimeStep::Fixed(1.0);
        config.dt_policy = DtPolicy::Clamp;
        let mut solver = HeatSolver::new(config).unwrap();
        assert_eq!(solver.dt(), 0.25);
        assert!(solver.dt_clamped());
        let report = solver.step().unwrap();
        assert!(report.dt_clamped, "every report carries the clamp flag");
        assert_eq!(report.dt, 0.25);
    }

    #[test]
    fn finalize_blocks_stepping_but_not_reading() {
        let mut solver = HeatSolver::new(hot_spot_config(5)).unwrap();
        solver.step().unwrap();
        solver.finalize();
        solver.finalize();
        match solver.step() {
            Err(SolverError::Finalized { step }) => assert_eq!(step, StepId(1)),
            other => panic!("expected Finalized, got {other:?}"),
        }
        assert!(solver.is_finalized());
        assert_eq!(solver.snapshot().step(), StepId(1));
        let grid = solver.into_grid();
        assert_eq!(grid.shape(), (5, 5));
    }

    #[test]
    fn divergence_rolls_the_step_back() {
        // A checkerboard at f64::MAX overflows the Laplacian immediately.
        let huge = Grid::from_fn(5, 5, |i, j| {
            if (i + j) % 2 == 0 {
                f64::MAX
            } else {
                -f64::MAX
            }
        })
        .unwrap();
        let mut config = SolverConfig::new(5, 5, 1.0, 1.0, 1.0);
        config.initial = InitialCondition::Grid(huge.clone());
        let mut solver = HeatSolver::new(config).unwrap();

        match solver.step() {
            Err(SolverError::NumericalDivergence { step, .. }) => {
                assert_eq!(step, StepId(1), "the failing step is the one attempted");
            }
            other => panic!("expected NumericalDivergence, got {other:?}"),
        }
        assert_eq!(*solver.field(), huge, "committed field must be untouched");
        assert_eq!(solver.step_id(), StepId(0));
        assert_eq!(solver.time(), 0.0);
        assert!(solver.step().is_err(), "retrying reproduces the failure");
    }

    #[test]
    fn divergence_check_can_be_disabled() {
        let huge = Grid::from_fn(5, 5, |i, j| {
            if (i + j) % 2 == 0 {
                f64::MAX
            } else {
                -f64::MAX
            }
        })
        .unwrap();
        let mut config = SolverConfig::new(5, 5, 1.0, 1.0, 1.0);
        config.initial = InitialCondition::Grid(huge);
        config.divergence_check = false;
        let mut solver = HeatSolver::new(config).unwrap();
        let report = solver.step().unwrap();
        assert!(report.max_abs.is_infinite(), "overflow commits unchecked");
    }

    #[test]
    fn same_seed_reproduces_the_same_run() {
        let make = || {
            let mut config = SolverConfig::<f64>::new(12, 12, 1.0, 1.0, 1.0);
            config.initial = InitialCondition::Noise {
                mean: 0.0,
                amplitude: 1.0,
                seed: 42,
            };
            HeatSolver::new(config).unwrap()
        };
        let mut a = make();
        let mut b = make();
        a.run(25).unwrap();
        b.run(25).unwrap();
        assert_eq!(a.field(), b.field(), "runs must be bit-identical");
    }

    #[test]
    fn run_returns_the_last_report() {
        let mut solver = HeatSolver::new(hot_spot_config(5)).unwrap();
        let report = solver.run(7).unwrap();
        assert_eq!(report.step, StepId(7));
        assert!((report.time - 7.0 * solver.dt()).abs() < 1e-12);

        let idle = solver.run(0).unwrap();
        assert_eq!(idle.step, StepId(7), "zero steps reports current state");
    }

    #[test]
    fn run_with_sink_records_on_cadence_and_at_the_end() {
        let mut solver = HeatSolver::new(hot_spot_config(5)).unwrap();
        let mut recorder = MemoryRecorder::new();
        solver.run_with_sink(5, 2, &mut recorder).unwrap();
        let steps: Vec<StepId> = recorder.steps().collect();
        assert_eq!(steps, vec![StepId(2), StepId(4), StepId(5)]);
    }

    #[test]
    fn export_to_records_the_current_state_once() {
        let mut solver = HeatSolver::new(hot_spot_config(5)).unwrap();
        solver.run(3).unwrap();
        let mut recorder = MemoryRecorder::new();
        solver.export_to(&mut recorder).unwrap();
        assert_eq!(recorder.len(), 1);
        let kept = recorder.get(StepId(3)).unwrap();
        assert_eq!(kept.grid(), solver.field());
        assert_eq!(kept.spacing(), (1.0, 1.0));
    }

    struct RefusingSink;

    impl SnapshotSink<f64> for RefusingSink {
        fn record(&mut self, _: &Snapshot<'_, f64>) -> Result<(), SinkError> {
            Err(SinkError::Full { capacity: 0 })
        }
    }

    #[test]
    fn sink_failure_aborts_after_the_step_committed() {
        let mut solver = HeatSolver::new(hot_spot_config(5)).unwrap();
        match solver.run_with_sink(4, 1, &mut RefusingSink) {
            Err(SolverError::Sink(SinkError::Full { .. })) => {}
            other => panic!("expected Sink error, got {other:?}"),
        }
        // The first step committed before its snapshot was refused.
        assert_eq!(solver.step_id(), StepId(1));
    }

    #[test]
    fn debug_summarizes_without_dumping_the_field() {
        let solver = HeatSolver::new(hot_spot_config(5)).unwrap();
        let rendered = format!("{solver:?}");
        assert!(rendered.contains("shape"), "{rendered:?}");
        assert!(!rendered.contains("100.0"), "{rendered:?}");
    }
}
