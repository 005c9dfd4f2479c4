//! Per-step observations.

use kiln_core::StepId;

/// What a completed step looked like.
///
/// Returned by [`HeatSolver::step`](crate::HeatSolver::step) so callers can
/// watch a run without touching the field between steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    /// The step that was just committed.
    pub step: StepId,
    /// Simulated time after the step.
    pub time: f64,
    /// The step size actually applied.
    pub dt: f64,
    /// True when the configured step was reduced to the stability limit.
    pub dt_clamped: bool,
    /// Largest absolute component in the committed field.
    pub max_abs: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_compare_by_value() {
        let report = StepReport {
            step: StepId(3),
            time: 0.3,
            dt: 0.1,
            dt_clamped: false,
            max_abs: 1.25,
        };
        assert_eq!(report, report.clone());
        let rendered = format!("{report:?}");
        assert!(rendered.contains("max_abs"), "{rendered:?}");
    }
}
