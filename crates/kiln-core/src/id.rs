//! Strongly-typed step counter.

use std::fmt;

/// Monotonically increasing step counter.
///
/// Incremented each time a solver advances its field by one time step.
/// `StepId(0)` identifies the initial condition, before any stepping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub u64);

impl StepId {
    /// The step after this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_increments() {
        assert_eq!(StepId::default(), StepId(0));
        assert_eq!(StepId(0).next(), StepId(1));
        assert_eq!(StepId(41).next(), StepId(42));
    }

    #[test]
    fn ordering_follows_inner_value() {
        assert!(StepId(1) < StepId(2));
        assert_eq!(StepId::from(7).to_string(), "7");
    }
}
