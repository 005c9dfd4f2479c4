//! Benchmark profiles and utilities for the Kiln field library.
//!
//! Provides pre-built [`SolverConfig`] profiles for benchmarking and
//! examples:
//!
//! - [`reference_profile`]: 100x100 grid (10K cells), seeded noise initial
//! - [`stress_profile`]: 316x316 grid (~100K cells) for stress testing
//! - [`hot_spot_profile`]: single heated cell on a cold plate

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use kiln_solver::{InitialCondition, SolverConfig};

/// Build the reference benchmark profile: 100x100 grid (10K cells).
///
/// Unit spacing, alpha 0.1, automatic time step (stability limit is
/// `1 / (2 * 0.1 * 2) = 2.5`). The field starts as seeded noise in
/// `[0, 1]` so every cell does real work from the first step.
pub fn reference_profile(seed: u64) -> SolverConfig<f64> {
    let mut config = SolverConfig::new(100, 100, 1.0, 1.0, 0.1);
    config.initial = InitialCondition::Noise {
        mean: 0.5,
        amplitude: 0.5,
        seed,
    };
    config
}

/// Build the stress benchmark profile: 316x316 grid (~100K cells).
///
/// Same physics as [`reference_profile`] at 10x the cell count.
pub fn stress_profile(seed: u64) -> SolverConfig<f64> {
    let mut config = SolverConfig::new(316, 316, 1.0, 1.0, 0.1);
    config.initial = InitialCondition::Noise {
        mean: 0.5,
        amplitude: 0.5,
        seed,
    };
    config
}

/// Build an `n x n` cold plate with one cell heated to `spot`.
pub fn hot_spot_profile(n: usize, spot: f64) -> SolverConfig<f64> {
    let mut config = SolverConfig::new(n, n, 1.0, 1.0, 0.1);
    config.initial = InitialCondition::HotSpot {
        background: 0.0,
        spot,
        i: n / 2,
        j: n / 2,
    };
    config
}
