//! Initial field contents.
//!
//! An [`InitialCondition`] describes the field a solver starts from. It is
//! checked during [`SolverConfig::validate`](crate::SolverConfig::validate)
//! and materialized into a [`Grid`] once, at construction.

use std::fmt;

use kiln_core::Element;
use kiln_grid::Grid;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::error::SolverError;

/// How the starting field is produced.
pub enum InitialCondition<T: Element> {
    /// Every cell holds the same value.
    Uniform(T),
    /// Use this grid directly. Its shape must match the solver's.
    Grid(Grid<T>),
    /// Evaluate a function of `(i, j)` per cell.
    Fn(Box<dyn Fn(usize, usize) -> T + Send + Sync>),
    /// A uniform background with a single cell set to `spot`.
    HotSpot {
        /// Value everywhere except the spot.
        background: T,
        /// Value at `(i, j)`.
        spot: T,
        /// Spot x coordinate, `< nx`.
        i: usize,
        /// Spot y coordinate, `< ny`.
        j: usize,
    },
    /// Uniform noise in `mean ± amplitude`, drawn per component from a
    /// seeded generator. The same seed always produces the same field.
    Noise {
        /// Center of the noise band.
        mean: f64,
        /// Half-width of the noise band, non-negative.
        amplitude: f64,
        /// Generator seed.
        seed: u64,
    },
}

impl<T: Element> InitialCondition<T> {
    /// Shape and parameter checks against the target extent.
    ///
    /// Cell values are not inspected here; [`materialize`](Self::materialize)
    /// rejects non-finite contents for every variant.
    pub fn check(&self, nx: usize, ny: usize) -> Result<(), SolverError> {
        match self {
            Self::Uniform(_) | Self::Fn(_) => Ok(()),
            Self::Grid(grid) => {
                if grid.shape() != (nx, ny) {
                    return Err(SolverError::InvalidInitial {
                        reason: format!(
                            "grid is {}x{} but the solver is {nx}x{ny}",
                            grid.nx(),
                            grid.ny()
                        ),
                    });
                }
                Ok(())
            }
            Self::HotSpot { i, j, .. } => {
                if *i >= nx || *j >= ny {
                    return Err(SolverError::InvalidInitial {
                        reason: format!("hot spot ({i}, {j}) outside {nx}x{ny} grid"),
                    });
                }
                Ok(())
            }
            Self::Noise {
                mean, amplitude, ..
            } => {
                if !mean.is_finite() || !amplitude.is_finite() || *amplitude < 0.0 {
                    return Err(SolverError::InvalidInitial {
                        reason: format!(
                            "noise needs finite mean and non-negative amplitude, \
                             got mean {mean}, amplitude {amplitude}"
                        ),
                    });
                }
                Ok(())
            }
        }
    }

    /// Produce the starting grid.
    ///
    /// Consumes the condition so a prebuilt [`Grid`] moves instead of
    /// cloning. Fails if allocation fails or any produced cell is
    /// non-finite.
    pub fn materialize(self, nx: usize, ny: usize) -> Result<Grid<T>, SolverError> {
        self.check(nx, ny)?;
        let grid = match self {
            Self::Uniform(value) => Grid::from_elem(nx, ny, value)?,
            Self::Grid(grid) => grid,
            Self::Fn(f) => Grid::from_fn(nx, ny, f)?,
            Self::HotSpot {
                background,
                spot,
                i,
                j,
            } => {
                let mut grid = Grid::from_elem(nx, ny, background)?;
                grid[(i, j)] = spot;
                grid
            }
            Self::Noise {
                mean,
                amplitude,
                seed,
            } => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                Grid::from_fn(nx, ny, |_, _| {
                    T::from_components(|_| mean + amplitude * (2.0 * rng.random::<f64>() - 1.0))
                })?
            }
        };
        if let Some(index) = grid.first_non_finite() {
            return Err(SolverError::InvalidInitial {
                reason: format!("non-finite value at flat index {index}"),
            });
        }
        Ok(grid)
    }
}

impl<T: Element> Default for InitialCondition<T> {
    fn default() -> Self {
        Self::Uniform(T::default())
    }
}

// The Fn variant has no useful Debug form, so the whole enum is printed
// by hand.
impl<T: Element> fmt::Debug for InitialCondition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform(value) => f.debug_tuple("Uniform").field(value).finish(),
            Self::Grid(grid) => f
                .debug_struct("Grid")
                .field("nx", &grid.nx())
                .field("ny", &grid.ny())
                .finish(),
            Self::Fn(_) => f.write_str("Fn(..)"),
            Self::HotSpot {
                background,
                spot,
                i,
                j,
            } => f
                .debug_struct("HotSpot")
                .field("background", background)
                .field("spot", spot)
                .field("i", i)
                .field("j", j)
                .finish(),
            Self::Noise {
                mean,
                amplitude,
                seed,
            } => f
                .debug_struct("Noise")
                .field("mean", mean)
                .field("amplitude", amplitude)
                .field("seed", seed)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::Vec2;

    #[test]
    fn default_is_uniform_zero() {
        let grid = InitialCondition::<f64>::default().materialize(3, 2).unwrap();
        assert!(grid.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn uniform_fills_every_cell() {
        let grid = InitialCondition::Uniform(4.5).materialize(4, 3).unwrap();
        assert_eq!(grid.len(), 12);
        assert!(grid.iter().all(|&v| v == 4.5));
    }

    #[test]
    fn prebuilt_grid_moves_through() {
        let source = Grid::from_fn(3, 3, |i, j| (i * 10 + j) as f64).unwrap();
        let grid = InitialCondition::Grid(source.clone()).materialize(3, 3).unwrap();
        assert_eq!(grid, source);
    }

    #[test]
    fn prebuilt_grid_shape_must_match() {
        let source = Grid::from_elem(3, 3, 1.0).unwrap();
        match InitialCondition::Grid(source).materialize(4, 3) {
            Err(SolverError::InvalidInitial { reason }) => {
                assert!(reason.contains("3x3"), "reason was {reason:?}");
            }
            other => panic!("expected InvalidInitial, got {other:?}"),
        }
    }

    #[test]
    fn function_variant_sees_coordinates() {
        let init = InitialCondition::Fn(Box::new(|i, j| if i == j { 1.0 } else { 0.0 }));
        let grid = init.materialize(3, 3).unwrap();
        assert_eq!(grid[(0, 0)], 1.0);
        assert_eq!(grid[(2, 2)], 1.0);
        assert_eq!(grid[(2, 0)], 0.0);
    }

    #[test]
    fn hot_spot_sets_exactly_one_cell() {
        let init = InitialCondition::HotSpot {
            background: 0.0,
            spot: 100.0,
            i: 2,
            j: 1,
        };
        let grid = init.materialize(5, 4).unwrap();
        assert_eq!(grid[(2, 1)], 100.0);
        let hot = grid.enumerate().filter(|&(_, _, &v)| v != 0.0).count();
        assert_eq!(hot, 1, "exactly one cell should be hot");
    }

    #[test]
    fn hot_spot_out_of_range_fails() {
        let init = InitialCondition::HotSpot {
            background: 0.0,
            spot: 1.0,
            i: 5,
            j: 0,
        };
        match init.materialize(5, 4) {
            Err(SolverError::InvalidInitial { reason }) => {
                assert!(reason.contains("(5, 0)"), "reason was {reason:?}");
            }
            other => panic!("expected InvalidInitial, got {other:?}"),
        }
    }

    #[test]
    fn noise_stays_inside_the_band_and_repeats_per_seed() {
        let make = |seed| {
            InitialCondition::<f64>::Noise {
                mean: 2.0,
                amplitude: 0.5,
                seed,
            }
            .materialize(16, 16)
            .unwrap()
        };
        let a = make(7);
        assert!(a.iter().all(|&v| (1.5..=2.5).contains(&v)));
        assert_eq!(a, make(7), "same seed must reproduce the field");
        assert_ne!(a, make(8), "different seeds should differ");
    }

    #[test]
    fn noise_fills_vector_components_independently() {
        let init = InitialCondition::<Vec2>::Noise {
            mean: 0.0,
            amplitude: 1.0,
            seed: 3,
        };
        let grid = init.materialize(8, 8).unwrap();
        let distinct = grid.iter().any(|v| v[0] != v[1]);
        assert!(distinct, "components should draw separate samples");
    }

    #[test]
    fn noise_rejects_bad_parameters() {
        for (mean, amplitude) in [(f64::NAN, 1.0), (0.0, -1.0), (0.0, f64::INFINITY)] {
            let init = InitialCondition::<f64>::Noise {
                mean,
                amplitude,
                seed: 0,
            };
            match init.check(4, 4) {
                Err(SolverError::InvalidInitial { .. }) => {}
                other => panic!("({mean}, {amplitude}): expected InvalidInitial, got {other:?}"),
            }
        }
    }

    #[test]
    fn non_finite_contents_are_rejected() {
        let mut source = Grid::from_elem(3, 3, 0.0).unwrap();
        source[(1, 2)] = f64::NAN;
        match InitialCondition::Grid(source).materialize(3, 3) {
            Err(SolverError::InvalidInitial { reason }) => {
                assert!(reason.contains("index 7"), "reason was {reason:?}");
            }
            other => panic!("expected InvalidInitial, got {other:?}"),
        }
    }

    #[test]
    fn debug_is_compact_for_every_variant() {
        let grid = Grid::from_elem(2, 2, 0.0).unwrap();
        let cases: Vec<(InitialCondition<f64>, &str)> = vec![
            (InitialCondition::Uniform(1.0), "Uniform"),
            (InitialCondition::Grid(grid), "Grid"),
            (InitialCondition::Fn(Box::new(|_, _| 0.0)), "Fn(..)"),
        ];
        for (init, needle) in cases {
            let rendered = format!("{init:?}");
            assert!(rendered.contains(needle), "{rendered:?}");
        }
    }
}
