//! Read-only views of solver state.
//!
//! A [`Snapshot`] borrows the field together with the metadata an exporter
//! needs (step, time, spacing). [`OwnedSnapshot`] is its detached form for
//! sinks that keep history.

use kiln_core::{Element, StepId};
use kiln_grid::Grid;

/// A borrowed view of the field at one instant.
///
/// Constructed by [`HeatSolver::snapshot`](crate::HeatSolver::snapshot);
/// cheap to copy and carries everything needed to interpret the grid
/// without reaching back into the solver.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a, T: Element> {
    grid: &'a Grid<T>,
    step: StepId,
    time: f64,
    dx: f64,
    dy: f64,
}

impl<'a, T: Element> Snapshot<'a, T> {
    pub(crate) fn new(grid: &'a Grid<T>, step: StepId, time: f64, dx: f64, dy: f64) -> Self {
        Self {
            grid,
            step,
            time,
            dx,
            dy,
        }
    }

    /// The field itself.
    pub fn grid(&self) -> &'a Grid<T> {
        self.grid
    }

    /// Step at which the snapshot was taken.
    pub fn step(&self) -> StepId {
        self.step
    }

    /// Simulated time at the snapshot.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Grid spacing as `(dx, dy)`.
    pub fn spacing(&self) -> (f64, f64) {
        (self.dx, self.dy)
    }

    /// Extent along x.
    pub fn nx(&self) -> usize {
        self.grid.nx()
    }

    /// Extent along y.
    pub fn ny(&self) -> usize {
        self.grid.ny()
    }

    /// Cell values in storage order, x varying fastest.
    pub fn values(&self) -> &'a [T] {
        self.grid.as_slice()
    }

    /// Every scalar component in storage order.
    ///
    /// Cells appear x-fastest; within a cell, components in index order.
    /// For `T = f64` this is the plain cell sequence.
    pub fn components(&self) -> impl Iterator<Item = f64> + 'a {
        self.grid
            .as_slice()
            .iter()
            .flat_map(|value| (0..T::COMPONENTS).map(move |k| value.component(k)))
    }

    /// Detach into an [`OwnedSnapshot`], cloning the field.
    pub fn to_owned(&self) -> OwnedSnapshot<T> {
        OwnedSnapshot {
            grid: self.grid.clone(),
            step: self.step,
            time: self.time,
            dx: self.dx,
            dy: self.dy,
        }
    }
}

/// A snapshot that owns its field.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedSnapshot<T: Element> {
    grid: Grid<T>,
    step: StepId,
    time: f64,
    dx: f64,
    dy: f64,
}

impl<T: Element> OwnedSnapshot<T> {
    /// Borrow back as a [`Snapshot`].
    pub fn view(&self) -> Snapshot<'_, T> {
        Snapshot::new(&self.grid, self.step, self.time, self.dx, self.dy)
    }

    /// The stored field.
    pub fn grid(&self) -> &Grid<T> {
        &self.grid
    }

    /// Step at which the snapshot was taken.
    pub fn step(&self) -> StepId {
        self.step
    }

    /// Simulated time at the snapshot.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Grid spacing as `(dx, dy)`.
    pub fn spacing(&self) -> (f64, f64) {
        (self.dx, self.dy)
    }

    /// Give up the field, dropping the metadata.
    pub fn into_grid(self) -> Grid<T> {
        self.grid
    }
}
