//! The capability contract for grid cell types.

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use crate::Vector;

/// Capability contract for types that can occupy a grid cell.
///
/// An element is a plain value made of a compile-time-fixed number of `f64`
/// components, closed under arithmetic with itself and with an `f64` scalar.
/// Implemented for `f64` (one component) and for every [`Vector<N>`].
///
/// The trait bounds state the contract directly: elements are `Copy` values
/// with no identity beyond their components, `Default` is the additive zero,
/// and arithmetic is componentwise and total. Non-finite results are values,
/// not errors; [`Element::finite`] is the check callers apply when they care.
pub trait Element:
    Copy
    + Default
    + PartialEq
    + Debug
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Add<f64, Output = Self>
    + Sub<f64, Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
{
    /// Number of `f64` components per element.
    const COMPONENTS: usize;

    /// Builds an element by calling `f` with each component index in order.
    fn from_components<F: FnMut(usize) -> f64>(f: F) -> Self;

    /// The `i`-th component. Callers keep `i < Self::COMPONENTS`.
    fn component(&self, i: usize) -> f64;

    /// True if every component is finite (neither infinite nor NaN).
    fn finite(&self) -> bool {
        (0..Self::COMPONENTS).all(|i| self.component(i).is_finite())
    }

    /// Largest absolute component value.
    fn abs_max(&self) -> f64 {
        (0..Self::COMPONENTS).fold(0.0_f64, |m, i| m.max(self.component(i).abs()))
    }
}

impl Element for f64 {
    const COMPONENTS: usize = 1;

    fn from_components<F: FnMut(usize) -> f64>(mut f: F) -> Self {
        f(0)
    }

    fn component(&self, i: usize) -> f64 {
        debug_assert!(i == 0, "f64 has a single component, got index {i}");
        *self
    }

    fn finite(&self) -> bool {
        self.is_finite()
    }

    fn abs_max(&self) -> f64 {
        self.abs()
    }
}

impl<const N: usize> Element for Vector<N> {
    const COMPONENTS: usize = N;

    fn from_components<F: FnMut(usize) -> f64>(f: F) -> Self {
        Vector::from_fn(f)
    }

    fn component(&self, i: usize) -> f64 {
        self.as_slice()[i]
    }
}
