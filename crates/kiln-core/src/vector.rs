//! Inline fixed-size vector values.

use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// A fixed-size vector of `N` components stored inline.
///
/// `Vector` is a plain value type: no heap allocation, componentwise
/// arithmetic, equality by value. The component count is part of the type,
/// so vectors of different sizes cannot meet in a single expression.
///
/// All arithmetic is total. Division by zero follows IEEE 754 (the affected
/// component becomes infinite or NaN); callers that must reject non-finite
/// values check [`Vector::finite`] afterwards.
///
/// # Examples
///
/// ```
/// use kiln_core::Vector;
///
/// let v = Vector::new([1.0, 2.0]) + Vector::splat(0.5);
/// assert_eq!(v, Vector::new([1.5, 2.5]));
/// assert_eq!((v * 2.0)[1], 5.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector<const N: usize>([f64; N]);

/// Two-component vector.
pub type Vec2 = Vector<2>;

/// Three-component vector.
pub type Vec3 = Vector<3>;

impl<const N: usize> Vector<N> {
    /// Number of components, equal to the const parameter `N`.
    pub const LEN: usize = N;

    /// Builds a vector from its components.
    pub const fn new(components: [f64; N]) -> Self {
        Self(components)
    }

    /// The zero vector.
    pub const fn zero() -> Self {
        Self([0.0; N])
    }

    /// A vector with every component equal to `value`.
    pub const fn splat(value: f64) -> Self {
        Self([value; N])
    }

    /// Builds a vector by calling `f` with each component index in order.
    pub fn from_fn(f: impl FnMut(usize) -> f64) -> Self {
        Self(std::array::from_fn(f))
    }

    /// The components as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Consumes the vector, returning the component array.
    pub const fn into_array(self) -> [f64; N] {
        self.0
    }

    /// Dot product with `other`.
    pub fn dot(&self, other: &Self) -> f64 {
        let mut acc = 0.0;
        for i in 0..N {
            acc += self.0[i] * other.0[i];
        }
        acc
    }

    /// Squared Euclidean norm.
    pub fn norm_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Largest absolute component value. Zero for the zero vector.
    pub fn abs_max(&self) -> f64 {
        self.0.iter().fold(0.0_f64, |m, c| m.max(c.abs()))
    }

    /// True if every component is finite (neither infinite nor NaN).
    pub fn finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Componentwise application of `f`.
    pub fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self(std::array::from_fn(|i| f(self.0[i])))
    }

    fn zip(self, other: Self, mut f: impl FnMut(f64, f64) -> f64) -> Self {
        Self(std::array::from_fn(|i| f(self.0[i], other.0[i])))
    }
}

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> fmt::Display for Vector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

impl<const N: usize> From<[f64; N]> for Vector<N> {
    fn from(components: [f64; N]) -> Self {
        Self(components)
    }
}

impl<const N: usize> From<Vector<N>> for [f64; N] {
    fn from(v: Vector<N>) -> Self {
        v.0
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl<const N: usize> IndexMut<usize> for Vector<N> {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.0[i]
    }
}

// ── Vector-vector arithmetic ────────────────────────────────────

impl<const N: usize> Add for Vector<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a + b)
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a - b)
    }
}

impl<const N: usize> Mul for Vector<N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a * b)
    }
}

impl<const N: usize> Div for Vector<N> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a / b)
    }
}

impl<const N: usize> AddAssign for Vector<N> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const N: usize> SubAssign for Vector<N> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const N: usize> MulAssign for Vector<N> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<const N: usize> DivAssign for Vector<N> {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

// ── Vector-scalar arithmetic ────────────────────────────────────

impl<const N: usize> Add<f64> for Vector<N> {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        self.map(|a| a + rhs)
    }
}

impl<const N: usize> Sub<f64> for Vector<N> {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        self.map(|a| a - rhs)
    }
}

impl<const N: usize> Mul<f64> for Vector<N> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.map(|a| a * rhs)
    }
}

impl<const N: usize> Div<f64> for Vector<N> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        self.map(|a| a / rhs)
    }
}

impl<const N: usize> Mul<Vector<N>> for f64 {
    type Output = Vector<N>;

    fn mul(self, rhs: Vector<N>) -> Vector<N> {
        rhs * self
    }
}

impl<const N: usize> AddAssign<f64> for Vector<N> {
    fn add_assign(&mut self, rhs: f64) {
        *self = *self + rhs;
    }
}

impl<const N: usize> SubAssign<f64> for Vector<N> {
    fn sub_assign(&mut self, rhs: f64) {
        *self = *self - rhs;
    }
}

impl<const N: usize> MulAssign<f64> for Vector<N> {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl<const N: usize> DivAssign<f64> for Vector<N> {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}
