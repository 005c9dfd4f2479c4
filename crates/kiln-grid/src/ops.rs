//! Fieldwise and scalar arithmetic on grids.
//!
//! Binary grid operations are shape-checked and named `try_*` because Rust
//! operator traits cannot return `Result`. Scalar operations broadcast and
//! are total, so they keep plain names. Division follows IEEE 754; a zero
//! divisor produces non-finite components rather than an error, and
//! [`Grid::first_non_finite`] is the check for callers that must reject
//! such values.

use kiln_core::Element;

use crate::error::GridError;
use crate::grid::Grid;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl<T: Element> Grid<T> {
    /// Errors unless `other` has exactly this grid's shape.
    pub fn check_same_shape(&self, other: &Self) -> Result<(), GridError> {
        if self.shape() != other.shape() {
            return Err(GridError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }

    /// Builds a new grid with `f(a, b)` applied to corresponding elements.
    ///
    /// Each output cell depends only on its own pair of inputs, so the
    /// parallel and sequential paths produce identical buffers.
    pub fn zip_with(
        &self,
        other: &Self,
        f: impl Fn(T, T) -> T + Send + Sync,
    ) -> Result<Self, GridError> {
        self.check_same_shape(other)?;

        #[cfg(feature = "parallel")]
        let data: Vec<T> = self
            .as_slice()
            .par_iter()
            .zip(other.as_slice().par_iter())
            .map(|(&a, &b)| f(a, b))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let data: Vec<T> = self
            .as_slice()
            .iter()
            .zip(other.as_slice().iter())
            .map(|(&a, &b)| f(a, b))
            .collect();

        Ok(Self::from_parts(self.nx(), self.ny(), data))
    }

    /// Applies `f(&mut a, b)` to corresponding elements in place.
    pub fn zip_assign(
        &mut self,
        other: &Self,
        f: impl Fn(&mut T, T) + Send + Sync,
    ) -> Result<(), GridError> {
        self.check_same_shape(other)?;

        #[cfg(feature = "parallel")]
        self.as_mut_slice()
            .par_iter_mut()
            .zip(other.as_slice().par_iter())
            .for_each(|(a, &b)| f(a, b));

        #[cfg(not(feature = "parallel"))]
        for (a, &b) in self.as_mut_slice().iter_mut().zip(other.as_slice().iter()) {
            f(a, b);
        }

        Ok(())
    }

    /// Applies `f` to every element in place.
    pub fn for_each_mut(&mut self, f: impl Fn(&mut T) + Send + Sync) {
        #[cfg(feature = "parallel")]
        self.as_mut_slice().par_iter_mut().for_each(f);

        #[cfg(not(feature = "parallel"))]
        for a in self.as_mut_slice() {
            f(a);
        }
    }

    // ── Fieldwise binary operations ─────────────────────────────────

    /// Elementwise sum as a new grid.
    pub fn try_add(&self, other: &Self) -> Result<Self, GridError> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Elementwise difference as a new grid.
    pub fn try_sub(&self, other: &Self) -> Result<Self, GridError> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Elementwise product as a new grid.
    pub fn try_mul(&self, other: &Self) -> Result<Self, GridError> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Elementwise quotient as a new grid.
    pub fn try_div(&self, other: &Self) -> Result<Self, GridError> {
        self.zip_with(other, |a, b| a / b)
    }

    /// Elementwise sum in place.
    pub fn try_add_assign(&mut self, other: &Self) -> Result<(), GridError> {
        self.zip_assign(other, |a, b| *a += b)
    }

    /// Elementwise difference in place.
    pub fn try_sub_assign(&mut self, other: &Self) -> Result<(), GridError> {
        self.zip_assign(other, |a, b| *a -= b)
    }

    /// Elementwise product in place.
    pub fn try_mul_assign(&mut self, other: &Self) -> Result<(), GridError> {
        self.zip_assign(other, |a, b| *a *= b)
    }

    /// Elementwise quotient in place.
    pub fn try_div_assign(&mut self, other: &Self) -> Result<(), GridError> {
        self.zip_assign(other, |a, b| *a /= b)
    }

    /// In-place `self += alpha * other`, the explicit update kernel.
    pub fn axpy(&mut self, alpha: f64, other: &Self) -> Result<(), GridError> {
        self.zip_assign(other, move |a, b| *a += b * alpha)
    }

    // ── Scalar broadcast operations ─────────────────────────────────

    /// Every element multiplied by `s`, as a new grid.
    pub fn scale(&self, s: f64) -> Self {
        self.map(|&a| a * s)
    }

    /// Multiplies every element by `s` in place.
    pub fn scale_in_place(&mut self, s: f64) {
        self.for_each_mut(move |a| *a = *a * s);
    }

    /// Every element shifted by `s`, as a new grid.
    pub fn offset(&self, s: f64) -> Self {
        self.map(|&a| a + s)
    }

    /// Adds `s` to every element in place.
    pub fn offset_in_place(&mut self, s: f64) {
        self.for_each_mut(move |a| *a = *a + s);
    }

    // ── Whole-field queries ─────────────────────────────────────────

    /// Largest absolute component value over the whole field.
    ///
    /// Zero for the empty grid. NaN components are ignored by the maximum,
    /// so callers screening for bad values use [`Grid::first_non_finite`].
    pub fn max_abs(&self) -> f64 {
        self.iter().fold(0.0_f64, |m, v| m.max(v.abs_max()))
    }

    /// Flat index of the first element with a non-finite component.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.iter().position(|v| !v.finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::Vec2;
    use proptest::prelude::*;

    fn ramp(nx: usize, ny: usize) -> Grid<f64> {
        Grid::from_fn(nx, ny, |i, j| (i + nx * j) as f64).unwrap()
    }

    #[test]
    fn add_and_sub_round_trip() {
        let a = ramp(4, 3);
        let b = Grid::from_elem(4, 3, 2.5).unwrap();
        let sum = a.try_add(&b).unwrap();
        assert_eq!(sum[(1, 2)], 9.0 + 2.5);
        let back = sum.try_sub(&b).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn mul_and_div_are_elementwise() {
        let a = Grid::from_elem(2, 2, 6.0).unwrap();
        let b = Grid::from_elem(2, 2, 3.0).unwrap();
        assert_eq!(a.try_mul(&b).unwrap()[(0, 0)], 18.0);
        assert_eq!(a.try_div(&b).unwrap()[(1, 1)], 2.0);
    }

    #[test]
    fn shape_mismatch_is_rejected_everywhere() {
        let a = ramp(4, 3);
        let b = ramp(4, 2);
        match a.try_add(&b) {
            Err(GridError::ShapeMismatch { left, right }) => {
                assert_eq!(left, (4, 3));
                assert_eq!(right, (4, 2));
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
        assert!(a.try_sub(&b).is_err());
        assert!(a.try_mul(&b).is_err());
        assert!(a.try_div(&b).is_err());
        let mut c = a.clone();
        assert!(c.try_add_assign(&b).is_err());
        assert!(c.axpy(1.0, &b).is_err());
        // The failed calls must not have touched the destination.
        assert_eq!(c, a);
    }

    #[test]
    fn assign_forms_match_binary_forms() {
        let a = ramp(3, 3);
        let b = Grid::from_elem(3, 3, 1.5).unwrap();
        let mut c = a.clone();
        c.try_add_assign(&b).unwrap();
        assert_eq!(c, a.try_add(&b).unwrap());
        c.try_sub_assign(&b).unwrap();
        assert_eq!(c, a);
        c.try_mul_assign(&b).unwrap();
        c.try_div_assign(&b).unwrap();
        assert_eq!(c, a);
    }

    #[test]
    fn axpy_is_scaled_accumulate() {
        let mut a = Grid::from_elem(2, 2, 1.0).unwrap();
        let b = Grid::from_elem(2, 2, 4.0).unwrap();
        a.axpy(0.25, &b).unwrap();
        assert!(a.iter().all(|&v| v == 2.0));
    }

    #[test]
    fn scalar_ops_broadcast() {
        let a = ramp(3, 2);
        assert_eq!(a.scale(2.0)[(2, 1)], 10.0);
        assert_eq!(a.offset(1.0)[(0, 0)], 1.0);
        let mut b = a.clone();
        b.scale_in_place(2.0);
        b.offset_in_place(-1.0);
        assert_eq!(b[(2, 1)], 9.0);
    }

    #[test]
    fn division_by_zero_yields_values_not_errors() {
        let a = Grid::from_elem(2, 2, 1.0).unwrap();
        let z = Grid::from_elem(2, 2, 0.0).unwrap();
        let q = a.try_div(&z).unwrap();
        assert!(q.iter().all(|v| v.is_infinite()));
        assert_eq!(q.first_non_finite(), Some(0));
    }

    #[test]
    fn max_abs_scans_components() {
        let mut g: Grid<Vec2> = Grid::new(3, 3).unwrap();
        g[(1, 2)] = Vec2::new([2.0, -7.5]);
        assert_eq!(g.max_abs(), 7.5);
        assert_eq!(g.first_non_finite(), None);
    }

    #[test]
    fn first_non_finite_reports_flat_index() {
        let mut g = Grid::from_elem(3, 2, 1.0).unwrap();
        g[(2, 1)] = f64::NAN;
        assert_eq!(g.first_non_finite(), Some(5));
    }

    fn arb_shape() -> impl Strategy<Value = (usize, usize)> {
        (1usize..12, 1usize..12)
    }

    proptest! {
        #[test]
        fn equal_shapes_never_fail_for_shape_reasons(shape in arb_shape(), fill in -1e6_f64..1e6) {
            let a = Grid::from_elem(shape.0, shape.1, fill).unwrap();
            let b = Grid::from_elem(shape.0, shape.1, 1.0).unwrap();
            prop_assert!(a.try_add(&b).is_ok());
            prop_assert!(a.try_div(&b).is_ok());
        }

        #[test]
        fn differing_shapes_always_fail(
            left in arb_shape(),
            right in arb_shape(),
        ) {
            prop_assume!(left != right);
            let a = Grid::<f64>::new(left.0, left.1).unwrap();
            let b = Grid::<f64>::new(right.0, right.1).unwrap();
            prop_assert!(
                matches!(a.try_add(&b), Err(GridError::ShapeMismatch { .. })),
                "expected ShapeMismatch for {left:?} vs {right:?}"
            );
        }

        #[test]
        fn add_then_sub_returns_close_to_start(
            shape in arb_shape(),
            x in -1e6_f64..1e6,
            y in -1e6_f64..1e6,
        ) {
            let a = Grid::from_elem(shape.0, shape.1, x).unwrap();
            let b = Grid::from_elem(shape.0, shape.1, y).unwrap();
            let back = a.try_add(&b).unwrap().try_sub(&b).unwrap();
            for (&got, &want) in back.iter().zip(a.iter()) {
                prop_assert!(
                    (got - want).abs() <= 1e-9 * want.abs().max(1.0),
                    "drifted: {} vs {}",
                    got,
                    want
                );
            }
        }
    }
}
