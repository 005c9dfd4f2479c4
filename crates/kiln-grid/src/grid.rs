//! The owning 2D container.

use std::ops::{Index, IndexMut};

use kiln_core::Element;

use crate::error::GridError;

/// An owning 2D container of grid-point values.
///
/// Stores `nx * ny` elements of type `T` in one contiguous buffer, addressed
/// x-fastest: the flat index of point `(i, j)` is `i + nx * j` with
/// `0 <= i < nx` and `0 <= j < ny`. The buffer length always equals
/// `nx * ny`; the default-constructed grid is the distinct empty state with
/// both extents zero and no buffer.
///
/// `Clone` is a deep copy of the buffer. Moving a grid transfers the buffer
/// without copying; [`Grid::take`] is the explicit form that leaves the
/// source in the empty state.
///
/// # Examples
///
/// ```
/// use kiln_grid::Grid;
///
/// let mut g: Grid<f64> = Grid::new(4, 3)?;
/// g[(2, 1)] = 5.0;
/// assert_eq!(g.len(), 12);
/// assert_eq!(g[(2, 1)], 5.0);
/// assert_eq!(g[(0, 0)], 0.0);
/// # Ok::<(), kiln_grid::GridError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    nx: usize,
    ny: usize,
    data: Vec<T>,
}

impl<T> Default for Grid<T> {
    fn default() -> Self {
        Self {
            nx: 0,
            ny: 0,
            data: Vec::new(),
        }
    }
}

/// Validate extents and return the cell count.
fn cell_count(nx: usize, ny: usize) -> Result<usize, GridError> {
    if nx == 0 || ny == 0 {
        return Err(GridError::InvalidDimension { nx, ny });
    }
    nx.checked_mul(ny).ok_or(GridError::TooLarge { nx, ny })
}

/// Reserve a buffer for `len` cells without filling it.
///
/// Allocation failure is reported instead of aborting the process.
fn reserve<T>(len: usize) -> Result<Vec<T>, GridError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| GridError::OutOfMemory { requested: len })?;
    Ok(data)
}

impl<T: Element> Grid<T> {
    /// Creates the empty grid: zero extents, no buffer.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an `nx` by `ny` grid with every element set to `T::default()`.
    ///
    /// Fails with [`GridError::InvalidDimension`] if either extent is zero,
    /// [`GridError::TooLarge`] if `nx * ny` overflows, and
    /// [`GridError::OutOfMemory`] if the buffer cannot be allocated. No
    /// partially constructed grid is ever observable.
    pub fn new(nx: usize, ny: usize) -> Result<Self, GridError> {
        Self::from_elem(nx, ny, T::default())
    }

    /// Creates an `nx` by `ny` grid with every element set to `value`.
    pub fn from_elem(nx: usize, ny: usize, value: T) -> Result<Self, GridError> {
        let len = cell_count(nx, ny)?;
        let mut data = reserve(len)?;
        data.resize(len, value);
        Ok(Self { nx, ny, data })
    }

    /// Creates an `nx` by `ny` grid by calling `f(i, j)` for every point.
    ///
    /// Points are visited in memory order: x-fastest, then y.
    ///
    /// ```
    /// use kiln_grid::Grid;
    ///
    /// let ramp = Grid::from_fn(3, 2, |i, j| (i + 10 * j) as f64)?;
    /// assert_eq!(ramp[(2, 0)], 2.0);
    /// assert_eq!(ramp[(0, 1)], 10.0);
    /// # Ok::<(), kiln_grid::GridError>(())
    /// ```
    pub fn from_fn(
        nx: usize,
        ny: usize,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> Result<Self, GridError> {
        let len = cell_count(nx, ny)?;
        let mut data = reserve(len)?;
        for j in 0..ny {
            for i in 0..nx {
                data.push(f(i, j));
            }
        }
        debug_assert_eq!(data.len(), len);
        Ok(Self { nx, ny, data })
    }

    /// X extent.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Y extent.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Shape as `(nx, ny)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Total number of elements, `nx * ny`.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for the empty grid.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat buffer index of point `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is out of bounds. Out-of-range coordinates must
    /// never alias a different cell, so the check is kept in release builds.
    #[inline]
    pub fn index_of(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.nx && j < self.ny,
            "grid point ({i}, {j}) out of bounds for {}x{}",
            self.nx,
            self.ny
        );
        i + self.nx * j
    }

    /// The element at `(i, j)`, or `None` when out of bounds.
    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        if i < self.nx && j < self.ny {
            self.data.get(i + self.nx * j)
        } else {
            None
        }
    }

    /// Mutable access to the element at `(i, j)`, or `None` when out of bounds.
    pub fn get_mut(&mut self, i: usize, j: usize) -> Option<&mut T> {
        if i < self.nx && j < self.ny {
            let idx = i + self.nx * j;
            self.data.get_mut(idx)
        } else {
            None
        }
    }

    /// The backing buffer in memory order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable view of the backing buffer in memory order.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterates elements in memory order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Iterates elements in memory order, mutably.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Iterates `(i, j, &value)` triples in memory order.
    pub fn enumerate(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let nx = self.nx;
        self.data
            .iter()
            .enumerate()
            .map(move |(k, v)| (k % nx, k / nx, v))
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Moves the contents out, leaving this grid in the empty state.
    ///
    /// ```
    /// use kiln_grid::Grid;
    ///
    /// let mut a = Grid::from_elem(2, 2, 1.0)?;
    /// let b = a.take();
    /// assert!(a.is_empty());
    /// assert_eq!(b.len(), 4);
    /// # Ok::<(), kiln_grid::GridError>(())
    /// ```
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Builds a same-shape grid by applying `f` to every element.
    pub fn map<U: Element>(&self, f: impl Fn(&T) -> U) -> Grid<U> {
        Grid {
            nx: self.nx,
            ny: self.ny,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Assembles a grid from raw parts. `data.len()` must equal `nx * ny`.
    pub(crate) fn from_parts(nx: usize, ny: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), nx * ny, "buffer length must match extents");
        Self { nx, ny, data }
    }
}

impl<T: Element> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[self.index_of(i, j)]
    }
}

impl<T: Element> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        let idx = self.index_of(i, j);
        &mut self.data[idx]
    }
}
