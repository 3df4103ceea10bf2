use std::fmt;
use std::io::BufRead;
use std::ops::{Add, Index, IndexMut, Mul, Sub};
use std::slice::{Iter, IterMut};
use std::str::FromStr;

use num_traits::Zero;

use crate::error::Error;
use crate::vector::{read_elements, DynVector};

/// Upper bound (exclusive) on the dimension of a square matrix.
pub const MAX_MATRIX_SIZE: usize = 10_000;

/// A square matrix of `T`, stored as one owned row vector per row.
///
/// The outer vector's length is the dimension and every row has that same
/// length; the constructors enforce both. Rows never share storage, so a
/// clone of a matrix is fully independent of its source.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DynMatrix<T> {
    rows: DynVector<DynVector<T>>,
}

impl<T: Clone> Clone for DynMatrix<T> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.rows.clone_from(&source.rows);
    }
}

impl<T> DynMatrix<T> {
    /// Adopt an existing vector of rows, validating squareness.
    ///
    /// Fails with `InvalidSize` when the outer length is zero or at the
    /// matrix limit, and with `InvalidShape` for the first row whose length
    /// differs from the outer length.
    pub fn from_rows(rows: DynVector<DynVector<T>>) -> Result<Self, Error> {
        let dim = rows.len();
        if dim == 0 || dim >= MAX_MATRIX_SIZE {
            return Err(Error::InvalidSize {
                size: dim,
                limit: MAX_MATRIX_SIZE,
            });
        }
        for (row, values) in rows.iter().enumerate() {
            if values.len() != dim {
                return Err(Error::InvalidShape {
                    row,
                    len: values.len(),
                    expected: dim,
                });
            }
        }
        Ok(Self { rows })
    }

    /// Convenience form of [`DynMatrix::from_rows`] over plain `Vec`s.
    pub fn from_vec(rows: Vec<Vec<T>>) -> Result<Self, Error> {
        let rows: Vec<DynVector<T>> = rows
            .into_iter()
            .map(DynVector::from_vec_unchecked)
            .collect();
        Self::from_rows(DynVector::from_vec_unchecked(rows))
    }

    /// Side length of the matrix.
    pub fn dim(&self) -> usize {
        self.rows.len()
    }

    /// Checked row access; element checks chain through the row's own `at`.
    pub fn at(&self, index: usize) -> Result<&DynVector<T>, Error> {
        self.rows.at(index)
    }

    /// Mutable counterpart of [`DynMatrix::at`].
    pub fn at_mut(&mut self, index: usize) -> Result<&mut DynVector<T>, Error> {
        self.rows.at_mut(index)
    }

    pub fn iter(&self) -> Iter<'_, DynVector<T>> {
        self.rows.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, DynVector<T>> {
        self.rows.iter_mut()
    }

    /// Exchange contents with `other` in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        self.rows.swap(&mut other.rows);
    }

    /// Transfer the rows out, leaving `self` in the empty moved-from state.
    pub fn take(&mut self) -> Self {
        Self {
            rows: self.rows.take(),
        }
    }

    fn check_dim(&self, other: &Self) -> Result<(), Error> {
        if self.dim() != other.dim() {
            return Err(Error::SizeMismatch {
                left: self.dim(),
                right: other.dim(),
            });
        }
        Ok(())
    }

    /// A new matrix with rows and columns swapped; `self` is unchanged.
    pub fn transpose(&self) -> Self
    where
        T: Clone,
    {
        let dim = self.dim();
        let rows = (0..dim)
            .map(|i| {
                DynVector::from_vec_unchecked((0..dim).map(|j| self.rows[j][i].clone()).collect())
            })
            .collect();
        Self {
            rows: DynVector::from_vec_unchecked(rows),
        }
    }

    /// Multiply every entry by `factor`, keeping the shape.
    pub fn scale(&self, factor: &T) -> Self
    where
        T: Clone + Mul<Output = T>,
    {
        let rows = self.rows.iter().map(|row| row * factor.clone()).collect();
        Self {
            rows: DynVector::from_vec_unchecked(rows),
        }
    }

    /// Element-wise sum; fails with `SizeMismatch` when dimensions differ.
    pub fn try_add(&self, other: &Self) -> Result<Self, Error>
    where
        T: Clone + Add<Output = T>,
    {
        self.check_dim(other)?;
        let rows = self
            .rows
            .iter()
            .zip(other.rows.iter())
            .map(|(a, b)| a + b)
            .collect();
        Ok(Self {
            rows: DynVector::from_vec_unchecked(rows),
        })
    }

    /// Element-wise difference; fails with `SizeMismatch` when dimensions
    /// differ.
    pub fn try_sub(&self, other: &Self) -> Result<Self, Error>
    where
        T: Clone + Sub<Output = T>,
    {
        self.check_dim(other)?;
        let rows = self
            .rows
            .iter()
            .zip(other.rows.iter())
            .map(|(a, b)| a - b)
            .collect();
        Ok(Self {
            rows: DynVector::from_vec_unchecked(rows),
        })
    }

    /// Matrix-vector product: element `i` is the dot product of row `i` with
    /// `vector`. Fails with `SizeMismatch` when the vector length differs
    /// from the dimension.
    pub fn mul_vector(&self, vector: &DynVector<T>) -> Result<DynVector<T>, Error>
    where
        T: Clone + Zero + Mul<Output = T>,
    {
        if self.dim() != vector.len() {
            return Err(Error::SizeMismatch {
                left: self.dim(),
                right: vector.len(),
            });
        }
        Ok(DynVector::from_vec_unchecked(
            self.rows
                .iter()
                .map(|row| row.dot_unchecked(vector))
                .collect(),
        ))
    }

    /// Standard matrix product, computed against the transpose of `other` so
    /// each output entry is a row-by-row dot product. Fails with
    /// `SizeMismatch` when dimensions differ.
    pub fn try_mul(&self, other: &Self) -> Result<Self, Error>
    where
        T: Clone + Zero + Mul<Output = T>,
    {
        self.check_dim(other)?;
        Ok(self.mul_transposed(&other.transpose()))
    }

    fn mul_transposed(&self, transposed: &Self) -> Self
    where
        T: Clone + Zero + Mul<Output = T>,
    {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                DynVector::from_vec_unchecked(
                    transposed
                        .rows
                        .iter()
                        .map(|col| row.dot_unchecked(col))
                        .collect(),
                )
            })
            .collect();
        Self {
            rows: DynVector::from_vec_unchecked(rows),
        }
    }

    /// Read `dim() * dim()` whitespace-separated elements row-major.
    ///
    /// On any failure the matrix is left untouched.
    pub fn read_from<R: BufRead>(&mut self, reader: &mut R) -> Result<(), Error>
    where
        T: FromStr,
    {
        let dim = self.dim();
        let mut values = read_elements(reader, dim * dim)?.into_iter();
        let rows = (0..dim)
            .map(|_| DynVector::from_vec_unchecked(values.by_ref().take(dim).collect()))
            .collect();
        self.rows = DynVector::from_vec_unchecked(rows);
        Ok(())
    }
}

impl<T> DynMatrix<T>
where
    T: Clone + Default,
{
    /// A `dim` by `dim` matrix of default-initialized elements.
    pub fn new(dim: usize) -> Result<Self, Error> {
        if dim == 0 || dim >= MAX_MATRIX_SIZE {
            return Err(Error::InvalidSize {
                size: dim,
                limit: MAX_MATRIX_SIZE,
            });
        }
        let rows = (0..dim)
            .map(|_| DynVector::from_vec_unchecked(vec![T::default(); dim]))
            .collect();
        Ok(Self {
            rows: DynVector::from_vec_unchecked(rows),
        })
    }
}

impl<T> Default for DynMatrix<T> {
    /// The empty moved-from state; not reachable through the constructors.
    fn default() -> Self {
        Self {
            rows: DynVector::default(),
        }
    }
}

impl<T> Index<usize> for DynMatrix<T> {
    type Output = DynVector<T>;

    /// Unchecked row access: panics when out of range. Use
    /// [`DynMatrix::at`] for the checked accessor.
    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}

impl<T> IndexMut<usize> for DynMatrix<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.rows[index]
    }
}

// Operator forms. These panic on mismatched dimensions; the `try_*` and
// `mul_vector` methods are the Result-returning equivalents.

impl<'a, T> Mul<T> for &'a DynMatrix<T>
where
    T: Clone + Mul<Output = T>,
{
    type Output = DynMatrix<T>;

    fn mul(self, rhs: T) -> DynMatrix<T> {
        self.scale(&rhs)
    }
}

impl<T> Mul<T> for DynMatrix<T>
where
    T: Clone + Mul<Output = T>,
{
    type Output = DynMatrix<T>;

    fn mul(self, rhs: T) -> DynMatrix<T> {
        self.scale(&rhs)
    }
}

impl<'a, 'b, T> Mul<&'b DynVector<T>> for &'a DynMatrix<T>
where
    T: Clone + Zero + Mul<Output = T>,
{
    type Output = DynVector<T>;

    fn mul(self, rhs: &'b DynVector<T>) -> DynVector<T> {
        assert_eq!(
            self.dim(),
            rhs.len(),
            "matrix-vector product requires matching dimension"
        );
        DynVector::from_vec_unchecked(
            self.rows
                .iter()
                .map(|row| row.dot_unchecked(rhs))
                .collect(),
        )
    }
}

impl<'a, 'b, T> Add<&'b DynMatrix<T>> for &'a DynMatrix<T>
where
    T: Clone + Add<Output = T>,
{
    type Output = DynMatrix<T>;

    fn add(self, rhs: &'b DynMatrix<T>) -> DynMatrix<T> {
        assert_eq!(
            self.dim(),
            rhs.dim(),
            "matrix addition requires matching dimensions"
        );
        let rows = self
            .rows
            .iter()
            .zip(rhs.rows.iter())
            .map(|(a, b)| a + b)
            .collect();
        DynMatrix {
            rows: DynVector::from_vec_unchecked(rows),
        }
    }
}

impl<'a, 'b, T> Sub<&'b DynMatrix<T>> for &'a DynMatrix<T>
where
    T: Clone + Sub<Output = T>,
{
    type Output = DynMatrix<T>;

    fn sub(self, rhs: &'b DynMatrix<T>) -> DynMatrix<T> {
        assert_eq!(
            self.dim(),
            rhs.dim(),
            "matrix subtraction requires matching dimensions"
        );
        let rows = self
            .rows
            .iter()
            .zip(rhs.rows.iter())
            .map(|(a, b)| a - b)
            .collect();
        DynMatrix {
            rows: DynVector::from_vec_unchecked(rows),
        }
    }
}

impl<'a, 'b, T> Mul<&'b DynMatrix<T>> for &'a DynMatrix<T>
where
    T: Clone + Zero + Mul<Output = T>,
{
    type Output = DynMatrix<T>;

    fn mul(self, rhs: &'b DynMatrix<T>) -> DynMatrix<T> {
        assert_eq!(
            self.dim(),
            rhs.dim(),
            "matrix product requires matching dimensions"
        );
        self.mul_transposed(&rhs.transpose())
    }
}

impl<T> Add for DynMatrix<T>
where
    T: Clone + Add<Output = T>,
{
    type Output = DynMatrix<T>;

    fn add(self, rhs: DynMatrix<T>) -> DynMatrix<T> {
        &self + &rhs
    }
}

impl<T> Sub for DynMatrix<T>
where
    T: Clone + Sub<Output = T>,
{
    type Output = DynMatrix<T>;

    fn sub(self, rhs: DynMatrix<T>) -> DynMatrix<T> {
        &self - &rhs
    }
}

impl<T> Mul for DynMatrix<T>
where
    T: Clone + Zero + Mul<Output = T>,
{
    type Output = DynMatrix<T>;

    fn mul(self, rhs: DynMatrix<T>) -> DynMatrix<T> {
        &self * &rhs
    }
}

impl<T: fmt::Display> fmt::Display for DynMatrix<T> {
    /// One row per line, each row in the vector's space-separated format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.rows.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for DynMatrix<T>
where
    T: serde::Deserialize<'de>,
{
    /// Deserializes the row-of-rows form and revalidates squareness.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = DynVector::<DynVector<T>>::deserialize(deserializer)?;
        DynMatrix::from_rows(rows).map_err(serde::de::Error::custom)
    }
}
