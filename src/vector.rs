use std::fmt;
use std::io::{self, BufRead};
use std::mem;
use std::ops::{Add, Index, IndexMut, Mul, Sub};
use std::slice::{Iter, IterMut};
use std::str::FromStr;

use log::{debug, trace};
use num_traits::{One, Zero};

use crate::error::Error;
use crate::io::next_token;

/// Upper bound (exclusive) on the number of elements a vector may hold.
pub const MAX_VECTOR_SIZE: usize = 100_000_000;

/// A heap-allocated vector of `T` with exclusive ownership of its buffer.
///
/// Constructors reject empty and over-limit sizes; a length of zero only
/// occurs in the moved-from state produced by [`DynVector::take`] or
/// [`Default`]. Cloning deep-copies the buffer, so a clone and its source
/// never share storage.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DynVector<T> {
    data: Vec<T>,
}

impl<T: Clone> Clone for DynVector<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
        }
    }

    /// Reuses the existing allocation where the lengths allow it.
    fn clone_from(&mut self, source: &Self) {
        self.data.clone_from(&source.data);
    }
}

fn check_size(size: usize) -> Result<(), Error> {
    if size == 0 || size >= MAX_VECTOR_SIZE {
        return Err(Error::InvalidSize {
            size,
            limit: MAX_VECTOR_SIZE,
        });
    }
    Ok(())
}

impl<T> DynVector<T> {
    pub(crate) fn from_vec_unchecked(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Take ownership of `data` as the vector's buffer.
    pub fn from_vec(data: Vec<T>) -> Result<Self, Error> {
        check_size(data.len())?;
        Ok(Self { data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }

    /// Checked access: fails with `IndexOutOfRange` outside `[0, len)`.
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        let len = self.data.len();
        self.data
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Mutable counterpart of [`DynVector::at`].
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let len = self.data.len();
        self.data
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Exchange buffers with `other` in constant time, without allocating.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.data, &mut other.data);
    }

    /// Transfer the buffer out, leaving `self` in the empty moved-from state.
    pub fn take(&mut self) -> Self {
        Self {
            data: mem::take(&mut self.data),
        }
    }

    pub fn mapv<U, F>(&self, mut f: F) -> DynVector<U>
    where
        F: FnMut(&T) -> U,
    {
        DynVector {
            data: self.data.iter().map(|v| f(v)).collect(),
        }
    }

    pub(crate) fn zip_with<U, F>(&self, other: &Self, mut f: F) -> DynVector<U>
    where
        F: FnMut(&T, &T) -> U,
    {
        DynVector {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
        }
    }

    fn check_len(&self, other: &Self) -> Result<(), Error> {
        if self.data.len() != other.data.len() {
            return Err(Error::SizeMismatch {
                left: self.data.len(),
                right: other.data.len(),
            });
        }
        Ok(())
    }

    /// Element-wise sum; fails with `SizeMismatch` when lengths differ.
    pub fn try_add(&self, other: &Self) -> Result<Self, Error>
    where
        T: Clone + Add<Output = T>,
    {
        self.check_len(other)?;
        Ok(self.zip_with(other, |a, b| a.clone() + b.clone()))
    }

    /// Element-wise difference; fails with `SizeMismatch` when lengths differ.
    pub fn try_sub(&self, other: &Self) -> Result<Self, Error>
    where
        T: Clone + Sub<Output = T>,
    {
        self.check_len(other)?;
        Ok(self.zip_with(other, |a, b| a.clone() - b.clone()))
    }

    /// Dot product; fails with `SizeMismatch` when lengths differ.
    ///
    /// The accumulator starts at `T::zero()`.
    pub fn dot(&self, other: &Self) -> Result<T, Error>
    where
        T: Clone + Zero + Mul<Output = T>,
    {
        self.check_len(other)?;
        Ok(self.dot_unchecked(other))
    }

    pub(crate) fn dot_unchecked(&self, other: &Self) -> T
    where
        T: Clone + Zero + Mul<Output = T>,
    {
        self.data
            .iter()
            .zip(other.data.iter())
            .fold(T::zero(), |acc, (a, b)| acc + a.clone() * b.clone())
    }

    /// Read exactly `len()` whitespace-separated elements from `reader`.
    ///
    /// The stream carries no size prefix; the vector must already have the
    /// intended length. On any failure the vector is left untouched.
    pub fn read_from<R: BufRead>(&mut self, reader: &mut R) -> Result<(), Error>
    where
        T: FromStr,
    {
        let parsed = read_elements(reader, self.data.len())?;
        self.data = parsed;
        Ok(())
    }
}

impl<T> DynVector<T>
where
    T: Clone,
{
    /// A vector of `size` clones of `value`.
    pub fn from_elem(size: usize, value: T) -> Result<Self, Error> {
        check_size(size)?;
        Ok(Self {
            data: vec![value; size],
        })
    }

    /// Deep-copy `src` into a new vector; an empty source is rejected with
    /// `InvalidArgument`.
    pub fn from_slice(src: &[T]) -> Result<Self, Error> {
        if src.is_empty() {
            return Err(Error::InvalidArgument("source slice is empty"));
        }
        Self::from_vec(src.to_vec())
    }
}

impl<T> DynVector<T>
where
    T: Clone + Default,
{
    /// A vector of `size` default-initialized elements.
    pub fn new(size: usize) -> Result<Self, Error> {
        check_size(size)?;
        Ok(Self {
            data: vec![T::default(); size],
        })
    }
}

impl<T> DynVector<T>
where
    T: Clone + Zero,
{
    pub fn zeros(size: usize) -> Result<Self, Error> {
        Self::from_elem(size, T::zero())
    }
}

impl<T> DynVector<T>
where
    T: Clone + One,
{
    pub fn ones(size: usize) -> Result<Self, Error> {
        Self::from_elem(size, T::one())
    }
}

impl<T> Default for DynVector<T> {
    /// The empty moved-from state; not reachable through the constructors.
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T> From<DynVector<T>> for Vec<T> {
    fn from(value: DynVector<T>) -> Self {
        value.data
    }
}

impl<T> Index<usize> for DynVector<T> {
    type Output = T;

    /// Unchecked fast path: panics like slice indexing when out of range.
    /// Use [`DynVector::at`] for the checked accessor.
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for DynVector<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

// Scalar operators: a new vector of the same length, each element
// transformed; the source is unmodified.

impl<'a, T> Add<T> for &'a DynVector<T>
where
    T: Clone + Add<Output = T>,
{
    type Output = DynVector<T>;

    fn add(self, rhs: T) -> DynVector<T> {
        self.mapv(|x| x.clone() + rhs.clone())
    }
}

impl<'a, T> Sub<T> for &'a DynVector<T>
where
    T: Clone + Sub<Output = T>,
{
    type Output = DynVector<T>;

    fn sub(self, rhs: T) -> DynVector<T> {
        self.mapv(|x| x.clone() - rhs.clone())
    }
}

impl<'a, T> Mul<T> for &'a DynVector<T>
where
    T: Clone + Mul<Output = T>,
{
    type Output = DynVector<T>;

    fn mul(self, rhs: T) -> DynVector<T> {
        self.mapv(|x| x.clone() * rhs.clone())
    }
}

impl<T> Add<T> for DynVector<T>
where
    T: Clone + Add<Output = T>,
{
    type Output = DynVector<T>;

    fn add(self, rhs: T) -> DynVector<T> {
        &self + rhs
    }
}

impl<T> Sub<T> for DynVector<T>
where
    T: Clone + Sub<Output = T>,
{
    type Output = DynVector<T>;

    fn sub(self, rhs: T) -> DynVector<T> {
        &self - rhs
    }
}

impl<T> Mul<T> for DynVector<T>
where
    T: Clone + Mul<Output = T>,
{
    type Output = DynVector<T>;

    fn mul(self, rhs: T) -> DynVector<T> {
        &self * rhs
    }
}

// Vector operators. These panic on mismatched lengths; `try_add`, `try_sub`
// and `dot` are the Result-returning equivalents.

impl<'a, 'b, T> Add<&'b DynVector<T>> for &'a DynVector<T>
where
    T: Clone + Add<Output = T>,
{
    type Output = DynVector<T>;

    fn add(self, rhs: &'b DynVector<T>) -> DynVector<T> {
        assert_eq!(
            self.len(),
            rhs.len(),
            "vector addition requires equal lengths"
        );
        self.zip_with(rhs, |a, b| a.clone() + b.clone())
    }
}

impl<'a, 'b, T> Sub<&'b DynVector<T>> for &'a DynVector<T>
where
    T: Clone + Sub<Output = T>,
{
    type Output = DynVector<T>;

    fn sub(self, rhs: &'b DynVector<T>) -> DynVector<T> {
        assert_eq!(
            self.len(),
            rhs.len(),
            "vector subtraction requires equal lengths"
        );
        self.zip_with(rhs, |a, b| a.clone() - b.clone())
    }
}

impl<'a, 'b, T> Mul<&'b DynVector<T>> for &'a DynVector<T>
where
    T: Clone + Zero + Mul<Output = T>,
{
    type Output = T;

    fn mul(self, rhs: &'b DynVector<T>) -> T {
        assert_eq!(
            self.len(),
            rhs.len(),
            "dot product requires equal lengths"
        );
        self.dot_unchecked(rhs)
    }
}

impl<T> Add for DynVector<T>
where
    T: Clone + Add<Output = T>,
{
    type Output = DynVector<T>;

    fn add(self, rhs: DynVector<T>) -> DynVector<T> {
        &self + &rhs
    }
}

impl<T> Sub for DynVector<T>
where
    T: Clone + Sub<Output = T>,
{
    type Output = DynVector<T>;

    fn sub(self, rhs: DynVector<T>) -> DynVector<T> {
        &self - &rhs
    }
}

impl<T> Mul for DynVector<T>
where
    T: Clone + Zero + Mul<Output = T>,
{
    type Output = T;

    fn mul(self, rhs: DynVector<T>) -> T {
        &self * &rhs
    }
}

impl<T: fmt::Display> fmt::Display for DynVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, value) in self.data.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

/// Parse `count` whitespace-separated values of `T` from `reader`.
///
/// Either all `count` elements parse and the full buffer is returned, or the
/// first failure is reported and nothing is.
pub(crate) fn read_elements<T, R>(reader: &mut R, count: usize) -> Result<Vec<T>, Error>
where
    T: FromStr,
    R: BufRead,
{
    let mut parsed = Vec::with_capacity(count);
    for index in 0..count {
        let token = next_token(reader)?.ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("input ended after {} of {} elements", index, count),
            ))
        })?;
        match token.parse::<T>() {
            Ok(value) => parsed.push(value),
            Err(_) => {
                debug!("element {} failed to parse from token '{}'", index, token);
                return Err(Error::Parse { token, index });
            }
        }
    }
    trace!("read {} elements", count);
    Ok(parsed)
}
