//! dynmat: heap-backed generic vector and square-matrix containers.
//!
//! `DynVector<T>` owns a contiguous buffer and provides indexing, equality,
//! scalar and element-wise arithmetic, dot products, constant-time swap, and
//! whitespace-delimited stream I/O. `DynMatrix<T>` composes a `DynVector` of
//! row vectors into a square matrix and adds transpose plus the matrix forms
//! of the arithmetic operators.
//!
//! The design favors small, testable modules; serde support sits behind the
//! `serde` feature so the default dependency set stays minimal.
pub mod error;
pub mod io;
pub mod matrix;
pub mod vector;

pub use error::Error;
pub use matrix::{DynMatrix, MAX_MATRIX_SIZE};
pub use vector::{DynVector, MAX_VECTOR_SIZE};
