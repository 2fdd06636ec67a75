//! Linear algebra in dimension ≤ 2 over an arbitrary field, plus lattice
//! predicates over a discrete-valuation field.
//!
//! - [`VectorSpace`]: `F^n` with a memoized [`MatrixAlgebra`].
//! - [`MatrixAlgebra`]: `n × n` matrices for `n ∈ {0, 1, 2}` with closed-form
//!   determinant and inverse.
//! - [`DVVectorSpace`]: `K^n` for a [`btt_fields::DVField`] `K`, with the
//!   membership tests for lattices spanned by matrix columns.
//!
//! Matrices are column-major: `m[col][row]`. When a matrix is read as lattice
//! generators, its columns are the generating vectors.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::module_name_repetitions)]

pub mod lattice;
pub mod matrix;
pub mod vector;

pub use lattice::DVVectorSpace;
pub use matrix::MatrixAlgebra;
pub use vector::VectorSpace;

/// A vector: one coordinate per dimension.
pub type Vector<E> = Vec<E>;

/// A square matrix stored as a list of columns.
pub type Matrix<E> = Vec<Vec<E>>;
