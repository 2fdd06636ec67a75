//! Discrete-valuation fields realized as fraction fields of Euclidean domains.
//!
//! - [`DVField`]: the trait; every derived operation (valuation, uniformizer
//!   powers, unit/valuation split, residues, `π`-adic truncation) is written
//!   once against the valuation ring's Euclidean structure.
//! - [`Adic`]: ℚ with the `p`-adic valuation (valuation ring ℤ).
//! - [`FunctionField`]: 𝔽_p(x) with the `x`-adic valuation (valuation ring 𝔽_p\[x\]).

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

pub mod adic;
pub mod dvfield;
pub mod function_field;

pub use adic::Adic;
pub use dvfield::DVField;
pub use function_field::{FunctionField, RationalFunction};

// Re-exported so downstream crates can name the full tower from one place.
pub use btt_algebra::{
    AlgebraError, BigInt, ExtendedInt, Field, FiniteField, Rational, Result, Ring,
};
