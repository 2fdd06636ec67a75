//! Exact algebra for discrete-valuation computations.
//!
//! - [`ExtendedInt`]: integers extended by an `Infinite` top element (valuations).
//! - Structure traits: [`Monoid`], [`Group`], [`Ring`], [`EuclideanDomain`],
//!   [`Field`], with the derived operations (fast `pow`, `from_int`, gcd,
//!   extended gcd) provided once as default methods and free functions.
//! - Instances: [`Integers`] (ℤ on [`BigInt`]), [`FiniteField`] (𝔽_p), [`PolynomialRing`]
//!   (𝔽_p\[x\]) and [`RationalField`] (ℚ).
//!
//! Every structure is a small value passed explicitly by the caller; element
//! types are plain data and never carry a back-reference to their structure.

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

pub mod error;
pub mod finite_field;
pub mod integers;
pub mod order;
pub mod polynomial;
pub mod rational;
pub mod structure;

pub use error::{AlgebraError, Result};
pub use finite_field::FiniteField;
pub use integers::{is_prime, Integers};
pub use num_bigint::BigInt;
pub use order::ExtendedInt;
pub use polynomial::{Polynomial, PolynomialRing};
pub use rational::{Rational, RationalField};
pub use structure::{
    group_pow, pow_nonneg, AdditiveGroup, EuclideanDomain, ExtendedGcd, Field,
    FieldMultiplicativeGroup, Group, Monoid, MultiplicativeMonoid, Ring,
};
