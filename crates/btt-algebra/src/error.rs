//! Error type shared by every algebraic structure in the workspace.

use thiserror::Error;

/// Failures raised by field, ring, matrix and tree operations.
///
/// All of them are deterministic input conditions: either the caller passed
/// something outside an operation's domain, or the input is genuinely
/// singular. There is no partial-failure state to recover from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgebraError {
    /// Inversion or division by the additive identity.
    #[error("division by zero")]
    DivisionByZero,

    /// A fraction was requested with a zero denominator.
    #[error("denominator is zero")]
    ZeroDenominator,

    /// The matrix has zero determinant where an invertible one was required.
    #[error("matrix is singular")]
    SingularMatrix,

    /// All entries of the matrix are zero.
    #[error("matrix is zero")]
    ZeroMatrix,

    /// Field characteristic / residue size is not a positive prime.
    #[error("{0} is not a positive prime")]
    InvalidPrime(i64),

    /// Matrix algebra only supports dimensions 0, 1 and 2.
    #[error("matrices of dimension {0} are not supported (max 2)")]
    UnsupportedDimension(usize),

    /// Operand lengths do not match the dimension of the space.
    #[error("expected {expected} entries, got {got}")]
    DimensionMismatch {
        /// Dimension of the space.
        expected: usize,
        /// Length that was supplied.
        got: usize,
    },

    /// `min`/`max` over an empty sequence.
    #[error("empty collection")]
    EmptyCollection,

    /// `0^0` is undefined.
    #[error("0^0 is undefined")]
    ZeroToTheZero,

    /// Monoid exponentiation only accepts non-negative exponents.
    #[error("negative exponent {0} in a monoid")]
    NegativeExponent(i64),

    /// `inverse_mod(a, m)` with `gcd(a, m)` not a unit.
    #[error("element is not invertible modulo the given modulus")]
    NotInvertible,

    /// Operation needs a nonzero element (leading coefficient, split, ...).
    #[error("operation requires a nonzero element")]
    ZeroElement,

    /// Residue requested for an element outside the valuation ring.
    #[error("element has negative valuation {0}")]
    NotIntegral(i64),

    /// Division by an `ExtendedInt` of zero, or other non-finite arithmetic.
    #[error("invalid extended-integer arithmetic: {0}")]
    ExtendedArithmetic(&'static str),
}

/// Convenience alias used across the workspace.
pub type Result<T> = core::result::Result<T, AlgebraError>;
