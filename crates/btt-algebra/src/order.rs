//! Integers extended by a distinguished `Infinite` top element.
//!
//! Valuations live here: the valuation of the additive identity is
//! [`ExtendedInt::Infinite`], every other element has a finite one.

use core::fmt;
use core::ops::Add;

use crate::error::{AlgebraError, Result};

/// An integer or `Infinite`.
///
/// The derived ordering places every `Finite(_)` below `Infinite`, which is
/// exactly the total order valuations need.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExtendedInt {
    /// An ordinary integer.
    Finite(i64),
    /// Strictly greater than every finite value.
    Infinite,
}

impl ExtendedInt {
    /// Zero.
    pub const ZERO: Self = Self::Finite(0);

    /// True unless `Infinite`.
    #[inline]
    #[must_use]
    pub const fn is_finite(self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// The finite value, if any.
    #[inline]
    #[must_use]
    pub const fn finite(self) -> Option<i64> {
        match self {
            Self::Finite(n) => Some(n),
            Self::Infinite => None,
        }
    }

    /// Multiply by an integer; `Infinite` absorbs.
    #[inline]
    #[must_use]
    pub const fn mul_int(self, k: i64) -> Self {
        match self {
            Self::Finite(n) => Self::Finite(n * k),
            Self::Infinite => Self::Infinite,
        }
    }

    /// Floor division by a nonzero integer; `Infinite` absorbs.
    ///
    /// # Errors
    /// `k == 0`.
    #[inline]
    pub fn div_int(self, k: i64) -> Result<Self> {
        if k == 0 {
            return Err(AlgebraError::ExtendedArithmetic("division by zero"));
        }
        Ok(match self {
            Self::Finite(n) => Self::Finite(n.div_euclid(k) - i64::from(k < 0 && n.rem_euclid(k) != 0)),
            Self::Infinite => Self::Infinite,
        })
    }

    /// Negation; only defined for finite values.
    ///
    /// # Errors
    /// `self` is `Infinite`.
    #[inline]
    pub fn checked_neg(self) -> Result<Self> {
        match self {
            Self::Finite(n) => Ok(Self::Finite(-n)),
            Self::Infinite => Err(AlgebraError::ExtendedArithmetic("negating infinity")),
        }
    }

    /// Subtract a finite integer; `Infinite` absorbs.
    #[inline]
    #[must_use]
    pub const fn sub_int(self, k: i64) -> Self {
        match self {
            Self::Finite(n) => Self::Finite(n - k),
            Self::Infinite => Self::Infinite,
        }
    }

    /// Minimum of a non-empty sequence.
    ///
    /// # Errors
    /// [`AlgebraError::EmptyCollection`] on an empty input.
    pub fn min_all<I: IntoIterator<Item = Self>>(items: I) -> Result<Self> {
        items.into_iter().min().ok_or(AlgebraError::EmptyCollection)
    }

    /// Maximum of a non-empty sequence.
    ///
    /// # Errors
    /// [`AlgebraError::EmptyCollection`] on an empty input.
    pub fn max_all<I: IntoIterator<Item = Self>>(items: I) -> Result<Self> {
        items.into_iter().max().ok_or(AlgebraError::EmptyCollection)
    }
}

impl From<i64> for ExtendedInt {
    #[inline]
    fn from(n: i64) -> Self {
        Self::Finite(n)
    }
}

/// Addition with `Infinite` absorbing (`v(a·b) = v(a) + v(b)`, `v(0) = ∞`).
impl Add for ExtendedInt {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Finite(a), Self::Finite(b)) => Self::Finite(a + b),
            _ => Self::Infinite,
        }
    }
}

impl PartialEq<i64> for ExtendedInt {
    #[inline]
    fn eq(&self, other: &i64) -> bool {
        *self == Self::Finite(*other)
    }
}

impl PartialOrd<i64> for ExtendedInt {
    #[inline]
    fn partial_cmp(&self, other: &i64) -> Option<core::cmp::Ordering> {
        Some(self.cmp(&Self::Finite(*other)))
    }
}

impl fmt::Display for ExtendedInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(n) => write!(f, "{n}"),
            Self::Infinite => f.write_str("∞"),
        }
    }
}
