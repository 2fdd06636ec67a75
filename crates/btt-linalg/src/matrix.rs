//! `n × n` matrices for `n ≤ 2`, column-major.
//!
//! Determinant and inverse use the closed forms (`ad − bc`, adjugate), which
//! is why larger dimensions are rejected at construction.

use btt_algebra::{AlgebraError, Field, Result};

use crate::{Matrix, Vector};

/* --------------------------------- Algebra --------------------------------- */

/// `End(F^dim)` for `dim ∈ {0, 1, 2}`.
#[derive(Clone, Debug)]
pub struct MatrixAlgebra<F: Field + Clone> {
    field: F,
    dim: usize,
}

impl<F: Field + Clone> MatrixAlgebra<F> {
    /// Matrices of size `dim × dim` over `field`.
    ///
    /// # Errors
    /// [`AlgebraError::UnsupportedDimension`] for `dim > 2`.
    pub fn new(field: F, dim: usize) -> Result<Self> {
        if dim > 2 {
            return Err(AlgebraError::UnsupportedDimension(dim));
        }
        Ok(Self { field, dim })
    }

    /// Scalar field.
    #[inline]
    #[must_use]
    pub const fn field(&self) -> &F {
        &self.field
    }

    /// Dimension.
    #[inline]
    #[must_use]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Build a matrix from `f(col, row)`.
    pub fn fill(&self, mut f: impl FnMut(usize, usize) -> F::Element) -> Matrix<F::Element> {
        (0..self.dim).map(|col| (0..self.dim).map(|row| f(col, row)).collect()).collect()
    }

    /// Apply `f(entry, col, row)` to every entry.
    pub fn map(
        &self,
        m: &Matrix<F::Element>,
        mut f: impl FnMut(&F::Element, usize, usize) -> F::Element,
    ) -> Matrix<F::Element> {
        m.iter()
            .enumerate()
            .map(|(col, v)| v.iter().enumerate().map(|(row, e)| f(e, col, row)).collect())
            .collect()
    }

    /// The zero matrix.
    #[must_use]
    pub fn zero(&self) -> Matrix<F::Element> {
        self.fill(|_, _| self.field.zero())
    }

    /// The identity.
    #[must_use]
    pub fn one(&self) -> Matrix<F::Element> {
        self.from_scalar(&self.field.one())
    }

    /// `c · I`.
    #[must_use]
    pub fn from_scalar(&self, c: &F::Element) -> Matrix<F::Element> {
        self.fill(|col, row| if col == row { c.clone() } else { self.field.zero() })
    }

    /// `n · I`.
    #[must_use]
    pub fn from_int(&self, n: i64) -> Matrix<F::Element> {
        self.from_scalar(&self.field.from_int(n))
    }

    /// Matrix from integer columns.
    ///
    /// # Errors
    /// [`AlgebraError::DimensionMismatch`] if the shape is not `dim × dim`.
    pub fn from_ints(&self, cols: &[&[i64]]) -> Result<Matrix<F::Element>> {
        self.check_len(cols.len())?;
        cols.iter()
            .map(|col| {
                self.check_len(col.len())?;
                Ok(col.iter().map(|&x| self.field.from_int(x)).collect())
            })
            .collect()
    }

    #[inline]
    const fn check_len(&self, len: usize) -> Result<()> {
        if len == self.dim {
            Ok(())
        } else {
            Err(AlgebraError::DimensionMismatch { expected: self.dim, got: len })
        }
    }

    /// `i`-th column.
    #[must_use]
    pub fn column(&self, i: usize, m: &Matrix<F::Element>) -> Vector<F::Element> {
        m[i].clone()
    }

    /// `i`-th row.
    #[must_use]
    pub fn row(&self, i: usize, m: &Matrix<F::Element>) -> Vector<F::Element> {
        m.iter().map(|col| col[i].clone()).collect()
    }

    /// Replace row `index` by `row`.
    #[must_use]
    pub fn replace_row(&self, m: &Matrix<F::Element>, index: usize, row: &[F::Element]) -> Matrix<F::Element> {
        self.map(m, |e, col, r| if r == index { row[col].clone() } else { e.clone() })
    }

    /// Replace column `index` by `column`.
    #[must_use]
    pub fn replace_column(
        &self,
        m: &Matrix<F::Element>,
        index: usize,
        column: &[F::Element],
    ) -> Matrix<F::Element> {
        m.iter()
            .enumerate()
            .map(|(i, v)| if i == index { column.to_vec() } else { v.clone() })
            .collect()
    }

    /// Entry-wise sum.
    #[must_use]
    pub fn add(&self, a: &Matrix<F::Element>, b: &Matrix<F::Element>) -> Matrix<F::Element> {
        self.map(a, |e, col, row| self.field.add(e, &b[col][row]))
    }

    /// Entry-wise difference.
    #[must_use]
    pub fn subtract(&self, a: &Matrix<F::Element>, b: &Matrix<F::Element>) -> Matrix<F::Element> {
        self.map(a, |e, col, row| self.field.subtract(e, &b[col][row]))
    }

    /// `-m`.
    #[must_use]
    pub fn negate(&self, m: &Matrix<F::Element>) -> Matrix<F::Element> {
        self.map(m, |e, _, _| self.field.negate(e))
    }

    /// `c · m`.
    #[must_use]
    pub fn scale(&self, c: &F::Element, m: &Matrix<F::Element>) -> Matrix<F::Element> {
        self.map(m, |e, _, _| self.field.multiply(c, e))
    }

    /// `m · v`.
    #[must_use]
    pub fn apply(&self, m: &Matrix<F::Element>, v: &[F::Element]) -> Vector<F::Element> {
        let f = &self.field;
        (0..self.dim)
            .map(|row| {
                (0..self.dim).fold(f.zero(), |acc, i| f.add(&acc, &f.multiply(&m[i][row], &v[i])))
            })
            .collect()
    }

    /// `a · b`.
    #[must_use]
    pub fn multiply(&self, a: &Matrix<F::Element>, b: &Matrix<F::Element>) -> Matrix<F::Element> {
        let f = &self.field;
        self.fill(|col, row| {
            (0..self.dim).fold(f.zero(), |acc, i| f.add(&acc, &f.multiply(&a[i][row], &b[col][i])))
        })
    }

    /// Sum of the diagonal.
    #[must_use]
    pub fn trace(&self, m: &Matrix<F::Element>) -> F::Element {
        (0..self.dim).fold(self.field.zero(), |acc, i| self.field.add(&acc, &m[i][i]))
    }

    /// Determinant (`1` in dimension 0).
    #[must_use]
    pub fn determinant(&self, m: &Matrix<F::Element>) -> F::Element {
        let f = &self.field;
        match self.dim {
            0 => f.one(),
            1 => m[0][0].clone(),
            _ => f.subtract(&f.multiply(&m[0][0], &m[1][1]), &f.multiply(&m[1][0], &m[0][1])),
        }
    }

    /// Zero determinant.
    #[must_use]
    pub fn is_singular(&self, m: &Matrix<F::Element>) -> bool {
        self.field.is_zero(&self.determinant(m))
    }

    /// Inverse via the adjugate.
    ///
    /// # Errors
    /// [`AlgebraError::SingularMatrix`] when the determinant vanishes.
    pub fn invert(&self, m: &Matrix<F::Element>) -> Result<Matrix<F::Element>> {
        let f = &self.field;
        let det = self.determinant(m);
        if f.is_zero(&det) {
            return Err(AlgebraError::SingularMatrix);
        }
        let inv_det = f.invert(&det)?;
        Ok(match self.dim {
            0 => m.clone(),
            1 => vec![vec![inv_det]],
            _ => self.scale(
                &inv_det,
                &vec![
                    vec![m[1][1].clone(), f.negate(&m[0][1])],
                    vec![f.negate(&m[1][0]), m[0][0].clone()],
                ],
            ),
        })
    }

    /// `p^{-1} · m · p`.
    ///
    /// # Errors
    /// `p` is singular.
    pub fn conjugate(&self, m: &Matrix<F::Element>, p: &Matrix<F::Element>) -> Result<Matrix<F::Element>> {
        Ok(self.multiply(&self.multiply(&self.invert(p)?, m), p))
    }

    /// `v` and `m·v` are parallel (2-D cross product vanishes). Always true
    /// below dimension 2.
    #[must_use]
    pub fn is_eigenvector(&self, m: &Matrix<F::Element>, v: &[F::Element]) -> bool {
        if self.dim < 2 {
            return true;
        }
        let f = &self.field;
        let w = self.apply(m, v);
        f.equals(&f.multiply(&v[0], &w[1]), &f.multiply(&v[1], &w[0]))
    }

    /// `m = c·I` for some `c`.
    #[must_use]
    pub fn is_scalar(&self, m: &Matrix<F::Element>) -> bool {
        let f = &self.field;
        (0..self.dim).all(|col| {
            (0..self.dim).all(|row| {
                if col == row {
                    f.equals(&m[col][row], &m[0][0])
                } else {
                    f.is_zero(&m[col][row])
                }
            })
        })
    }

    /// Entry-wise equality.
    #[must_use]
    pub fn equals(&self, a: &Matrix<F::Element>, b: &Matrix<F::Element>) -> bool {
        a.len() == b.len()
            && a.iter().zip(b).all(|(u, v)| u.len() == v.len() && u.iter().zip(v).all(|(x, y)| self.field.equals(x, y)))
    }

    /// Rows rendered with the field's formatter: `[[a, c], [b, d]]`.
    #[must_use]
    pub fn format(&self, m: &Matrix<F::Element>) -> String {
        let rows: Vec<String> = (0..self.dim)
            .map(|r| {
                let entries: Vec<String> = self.row(r, m).iter().map(|e| self.field.format(e)).collect();
                format!("[{}]", entries.join(", "))
            })
            .collect();
        format!("[{}]", rows.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use btt_algebra::{Rational, RationalField, Ring};

    #[track_caller]
    fn q(num: i64, den: i64) -> Rational {
        Rational::new(num, den).unwrap()
    }

    #[track_caller]
    fn m2() -> MatrixAlgebra<RationalField> {
        MatrixAlgebra::new(RationalField, 2).unwrap()
    }

    #[test]
    fn rejects_large_dimensions() {
        assert!(MatrixAlgebra::new(RationalField, 0).is_ok());
        assert!(MatrixAlgebra::new(RationalField, 1).is_ok());
        assert_eq!(
            MatrixAlgebra::new(RationalField, 3).unwrap_err(),
            AlgebraError::UnsupportedDimension(3)
        );
    }

    #[test]
    fn determinant_trace_product() {
        let m = m2();
        let a = m.from_ints(&[&[2, 1], &[1, 2]]).unwrap();
        assert_eq!(m.determinant(&a), q(3, 1));
        assert_eq!(m.trace(&a), q(4, 1));
        assert_eq!(m.multiply(&a, &a), m.from_ints(&[&[5, 4], &[4, 5]]).unwrap());
        assert_eq!(m.multiply(&a, &m.one()), a);
    }

    #[test]
    fn column_major_layout() {
        let m = m2();
        // columns (1, 3) and (2, 4): the matrix [[1, 2], [3, 4]]
        let a = m.from_ints(&[&[1, 3], &[2, 4]]).unwrap();
        assert_eq!(m.column(1, &a), vec![q(2, 1), q(4, 1)]);
        assert_eq!(m.row(1, &a), vec![q(3, 1), q(4, 1)]);
        assert_eq!(m.apply(&a, &[q(1, 1), q(1, 1)]), vec![q(3, 1), q(7, 1)]);
        assert_eq!(m.determinant(&a), q(-2, 1));
        assert_eq!(m.format(&a), "[[1/1, 2/1], [3/1, 4/1]]");

        let r = m.replace_row(&a, 0, &[q(0, 1), q(9, 1)]);
        assert_eq!(m.row(0, &r), vec![q(0, 1), q(9, 1)]);
        assert_eq!(m.row(1, &r), m.row(1, &a));
        let c = m.replace_column(&a, 0, &[q(5, 1), q(6, 1)]);
        assert_eq!(m.column(0, &c), vec![q(5, 1), q(6, 1)]);
        assert_eq!(m.column(1, &c), m.column(1, &a));
    }

    #[test]
    fn inverse_and_conjugate() {
        let m = m2();
        let a = m.from_ints(&[&[1, 3], &[2, 4]]).unwrap();
        let inv = m.invert(&a).unwrap();
        assert_eq!(m.multiply(&a, &inv), m.one());
        assert_eq!(m.multiply(&inv, &a), m.one());

        let singular = m.from_ints(&[&[1, 2], &[2, 4]]).unwrap();
        assert!(m.is_singular(&singular));
        assert_eq!(m.invert(&singular), Err(AlgebraError::SingularMatrix));

        let b = m.from_ints(&[&[0, 1], &[1, 1]]).unwrap();
        let c = m.conjugate(&a, &b).unwrap();
        assert_eq!(m.trace(&c), m.trace(&a));
        assert_eq!(m.determinant(&c), m.determinant(&a));
    }

    #[test]
    fn small_dimensions() {
        let m1 = MatrixAlgebra::new(RationalField, 1).unwrap();
        let a = m1.from_ints(&[&[4]]).unwrap();
        assert_eq!(m1.determinant(&a), q(4, 1));
        assert_eq!(m1.invert(&a), Ok(vec![vec![q(1, 4)]]));

        let m0 = MatrixAlgebra::new(RationalField, 0).unwrap();
        assert_eq!(m0.determinant(&m0.one()), RationalField.one());
        assert_eq!(m0.invert(&m0.zero()), Ok(Vec::new()));
    }

    #[test]
    fn eigenvectors_and_scalars() {
        let m = m2();
        let diag = m.from_ints(&[&[2, 0], &[0, 3]]).unwrap();
        assert!(m.is_eigenvector(&diag, &[q(1, 1), q(0, 1)]));
        assert!(m.is_eigenvector(&diag, &[q(0, 1), q(1, 1)]));
        assert!(!m.is_eigenvector(&diag, &[q(1, 1), q(1, 1)]));
        assert!(m.is_scalar(&m.from_int(5)));
        assert!(!m.is_scalar(&diag));
        assert_eq!(m.from_ints(&[&[1, 2, 3]]), Err(AlgebraError::DimensionMismatch { expected: 2, got: 1 }));
    }

    #[test]
    fn add_subtract_scale_map() {
        let m = m2();
        let a = m.from_ints(&[&[1, 3], &[2, 4]]).unwrap();
        assert_eq!(m.subtract(&m.add(&a, &a), &a), a);
        assert_eq!(m.add(&a, &m.negate(&a)), m.zero());
        assert_eq!(m.scale(&q(2, 1), &a), m.add(&a, &a));
        assert_eq!(m.map(&a, |_, col, row| q(i64::try_from(col * 2 + row).unwrap(), 1)), m.from_ints(&[&[0, 1], &[2, 3]]).unwrap());
        assert!(m.equals(&a, &a.clone()));
    }
}
