//! The Bruhat-Tits tree over a [`DVField`].
//!
//! A vertex is a homothety class of lattices in `K^2`. Each class has a
//! unique representative spanned by the columns `(1, u)` and `(0, π^n)` with
//! `u` reduced modulo `π^n`; [`Vertex`] stores exactly that pair. Moving to
//! a child `i ∈ 0..p` appends the digit `i` at position `n`; the remaining
//! neighbor (edge label `p`) forgets the last digit.

use core::fmt;

use btt_algebra::{AlgebraError, ExtendedInt, Result};
use btt_fields::DVField;
use btt_linalg::{DVVectorSpace, Matrix, MatrixAlgebra, Vector};
use once_cell::sync::OnceCell;
use tracing::{debug, trace};

use crate::rooted::RootedTree;
use crate::unrooted::{Adj, Step, UnrootedTree};

/// Canonical lattice class `[(1, u), (0, π^n)]`.
///
/// `u` is its own truncation modulo `π^n`, so two vertices are equal exactly
/// when they denote the same class.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Vertex<E> {
    /// Off-diagonal generator entry, reduced modulo `π^n`.
    pub u: E,
    /// Exponent of the diagonal generator.
    pub n: i64,
}

/// The `(p+1)`-regular tree of lattice classes in `K^2`.
///
/// Edge labels are `0..p` for the children and `p` for the remaining
/// neighbor.
#[derive(Clone, Debug)]
pub struct BruhatTitsTree<F: DVField + Clone> {
    field: F,
    p: u64,
    space: DVVectorSpace<F>,
    algebra: MatrixAlgebra<F>,
    origin: OnceCell<Vertex<F::Element>>,
    inf_end: OnceCell<Vector<F::Element>>,
}

impl<F: DVField + Clone> BruhatTitsTree<F> {
    /// Tree over `field`.
    ///
    /// # Errors
    /// Only if the rank-2 matrix algebra cannot be built.
    pub fn new(field: F) -> Result<Self> {
        let algebra = MatrixAlgebra::new(field.clone(), 2)?;
        Ok(Self {
            p: field.residue_field_size(),
            space: DVVectorSpace::new(field.clone(), 2),
            field,
            algebra,
            origin: OnceCell::new(),
            inf_end: OnceCell::new(),
        })
    }

    /// Underlying field.
    #[inline]
    #[must_use]
    pub const fn field(&self) -> &F {
        &self.field
    }

    /// Size of the residue field; each vertex has `p + 1` neighbors.
    #[inline]
    #[must_use]
    pub const fn p(&self) -> u64 {
        self.p
    }

    /// `K^2` with its lattice predicates.
    #[inline]
    #[must_use]
    pub const fn space(&self) -> &DVVectorSpace<F> {
        &self.space
    }

    /// `2 × 2` matrices over `K`.
    #[inline]
    #[must_use]
    pub const fn algebra(&self) -> &MatrixAlgebra<F> {
        &self.algebra
    }

    /// `BruhatTitsTree[<field name>]`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("BruhatTitsTree[{}]", self.field.name())
    }

    /* --------------------------------- vertices -------------------------------- */

    /// The class of the standard lattice `R^2`.
    pub fn origin(&self) -> &Vertex<F::Element> {
        self.origin.get_or_init(|| Vertex { u: self.field.zero(), n: 0 })
    }

    /// `v` is the standard lattice class.
    #[must_use]
    pub fn vertex_is_origin(&self, v: &Vertex<F::Element>) -> bool {
        self.field.is_zero(&v.u) && v.n == 0
    }

    /// Vertex with explicit coordinates, truncating `u` modulo `π^n`.
    ///
    /// # Errors
    /// Arithmetic failure in the truncation.
    pub fn vertex(&self, u: &F::Element, n: i64) -> Result<Vertex<F::Element>> {
        Ok(Vertex { u: self.field.mod_pow(u, n)?, n })
    }

    /// Child `i`: `{u + i·π^n, n + 1}`.
    #[must_use]
    pub fn apply(&self, v: &Vertex<F::Element>, i: u64) -> Vertex<F::Element> {
        let f = &self.field;
        if i == 0 {
            return Vertex { u: v.u.clone(), n: v.n + 1 };
        }
        let digit = f.from_int(i64::try_from(i).unwrap_or(i64::MAX));
        let step = f.multiply(&digit, &f.from_val(ExtendedInt::Finite(v.n)));
        Vertex { u: f.add(&v.u, &step), n: v.n + 1 }
    }

    /// The neighbor across edge `p`: `{u mod π^(n−1), n − 1}`.
    ///
    /// # Errors
    /// Arithmetic failure in the truncation.
    pub fn apply_inf(&self, v: &Vertex<F::Element>) -> Result<Vertex<F::Element>> {
        self.vertex(&v.u, v.n - 1)
    }

    /// Canonical generators: columns `(1, u)` and `(0, π^n)`.
    #[must_use]
    pub fn vertex_to_mat(&self, v: &Vertex<F::Element>) -> Matrix<F::Element> {
        let f = &self.field;
        vec![vec![f.one(), v.u.clone()], vec![f.zero(), f.from_val(ExtendedInt::Finite(v.n))]]
    }

    /// [`Self::vertex_to_mat`] scaled to be primitive integral.
    ///
    /// # Errors
    /// Propagates scaling errors.
    pub fn vertex_to_int_mat(&self, v: &Vertex<F::Element>) -> Result<Matrix<F::Element>> {
        self.space.to_int_matrix(&self.vertex_to_mat(v))
    }

    /// The vertex for the lattice spanned by the columns of `g`.
    ///
    /// Writing the columns as `(a, c)` and `(b, d)`, swap them so that
    /// `v(a) ≤ v(b)`; then the class is `[(1, c/a), (0, π^n)]` with
    /// `n = v(d − b·c/a) − v(a)`, and `c/a` is reduced modulo `π^n`.
    ///
    /// # Errors
    /// [`AlgebraError::SingularMatrix`] when the columns are dependent.
    pub fn mat_to_vertex(&self, g: &Matrix<F::Element>) -> Result<Vertex<F::Element>> {
        let f = &self.field;
        let (mut first, mut second) = (&g[0], &g[1]);
        let mut v_a = f.valuation(&first[0]);
        let v_b = f.valuation(&second[0]);
        if v_a > v_b {
            core::mem::swap(&mut first, &mut second);
            v_a = v_b;
        }
        let ExtendedInt::Finite(v_a) = v_a else {
            return Err(AlgebraError::SingularMatrix);
        };

        let c1 = f.divide(&first[1], &first[0])?;
        let rest = f.subtract(&second[1], &f.multiply(&second[0], &c1));
        let ExtendedInt::Finite(v_rest) = f.valuation(&rest) else {
            return Err(AlgebraError::SingularMatrix);
        };
        let n = v_rest - v_a;
        self.vertex(&c1, n)
    }

    /// `m · v`: multiply generators, then canonicalize.
    ///
    /// # Errors
    /// [`AlgebraError::SingularMatrix`] for singular `m`.
    pub fn action(&self, m: &Matrix<F::Element>, v: &Vertex<F::Element>) -> Result<Vertex<F::Element>> {
        self.mat_to_vertex(&self.algebra.multiply(m, &self.vertex_to_mat(v)))
    }

    /// `<u>_<n>` with `u` in the field's plain format.
    #[must_use]
    pub fn vertex_to_string(&self, v: &Vertex<F::Element>) -> String {
        format!("{}_{}", self.field.format(&v.u), v.n)
    }

    /// `\left[<u>\right]_{<n>}` with `u` in the field's LaTeX format.
    #[must_use]
    pub fn vertex_to_latex(&self, v: &Vertex<F::Element>) -> String {
        format!("\\left[{}\\right]_{{{}}}", self.field.latex(&v.u), v.n)
    }

    /* ----------------------------------- ends ---------------------------------- */

    /// The end `(0, 1)` reached by following edge `p` forever from the origin.
    pub fn inf_end(&self) -> &Vector<F::Element> {
        self.inf_end.get_or_init(|| vec![self.field.zero(), self.field.one()])
    }

    /// `v` lies on the ray from the origin toward [`Self::inf_end`].
    #[must_use]
    pub fn in_inf_end(&self, v: &Vertex<F::Element>) -> bool {
        self.field.is_zero(&v.u) && v.n <= 0
    }

    /// The primitive integral multiple of `end` lies in the primitive
    /// integral lattice of `v`.
    ///
    /// # Errors
    /// Zero-length vector.
    pub fn in_end(&self, v: &Vertex<F::Element>, end: &[F::Element]) -> Result<bool> {
        self.space.in_lattice(&self.vertex_to_int_mat(v)?, &self.space.to_int_vector(end)?)
    }

    /* ---------------------------- matrix classification --------------------------- */

    /// `(v(det m), v(tr m))`.
    fn det_trace_valuations(&self, m: &Matrix<F::Element>) -> Result<(i64, ExtendedInt)> {
        let f = &self.field;
        let ExtendedInt::Finite(v_det) = f.valuation(&self.algebra.determinant(m)) else {
            return Err(AlgebraError::SingularMatrix);
        };
        Ok((v_det, f.valuation(&self.algebra.trace(m))))
    }

    /// `μ = min(v(tr), ⌊v(det)/2⌋)`: scaling by `π^(−μ)` leaves a matrix
    /// whose smaller eigenvalue valuation is zero (or as close as parity
    /// allows).
    fn normalizing_exponent(&self, m: &Matrix<F::Element>) -> Result<(i64, i64)> {
        let (v_det, v_tr) = self.det_trace_valuations(m)?;
        let half = v_det.div_euclid(2);
        let mu = v_tr.finite().map_or(half, |t| t.min(half));
        Ok((v_det, mu))
    }

    /// How far `m` moves the vertices on its axis: `max(v(det) − 2·v(tr), 0)`,
    /// or 0 for trace zero.
    ///
    /// # Errors
    /// [`AlgebraError::SingularMatrix`] for singular `m`.
    pub fn translation_length(&self, m: &Matrix<F::Element>) -> Result<i64> {
        let (v_det, v_tr) = self.det_trace_valuations(m)?;
        Ok(v_tr.finite().map_or(0, |t| (v_det - 2 * t).max(0)))
    }

    /// `m` swaps the endpoints of an edge: `2·v(tr) > v(det)` with `v(det)` odd.
    ///
    /// # Errors
    /// [`AlgebraError::SingularMatrix`] for singular `m`.
    pub fn is_reflection(&self, m: &Matrix<F::Element>) -> Result<bool> {
        let (v_det, v_tr) = self.det_trace_valuations(m)?;
        Ok(v_tr.mul_int(2) > ExtendedInt::Finite(v_det) && v_det.rem_euclid(2) == 1)
    }

    /// `m` fixes every vertex: a nonzero scalar matrix.
    #[must_use]
    pub fn is_identity(&self, m: &Matrix<F::Element>) -> bool {
        self.algebra.is_scalar(m) && !self.field.is_zero(&m[0][0])
    }

    /// Smallest displacement `d(v, m·v)` over all vertices `v`:
    /// `v(det) − 2·μ`.
    ///
    /// # Errors
    /// [`AlgebraError::SingularMatrix`] for singular `m`.
    pub fn min_vertex_translation_distance(&self, m: &Matrix<F::Element>) -> Result<i64> {
        let (v_det, mu) = self.normalizing_exponent(m)?;
        Ok(v_det - 2 * mu)
    }

    /// Distance from the origin to the lattice spanned by the columns of `m`:
    /// `v(det) − 2·min v(m_ij)`.
    ///
    /// # Errors
    /// [`AlgebraError::ZeroMatrix`] or [`AlgebraError::SingularMatrix`].
    pub fn distance_to_origin(&self, m: &Matrix<F::Element>) -> Result<i64> {
        let ExtendedInt::Finite(min) = self.space.min_valuation(m)? else {
            return Err(AlgebraError::ZeroMatrix);
        };
        let ExtendedInt::Finite(v_det) = self.field.valuation(&self.algebra.determinant(m)) else {
            return Err(AlgebraError::SingularMatrix);
        };
        Ok(v_det - 2 * min)
    }

    /// `d(v, m·v)`.
    ///
    /// # Errors
    /// [`AlgebraError::SingularMatrix`] for singular `m`.
    pub fn translation_distance(&self, m: &Matrix<F::Element>, v: &Vertex<F::Element>) -> Result<i64> {
        self.distance_to_origin(&self.algebra.conjugate(m, &self.vertex_to_mat(v))?)
    }

    /// `d(origin, a·v)`.
    ///
    /// # Errors
    /// [`AlgebraError::SingularMatrix`] for singular `a`.
    pub fn length_of_image(&self, a: &Matrix<F::Element>, v: &Vertex<F::Element>) -> Result<i64> {
        self.distance_to_origin(&self.algebra.multiply(a, &self.vertex_to_mat(v)))
    }

    /// `v` is moved by exactly the translation length of `m`.
    ///
    /// # Errors
    /// [`AlgebraError::SingularMatrix`] for singular `m`.
    pub fn is_on_axis(&self, m: &Matrix<F::Element>, v: &Vertex<F::Element>) -> Result<bool> {
        Ok(self.translation_distance(m, v)? == self.translation_length(m)?)
    }

    /// The class of the lattice spanned by `probe` and `π^(−μ)·m·probe`.
    ///
    /// # Errors
    /// [`AlgebraError::SingularMatrix`] if `probe` is an eigenvector of `m`.
    pub fn proj_to_min_translation(&self, m: &Matrix<F::Element>, probe: &[F::Element]) -> Result<Vertex<F::Element>> {
        let (_, mu) = self.normalizing_exponent(m)?;
        let scaled = self.algebra.scale(&self.field.from_val(ExtendedInt::Finite(-mu)), m);
        let image = self.algebra.apply(&scaled, probe);
        self.mat_to_vertex(&vec![probe.to_vec(), image])
    }

    /// A vertex of minimal displacement under `m`, chosen closest to the
    /// origin among the projections of `(1, 0)`, `(0, 1)` and `(1, 1)`. For a
    /// hyperbolic `m` the result lies on its axis. Scalar matrices fix
    /// everything and yield the origin.
    ///
    /// # Errors
    /// [`AlgebraError::SingularMatrix`] for singular `m`.
    pub fn min_translation_vertex(&self, m: &Matrix<F::Element>) -> Result<Vertex<F::Element>> {
        let f = &self.field;
        let probes = [
            vec![f.one(), f.zero()],
            vec![f.zero(), f.one()],
            vec![f.one(), f.one()],
        ];

        let mut best: Option<(i64, Vertex<F::Element>)> = None;
        for probe in probes.iter().filter(|v| !self.algebra.is_eigenvector(m, v)) {
            let candidate = self.proj_to_min_translation(m, probe)?;
            let dist = self.distance_to_origin(&self.vertex_to_mat(&candidate))?;
            trace!(vertex = %self.vertex_to_string(&candidate), dist, "min-translation candidate");
            if best.as_ref().map_or(true, |(d, _)| dist < *d) {
                best = Some((dist, candidate));
            }
        }

        match best {
            Some((_, v)) => Ok(v),
            None => {
                self.det_trace_valuations(m)?;
                Ok(self.origin().clone())
            }
        }
    }

    /// `a` and `b` span homothetic lattices.
    ///
    /// # Errors
    /// [`AlgebraError::SingularMatrix`] for singular `a`.
    pub fn is_same_class(&self, a: &Matrix<F::Element>, b: &Matrix<F::Element>) -> Result<bool> {
        let quotient = self.algebra.multiply(&self.algebra.invert(a)?, b);
        Ok(self.space.is_trivial_lattice(&self.space.to_int_matrix(&quotient)?))
    }

    /* --------------------------------- snapshots ------------------------------- */

    /// All vertices within `radius` of `center`, in traversal order.
    ///
    /// # Errors
    /// Arithmetic failure while stepping.
    pub fn ball(&self, center: &Vertex<F::Element>, radius: usize) -> Result<Vec<Vertex<F::Element>>> {
        let mut out = vec![center.clone()];
        if radius == 0 {
            return Ok(out);
        }
        self.iter(center, 0usize, |depth, _, adj| {
            out.push(adj.vertex.clone());
            Step { value: depth + 1, stop: depth + 1 >= radius }
        })?;
        Ok(out)
    }

    /// The ball of radius `depth` around `center` as a rooted tree; children
    /// keep their edge label as seen from their parent.
    ///
    /// # Errors
    /// Arithmetic failure while stepping.
    pub fn snapshot(
        &self,
        center: &Vertex<F::Element>,
        depth: usize,
    ) -> Result<RootedTree<Adj<Vertex<F::Element>, Option<u64>>>> {
        let root = (Adj { vertex: center.clone(), edge: None }, None::<Vertex<F::Element>>, 0usize);
        RootedTree::try_make(root, &mut |(adj, parent, level)| -> Result<_> {
            let mut children = Vec::new();
            if level < depth {
                for next in self.neighbors(&adj.vertex)? {
                    if parent.as_ref() != Some(&next.vertex) {
                        let step = Adj { vertex: next.vertex, edge: Some(next.edge) };
                        children.push((step, Some(adj.vertex.clone()), level + 1));
                    }
                }
            }
            Ok((adj, children))
        })
    }
}

impl<F: DVField + Clone> UnrootedTree for BruhatTitsTree<F> {
    type Vertex = Vertex<F::Element>;
    type Edge = u64;

    /// Children `0..p`, then the neighbor across edge `p`.
    fn neighbors(&self, v: &Self::Vertex) -> Result<Vec<Adj<Self::Vertex, u64>>> {
        let mut out: Vec<_> = (0..self.p).map(|i| Adj { vertex: self.apply(v, i), edge: i }).collect();
        out.push(Adj { vertex: self.apply_inf(v)?, edge: self.p });
        Ok(out)
    }

    /// A child step is undone by edge `p`; a step across edge `p` is undone
    /// by the digit of `parent.u` at position `child.n`.
    fn reverse_edge(&self, parent: &Self::Vertex, child: &Self::Vertex, edge: &u64) -> Result<u64> {
        if *edge < self.p {
            return Ok(self.p);
        }
        let f = &self.field;
        let diff = f.subtract(&parent.u, &child.u);
        f.residue(&f.multiply(&diff, &f.from_val(ExtendedInt::Finite(-child.n))))
    }

    /// Up across edge `p` until reaching a common ancestor of `a` and `b`,
    /// then down along the digits of `b.u`.
    fn path(&self, a: &Self::Vertex, b: &Self::Vertex) -> Result<Vec<Adj<Self::Vertex, u64>>> {
        let f = &self.field;
        let agree = f.valuation(&f.subtract(&b.u, &a.u));
        let mut out = Vec::new();
        let mut current = a.clone();

        while current.n > b.n || agree < ExtendedInt::Finite(current.n) {
            current = self.apply_inf(&current)?;
            out.push(Adj { vertex: current.clone(), edge: self.p });
        }
        while current.n < b.n {
            let next = self.vertex(&b.u, current.n + 1)?;
            let digit = f.multiply(&f.subtract(&next.u, &current.u), &f.from_val(ExtendedInt::Finite(-current.n)));
            let edge = f.residue(&digit)?;
            out.push(Adj { vertex: next.clone(), edge });
            current = next;
        }

        debug!(
            from = %self.vertex_to_string(a),
            to = %self.vertex_to_string(b),
            len = out.len(),
            "path"
        );
        Ok(out)
    }
}

impl<F: DVField + Clone> fmt::Display for BruhatTitsTree<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
