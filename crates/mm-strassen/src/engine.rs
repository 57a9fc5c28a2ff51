//! The recursive Strassen engine.
//!
//! Each level splits A, B and C into quadrant views, computes the seven Strassen
//! products as independent tasks on the engine's worker pool, waits for all of them,
//! and folds them into C's quadrants. Scratch sums and product buffers are owned by the
//! task or frame that allocates them and are dropped on every exit path.

use log::{debug, trace};
use mm_matrix::ops::{self, Sign};
use mm_matrix::{
    Element, MatmulKernel, Matrix, MatrixError, MatrixView, MatrixViewMut, Rows, Shape,
};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::config::{OddDimensionPolicy, StrassenConfig};
use crate::error::Result;
use crate::recursion;

const Q11: usize = 0;
const Q12: usize = 1;
const Q21: usize = 2;
const Q22: usize = 3;

/// One operand of a Strassen product, in terms of the quadrants of A or B.
#[derive(Debug, Clone, Copy)]
enum Term {
    Quadrant(usize),
    Sum(usize, usize),
    Diff(usize, usize),
}

/// `P = lhs @ rhs`, where `lhs` is built from A's quadrants and `rhs` from B's.
#[derive(Debug, Clone, Copy)]
struct Product {
    lhs: Term,
    rhs: Term,
}

const PRODUCTS: [Product; 7] = [
    // P1 = (A11 + A22) (B11 + B22)
    Product {
        lhs: Term::Sum(Q11, Q22),
        rhs: Term::Sum(Q11, Q22),
    },
    // P2 = (A21 + A22) B11
    Product {
        lhs: Term::Sum(Q21, Q22),
        rhs: Term::Quadrant(Q11),
    },
    // P3 = A11 (B12 - B22)
    Product {
        lhs: Term::Quadrant(Q11),
        rhs: Term::Diff(Q12, Q22),
    },
    // P4 = A22 (B21 - B11)
    Product {
        lhs: Term::Quadrant(Q22),
        rhs: Term::Diff(Q21, Q11),
    },
    // P5 = (A11 + A12) B22
    Product {
        lhs: Term::Sum(Q11, Q12),
        rhs: Term::Quadrant(Q22),
    },
    // P6 = (A21 - A11) (B11 + B12)
    Product {
        lhs: Term::Diff(Q21, Q11),
        rhs: Term::Sum(Q11, Q12),
    },
    // P7 = (A12 - A22) (B21 + B22)
    Product {
        lhs: Term::Diff(Q12, Q22),
        rhs: Term::Sum(Q21, Q22),
    },
];

/// Signed product indices folded into C11, C12, C21 and C22.
const COMBINE: [&[(Sign, usize)]; 4] = [
    // C11 = P1 + P4 - P5 + P7
    &[(Sign::Plus, 0), (Sign::Plus, 3), (Sign::Minus, 4), (Sign::Plus, 6)],
    // C12 = P3 + P5
    &[(Sign::Plus, 2), (Sign::Plus, 4)],
    // C21 = P2 + P4
    &[(Sign::Plus, 1), (Sign::Plus, 3)],
    // C22 = P1 - P2 + P3 + P6
    &[(Sign::Plus, 0), (Sign::Minus, 1), (Sign::Plus, 2), (Sign::Plus, 5)],
];

/// A product operand: either a quadrant view or a freshly computed scratch matrix.
enum Operand<'q, 'a, T: Element> {
    Quadrant(&'q MatrixView<'a, T>),
    Scratch(Matrix<T>),
}

impl<'q, 'a, T: Element> Operand<'q, 'a, T> {
    fn resolve(term: Term, quads: &'q [MatrixView<'a, T>; 4]) -> mm_matrix::Result<Self> {
        let scratch = |x: usize, y: usize, sign: Sign| -> mm_matrix::Result<Self> {
            let shape = quads[x].shape();
            let mut out = Matrix::zeros(shape.rows, shape.cols)?;
            match sign {
                Sign::Plus => ops::add(&quads[x], &quads[y], &mut out)?,
                Sign::Minus => ops::sub(&quads[x], &quads[y], &mut out)?,
            }
            Ok(Operand::Scratch(out))
        };
        match term {
            Term::Quadrant(q) => Ok(Operand::Quadrant(&quads[q])),
            Term::Sum(x, y) => scratch(x, y, Sign::Plus),
            Term::Diff(x, y) => scratch(x, y, Sign::Minus),
        }
    }

    fn view(&self) -> MatrixView<'_, T> {
        match self {
            Operand::Quadrant(v) => (*v).clone(),
            Operand::Scratch(m) => m.as_view(),
        }
    }
}

/// Parallel recursive Strassen multiplication on a dedicated worker pool.
///
/// The pool is built once in `new` and reused by every call to `multiply`.
#[derive(Debug)]
pub struct Strassen {
    config: StrassenConfig,
    pool: ThreadPool,
}

impl Strassen {
    /// Validate `config` and start its worker pool.
    ///
    /// # Errors
    /// Returns an error for an invalid config or if the pool cannot be built.
    pub fn new(config: StrassenConfig) -> Result<Self> {
        config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("strassen-{}", i))
            .build()?;
        debug!(
            "strassen pool started: threads={} threshold={} base={} odd_policy={:?}",
            config.threads,
            config.threshold,
            config.base.name(),
            config.odd_policy
        );
        Ok(Strassen { config, pool })
    }

    /// `c = a @ b` for owned matrices.
    pub fn multiply<T: Element>(
        &self,
        a: &Matrix<T>,
        b: &Matrix<T>,
        c: &mut Matrix<T>,
    ) -> mm_matrix::Result<()> {
        self.matmul(&a.as_view(), &b.as_view(), &mut c.as_view_mut())
    }

    fn recurse<T: Element>(
        &self,
        a: &MatrixView<'_, T>,
        b: &MatrixView<'_, T>,
        c: &mut MatrixViewMut<'_, T>,
        level: usize,
    ) -> mm_matrix::Result<()> {
        let Shape { rows: m, cols: l } = a.shape();
        let n = b.shape().cols;

        if !recursion::splits(m, n, l, self.config.threshold) {
            return self.config.base.matmul(a, b, c);
        }

        if m % 2 == 0 && n % 2 == 0 && l % 2 == 0 {
            return self.split(a, b, c, level);
        }

        match self.config.odd_policy {
            OddDimensionPolicy::Reject => {
                Err(MatrixError::DimensionPolicyViolation { level, m, n, l })
            }
            OddDimensionPolicy::Pad => self.split_padded(a, b, c, level),
        }
    }

    /// Pads odd dimensions with zeros, splits the padded problem and crops the result.
    ///
    /// Zero rows of A and zero columns of B only add zero rows and columns to the
    /// product; zero padding along `l` contributes zero terms.
    fn split_padded<T: Element>(
        &self,
        a: &MatrixView<'_, T>,
        b: &MatrixView<'_, T>,
        c: &mut MatrixViewMut<'_, T>,
        level: usize,
    ) -> mm_matrix::Result<()> {
        let Shape { rows: m, cols: l } = a.shape();
        let n = b.shape().cols;
        let (pm, pn, pl) = (m.next_multiple_of(2), n.next_multiple_of(2), l.next_multiple_of(2));
        trace!(
            "level {}: padding [{}, {}, {}] -> [{}, {}, {}]",
            level,
            m,
            n,
            l,
            pm,
            pn,
            pl
        );

        let pa = Matrix::padded(a, pm, pl)?;
        let pb = Matrix::padded(b, pl, pn)?;
        let mut pc = Matrix::zeros(pm, pn)?;
        self.split(&pa.as_view(), &pb.as_view(), &mut pc.as_view_mut(), level)?;
        ops::copy(&pc.view(0, 0, m, n)?, c)
    }

    /// One Strassen level over even dimensions.
    fn split<T: Element>(
        &self,
        a: &MatrixView<'_, T>,
        b: &MatrixView<'_, T>,
        c: &mut MatrixViewMut<'_, T>,
        level: usize,
    ) -> mm_matrix::Result<()> {
        let Shape { rows: m, cols: l } = a.shape();
        let n = b.shape().cols;
        let (hm, hn, hl) = (m / 2, n / 2, l / 2);
        trace!("level {}: splitting [{}, {}, {}]", level, m, n, l);

        let a_quads = a.quadrants(hm, hl)?;
        let b_quads = b.quadrants(hl, hn)?;

        // Fan out the seven products; `collect` is the join.
        let products = PRODUCTS
            .par_iter()
            .map(|product| self.product(product, &a_quads, &b_quads, level))
            .collect::<mm_matrix::Result<Vec<Matrix<T>>>>()?;

        let c_quads = c.reborrow().into_quadrants(hm, hn)?;
        for (mut quad, terms) in c_quads.into_iter().zip(COMBINE) {
            let terms: Vec<(Sign, &Matrix<T>)> =
                terms.iter().map(|&(sign, k)| (sign, &products[k])).collect();
            ops::signed_sum(&terms, &mut quad)?;
        }
        Ok(())
    }

    fn product<T: Element>(
        &self,
        product: &Product,
        a_quads: &[MatrixView<'_, T>; 4],
        b_quads: &[MatrixView<'_, T>; 4],
        level: usize,
    ) -> mm_matrix::Result<Matrix<T>> {
        let lhs = Operand::resolve(product.lhs, a_quads)?;
        let rhs = Operand::resolve(product.rhs, b_quads)?;
        let (lhs, rhs) = (lhs.view(), rhs.view());

        let mut out = Matrix::zeros(lhs.shape().rows, rhs.shape().cols)?;
        self.recurse(&lhs, &rhs, &mut out.as_view_mut(), level + 1)?;
        Ok(out)
    }
}

impl MatmulKernel for Strassen {
    fn name(&self) -> &str {
        "strassen"
    }

    /// Validates shapes and the dimension policy up front, then runs the recursion on
    /// the pool. `c` is written only after every product of the top level is ready,
    /// so any error leaves it untouched.
    fn matmul<T: Element>(
        &self,
        a: &MatrixView<'_, T>,
        b: &MatrixView<'_, T>,
        c: &mut MatrixViewMut<'_, T>,
    ) -> mm_matrix::Result<()> {
        let (m, n, l) = Shape::matmul_dims(a.shape(), b.shape(), c.shape())?;
        if self.config.odd_policy == OddDimensionPolicy::Reject {
            recursion::check_even_chain(m, n, l, self.config.threshold)?;
        }
        debug!(
            "strassen multiply [{}x{}] @ [{}x{}]: {} recursive levels",
            m,
            l,
            l,
            n,
            recursion::depth(m, n, l, self.config.threshold)
        );
        self.pool.install(|| self.recurse(a, b, c, 0))
    }
}

/// One-shot `c = a @ b`: builds an engine for `config`, multiplies, and tears it down.
///
/// Prefer keeping a `Strassen` around when multiplying repeatedly; it owns a thread pool.
pub fn multiply<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    c: &mut Matrix<T>,
    config: &StrassenConfig,
) -> Result<()> {
    Strassen::new(config.clone())?.multiply(a, b, c)?;
    Ok(())
}
