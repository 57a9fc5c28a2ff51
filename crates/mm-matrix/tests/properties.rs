use mm_matrix::{multiply_blocked, multiply_naive, Matrix, Rows};
use proptest::prelude::*;

fn matrix_strategy(rows: usize, cols: usize) -> impl Strategy<Value = Matrix<i64>> {
    prop::collection::vec(-20i64..20, rows * cols)
        .prop_map(move |data| Matrix::from_vec(rows, cols, data).unwrap())
}

fn problem() -> impl Strategy<Value = (Matrix<i64>, Matrix<i64>)> {
    (1usize..24, 1usize..24, 1usize..24).prop_flat_map(|(m, n, l)| {
        (matrix_strategy(m, l), matrix_strategy(l, n))
    })
}

proptest! {
    #[test]
    fn blocked_matches_naive((a, b) in problem(), block in prop::sample::select(vec![1usize, 4, 16, 64])) {
        let (m, n) = (a.nrows(), b.ncols());
        let mut naive = Matrix::zeros(m, n).unwrap();
        let mut blocked = Matrix::zeros(m, n).unwrap();
        multiply_naive(&a, &b, &mut naive).unwrap();
        multiply_blocked(&a, &b, &mut blocked, block).unwrap();
        prop_assert_eq!(naive.as_slice(), blocked.as_slice());
    }

    #[test]
    fn quadrant_views_cover_owner((a, _) in problem()) {
        let (hr, hc) = (a.nrows() / 2, a.ncols() / 2);
        let quads = a.as_view().quadrants(hr, hc).unwrap();
        let offsets = [(0, 0), (0, hc), (hr, 0), (hr, hc)];
        for (q, (ro, co)) in quads.iter().zip(offsets) {
            for i in 0..hr {
                for j in 0..hc {
                    prop_assert_eq!(q.get(i, j), a.get(ro + i, co + j));
                }
            }
        }
    }
}
