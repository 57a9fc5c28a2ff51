//! Recursion control: when a level splits, and which dimension chains are admissible
//! without padding.

use mm_matrix::{MatrixError, Result};

/// Whether an `m x l` by `l x n` problem is split into quadrants rather than handed
/// to the base kernel.
///
/// A level splits when its volume `m * n * l` is at least `threshold` and every
/// dimension is at least 2; a 1-wide dimension has no halves.
pub fn splits(m: usize, n: usize, l: usize, threshold: usize) -> bool {
    if m < 2 || n < 2 || l < 2 {
        return false;
    }
    match m.checked_mul(n).and_then(|mn| mn.checked_mul(l)) {
        Some(volume) => volume >= threshold,
        None => true,
    }
}

/// Number of levels that split before the base case, assuming every split halves exactly.
pub fn depth(m: usize, n: usize, l: usize, threshold: usize) -> usize {
    let (mut m, mut n, mut l) = (m, n, l);
    let mut levels = 0;
    while splits(m, n, l, threshold) {
        m = m.div_ceil(2);
        n = n.div_ceil(2);
        l = l.div_ceil(2);
        levels += 1;
    }
    levels
}

/// Walks the halving chain and fails on the first splitting level with an odd dimension.
///
/// # Errors
/// Returns `DimensionPolicyViolation` naming the level and its dimensions.
pub fn check_even_chain(m: usize, n: usize, l: usize, threshold: usize) -> Result<()> {
    let (mut m, mut n, mut l) = (m, n, l);
    let mut level = 0;
    while splits(m, n, l, threshold) {
        if m % 2 != 0 || n % 2 != 0 || l % 2 != 0 {
            return Err(MatrixError::DimensionPolicyViolation { level, m, n, l });
        }
        m /= 2;
        n /= 2;
        l /= 2;
        level += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_volume() {
        assert!(splits(64, 64, 64, 64 * 64 * 64));
        assert!(!splits(64, 64, 63, 64 * 64 * 64));
        assert!(splits(4, 4, 4, 1));
    }

    #[test]
    fn test_never_splits_unit_dimension() {
        assert!(!splits(1, 1024, 1024, 1));
        assert!(!splits(1024, 1024, 1, 1));
        assert!(!splits(0, 8, 8, 1));
    }

    #[test]
    fn test_overflowing_volume_splits() {
        assert!(splits(usize::MAX, usize::MAX, 2, usize::MAX));
    }

    #[test]
    fn test_depth() {
        assert_eq!(depth(4, 4, 4, 1), 2);
        assert_eq!(depth(256, 256, 256, 64 * 64 * 64), 3);
        assert_eq!(depth(8, 8, 8, 1000), 0);
        assert_eq!(depth(5, 5, 5, 1), 3);
    }

    #[test]
    fn test_even_chain() {
        assert!(check_even_chain(256, 128, 512, 64 * 64 * 64).is_ok());
        // 96 = 2^5 * 3: the chain stays even until the volume drops below the threshold.
        assert!(check_even_chain(96, 96, 96, 1000).is_ok());
        // Odd dimensions below the threshold are fine.
        assert!(check_even_chain(7, 9, 11, 1000).is_ok());
    }

    #[test]
    fn test_odd_level_is_reported() {
        assert_eq!(
            check_even_chain(12, 12, 12, 1).unwrap_err(),
            MatrixError::DimensionPolicyViolation {
                level: 2,
                m: 3,
                n: 3,
                l: 3
            }
        );
        assert!(matches!(
            check_even_chain(10, 8, 8, 1),
            Err(MatrixError::DimensionPolicyViolation { level: 1, m: 5, .. })
        ));
    }
}
