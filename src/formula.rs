//! Integer helpers for perfect binary trees.

/// `true` iff `n` is a nonzero power of two.
#[inline]
pub fn is_power_of_two(n: usize) -> bool {
  n != 0 && n & (n - 1) == 0
}

/// Base-2 logarithm of a power of two, i.e. the height of a perfect tree with `n` leaves.
#[inline]
pub fn log2(n: usize) -> u32 {
  debug_assert!(is_power_of_two(n), "{n} is not a power of two");
  n.trailing_zeros()
}

/// 2^e
#[inline]
pub fn pow2e(e: u32) -> usize {
  1 << e
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn verify_is_power_of_two() {
    assert!(!is_power_of_two(0));
    for e in 0..usize::BITS {
      assert!(is_power_of_two(pow2e(e)), "2^{e}");
    }
    for n in [3, 5, 6, 7, 12, 100, usize::MAX] {
      assert!(!is_power_of_two(n), "{n}");
    }
  }

  #[test]
  fn verify_log2() {
    for (n, h) in [(1, 0), (2, 1), (4, 2), (8, 3), (1024, 10)] {
      assert_eq!(h, log2(n));
    }
    for e in 0..usize::BITS {
      assert_eq!(e, log2(pow2e(e)));
    }
  }
}
