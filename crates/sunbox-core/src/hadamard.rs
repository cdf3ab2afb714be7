//! Sylvester-Hadamard matrices.

use crate::table::Table;

/// Returns the `2^k × 2^k` Hadamard matrix.
///
/// `H(0) = [[1]]` and `H(k) = [[H(k-1), H(k-1)], [H(k-1), -H(k-1)]]`.
pub fn hadamard(k: u32) -> Table {
    let mut current = Table::new_zeroed(1, 1);
    current.set(0, 0, 1);

    for _ in 0..k {
        let size = current.rows();
        let mut next = Table::new_zeroed(size * 2, size * 2);
        for (r, c, value) in current.entries() {
            next.set(r, c, value);
            next.set(r, c + size, value);
            next.set(r + size, c, value);
            next.set(r + size, c + size, -value);
        }
        current = next;
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::parity;

    #[test]
    fn first_levels_match_definition() {
        assert_eq!(hadamard(0).to_rows(), vec![vec![1]]);
        assert_eq!(hadamard(1).to_rows(), vec![vec![1, 1], vec![1, -1]]);
        assert_eq!(
            hadamard(2).to_rows(),
            vec![
                vec![1, 1, 1, 1],
                vec![1, -1, 1, -1],
                vec![1, 1, -1, -1],
                vec![1, -1, -1, 1],
            ]
        );
    }

    #[test]
    fn entries_are_signed_inner_products() {
        let h = hadamard(4);
        for (r, c, value) in h.entries() {
            let expected = if parity((r & c) as u32) == 0 { 1 } else { -1 };
            assert_eq!(value, expected);
        }
    }

    #[test]
    fn square_is_scaled_identity() {
        for k in 0..5 {
            let h = hadamard(k);
            let size = 1i64 << k;
            let square = h.mul(&h);
            for (r, c, value) in square.entries() {
                assert_eq!(value, if r == c { size } else { 0 });
            }
        }
    }
}
