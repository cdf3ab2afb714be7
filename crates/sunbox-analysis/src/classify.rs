//! Structural predicates and GF(2) equivalence extraction.

use sunbox_core::Table;

use crate::affine::AffineMap;
use crate::matrix::BitMatrix;
use crate::sbox::Sbox;

impl Sbox {
    /// True if `S(x) = M·x` for some binary matrix `M`.
    ///
    /// Every LAT entry must be `0` or exactly `LAT[0][0]`.
    pub fn is_linear(&self) -> bool {
        let lat = self.lat();
        let full = lat.get(0, 0);
        lat.entries().all(|(_, _, v)| v == 0 || v == full)
    }

    /// True if `S(x) = A·x ⊕ B` for some binary matrix `A` and vector `B`.
    pub fn is_affine(&self) -> bool {
        let lat = self.lat();
        let full = lat.get(0, 0);
        lat.entries().all(|(_, _, v)| v == 0 || v.abs() == full)
    }

    /// True if `S(x) = x ⊕ S(0)` for every `x`.
    pub fn is_xor(&self) -> bool {
        let k = self.apply(0);
        self.table()
            .iter()
            .enumerate()
            .all(|(x, &y)| y == k ^ x as u32)
    }

    /// True if `m = n` and every value of `0..2^m` appears exactly once.
    pub fn is_bijective(&self) -> bool {
        if self.input_bits() != self.output_bits() {
            return false;
        }
        let mut seen = vec![false; self.domain_size()];
        for &y in self.table() {
            let slot = &mut seen[y as usize];
            if *slot {
                return false;
            }
            *slot = true;
        }
        true
    }

    /// True if some differential `(a, b) ≠ (0, 0)` holds for every input.
    pub fn is_differential(&self) -> bool {
        let ddt = self.ddt();
        let full = ddt.get(0, 0);
        ddt.entries()
            .any(|(a, b, v)| (a, b) != (0, 0) && v == full)
    }

    /// The matrix `M` with `S(x) = M·x`, or `None` if the S-box is not linear.
    pub fn matrix_equivalent(&self) -> Option<BitMatrix> {
        if !self.is_linear() {
            return None;
        }
        let lat = self.lat();
        let rows = (0..self.output_bits())
            .map(|bit| first_nonzero_in_column(lat, 1 << bit).map(|(row, _)| row as u32))
            .collect::<Option<Vec<u32>>>()?;
        Some(BitMatrix::from_rows(rows, self.input_bits()))
    }

    /// The map `x -> A·x ⊕ B` equal to the S-box, or `None` if it is not affine.
    ///
    /// A positive LAT entry in column `2^bit` gives offset bit `0`, a negative one `1`.
    pub fn affine_equivalent(&self) -> Option<AffineMap> {
        if !self.is_affine() {
            return None;
        }
        let lat = self.lat();
        let mut rows = Vec::with_capacity(self.output_bits() as usize);
        let mut bias = 0u32;
        for bit in 0..self.output_bits() {
            let (row, value) = first_nonzero_in_column(lat, 1 << bit)?;
            rows.push(row as u32);
            if value < 0 {
                bias |= 1 << bit;
            }
        }
        Some(AffineMap::new(
            BitMatrix::from_rows(rows, self.input_bits()),
            bias,
        ))
    }
}

fn first_nonzero_in_column(lat: &Table, col: usize) -> Option<(usize, i64)> {
    (0..lat.rows())
        .map(|row| (row, lat.get(row, col)))
        .find(|&(_, value)| value != 0)
}
