//! Affine maps over GF(2).

use crate::matrix::BitMatrix;

/// Affine map `x -> lin * x ⊕ bias`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffineMap {
    /// Linear component.
    pub lin: BitMatrix,
    /// Additive bias, bit `i` added to output bit `i`.
    pub bias: u32,
}

impl AffineMap {
    /// Constructs a new affine map from components.
    pub fn new(lin: BitMatrix, bias: u32) -> Self {
        Self { lin, bias }
    }

    /// Applies the affine map.
    pub fn apply(&self, value: u32) -> u32 {
        self.lin.apply(value) ^ self.bias
    }

    /// The bias as a column of single-bit rows, parallel to `lin.bit_rows()`.
    pub fn offset_rows(&self) -> Vec<Vec<u8>> {
        (0..self.lin.row_count())
            .map(|row| vec![((self.bias >> row) & 1) as u8])
            .collect()
    }
}
