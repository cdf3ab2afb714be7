//! Binary matrices over GF(2) recovered from linear S-boxes.

/// `rows × cols` binary matrix over GF(2), one packed `u32` per row.
///
/// Bit `j` of row `i` is the coefficient of input bit `j` in output bit `i`,
/// so applying the matrix to `x` sets output bit `i` to `parity(row_i & x)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitMatrix {
    rows: Vec<u32>,
    cols: u32,
}

impl BitMatrix {
    /// Builds a matrix from packed rows, masking each row to `cols` bits.
    pub fn from_rows(rows: Vec<u32>, cols: u32) -> Self {
        let mask = low_mask(cols);
        Self {
            rows: rows.into_iter().map(|row| row & mask).collect(),
            cols,
        }
    }

    /// Returns the `size × size` identity matrix.
    pub fn identity(size: u32) -> Self {
        Self::from_rows((0..size).map(|i| 1u32 << i).collect(), size)
    }

    /// Applies the matrix to `value`, treating its bits as a column vector.
    pub fn apply(&self, value: u32) -> u32 {
        let mut out = 0u32;
        for (row_idx, row) in self.rows.iter().enumerate() {
            let parity = (row & value).count_ones() & 1;
            out |= parity << row_idx;
        }
        out
    }

    /// Number of rows (output bits).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (input bits).
    pub fn col_count(&self) -> u32 {
        self.cols
    }

    /// Reads the bit at `(row, col)`.
    pub fn bit(&self, row: usize, col: u32) -> bool {
        (self.rows[row] >> col) & 1 == 1
    }

    /// Exposes the packed rows (little-endian bit order within each row).
    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    /// Expands every row into a list of bits, least significant column first.
    pub fn bit_rows(&self) -> Vec<Vec<u8>> {
        self.rows
            .iter()
            .map(|&row| (0..self.cols).map(|col| ((row >> col) & 1) as u8).collect())
            .collect()
    }
}

fn low_mask(bits: u32) -> u32 {
    if bits >= u32::BITS {
        u32::MAX
    } else {
        (1u32 << bits) - 1
    }
}
