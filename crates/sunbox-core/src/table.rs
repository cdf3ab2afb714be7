//! Dense integer tables used for LAT, DDT and ACT values.

/// A dense `rows × cols` matrix of `i64`, stored row-major in one allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    rows: usize,
    cols: usize,
    data: Box<[i64]>,
}

impl Table {
    /// Allocates a zeroed table.
    pub fn new_zeroed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0i64; rows * cols].into_boxed_slice(),
        }
    }

    /// Builds a table from nested rows, or `None` if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Option<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        let row_count = rows.len();
        let data: Vec<i64> = rows.into_iter().flatten().collect();
        Some(Self {
            rows: row_count,
            cols,
            data: data.into_boxed_slice(),
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Reads the entry at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[self.index(row, col)]
    }

    /// Writes the entry at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        let idx = self.index(row, col);
        self.data[idx] = value;
    }

    /// Adds `delta` to the entry at `(row, col)`.
    #[inline]
    pub fn add(&mut self, row: usize, col: usize, delta: i64) {
        let idx = self.index(row, col);
        self.data[idx] += delta;
    }

    /// Borrows one row.
    #[inline]
    pub fn row(&self, row: usize) -> &[i64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterates over the rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[i64]> + '_ {
        (0..self.rows).map(move |r| self.row(r))
    }

    /// Iterates over `(row, col, value)` for every entry.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, i64)> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, &value)| (idx / cols, idx % cols, value))
    }

    /// Copies the table into nested vectors, one per row.
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }

    /// Largest absolute value over the rows from `first_row` on, or `None` if there are none.
    pub fn max_abs_from_row(&self, first_row: usize) -> Option<i64> {
        (first_row..self.rows)
            .flat_map(|r| self.row(r).iter())
            .map(|v| v.abs())
            .max()
    }

    /// Exact integer product `self * rhs`.
    ///
    /// # Panics
    /// Panics if `self.cols() != rhs.rows()`.
    pub fn mul(&self, rhs: &Self) -> Self {
        assert_eq!(
            self.cols, rhs.rows,
            "inner dimensions must agree for a matrix product"
        );
        let mut result = Self::new_zeroed(self.rows, rhs.cols);
        for r in 0..self.rows {
            let out_start = r * rhs.cols;
            for (k, &lhs) in self.row(r).iter().enumerate() {
                if lhs == 0 {
                    continue;
                }
                for (out, &rv) in result.data[out_start..out_start + rhs.cols]
                    .iter_mut()
                    .zip(rhs.row(k))
                {
                    *out += lhs * rv;
                }
            }
        }
        result
    }

    /// Applies `f` to every entry, producing a new table of the same shape.
    pub fn map<F: Fn(i64) -> i64>(&self, f: F) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(row < self.rows && col < self.cols, "table index out of range");
        row * self.cols + col
    }
}
