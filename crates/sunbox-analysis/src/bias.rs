//! Maximal-bias approximations and the Biryukov-Perrin distance metric.

use sunbox_core::Table;

use crate::sbox::Sbox;

/// Linear approximation `a·x = b·S(x) ⊕ c`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LinearApproximation {
    /// Input mask `a`.
    pub input_mask: u32,
    /// Output mask `b`.
    pub output_mask: u32,
    /// Constant `c`: `0` when the LAT entry is positive, `1` otherwise.
    pub constant: u8,
}

/// Differential `S(x ⊕ a) = S(x) ⊕ b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Differential {
    /// Input difference `a`.
    pub input_diff: u32,
    /// Output difference `b`.
    pub output_diff: u32,
}

/// Every linear approximation reaching the largest absolute LAT entry.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearBias {
    /// Largest `|LAT[a][b]|` over `a, b ≥ 1`.
    pub bias: i64,
    /// `bias / 2^m + 1/2`.
    pub probability: f64,
    /// All approximations at the maximum, in `(a, b)` order.
    pub approximations: Vec<LinearApproximation>,
}

/// Every differential reaching the largest DDT entry outside `(0, 0)`.
#[derive(Clone, Debug, PartialEq)]
pub struct DifferentialBias {
    /// Largest `DDT[a][b]` over `(a, b) ≠ (0, 0)`.
    pub count: i64,
    /// `count / 2^m`.
    pub probability: f64,
    /// All differentials at the maximum, in `(a, b)` order.
    pub differentials: Vec<Differential>,
}

impl Sbox {
    /// Linear approximations with maximal absolute bias, excluding zero masks.
    pub fn maximal_linear_bias(&self) -> LinearBias {
        maximal_linear_bias(self.lat(), self.input_bits())
    }

    /// Differentials with maximal probability, excluding the trivial one.
    pub fn maximal_differential_bias(&self) -> DifferentialBias {
        maximal_differential_bias(self.ddt(), self.input_bits())
    }

    /// `Σ (DDT[a][b] - 2)²` over `a, b ≥ 1` with `DDT[a][b] > 2`; lower is better.
    pub fn biryukov_perrin_metric(&self) -> u64 {
        biryukov_perrin_metric(self.ddt())
    }
}

/// Scans a LAT for the approximations of maximal absolute bias.
pub fn maximal_linear_bias(lat: &Table, input_bits: u32) -> LinearBias {
    let bias = (1..lat.rows())
        .flat_map(|a| lat.row(a)[1.min(lat.cols())..].iter())
        .map(|v| v.abs())
        .max()
        .unwrap_or(0);

    let approximations = lat
        .entries()
        .filter(|&(a, b, v)| a >= 1 && b >= 1 && v.abs() == bias)
        .map(|(a, b, v)| LinearApproximation {
            input_mask: a as u32,
            output_mask: b as u32,
            constant: if v > 0 { 0 } else { 1 },
        })
        .collect();

    LinearBias {
        bias,
        probability: bias as f64 / (1u64 << input_bits) as f64 + 0.5,
        approximations,
    }
}

/// Scans a DDT for the differentials of maximal count outside `(0, 0)`.
pub fn maximal_differential_bias(ddt: &Table, input_bits: u32) -> DifferentialBias {
    let nontrivial = || ddt.entries().filter(|&(a, b, _)| (a, b) != (0, 0));
    let count = nontrivial().map(|(_, _, v)| v).max().unwrap_or(0);

    let differentials = nontrivial()
        .filter(|&(_, _, v)| v == count)
        .map(|(a, b, _)| Differential {
            input_diff: a as u32,
            output_diff: b as u32,
        })
        .collect();

    DifferentialBias {
        count,
        probability: count as f64 / (1u64 << input_bits) as f64,
        differentials,
    }
}

/// Distance of a DDT to a perfectly flat (APN-like) one.
pub fn biryukov_perrin_metric(ddt: &Table) -> u64 {
    ddt.entries()
        .filter(|&(a, b, v)| a >= 1 && b >= 1 && v > 2)
        .map(|(_, _, v)| {
            let excess = (v - 2) as u64;
            excess * excess
        })
        .sum()
}
