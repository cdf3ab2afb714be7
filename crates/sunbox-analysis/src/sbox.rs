//! The S-box entity: an immutable truth table with lazily computed tables.

use std::sync::OnceLock;

use rand::seq::SliceRandom;
use rand::RngCore;
use sunbox_core::{bit_length, rotate_left_width, Table};

use crate::error::SboxError;
use crate::tables::{self, LinearStructure};

/// Widest S-box [`Sbox::random_permutation`] will build.
pub const MAX_RANDOM_BITS: u32 = 24;

/// Vectorial Boolean function `F_2^m -> F_2^n` given by its full truth table.
///
/// `m` is derived from the table length and `n` from the largest output. The
/// LAT, DDT, ACT and linear structures are computed on first request and kept
/// for the lifetime of this value only; clones carry whatever was already
/// computed.
#[derive(Clone, Debug)]
pub struct Sbox {
    table: Vec<u32>,
    input_bits: u32,
    output_bits: u32,
    lat: OnceLock<Table>,
    ddt: OnceLock<Table>,
    act: OnceLock<Table>,
    linear_structures: OnceLock<Vec<LinearStructure>>,
}

impl Sbox {
    /// Builds an S-box from its truth table.
    ///
    /// The table must be non-empty and its length a power of two.
    pub fn new(table: Vec<u32>) -> Result<Self, SboxError> {
        if table.is_empty() {
            return Err(SboxError::Empty);
        }
        if !table.len().is_power_of_two() {
            return Err(SboxError::LengthNotPowerOfTwo { len: table.len() });
        }
        Ok(Self::from_valid_table(table))
    }

    /// Builds an S-box from signed values, rejecting negative or oversized entries.
    pub fn from_signed(values: &[i64]) -> Result<Self, SboxError> {
        if values.is_empty() {
            return Err(SboxError::Empty);
        }
        let table = values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                if value < 0 {
                    Err(SboxError::NegativeValue { index, value })
                } else {
                    u32::try_from(value).map_err(|_| SboxError::ValueTooLarge { index, value })
                }
            })
            .collect::<Result<Vec<u32>, SboxError>>()?;
        Self::new(table)
    }

    /// Generates a uniformly random bijective S-box on `bits` bits.
    pub fn random_permutation<R: RngCore>(bits: u32, rng: &mut R) -> Result<Self, SboxError> {
        if bits > MAX_RANDOM_BITS {
            return Err(SboxError::UnsupportedWidth { bits });
        }
        let mut table: Vec<u32> = (0..1u32 << bits).collect();
        table.shuffle(rng);
        Ok(Self::from_valid_table(table))
    }

    fn from_valid_table(table: Vec<u32>) -> Self {
        let input_bits = table.len().trailing_zeros();
        let output_bits = table.iter().copied().max().map_or(0, bit_length);
        Self {
            table,
            input_bits,
            output_bits,
            lat: OnceLock::new(),
            ddt: OnceLock::new(),
            act: OnceLock::new(),
            linear_structures: OnceLock::new(),
        }
    }

    /// Evaluates the S-box at `x`.
    ///
    /// # Panics
    /// Panics if `x` is outside `0..2^m`.
    #[inline]
    pub fn apply(&self, x: usize) -> u32 {
        self.table[x]
    }

    /// Evaluates the S-box at `x`, or `None` when `x` is out of the domain.
    #[inline]
    pub fn get(&self, x: usize) -> Option<u32> {
        self.table.get(x).copied()
    }

    /// Number of input bits `m`.
    #[inline]
    pub fn input_bits(&self) -> u32 {
        self.input_bits
    }

    /// Number of output bits `n`.
    #[inline]
    pub fn output_bits(&self) -> u32 {
        self.output_bits
    }

    /// Size of the domain, `2^m`.
    #[inline]
    pub fn domain_size(&self) -> usize {
        self.table.len()
    }

    /// Size of the range, `2^n`.
    #[inline]
    pub fn range_size(&self) -> usize {
        1usize << self.output_bits
    }

    /// The truth table.
    #[inline]
    pub fn table(&self) -> &[u32] {
        &self.table
    }

    /// Returns `x -> S(x) ⊕ k`.
    pub fn xor(&self, k: u32) -> Self {
        Self::from_valid_table(self.table.iter().map(|&y| y ^ k).collect())
    }

    /// Returns `x -> S(x) <<< r`, rotating within the `n`-bit output width.
    pub fn rotate_left(&self, r: u32) -> Self {
        let width = self.output_bits;
        Self::from_valid_table(
            self.table
                .iter()
                .map(|&y| rotate_left_width(y, r, width))
                .collect(),
        )
    }

    /// Returns `x -> S(x) · k mod 2^n`.
    pub fn mul(&self, k: u32) -> Self {
        let modulus = 1u64 << self.output_bits;
        Self::from_valid_table(
            self.table
                .iter()
                .map(|&y| ((u64::from(y) * u64::from(k)) % modulus) as u32)
                .collect(),
        )
    }

    /// Linear Approximation Table, `2^m × 2^n`, cached.
    pub fn lat(&self) -> &Table {
        self.lat
            .get_or_init(|| tables::linear_approximation_table(self))
    }

    /// Difference Distribution Table, `2^m × 2^n`, cached.
    pub fn ddt(&self) -> &Table {
        self.ddt
            .get_or_init(|| tables::difference_distribution_table(self))
    }

    /// Autocorrelation Table, `DDT × H(n)`, cached.
    pub fn act(&self) -> &Table {
        self.act
            .get_or_init(|| tables::autocorrelation_table(self.ddt(), self.output_bits))
    }

    /// All linear structures `(b, a, c)` with `a, b ≥ 1`, cached.
    pub fn linear_structures(&self) -> &[LinearStructure] {
        self.linear_structures
            .get_or_init(|| tables::linear_structures(self.act(), self.input_bits))
    }
}

impl PartialEq for Sbox {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table
    }
}

impl Eq for Sbox {}
