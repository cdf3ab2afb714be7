//! Construction errors.

/// Errors raised when building an [`Sbox`](crate::Sbox).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SboxError {
    /// The truth table has no entries.
    #[error("the truth table is empty")]
    Empty,
    /// The truth table length is not `2^m` for any `m`.
    #[error("truth table length {len} is not a power of two")]
    LengthNotPowerOfTwo {
        /// Offending length.
        len: usize,
    },
    /// A truth table entry is negative.
    #[error("entry {index} is negative ({value})")]
    NegativeValue {
        /// Position of the entry.
        index: usize,
        /// The negative value.
        value: i64,
    },
    /// A truth table entry does not fit in 32 bits.
    #[error("entry {index} does not fit in 32 bits ({value})")]
    ValueTooLarge {
        /// Position of the entry.
        index: usize,
        /// The oversized value.
        value: i64,
    },
    /// A requested S-box width cannot be generated.
    #[error("cannot generate a {bits}-bit S-box")]
    UnsupportedWidth {
        /// Requested width in bits.
        bits: u32,
    },
}
