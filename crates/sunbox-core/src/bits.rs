//! Bit helpers.

/// Returns the GF(2) sum of the bits of `value`.
#[inline]
pub fn parity(value: u32) -> u32 {
    value.count_ones() & 1
}

/// Number of bits needed to represent `value` (`0` for `0`).
#[inline]
pub fn bit_length(value: u32) -> u32 {
    u32::BITS - value.leading_zeros()
}

/// Rotates the low `width` bits of `value` left by `shift`.
///
/// Bits above `width` are discarded. The shift is taken modulo `width`, and a
/// zero width always yields zero.
#[inline]
pub fn rotate_left_width(value: u32, shift: u32, width: u32) -> u32 {
    if width == 0 {
        return 0;
    }
    let mask = if width >= u32::BITS {
        u32::MAX
    } else {
        (1u32 << width) - 1
    };
    let value = value & mask;
    let shift = shift % width;
    if shift == 0 {
        return value;
    }
    ((value << shift) | (value >> (width - shift))) & mask
}
