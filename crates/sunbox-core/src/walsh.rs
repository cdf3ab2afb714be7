//! In-place fast Walsh-Hadamard transform.

/// Applies the unnormalized Walsh-Hadamard transform to `values` in place.
///
/// Each butterfly replaces `(x, y)` by `(x + y, x - y)`, doubling the stride
/// from 1 up to half the slice length. The length must be a power of two.
pub fn fwht(values: &mut [i64]) {
    let len = values.len();
    debug_assert!(len == 0 || len.is_power_of_two(), "length must be a power of two");

    let mut half = 1;
    while half < len {
        for block in values.chunks_exact_mut(half * 2) {
            let (left, right) = block.split_at_mut(half);
            for (x, y) in left.iter_mut().zip(right.iter_mut()) {
                let (a, b) = (*x, *y);
                *x = a + b;
                *y = a - b;
            }
        }
        half *= 2;
    }
}

/// Inverts [`fwht`]: transforms again and divides every entry by the length.
///
/// The division is exact whenever `values` is the image of an integer vector.
pub fn inverse_fwht(values: &mut [i64]) {
    fwht(values);
    let len = values.len() as i64;
    if len > 1 {
        for value in values.iter_mut() {
            *value /= len;
        }
    }
}
