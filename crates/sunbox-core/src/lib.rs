//! Exact integer primitives shared by the sunbox analysis crates.
//!
//! This crate provides:
//! - The in-place fast Walsh-Hadamard transform.
//! - Recursive construction of Sylvester-Hadamard matrices.
//! - A dense row-major integer `Table` with an exact matrix product.
//! - Small bit helpers (parity, bit length, width-bounded rotation).
//!
//! All arithmetic is exact integer arithmetic on `i64`/`u32`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bits;
mod hadamard;
mod table;
mod walsh;

pub use crate::bits::{bit_length, parity, rotate_left_width};
pub use crate::hadamard::hadamard;
pub use crate::table::Table;
pub use crate::walsh::{fwht, inverse_fwht};
