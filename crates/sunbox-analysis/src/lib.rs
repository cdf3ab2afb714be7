//! S-box cryptanalysis engine.
//!
//! Given the truth table of a vectorial Boolean function `F_2^m -> F_2^n`,
//! this crate computes:
//! - The Linear Approximation, Difference Distribution and Autocorrelation Tables.
//! - Structural predicates (linear, affine, XOR, bijective, differential) and the
//!   GF(2) matrices of linear or affine S-boxes.
//! - Maximal-bias linear and differential approximations, linear structures and
//!   the Biryukov-Perrin metric.
//! - A best-first probe over the XOR/rotation/multiplication orbit of an S-box.
//!
//! All tables hold exact integers. Table cost grows as `2^(m+n)` (LAT, ACT) and
//! `2^(2m)` (DDT); nothing guards against widths that make this impractical.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod affine;
mod bias;
mod classify;
mod error;
mod matrix;
mod sbox;
mod search;
mod tables;

pub use affine::AffineMap;
pub use bias::{
    biryukov_perrin_metric, maximal_differential_bias, maximal_linear_bias, Differential,
    DifferentialBias, LinearApproximation, LinearBias,
};
pub use error::SboxError;
pub use matrix::BitMatrix;
pub use sbox::{Sbox, MAX_RANDOM_BITS};
pub use search::{search_target, Candidate, SearchConfig, SearchOutcome, Searcher};
pub use sunbox_core::Table;
pub use tables::{
    autocorrelation_table, ddt_from_act, difference_distribution_table,
    linear_approximation_table, linear_structures, LinearStructure,
};
