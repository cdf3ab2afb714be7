//! Human-readable summary of an S-box analysis.

use std::fmt::{self, Write};

use sunbox_analysis::Sbox;

use crate::render::polynomial;

/// Builds the report printed by `sunbox auto`.
pub fn auto_report(sbox: &Sbox) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, sbox)?;
    Ok(out)
}

fn write_report(out: &mut String, sbox: &Sbox) -> fmt::Result {
    writeln!(
        out,
        "S-box: {} -> {} bits",
        sbox.input_bits(),
        sbox.output_bits()
    )?;

    if let Some(matrix) = sbox.matrix_equivalent() {
        writeln!(out, "S-box is linear: S(x) = M·x with M =")?;
        for row in matrix.bit_rows() {
            writeln!(out, "  {}", join_bits(&row))?;
        }
    } else if let Some(affine) = sbox.affine_equivalent() {
        writeln!(out, "S-box is affine: S(x) = A·x ⊕ B with A, B =")?;
        for (row, offset) in affine.lin.bit_rows().iter().zip(affine.offset_rows()) {
            writeln!(out, "  {} \t {}", join_bits(row), join_bits(&offset))?;
        }
    } else {
        writeln!(out, "S-box is not affine.")?;
    }
    writeln!(out, "(x is a column binary vector, least significant bit first)")?;

    writeln!(out, "xor with constant: {}", yes_no(sbox.is_xor()))?;
    writeln!(out, "bijective: {}", yes_no(sbox.is_bijective()))?;
    writeln!(out, "deterministic differential: {}", yes_no(sbox.is_differential()))?;

    let linear = sbox.maximal_linear_bias();
    writeln!(
        out,
        "maximal linear bias: p = {} ({} approximations)",
        linear.probability,
        linear.approximations.len()
    )?;
    for approx in &linear.approximations {
        let constant = if approx.constant == 1 { " ⊕ 1" } else { "" };
        writeln!(
            out,
            "  {} = {}{}",
            polynomial(approx.input_mask, "x"),
            polynomial(approx.output_mask, "y"),
            constant
        )?;
    }

    let differential = sbox.maximal_differential_bias();
    writeln!(
        out,
        "maximal differential probability: p = {} ({} differentials)",
        differential.probability,
        differential.differentials.len()
    )?;
    for diff in &differential.differentials {
        writeln!(out, "  {:#x} -> {:#x}", diff.input_diff, diff.output_diff)?;
    }

    let structures = sbox.linear_structures();
    writeln!(out, "linear structures: {}", structures.len())?;
    for s in structures {
        writeln!(
            out,
            "  {}·(S(x) ⊕ S(x ⊕ {:#x})) = {}",
            polynomial(s.output_mask, "y"),
            s.input_mask,
            s.constant
        )?;
    }

    writeln!(out, "Biryukov-Perrin metric: {}", sbox.biryukov_perrin_metric())
}

fn join_bits(bits: &[u8]) -> String {
    bits.iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
