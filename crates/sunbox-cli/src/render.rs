//! Text rendering of tables, masks and truth tables.

use sunbox_core::Table;

use crate::parse::Base;

const RED: &str = "\u{1b}[48;5;9m\u{1b}[38;5;15m";
const YELLOW: &str = "\u{1b}[48;5;3m\u{1b}[38;5;0m";
const GREEN: &str = "\u{1b}[48;5;10m\u{1b}[38;5;0m";
const DARK_GREEN: &str = "\u{1b}[48;5;2m\u{1b}[38;5;0m";
const RESET: &str = "\u{1b}[0m";

/// One line per row, every value followed by a comma.
pub fn csv(table: &Table) -> String {
    let mut out = String::new();
    for row in table.iter_rows() {
        for value in row {
            out.push_str(&value.to_string());
            out.push(',');
        }
        out.push('\n');
    }
    out
}

/// Colored grid for a terminal.
///
/// Zeros and the `(0, 0)` corner are green, `±2` dark green, entries whose
/// magnitude equals the largest value below the first row red, the rest yellow.
pub fn ansi(table: &Table) -> String {
    let upper = (1..table.rows())
        .flat_map(|r| table.row(r).iter().copied())
        .max()
        .or_else(|| table.iter_rows().flatten().copied().max())
        .unwrap_or(0);
    let width = upper.to_string().len() + 2;

    let mut out = String::new();
    for (r, row) in table.iter_rows().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            let color = if value == 0 || (r, c) == (0, 0) {
                GREEN
            } else if value.abs() == 2 {
                DARK_GREEN
            } else if value.abs() == upper {
                RED
            } else {
                YELLOW
            };
            out.push_str(color);
            out.push_str(&format!("{value:>width$}"));
            out.push_str(RESET);
        }
        out.push('\n');
    }
    out
}

/// Renders a mask as a GF(2) sum of variables, most significant first (`x3 ⊕ x0`).
pub fn polynomial(mask: u32, variable: &str) -> String {
    if mask == 0 {
        return "0".to_owned();
    }
    (0..u32::BITS)
        .rev()
        .filter(|bit| (mask >> bit) & 1 == 1)
        .map(|bit| format!("{variable}{bit}"))
        .collect::<Vec<_>>()
        .join(" ⊕ ")
}

/// Formats a truth table as space-separated values in `base`.
pub fn truth_table(values: &[u32], output_bits: u32, base: Base) -> String {
    let digits = output_bits.max(1) as usize;
    values
        .iter()
        .map(|&v| match base {
            Base::Bin => format!("{v:0digits$b}"),
            Base::Dec => v.to_string(),
            Base::Hex => format!("{v:x}"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
