//! Loading S-box truth tables from text.

use anyhow::{bail, Context, Result};
use clap::ValueEnum;

/// Numeric base of the values in an S-box file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Base {
    /// Base 2, optional `0b` prefix.
    Bin,
    /// Base 10.
    Dec,
    /// Base 16, optional `0x` prefix.
    Hex,
}

impl Base {
    fn radix(self) -> u32 {
        match self {
            Base::Bin => 2,
            Base::Dec => 10,
            Base::Hex => 16,
        }
    }

    fn strip_prefix(self, token: &str) -> &str {
        let prefix = match self {
            Base::Bin => "0b",
            Base::Dec => return token,
            Base::Hex => "0x",
        };
        token.strip_prefix(prefix).unwrap_or(token)
    }
}

/// Splits `text` on whitespace, `,` and `;`, dropping empty tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Guesses the base: hex if any token has a `0x` prefix or a digit `a-f`,
/// otherwise decimal if any digit `2-9` appears, otherwise binary.
///
/// A `0b` prefix followed only by `0`/`1` digits is not counted as a hex
/// digit, so `0b`-prefixed files are read as binary.
pub fn detect_base<S: AsRef<str>>(tokens: &[S]) -> Base {
    let iter = || tokens.iter().map(|t| digits(t.as_ref()));
    if iter().any(|t| t.starts_with("0x") || t.chars().any(|c| ('a'..='f').contains(&c))) {
        Base::Hex
    } else if iter().any(|t| t.chars().any(|c| ('2'..='9').contains(&c))) {
        Base::Dec
    } else {
        Base::Bin
    }
}

fn digits(token: &str) -> &str {
    match token.strip_prefix("0b") {
        Some(rest) if !rest.is_empty() && rest.chars().all(|c| c == '0' || c == '1') => rest,
        _ => token,
    }
}

/// Parses a whole truth table, detecting the base unless one is given.
pub fn parse_table(text: &str, base: Option<Base>) -> Result<Vec<u32>> {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        bail!("no values found");
    }
    let base = base.unwrap_or_else(|| detect_base(&tokens));
    tracing::debug!(?base, count = tokens.len(), "parsing truth table");

    tokens
        .iter()
        .enumerate()
        .map(|(idx, token)| {
            u32::from_str_radix(base.strip_prefix(token), base.radix())
                .with_context(|| format!("value {idx} ({token:?}) is not a base-{} number", base.radix()))
        })
        .collect()
}
