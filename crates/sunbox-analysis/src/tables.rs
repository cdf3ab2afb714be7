//! LAT, DDT and ACT construction, plus linear structure detection.

use sunbox_core::{fwht, hadamard, parity, Table};

use crate::sbox::Sbox;

/// A mask triple `(b, a, c)` with `b·(S(x) ⊕ S(x ⊕ a)) = c` for every `x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LinearStructure {
    /// Output mask `b`.
    pub output_mask: u32,
    /// Input difference `a`.
    pub input_mask: u32,
    /// Constant value `c` of the masked difference.
    pub constant: u8,
}

/// Computes the LAT of `sbox`.
///
/// `LAT[a][b] = (#{x : a·x = b·S(x)} - 2^(m-1))`, i.e. the bias scaled by
/// `2^m`, so `LAT[0][0] = 2^(m-1)`. Each column is one Walsh-Hadamard
/// transform of the `±1` sequence of the component `b·S`.
pub fn linear_approximation_table(sbox: &Sbox) -> Table {
    let _span = tracing::debug_span!(
        "lat",
        m = sbox.input_bits(),
        n = sbox.output_bits()
    )
    .entered();

    let rows = sbox.domain_size();
    let cols = sbox.range_size();
    let mut lat = Table::new_zeroed(rows, cols);
    let mut spectrum = vec![0i64; rows];

    for b in 0..cols {
        for (slot, &y) in spectrum.iter_mut().zip(sbox.table()) {
            *slot = 1 - 2 * i64::from(parity(b as u32 & y));
        }
        fwht(&mut spectrum);
        for (a, &value) in spectrum.iter().enumerate() {
            lat.set(a, b, value.div_euclid(2));
        }
    }

    lat
}

/// Computes the DDT of `sbox`: `DDT[a][b] = #{x : S(x) ⊕ S(x ⊕ a) = b}`.
pub fn difference_distribution_table(sbox: &Sbox) -> Table {
    let _span = tracing::debug_span!(
        "ddt",
        m = sbox.input_bits(),
        n = sbox.output_bits()
    )
    .entered();

    let rows = sbox.domain_size();
    let table = sbox.table();
    let mut ddt = Table::new_zeroed(rows, sbox.range_size());

    for (x, &y) in table.iter().enumerate() {
        for a in 0..rows {
            ddt.add(a, (y ^ table[x ^ a]) as usize, 1);
        }
    }

    ddt
}

/// Computes the ACT as the exact product `DDT × H(n)`.
///
/// `ACT[a][b] = Σ_x (-1)^(b·(S(x) ⊕ S(x ⊕ a)))`, so `ACT[0][b] = 2^m`.
pub fn autocorrelation_table(ddt: &Table, output_bits: u32) -> Table {
    let _span = tracing::debug_span!("act", n = output_bits).entered();
    ddt.mul(&hadamard(output_bits))
}

/// Recovers the DDT from an ACT: `ACT × H(n) / 2^n`.
pub fn ddt_from_act(act: &Table, output_bits: u32) -> Table {
    let scale = 1i64 << output_bits;
    act.mul(&hadamard(output_bits)).map(|v| v / scale)
}

/// Lists every `(b, a, c)` with `a, b ≥ 1` and `|ACT[a][b]| = 2^m`.
pub fn linear_structures(act: &Table, input_bits: u32) -> Vec<LinearStructure> {
    let full = 1i64 << input_bits;
    let mut found = Vec::new();

    for b in 1..act.cols() {
        for a in 1..act.rows() {
            let value = act.get(a, b);
            if value.abs() == full {
                found.push(LinearStructure {
                    output_mask: b as u32,
                    input_mask: a as u32,
                    constant: ((1 - (value >> input_bits)) >> 1) as u8,
                });
            }
        }
    }

    tracing::debug!(count = found.len(), "linear structures scanned");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    const PRESENT: [u32; 16] = [
        0xc, 0x5, 0x6, 0xb, 0x9, 0x0, 0xa, 0xd, 0x3, 0xe, 0xf, 0x8, 0x4, 0x7, 0x1, 0x2,
    ];

    fn lat_by_counting(sbox: &Sbox) -> Table {
        let mut lat = Table::new_zeroed(sbox.domain_size(), sbox.range_size());
        let half = (sbox.domain_size() / 2) as i64;
        for a in 0..sbox.domain_size() {
            for b in 0..sbox.range_size() {
                let hits = (0..sbox.domain_size())
                    .filter(|&x| parity(a as u32 & x as u32) == parity(b as u32 & sbox.apply(x)))
                    .count() as i64;
                lat.set(a, b, hits - half);
            }
        }
        lat
    }

    #[test]
    fn lat_matches_direct_counting() {
        let present = Sbox::new(PRESENT.to_vec()).unwrap();
        assert_eq!(linear_approximation_table(&present), lat_by_counting(&present));

        let mut rng = ChaCha20Rng::from_seed([40u8; 32]);
        for bits in 1..=5 {
            let sbox = Sbox::random_permutation(bits, &mut rng).unwrap();
            assert_eq!(linear_approximation_table(&sbox), lat_by_counting(&sbox));
        }
    }

    #[test]
    fn lat_handles_unequal_widths() {
        let sbox = Sbox::new(vec![0, 5, 3, 7]).unwrap();
        let lat = linear_approximation_table(&sbox);
        assert_eq!((lat.rows(), lat.cols()), (4, 8));
        assert_eq!(lat, lat_by_counting(&sbox));
    }

    #[test]
    fn present_lat_entries_are_bounded_by_four() {
        let present = Sbox::new(PRESENT.to_vec()).unwrap();
        let lat = present.lat();
        assert_eq!(lat.get(0, 0), 8);
        assert_eq!(lat.max_abs_from_row(1), Some(4));
    }

    #[test]
    fn present_ddt_is_differentially_four_uniform() {
        let present = Sbox::new(PRESENT.to_vec()).unwrap();
        let ddt = present.ddt();
        assert_eq!(ddt.get(0, 0), 16);
        assert!(ddt.row(0)[1..].iter().all(|&v| v == 0));
        let max = (1..16).flat_map(|a| ddt.row(a).iter()).max().copied();
        assert_eq!(max, Some(4));
        // Known PRESENT entries.
        assert_eq!(ddt.get(1, 1), 0);
        assert_eq!(ddt.get(1, 3), 4);
        assert_eq!(ddt.get(1, 9), 4);
        assert_eq!(ddt.get(0xf, 0x4), 4);
    }

    #[test]
    fn ddt_rows_sum_to_domain_size() {
        let mut rng = ChaCha20Rng::from_seed([41u8; 32]);
        let sbox = Sbox::random_permutation(6, &mut rng).unwrap();
        let ddt = difference_distribution_table(&sbox);
        for row in ddt.iter_rows() {
            assert_eq!(row.iter().sum::<i64>(), 64);
        }
    }

    #[test]
    fn act_first_row_is_full_and_round_trips() {
        let sbox = Sbox::new(vec![0, 5, 3, 7, 1, 1, 6, 2]).unwrap();
        let act = sbox.act();
        assert!(act.row(0).iter().all(|&v| v == 8));
        assert_eq!(&ddt_from_act(act, sbox.output_bits()), sbox.ddt());
    }

    #[test]
    fn act_matches_direct_autocorrelation() {
        let present = Sbox::new(PRESENT.to_vec()).unwrap();
        let act = present.act();
        for a in 0..16usize {
            for b in 0..16u32 {
                let direct: i64 = (0..16usize)
                    .map(|x| {
                        let diff = present.apply(x) ^ present.apply(x ^ a);
                        if parity(b & diff) == 0 {
                            1
                        } else {
                            -1
                        }
                    })
                    .sum();
                assert_eq!(act.get(a, b as usize), direct);
            }
        }
    }

    #[test]
    fn affine_sbox_has_every_structure() {
        // S(x) = x ⊕ 1: b·(S(x) ⊕ S(x ⊕ a)) = b·a for every pair.
        let sbox = Sbox::new(vec![1, 0, 3, 2]).unwrap();
        let structures = sbox.linear_structures();
        assert_eq!(structures.len(), 9);
        for s in structures {
            assert_eq!(
                u32::from(s.constant),
                parity(s.output_mask & s.input_mask)
            );
        }
    }

    #[test]
    fn structure_constants_match_definition() {
        let sbox = Sbox::new(vec![0, 1, 2, 3, 4, 5, 7, 6]).unwrap();
        let structures = sbox.linear_structures();
        assert!(!structures.is_empty());
        for s in structures {
            for x in 0..8usize {
                let diff = sbox.apply(x) ^ sbox.apply(x ^ s.input_mask as usize);
                assert_eq!(parity(s.output_mask & diff), u32::from(s.constant));
            }
        }
    }

    #[test]
    fn present_linear_structures() {
        let present = Sbox::new(PRESENT.to_vec()).unwrap();
        let found: Vec<(u32, u32, u8)> = present
            .linear_structures()
            .iter()
            .map(|s| (s.output_mask, s.input_mask, s.constant))
            .collect();
        assert_eq!(
            found,
            vec![
                (1, 1, 1),
                (1, 8, 1),
                (1, 9, 0),
                (10, 1, 1),
                (10, 14, 1),
                (10, 15, 0),
                (11, 1, 0),
                (11, 6, 1),
                (11, 7, 1),
            ]
        );
    }

    #[test]
    fn field_inversion_has_no_linear_structures() {
        let inverse = Sbox::new(vec![0, 1, 9, 14, 13, 11, 7, 6, 15, 2, 12, 5, 10, 4, 3, 8]).unwrap();
        assert!(inverse.linear_structures().is_empty());
    }
}
