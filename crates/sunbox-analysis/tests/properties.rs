use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sunbox_analysis::{ddt_from_act, Sbox, SboxError, Table};
use sunbox_core::hadamard;

const GF16_INVERSE: [u32; 16] = [0, 1, 9, 14, 13, 11, 7, 6, 15, 2, 12, 5, 10, 4, 3, 8];

fn random_function(rng: &mut ChaCha20Rng, m: u32, n: u32) -> Sbox {
    let table = (0..1u32 << m).map(|_| rng.gen_range(0..1u32 << n)).collect();
    Sbox::new(table).unwrap()
}

#[test]
fn lat_bounds_hold_for_random_functions() {
    let mut rng = ChaCha20Rng::from_seed([70u8; 32]);
    for _ in 0..24 {
        let m = rng.gen_range(1..=6);
        let n = rng.gen_range(1..=5);
        let s = random_function(&mut rng, m, n);
        let lat = s.lat();
        let full = 1i64 << s.input_bits();
        assert_eq!(lat.get(0, 0), full / 2);
        assert!(lat.entries().all(|(_, _, v)| v.abs() <= full));
    }
}

#[test]
fn ddt_rows_sum_to_domain_size() {
    let mut rng = ChaCha20Rng::from_seed([71u8; 32]);
    for _ in 0..24 {
        let m = rng.gen_range(0..=6);
        let n = rng.gen_range(0..=5);
        let s = random_function(&mut rng, m, n);
        let ddt = s.ddt();
        let full = 1i64 << s.input_bits();
        assert_eq!(ddt.get(0, 0), full);
        for row in ddt.iter_rows() {
            assert_eq!(row.iter().sum::<i64>(), full);
        }
    }
}

#[test]
fn act_and_ddt_are_hadamard_duals() {
    let mut rng = ChaCha20Rng::from_seed([72u8; 32]);
    for _ in 0..16 {
        let m = rng.gen_range(1..=5);
        let n = rng.gen_range(1..=5);
        let s = random_function(&mut rng, m, n);
        let h = hadamard(s.output_bits());
        assert_eq!(&s.ddt().mul(&h), s.act());
        assert_eq!(&ddt_from_act(s.act(), s.output_bits()), s.ddt());
    }
}

#[test]
fn identity_and_constant_xor_equivalences() {
    let identity = Sbox::new(vec![0, 1, 2, 3]).unwrap();
    assert!(identity.is_linear());
    assert_eq!(
        identity.matrix_equivalent().unwrap().bit_rows(),
        vec![vec![1, 0], vec![0, 1]]
    );

    let shifted = Sbox::new(vec![1, 0, 3, 2]).unwrap();
    assert!(!shifted.is_linear());
    assert!(shifted.is_affine());
    let affine = shifted.affine_equivalent().unwrap();
    assert_eq!(affine.lin.bit_rows(), vec![vec![1, 0], vec![0, 1]]);
    assert_eq!(affine.offset_rows(), vec![vec![1], vec![1]]);
}

#[test]
fn nonlinear_bijection_probabilities_and_structures() {
    let s = Sbox::new(GF16_INVERSE.to_vec()).unwrap();
    assert!(s.is_bijective());
    assert!(!s.is_affine());

    let linear = s.maximal_linear_bias();
    assert!((0.5..=1.0).contains(&linear.probability));
    assert_eq!(linear.probability, 0.75);

    let differential = s.maximal_differential_bias();
    assert!(differential.probability > 0.0 && differential.probability <= 1.0);
    assert_eq!(differential.probability, 0.25);

    assert!(s.linear_structures().is_empty());
    assert_eq!(s.biryukov_perrin_metric(), 60);
}

#[test]
fn bijectivity_edge_cases() {
    assert!(!Sbox::new(vec![0, 1, 2, 3, 4, 5, 6, 8]).unwrap().is_bijective());
    assert!(!Sbox::new(vec![0, 1, 2, 2]).unwrap().is_bijective());
    assert!(!Sbox::new(vec![1, 2, 3, 3]).unwrap().is_bijective());
    assert!(Sbox::new(GF16_INVERSE.to_vec()).unwrap().is_bijective());
}

#[test]
fn construction_errors_are_distinct() {
    assert_eq!(Sbox::from_signed(&[]).unwrap_err(), SboxError::Empty);
    assert!(matches!(
        Sbox::from_signed(&[1, -1]).unwrap_err(),
        SboxError::NegativeValue { index: 1, value: -1 }
    ));
}

#[test]
fn failed_construction_leaves_other_instances_intact() {
    let s = Sbox::new(GF16_INVERSE.to_vec()).unwrap();
    let before: Table = s.ddt().clone();
    assert!(Sbox::from_signed(&[0, -5]).is_err());
    assert_eq!(s.ddt(), &before);
}
