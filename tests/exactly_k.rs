use gemhunter::cnf::cardinality::{at_least_k, at_most_k, exactly_k};
use gemhunter::cnf::cnf::Cnf;
use gemhunter::error::EncodingError;
use proptest::prelude::*;

fn assignment_from_bits(vars: &[u32], bits: u32) -> Vec<Option<bool>> {
    let top = vars.iter().copied().max().unwrap_or(0);
    let mut a = vec![None; top as usize + 1];
    for (i, &v) in vars.iter().enumerate() {
        a[v as usize] = Some((bits >> i) & 1 == 1);
    }
    a
}

fn check_exactly(vars: &[u32], k: usize) {
    let mut cnf = Cnf::new(vars.iter().copied().max().unwrap_or(0));
    exactly_k(&mut cnf, vars, k).expect("encode");
    let n = vars.len();
    for bits in 0..(1u32 << n) {
        let a = assignment_from_bits(vars, bits);
        let trues = bits.count_ones() as usize;
        assert_eq!(
            cnf.is_satisfied_by(&a),
            trues == k,
            "n={n} k={k} bits={bits:#b}"
        );
    }
}

#[test]
fn exactly_k_is_exact_for_all_small_n() {
    for n in 0..=8usize {
        let vars = (1..=n as u32).collect::<Vec<_>>();
        for k in 0..=n {
            check_exactly(&vars, k);
        }
    }
}

#[test]
fn at_least_and_at_most_are_one_sided() {
    let vars = [1, 2, 3, 4];
    let mut least = Cnf::new(4);
    at_least_k(&mut least, &vars, 2).expect("encode");
    let mut most = Cnf::new(4);
    at_most_k(&mut most, &vars, 2);

    for bits in 0..16u32 {
        let a = assignment_from_bits(&vars, bits);
        let trues = bits.count_ones();
        assert_eq!(least.is_satisfied_by(&a), trues >= 2);
        assert_eq!(most.is_satisfied_by(&a), trues <= 2);
    }
}

#[test]
fn zero_neighbors_zero_clue_adds_nothing() {
    let mut cnf = Cnf::new(0);
    exactly_k(&mut cnf, &[], 0).expect("encode");
    assert!(cnf.is_empty());
}

#[test]
fn k_above_n_is_an_encoding_error() {
    let mut cnf = Cnf::new(2);
    let err = exactly_k(&mut cnf, &[1, 2], 3).expect_err("k > n");
    assert_eq!(err, EncodingError::InvalidCardinality { k: 3, n: 2 });
    assert!(err.to_string().contains("exactly 3 of 2"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn exactly_k_holds_for_scattered_ids(
        ids in prop::collection::btree_set(1u32..200, 0..=7),
        k_seed in 0usize..8,
    ) {
        let vars = ids.into_iter().collect::<Vec<_>>();
        let k = k_seed % (vars.len() + 1);
        check_exactly(&vars, k);
    }
}
