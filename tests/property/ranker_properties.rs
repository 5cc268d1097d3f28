use hook_core::KeywordRanker;
use proptest::prelude::*;
use std::collections::HashSet;

fn arb_scored() -> impl Strategy<Value = Vec<(String, f64)>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["빙수", "카페", "노포", "brunch", "Brunch", "dessert"]),
            0.0f64..1.0,
        ),
        0..12,
    )
    .prop_map(|pairs| pairs.into_iter().map(|(k, s)| (k.to_string(), s)).collect())
}

proptest! {
    #[test]
    fn scores_are_descending(
        internal in arb_scored(),
        external in arb_scored(),
        w_internal in 0.0f64..3.0,
        w_external in 0.0f64..3.0,
    ) {
        let ranked = KeywordRanker::new(w_internal, w_external, 20).rank(&internal, &external);
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score, "{:?} before {:?}", pair[0], pair[1]);
        }
    }
}

proptest! {
    #[test]
    fn merge_is_unique_and_bounded(
        internal in arb_scored(),
        external in arb_scored(),
        top_n in 0usize..8,
    ) {
        let merged = KeywordRanker::new(1.5, 1.3, top_n).merge(&internal, &external);
        let unique: HashSet<&String> = merged.iter().collect();
        prop_assert_eq!(unique.len(), merged.len());
        prop_assert!(merged.len() <= top_n);

        let distinct: HashSet<&String> = internal.iter().chain(external.iter()).map(|(k, _)| k).collect();
        prop_assert_eq!(merged.len(), top_n.min(distinct.len()));
    }
}

proptest! {
    #[test]
    fn aggregate_is_weighted_sum(
        internal in arb_scored(),
        external in arb_scored(),
    ) {
        let ranked = KeywordRanker::new(1.5, 1.3, 20).rank(&internal, &external);
        for entry in &ranked {
            let expected: f64 = external.iter().filter(|(k, _)| *k == entry.keyword).map(|(_, s)| s * 1.3).sum::<f64>()
                + internal.iter().filter(|(k, _)| *k == entry.keyword).map(|(_, s)| s * 1.5).sum::<f64>();
            prop_assert!((entry.score - expected).abs() < 1e-9);
        }
    }
}

#[test]
fn equal_weights_example() {
    let ranked = KeywordRanker::new(1.5, 1.3, 20).rank(&[("a".to_string(), 1.0)], &[("a".to_string(), 1.0)]);
    assert!((ranked[0].score - 2.8).abs() < 1e-12);
}
