use hook_core::core::rotator::rotate_pick;
use hook_core::{select_with_state, HashtagPool, RotationState, Tier, TierCounts, TierMap};
use proptest::prelude::*;
use std::collections::HashSet;

const NO_KEYWORDS: [&str; 0] = [];

fn arb_tier_tags() -> impl Strategy<Value = Vec<String>> {
    // Small alphabet so duplicates and keyword hits both show up.
    prop::collection::vec(
        prop::sample::select(vec!["#cafe", "#food", "#빙수", "#seoul", "#cafe_seoul", "#노포", "#brunch"]),
        0..8,
    )
    .prop_map(|tags| tags.into_iter().map(str::to_string).collect())
}

fn arb_pool() -> impl Strategy<Value = HashtagPool> {
    (arb_tier_tags(), arb_tier_tags(), arb_tier_tags(), arb_tier_tags())
        .prop_map(|(b, m, n, l)| TierMap::new(b, m, n, l))
}

fn arb_counts() -> impl Strategy<Value = TierCounts> {
    (0usize..10, 0usize..10, 0usize..10, 0usize..10).prop_map(|(b, m, n, l)| TierMap::new(b, m, n, l))
}

fn arb_state() -> impl Strategy<Value = RotationState> {
    (0usize..20, 0usize..20, 0usize..20, 0usize..20).prop_map(|(b, m, n, l)| TierMap::new(b, m, n, l))
}

fn arb_keywords() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec!["cafe", "CAFE", "빙수", "seoul", "x.y", ""]),
        0..3,
    )
    .prop_map(|kws| kws.into_iter().map(str::to_string).collect())
}

// ── Determinism ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn selection_is_deterministic(
        pool in arb_pool(),
        counts in arb_counts(),
        state in arb_state(),
        keywords in arb_keywords(),
    ) {
        let first = select_with_state(&pool, &counts, &keywords, &state).unwrap();
        let second = select_with_state(&pool, &counts, &keywords, &state).unwrap();
        prop_assert_eq!(first, second);
    }
}

// ── No duplicates, count bound, cursor range ────────────────────────────

proptest! {
    #[test]
    fn tier_output_is_bounded_and_unique(
        pool in arb_pool(),
        counts in arb_counts(),
        state in arb_state(),
        keywords in arb_keywords(),
    ) {
        let (picked, next) = select_with_state(&pool, &counts, &keywords, &state).unwrap();
        for tier in Tier::ALL {
            let out = &picked[tier];
            let unique: HashSet<&String> = out.iter().collect();
            prop_assert_eq!(unique.len(), out.len(), "duplicate in {}", tier);
            prop_assert!(out.len() <= counts[tier].min(pool[tier].len()));
            prop_assert!(out.iter().all(|tag| pool[tier].contains(tag)));
            prop_assert!(
                next[tier] == state[tier] || next[tier] < pool[tier].len(),
                "cursor {} out of range for {}", next[tier], tier
            );
        }
    }
}

// ── Keyword precedence ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn enough_keyword_hits_leave_cursor_alone(
        extra in prop::collection::vec(prop::sample::select(vec!["#food", "#brunch", "#노포"]), 0..5),
        wanted in 1usize..4,
        cursor in 0usize..10,
    ) {
        let mut broad: Vec<String> = (0..wanted).map(|i| format!("#cafe{i}")).collect();
        broad.extend(extra.into_iter().map(str::to_string));
        let pool = TierMap::new(broad, vec![], vec![], vec![]);
        let state = TierMap::new(cursor, 0, 0, 0);

        let (picked, next) =
            select_with_state(&pool, &TierMap::new(wanted, 0, 0, 0), &["cafe"], &state).unwrap();
        prop_assert_eq!(picked.broad.len(), wanted);
        prop_assert!(picked.broad.iter().all(|tag| tag.starts_with("#cafe")));
        prop_assert_eq!(next.broad, cursor);
    }
}

// ── Cycling ─────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rotation_visits_every_tag_before_repeating(
        size in 1usize..12,
        k in 1usize..6,
        start in 0usize..12,
    ) {
        let k = k.min(size);
        let pool: Vec<String> = (0..size).map(|i| format!("#t{i}")).collect();
        let mut cursor = start;
        let mut visited = Vec::new();
        for _ in 0..size.div_ceil(k) {
            let (out, next) = rotate_pick(&pool, cursor, k);
            visited.extend(out);
            cursor = next;
        }

        let expected: Vec<String> = (0..size).map(|i| pool[(start + i) % size].clone()).collect();
        prop_assert_eq!(&visited[..size], &expected[..]);
    }
}

#[test]
fn empty_keyword_list_is_pure_round_robin() {
    let pool: HashtagPool = TierMap::new(
        vec!["#t1".into(), "#t2".into(), "#t3".into(), "#t4".into()],
        vec![],
        vec![],
        vec![],
    );
    let (picked, next) =
        select_with_state(&pool, &TierMap::new(2, 0, 0, 0), &NO_KEYWORDS, &RotationState::default()).unwrap();
    assert_eq!(picked.broad, vec!["#t1", "#t2"]);
    assert_eq!(next.broad, 2);
}
