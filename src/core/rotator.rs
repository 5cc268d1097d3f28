// src/core/rotator.rs
use crate::core::matcher::KeywordMatcher;
use crate::core::types::{Hashtag, HashtagPool, PickedSet, RotationState, Tier, TierCounts};
use crate::error::Result;
use crate::persistence::StateStore;
use std::collections::HashSet;
use tracing::{debug, info};

/// Tier-balanced hashtag selection backed by a persisted rotation cursor.
///
/// `select` takes `&mut self`, so a rotator is the single writer of its store.
/// Share one across threads behind a `Mutex`.
pub struct HashtagRotator<S> {
    store: S,
}

impl<S: StateStore> HashtagRotator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// One state read, one selection, one state write.
    pub fn select<K: AsRef<str>>(
        &mut self,
        pool: &HashtagPool,
        counts: &TierCounts,
        keywords: &[K],
    ) -> Result<PickedSet> {
        let state = self.store.load()?;
        let (picked, next_state) = select_with_state(pool, counts, keywords, &state)?;
        self.store.save(&next_state)?;
        info!(
            picked = picked.total_len(),
            keywords = keywords.len(),
            "selected hashtag set"
        );
        Ok(picked)
    }
}

/// Pure selection: returns the picked set and the cursors to persist.
pub fn select_with_state<K: AsRef<str>>(
    pool: &HashtagPool,
    counts: &TierCounts,
    keywords: &[K],
    state: &RotationState,
) -> Result<(PickedSet, RotationState)> {
    let matcher = KeywordMatcher::new(keywords)?;
    let mut picked = PickedSet::default();
    let mut next_state = state.clone();

    for tier in Tier::ALL {
        let tags = &pool[tier];
        let wanted = counts[tier];

        let hits = pick_for_keywords(tags, wanted, &matcher);
        let remaining = wanted.saturating_sub(hits.len());
        let leftover: Vec<&str> = tags
            .iter()
            .map(String::as_str)
            .filter(|tag| !hits.iter().any(|hit| hit.as_str() == *tag))
            .collect();
        let (fill, cursor) = rotate_pick(&leftover, state[tier], remaining);

        debug!(
            %tier,
            wanted,
            keyword_hits = hits.len(),
            rotated = fill.len(),
            cursor_before = state[tier],
            cursor_after = cursor,
            "tier selection"
        );

        next_state[tier] = cursor;
        let tier_pick = &mut picked[tier];
        tier_pick.extend(hits);
        tier_pick.extend(fill);
    }

    Ok((picked, next_state))
}

/// Tags matching any keyword, in pool order, deduplicated, at most `wanted`.
pub fn pick_for_keywords(tags: &[Hashtag], wanted: usize, matcher: &KeywordMatcher) -> Vec<Hashtag> {
    if matcher.is_empty() || tags.is_empty() {
        return Vec::new();
    }
    let mut seen = HashSet::new();
    tags.iter()
        .filter(|tag| matcher.is_match(tag))
        .filter(|tag| seen.insert(*tag))
        .take(wanted)
        .cloned()
        .collect()
}

/// Round-robin walk over `pool` starting at `cursor mod len`.
///
/// Visits each position at most once, skipping repeats, until `count` tags are
/// collected. Returns the tags and the index after the last visited position.
/// An empty pool or a zero count leaves the cursor untouched.
pub fn rotate_pick<T: AsRef<str>>(pool: &[T], cursor: usize, count: usize) -> (Vec<Hashtag>, usize) {
    if pool.is_empty() || count == 0 {
        return (Vec::new(), cursor);
    }

    let len = pool.len();
    let start = cursor % len;
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(count.min(len));
    let mut steps = 0;

    while steps < len && out.len() < count {
        let tag = pool[(start + steps) % len].as_ref();
        if seen.insert(tag) {
            out.push(tag.to_string());
        }
        steps += 1;
    }

    (out, (start + steps) % len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TierMap;
    use crate::persistence::MemoryStateStore;

    fn tags(items: &[&str]) -> Vec<Hashtag> {
        items.iter().map(|t| t.to_string()).collect()
    }

    fn broad_only(items: &[&str]) -> HashtagPool {
        TierMap::new(tags(items), vec![], vec![], vec![])
    }

    fn broad_count(n: usize) -> TierCounts {
        TierMap::new(n, 0, 0, 0)
    }

    const NO_KEYWORDS: [&str; 0] = [];

    #[test]
    fn rotation_wraps_and_resumes() {
        let pool = broad_only(&["#t1", "#t2", "#t3", "#t4"]);

        let (picked, state) =
            select_with_state(&pool, &broad_count(2), &NO_KEYWORDS, &RotationState::default()).unwrap();
        assert_eq!(picked.broad, tags(&["#t1", "#t2"]));
        assert_eq!(state.broad, 2);

        let (picked, state) = select_with_state(&pool, &broad_count(3), &NO_KEYWORDS, &state).unwrap();
        assert_eq!(picked.broad, tags(&["#t3", "#t4", "#t1"]));
        assert_eq!(state.broad, 1);
    }

    #[test]
    fn keyword_hits_fill_the_tier_without_rotating() {
        let pool = broad_only(&["#cafe_seoul", "#food", "#cafe_hongdae"]);
        let start = TierMap::new(1, 0, 0, 0);

        let (picked, state) = select_with_state(&pool, &broad_count(2), &["cafe"], &start).unwrap();
        assert_eq!(picked.broad, tags(&["#cafe_seoul", "#cafe_hongdae"]));
        assert_eq!(state.broad, 1);
    }

    #[test]
    fn keyword_hits_come_before_rotation_fill() {
        let pool = broad_only(&["#a", "#b", "#cafe", "#c"]);

        let (picked, state) =
            select_with_state(&pool, &broad_count(3), &["CAFE"], &RotationState::default()).unwrap();
        assert_eq!(picked.broad, tags(&["#cafe", "#a", "#b"]));
        // leftover pool is [#a, #b, #c]; two steps taken
        assert_eq!(state.broad, 2);
    }

    #[test]
    fn request_larger_than_pool_returns_whole_pool() {
        let pool = broad_only(&["#x", "#y", "#z"]);
        let start = TierMap::new(2, 0, 0, 0);

        let (picked, state) = select_with_state(&pool, &broad_count(10), &NO_KEYWORDS, &start).unwrap();
        assert_eq!(picked.broad, tags(&["#z", "#x", "#y"]));
        assert_eq!(state.broad, 2);
    }

    #[test]
    fn duplicate_pool_entries_are_not_repeated() {
        let pool = broad_only(&["#dup", "#dup", "#one"]);

        let (picked, _) =
            select_with_state(&pool, &broad_count(3), &NO_KEYWORDS, &RotationState::default()).unwrap();
        assert_eq!(picked.broad, tags(&["#dup", "#one"]));
    }

    #[test]
    fn empty_tiers_keep_their_cursor() {
        let pool = HashtagPool::default();
        let start = TierMap::new(3, 1, 4, 1);

        let (picked, state) =
            select_with_state(&pool, &TierMap::new(7, 7, 6, 5), &["cafe"], &start).unwrap();
        assert!(picked.is_empty());
        assert_eq!(state, start);
    }

    #[test]
    fn all_keyword_matched_pool_leaves_cursor() {
        let pool = broad_only(&["#cafe1", "#cafe2"]);
        let start = TierMap::new(1, 0, 0, 0);

        let (picked, state) = select_with_state(&pool, &broad_count(5), &["cafe"], &start).unwrap();
        assert_eq!(picked.broad, tags(&["#cafe1", "#cafe2"]));
        assert_eq!(state.broad, 1);
    }

    #[test]
    fn stale_cursor_is_reduced_modulo_pool() {
        let (out, next) = rotate_pick(&["#a", "#b", "#c"], 7, 1);
        assert_eq!(out, vec!["#b"]);
        assert_eq!(next, 2);
    }

    #[test]
    fn tiers_rotate_independently() {
        let pool: HashtagPool = TierMap::new(
            tags(&["#b1", "#b2"]),
            tags(&["#m1", "#m2", "#m3"]),
            tags(&["#n1"]),
            tags(&["#l1", "#l2"]),
        );
        let counts = TierMap::new(1, 2, 1, 0);

        let (picked, state) =
            select_with_state(&pool, &counts, &NO_KEYWORDS, &RotationState::default()).unwrap();
        assert_eq!(picked.flatten(), tags(&["#b1", "#m1", "#m2", "#n1"]));
        assert_eq!(state, TierMap::new(1, 2, 0, 0));
    }

    #[test]
    fn rotator_persists_once_per_select() {
        let pool = broad_only(&["#t1", "#t2", "#t3", "#t4"]);
        let mut rotator = HashtagRotator::new(MemoryStateStore::default());

        let first = rotator.select(&pool, &broad_count(2), &NO_KEYWORDS).unwrap();
        let second = rotator.select(&pool, &broad_count(3), &NO_KEYWORDS).unwrap();

        assert_eq!(first.broad, tags(&["#t1", "#t2"]));
        assert_eq!(second.broad, tags(&["#t3", "#t4", "#t1"]));
        assert_eq!(rotator.store().saves(), 2);
        assert_eq!(rotator.store().snapshot().broad, 1);
    }
}
