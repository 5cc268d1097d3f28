// src/core/ranker.rs
use crate::core::types::ScoredKeyword;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// A keyword with its aggregated, weighted score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedKeyword {
    pub keyword: String,
    pub score: f64,
}

/// Merges internal and external keyword lists into one ranked shortlist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordRanker {
    pub weight_internal: f64,
    pub weight_external: f64,
    pub top_n: usize,
}

impl Default for KeywordRanker {
    fn default() -> Self {
        Self {
            weight_internal: 1.5,
            weight_external: 1.3,
            top_n: 20,
        }
    }
}

impl KeywordRanker {
    pub fn new(weight_internal: f64, weight_external: f64, top_n: usize) -> Self {
        Self {
            weight_internal,
            weight_external,
            top_n,
        }
    }

    /// Full ranking with scores, highest first.
    ///
    /// External entries are accumulated before internal ones. Equal scores keep
    /// the order in which their keyword was first seen (the sort is stable), so
    /// an external keyword wins a tie against one that only appears internally.
    /// Non-finite scores are skipped.
    pub fn rank(&self, internal: &[ScoredKeyword], external: &[ScoredKeyword]) -> Vec<RankedKeyword> {
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut ranked: Vec<RankedKeyword> = Vec::new();

        let contributions = external
            .iter()
            .map(|(keyword, score)| (keyword, *score, self.weight_external))
            .chain(
                internal
                    .iter()
                    .map(|(keyword, score)| (keyword, *score, self.weight_internal)),
            );

        for (keyword, score, weight) in contributions {
            if !score.is_finite() {
                warn!(keyword = %keyword, score, "skipping keyword with non-finite score");
                continue;
            }
            let slot = *slots.entry(keyword.as_str()).or_insert_with(|| {
                ranked.push(RankedKeyword {
                    keyword: keyword.clone(),
                    score: 0.0,
                });
                ranked.len() - 1
            });
            ranked[slot].score += score * weight;
        }

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        debug!(
            distinct = ranked.len(),
            internal = internal.len(),
            external = external.len(),
            "ranked keywords"
        );
        ranked
    }

    /// Top `top_n` keywords, scores dropped.
    pub fn merge(&self, internal: &[ScoredKeyword], external: &[ScoredKeyword]) -> Vec<String> {
        self.rank(internal, external)
            .into_iter()
            .take(self.top_n)
            .map(|ranked| ranked.keyword)
            .collect()
    }
}

/// One-shot form of [`KeywordRanker::merge`].
pub fn merge_keywords(
    internal: &[ScoredKeyword],
    external: &[ScoredKeyword],
    weight_internal: f64,
    weight_external: f64,
    top_n: usize,
) -> Vec<String> {
    KeywordRanker::new(weight_internal, weight_external, top_n).merge(internal, external)
}
