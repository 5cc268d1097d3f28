// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// A hashtag token. Loaded tags always start with `#`.
pub type Hashtag = String;

/// A keyword paired with its raw (unweighted) score.
pub type ScoredKeyword = (String, f64);

/// Popularity/specificity bucket of a hashtag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Broad,
    Mid,
    Niche,
    Local,
}

impl Tier {
    /// Fixed processing order. Also the order of `flatten`.
    pub const ALL: [Tier; 4] = [Tier::Broad, Tier::Mid, Tier::Niche, Tier::Local];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Broad => "broad",
            Tier::Mid => "mid",
            Tier::Niche => "niche",
            Tier::Local => "local",
        }
    }

    /// Case-insensitive, whitespace-tolerant lookup. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Tier> {
        let name = name.trim();
        Tier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per tier. Pools, counts, cursors and picks all share this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierMap<T> {
    pub broad: T,
    pub mid: T,
    pub niche: T,
    pub local: T,
}

impl<T> TierMap<T> {
    pub fn new(broad: T, mid: T, niche: T, local: T) -> Self {
        Self { broad, mid, niche, local }
    }

    pub fn from_fn(mut f: impl FnMut(Tier) -> T) -> Self {
        Self {
            broad: f(Tier::Broad),
            mid: f(Tier::Mid),
            niche: f(Tier::Niche),
            local: f(Tier::Local),
        }
    }

    /// Iterates in `Tier::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &T)> {
        Tier::ALL.into_iter().map(move |tier| (tier, &self[tier]))
    }
}

impl<T> Index<Tier> for TierMap<T> {
    type Output = T;

    fn index(&self, tier: Tier) -> &T {
        match tier {
            Tier::Broad => &self.broad,
            Tier::Mid => &self.mid,
            Tier::Niche => &self.niche,
            Tier::Local => &self.local,
        }
    }
}

impl<T> IndexMut<Tier> for TierMap<T> {
    fn index_mut(&mut self, tier: Tier) -> &mut T {
        match tier {
            Tier::Broad => &mut self.broad,
            Tier::Mid => &mut self.mid,
            Tier::Niche => &mut self.niche,
            Tier::Local => &mut self.local,
        }
    }
}

impl<T: Clone> TierMap<Vec<T>> {
    /// `broad + mid + niche + local`, for presentation.
    pub fn flatten(&self) -> Vec<T> {
        self.iter().flat_map(|(_, items)| items.iter().cloned()).collect()
    }

    pub fn total_len(&self) -> usize {
        self.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }
}

/// Ordered candidate hashtags per tier. Order defines the rotation sequence.
pub type HashtagPool = TierMap<Vec<Hashtag>>;

/// Requested number of hashtags per tier.
pub type TierCounts = TierMap<usize>;

/// Per-tier rotation cursor, persisted between runs.
pub type RotationState = TierMap<usize>;

/// Selected hashtags per tier: keyword matches first, rotation fill second.
pub type PickedSet = TierMap<Vec<Hashtag>>;
