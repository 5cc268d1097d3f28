// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod hooks;
pub mod output;
pub mod persistence;
pub mod sources;

pub use crate::config::AppConfig;
pub use crate::core::engine::{Generation, HookEngine, RunReport};
pub use crate::core::ranker::{merge_keywords, KeywordRanker, RankedKeyword};
pub use crate::core::rotator::{select_with_state, HashtagRotator};
pub use crate::core::types::{HashtagPool, PickedSet, RotationState, Tier, TierCounts, TierMap};
pub use crate::error::{HookError, Result};
pub use crate::persistence::{JsonFileStateStore, MemoryStateStore, StateStore};
