// src/core/mod.rs

pub mod engine;
pub mod matcher;
pub mod ranker;
pub mod rotator;
pub mod types;
