// File: src/sources.rs
//! Input side: the hashtag pool, scored keyword lists, stopwords and the
//! trend-source capability.

use crate::core::types::{HashtagPool, ScoredKeyword, Tier};
use crate::error::{HookError, Result};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct HashtagRow {
    #[serde(default)]
    tag: String,
    #[serde(default)]
    tier: String,
}

#[derive(Debug, Deserialize)]
struct KeywordRow {
    #[serde(default)]
    keyword: String,
    #[serde(default)]
    score: String,
}

fn csv_reader(file: File) -> csv::Reader<File> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file)
}

/// Loads `tag,tier` rows into per-tier pools, keeping file order.
///
/// Rows with an unknown tier, an empty tag or a tag without a leading `#` are
/// dropped. A missing file is fatal.
pub fn load_hashtag_pool(path: &Path) -> Result<HashtagPool> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(HookError::MissingHashtagSource {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(HookError::io(path, e)),
    };

    let mut pool = HashtagPool::default();
    let mut dropped = 0usize;
    for row in csv_reader(file).deserialize::<HashtagRow>() {
        let row = match row {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(HookError::csv(path, e)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable hashtag row");
                dropped += 1;
                continue;
            }
        };
        match Tier::parse(&row.tier) {
            Some(tier) if row.tag.starts_with('#') && row.tag.len() > 1 => pool[tier].push(row.tag),
            _ => dropped += 1,
        }
    }

    debug!(
        path = %path.display(),
        loaded = pool.total_len(),
        dropped,
        "loaded hashtag pool"
    );
    Ok(pool)
}

/// Loads `keyword,score` rows. A missing file yields an empty list; rows whose
/// score does not parse are skipped.
pub fn load_internal_keywords(path: &Path) -> Result<Vec<ScoredKeyword>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no internal keyword file");
            return Ok(Vec::new());
        }
        Err(e) => return Err(HookError::io(path, e)),
    };

    let mut rows = Vec::new();
    for row in csv_reader(file).deserialize::<KeywordRow>() {
        match row {
            Ok(row) => rows.push((row.keyword, row.score)),
            Err(e) if e.is_io_error() => return Err(HookError::csv(path, e)),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable keyword row"),
        }
    }
    Ok(parse_scored_records(rows))
}

/// Tolerant parse of `(keyword, raw score)` pairs from noisy providers.
/// Blank keywords and non-numeric or non-finite scores are skipped.
pub fn parse_scored_records<I, K, V>(records: I) -> Vec<ScoredKeyword>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    records
        .into_iter()
        .filter_map(|(keyword, raw)| {
            let keyword = keyword.into();
            let score = raw.as_ref().trim().parse::<f64>().ok().filter(|s| s.is_finite());
            match score {
                Some(score) if !keyword.trim().is_empty() => Some((keyword, score)),
                _ => {
                    debug!(keyword = %keyword, raw = raw.as_ref(), "skipping malformed keyword record");
                    None
                }
            }
        })
        .collect()
}

/// One stopword per line; blank lines ignored. Missing file means no stopwords.
pub fn load_stopwords(path: &Path) -> Result<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(HookError::io(path, e)),
    }
}

/// A provider of externally scored keywords.
pub trait TrendSource {
    fn name(&self) -> &str;
    fn fetch(&self) -> Vec<ScoredKeyword>;
}

/// Fixed keyword list. The default for every named source.
#[derive(Debug, Clone)]
pub struct StaticTrendSource {
    name: String,
    entries: Vec<ScoredKeyword>,
}

impl StaticTrendSource {
    pub fn new(name: impl Into<String>, entries: Vec<ScoredKeyword>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn google_trends() -> Self {
        Self::from_pairs(
            "google_trends",
            &[
                ("빙수", 0.6),
                ("카페", 0.55),
                ("여름디저트", 0.5),
                ("서울맛집", 0.45),
                ("노포", 0.4),
            ],
        )
    }

    pub fn naver_blog() -> Self {
        Self::from_pairs(
            "naver_blog",
            &[
                ("숨은맛집", 0.4),
                ("가성비맛집", 0.35),
                ("맛집팁", 0.3),
                ("연남동카페", 0.32),
                ("성수동맛집", 0.28),
            ],
        )
    }

    fn from_pairs(name: &str, pairs: &[(&str, f64)]) -> Self {
        Self::new(
            name,
            pairs.iter().map(|(k, s)| (k.to_string(), *s)).collect(),
        )
    }
}

impl TrendSource for StaticTrendSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Vec<ScoredKeyword> {
        self.entries.clone()
    }
}

/// Resolves a configured source name.
pub fn trend_source_by_name(name: &str) -> Result<Box<dyn TrendSource>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "google_trends" => Ok(Box::new(StaticTrendSource::google_trends())),
        "naver_blog" => Ok(Box::new(StaticTrendSource::naver_blog())),
        _ => Err(HookError::UnknownSource(name.to_string())),
    }
}
