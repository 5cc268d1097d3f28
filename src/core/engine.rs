use crate::config::AppConfig;
use crate::core::types::{PickedSet, ScoredKeyword};
use crate::core::rotator::HashtagRotator;
use crate::error::Result;
use crate::hooks::HookGenerator;
use crate::output::{write_reports, ReportPaths};
use crate::persistence::{JsonFileStateStore, StateStore};
use crate::sources::{load_hashtag_pool, load_internal_keywords, load_stopwords, trend_source_by_name, TrendSource};
use tracing::{debug, info};

/// Everything one run produces before it is written out.
#[derive(Debug, Clone)]
pub struct Generation {
    pub keywords: Vec<String>,
    pub hooks: Vec<String>,
    pub picked: PickedSet,
}

impl Generation {
    pub fn hashtags(&self) -> Vec<String> {
        self.picked.flatten()
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub generation: Generation,
    pub reports: ReportPaths,
}

// The daily pipeline: trend sources and internal keywords feed the ranker,
// ranked keywords drive both the hook templates and the hashtag rotator.
pub struct HookEngine<S> {
    config: AppConfig,
    sources: Vec<Box<dyn TrendSource>>,
    rotator: HashtagRotator<S>,
}

impl HookEngine<JsonFileStateStore> {
    /// Engine persisting rotation state at `config.paths.state`.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let store = JsonFileStateStore::new(config.paths.state.clone());
        Self::with_store(config, store)
    }
}

impl<S: StateStore> HookEngine<S> {
    pub fn with_store(config: AppConfig, store: S) -> Result<Self> {
        let sources = config
            .sources
            .iter()
            .map(|name| trend_source_by_name(name))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            config,
            sources,
            rotator: HashtagRotator::new(store),
        })
    }

    /// Replaces the configured trend sources.
    pub fn with_sources(mut self, sources: Vec<Box<dyn TrendSource>>) -> Self {
        self.sources = sources;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        self.rotator.store()
    }

    /// Ranked keyword shortlist from all sources.
    pub fn collect_keywords(&self) -> Result<Vec<String>> {
        let external: Vec<ScoredKeyword> = self
            .sources
            .iter()
            .flat_map(|source| {
                let fetched = source.fetch();
                debug!(source = source.name(), count = fetched.len(), "fetched trend keywords");
                fetched
            })
            .collect();
        let internal = load_internal_keywords(&self.config.paths.internal_keywords)?;
        Ok(self.config.ranker.merge(&internal, &external))
    }

    /// Keywords, hooks and a hashtag selection. Advances the rotation state.
    pub fn generate(&mut self) -> Result<Generation> {
        let paths = &self.config.paths;
        // Load the pool first so a missing source fails before anything else runs.
        let pool = load_hashtag_pool(&paths.hashtags)?;
        let stopwords = load_stopwords(&paths.stopwords)?;

        let keywords = self.collect_keywords()?;
        let hooks = HookGenerator::new(self.config.hooks, stopwords).generate(&keywords);
        let counts = self.config.counts.tier_counts();
        let picked = self.rotator.select(&pool, &counts, &keywords)?;

        Ok(Generation {
            keywords,
            hooks,
            picked,
        })
    }

    /// `generate`, then write the CSV and Markdown reports for `date`.
    pub fn run(&mut self, date: &str) -> Result<RunReport> {
        let generation = self.generate()?;
        let reports = write_reports(
            &self.config.paths.output_dir,
            date,
            &generation.hooks,
            &generation.hashtags(),
        )?;
        info!(
            date,
            hooks = generation.hooks.len(),
            hashtags = generation.picked.total_len(),
            "run complete"
        );
        Ok(RunReport { generation, reports })
    }
}
