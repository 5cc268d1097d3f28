use anyhow::Context;
use clap::Parser;
use crossterm::style::Stylize;
use hook_core::{AppConfig, HookEngine, RunReport, Tier};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "bingsooni.toml";

/// Daily hook captions and a rotating hashtag set.
#[derive(Debug, Parser)]
#[command(name = "hook_engine", version)]
struct Args {
    /// TOML config file. Defaults to ./bingsooni.toml when present.
    #[arg(long, env = "BINGSOONI_CONFIG")]
    config: Option<PathBuf>,

    /// Report date used in output file names (YYYYMMDD). Defaults to today.
    #[arg(long)]
    date: Option<String>,

    #[arg(long)]
    broad: Option<usize>,
    #[arg(long)]
    mid: Option<usize>,
    #[arg(long)]
    niche: Option<usize>,
    #[arg(long)]
    local: Option<usize>,

    /// Hashtag pool CSV (`tag,tier`).
    #[arg(long, env = "BINGSOONI_HASHTAGS")]
    hashtags: Option<PathBuf>,

    /// Rotation state file.
    #[arg(long, env = "BINGSOONI_STATE")]
    state: Option<PathBuf>,

    #[arg(long, env = "BINGSOONI_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Debug-level logging unless RUST_LOG is set.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn load_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::load_or_default(&PathBuf::from(DEFAULT_CONFIG_PATH))?,
        };

        let counts = &mut config.counts;
        counts.broad = self.broad.unwrap_or(counts.broad);
        counts.mid = self.mid.unwrap_or(counts.mid);
        counts.niche = self.niche.unwrap_or(counts.niche);
        counts.local = self.local.unwrap_or(counts.local);

        let paths = &mut config.paths;
        if let Some(hashtags) = &self.hashtags {
            paths.hashtags = hashtags.clone();
        }
        if let Some(state) = &self.state {
            paths.state = state.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            paths.output_dir = output_dir.clone();
        }
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.load_config().context("loading configuration")?;
    let date = args
        .date
        .clone()
        .unwrap_or_else(|| chrono::Local::now().format("%Y%m%d").to_string());

    let mut engine = HookEngine::from_config(config).context("setting up hook engine")?;
    let report = engine.run(&date).context("generating hooks and hashtags")?;
    print_summary(&report);
    Ok(())
}

fn print_summary(report: &RunReport) {
    let generation = &report.generation;
    println!(
        "{} {} hooks and {} hashtags",
        "Generated".green().bold(),
        generation.hooks.len(),
        generation.picked.total_len()
    );
    println!("  keywords: {}", generation.keywords.join(", ").dark_grey());
    for tier in Tier::ALL {
        let tags = &generation.picked[tier];
        println!("  {} {}", format!("{:<6}", tier.as_str()).cyan(), tags.join(" "));
    }
    println!(
        "  {} {}",
        "→".bold(),
        format!(
            "{} / {}",
            report.reports.csv.display(),
            report.reports.markdown.display()
        )
        .underlined()
    );
}
