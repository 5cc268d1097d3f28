// File: src/output.rs
use crate::error::{HookError, Result};
use crate::hooks::rank_hashtags_for_hook;
use crate::persistence::write_atomically;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

const MARKDOWN_EXCERPT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub csv: PathBuf,
    pub markdown: PathBuf,
}

/// Writes `{date}_hooks.csv` and `{date}_hooks.md` under `dir`.
pub fn write_reports(dir: &Path, date: &str, hooks: &[String], hashtags: &[String]) -> Result<ReportPaths> {
    let paths = ReportPaths {
        csv: dir.join(format!("{date}_hooks.csv")),
        markdown: dir.join(format!("{date}_hooks.md")),
    };

    let per_hook: Vec<Vec<String>> = hooks
        .iter()
        .map(|hook| rank_hashtags_for_hook(hook, hashtags))
        .collect();

    let csv_bytes = render_csv(hooks, hashtags, &per_hook).map_err(|e| HookError::csv(&paths.csv, e))?;
    write_atomically(&paths.csv, &csv_bytes)?;
    write_atomically(&paths.markdown, render_markdown(hooks, &per_hook).as_bytes())?;

    info!(
        csv = %paths.csv.display(),
        markdown = %paths.markdown.display(),
        hooks = hooks.len(),
        "wrote reports"
    );
    Ok(paths)
}

fn render_csv(hooks: &[String], hashtags: &[String], per_hook: &[Vec<String>]) -> std::result::Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["hook", "hashtags_joined", "optimized_hashtags"])?;
    let joined = hashtags.join(" ");
    for (hook, optimized) in hooks.iter().zip(per_hook) {
        writer.write_record([hook.as_str(), joined.as_str(), optimized.join(" ").as_str()])?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

fn render_markdown(hooks: &[String], per_hook: &[Vec<String>]) -> String {
    let mut out = String::from("| # | Hook | Optimized Hashtags (top 10) |\n|---|---|---|\n");
    for (idx, (hook, optimized)) in hooks.iter().zip(per_hook).enumerate() {
        let excerpt = optimized
            .iter()
            .take(MARKDOWN_EXCERPT)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "| {} | {} | {} |", idx + 1, hook.replace('|', "\\|"), excerpt);
    }
    out
}
