pub mod error;
pub mod questionnaire;
pub mod report;
pub mod score;

use crate::config::Config;
use crate::core::questionnaire::QuestionnaireResponse;
use crate::core::report::{Assessment, BatchEntry, BatchReport, ConfigSummary, Counts};
use crate::utils::fs::{self as fs_utils, RawAnswers};
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Where a single answer set comes from.
#[derive(Debug, Clone)]
pub enum ResponseSource {
    File(PathBuf),
    Pairs(Vec<String>),
}

pub fn score_source(source: &ResponseSource, cfg: &Config) -> Result<Assessment> {
    let raw = match source {
        ResponseSource::File(path) => fs_utils::read_response_file(path)?,
        ResponseSource::Pairs(pairs) => {
            fs_utils::parse_answer_pairs(pairs.as_slice()).context("invalid --answer value")?
        }
    };
    debug!(answers = raw.len(), "read raw answers");

    let response = QuestionnaireResponse::from_answers(raw).context("invalid response")?;
    let result = score::evaluate(&response);
    info!(
        total = result.total_score,
        status = result.status.as_str(),
        "scored questionnaire"
    );

    let exit = report::evaluate_exit(&[result.status], 0, cfg);
    Ok(Assessment {
        result,
        config: ConfigSummary::from(cfg),
        exit,
    })
}

pub fn score_directory(dir: &Path, cfg: &Config) -> Result<BatchReport> {
    if !dir.exists() {
        bail!("path does not exist: {}", dir.display());
    }
    if !dir.is_dir() {
        bail!("path is not a directory: {}", dir.display());
    }

    let root = dir
        .canonicalize()
        .with_context(|| format!("failed to canonicalize {}", dir.display()))?;
    let max_bytes = cfg.batch.max_file_size_kb.saturating_mul(1024);
    let mut entries = Vec::new();

    for entry in WalkDir::new(&root)
        .into_iter()
        .filter_entry(|entry| should_visit(entry, &cfg.batch.exclude))
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file()
            || !fs_utils::has_extension(entry.path(), &cfg.batch.extensions)
        {
            continue;
        }

        let rel = fs_utils::relative_path(&root, entry.path());
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!(file = %rel, error = %err, "skipping unreadable file");
                continue;
            }
        };
        if metadata.len() > max_bytes {
            warn!(file = %rel, size = metadata.len(), "skipping file above max_file_size_kb");
            continue;
        }

        entries.push(score_file(entry.path(), rel));
    }

    entries.sort_by(|a, b| a.file.cmp(&b.file));

    let counts = Counts::from_entries(&entries);
    let statuses: Vec<_> = entries
        .iter()
        .filter_map(|entry| entry.result.as_ref().map(|result| result.status))
        .collect();
    let exit = report::evaluate_exit(&statuses, counts.invalid, cfg);
    info!(
        total = counts.total,
        invalid = counts.invalid,
        "scored response directory"
    );

    Ok(BatchReport {
        counts,
        entries,
        config: ConfigSummary::from(cfg),
        exit,
    })
}

fn score_file(path: &Path, rel: String) -> BatchEntry {
    let scored = fs_utils::read_response_file(path).and_then(|raw: RawAnswers| {
        QuestionnaireResponse::from_answers(raw).map_err(anyhow::Error::from)
    });

    match scored {
        Ok(response) => {
            let result = score::evaluate(&response);
            debug!(file = %rel, status = result.status.as_str(), "scored file");
            BatchEntry::scored(rel, result)
        }
        Err(err) => {
            debug!(file = %rel, error = %err, "response file rejected");
            BatchEntry::invalid(rel, format!("{err:#}"))
        }
    }
}

fn should_visit(entry: &DirEntry, excludes: &[String]) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return true;
    }

    let dir_name = entry.file_name().to_string_lossy();
    !excludes
        .iter()
        .any(|excluded| excluded.eq_ignore_ascii_case(&dir_name))
}
