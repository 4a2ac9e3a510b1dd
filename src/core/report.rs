use crate::config::{Config, FailOn};
use crate::core::questionnaire::{MAX_ANSWER, MIN_ANSWER, QuestionId};
use colored::Colorize;
use serde::Serialize;
use std::fmt;

/// Severity bucket, ordered from least to most concerning.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Low,
    Moderate,
    High,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    pub fn interpretation(self) -> &'static str {
        match self {
            Self::Low => "Your responses suggest minimal mental health concerns at this time.",
            Self::Moderate => {
                "Your responses indicate some mental health challenges that may benefit from attention."
            }
            Self::High => "Your responses suggest significant mental health challenges.",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            Self::Low => "Practice regular self-care and mindfulness. Reassess if symptoms change.",
            Self::Moderate => {
                "Consider speaking with a mental health professional for further assessment."
            }
            Self::High => "We strongly recommend consulting with a mental health professional soon.",
        }
    }

    fn colored(self) -> String {
        let label = format!("{} concern", self.as_str());
        match self {
            Self::Low => label.green().bold().to_string(),
            Self::Moderate => label.yellow().bold().to_string(),
            Self::High => label.red().bold().to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeverityResult {
    pub total_score: u8,
    pub percentage: f64,
    pub status: Status,
    pub interpretation: &'static str,
    pub recommendation: &'static str,
}

#[derive(Debug, Clone)]
pub struct ExitStatus {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl ExitStatus {
    pub fn reason_line(&self) -> String {
        self.reasons.join("; ")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub fail_on: FailOn,
}

impl From<&Config> for ConfigSummary {
    fn from(cfg: &Config) -> Self {
        Self {
            fail_on: cfg.general.fail_on,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Assessment {
    pub result: SeverityResult,
    pub config: ConfigSummary,
    pub exit: ExitStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    #[serde(flatten)]
    pub result: SeverityResult,
    pub config: ConfigSummary,
}

impl From<&Assessment> for JsonReport {
    fn from(assessment: &Assessment) -> Self {
        Self {
            result: assessment.result.clone(),
            config: assessment.config.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SeverityResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchEntry {
    pub fn scored(file: impl Into<String>, result: SeverityResult) -> Self {
        Self {
            file: file.into(),
            result: Some(result),
            error: None,
        }
    }

    pub fn invalid(file: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            result: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub low: usize,
    pub moderate: usize,
    pub high: usize,
    pub invalid: usize,
    pub total: usize,
}

impl Counts {
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        let mut counts = Self::default();
        for entry in entries {
            match entry.result.as_ref().map(|result| result.status) {
                Some(Status::Low) => counts.low += 1,
                Some(Status::Moderate) => counts.moderate += 1,
                Some(Status::High) => counts.high += 1,
                None => counts.invalid += 1,
            }
        }
        counts.total = entries.len();
        counts
    }
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub counts: Counts,
    pub entries: Vec<BatchEntry>,
    pub config: ConfigSummary,
    pub exit: ExitStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonBatchReport {
    pub counts: Counts,
    pub entries: Vec<BatchEntry>,
    pub config: ConfigSummary,
}

impl From<&BatchReport> for JsonBatchReport {
    fn from(report: &BatchReport) -> Self {
        Self {
            counts: report.counts.clone(),
            entries: report.entries.clone(),
            config: report.config.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonQuestion {
    pub id: QuestionId,
    pub prompt: &'static str,
    pub min: u8,
    pub max: u8,
}

pub fn question_list() -> Vec<JsonQuestion> {
    QuestionId::ALL
        .iter()
        .map(|question| JsonQuestion {
            id: *question,
            prompt: question.prompt(),
            min: MIN_ANSWER,
            max: MAX_ANSWER,
        })
        .collect()
}

pub fn evaluate_exit(statuses: &[Status], invalid: usize, cfg: &Config) -> ExitStatus {
    let mut reasons = Vec::new();
    let fail_on = cfg.general.fail_on;

    if let Some(worst) = statuses
        .iter()
        .copied()
        .filter(|status| fail_on.is_triggered_by(*status))
        .max()
    {
        reasons.push(format!(
            "{} concern meets fail_on = \"{}\"",
            worst.as_str().to_ascii_lowercase(),
            fail_on
        ));
    }

    if invalid > 0 {
        reasons.push(format!("{} response file(s) could not be scored", invalid));
    }

    ExitStatus {
        ok: reasons.is_empty(),
        reasons,
    }
}

pub fn print_human(assessment: &Assessment) {
    let result = &assessment.result;
    println!(
        "Severity: {} ({}/36, {:.1}%)",
        result.status.colored(),
        result.total_score,
        result.percentage
    );
    println!("{}", result.interpretation);
    println!("-> recommendation: {}", result.recommendation);

    print_exit(&assessment.exit);
}

pub fn print_batch_human(report: &BatchReport) {
    println!(
        "Scored {} response file(s): {} low, {} moderate, {} high, {} invalid",
        report.counts.total,
        report.counts.low,
        report.counts.moderate,
        report.counts.high,
        report.counts.invalid
    );

    for status in [Status::High, Status::Moderate, Status::Low] {
        let grouped: Vec<&BatchEntry> = report
            .entries
            .iter()
            .filter(|entry| entry.result.as_ref().map(|r| r.status) == Some(status))
            .collect();

        if grouped.is_empty() {
            continue;
        }

        println!();
        println!("{} ({})", status.colored(), grouped.len());
        for entry in grouped {
            if let Some(result) = &entry.result {
                println!(
                    "{} - {}/36 ({:.1}%)",
                    entry.file, result.total_score, result.percentage
                );
            }
        }
    }

    let invalid: Vec<&BatchEntry> = report
        .entries
        .iter()
        .filter(|entry| entry.error.is_some())
        .collect();
    if !invalid.is_empty() {
        println!();
        println!("{} ({})", "INVALID".magenta().bold(), invalid.len());
        for entry in invalid {
            println!(
                "{} - {}",
                entry.file,
                entry.error.as_deref().unwrap_or_default()
            );
        }
    }

    print_exit(&report.exit);
}

pub fn print_questions() {
    println!(
        "Rate each item from {} (never) to {} (nearly always):",
        MIN_ANSWER, MAX_ANSWER
    );
    for question in QuestionId::ALL {
        println!("  {}  {}", question.as_str().bold(), question.prompt());
    }
}

fn print_exit(exit: &ExitStatus) {
    println!();
    if exit.ok {
        println!("exit: OK");
    } else {
        println!("exit: FAILED ({})", exit.reason_line());
    }
}
