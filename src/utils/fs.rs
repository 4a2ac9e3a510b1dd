use crate::core::error::InvalidResponse;
use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;
use std::fs;
use std::path::Path;

/// Raw answers as read from a file or the command line, before validation.
pub type RawAnswers = Vec<(String, i64)>;

static ANSWER_PAIR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z]?\d+)\s*[=:]\s*(-?\d+)\s*$").expect("valid answer pair regex")
});

pub fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(&ext)))
}

/// Parses `q3=2` (also `Q3:2`, `3=2`) into a key/value pair.
pub fn parse_answer_pair(raw: &str) -> Result<(String, i64), InvalidResponse> {
    let captures = ANSWER_PAIR_RE
        .captures(raw)
        .ok_or_else(|| InvalidResponse::MalformedAnswer(raw.to_string()))?;

    let value = captures[2]
        .parse::<i64>()
        .map_err(|_| InvalidResponse::MalformedAnswer(raw.to_string()))?;
    Ok((captures[1].to_string(), value))
}

pub fn parse_answer_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<RawAnswers, InvalidResponse> {
    pairs
        .iter()
        .map(|pair| parse_answer_pair(pair.as_ref()))
        .collect()
}

/// Every `key = value` entry of a response table in document order.
/// Repeated keys are kept so validation can reject them.
struct AnswerEntries(RawAnswers);

impl<'de> Deserialize<'de> for AnswerEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = AnswerEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of question identifiers to integer answers")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, i64>()? {
                    entries.push((key, value));
                }
                Ok(AnswerEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Reads a JSON object or TOML table of `qN = value` answers.
pub fn read_response_file(path: &Path) -> Result<RawAnswers> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading response file {}", path.display()))?;

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    let answers: AnswerEntries = match extension.as_str() {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("failed parsing JSON responses in {}", path.display()))?,
        "toml" => toml::from_str(&content)
            .with_context(|| format!("failed parsing TOML responses in {}", path.display()))?,
        other => bail!(
            "unsupported response file type {:?} for {} (expected .json or .toml)",
            other,
            path.display()
        ),
    };

    Ok(answers.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::questionnaire::{QuestionId, QuestionnaireResponse};

    #[test]
    fn parses_answer_pairs() {
        assert_eq!(parse_answer_pair("q3=2").unwrap(), ("q3".to_string(), 2));
        assert_eq!(parse_answer_pair(" Q9 : 4 ").unwrap(), ("Q9".to_string(), 4));
        assert_eq!(parse_answer_pair("5=-1").unwrap(), ("5".to_string(), -1));
    }

    #[test]
    fn rejects_malformed_pairs() {
        for raw in ["q3", "q3=", "=2", "q3=two", "mood=2", "q3=2=1"] {
            assert!(
                matches!(
                    parse_answer_pair(raw),
                    Err(InvalidResponse::MalformedAnswer(_))
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn reads_json_and_toml_response_files() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("a.json");
        fs::write(&json, r#"{"q1": 1, "q2": 3}"#).unwrap();
        let answers = read_response_file(&json).unwrap();
        assert_eq!(answers, vec![("q1".to_string(), 1), ("q2".to_string(), 3)]);

        let toml_path = dir.path().join("b.TOML");
        fs::write(&toml_path, "q4 = 0\nq5 = 2\n").unwrap();
        let mut answers = read_response_file(&toml_path).unwrap();
        answers.sort();
        assert_eq!(answers, vec![("q4".to_string(), 0), ("q5".to_string(), 2)]);
    }

    #[test]
    fn keeps_repeated_json_keys_for_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.json");
        fs::write(
            &path,
            r#"{"q1": 0, "q1": 4, "q2": 0, "q3": 0, "q4": 0, "q5": 0, "q6": 0, "q7": 0, "q8": 0, "q9": 0}"#,
        )
        .unwrap();

        let answers = read_response_file(&path).unwrap();
        assert_eq!(answers.len(), 10);
        assert_eq!(answers[0], ("q1".to_string(), 0));
        assert_eq!(answers[1], ("q1".to_string(), 4));

        assert_eq!(
            QuestionnaireResponse::from_answers(answers).unwrap_err(),
            InvalidResponse::DuplicateQuestion(QuestionId::Q1)
        );
    }

    #[test]
    fn rejects_non_integer_answers_and_unknown_formats() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("bad.json");
        fs::write(&json, r#"{"q1": "often"}"#).unwrap();
        assert!(read_response_file(&json).is_err());

        let yaml = dir.path().join("answers.yaml");
        fs::write(&yaml, "q1: 1").unwrap();
        assert!(read_response_file(&yaml).is_err());
    }

    #[test]
    fn matches_extensions_case_insensitively() {
        let allowed = vec!["json".to_string()];
        assert!(has_extension(Path::new("x/A.JSON"), &allowed));
        assert!(!has_extension(Path::new("x/a.toml"), &allowed));
        assert!(!has_extension(Path::new("x/json"), &allowed));
    }
}
