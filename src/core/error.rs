use crate::core::questionnaire::QuestionId;
use thiserror::Error;

/// Rejection reasons for an answer set that cannot be scored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidResponse {
    #[error("unknown question identifier {0:?} (expected q1..q9)")]
    UnknownQuestion(String),

    #[error("question {0} answered more than once")]
    DuplicateQuestion(QuestionId),

    #[error("answer {value} for {question} is outside the 0..=4 answer scale")]
    OutOfRange { question: QuestionId, value: i64 },

    #[error("missing answer for {0}")]
    MissingQuestion(QuestionId),

    #[error("malformed answer {0:?} (expected qN=V)")]
    MalformedAnswer(String),
}
