use crate::core::error::InvalidResponse;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const MIN_ANSWER: u8 = 0;
pub const MAX_ANSWER: u8 = 4;
pub const QUESTION_COUNT: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub enum QuestionId {
    Q1,
    Q2,
    Q3,
    Q4,
    Q5,
    Q6,
    Q7,
    Q8,
    Q9,
}

impl QuestionId {
    pub const ALL: [QuestionId; QUESTION_COUNT] = [
        Self::Q1,
        Self::Q2,
        Self::Q3,
        Self::Q4,
        Self::Q5,
        Self::Q6,
        Self::Q7,
        Self::Q8,
        Self::Q9,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Q1 => "q1",
            Self::Q2 => "q2",
            Self::Q3 => "q3",
            Self::Q4 => "q4",
            Self::Q5 => "q5",
            Self::Q6 => "q6",
            Self::Q7 => "q7",
            Self::Q8 => "q8",
            Self::Q9 => "q9",
        }
    }

    /// Prompt shown next to the 0 (never) .. 4 (nearly always) slider.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Q1 => "Feeling down, low or hopeless",
            Self::Q2 => "Little interest or pleasure in doing things",
            Self::Q3 => "Trouble falling asleep, staying asleep, or sleeping too much",
            Self::Q4 => "Feeling tired or having little energy",
            Self::Q5 => "Changes in appetite",
            Self::Q6 => "Feeling nervous, anxious or on edge",
            Self::Q7 => "Trouble concentrating on everyday tasks",
            Self::Q8 => "Withdrawing from friends, family or social activities",
            Self::Q9 => "Feeling bad about yourself or that you are a burden",
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<QuestionId> for String {
    fn from(id: QuestionId) -> Self {
        id.as_str().to_string()
    }
}

impl FromStr for QuestionId {
    type Err = InvalidResponse;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix('q')
            .or_else(|| trimmed.strip_prefix('Q'))
            .unwrap_or(trimmed);

        match digits.parse::<usize>() {
            Ok(n) if (1..=QUESTION_COUNT).contains(&n) && !digits.starts_with('+') => {
                Ok(Self::ALL[n - 1])
            }
            _ => Err(InvalidResponse::UnknownQuestion(raw.to_string())),
        }
    }
}

/// A complete answer set: every question answered within range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionnaireResponse {
    answers: [u8; QUESTION_COUNT],
}

impl QuestionnaireResponse {
    pub fn from_answers<K, I>(answers: I) -> Result<Self, InvalidResponse>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, i64)>,
    {
        let mut slots: [Option<u8>; QUESTION_COUNT] = [None; QUESTION_COUNT];

        for (key, value) in answers {
            let question: QuestionId = key.as_ref().parse()?;
            let slot = &mut slots[question.index()];
            if slot.is_some() {
                return Err(InvalidResponse::DuplicateQuestion(question));
            }

            let in_range = i64::from(MIN_ANSWER)..=i64::from(MAX_ANSWER);
            if !in_range.contains(&value) {
                return Err(InvalidResponse::OutOfRange { question, value });
            }
            *slot = Some(value as u8);
        }

        let mut filled = [0_u8; QUESTION_COUNT];
        for question in QuestionId::ALL {
            filled[question.index()] =
                slots[question.index()].ok_or(InvalidResponse::MissingQuestion(question))?;
        }

        Ok(Self { answers: filled })
    }

    /// Every question answered with the same value.
    #[cfg(test)]
    pub fn uniform(value: u8) -> Result<Self, InvalidResponse> {
        Self::from_answers(QuestionId::ALL.map(|q| (q.as_str(), i64::from(value))))
    }

    pub fn answer(&self, question: QuestionId) -> u8 {
        self.answers[question.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, u8)> + '_ {
        QuestionId::ALL.iter().map(|q| (*q, self.answer(*q)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_set(value: i64) -> Vec<(String, i64)> {
        QuestionId::ALL
            .iter()
            .map(|q| (q.to_string(), value))
            .collect()
    }

    #[test]
    fn parses_question_identifiers() {
        assert_eq!("q1".parse::<QuestionId>(), Ok(QuestionId::Q1));
        assert_eq!("Q9".parse::<QuestionId>(), Ok(QuestionId::Q9));
        assert_eq!(" 4 ".parse::<QuestionId>(), Ok(QuestionId::Q4));
        assert!("q0".parse::<QuestionId>().is_err());
        assert!("q10".parse::<QuestionId>().is_err());
        assert!("q+1".parse::<QuestionId>().is_err());
        assert!("mood".parse::<QuestionId>().is_err());
    }

    #[test]
    fn accepts_complete_in_range_answers() {
        let response = QuestionnaireResponse::from_answers(full_set(2)).unwrap();
        assert!(response.iter().all(|(_, value)| value == 2));
        assert_eq!(response.iter().count(), QUESTION_COUNT);
    }

    #[test]
    fn rejects_missing_question() {
        let mut answers = full_set(1);
        answers.retain(|(key, _)| key != "q7");
        let err = QuestionnaireResponse::from_answers(answers).unwrap_err();
        assert_eq!(err, InvalidResponse::MissingQuestion(QuestionId::Q7));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut answers = full_set(1);
        answers[2].1 = 5;
        let err = QuestionnaireResponse::from_answers(answers).unwrap_err();
        assert_eq!(
            err,
            InvalidResponse::OutOfRange {
                question: QuestionId::Q3,
                value: 5
            }
        );

        let mut answers = full_set(1);
        answers[0].1 = -1;
        assert!(matches!(
            QuestionnaireResponse::from_answers(answers),
            Err(InvalidResponse::OutOfRange { value: -1, .. })
        ));
    }

    #[test]
    fn rejects_unknown_and_duplicate_keys() {
        let mut answers = full_set(0);
        answers.push(("q10".to_string(), 0));
        assert!(matches!(
            QuestionnaireResponse::from_answers(answers),
            Err(InvalidResponse::UnknownQuestion(key)) if key == "q10"
        ));

        let mut answers = full_set(0);
        answers.push(("Q2".to_string(), 3));
        assert_eq!(
            QuestionnaireResponse::from_answers(answers).unwrap_err(),
            InvalidResponse::DuplicateQuestion(QuestionId::Q2)
        );
    }

    #[test]
    fn uniform_respects_range() {
        assert!(QuestionnaireResponse::uniform(4).is_ok());
        assert!(QuestionnaireResponse::uniform(5).is_err());
    }
}
