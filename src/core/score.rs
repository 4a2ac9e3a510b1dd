use crate::core::questionnaire::{MAX_ANSWER, QUESTION_COUNT, QuestionnaireResponse};
use crate::core::report::{SeverityResult, Status};

pub const MAX_TOTAL: u8 = MAX_ANSWER * QUESTION_COUNT as u8;

const MODERATE_FROM_PERCENT: f64 = 30.0;
const HIGH_FROM_PERCENT: f64 = 60.0;

pub fn evaluate(response: &QuestionnaireResponse) -> SeverityResult {
    let total_score: u8 = response.iter().map(|(_, value)| value).sum();
    let percentage = f64::from(total_score) / f64::from(MAX_TOTAL) * 100.0;
    let status = status_for_percentage(percentage);

    SeverityResult {
        total_score,
        percentage,
        status,
        interpretation: status.interpretation(),
        recommendation: status.recommendation(),
    }
}

pub fn status_for_percentage(percentage: f64) -> Status {
    if percentage < MODERATE_FROM_PERCENT {
        Status::Low
    } else if percentage < HIGH_FROM_PERCENT {
        Status::Moderate
    } else {
        Status::High
    }
}
