use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("score for {area} must be between 1 and 10, got {score}")]
    InvalidScoreRange { area: String, score: i64 },

    #[error("habit not found: {0}")]
    HabitNotFound(i64),

    #[error("goal not found: {0}")]
    GoalNotFound(i64),

    #[error("task not found: {0}")]
    TaskNotFound(i64),

    #[error("assessment not found: {0}")]
    AssessmentNotFound(i64),

    #[error("invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}
