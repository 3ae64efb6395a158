use thiserror::Error;

use crate::session::question::format_answer;
use crate::session::state::{Feedback, FeedbackKind, SessionState};

/// Maximum absolute deviation still counted as correct (exclusive).
pub const TOLERANCE: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Verdict {
    Correct,
    Wrong { expected: f64 },
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// Rejected submissions. All of them are local and recoverable.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AnswerError {
    #[error("no answer entered")]
    EmptyInput,
    #[error("'{0}' is not a number")]
    InvalidInput(String),
    #[error("timed session already ended with score {score}")]
    SessionEnded { score: u32 },
}

pub fn parse_answer(raw: &str) -> Result<f64, AnswerError> {
    if raw.is_empty() {
        return Err(AnswerError::EmptyInput);
    }
    raw.trim()
        .parse::<f64>()
        .map_err(|_| AnswerError::InvalidInput(raw.to_string()))
}

pub fn within_tolerance(value: f64, expected: f64) -> bool {
    (value - expected).abs() < TOLERANCE
}

pub(crate) fn session_ended_feedback(score: u32) -> Feedback {
    Feedback::new(
        FeedbackKind::Warning,
        format!("Time's up! Your final score was {score}."),
    )
}

/// Reject the action if a timed session is over, refreshing the final-score message.
pub(crate) fn guard_session_open(state: &mut SessionState) -> Result<(), AnswerError> {
    if state.is_locked() {
        state.feedback = session_ended_feedback(state.score);
        return Err(AnswerError::SessionEnded { score: state.score });
    }
    Ok(())
}

/// Judge `raw` against `expected`, updating score and feedback.
///
/// Does not advance the session; the controller does that for `Ok` verdicts only.
pub fn check_answer(
    state: &mut SessionState,
    expected: f64,
    raw: &str,
) -> Result<Verdict, AnswerError> {
    guard_session_open(state)?;

    let value = match parse_answer(raw) {
        Ok(value) => value,
        Err(err) => {
            state.feedback = match err {
                AnswerError::EmptyInput => Feedback::new(
                    FeedbackKind::Warning,
                    "Please enter an answer before submitting.",
                ),
                _ => Feedback::new(
                    FeedbackKind::Error,
                    "Invalid input. Please enter a numerical value.",
                ),
            };
            return Err(err);
        }
    };

    if within_tolerance(value, expected) {
        state.score += 1;
        state.feedback = Feedback::new(
            FeedbackKind::Success,
            format!("Correct! Great job on that {} drill.", state.mode),
        );
        Ok(Verdict::Correct)
    } else {
        state.feedback = Feedback::new(
            FeedbackKind::Error,
            format!("Wrong. The correct answer was: {}.", format_answer(expected)),
        );
        Ok(Verdict::Wrong { expected })
    }
}
