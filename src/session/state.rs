use chrono::{DateTime, Utc};

use crate::session::question::{DrillMode, Question};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeedbackKind {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

/// Outcome message of the last action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    pub fn new(kind: FeedbackKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub mode: DrillMode,
    pub score: u32,
    /// Questions issued since the last mode reset, including the one on screen.
    pub attempt_count: u32,
    pub current: Option<Question>,
    pub feedback: Feedback,
    pub is_timed_session: bool,
    pub session_start: Option<DateTime<Utc>>,
    pub session_ended: bool,
    pub pending_input: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            mode: DrillMode::Square,
            score: 0,
            attempt_count: 0,
            current: None,
            feedback: Feedback::default(),
            is_timed_session: false,
            session_start: None,
            session_ended: false,
            pending_input: String::new(),
        }
    }
}

impl SessionState {
    pub fn new(mode: DrillMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Answered or skipped questions; the one on screen is not an attempt yet.
    pub fn attempts_made(&self) -> u32 {
        self.attempt_count.saturating_sub(1)
    }

    /// Answer submission and skipping are locked once a timed session ends.
    pub fn is_locked(&self) -> bool {
        self.is_timed_session && self.session_ended
    }

    pub(crate) fn reset(&mut self, mode: DrillMode, timed: bool) {
        self.mode = mode;
        self.score = 0;
        self.attempt_count = 0;
        self.feedback = Feedback::default();
        self.pending_input.clear();
        self.session_ended = false;
        self.is_timed_session = timed;
        self.session_start = None;
    }
}
