use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::generator;
use crate::session::evaluate::{self, AnswerError, Verdict};
use crate::session::question::{DrillMode, Question, format_answer};
use crate::session::state::{Feedback, FeedbackKind, SessionState};
use crate::session::timer::{self, Clock, SystemClock, TimerPhase};

pub const DEFAULT_DURATION_SECS: u64 = 60;

/// Longest answer the input buffer will hold.
const MAX_INPUT_LEN: usize = 24;

/// Everything the front end needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionView {
    pub mode: DrillMode,
    pub mode_label: &'static str,
    pub question_number: u32,
    pub prompt: String,
    pub question_mode: DrillMode,
    pub feedback: Feedback,
    pub score: u32,
    pub attempts_made: u32,
    pub pending_input: String,
    pub is_timed_session: bool,
    pub remaining_secs: Option<u64>,
    pub duration_secs: u64,
    pub timer_phase: TimerPhase,
    pub input_enabled: bool,
}

/// Owns the session state and applies drill events to it, one at a time.
pub struct DrillSession<C: Clock = SystemClock> {
    state: SessionState,
    duration_secs: u64,
    rng: SmallRng,
    clock: C,
    // Set by whichever call notices the deadline; cleared by `take_expiry`.
    expiry_pending: bool,
}

impl DrillSession<SystemClock> {
    pub fn new(duration_secs: u64) -> Self {
        Self::with_parts(duration_secs, SmallRng::from_entropy(), SystemClock)
    }
}

impl<C: Clock> DrillSession<C> {
    pub fn with_parts(duration_secs: u64, rng: SmallRng, clock: C) -> Self {
        Self {
            state: SessionState::default(),
            duration_secs,
            rng,
            clock,
            expiry_pending: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    /// Make sure a question is on screen. Safe to call repeatedly.
    pub fn initialize(&mut self) -> &SessionState {
        self.ensure_question();
        &self.state
    }

    /// Reset progress and start `mode`. A timed switch also starts the countdown.
    pub fn switch_mode(&mut self, mode: DrillMode, timed: bool) {
        self.state.reset(mode, timed);
        self.expiry_pending = false;
        if timed {
            self.state.session_start = Some(self.clock.now());
        }
        info!("switched to {mode} drill (timed: {timed})");
        self.advance();
    }

    pub fn start_timed_session(&mut self) {
        self.switch_mode(DrillMode::Mixed, true);
        info!("timed challenge started: {}s", self.duration_secs);
    }

    /// Replace the current question with a freshly generated one.
    pub fn advance(&mut self) {
        let question = generator::generate(self.state.mode, &mut self.rng);
        debug!(
            "question #{}: {} (= {})",
            self.state.attempt_count + 1,
            question.prompt,
            question.display_answer()
        );
        self.state.current = Some(question);
        self.state.attempt_count += 1;
    }

    /// Swap in a known question without touching counters.
    pub fn replace_question(&mut self, question: Question) {
        self.state.current = Some(question);
    }

    pub fn check_answer(&mut self, raw: &str) -> Result<Verdict, AnswerError> {
        self.observe_expiry();
        self.ensure_question();
        let expected = self.expected_answer();

        let result = evaluate::check_answer(&mut self.state, expected, raw);
        self.state.pending_input.clear();
        match &result {
            Ok(verdict) => {
                debug!("answer {raw:?}: {verdict:?}, score {}", self.state.score);
                self.advance();
            }
            Err(err) => debug!("answer {raw:?} rejected: {err}"),
        }
        result
    }

    /// Check whatever is in the input buffer.
    pub fn submit(&mut self) -> Result<Verdict, AnswerError> {
        let raw = std::mem::take(&mut self.state.pending_input);
        self.check_answer(&raw)
    }

    pub fn skip(&mut self) -> Result<(), AnswerError> {
        self.observe_expiry();
        self.ensure_question();

        let guard = evaluate::guard_session_open(&mut self.state);
        self.state.pending_input.clear();
        guard?;

        let shown = format_answer(self.expected_answer());
        self.state.feedback = Feedback::new(
            FeedbackKind::Info,
            format!("Skipped. The correct answer was: {shown}."),
        );
        debug!("skipped question #{}", self.state.attempt_count);
        self.advance();
        Ok(())
    }

    /// Recompute the countdown. Returns `true` only on the tick that ends the session.
    pub fn tick(&mut self) -> bool {
        self.observe_expiry()
    }

    /// `true` once after the session expires, whichever call observed it.
    pub fn take_expiry(&mut self) -> bool {
        std::mem::take(&mut self.expiry_pending)
    }

    pub fn push_input(&mut self, ch: char) {
        if self.state.is_locked() || ch.is_control() {
            return;
        }
        if self.state.pending_input.chars().count() < MAX_INPUT_LEN {
            self.state.pending_input.push(ch);
        }
    }

    pub fn pop_input(&mut self) {
        if !self.state.is_locked() {
            self.state.pending_input.pop();
        }
    }

    pub fn remaining_seconds(&self) -> Option<u64> {
        timer::remaining_seconds(&self.state, self.duration_secs, self.clock.now())
    }

    pub fn has_expired(&self) -> bool {
        self.remaining_seconds() == Some(0)
    }

    pub fn timer_phase(&self) -> TimerPhase {
        timer::phase(&self.state, self.duration_secs, self.clock.now())
    }

    pub fn view(&mut self) -> SessionView {
        self.observe_expiry();
        self.ensure_question();

        let state = &self.state;
        let (prompt, question_mode) = state
            .current
            .as_ref()
            .map(|q| (q.prompt.clone(), q.mode))
            .unwrap_or_default();

        SessionView {
            mode: state.mode,
            mode_label: state.mode.display_name(),
            question_number: state.attempt_count,
            prompt,
            question_mode,
            feedback: state.feedback.clone(),
            score: state.score,
            attempts_made: state.attempts_made(),
            pending_input: state.pending_input.clone(),
            is_timed_session: state.is_timed_session,
            remaining_secs: self.remaining_seconds(),
            duration_secs: self.duration_secs,
            timer_phase: self.timer_phase(),
            input_enabled: !state.is_locked(),
        }
    }

    fn ensure_question(&mut self) {
        if self.state.current.is_none() {
            self.advance();
        }
    }

    fn expected_answer(&self) -> f64 {
        self.state
            .current
            .as_ref()
            .map_or(0.0, |q| q.expected_answer)
    }

    /// Fire the Running -> Expired transition at most once per session.
    fn observe_expiry(&mut self) -> bool {
        if self.state.session_ended || !self.has_expired() {
            return false;
        }
        self.state.session_ended = true;
        self.expiry_pending = true;
        self.state.feedback = Feedback::new(
            FeedbackKind::Warning,
            format!(
                "Time is up! You scored {} in {} seconds.",
                self.state.score, self.duration_secs
            ),
        );
        info!(
            "timed challenge over: {} correct out of {} attempts",
            self.state.score,
            self.state.attempts_made()
        );
        true
    }
}
