use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

use crate::session::state::SessionState;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock. Clones share the same instant.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerPhase {
    NotStarted,
    Running,
    Expired,
}

/// Whole seconds left in a timed session, or `None` when no timer applies.
pub fn remaining_seconds(
    state: &SessionState,
    duration_secs: u64,
    now: DateTime<Utc>,
) -> Option<u64> {
    if !state.is_timed_session {
        return None;
    }
    let start = state.session_start?;
    // A clock that stepped backwards counts as no time elapsed.
    let elapsed = (now - start).num_seconds().max(0) as u64;
    Some(duration_secs.saturating_sub(elapsed))
}

pub fn has_expired(state: &SessionState, duration_secs: u64, now: DateTime<Utc>) -> bool {
    remaining_seconds(state, duration_secs, now) == Some(0)
}

/// Phase of the timed-session state machine. Non-timed sessions never leave `NotStarted`.
pub fn phase(state: &SessionState, duration_secs: u64, now: DateTime<Utc>) -> TimerPhase {
    if state.is_timed_session && state.session_ended {
        return TimerPhase::Expired;
    }
    match remaining_seconds(state, duration_secs, now) {
        None => TimerPhase::NotStarted,
        Some(0) => TimerPhase::Expired,
        Some(_) => TimerPhase::Running,
    }
}

/// Fraction of the session still left, for countdown bars.
pub fn remaining_ratio(remaining_secs: u64, duration_secs: u64) -> f64 {
    if duration_secs == 0 {
        return 0.0;
    }
    (remaining_secs as f64 / duration_secs as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::question::DrillMode;

    fn timed_state(start: DateTime<Utc>) -> SessionState {
        let mut state = SessionState::new(DrillMode::Mixed);
        state.is_timed_session = true;
        state.session_start = Some(start);
        state
    }

    #[test]
    fn test_untimed_session_has_no_remaining() {
        let state = SessionState::default();
        let now = Utc::now();
        assert_eq!(remaining_seconds(&state, 60, now), None);
        assert!(!has_expired(&state, 60, now));
        assert_eq!(phase(&state, 60, now), TimerPhase::NotStarted);
    }

    #[test]
    fn test_timed_without_start_is_not_started() {
        let mut state = SessionState::new(DrillMode::Mixed);
        state.is_timed_session = true;
        assert_eq!(remaining_seconds(&state, 60, Utc::now()), None);
        assert_eq!(phase(&state, 60, Utc::now()), TimerPhase::NotStarted);
    }

    #[test]
    fn test_remaining_floors_elapsed() {
        let start = Utc::now();
        let state = timed_state(start);
        assert_eq!(remaining_seconds(&state, 60, start), Some(60));
        assert_eq!(
            remaining_seconds(&state, 60, start + Duration::milliseconds(1_999)),
            Some(59)
        );
        assert_eq!(
            remaining_seconds(&state, 60, start + Duration::seconds(59)),
            Some(1)
        );
        assert_eq!(phase(&state, 60, start + Duration::seconds(30)), TimerPhase::Running);
    }

    #[test]
    fn test_expired_past_duration() {
        let start = Utc::now();
        let state = timed_state(start);
        let now = start + Duration::seconds(61);
        assert_eq!(remaining_seconds(&state, 60, now), Some(0));
        assert!(has_expired(&state, 60, now));
        assert_eq!(phase(&state, 60, now), TimerPhase::Expired);
    }

    #[test]
    fn test_clock_going_backwards_is_clamped() {
        let start = Utc::now();
        let state = timed_state(start);
        assert_eq!(
            remaining_seconds(&state, 60, start - Duration::seconds(5)),
            Some(60)
        );
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::default();
        let shared = clock.clone();
        let before = shared.now();
        clock.advance(Duration::seconds(10));
        assert_eq!(shared.now() - before, Duration::seconds(10));
    }

    #[test]
    fn test_remaining_ratio() {
        assert_eq!(remaining_ratio(30, 60), 0.5);
        assert_eq!(remaining_ratio(0, 60), 0.0);
        assert_eq!(remaining_ratio(5, 0), 0.0);
    }
}
