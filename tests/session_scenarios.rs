use chrono::Duration;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use drillmaster::session::controller::DrillSession;
use drillmaster::session::evaluate::{AnswerError, Verdict};
use drillmaster::session::question::{DrillMode, Question};
use drillmaster::session::state::FeedbackKind;
use drillmaster::session::timer::{ManualClock, TimerPhase};

fn session_in(mode: DrillMode) -> (DrillSession<ManualClock>, ManualClock) {
    let clock = ManualClock::default();
    let mut session = DrillSession::with_parts(60, SmallRng::seed_from_u64(2024), clock.clone());
    session.switch_mode(mode, false);
    (session, clock)
}

#[test]
fn correct_square_scores_and_advances() {
    let (mut session, _) = session_in(DrillMode::Square);
    session.replace_question(Question::new("What is the square of 7?", 49.0, DrillMode::Square));

    assert_eq!(session.check_answer("49"), Ok(Verdict::Correct));

    let state = session.state();
    assert_eq!(state.score, 1);
    assert_eq!(state.attempt_count, 2);
    assert_eq!(state.feedback.kind, FeedbackKind::Success);
    assert_ne!(
        state.current.as_ref().map(|q| q.prompt.as_str()),
        Some("What is the square of 7?")
    );
}

#[test]
fn wrong_cube_reveals_answer_and_advances() {
    let (mut session, _) = session_in(DrillMode::Cube);
    session.replace_question(Question::new("What is the cube of 2?", 8.0, DrillMode::Cube));

    assert_eq!(session.check_answer("9"), Ok(Verdict::Wrong { expected: 8.0 }));

    let state = session.state();
    assert_eq!(state.score, 0);
    assert_eq!(state.attempt_count, 2);
    assert!(state.feedback.message.contains("8"));
    assert_eq!(state.feedback.message, "Wrong. The correct answer was: 8.");
}

#[test]
fn empty_input_changes_nothing_but_feedback() {
    let (mut session, _) = session_in(DrillMode::Square);
    let question = Question::new("What is the square of 3?", 9.0, DrillMode::Square);
    session.replace_question(question.clone());

    assert_eq!(session.check_answer(""), Err(AnswerError::EmptyInput));

    let state = session.state();
    assert_eq!(state.score, 0);
    assert_eq!(state.attempt_count, 1);
    assert_eq!(state.current.as_ref(), Some(&question));
    assert!(!state.feedback.is_empty());
}

#[test]
fn expired_challenge_locks_answers() {
    let (mut session, clock) = session_in(DrillMode::Square);
    session.start_timed_session();
    clock.advance(Duration::seconds(61));

    assert_eq!(session.remaining_seconds(), Some(0));
    assert!(session.has_expired());

    session.replace_question(Question::new("What is the square of 5?", 25.0, DrillMode::Square));
    for _ in 0..3 {
        assert_eq!(
            session.check_answer("25"),
            Err(AnswerError::SessionEnded { score: 0 })
        );
    }
    assert_eq!(session.state().score, 0);
    assert_eq!(session.timer_phase(), TimerPhase::Expired);
    assert!(!session.view().input_enabled);
}

#[test]
fn skip_shows_fractional_answer() {
    let (mut session, _) = session_in(DrillMode::Percentage);
    session.replace_question(Question::new("Calculate 5% of 50.", 2.5, DrillMode::Percentage));

    assert_eq!(session.skip(), Ok(()));

    let state = session.state();
    assert_eq!(state.feedback.message, "Skipped. The correct answer was: 2.5.");
    assert_eq!(state.score, 0);
    assert_eq!(state.attempt_count, 2);
}

#[test]
fn tolerance_is_strict() {
    let (mut session, _) = session_in(DrillMode::Percentage);

    session.replace_question(Question::new("q", 41.66, DrillMode::Percentage));
    assert_eq!(session.check_answer("41.669"), Ok(Verdict::Correct));

    session.replace_question(Question::new("q", 41.66, DrillMode::Percentage));
    assert!(matches!(
        session.check_answer("41.671"),
        Ok(Verdict::Wrong { .. })
    ));
    assert_eq!(session.state().score, 1);
}

#[test]
fn exact_expected_text_is_always_correct() {
    let (mut session, _) = session_in(DrillMode::Mixed);
    for _ in 0..200 {
        let expected = session.state().current.as_ref().unwrap().expected_answer;
        let before = session.state().score;
        assert_eq!(session.check_answer(&expected.to_string()), Ok(Verdict::Correct));
        assert_eq!(session.state().score, before + 1);
    }
}

#[test]
fn ticks_after_expiry_are_idempotent() {
    let (mut session, clock) = session_in(DrillMode::Square);
    session.start_timed_session();
    session.replace_question(Question::new("q", 4.0, DrillMode::Square));
    session.check_answer("4").unwrap();

    clock.advance(Duration::seconds(60));
    assert!(session.tick());
    let feedback = session.state().feedback.clone();
    assert_eq!(feedback.message, "Time is up! You scored 1 in 60 seconds.");

    for _ in 0..10 {
        clock.advance(Duration::seconds(5));
        assert!(!session.tick());
        assert_eq!(session.state().score, 1);
        assert_eq!(session.state().feedback, feedback);
    }
}

#[test]
fn mode_switch_mid_challenge_stops_timer() {
    let (mut session, clock) = session_in(DrillMode::Square);
    session.start_timed_session();
    session.switch_mode(DrillMode::Cube, false);
    clock.advance(Duration::seconds(120));

    assert!(!session.tick());
    assert_eq!(session.remaining_seconds(), None);
    assert_eq!(session.skip(), Ok(()));
}

#[test]
fn attempts_count_checked_and_skipped_questions() {
    let (mut session, _) = session_in(DrillMode::Cube);
    session.skip().unwrap();
    session.check_answer("0").unwrap();
    let _ = session.check_answer("abc");
    let view = session.view();
    assert_eq!(view.question_number, 3);
    assert_eq!(view.attempts_made, 2);
    assert_eq!(view.mode_label, "Cubes");
}
