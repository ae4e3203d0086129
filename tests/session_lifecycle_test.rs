//! Tests for the session lifecycle: start, countdown, end and reset.

use brushy::{
    EndReason, GameConfig, GameMode, ManualScheduler, OrientationSample, SessionController,
    SessionError, SessionEvent, SessionStatus,
};

fn session(seconds: u32) -> SessionController {
    let config = GameConfig::default().with_session_duration_seconds(seconds);
    SessionController::new(config, ManualScheduler::new(), Vec::new()).unwrap()
}

#[test]
fn test_countdown_reaches_zero_and_ends() {
    let mut session = session(3);
    session.start(GameMode::Brushing).unwrap();
    let generation = session.generation();

    assert_eq!(session.tick(generation), None);
    assert_eq!(session.tick(generation), None);
    let summary = session.tick(generation).expect("third tick ends the session");

    assert_eq!(session.seconds_remaining(), 0);
    assert_eq!(session.status(), SessionStatus::Ended);
    assert_eq!(*summary.reason(), EndReason::TimeExpired);
    assert_eq!(session.scheduler().active(), None);
}

#[test]
fn test_time_events_count_down() {
    let mut session = session(3);
    session.start(GameMode::Brushing).unwrap();
    let generation = session.generation();
    for _ in 0..3 {
        session.tick(generation);
    }

    let times: Vec<u32> = session
        .sink()
        .iter()
        .filter_map(|event| match event {
            SessionEvent::TimeChanged(seconds) => Some(*seconds),
            _ => None,
        })
        .collect();
    assert_eq!(times, vec![2, 1, 0]);
    assert!(matches!(
        session.sink().last(),
        Some(SessionEvent::SessionEnded(_))
    ));
}

#[test]
fn test_ticks_after_end_are_ignored() {
    let mut session = session(2);
    session.start(GameMode::Brushing).unwrap();
    let generation = session.generation();
    session.end().unwrap();

    assert_eq!(session.tick(generation), None);
    assert_eq!(session.seconds_remaining(), 2);
    assert_eq!(session.status(), SessionStatus::Ended);
}

#[test]
fn test_ticks_ignored_when_idle() {
    let mut session = session(5);
    assert_eq!(session.tick(session.generation()), None);
    assert_eq!(session.seconds_remaining(), 5);
}

#[test]
fn test_brushing_score_never_decreases() {
    let mut session = session(60);
    session.start(GameMode::Brushing).unwrap();

    let mut last = 0;
    for angle in [45.0, 90.0, 50.0, -45.0, 0.0, 40.0, 180.0] {
        session
            .orientation_sample(OrientationSample::new(0.0, 0.0, Some(angle)))
            .unwrap();
        assert!(session.score() >= last);
        last = session.score();
    }
    assert_eq!(session.score(), 30);
}

#[test]
fn test_reset_returns_to_idle_with_fresh_state() {
    let mut session = session(10);
    session.start(GameMode::Brushing).unwrap();
    session
        .orientation_sample(OrientationSample::new(0.0, 0.0, Some(45.0)))
        .unwrap();
    session.tick(session.generation());
    session.end().unwrap();

    session.reset().unwrap();
    assert_eq!(session.status(), SessionStatus::Idle);
    assert_eq!(session.score(), 0);
    assert_eq!(session.seconds_remaining(), 10);
    assert!(session.last_summary().is_none());
}

#[test]
fn test_restart_after_end_starts_fresh() {
    let mut session = session(10);
    session.start(GameMode::Brushing).unwrap();
    session
        .orientation_sample(OrientationSample::new(0.0, 0.0, Some(45.0)))
        .unwrap();
    session.end().unwrap();

    session.start(GameMode::Sealant).unwrap();
    assert_eq!(session.score(), 0);
    assert_eq!(session.mode(), GameMode::Sealant);
    assert_eq!(session.seconds_remaining(), 10);
}

#[test]
fn test_double_start_is_rejected() {
    let mut session = session(10);
    session.start(GameMode::Brushing).unwrap();
    let err = session.start(GameMode::Brushing).unwrap_err();
    assert!(matches!(err, SessionError::InvalidState { .. }));
    assert_eq!(err.to_string(), "Cannot start while session is running");
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let config = GameConfig::default().with_tooth_count(0);
    assert!(SessionController::new(config, ManualScheduler::new(), Vec::new()).is_err());
}
