//! Tests for the ordered sealant procedure.

use brushy::{
    EndReason, GameConfig, GameMode, ManualScheduler, Rating, SessionController, SessionError,
    SessionEvent, SessionStatus, StageState, Tool,
};

fn running(teeth: usize) -> SessionController {
    let config = GameConfig::default().with_tooth_count(teeth);
    let mut session = SessionController::new(config, ManualScheduler::new(), Vec::new()).unwrap();
    session.start(GameMode::Sealant).unwrap();
    session
}

fn seal_all(session: &mut SessionController, teeth: usize) {
    for tool in Tool::ALL {
        session.arm_tool(tool).unwrap();
        for unit in 0..teeth {
            session.apply_tool(unit).unwrap();
        }
    }
}

#[test]
fn test_sealing_every_tooth_ends_session_early() {
    let mut session = running(16);
    session.tick(session.generation());
    seal_all(&mut session, 16);

    assert_eq!(session.status(), SessionStatus::Ended);
    assert!(session.seconds_remaining() > 0);

    let summary = session.last_summary().expect("summary after completion");
    assert_eq!(*summary.reason(), EndReason::SealantComplete);
    assert_eq!(*summary.ratio_percent(), 100);
    assert_eq!(*summary.rating(), Rating::FiveStars);
    assert_eq!(*summary.score(), 800);
}

#[test]
fn test_out_of_order_step_leaves_tooth_unchanged() {
    let mut session = running(4);
    session.arm_tool(Tool::Cleaner).unwrap();
    session.apply_tool(2).unwrap();
    let score = session.score();

    session.arm_tool(Tool::Bond).unwrap();
    let err = session.apply_tool(2).unwrap_err();
    assert!(matches!(
        err,
        SessionError::SequenceViolation {
            unit: 2,
            required: 2,
            ..
        }
    ));

    assert_eq!(session.score(), score);
    assert_eq!(
        session.sealant().unit(2).map(|u| u.next_pending_step()),
        Some(2)
    );
    assert!(session.sink().contains(&SessionEvent::SequenceViolation {
        unit: 2,
        required_step: 2
    }));
    assert_eq!(session.status(), SessionStatus::Running);
}

#[test]
fn test_reapplying_completed_step_is_rejected() {
    let mut session = running(2);
    session.arm_tool(Tool::Cleaner).unwrap();
    session.apply_tool(0).unwrap();
    assert!(session.apply_tool(0).is_err());
    assert_eq!(session.score(), 10);
}

#[test]
fn test_apply_without_tool_does_nothing() {
    let mut session = running(2);
    session.apply_tool(0).unwrap();
    assert_eq!(session.score(), 0);
    assert_eq!(
        session.sealant().unit(0).map(|u| u.completed_count()),
        Some(0)
    );
}

#[test]
fn test_out_of_range_tooth_is_reported() {
    let mut session = running(2);
    session.arm_tool(Tool::Cleaner).unwrap();
    assert!(matches!(
        session.apply_tool(7),
        Err(SessionError::OutOfRange { index: 7, count: 2 })
    ));
    assert!(
        session
            .sink()
            .contains(&SessionEvent::UnitOutOfRange { unit: 7 })
    );
}

#[test]
fn test_idle_sealant_input_has_no_effect() {
    let config = GameConfig::default();
    let mut session = SessionController::new(config, ManualScheduler::new(), Vec::new()).unwrap();
    session.arm_tool(Tool::Cleaner).unwrap();
    session.apply_tool(0).unwrap();

    assert_eq!(session.sealant().armed(), None);
    assert_eq!(session.score(), 0);
    assert!(session.sink().is_empty());
    assert!(
        session
            .sealant()
            .units()
            .iter()
            .all(|unit| *unit == StageState::new())
    );
}

#[test]
fn test_partial_completion_rated_on_stop() {
    let mut session = running(4);
    for tool in Tool::ALL {
        session.arm_tool(tool).unwrap();
        session.apply_tool(0).unwrap();
        session.apply_tool(1).unwrap();
    }
    let summary = session.end().unwrap();

    assert_eq!(*summary.ratio_percent(), 50);
    assert_eq!(*summary.rating(), Rating::TwoStars);
    assert_eq!(*summary.reason(), EndReason::Stopped);
}
