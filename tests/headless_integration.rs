use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use steadykeys::feedback::FeedbackKind;
use steadykeys::runtime::{
    dispatch, Control, FixedTicker, FrameClock, Runner, SessionEvent, TestEventSource,
};
use steadykeys::{Config, TypingSession, WordBank};

fn key(c: char) -> SessionEvent {
    SessionEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn session() -> TypingSession {
    let bank = WordBank::seeded(vec!["hi".into()], vec!["ok".into()], 7).unwrap();
    TypingSession::new(Config::default(), bank).unwrap()
}

// Headless integration using the runtime + session without a TTY.
// Drives a minimal typing flow through Runner/TestEventSource.
#[test]
fn headless_word_completes() {
    let mut session = session();
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );
    let mut clock = FrameClock::start();

    tx.send(key('h')).unwrap();
    tx.send(key('i')).unwrap();

    for _ in 0..100u32 {
        let event = runner.step();
        assert_eq!(dispatch(&mut session, event, &mut clock), Control::Continue);
        if session.statistics().words_completed == 1 {
            break;
        }
    }

    let stats = session.statistics();
    assert_eq!(stats.words_completed, 1);
    assert_eq!(stats.correct_characters_typed, 2);
    assert_eq!(stats.total_mistakes, 0);
    assert_eq!(session.current_word(), "hi");

    let kinds: Vec<_> = session.drain_feedback().into_iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            FeedbackKind::Correct,
            FeedbackKind::Correct,
            FeedbackKind::WordComplete
        ]
    );
}

#[test]
fn headless_mistake_keeps_position() {
    let mut session = session();
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );
    let mut clock = FrameClock::start();

    tx.send(key('x')).unwrap();
    loop {
        let event = runner.step();
        let was_key = matches!(event, SessionEvent::Key(_));
        dispatch(&mut session, event, &mut clock);
        if was_key {
            break;
        }
    }

    assert_eq!(session.current_word_remaining(), "hi");
    assert_eq!(session.statistics().total_mistakes, 1);
    assert!(session.timers().shake().is_some());
    assert!(session.timers().flash().is_some());
    let events = session.drain_feedback();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, FeedbackKind::Mistake);
    assert_eq!(events[0].payload.character, Some('x'));
}

#[test]
fn headless_escape_quits() {
    let mut session = session();
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );
    let mut clock = FrameClock::start();

    tx.send(key('h')).unwrap();
    tx.send(SessionEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
        .unwrap();

    let mut quit = false;
    for _ in 0..100u32 {
        if dispatch(&mut session, runner.step(), &mut clock) == Control::Quit {
            quit = true;
            break;
        }
    }
    assert!(quit, "escape should end the session");
    assert_eq!(session.current_word_remaining(), "i");
}
