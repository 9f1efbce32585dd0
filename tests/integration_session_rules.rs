use steadykeys::config::Config;
use steadykeys::feedback::FeedbackKind;
use steadykeys::{Outcome, TypingSession, WordBank};

fn session_with(config: Config, normal: &str, easy: &str) -> TypingSession {
    let bank = WordBank::seeded(vec![normal.into()], vec![easy.into()], 1).unwrap();
    TypingSession::new(config, bank).unwrap()
}

fn idle_for(session: &mut TypingSession, from: f64, seconds: f64) -> f64 {
    let dt = 0.25;
    let steps = (seconds / dt) as u32;
    let mut now = from;
    for _ in 0..steps {
        now += dt;
        session.tick(dt, now);
    }
    now
}

#[test]
fn idle_player_drains_to_the_floor() {
    let mut session = session_with(Config::default(), "abc", "xyz");
    let mut last = session.current_stability();
    let mut now = 0.0;
    for _ in 0..800 {
        now += 0.25;
        session.tick(0.25, now);
        let current = session.current_stability();
        assert!(current <= last, "idle drain never raises stability");
        last = current;
    }
    assert_eq!(session.current_stability(), 0.0);
    assert!(session.travel().distance_km() > 0.0);
}

#[test]
fn recovery_from_empty_through_focus_burst() {
    let mut session = session_with(Config::default(), "abc", "xyz");
    idle_for(&mut session, 0.0, 200.0);
    assert_eq!(session.current_stability(), 0.0);
    assert_eq!(session.pending_feedback().count(), 0);

    assert_eq!(session.on_keystroke('a'), Outcome::Correct);
    assert_eq!(session.current_stability(), 2.0);
    assert_eq!(session.on_keystroke('b'), Outcome::Correct);
    assert_eq!(session.current_stability(), 4.0);
    // Third correct key in the low zone fires the burst, then the word completes.
    assert_eq!(session.on_keystroke('c'), Outcome::Correct);
    assert_eq!(session.current_stability(), 21.0);
    assert!(session.combo().is_armed());

    let kinds: Vec<_> = session.drain_feedback().into_iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            FeedbackKind::DoubleBonus,
            FeedbackKind::DoubleBonus,
            FeedbackKind::DoubleBonus,
            FeedbackKind::FocusBurst,
            FeedbackKind::WordComplete,
        ]
    );

    // 21 is below the easy threshold, so the next word is an easy one.
    assert_eq!(session.current_word(), "xyz");
    assert_eq!(
        session.timers().ability_text().map(|t| t.message),
        Some(steadykeys::feedback::FOCUS_BURST_MESSAGE)
    );
}

#[test]
fn mistakes_clamp_at_the_minimum() {
    let mut session = session_with(Config::default(), "abc", "xyz");
    for _ in 0..30 {
        assert_eq!(session.on_keystroke('z'), Outcome::Incorrect);
    }
    assert_eq!(session.current_stability(), 0.0);

    let stats = session.statistics();
    assert_eq!(stats.total_mistakes, 30);
    assert_eq!(stats.total_characters_typed, 30);
    assert_eq!(stats.correct_characters_typed, 0);
    assert_eq!(stats.accuracy(), 0.0);
    assert_eq!(session.current_word_remaining(), "abc");
}

#[test]
fn undrained_feedback_keeps_the_newest_events() {
    let mut config = Config::default();
    config.feedback.max_pending_events = 4;
    let mut session = session_with(config, "abc", "xyz");

    for _ in 0..10 {
        session.on_keystroke('q');
    }

    let stabilities: Vec<_> = session
        .pending_feedback()
        .map(|e| e.payload.stability)
        .collect();
    assert_eq!(stabilities, vec![65.0, 60.0, 55.0, 50.0]);
}

#[test]
fn typing_keeps_idle_drain_away() {
    let mut config = Config::default();
    config.idle_drain.base_idle_delay = 1.0;
    config.idle_drain.min_idle_delay = 1.0;
    let mut session = session_with(config, "aaaa", "aaaa");
    session.on_keystroke('z');
    let after_mistake = session.current_stability();

    let mut now = 0.0;
    for _ in 0..8 {
        now = idle_for(&mut session, now, 0.5);
        session.on_keystroke('z');
    }
    assert_eq!(
        session.current_stability(),
        after_mistake - 8.0 * 5.0,
        "only the mistakes should have cost stability"
    );
}

#[test]
fn invalid_configuration_is_rejected() {
    let mut config = Config::default();
    config.stability.min = 100.0;
    config.stability.max = 0.0;
    let bank = WordBank::seeded(vec!["abc".into()], vec!["xyz".into()], 1).unwrap();
    assert!(TypingSession::new(config, bank).is_err());
}
