use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use glam::DVec2;
use typestrike::{
    runtime::{key_input, FixedTicker, GameEvent, Runner, TestEventSource},
    target::Target,
    words::WordPool,
    world::Arena,
    Game, MatchOutcome, SessionPhase,
};

const FRAME_MS: f64 = 16.0;

fn key(c: char) -> GameEvent {
    GameEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

// Drives a Game through Runner/TestEventSource without a TTY
#[test]
fn headless_typing_flow_destroys_target() {
    let mut game = Game::new(Arena::default(), Some(5));
    game.start(WordPool::new(["comet"]).unwrap(), 0.0);
    game.push_target(Target::at(1, "ufo", DVec2::new(400.0, 100.0)));

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for c in "ufo".chars() {
        tx.send(key(c)).unwrap();
    }

    let mut now = 0.0;
    let mut outcomes = Vec::new();
    for _ in 0..100u32 {
        match runner.step() {
            GameEvent::Tick => {
                now += FRAME_MS;
                game.tick(now);
            }
            GameEvent::Resize => {}
            GameEvent::Key(event) => {
                if let Some(input) = key_input(&event) {
                    outcomes.extend(game.key(input));
                }
            }
        }
        if outcomes.len() == 3 {
            break;
        }
    }

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0], MatchOutcome::PartialMatch { id: 1 });
    assert_eq!(
        outcomes[2],
        MatchOutcome::Matched {
            id: 1,
            text: "ufo".to_string()
        }
    );
    assert_eq!(game.session().score, 30);
    assert!(game.input().is_empty());
    assert!(game.targets().iter().all(|t| t.id != 1));
}

#[test]
fn headless_session_ends_after_three_hits() {
    let mut game = Game::new(Arena::default(), Some(9));
    game.start(WordPool::fallback(), 0.0);
    let base = game.arena().base();

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );
    drop(tx);

    let mut now = 0.0;
    let mut hits = 0;
    while game.phase() == SessionPhase::Running && now < 10_000.0 {
        if hits < 3 {
            game.push_target(Target::at(100 + hits, "nova", base));
            hits += 1;
        }
        if let GameEvent::Tick = runner.step() {
            now += FRAME_MS;
            game.tick(now);
        }
    }

    assert_eq!(game.phase(), SessionPhase::Ended);
    assert_eq!(game.session().life_points, 0);
    let stats = game.summary(now).unwrap();
    assert_eq!(stats.words_completed, 0);
    assert_eq!(stats.accuracy, 0);
}
