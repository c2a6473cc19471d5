//! Full runs through the shell, driven by synthetic input. No terminal needed.

use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use critical::config::GameConfig;
use critical::context::AppContext;
use critical::narrative::{Phase, Tier};
use critical::presentation::Signal;
use critical::shell::{AppShell, GAME_TITLE, Screen};

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn started() -> AppShell {
    let mut shell = AppShell::new(AppContext::seeded(GameConfig::default(), 2024));
    assert_eq!(shell.handle_event(&key(KeyCode::Enter)), Signal::Continue);
    assert_eq!(shell.title(), GAME_TITLE);
    shell
}

fn play(shell: &mut AppShell, choices: &[usize]) {
    for &c in choices {
        let k = if c == 0 { '1' } else { '2' };
        assert_eq!(shell.handle_event(&key(KeyCode::Char(k))), Signal::Continue);
    }
}

fn game(shell: &AppShell) -> &critical::shell::GameScreen {
    match shell.screen() {
        Screen::Game(game) => game,
        Screen::Menu(_) => panic!("expected the game screen"),
    }
}

#[test]
fn all_first_choices_reach_the_positive_tier() {
    let mut shell = started();
    play(&mut shell, &[0, 0, 0, 0, 0, 0]);

    let g = game(&shell);
    assert_eq!(g.controller().state().score, 6);
    let outcome = g.layer().outcome().expect("outcome view");
    assert_eq!(outcome.tier, Tier::Positive);
    assert_eq!(
        outcome.message,
        "You stayed true to your values.\nHumanity is grateful."
    );
}

#[test]
fn all_second_choices_reach_the_negative_tier() {
    let mut shell = started();
    play(&mut shell, &[1, 1, 1, 1, 1, 1]);

    let g = game(&shell);
    assert_eq!(g.controller().state().score, -6);
    assert_eq!(g.layer().outcome().map(|o| o.tier), Some(Tier::Negative));
}

#[test]
fn mixed_choices_reach_the_neutral_tier() {
    let mut shell = started();
    play(&mut shell, &[0, 1, 0, 1, 0, 0]);

    let g = game(&shell);
    assert_eq!(g.controller().state().score, 2);
    assert_eq!(g.controller().state().phase, Phase::Complete);
    assert_eq!(g.layer().outcome().map(|o| o.tier), Some(Tier::Neutral));
}

#[test]
fn replay_then_quit_with_the_mouse() {
    let mut shell = started();
    play(&mut shell, &[1, 1, 1, 1, 1, 1]);

    let click = |column, row| {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    };

    // "Play Again" sits on the left, "Quit" on the right.
    assert_eq!(shell.handle_event(&click(20, 22)), Signal::Continue);
    let g = game(&shell);
    assert_eq!(g.controller().state().score, 0);
    assert_eq!(g.controller().state().current_index, 0);
    assert!(g.layer().outcome().is_none());

    play(&mut shell, &[0, 0, 0, 0, 0, 0]);
    assert_eq!(shell.handle_event(&click(50, 22)), Signal::Quit);
}

#[test]
fn prompt_text_keeps_revealing_while_stars_move() {
    let mut shell = started();
    for _ in 0..10 {
        shell.context_mut().now += Duration::from_millis(30);
        shell.fire_timers();
    }
    let g = game(&shell);
    assert_eq!(g.layer().revealed_text().as_deref(), Some("A terroris"));
    assert_eq!(shell.context().scheduler.len(), 3);
}
