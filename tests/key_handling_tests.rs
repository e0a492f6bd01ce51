//! Keyboard event handling tests
//!
//! Tests for keyboard input handling: editing the query, submitting, and
//! quitting.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use pokedex::ui::app::KeyAction;
use pokedex::ui::theme::Theme;
use pokedex::ui::App;

/// Helper to create a key event
fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Helper to create a test app
fn create_test_app() -> App {
    App::new(Theme::default_theme().clone())
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        assert_eq!(app.handle_key(key(KeyCode::Char(c))), KeyAction::None);
    }
}

#[test]
fn test_typing_updates_query() {
    let mut app = create_test_app();
    type_text(&mut app, "Eevee");
    assert_eq!(app.query, "Eevee");
}

#[test]
fn test_backspace_removes_last_char() {
    let mut app = create_test_app();
    type_text(&mut app, "Eeveee");
    app.handle_key(key(KeyCode::Backspace));
    assert_eq!(app.query, "Eevee");

    // Backspace on an empty query is a no-op
    let mut empty = create_test_app();
    empty.handle_key(key(KeyCode::Backspace));
    assert!(empty.query.is_empty());
}

#[test]
fn test_ctrl_u_clears_query() {
    let mut app = create_test_app();
    type_text(&mut app, "Charizard");
    assert_eq!(app.handle_key(ctrl('u')), KeyAction::None);
    assert!(app.query.is_empty());
}

#[test]
fn test_enter_submits_lowercased_key() {
    let mut app = create_test_app();
    type_text(&mut app, "PIKACHU");

    let action = app.handle_key(key(KeyCode::Enter));
    assert_eq!(action, KeyAction::Submit("pikachu".to_string()));
    assert!(app.loading);
    assert_eq!(app.query, "PIKACHU");
}

#[test]
fn test_enter_with_empty_query_still_submits() {
    let mut app = create_test_app();
    let action = app.handle_key(key(KeyCode::Enter));
    assert_eq!(action, KeyAction::Submit(String::new()));
}

#[test]
fn test_quit_with_esc() {
    let mut app = create_test_app();
    assert!(!app.should_quit);
    assert_eq!(app.handle_key(key(KeyCode::Esc)), KeyAction::Quit);
    assert!(app.should_quit);
}

#[test]
fn test_quit_with_ctrl_c() {
    let mut app = create_test_app();
    assert_eq!(app.handle_key(ctrl('c')), KeyAction::Quit);
    assert!(app.should_quit);
}

#[test]
fn test_q_is_just_a_letter() {
    let mut app = create_test_app();
    type_text(&mut app, "quagsire");
    assert!(!app.should_quit);
    assert_eq!(app.query, "quagsire");
}

#[test]
fn test_other_ctrl_chords_are_ignored() {
    let mut app = create_test_app();
    assert_eq!(app.handle_key(ctrl('x')), KeyAction::None);
    assert!(app.query.is_empty());
}

#[test]
fn test_key_release_is_ignored() {
    let mut app = create_test_app();
    let release = KeyEvent {
        code: KeyCode::Char('a'),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Release,
        state: KeyEventState::empty(),
    };
    assert_eq!(app.handle_key(release), KeyAction::None);
    assert!(app.query.is_empty());
}

#[test]
fn test_shifted_letters_are_typed() {
    let mut app = create_test_app();
    app.handle_key(KeyEvent::new(KeyCode::Char('M'), KeyModifiers::SHIFT));
    assert_eq!(app.query, "M");
}
