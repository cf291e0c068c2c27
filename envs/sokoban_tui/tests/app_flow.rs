use std::path::PathBuf;

use ratatui::backend::TestBackend;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use sokoban_rs::{classic_level, encode_pack, Direction, Level};
use sokoban_tui::{render, App, Command, Config, Control, Phase};

fn press(app: &mut App, code: KeyCode) -> Control {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn corridor() -> Level {
    Level::from_rows(&["#####", "#@$.#", "#####"]).unwrap()
}

fn screen_text(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
    terminal.draw(|frame| render::draw(frame, app)).unwrap();
    terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
}

#[test]
fn keys_map_to_commands() {
    assert_eq!(Command::from_key(KeyCode::Up), Some(Command::Move(Direction::Up)));
    assert_eq!(Command::from_key(KeyCode::Right), Some(Command::Move(Direction::Right)));
    assert_eq!(Command::from_key(KeyCode::Down), Some(Command::Move(Direction::Down)));
    assert_eq!(Command::from_key(KeyCode::Left), Some(Command::Move(Direction::Left)));
    assert_eq!(Command::from_key(KeyCode::Char('r')), Some(Command::Reset));
    assert_eq!(Command::from_key(KeyCode::F(9)), Some(Command::Reload));
    assert_eq!(Command::from_key(KeyCode::Esc), Some(Command::Quit));
    assert_eq!(Command::from_key(KeyCode::Char('x')), None);
}

#[test]
fn escape_quits() {
    let mut app = App::with_levels(Config::default(), vec![corridor()]).unwrap();
    assert_eq!(press(&mut app, KeyCode::Esc), Control::Quit);
}

#[test]
fn solving_last_level_shows_popup_then_quits() {
    let mut app = App::with_levels(Config::default(), vec![corridor()]).unwrap();
    assert_eq!(press(&mut app, KeyCode::Right), Control::Continue);
    assert_eq!(app.phase(), Phase::Won);
    assert!(screen_text(&app).contains("You won!"));
    assert_eq!(press(&mut app, KeyCode::Char('x')), Control::Quit);
}

#[test]
fn solving_earlier_level_advances() {
    let mut app = App::with_levels(Config::default(), vec![corridor(), classic_level().unwrap()]).unwrap();
    press(&mut app, KeyCode::Right);
    assert_eq!(app.phase(), Phase::Playing);
    assert_eq!(app.campaign().current_index(), 1);
    assert_eq!(app.status(), Some("Level 1 solved"));
    assert!(screen_text(&app).contains("Level 2/2"));

    press(&mut app, KeyCode::Left);
    assert_eq!(app.status(), None);
    assert!(!screen_text(&app).contains("solved"));
}

#[test]
fn reset_and_release_events() {
    let mut app = App::with_levels(Config::default(), vec![classic_level().unwrap()]).unwrap();
    press(&mut app, KeyCode::Left);
    assert_eq!(app.campaign().state().num_moves, 1);

    let release = KeyEvent::new_with_kind(KeyCode::Left, KeyModifiers::NONE, KeyEventKind::Release);
    assert_eq!(app.handle_key(release), Control::Continue);
    assert_eq!(app.campaign().state().num_moves, 1);

    press(&mut app, KeyCode::Char('r'));
    assert_eq!(app.campaign().state().num_moves, 0);
    assert_eq!(app.campaign().state().player_pos(), app.campaign().state().level().start());
}

#[test]
fn reload_without_file_reports_it() {
    let mut app = App::with_levels(Config::default(), vec![corridor()]).unwrap();
    press(&mut app, KeyCode::F(9));
    assert_eq!(app.status(), Some("No level file to reload"));
}

#[test]
fn reload_rereads_level_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("levels.bin");
    std::fs::write(&path, encode_pack(&[classic_level().unwrap()]).unwrap()).unwrap();

    let config = Config { level_file: Some(path.clone()), ..Config::default() };
    let mut app = App::new(config).unwrap();
    assert_eq!(app.campaign().len(), 1);
    press(&mut app, KeyCode::Left);

    std::fs::write(&path, encode_pack(&[classic_level().unwrap(), classic_level().unwrap()]).unwrap()).unwrap();
    press(&mut app, KeyCode::F(9));
    assert_eq!(app.campaign().len(), 2);
    assert_eq!(app.campaign().state().num_moves, 0);
    assert!(app.status().unwrap().starts_with("Reloaded"));

    // A broken file keeps the current game going.
    std::fs::write(&path, [0u8]).unwrap();
    press(&mut app, KeyCode::F(9));
    assert!(app.status().unwrap().starts_with("Reload failed"));
    assert_eq!(app.campaign().len(), 2);
    assert_eq!(press(&mut app, KeyCode::Left), Control::Continue);
    assert_eq!(app.campaign().state().num_moves, 1);
}

#[test]
fn missing_level_file_fails_setup() {
    let config = Config { level_file: Some(PathBuf::from("/nonexistent/levels.bin")), ..Config::default() };
    let err = App::new(config).err().unwrap();
    assert!(err.to_string().contains("failed to load levels from /nonexistent/levels.bin"));
}

#[test]
fn builtin_levels_start_at_configured_index() {
    let app = App::new(Config { start_level: 1, ..Config::default() }).unwrap();
    assert_eq!(app.campaign().current_index(), 1);
    assert!(screen_text(&app).contains("Sokoban"));
}
