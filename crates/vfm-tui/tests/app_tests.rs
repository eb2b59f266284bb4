use std::fs;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use tempfile::TempDir;
use vfm_core::Settings;
use vfm_tui::ui::Area;
use vfm_tui::{App, InputEvent, Message, ScriptedKeys, TuiConfig};

fn app_in(dir: &Path) -> App {
    let mut settings = Settings::default();
    settings.last_path = dir.to_path_buf();
    App::new(TuiConfig::new(settings))
}

fn run_keys(app: &mut App, mut keys: ScriptedKeys, width: u16, height: u16) -> Terminal<TestBackend> {
    keys.type_line("exit");
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    app.run(&mut terminal, &mut keys).unwrap();
    assert!(!app.is_running());
    terminal
}

fn run_lines(app: &mut App, lines: &[&str]) -> Terminal<TestBackend> {
    let mut keys = ScriptedKeys::default();
    for line in lines {
        keys.type_line(line);
    }
    run_keys(app, keys, 100, 40)
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn status(app: &App) -> String {
    app.status().plain_text()
}

#[test]
fn test_dir_changes_and_persists_current_directory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("projects").join("vfm")).unwrap();
    let config_dir = TempDir::new().unwrap();
    let settings_path = config_dir.path().join("settings.toml");

    let mut settings = Settings::default();
    settings.last_path = temp.path().to_path_buf();
    let mut app = App::new(TuiConfig::new(settings).with_settings_path(&settings_path));

    run_lines(&mut app, &["dir projects"]);

    let projects = temp.path().join("projects");
    assert_eq!(app.current_dir(), projects);
    assert_eq!(Settings::load(&settings_path).unwrap().last_path, projects);
    let tree = app.pane_lines(Area::DirList).unwrap().plain_lines();
    assert_eq!(tree, vec![projects.display().to_string(), "└──vfm".to_string()]);
}

#[test]
fn test_dir_up_and_missing_path() {
    let temp = TempDir::new().unwrap();
    let sub = temp.path().join("sub");
    fs::create_dir(&sub).unwrap();

    let mut app = app_in(&sub);
    run_lines(&mut app, &["dir .."]);
    assert_eq!(app.current_dir(), temp.path());

    run_lines(&mut app, &["dir nowhere"]);
    assert_eq!(app.current_dir(), temp.path());
    assert_eq!(status(&app), Message::WrongPath.to_string());
}

#[test]
fn test_copy_file_into_directory() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "alpha").unwrap();
    fs::create_dir(temp.path().join("dest")).unwrap();

    let mut app = app_in(temp.path());
    run_lines(&mut app, &["copy a.txt dest"]);

    assert_eq!(status(&app), "Success.");
    assert_eq!(fs::read_to_string(temp.path().join("dest").join("a.txt")).unwrap(), "alpha");
    assert!(temp.path().join("a.txt").exists());
}

#[test]
fn test_copy_refuses_existing_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "new").unwrap();
    fs::create_dir(temp.path().join("dest")).unwrap();
    fs::write(temp.path().join("dest").join("a.txt"), "old").unwrap();

    let mut app = app_in(temp.path());
    run_lines(&mut app, &["copy a.txt dest"]);

    assert_eq!(status(&app), Message::FileExists.to_string());
    assert_eq!(fs::read_to_string(temp.path().join("dest").join("a.txt")).unwrap(), "old");
}

#[test]
fn test_move_file_with_quoted_names() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("my notes.txt"), "n").unwrap();
    fs::create_dir(temp.path().join("old stuff")).unwrap();

    let mut app = app_in(temp.path());
    run_lines(&mut app, &[r#"move "my notes.txt" "old stuff""#]);

    assert_eq!(status(&app), "Success.");
    assert!(!temp.path().join("my notes.txt").exists());
    assert!(temp.path().join("old stuff").join("my notes.txt").exists());
}

#[test]
fn test_directory_copy_and_move() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("A");
    fs::create_dir_all(a.join("sub")).unwrap();
    fs::write(a.join("x.txt"), "x").unwrap();
    fs::write(a.join("sub").join("y.txt"), "y").unwrap();
    fs::create_dir(temp.path().join("backup")).unwrap();
    fs::create_dir(temp.path().join("archive")).unwrap();

    let mut app = app_in(temp.path());
    run_lines(&mut app, &["dcopy A backup"]);
    assert_eq!(status(&app), "Success.");
    assert!(temp.path().join("backup/A/sub/y.txt").exists());
    assert!(a.exists());

    run_lines(&mut app, &["dcopy A backup"]);
    assert_eq!(status(&app), Message::DirExists.to_string());

    run_lines(&mut app, &["dmove A archive"]);
    assert_eq!(status(&app), "Success.");
    assert!(temp.path().join("archive/A/x.txt").exists());
    assert!(!a.exists());
}

#[test]
fn test_destructive_directory_commands_refuse_dot_arguments() {
    let temp = TempDir::new().unwrap();
    let sub = temp.path().join("sub");
    fs::create_dir(&sub).unwrap();

    let mut app = app_in(&sub);
    run_lines(&mut app, &["ddel .."]);
    assert_eq!(status(&app), Message::WrongPath.to_string());
    run_lines(&mut app, &["dmove . /tmp"]);
    assert_eq!(status(&app), Message::WrongPath.to_string());
    assert!(sub.exists());
}

#[test]
fn test_dot_guard_sees_past_leading_flags() {
    let temp = TempDir::new().unwrap();
    let parent = temp.path().join("parent");
    let sub = parent.join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(parent.join("precious.txt"), "keep").unwrap();

    let mut app = app_in(&sub);
    for line in ["ddel -p 1 ..", "ddel -l 3 ./..", "dmove -l 2 . elsewhere", "dcopy -p 1 sub .."] {
        run_lines(&mut app, &[line]);
        assert_eq!(status(&app), Message::WrongPath.to_string(), "{line}");
    }

    assert!(sub.exists());
    assert_eq!(fs::read_to_string(parent.join("precious.txt")).unwrap(), "keep");
    assert_eq!(app.current_dir(), sub);
}

#[test]
fn test_flags_do_not_count_as_path_arguments() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();

    let mut app = app_in(temp.path());
    run_lines(&mut app, &["copy -p 2 a.txt"]);
    assert_eq!(status(&app), Message::WrongArguments.to_string());
    run_lines(&mut app, &["ddel -l 3"]);
    assert_eq!(status(&app), Message::WrongArguments.to_string());
    assert!(temp.path().exists());
}

#[test]
fn test_exit_keeps_last_message() {
    let temp = TempDir::new().unwrap();
    let mut app = app_in(temp.path());

    let mut keys = ScriptedKeys::default();
    keys.type_line("format c:");
    keys.type_line("exit");
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
    app.run(&mut terminal, &mut keys).unwrap();

    assert!(!app.is_running());
    assert_eq!(keys.remaining(), 0);
    assert_eq!(status(&app), Message::WrongCommand.to_string());
}

#[test]
fn test_deleting_current_directory_moves_up() {
    let temp = TempDir::new().unwrap();
    let doomed = temp.path().join("doomed");
    fs::create_dir_all(doomed.join("inner")).unwrap();
    fs::write(doomed.join("inner").join("f"), "f").unwrap();

    let mut app = app_in(&doomed);
    let command = format!(r#"ddel "{}""#, doomed.display());
    run_lines(&mut app, &[&command]);

    assert_eq!(status(&app), "Success.");
    assert!(!doomed.exists());
    assert_eq!(app.current_dir(), temp.path());
}

#[test]
fn test_delete_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("junk"), "j").unwrap();

    let mut app = app_in(temp.path());
    run_lines(&mut app, &["del junk"]);
    assert_eq!(status(&app), "Success.");
    assert!(!temp.path().join("junk").exists());

    run_lines(&mut app, &["del junk"]);
    assert_eq!(status(&app), Message::WrongSourcePath.to_string());
}

#[test]
fn test_bad_input_messages() {
    let temp = TempDir::new().unwrap();
    let mut app = app_in(temp.path());

    run_lines(&mut app, &["format c:"]);
    assert_eq!(status(&app), Message::WrongCommand.to_string());
    run_lines(&mut app, &["copy onlyone"]);
    assert_eq!(status(&app), Message::WrongArguments.to_string());
    run_lines(&mut app, &["info missing.txt"]);
    assert_eq!(status(&app), Message::WrongPath.to_string());
}

#[test]
fn test_help_and_version() {
    let temp = TempDir::new().unwrap();
    let mut app = app_in(temp.path());

    let mut keys = ScriptedKeys::default();
    keys.type_line("help").push(InputEvent::char('q'));
    keys.type_line("version");
    run_keys(&mut app, keys, 100, 30);

    let help = app.pane_lines(Area::DirList).unwrap();
    assert_eq!(help.header().plain_text(), "List of commands");
    assert!(status(&app).starts_with("Version: "));
}

#[test]
fn test_log_command_shows_file() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("vfm.log");
    fs::write(&log, "first entry\nsecond entry\n").unwrap();

    let mut settings = Settings::default();
    settings.last_path = temp.path().to_path_buf();
    let mut app = App::new(TuiConfig::new(settings).with_log_path(&log));
    run_lines(&mut app, &["log"]);

    let lines = app.pane_lines(Area::DirList).unwrap().plain_lines();
    assert_eq!(lines, vec!["Log file contents:", "first entry", "second entry"]);
}

#[test]
fn test_files_pager_remembers_page() {
    let temp = TempDir::new().unwrap();
    for i in 0..30 {
        fs::write(temp.path().join(format!("file{i:02}")), "").unwrap();
    }

    let mut app = app_in(temp.path());
    let mut keys = ScriptedKeys::default();
    keys.type_line("files -p 2")
        .push(InputEvent::key(KeyCode::PageDown))
        .push(InputEvent::key(KeyCode::Esc));
    // 40 rows leave the file pane 10 rows: 8 files per page, 4 pages.
    let terminal = run_keys(&mut app, keys, 100, 40);

    assert!(screen_text(&terminal).contains(" page 3 from 4 "));
}

#[test]
fn test_frame_is_drawn() {
    let temp = TempDir::new().unwrap();
    let mut app = app_in(temp.path());
    let terminal = run_lines(&mut app, &[]);

    let text = screen_text(&terminal);
    let first_row = text.lines().next().unwrap();
    assert!(first_row.starts_with('╔'));
    assert!(first_row.contains(" vfm "));
    assert!(text.contains(":>exit"));
}

#[test]
fn test_small_terminal_shows_notice() {
    let temp = TempDir::new().unwrap();
    let mut app = app_in(temp.path());
    let terminal = run_keys(&mut app, ScriptedKeys::default(), 40, 10);
    assert!(screen_text(&terminal).starts_with("The window is too small."));
}

#[test]
fn test_ctrl_c_quits() {
    let temp = TempDir::new().unwrap();
    let mut app = app_in(temp.path());
    let mut keys = ScriptedKeys::new([InputEvent::Key(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
    ))]);
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();

    app.run(&mut terminal, &mut keys).unwrap();
    assert!(!app.is_running());
}
