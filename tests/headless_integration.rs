use std::sync::mpsc;
use std::time::Duration;

use codetype::app::{App, AppState};
use codetype::config::Config;
use codetype::language::LanguageId;
use codetype::practice::Practice;
use codetype::project::{Project, ProjectFile};
use codetype::runtime::{AppEvent, ChannelEventSource, FixedTicker, Runner};
use codetype::session::Phase;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn send_text(tx: &mpsc::Sender<AppEvent>, text: &str) {
    for c in text.chars() {
        let code = match c {
            '\n' => KeyCode::Enter,
            '\t' => KeyCode::Tab,
            c => KeyCode::Char(c),
        };
        tx.send(key(code)).unwrap();
    }
}

fn app(files: Vec<ProjectFile>, config: Config) -> App {
    let practice =
        Practice::new(Project::from_files("demo", files)).with_auto_advance(config.auto_advance);
    App::new(practice, config)
}

/// Drive the app until the channel runs dry (a tick) or it quits.
fn drain<E, T>(runner: &Runner<E, T>, app: &mut App)
where
    E: codetype::runtime::EventSource,
    T: codetype::runtime::Ticker,
{
    for _ in 0..1000u32 {
        match runner.step() {
            AppEvent::Tick => break,
            AppEvent::Resize => {}
            AppEvent::Key(k) => {
                app.on_key(k);
                if app.should_quit {
                    break;
                }
            }
        }
    }
}

// Verifies that a minimal typing flow completes via Runner/ChannelEventSource.
#[test]
fn headless_typing_flow_completes() {
    let mut app = app(
        vec![ProjectFile::new(
            "main.rs",
            LanguageId::Rust,
            "// entry point\nfn main() {\n    run();\n}\n",
        )],
        Config::default(),
    );

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        ChannelEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    tx.send(key(KeyCode::Enter)).unwrap();
    // indentation after each newline is skipped for the typist
    send_text(&tx, "fn main() {\nrun();\n}");
    drain(&runner, &mut app);

    assert_eq!(app.state, AppState::Typing);
    assert_eq!(app.practice.session().phase(), Phase::Completed);
    let banner = app.banner().expect("completion banner");
    assert!(banner.file_completed);
    assert_eq!(banner.statistics.errors, 0);
    assert_eq!(banner.statistics.accuracy, 100);
}

#[test]
fn headless_stop_on_error_flow() {
    let config = Config {
        stop_on_error: true,
        ..Config::default()
    };
    let mut app = app(
        vec![ProjectFile::new("a.py", LanguageId::Python, "ab")],
        config,
    );
    app.open_file(0);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        ChannelEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    send_text(&tx, "x");
    drain(&runner, &mut app);
    assert_eq!(app.practice.session().state().cursor, 0);

    send_text(&tx, "ab");
    drain(&runner, &mut app);
    let stats = app.practice.statistics();
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.accuracy, 67);
    assert_eq!(app.practice.session().phase(), Phase::Completed);
}

#[test]
fn headless_auto_advance_walks_sections() {
    let body: String = (0..60).map(|i| format!("n{i};\n")).collect();
    let config = Config {
        auto_advance: true,
        ..Config::default()
    };
    let mut app = app(
        vec![ProjectFile::new("notes.txt", LanguageId::PlainText, &body)],
        config,
    );
    app.open_file(0);
    assert_eq!(app.practice.chunk_count(), 2);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        ChannelEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    let first = app.practice.current_chunk().unwrap().content.clone();
    send_text(&tx, &first);
    drain(&runner, &mut app);
    assert!(app.banner().is_some());

    // any key leaves the banner and opens the next section
    send_text(&tx, " ");
    drain(&runner, &mut app);
    assert_eq!(app.practice.chunk_index(), 1);
    assert!(app.banner().is_none());

    let second = app.practice.current_chunk().unwrap().content.clone();
    send_text(&tx, &second);
    drain(&runner, &mut app);
    assert!(app.banner().unwrap().file_completed);
    assert_eq!(app.practice.project().completed_files(), 1);
}

#[test]
fn headless_idle_runner_ticks() {
    let (_tx, rx) = mpsc::channel::<AppEvent>();
    let runner = Runner::new(
        ChannelEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );
    for _ in 0..3 {
        assert!(matches!(runner.step(), AppEvent::Tick));
    }
}
