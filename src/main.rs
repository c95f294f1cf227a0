use clap::{error::ErrorKind, CommandFactory, Parser};
use codetype::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    history::HistoryLog,
    language::LanguageId,
    practice::Practice,
    project::{LoadOptions, Project, DEFAULT_MAX_FILE_BYTES},
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    ui::screen::current_screen,
};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// practice typing on real code, one logical section at a time
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Load a folder of source code, strip the comments, split each file into logical sections and practice typing them with live speed and accuracy stats."
)]
pub struct Cli {
    /// folder to practice with
    #[clap(default_value = ".")]
    path: PathBuf,

    /// only practice files in these languages (repeatable)
    #[clap(short = 'l', long = "language", value_enum)]
    languages: Vec<LanguageId>,

    /// keep the cursor on a mistake until it is typed correctly
    #[clap(short = 's', long)]
    stop_on_error: bool,

    /// hide line numbers
    #[clap(long)]
    no_line_numbers: bool,

    /// columns used to draw a tab
    #[clap(short = 't', long)]
    tab_width: Option<u8>,

    /// move on to the next section with the first key after finishing one
    #[clap(short = 'a', long)]
    auto_advance: bool,

    /// skip files larger than this many bytes
    #[clap(long, default_value_t = DEFAULT_MAX_FILE_BYTES)]
    max_file_bytes: u64,

    /// store the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,

    /// write debug output to the log file
    #[clap(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    /// Flags given on the command line win over stored settings.
    fn apply_to(&self, mut config: Config) -> Config {
        config.stop_on_error |= self.stop_on_error;
        config.auto_advance |= self.auto_advance;
        if self.no_line_numbers {
            config.show_line_numbers = false;
        }
        if let Some(width) = self.tab_width {
            config.tab_width = width;
        }
        config
    }

    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            languages: self.languages.clone(),
            max_file_bytes: self.max_file_bytes,
        }
    }
}

/// Log to a file: the terminal belongs to the TUI.
fn init_logging(verbose: bool) {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = FileConfigStore::new();
    let config = cli.apply_to(store.load());
    config.validate()?;
    if cli.save_config {
        store.save(&config)?;
        log::info!("saved settings to {}", store.path().display());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let project = Project::load(&cli.path, &cli.load_options())?;
    let practice = Practice::new(project).with_auto_advance(config.auto_advance);
    let mut app = App::new(practice, config);
    if let Some(path) = AppDirs::history_path() {
        app = app.with_history(HistoryLog::new(path));
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| current_screen(&app.state).render(app, f))?;

    loop {
        match runner.step() {
            // the clock only moves while a section is being typed
            AppEvent::Tick => {
                if !app.practice.session().state().is_active() {
                    continue;
                }
            }
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                app.on_key(key);
                if app.should_quit {
                    break;
                }
            }
        }
        terminal.draw(|f| current_screen(&app.state).render(app, f))?;
    }

    Ok(())
}
