use clap::{error::ErrorKind, CommandFactory, Parser};
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
    fs::OpenOptions,
    io::{self, stdin},
    path::PathBuf,
    sync::Arc,
};
use stride::{
    app::{App, KeyOutcome},
    app_dirs::AppDirs,
    config::{ConfigStore, FileConfigStore},
    cues::{Announcer, BellOutput, CueOutput},
    form::WorkoutForm,
    runtime::{CrosstermEventSource, FixedTicker, Runner, TimerEvent, TimerEventSource, Ticker},
};
use tracing_subscriber::EnvFilter;

/// run/walk interval timer with audible phase cues
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Counts down alternating RUN and WALK phases for a set number of repetitions, with audible cues for phase changes and the last seconds of each phase."
)]
pub struct Cli {
    /// seconds to run in each repetition
    #[clap(short = 'r', long, value_parser = clap::value_parser!(u32).range(1..))]
    run: Option<u32>,

    /// seconds to walk in each repetition
    #[clap(short = 'w', long, value_parser = clap::value_parser!(u32).range(1..))]
    walk: Option<u32>,

    /// number of repetitions
    #[clap(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    repetitions: Option<u32>,

    /// start with sound disabled
    #[clap(long)]
    mute: bool,

    /// start the workout immediately if all values are known
    #[clap(long)]
    autostart: bool,

    /// where to write logs (filtered by RUST_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: Option<PathBuf>) {
    let Some(path) = path.or_else(AppDirs::log_path) else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging(cli.log_file.clone());

    let store = FileConfigStore::new();
    let prefs = store.load();
    let form = WorkoutForm::prefilled(
        cli.run.or(prefs.run_secs),
        cli.walk.or(prefs.walk_secs),
        cli.repetitions.or(prefs.repetitions),
    );
    let announcer = Announcer::new(BellOutput::stdout(), prefs.sound_enabled && !cli.mute);
    let mut app = App::new(form, announcer, Box::new(store));

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    if cli.autostart {
        app.toggle_running();
        runner.restart_period();
    }

    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, O: CueOutput, E: TimerEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App<O>,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            TimerEvent::Tick => app.on_tick(),
            TimerEvent::Resize => {}
            TimerEvent::Key(key) => match app.on_key(key) {
                KeyOutcome::Quit => break,
                KeyOutcome::ClockStarted => runner.restart_period(),
                KeyOutcome::Handled => {}
            },
        }
    }

    Ok(())
}
