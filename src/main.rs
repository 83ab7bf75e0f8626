use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{info, warn};
use minutype::{
    app::{App, Control},
    config::{Config, ConfigStore, FileConfigStore},
    language::Vocabulary,
    logging,
    runtime::{CrosstermEventSource, EventSource, Runner},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, SystemTime},
};

/// How long the loop waits for an event before redrawing anyway
const POLL_INTERVAL_MS: u64 = 250;

/// sixty-second typing speed test
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A sixty-second typing test: type each word and press space, with live WPM, accuracy and net WPM."
)]
pub struct Cli {
    /// countdown refresh interval in milliseconds
    #[clap(long, value_parser = clap::value_parser!(u64).range(50..=1000))]
    countdown_ms: Option<u64>,

    /// stats refresh interval in milliseconds
    #[clap(long, value_parser = clap::value_parser!(u64).range(50..=1000))]
    stats_ms: Option<u64>,

    /// write the log here instead of the default state directory
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// store the given intervals as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Flags take precedence over the stored config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(ms) = self.countdown_ms {
            config.countdown_interval_ms = ms;
        }
        if let Some(ms) = self.stats_ms {
            config.stats_interval_ms = ms;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Err(e) = logging::init(cli.log_file.clone()) {
        eprintln!("logging disabled: {e}");
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!("saved config to {}", store.path().display());
    }

    let vocabulary = Vocabulary::english()?;

    let result = scoped(enable_raw_mode, disable_raw_mode, || {
        scoped(
            || execute!(io::stdout(), EnterAlternateScreen),
            || execute!(io::stdout(), LeaveAlternateScreen, Show),
            || run(vocabulary, config),
        )
    });

    if let Err(e) = &result {
        warn!("exiting after error: {e}");
    }
    result
}

/// Run `body` between `enter` and `leave`. `leave` runs whenever `enter`
/// succeeded, even if `body` failed; the body's error wins over leave's.
fn scoped<T>(
    enter: impl FnOnce() -> io::Result<()>,
    leave: impl FnOnce() -> io::Result<()>,
    body: impl FnOnce() -> Result<T, Box<dyn Error>>,
) -> Result<T, Box<dyn Error>> {
    enter()?;
    let result = body();
    let restored = leave();
    let value = result?;
    restored?;
    Ok(value)
}

fn run(vocabulary: Vocabulary, config: Config) -> Result<(), Box<dyn Error>> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(POLL_INTERVAL_MS),
    );
    let mut app = App::new(vocabulary, config, runner.timer_sender());
    let result = start_tui(&mut terminal, &mut app, &runner);
    app.shutdown();
    result
}

fn start_tui<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        if let Some(event) = runner.step() {
            if app.handle_event(event, SystemTime::now()) == Control::Quit {
                break;
            }
        }
    }

    Ok(())
}
