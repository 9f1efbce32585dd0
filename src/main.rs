mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
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
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use steadykeys::{
    app_dirs::AppDirs,
    best_score::{BestScore, BestScoreStore, FileBestScoreStore},
    config::{ConfigStore, FileConfigStore},
    runtime::{dispatch, Control, CrosstermEventSource, FixedTicker, FrameClock, Runner},
    telemetry,
    travel::format_distance,
    Config, TypingSession,
};
use tracing::{debug, info, warn};

/// keep your focus from crumbling one keystroke at a time
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "An endless typing game. Correct keystrokes shore up your stability, mistakes and idling drain it, and the steadier you stay the farther you travel."
)]
pub struct Cli {
    /// new words come from the easy list while stability is below this value
    #[clap(long)]
    easy_threshold: Option<f64>,

    /// stability at or below which Focus Burst streaks can build
    #[clap(long)]
    low_zone: Option<f64>,

    /// stability at session start
    #[clap(long)]
    initial_stability: Option<f64>,

    /// milliseconds between simulation ticks
    #[clap(short = 't', long)]
    tick_ms: Option<u64>,

    /// discard the saved configuration and start from defaults
    #[clap(long)]
    reset_config: bool,

    /// write logs here instead of the state directory
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// raise log verbosity (-v debug, -vv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Layer command line overrides on top of the stored configuration
    fn apply(&self, mut config: Config) -> Config {
        if let Some(v) = self.easy_threshold {
            config.stability.easy_tier_below = v;
        }
        if let Some(v) = self.low_zone {
            config.combo.low_zone_at_or_below = v;
        }
        if let Some(v) = self.initial_stability {
            config.stability.initial = v;
        }
        if let Some(v) = self.tick_ms {
            config.tick_ms = v;
        }
        config
    }
}

#[derive(Debug)]
pub struct App {
    pub session: TypingSession,
    pub best: Option<BestScore>,
}

impl App {
    pub fn new(config: Config, best: Option<BestScore>) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            session: TypingSession::with_embedded_words(config)?,
            best,
        })
    }

    fn final_score(&self) -> BestScore {
        BestScore::new(
            self.session.travel().distance_km(),
            self.session.statistics().words_completed,
        )
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        if let Err(err) = telemetry::init(cli.verbose, &path) {
            eprintln!("logging disabled: {err}");
        }
    }

    let config_store = FileConfigStore::new();
    let base = if cli.reset_config {
        Config::default()
    } else {
        config_store.load()
    };
    let config = cli.apply(base);
    if let Err(err) = config.validate() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, err).exit();
    }
    if let Err(err) = config_store.save(&config) {
        warn!(%err, "could not save configuration");
    }

    let score_store = FileBestScoreStore::new();
    let mut app = App::new(config, score_store.load())?;
    info!(word = app.session.current_word(), "session started");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result?;

    let score = app.final_score();
    let stats = app.session.statistics();
    info!(
        distance_km = score.distance_km,
        words = stats.words_completed,
        mistakes = stats.total_mistakes,
        "session ended"
    );
    println!(
        "{} travelled, {} words, {:.0} wpm, {:.0}% accuracy",
        format_distance(score.distance_km),
        stats.words_completed,
        stats.words_per_minute(),
        stats.accuracy()
    );
    match score_store.record(&score) {
        Ok(true) => println!("new best distance!"),
        Ok(false) => {}
        Err(err) => warn!(%err, "could not save best score"),
    }

    Ok(())
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let tick = Duration::from_millis(app.session.config().tick_ms);
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::new(tick));
    let mut clock = FrameClock::start();

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        let event = runner.step();
        if dispatch(&mut app.session, event, &mut clock) == Control::Quit {
            break;
        }

        for event in app.session.drain_feedback() {
            debug!(
                kind = %event.kind,
                stability = event.payload.stability,
                character = ?event.payload.character,
                message = event.payload.message,
                "feedback"
            );
        }
    }

    Ok(())
}
