mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
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
    sync::Arc,
    time::Instant,
};
use tracing::{debug, info, warn};
use typestrike::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{key_input, CrosstermEventSource, FixedTicker, GameEvent, GameEventSource, Runner},
    share,
    words::{BundledWordProvider, HttpWordProvider, PendingWords, StaticWordProvider, WordProvider},
    world::Arena,
    FinalStats, Game, SessionPhase,
};

use crate::ui::starfield::Starfield;

/// arcade typing tui: type the words on incoming targets before they reach your base
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Words drift toward your base at the bottom of the screen. Type a word to destroy its carrier; three hits on the base end the session. The game speeds up and fills the sky as time goes on."
)]
pub struct Cli {
    /// number of words to request for the word pool
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,

    /// url of a remote word list answering with a JSON array of strings
    #[clap(long)]
    word_source: Option<String>,

    /// use the bundled word list instead of fetching one
    #[clap(long)]
    offline: bool,

    /// comma separated words to play with, bypassing any word source
    #[clap(long, value_delimiter = ',')]
    word_list: Option<Vec<String>>,

    /// frames per second of the simulation
    #[clap(long)]
    fps: Option<u32>,

    /// width of the playfield in world units
    #[clap(long, value_parser = positive_size)]
    width: Option<f64>,

    /// height of the playfield in world units
    #[clap(long, value_parser = positive_size)]
    height: Option<f64>,

    /// seed for a reproducible session
    #[clap(long)]
    seed: Option<u64>,

    /// store the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

fn positive_size(arg: &str) -> Result<f64, String> {
    let size: f64 = arg.parse().map_err(|e| format!("{e}"))?;
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err(format!("{arg} is not a positive size"))
    }
}

impl Cli {
    /// Flags take precedence over the stored config
    fn merge(&self, cfg: Config) -> Config {
        Config {
            number_of_words: self.number_of_words.unwrap_or(cfg.number_of_words),
            word_source_url: self.word_source.clone().unwrap_or(cfg.word_source_url),
            offline: self.offline || cfg.offline,
            fps: self.fps.unwrap_or(cfg.fps),
            arena_width: self.width.unwrap_or(cfg.arena_width),
            arena_height: self.height.unwrap_or(cfg.arena_height),
        }
    }

    fn word_provider(&self, settings: &Config) -> Arc<dyn WordProvider> {
        if let Some(ref words) = self.word_list {
            Arc::new(StaticWordProvider(words.clone()))
        } else if settings.offline {
            Arc::new(BundledWordProvider::default())
        } else {
            Arc::new(HttpWordProvider::new(settings.word_source_url.clone()))
        }
    }
}

pub struct App {
    pub game: Game,
    pub settings: Config,
    pub provider: Arc<dyn WordProvider>,
    pub pending: Option<PendingWords>,
    pub summary: Option<FinalStats>,
    pub starfield: Starfield,
    epoch: Instant,
}

impl App {
    pub fn new(settings: Config, provider: Arc<dyn WordProvider>, seed: Option<u64>) -> Self {
        let arena = Arena::new(settings.arena_width, settings.arena_height);

        Self {
            game: Game::new(arena, seed),
            starfield: Starfield::new(&arena),
            settings,
            provider,
            pending: None,
            summary: None,
            epoch: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// Start and restart both refetch the pool; the session begins once it arrives
    pub fn request_start(&mut self) {
        info!(source = %self.provider.describe(), "Fetching word pool");
        self.summary = None;
        self.game.begin_loading();
        self.pending = Some(PendingWords::spawn(
            Arc::clone(&self.provider),
            self.settings.number_of_words,
        ));
    }

    fn poll_words(&mut self) {
        let Some(pool) = self.pending.as_ref().and_then(PendingWords::try_take) else {
            return;
        };
        self.pending = None;
        let now = self.now_ms();
        self.game.start(pool, now);
    }

    pub fn on_tick(&mut self) {
        self.starfield.update();

        if self.game.phase() == SessionPhase::Loading {
            self.poll_words();
        }

        let now = self.now_ms();
        let report = self.game.tick(now);
        if report.ended {
            self.summary = self.game.summary(now);
            debug!(summary = ?self.summary, "Final stats");
        }
    }

    /// Returns false when the app should quit
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return false;
        }

        match self.game.phase() {
            SessionPhase::NotStarted => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.request_start();
                }
            }
            SessionPhase::Loading => {}
            SessionPhase::Running => {
                if let Some(input) = key_input(&key) {
                    self.game.key(input);
                }
            }
            SessionPhase::Ended => match key.code {
                KeyCode::Char('r') | KeyCode::Enter => self.request_start(),
                KeyCode::Char('t') => {
                    if let Some(ref summary) = self.summary {
                        share::open_share(summary);
                    }
                }
                _ => {}
            },
        }
        true
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        logging::init_file_logging(&path);
    }

    let store = FileConfigStore::new();
    let settings = cli.merge(store.load());
    if cli.save_config {
        if let Err(error) = store.save(&settings) {
            warn!(%error, path = %store.path().display(), "Could not save config");
        }
    }

    let provider = cli.word_provider(&settings);
    let ticker = FixedTicker::from_fps(settings.fps);
    let mut app = App::new(settings, provider, cli.seed);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new(), ticker);
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: GameEventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui::draw(app, f))?;
    let mut next_frame = Instant::now() + runner.interval();

    loop {
        let now = Instant::now();
        // Keys must not starve the frame clock
        let event = if now >= next_frame {
            GameEvent::Tick
        } else {
            runner.step_within(next_frame - now)
        };

        match event {
            GameEvent::Tick => {
                app.on_tick();
                terminal.draw(|f| ui::draw(app, f))?;
                next_frame = Instant::now() + runner.interval();
            }
            GameEvent::Resize => {
                terminal.draw(|f| ui::draw(app, f))?;
            }
            GameEvent::Key(key) => {
                if !app.on_key(key) {
                    break;
                }
            }
        }
    }

    Ok(())
}
