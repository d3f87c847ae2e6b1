//! Word Shift - CLI
//!
//! Terminal word-unscrambling game, with a headless simulator and an
//! automatic solver.

use anyhow::{Context, Result, ensure};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::path::{Path, PathBuf};
use word_shift::{
    commands::{SimulationConfig, SolveConfig, run_simulation, solve_word},
    game::{GameConfig, GameSession, OfflinePlatform},
    output::{print_catalog_summary, print_simulation_result, print_solve_result},
    solver::StrategyType,
    storage::{JsonFileStore, default_high_score_path},
    wordlists::{WordCatalog, loader::load_from_file},
};

#[derive(Parser)]
#[command(
    name = "word_shift",
    about = "Word Shift: unscramble the letters before the clock runs out",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Wordlist: 'embedded' (default) or path to a file with one word per line
    #[arg(short = 'w', long, global = true, default_value = "embedded")]
    wordlist: String,

    /// Seconds on the clock at the start of a game
    #[arg(long, global = true, default_value_t = 60.0)]
    starting_time: f64,

    /// Seconds added for each completed level
    #[arg(long, global = true, default_value_t = 10.0)]
    time_bonus: f64,

    /// Seconds taken for each hint
    #[arg(long, global = true, default_value_t = 15.0)]
    hint_penalty: f64,

    /// Levels between word length increases
    #[arg(long, global = true, default_value_t = 5)]
    words_per_level: u32,

    /// Word length at level 1 (4-8)
    #[arg(long, global = true, default_value_t = 4)]
    start_word_length: usize,

    /// Random seed (default: from the OS; 0 for simulations)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Autoplay strategy for simulate/solve: insertion (default) or hint
    #[arg(short, long, global = true, default_value = "insertion")]
    strategy: String,

    /// High score file (default: user data dir)
    #[arg(long, global = true)]
    high_score_file: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Disable the terminal bell
    #[arg(long, global = true)]
    mute: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in the terminal (default)
    Play,

    /// Auto-play many games and report the levels reached
    Simulate {
        /// Number of games
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,

        /// Autoplayer speed in actions per second
        #[arg(long, default_value_t = 2.0)]
        moves_per_second: f64,

        /// Stop a game once it reaches this level
        #[arg(long, default_value_t = 25)]
        max_level: u32,
    },

    /// Unscramble a word step by step
    Solve {
        /// The target word
        word: String,

        /// Starting arrangement (default: random scramble)
        #[arg(long)]
        scramble: Option<String>,

        /// Show newly correct tiles per step
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show how many words of each length are available
    Words,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let config = GameConfig {
            starting_time: self.starting_time,
            time_bonus: self.time_bonus,
            hint_penalty: self.hint_penalty,
            words_per_level: self.words_per_level,
            start_word_length: self.start_word_length,
        };
        config.validate()?;
        Ok(config)
    }

    fn rng(&self) -> StdRng {
        self.seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
    }
}

/// Set up `env_logger`
///
/// Logs go to `log_file` when given. Without one the TUI runs without logging,
/// since stderr output would corrupt the screen.
fn init_logging(log_file: Option<&Path>, tui: bool) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if tui => return Ok(()),
        None => {}
    }
    builder.init();
    Ok(())
}

/// Load the word catalog based on the -w flag
fn load_catalog(wordlist: &str) -> Result<WordCatalog> {
    let catalog = match wordlist {
        "embedded" => WordCatalog::embedded(),
        path => {
            let words = load_from_file(path)
                .with_context(|| format!("cannot read word list {path}"))?;
            WordCatalog::from_parsed(words)
        }
    };
    ensure!(!catalog.is_empty(), "word list '{wordlist}' has no usable words");

    let missing = catalog.missing_lengths();
    if !missing.is_empty() {
        log::warn!("no words of length {missing:?}; games end when they reach them");
    }
    log::info!("loaded {} words", catalog.len());
    Ok(catalog)
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.take().unwrap_or(Commands::Play);
    init_logging(cli.log_file.as_deref(), matches!(command, Commands::Play))?;

    let catalog = load_catalog(&cli.wordlist)?;

    match command {
        Commands::Play => run_play_command(&cli, &catalog),
        Commands::Simulate {
            count,
            moves_per_second,
            max_level,
        } => run_simulate_command(&cli, &catalog, count, moves_per_second, max_level),
        Commands::Solve {
            word,
            scramble,
            verbose,
        } => run_solve_command(&cli, word, scramble, verbose),
        Commands::Words => {
            print_catalog_summary(&catalog);
            Ok(())
        }
    }
}

fn run_play_command(cli: &Cli, catalog: &WordCatalog) -> Result<()> {
    use word_shift::interactive::{App, run_tui};

    let path = cli
        .high_score_file
        .clone()
        .unwrap_or_else(default_high_score_path);
    log::info!("high score file: {}", path.display());

    let session = GameSession::new(
        catalog,
        cli.game_config()?,
        OfflinePlatform::new(!cli.mute),
        Box::new(JsonFileStore::new(path)),
        cli.rng(),
    )?;
    run_tui(App::new(session))
}

fn run_simulate_command(
    cli: &Cli,
    catalog: &WordCatalog,
    count: usize,
    moves_per_second: f64,
    max_level: u32,
) -> Result<()> {
    ensure!(
        moves_per_second.is_finite() && moves_per_second > 0.0,
        "moves per second must be a positive number, got {moves_per_second}"
    );
    ensure!(max_level >= 2, "max level must be at least 2");

    let strategy = StrategyType::from_name(&cli.strategy);
    let config = SimulationConfig {
        games: count,
        seed: cli.seed.unwrap_or(0),
        moves_per_second,
        max_level,
        show_progress: true,
    };

    println!(
        "Simulating {count} games ({} strategy, {moves_per_second} moves/s)...",
        strategy.name()
    );
    let result = run_simulation(catalog, cli.game_config()?, &config, &strategy);
    print_simulation_result(&result, strategy.name());
    Ok(())
}

fn run_solve_command(
    cli: &Cli,
    word: String,
    scramble: Option<String>,
    verbose: bool,
) -> Result<()> {
    let strategy = StrategyType::from_name(&cli.strategy);
    let mut config = SolveConfig::new(word);
    config.scramble = scramble;

    let mut rng = cli.rng();
    let result = solve_word(config, &strategy, &mut rng).map_err(|e| anyhow::anyhow!(e))?;
    print_solve_result(&result, verbose);
    Ok(())
}
