//! Terminal chat client hosting the parlor games.
//!
//! Chat goes to the configured backend; typing a game's trigger word
//! ("tic tac toe", "othello", ...) opens that game in place, and typing it
//! again returns to chat.

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use parlor_cli::bench;
use parlor_cli::chat::{Conversation, OfflineBackend};
use parlor_cli::router::{route, GameKind, Mode, Route};
use parlor_cli::session::{EngineEvent, Session};
use parlor_core::{Game, Outcome, Side};
use parlor_othello::Othello;
use parlor_tictactoe::{state::DEFAULT_MOVE_LIMIT, EngineConfig, TicTacToe};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

/// Chat with a scripted companion and play board games against it.
#[derive(Parser)]
#[command(name = "parlor")]
#[command(about = "Terminal chat client with built-in tic-tac-toe and Othello")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Pause before each opponent move, in milliseconds.
    #[arg(long, global = true, default_value = "600")]
    delay_ms: u64,

    /// Model identifier sent with every chat request.
    #[arg(long, global = true, default_value = "offline")]
    model: String,

    /// Half-moves after which an undecided tic-tac-toe game is a draw.
    #[arg(long, global = true, default_value_t = DEFAULT_MOVE_LIMIT)]
    move_limit: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the chat shell (the default).
    Chat,

    /// Jump straight into a game and exit when it ends.
    Play {
        game: GameKind,

        /// Random seed for the engine (random if omitted).
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Pit the engine against a random mover.
    Bench {
        game: GameKind,

        /// Number of games to play.
        #[arg(short, long, default_value = "100")]
        games: usize,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Shell-wide settings taken from the command line.
#[derive(Clone, Debug)]
struct Settings {
    delay: Duration,
    model: String,
    move_limit: u32,
}

impl Settings {
    fn tictactoe(&self) -> TicTacToe {
        TicTacToe::new(EngineConfig::with_move_limit(self.move_limit))
    }
}

/// The game currently open in the shell.
enum ActiveGame {
    TicTacToe(Session<TicTacToe, ChaCha8Rng>),
    Othello(Session<Othello, ChaCha8Rng>),
}

impl ActiveGame {
    fn open(kind: GameKind, settings: &Settings, seed: u64) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        match kind {
            GameKind::Tictactoe => {
                ActiveGame::TicTacToe(Session::new(settings.tictactoe(), rng, settings.delay))
            }
            GameKind::Othello => {
                ActiveGame::Othello(Session::new(Othello::default(), rng, settings.delay))
            }
        }
    }

    fn show(&self) {
        match self {
            ActiveGame::TicTacToe(s) => println!("{}", s.state()),
            ActiveGame::Othello(s) => println!("{}", s.state()),
        }
    }

    /// Play one human turn plus the engine's answer. Returns true once the
    /// game is finished.
    fn take_turn(&mut self, input: &str) -> bool {
        match self {
            ActiveGame::TicTacToe(s) => take_turn(s, input),
            ActiveGame::Othello(s) => take_turn(s, input),
        }
    }
}

fn take_turn<G: Game>(session: &mut Session<G, ChaCha8Rng>, input: &str) -> bool {
    match session.play_human(input) {
        Ok(action) => println!("You played {}.", action),
        Err(err) => {
            println!("✗ {}", err);
            return false;
        }
    }
    println!("{}", session.state());

    if session.engine_pending() {
        println!("Opponent is thinking...");
        let events = session.engine_reply();
        for event in &events {
            match event {
                EngineEvent::Moved(action) => println!("Opponent played {}.", action),
                EngineEvent::Passed(Side::Player) => println!("You have no legal move and pass."),
                EngineEvent::Passed(Side::Opponent) => println!("Opponent has no legal move and passes."),
            }
        }
        if !events.is_empty() {
            println!("{}", session.state());
        }
    }

    match session.outcome() {
        Some(outcome) => {
            println!("{}", outcome_message(outcome));
            true
        }
        None => false,
    }
}

fn outcome_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Won(Side::Player) => "You win! 🎉",
        Outcome::Won(Side::Opponent) => "The opponent wins this one.",
        Outcome::Draw => "It's a draw.",
    }
}

fn game_intro(kind: GameKind) -> &'static str {
    match kind {
        GameKind::Tictactoe => {
            "Tic-tac-toe, three marks each: your fourth mark replaces your oldest. \
             You are X; enter a cell number 0-8."
        }
        GameKind::Othello => {
            "Othello on a 6x6 board. You are Black (●) and move first; \
             enter a square like c2 or \"1 2\"."
        }
    }
}

/// Read-eval-print loop over stdin.
struct Shell {
    settings: Settings,
    conversation: Conversation,
    backend: OfflineBackend,
    mode: Mode,
    active: Option<ActiveGame>,
    games_played: u64,
    base_seed: u64,
}

impl Shell {
    fn new(settings: Settings, base_seed: u64) -> Self {
        let conversation = Conversation::new(settings.model.clone());
        Self {
            settings,
            conversation,
            backend: OfflineBackend,
            mode: Mode::Chat,
            active: None,
            games_played: 0,
            base_seed,
        }
    }

    fn start_game(&mut self, kind: GameKind) {
        let seed = self.base_seed.wrapping_add(self.games_played * 1000);
        self.games_played += 1;
        let game = ActiveGame::open(kind, &self.settings, seed);
        println!("{}", game_intro(kind));
        game.show();
        self.active = Some(game);
        self.mode = Mode::Playing(kind);
    }

    fn stop_game(&mut self, kind: GameKind) {
        tracing::info!(game = %kind, "game closed");
        self.active = None;
        self.mode = Mode::Chat;
    }

    /// Handle one line. Returns false when the shell should exit.
    fn handle(&mut self, line: &str, exit_after_game: bool) -> bool {
        let trimmed = line.trim();
        if matches!(trimmed, "quit" | "exit") {
            return false;
        }
        match route(trimmed, self.mode) {
            Route::Empty => {}
            Route::Start(kind) => self.start_game(kind),
            Route::Stop(kind) => {
                println!("Leaving {}. Back to chat.", kind);
                self.stop_game(kind);
                return !exit_after_game;
            }
            Route::Chat(text) => {
                let response = self.conversation.respond(&self.backend, &text);
                println!("{}", response.reply);
            }
            Route::Move(text) => {
                let finished = self
                    .active
                    .as_mut()
                    .map_or(false, |game| game.take_turn(&text));
                if finished {
                    if let Mode::Playing(kind) = self.mode {
                        self.stop_game(kind);
                    }
                    if exit_after_game {
                        return false;
                    }
                    println!("Back to chat. Type a game's name to play again.");
                }
            }
        }
        true
    }

    fn run(&mut self, exit_after_game: bool) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut lines = stdin.lock().lines();
        loop {
            let prompt = match self.mode {
                Mode::Chat => "you> ".to_string(),
                Mode::Playing(kind) => format!("{}> ", kind),
            };
            write!(stdout, "{}", prompt).context("Failed to write prompt")?;
            stdout.flush().context("Failed to flush stdout")?;

            let Some(line) = lines.next() else {
                println!();
                break;
            };
            let line = line.context("Failed to read from stdin")?;
            if !self.handle(&line, exit_after_game) {
                break;
            }
        }
        Ok(())
    }
}

fn cmd_chat(settings: Settings) -> Result<()> {
    println!("parlor chat (model: {}). Say hi, or type \"tic tac toe\" or \"othello\" to play.", settings.model);
    println!("Type \"quit\" to exit.");
    Shell::new(settings, rand::random()).run(false)
}

fn cmd_play(settings: Settings, game: GameKind, seed: Option<u64>) -> Result<()> {
    let mut shell = Shell::new(settings, seed.unwrap_or_else(rand::random::<u64>));
    shell.start_game(game);
    shell.run(true)
}

fn cmd_bench(settings: Settings, game: GameKind, games: usize, seed: u64, json: bool) -> Result<()> {
    let start = Instant::now();
    let report = match game {
        GameKind::Tictactoe => bench::run(&settings.tictactoe(), games, seed),
        GameKind::Othello => bench::run(&Othello::default(), games, seed),
    };
    let elapsed = start.elapsed();
    tracing::info!(game = %game, games, seed, elapsed_ms = elapsed.as_millis() as u64, "bench finished");

    if json {
        let text = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", text);
        return Ok(());
    }

    println!("{}: engine vs random, {} games (seed {})", game, report.games, seed);
    println!("================================================");
    println!("Engine wins:  {}", report.engine_wins);
    println!("Random wins:  {}", report.random_wins);
    println!("Draws:        {}", report.draws);
    if report.unfinished > 0 {
        println!("Unfinished:   {}", report.unfinished);
    }
    println!("Engine win rate: {:.1}%", report.engine_win_rate() * 100.0);
    println!("Average game length: {:.1} plies", report.average_plies());
    println!("Completed in {:.2}s", elapsed.as_secs_f64());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings {
        delay: Duration::from_millis(cli.delay_ms),
        model: cli.model,
        move_limit: cli.move_limit,
    };

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => cmd_chat(settings),
        Commands::Play { game, seed } => cmd_play(settings, game, seed),
        Commands::Bench {
            game,
            games,
            seed,
            json,
        } => cmd_bench(settings, game, games, seed, json),
    }
}
