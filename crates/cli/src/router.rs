//! Lexical routing of terminal input between chat and the games.

use std::fmt;

use clap::ValueEnum;

/// The games the shell can host.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, ValueEnum)]
pub enum GameKind {
    /// Three-mark carry-limit tic-tac-toe
    #[value(alias = "tic-tac-toe", alias = "ttt")]
    Tictactoe,
    /// 6×6 Othello
    #[value(alias = "reversi")]
    Othello,
}

impl GameKind {
    /// Words that toggle this game, compared after trimming and lowercasing.
    pub fn triggers(self) -> &'static [&'static str] {
        match self {
            GameKind::Tictactoe => &["マルバツ", "まるばつ", "tic tac toe", "tictactoe"],
            GameKind::Othello => &["オセロ", "othello", "reversi"],
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameKind::Tictactoe => write!(f, "tic-tac-toe"),
            GameKind::Othello => write!(f, "othello"),
        }
    }
}

/// What the shell is currently doing.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Mode {
    #[default]
    Chat,
    Playing(GameKind),
}

/// Where a line of input should go.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Route {
    /// Open a game, replacing any game in progress.
    Start(GameKind),
    /// Close the running game and return to chat.
    Stop(GameKind),
    /// Send to the chat backend.
    Chat(String),
    /// Hand to the running game as a move.
    Move(String),
    /// Blank line.
    Empty,
}

/// Match `input` against the trigger words. Internal runs of whitespace count
/// as one space.
pub fn trigger(input: &str) -> Option<GameKind> {
    let normalized = input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    [GameKind::Tictactoe, GameKind::Othello]
        .into_iter()
        .find(|kind| kind.triggers().contains(&normalized.as_str()))
}

/// Decide where `input` goes given the current mode.
///
/// A trigger for the running game closes it; any other trigger opens its
/// game. Everything else is chat outside a game and a move inside one.
pub fn route(input: &str, mode: Mode) -> Route {
    let text = input.trim();
    if text.is_empty() {
        return Route::Empty;
    }
    match (trigger(text), mode) {
        (Some(kind), Mode::Playing(active)) if kind == active => Route::Stop(kind),
        (Some(kind), _) => Route::Start(kind),
        (None, Mode::Chat) => Route::Chat(text.to_string()),
        (None, Mode::Playing(_)) => Route::Move(text.to_string()),
    }
}
