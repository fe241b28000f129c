//! Headless benchmark: the engine against a uniform-random mover.

use parlor_core::{Game, Outcome, Side};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

/// Safety cap on half-moves per benchmark game.
const MAX_PLIES: usize = 500;

/// Result of one benchmark game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GameResult {
    /// `None` if the game hit the ply cap.
    pub outcome: Option<Outcome>,
    pub plies: usize,
}

/// Aggregate over a batch of games.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
pub struct BenchReport {
    pub games: usize,
    pub engine_wins: usize,
    pub random_wins: usize,
    pub draws: usize,
    pub unfinished: usize,
    pub total_plies: usize,
}

impl BenchReport {
    pub fn engine_win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.engine_wins as f64 / self.games as f64
    }

    pub fn average_plies(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_plies as f64 / self.games as f64
    }

    fn record(mut self, result: GameResult) -> Self {
        self.games += 1;
        self.total_plies += result.plies;
        match result.outcome {
            Some(Outcome::Won(Side::Opponent)) => self.engine_wins += 1,
            Some(Outcome::Won(Side::Player)) => self.random_wins += 1,
            Some(Outcome::Draw) => self.draws += 1,
            None => self.unfinished += 1,
        }
        self
    }

    fn merge(self, other: Self) -> Self {
        Self {
            games: self.games + other.games,
            engine_wins: self.engine_wins + other.engine_wins,
            random_wins: self.random_wins + other.random_wins,
            draws: self.draws + other.draws,
            unfinished: self.unfinished + other.unfinished,
            total_plies: self.total_plies + other.total_plies,
        }
    }
}

/// Play one game: uniform-random legal moves for the player, the engine for
/// the opponent. Forced passes are settled through the engine.
///
/// `legal_actions` only offers the player what the shell accepts, so the
/// random mover never relocates a tic-tac-toe mark.
pub fn play_random_game<G: Game>(game: &G, seed: u64) -> GameResult {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = game.new_game(&mut rng);
    let mut plies = 0;

    while !game.is_terminal(&state) && plies < MAX_PLIES {
        let moves = game.legal_actions(&state);
        state = match game.side_to_move(&state) {
            Side::Player if !moves.is_empty() => match moves.choose(&mut rng) {
                Some(&action) => game.apply(&state, action),
                None => break,
            },
            _ => {
                let (next, _) = game.engine_turn(&state, &mut rng);
                next
            }
        };
        plies += 1;
    }

    GameResult {
        outcome: game.outcome(&state),
        plies,
    }
}

/// Play `games` independent games in parallel. Game `i` is seeded with
/// `seed + i * 1000`, so a report depends only on its inputs.
pub fn run<G: Game>(game: &G, games: usize, seed: u64) -> BenchReport {
    (0..games)
        .into_par_iter()
        .map(|i| play_random_game(game, seed.wrapping_add(i as u64 * 1000)))
        .fold(BenchReport::default, BenchReport::record)
        .reduce(BenchReport::default, BenchReport::merge)
}
