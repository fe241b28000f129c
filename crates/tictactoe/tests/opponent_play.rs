//! Tests of the scripted tic-tac-toe opponent in full games and set positions.

use parlor_core::{Game, Side};
use parlor_tictactoe::{
    search::has_winning_move, select_opponent_move, EngineConfig, TicTacToe, TicTacToeMove,
    TicTacToeState,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn position(player: &[u8], opponent: &[u8]) -> TicTacToeState {
    TicTacToeState::from_marks(player, opponent, Side::Opponent, 60).unwrap()
}

/// Opponent holds three marks and the player threatens to complete 0-4-8.
/// The opponent has no winning move of its own, so it has to cover cell 8.
#[test]
fn test_capped_opponent_stops_immediate_win() {
    let threatened = TicTacToeState::from_marks(&[0, 4], &[1, 3, 5], Side::Player, 60).unwrap();
    assert!(has_winning_move(&threatened));

    let state = position(&[0, 4], &[1, 3, 5]);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mv = select_opponent_move(&state, &EngineConfig::default(), &mut rng).unwrap();
    let next = state.apply_move(mv);

    assert_eq!(mv.target(), 8, "opponent must cover cell 8, played {}", mv);
    assert_eq!(next.get(8), Some(Side::Opponent));
    assert!(!has_winning_move(&next));
}

/// Player marks 2, 0, 4 (oldest first). Placing on 8 evicts the mark on 2
/// and completes 0-4-8, so the opponent has to take 8 itself.
#[test]
fn test_capped_opponent_covers_evicting_win() {
    let state = position(&[2, 0, 4], &[1, 3, 5]);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mv = select_opponent_move(&state, &EngineConfig::default(), &mut rng).unwrap();
    let next = state.apply_move(mv);

    assert_eq!(mv, TicTacToeMove::Place(8));
    assert!(!has_winning_move(&next));
}

/// Every three-against-three position with the opponent to move: it wins on
/// the spot, or leaves the player no winning placement whenever some move
/// achieves that.
#[test]
fn test_capped_opponent_blocks_every_avoidable_placement_win() {
    let config = EngineConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(23);
    let mut checked = 0;
    for a in 0..9u8 {
        for b in (0..9u8).filter(|&b| b != a) {
            for c in (0..9u8).filter(|&c| c != a && c != b) {
                let player = [a, b, c];
                let free: Vec<u8> = (0..9u8).filter(|x| !player.contains(x)).collect();
                for i in 0..free.len() {
                    for j in i + 1..free.len() {
                        for k in j + 1..free.len() {
                            let state = position(&player, &[free[i], free[j], free[k]]);
                            if state.is_game_over() {
                                continue;
                            }
                            checked += 1;

                            let mv = select_opponent_move(&state, &config, &mut rng).unwrap();
                            let next = state.apply_move(mv);
                            if next.winner() == Some(Side::Opponent) {
                                continue;
                            }
                            let can_block = state
                                .legal_moves()
                                .into_iter()
                                .any(|mv| !has_winning_move(&state.apply_move(mv)));
                            if can_block {
                                assert!(
                                    !has_winning_move(&next),
                                    "{} lets the player win in\n{}",
                                    mv,
                                    state
                                );
                            }
                        }
                    }
                }
            }
        }
    }
    assert_eq!(checked, 8232);
}

/// Whatever the position, a capped opponent either wins on the spot or
/// leaves the player without a winning placement whenever that is possible.
#[test]
fn test_capped_opponent_never_allows_avoidable_win() {
    let config = EngineConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    for seed in 0..200u64 {
        let mut walk = ChaCha8Rng::seed_from_u64(seed);
        let mut state = TicTacToeState::new_game(&mut walk, 60);
        for _ in 0..8 {
            let moves = state.legal_moves();
            match moves.choose(&mut walk) {
                Some(&mv) => state = state.apply_move(mv),
                None => break,
            }
        }
        if state.is_game_over() || state.turn() != Side::Opponent || state.opponent_mark_count() < 3 {
            continue;
        }

        let can_avoid = state
            .legal_moves()
            .into_iter()
            .any(|mv| !has_winning_move(&state.apply_move(mv)));
        let mv = select_opponent_move(&state, &config, &mut rng).unwrap();
        let next = state.apply_move(mv);
        if next.winner() == Some(Side::Opponent) {
            continue;
        }
        if can_avoid {
            assert!(!has_winning_move(&next), "{} lets the player win in\n{}", mv, state);
        }
    }
}

#[test]
fn test_capped_opponent_prefers_own_win_over_block() {
    // Player threatens 6-7-8; moving the opponent's mark from 0 onto 6 both
    // blocks and completes 2-4-6.
    let state = position(&[7, 8], &[2, 4, 0]);
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mv = select_opponent_move(&state, &EngineConfig::default(), &mut rng).unwrap();
    let next = state.apply_move(mv);
    assert_eq!(mv, TicTacToeMove::Relocate { from: 0, to: 6 });
    assert_eq!(next.winner(), Some(Side::Opponent));
}

#[test]
fn test_opponent_always_plays_legal_moves() {
    let game = TicTacToe::default();
    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = game.new_game(&mut rng);

        while !game.is_terminal(&state) {
            match game.side_to_move(&state) {
                Side::Player => {
                    let placements: Vec<TicTacToeMove> = game
                        .legal_actions(&state)
                        .into_iter()
                        .filter(|mv| !mv.is_relocation())
                        .collect();
                    let mv = *placements.choose(&mut rng).unwrap();
                    state = game.apply(&state, mv);
                }
                Side::Opponent => {
                    let mv = select_opponent_move(&state, game.config(), &mut rng)
                        .expect("opponent has a move in a live game");
                    assert!(game.validate(&state, mv).is_ok(), "illegal move {} in\n{}", mv, state);
                    state = game.apply(&state, mv);
                }
            }
            assert!(state.half_moves() <= game.config().move_limit);
        }
        assert!(game.outcome(&state).is_some());
    }
}

#[test]
fn test_random_player_rarely_beats_opponent() {
    let game = TicTacToe::new(EngineConfig::with_move_limit(30));
    let mut player_wins = 0;
    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(1000 + seed);
        let mut state = game.new_game(&mut rng);
        while !game.is_terminal(&state) {
            state = match game.side_to_move(&state) {
                Side::Player => {
                    let moves = game.legal_actions(&state);
                    let placements: Vec<_> = moves.into_iter().filter(|m| !m.is_relocation()).collect();
                    game.apply(&state, *placements.choose(&mut rng).unwrap())
                }
                Side::Opponent => game.engine_turn(&state, &mut rng).0,
            };
        }
        if state.winner() == Some(Side::Player) {
            player_wins += 1;
        }
    }
    assert!(player_wins <= 2, "random player won {} of 20 games", player_wins);
}

#[test]
fn test_same_position_same_choice() {
    let state = position(&[0, 8, 5], &[4, 1, 6]);
    let config = EngineConfig::default();
    let first = select_opponent_move(&state, &config, &mut ChaCha8Rng::seed_from_u64(1));
    for seed in 2..6 {
        let again = select_opponent_move(&state, &config, &mut ChaCha8Rng::seed_from_u64(seed));
        assert_eq!(first, again);
    }
}
