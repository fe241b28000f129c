//! Board state and transition rules for carry-limit tic-tac-toe.
//!
//! Each side may keep at most [`MAX_MARKS`] marks on the board. Placing a
//! fourth mark first removes that side's oldest surviving mark, so marks
//! wander instead of filling the board. Placement order is tracked per side
//! in a [`MarkQueue`].

use std::fmt;

use parlor_core::{Outcome, ParlorError, Result, Side};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::TicTacToeMove;

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// Maximum number of live marks per side.
pub const MAX_MARKS: usize = 3;

/// Cells the engine may open on: the centre and the four corners.
pub const OPENING_CELLS: [u8; 5] = [0, 2, 4, 6, 8];

/// Half-moves after which a game without a winner is declared drawn.
pub const DEFAULT_MOVE_LIMIT: u32 = 60;

/// The 8 winning lines (3 rows, 3 columns, 2 diagonals).
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // top row
    [3, 4, 5], // middle row
    [6, 7, 8], // bottom row
    [0, 3, 6], // left column
    [1, 4, 7], // center column
    [2, 5, 8], // right column
    [0, 4, 8], // main diagonal
    [2, 4, 6], // anti-diagonal
];

/// Cells in placement order for one side, oldest first.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub struct MarkQueue {
    cells: [u8; MAX_MARKS],
    len: u8,
}

impl MarkQueue {
    /// Number of live marks.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True once the side holds [`MAX_MARKS`] marks.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == MAX_MARKS
    }

    /// The longest-standing mark, next in line for eviction.
    #[inline]
    pub fn oldest(&self) -> Option<u8> {
        if self.is_empty() {
            None
        } else {
            Some(self.cells[0])
        }
    }

    /// Iterate over the marks, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells[..self.len()].iter().copied()
    }

    /// Append a mark, evicting and returning the oldest one if already full.
    fn push(&mut self, cell: u8) -> Option<u8> {
        let evicted = if self.is_full() {
            let oldest = self.cells[0];
            self.cells.copy_within(1.., 0);
            self.len -= 1;
            Some(oldest)
        } else {
            None
        };
        self.cells[self.len()] = cell;
        self.len += 1;
        evicted
    }

    /// Remove the mark at `cell`, keeping the order of the others.
    fn remove(&mut self, cell: u8) -> bool {
        let found = self.iter().position(|c| c == cell);
        match found {
            Some(pos) => {
                let len = self.len();
                self.cells.copy_within(pos + 1..len, pos);
                self.len -= 1;
                true
            }
            None => false,
        }
    }
}

/// Progress of a tic-tac-toe game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Status {
    InProgress,
    Won(Side),
    Draw,
}

/// Scan the 8 lines and return the side holding a complete one.
pub fn check_winner(board: &[Option<Side>; CELLS]) -> Option<Side> {
    for line in LINES {
        if let Some(side) = board[line[0]] {
            if board[line[1]] == Some(side) && board[line[2]] == Some(side) {
                return Some(side);
            }
        }
    }
    None
}

/// Tic-tac-toe board state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct TicTacToeState {
    /// Board: 9 cells, indexed 0-8 (row-major).
    /// ```text
    /// 0 | 1 | 2
    /// ---------
    /// 3 | 4 | 5
    /// ---------
    /// 6 | 7 | 8
    /// ```
    board: [Option<Side>; CELLS],

    /// Side to move.
    turn: Side,

    /// Placement order per side, indexed by [`Side::index`].
    marks: [MarkQueue; 2],

    status: Status,

    /// Half-moves played since the opening mark.
    half_moves: u32,

    move_limit: u32,
}

impl TicTacToeState {
    /// Create an empty board with the player to move.
    pub fn empty(move_limit: u32) -> Self {
        Self {
            board: [None; CELLS],
            turn: Side::Player,
            marks: [MarkQueue::default(); 2],
            status: Status::InProgress,
            half_moves: 0,
            move_limit,
        }
    }

    /// Create a board with the opponent's opening mark on `cell`.
    pub fn with_opening(cell: u8, move_limit: u32) -> Self {
        let mut state = Self::empty(move_limit);
        state.board[cell as usize] = Some(Side::Opponent);
        state.marks[Side::Opponent.index()].push(cell);
        state
    }

    /// Start a new game: the opponent opens on a random corner or the centre.
    pub fn new_game<R: Rng + ?Sized>(rng: &mut R, move_limit: u32) -> Self {
        let cell = *OPENING_CELLS.choose(rng).unwrap_or(&4);
        tracing::debug!(cell, "opponent opening mark");
        Self::with_opening(cell, move_limit)
    }

    /// Build a position from each side's marks, listed oldest first.
    ///
    /// # Errors
    /// Returns an error if a side has more than [`MAX_MARKS`] marks, a cell is
    /// out of range, or a cell is listed twice.
    pub fn from_marks(player: &[u8], opponent: &[u8], turn: Side, move_limit: u32) -> Result<Self> {
        let mut state = Self::empty(move_limit);
        state.turn = turn;
        for (side, cells) in [(Side::Player, player), (Side::Opponent, opponent)] {
            if cells.len() > MAX_MARKS {
                return Err(ParlorError::IllegalMove(format!(
                    "{} cannot hold {} marks",
                    side,
                    cells.len()
                )));
            }
            for &cell in cells {
                let idx = cell as usize;
                if idx >= CELLS {
                    return Err(ParlorError::InvalidCell(idx));
                }
                if state.board[idx].is_some() {
                    return Err(ParlorError::CellOccupied(idx));
                }
                state.board[idx] = Some(side);
                state.marks[side.index()].push(cell);
            }
        }
        if let Some(winner) = check_winner(&state.board) {
            state.status = Status::Won(winner);
        }
        Ok(state)
    }

    /// Get the side to move.
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Get the mark on a cell, if any.
    pub fn get(&self, cell: usize) -> Option<Side> {
        self.board.get(cell).copied().flatten()
    }

    /// The raw board.
    pub fn board(&self) -> &[Option<Side>; CELLS] {
        &self.board
    }

    /// Placement order of `side`'s live marks.
    pub fn marks(&self, side: Side) -> &MarkQueue {
        &self.marks[side.index()]
    }

    /// Number of live marks for `side` (0..=3).
    pub fn mark_count(&self, side: Side) -> usize {
        self.marks(side).len()
    }

    pub fn player_mark_count(&self) -> usize {
        self.mark_count(Side::Player)
    }

    pub fn opponent_mark_count(&self) -> usize {
        self.mark_count(Side::Opponent)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status != Status::InProgress
    }

    /// Get the winner, if any.
    pub fn winner(&self) -> Option<Side> {
        match self.status {
            Status::Won(side) => Some(side),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            Status::InProgress => None,
            Status::Won(side) => Some(Outcome::Won(side)),
            Status::Draw => Some(Outcome::Draw),
        }
    }

    pub fn half_moves(&self) -> u32 {
        self.half_moves
    }

    pub fn move_limit(&self) -> u32 {
        self.move_limit
    }

    /// Explain why `side` may not place on `cell`.
    pub fn check_placement(&self, cell: usize, side: Side) -> Result<()> {
        if self.is_game_over() {
            return Err(ParlorError::GameOver);
        }
        if cell >= CELLS {
            return Err(ParlorError::InvalidCell(cell));
        }
        if self.turn != side {
            return Err(ParlorError::NotYourTurn(side));
        }
        if self.board[cell].is_some() {
            return Err(ParlorError::CellOccupied(cell));
        }
        Ok(())
    }

    pub fn is_legal_placement(&self, cell: usize, side: Side) -> bool {
        self.check_placement(cell, side).is_ok()
    }

    /// Explain why `side` may not move its mark from `from` to `to`.
    ///
    /// Only the opponent relocates, and only once it holds three marks. The
    /// player's moves are placements.
    pub fn check_relocation(&self, from: usize, to: usize, side: Side) -> Result<()> {
        if self.is_game_over() {
            return Err(ParlorError::GameOver);
        }
        if from >= CELLS {
            return Err(ParlorError::InvalidCell(from));
        }
        if to >= CELLS {
            return Err(ParlorError::InvalidCell(to));
        }
        if self.turn != side {
            return Err(ParlorError::NotYourTurn(side));
        }
        if side != Side::Opponent {
            return Err(ParlorError::IllegalMove(format!("{} can only place marks", side)));
        }
        if !self.marks(side).is_full() {
            return Err(ParlorError::IllegalMove(format!(
                "{} needs {} marks on the board to relocate",
                side, MAX_MARKS
            )));
        }
        if self.board[from] != Some(side) {
            return Err(ParlorError::IllegalMove(format!(
                "cell {} does not hold a {} mark",
                from, side
            )));
        }
        if self.board[to].is_some() {
            return Err(ParlorError::CellOccupied(to));
        }
        Ok(())
    }

    /// Place a mark for `side`, evicting its oldest mark if it already has three.
    ///
    /// Illegal placements leave the state unchanged.
    pub fn apply_placement(&self, cell: usize, side: Side) -> Self {
        if !self.is_legal_placement(cell, side) {
            return *self;
        }
        let mut next = *self;
        if let Some(evicted) = next.marks[side.index()].push(cell as u8) {
            next.board[evicted as usize] = None;
        }
        next.board[cell] = Some(side);
        next.finish_turn();
        next
    }

    /// Move one of `side`'s marks to an empty cell. It becomes the newest mark.
    ///
    /// Illegal relocations leave the state unchanged.
    pub fn apply_relocation(&self, from: usize, to: usize, side: Side) -> Self {
        if self.check_relocation(from, to, side).is_err() {
            return *self;
        }
        let mut next = *self;
        let queue = &mut next.marks[side.index()];
        queue.remove(from as u8);
        queue.push(to as u8);
        next.board[from] = None;
        next.board[to] = Some(side);
        next.finish_turn();
        next
    }

    /// Check a move for the side to move.
    pub fn check_move(&self, mv: TicTacToeMove) -> Result<()> {
        match mv {
            TicTacToeMove::Place(cell) => self.check_placement(cell as usize, self.turn),
            TicTacToeMove::Relocate { from, to } => {
                self.check_relocation(from as usize, to as usize, self.turn)
            }
        }
    }

    /// Apply a move for the side to move.
    pub fn apply_move(&self, mv: TicTacToeMove) -> Self {
        match mv {
            TicTacToeMove::Place(cell) => self.apply_placement(cell as usize, self.turn),
            TicTacToeMove::Relocate { from, to } => {
                self.apply_relocation(from as usize, to as usize, self.turn)
            }
        }
    }

    /// All moves for the side to move: placements first, then relocations
    /// when the opponent is to move holding three marks.
    pub fn legal_moves(&self) -> Vec<TicTacToeMove> {
        if self.is_game_over() {
            return Vec::new();
        }
        let empties: Vec<u8> = (0..CELLS as u8)
            .filter(|&c| self.board[c as usize].is_none())
            .collect();

        let mut moves: Vec<TicTacToeMove> = empties.iter().map(|&c| TicTacToeMove::Place(c)).collect();

        if self.turn == Side::Opponent && self.marks(self.turn).is_full() {
            for from in 0..CELLS as u8 {
                if self.board[from as usize] != Some(self.turn) {
                    continue;
                }
                for &to in &empties {
                    moves.push(TicTacToeMove::Relocate { from, to });
                }
            }
        }
        moves
    }

    fn finish_turn(&mut self) {
        self.turn = self.turn.opposite();
        self.half_moves += 1;
        if let Some(winner) = check_winner(&self.board) {
            self.status = Status::Won(winner);
        } else if self.half_moves >= self.move_limit {
            self.status = Status::Draw;
        }
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::empty(DEFAULT_MOVE_LIMIT)
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "---+---+---")?;
            }
            for col in 0..3 {
                if col > 0 {
                    write!(f, "|")?;
                }
                let cell = row * 3 + col;
                match self.board[cell] {
                    Some(Side::Player) => write!(f, " X ")?,
                    Some(Side::Opponent) => write!(f, " O ")?,
                    None => write!(f, " {} ", cell)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn place(state: TicTacToeState, cell: usize) -> TicTacToeState {
        state.apply_placement(cell, state.turn())
    }

    #[test]
    fn test_empty_state() {
        let state = TicTacToeState::default();
        assert_eq!(state.turn(), Side::Player);
        assert_eq!(state.player_mark_count(), 0);
        assert_eq!(state.opponent_mark_count(), 0);
        assert!(!state.is_game_over());
        assert_eq!(state.legal_moves().len(), 9);
    }

    #[test]
    fn test_new_game_opens_on_corner_or_center() {
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let state = TicTacToeState::new_game(&mut rng, DEFAULT_MOVE_LIMIT);
            assert_eq!(state.turn(), Side::Player);
            assert_eq!(state.opponent_mark_count(), 1);
            assert_eq!(state.player_mark_count(), 0);
            let cell = state.marks(Side::Opponent).oldest().unwrap();
            assert!(OPENING_CELLS.contains(&cell));
            assert_eq!(state.get(cell as usize), Some(Side::Opponent));
        }
    }

    #[test]
    fn test_placement_legality() {
        let state = TicTacToeState::with_opening(4, DEFAULT_MOVE_LIMIT);
        assert!(state.is_legal_placement(0, Side::Player));
        assert!(!state.is_legal_placement(4, Side::Player));
        assert!(!state.is_legal_placement(0, Side::Opponent));
        assert!(!state.is_legal_placement(9, Side::Player));

        assert_eq!(
            state.check_placement(4, Side::Player),
            Err(ParlorError::CellOccupied(4))
        );
        assert_eq!(
            state.check_placement(0, Side::Opponent),
            Err(ParlorError::NotYourTurn(Side::Opponent))
        );
    }

    #[test]
    fn test_illegal_placement_is_noop() {
        let state = TicTacToeState::with_opening(4, DEFAULT_MOVE_LIMIT);
        assert_eq!(state.apply_placement(4, Side::Player), state);
        assert_eq!(state.apply_placement(0, Side::Opponent), state);
    }

    #[test]
    fn test_fourth_mark_evicts_oldest() {
        // Player: 0, 2, 7 ; Opponent: 4, 5, 1 (no line for either)
        let mut state = TicTacToeState::with_opening(4, DEFAULT_MOVE_LIMIT);
        for cell in [0, 5, 2, 1, 7] {
            state = place(state, cell);
        }
        assert!(!state.is_game_over());
        assert_eq!(state.player_mark_count(), 3);
        assert_eq!(state.opponent_mark_count(), 3);
        assert_eq!(state.turn(), Side::Opponent);

        // Opponent's oldest mark is the opening one at 4.
        let next = place(state, 8);
        assert_eq!(next.opponent_mark_count(), 3);
        assert_eq!(next.get(4), None);
        assert_eq!(next.get(8), Some(Side::Opponent));
        let order: Vec<u8> = next.marks(Side::Opponent).iter().collect();
        assert_eq!(order, vec![5, 1, 8]);
    }

    #[test]
    fn test_eviction_follows_placement_order_not_cell_order() {
        // Player placed 8 first, then 1, then 3: oldest is 8 even though
        // cell 1 comes first on the board.
        let state =
            TicTacToeState::from_marks(&[8, 1, 3], &[0, 5], Side::Player, DEFAULT_MOVE_LIMIT)
                .unwrap();
        let next = state.apply_placement(6, Side::Player);
        assert_eq!(next.get(8), None);
        assert_eq!(next.get(1), Some(Side::Player));
        assert_eq!(next.get(3), Some(Side::Player));
        assert_eq!(next.get(6), Some(Side::Player));
    }

    #[test]
    fn test_eviction_can_break_own_line_threat() {
        // Player holds 0, 1 (oldest first) and 5. Placing 2 evicts 0, so no win.
        let state =
            TicTacToeState::from_marks(&[0, 1, 5], &[4, 6], Side::Player, DEFAULT_MOVE_LIMIT)
                .unwrap();
        let next = state.apply_placement(2, Side::Player);
        assert_eq!(next.get(0), None);
        assert_eq!(next.winner(), None);
    }

    #[test]
    fn test_check_winner_lines() {
        for line in LINES {
            let mut board = [None; CELLS];
            for cell in line {
                board[cell] = Some(Side::Opponent);
            }
            assert_eq!(check_winner(&board), Some(Side::Opponent));
        }

        let mut board = [None; CELLS];
        board[0] = Some(Side::Player);
        board[1] = Some(Side::Player);
        board[2] = Some(Side::Opponent);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_win_ends_game() {
        let state =
            TicTacToeState::from_marks(&[0, 1], &[4, 8], Side::Player, DEFAULT_MOVE_LIMIT).unwrap();
        let next = state.apply_placement(2, Side::Player);
        assert_eq!(next.status(), Status::Won(Side::Player));
        assert_eq!(next.outcome(), Some(Outcome::Won(Side::Player)));
        assert!(next.legal_moves().is_empty());
        assert_eq!(next.apply_placement(5, Side::Opponent), next);
    }

    #[test]
    fn test_move_limit_declares_draw() {
        let mut state = TicTacToeState::with_opening(4, 2);
        state = place(state, 0);
        assert!(!state.is_game_over());
        state = place(state, 1);
        assert_eq!(state.status(), Status::Draw);
        assert_eq!(state.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn test_relocation() {
        let state =
            TicTacToeState::from_marks(&[0, 7, 5], &[4, 2, 3], Side::Opponent, DEFAULT_MOVE_LIMIT)
                .unwrap();
        assert!(state.check_relocation(3, 6, Side::Opponent).is_ok());
        let next = state.apply_relocation(3, 6, Side::Opponent);

        // 2-4-6 diagonal completed by moving the mark from 3.
        assert_eq!(next.get(3), None);
        assert_eq!(next.winner(), Some(Side::Opponent));
        let order: Vec<u8> = next.marks(Side::Opponent).iter().collect();
        assert_eq!(order, vec![4, 2, 6]);
    }

    #[test]
    fn test_relocation_requires_full_hand() {
        let state =
            TicTacToeState::from_marks(&[0], &[4, 2], Side::Opponent, DEFAULT_MOVE_LIMIT).unwrap();
        assert!(matches!(
            state.check_relocation(4, 6, Side::Opponent),
            Err(ParlorError::IllegalMove(_))
        ));
        assert_eq!(state.apply_relocation(4, 6, Side::Opponent), state);
    }

    #[test]
    fn test_legal_moves_include_relocations_at_cap() {
        let state =
            TicTacToeState::from_marks(&[0, 7, 5], &[4, 2, 3], Side::Opponent, DEFAULT_MOVE_LIMIT)
                .unwrap();
        let moves = state.legal_moves();
        // 3 empty cells: 3 placements + 3 marks x 3 targets
        assert_eq!(moves.len(), 12);
        assert!(moves.contains(&TicTacToeMove::Relocate { from: 3, to: 6 }));
    }

    #[test]
    fn test_player_cannot_relocate() {
        let state =
            TicTacToeState::from_marks(&[0, 7, 5], &[4, 2, 3], Side::Player, DEFAULT_MOVE_LIMIT)
                .unwrap();
        assert!(matches!(
            state.check_relocation(0, 6, Side::Player),
            Err(ParlorError::IllegalMove(_))
        ));
        assert_eq!(state.apply_relocation(0, 6, Side::Player), state);

        let moves = state.legal_moves();
        assert_eq!(moves.len(), 3);
        assert!(moves.iter().all(|mv| !mv.is_relocation()));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut queue = MarkQueue::default();
        for cell in [6, 1, 8] {
            queue.push(cell);
        }
        assert!(queue.remove(1));
        assert!(!queue.remove(1));
        assert_eq!(queue.iter().collect::<Vec<_>>(), vec![6, 8]);
        assert_eq!(queue.oldest(), Some(6));
    }

    #[test]
    fn test_from_marks_rejects_bad_input() {
        assert!(TicTacToeState::from_marks(&[0, 1, 2, 3], &[], Side::Player, 60).is_err());
        assert_eq!(
            TicTacToeState::from_marks(&[0], &[0], Side::Player, 60),
            Err(ParlorError::CellOccupied(0))
        );
        assert_eq!(
            TicTacToeState::from_marks(&[9], &[], Side::Player, 60),
            Err(ParlorError::InvalidCell(9))
        );
    }

    #[test]
    fn test_display() {
        let state =
            TicTacToeState::from_marks(&[0], &[4], Side::Player, DEFAULT_MOVE_LIMIT).unwrap();
        let display = format!("{}", state);
        assert!(display.contains("X"));
        assert!(display.contains("O"));
        assert!(display.contains("8"));
    }
}
