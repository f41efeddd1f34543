//! The stateful board engine: owns the board, the score and the RNG.
//!
//! All mutation goes through [`Game::reset`] and [`Game::apply_move`]; callers read
//! state back through accessors or the [`MoveOutcome`] each move returns.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::{Board, Move, Score, Tile, WIN_TILE};

/// What a single `apply_move` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Board after the move and the new tile.
    pub board: Board,
    pub score_delta: Score,
    /// At least one line changed (slide or merge).
    pub moved: bool,
    /// At least one pair of tiles merged.
    pub merged: bool,
    /// This move created the first 2048 tile of the session.
    pub won: bool,
    pub game_over: bool,
}

/// Feedback class a presentation layer picks its haptics/sound from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Nothing moved.
    None,
    Slide,
    Merge,
    Won,
    GameOver,
}

impl MoveOutcome {
    pub fn feedback(&self) -> Feedback {
        if self.game_over {
            Feedback::GameOver
        } else if self.won {
            Feedback::Won
        } else if self.merged {
            Feedback::Merge
        } else if self.moved {
            Feedback::Slide
        } else {
            Feedback::None
        }
    }
}

/// A single 2048 session.
///
/// The RNG is injected so games can be replayed from a seed.
/// ```
/// use game_2048::engine::Move;
/// use game_2048::game::Game;
///
/// let mut game = Game::from_seed(42);
/// assert_eq!(game.board().count_empty(), 14);
/// let out = game.apply_move(Move::Left);
/// assert_eq!(out.board, *game.board());
/// ```
#[derive(Debug, Clone)]
pub struct Game<R = StdRng> {
    board: Board,
    score: Score,
    game_over: bool,
    won: bool,
    rng: R,
}

impl Game<StdRng> {
    /// New game driven by a `StdRng` seeded with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Game::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Start a fresh game: two random tiles on an empty board.
    pub fn new(rng: R) -> Self {
        let mut game = Game {
            board: Board::EMPTY,
            score: 0,
            game_over: false,
            won: false,
            rng,
        };
        game.reset();
        game
    }

    /// Start from a fixed board with score 0. Flags are evaluated for `board`.
    pub fn from_board(board: Board, rng: R) -> Self {
        Game {
            board,
            score: 0,
            game_over: board.is_game_over(),
            won: board.highest_tile() >= WIN_TILE,
            rng,
        }
    }

    /// Clear everything and place two random tiles.
    pub fn reset(&mut self) {
        self.board = Board::EMPTY;
        self.score = 0;
        self.game_over = false;
        self.won = false;
        self.board = self
            .board
            .with_random_tile(&mut self.rng)
            .with_random_tile(&mut self.rng);
        info!("new game");
        debug!("start board {:?}", self.board);
    }

    /// Slide and merge every line toward `direction`.
    ///
    /// If anything changed, one random tile is placed and the game-over flag is
    /// re-evaluated. Otherwise board, score and flags are left untouched.
    pub fn apply_move(&mut self, direction: Move) -> MoveOutcome {
        let shifted = self.board.shift(direction);
        let moved = shifted.board != self.board;
        if !moved {
            debug!("{direction}: no change");
            return MoveOutcome {
                board: self.board,
                score_delta: 0,
                moved: false,
                merged: false,
                won: false,
                game_over: self.game_over,
            };
        }

        self.board = shifted.board.with_random_tile(&mut self.rng);
        self.score = self.score.saturating_add(shifted.score);
        self.game_over = self.board.is_game_over();

        let won = !self.won && self.board.highest_tile() >= WIN_TILE;
        if won {
            self.won = true;
            info!("reached {WIN_TILE} with score {}", self.score);
        }
        debug!(
            "{direction}: delta={} merged={} score={}",
            shifted.score, shifted.merged, self.score
        );
        if self.game_over {
            info!("game over: score={} highest={}", self.score, self.board.highest_tile());
        }

        MoveOutcome {
            board: self.board,
            score_delta: shifted.score,
            moved: true,
            merged: shifted.merged,
            won,
            game_over: self.game_over,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// A 2048 tile has appeared at some point this session.
    #[inline]
    pub fn has_won(&self) -> bool {
        self.won
    }

    #[inline]
    pub fn highest_tile(&self) -> Tile {
        self.board.highest_tile()
    }
}
