//! game-2048: the 2048 sliding-tile puzzle
//!
//! This crate provides:
//! - A 4x4 `Board` value type with the slide/merge kernel (`engine` module)
//! - `Game`, the stateful engine that owns board, score and RNG (`game` module)
//! - Drag-to-direction mapping for gesture front ends (`gesture` module)
//! - TOML settings for the bundled terminal front end (`config` module)
//!
//! Quick start:
//! ```
//! use game_2048::engine::Move;
//! use game_2048::game::{Feedback, Game};
//!
//! // Deterministic game with a seeded RNG
//! let mut game = Game::from_seed(42);
//! let out = game.apply_move(Move::from_drag(-50.0, 10.0));
//! if out.moved {
//!     assert_ne!(out.feedback(), Feedback::None);
//! }
//! assert_eq!(game.score(), out.score_delta);
//! ```
//!
//! Any `rand::Rng` can drive a game:
//! ```
//! use game_2048::game::Game;
//! let game = Game::new(rand::thread_rng());
//! assert_eq!(game.board().count_empty(), 14);
//! ```
//!
pub mod config;
pub mod engine;
pub mod game;
pub mod gesture;

pub use engine::{Board, Move};
pub use game::{Feedback, Game, MoveOutcome};
