//! # Live Quiz Board Library
//!
//! This library provides the answer-screen logic for a live multiplayer
//! quiz. It toggles the local player's selections, tallies everyone's
//! guesses, and classifies each answer for display, all as pure
//! projections of the latest game snapshot. Rendering, authentication and
//! the shared store stay outside the crate behind the traits in
//! [`session`].

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::doc_markdown)]

pub mod board;
pub mod constants;
pub mod game_id;
pub mod phase;
pub mod player;
pub mod question;
pub mod selection;
pub mod session;
pub mod tally;
pub mod visual;

pub use board::{AnswerBoard, BoardConfig, BoardView, GameSnapshot, OptionView, TapOutcome};
pub use game_id::GameId;
pub use phase::GamePhase;
pub use player::{PlayerId, Role};
pub use question::{Answer, GuessVector, Question};
pub use selection::toggle;
pub use tally::{OptionTally, tally};
pub use visual::{Feedback, VisualState, classify, total_correct_options};
