//! Game phases as published by the store
//!
//! The phase gates two things on the answer board: whether the local
//! player may still change their selection, and whether correct answers
//! are revealed.

use serde::{Deserialize, Serialize};

/// Represents the current phase of the game document
///
/// Only [`GamePhase::AwaitingPlayerAnswers`] accepts selection changes and
/// only [`GamePhase::ShowingCorrectAnswers`] reveals correctness. Phase
/// names this crate does not know about deserialize as
/// [`GamePhase::Other`] and behave like any other non-answerable phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    /// Lobby before the first question
    #[default]
    WaitingForPlayers,
    /// Question prompt shown, answers not yet open
    ShowingQuestion,
    /// Players may select and deselect answers
    AwaitingPlayerAnswers,
    /// Correct answers and the explanation are revealed
    ShowingCorrectAnswers,
    /// Scores between questions
    ShowingLeaderboard,
    /// Game has completed
    Finished,
    /// Any phase not modelled here
    #[serde(other)]
    Other,
}

impl GamePhase {
    /// Whether the local player's selection may change in this phase
    pub fn accepts_answers(self) -> bool {
        self == GamePhase::AwaitingPlayerAnswers
    }

    /// Whether correct answers are revealed in this phase
    pub fn reveals_correctness(self) -> bool {
        self == GamePhase::ShowingCorrectAnswers
    }
}
