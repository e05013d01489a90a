//! Question snapshot model
//!
//! A [`Question`] is a read-only view of the live question inside the
//! shared game document. The board reads it on every update and only ever
//! writes back the local player's own guess vector.

use std::collections::HashMap;

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::player::PlayerId;

/// Which answers a single player has selected
///
/// Position `i` is `true` when the player selected answer `i`. More than one
/// position may be set on multi-select questions. The length always matches
/// the number of answers on the question it belongs to.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Deref,
    derive_more::From,
    derive_more::Into,
)]
#[serde(transparent)]
pub struct GuessVector(Vec<bool>);

impl GuessVector {
    /// Creates a vector of `len` unselected answers
    pub fn empty(len: usize) -> Self {
        Self(vec![false; len])
    }

    /// Whether answer `index` is selected, `false` when out of range
    pub fn is_selected(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Number of selected answers
    pub fn selected_count(&self) -> usize {
        self.0.iter().filter(|selected| **selected).count()
    }

    /// Returns a copy with position `index` negated
    ///
    /// The caller guarantees `index` is in range.
    pub(crate) fn with_flipped(&self, index: usize) -> Self {
        Self(
            self.0
                .iter()
                .enumerate()
                .map(|(i, selected)| if i == index { !selected } else { *selected })
                .collect_vec(),
        )
    }
}

impl FromIterator<bool> for GuessVector {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Represents a single answer option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    /// The answer text, unique within its question
    #[garde(length(min = 1, max = crate::constants::answer_text::MAX_LENGTH))]
    pub text: String,
    /// Whether this answer is correct
    #[garde(skip)]
    pub is_correct: bool,
}

impl Answer {
    /// Creates a new answer option
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }
}

/// The live question as published by the game store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// The question text shown to everyone
    #[garde(length(max = crate::constants::question::MAX_PROMPT_LENGTH))]
    pub prompt: String,
    /// Text shown once correct answers are revealed
    #[serde(default)]
    #[garde(length(max = crate::constants::question::MAX_EXPLANATION_LENGTH))]
    pub explanation: String,
    /// The answer options in display order
    #[garde(length(max = crate::constants::question::MAX_ANSWER_COUNT), dive)]
    pub answers: Vec<Answer>,
    /// Submitted guesses keyed by player
    #[serde(default)]
    #[garde(skip)]
    pub player_guesses: HashMap<PlayerId, GuessVector>,
}

/// Errors found when checking a question snapshot
#[derive(Error, Debug)]
pub enum Error {
    /// A field is outside its configured limits
    #[error(transparent)]
    Invalid(#[from] garde::Report),
    /// Two answers share the same text
    #[error("answer texts must be unique")]
    DuplicateAnswer,
    /// A stored guess vector does not match the number of answers
    #[error("guess vector for {player} has {actual} entries, expected {expected}")]
    GuessLength {
        /// The player whose vector is malformed
        player: PlayerId,
        /// Number of answers on the question
        expected: usize,
        /// Length of the stored vector
        actual: usize,
    },
}

impl Question {
    /// Creates a question with no guesses yet
    pub fn new(
        prompt: impl Into<String>,
        explanation: impl Into<String>,
        answers: Vec<Answer>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            explanation: explanation.into(),
            answers,
            player_guesses: HashMap::new(),
        }
    }

    /// Number of answer options
    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }

    /// Returns the stored guess of `player`, or an all-false vector when
    /// they have not answered yet
    pub fn guess_for(&self, player: &PlayerId) -> GuessVector {
        self.player_guesses
            .get(player)
            .cloned()
            .unwrap_or_else(|| GuessVector::empty(self.answers.len()))
    }

    /// Whether `player` has submitted a guess vector
    pub fn has_guess(&self, player: &PlayerId) -> bool {
        self.player_guesses.contains_key(player)
    }

    /// Replaces the stored guess of `player`
    pub fn record_guess(&mut self, player: PlayerId, guess: GuessVector) {
        self.player_guesses.insert(player, guess);
    }

    /// Whether `other` is the same question, ignoring guesses
    ///
    /// Used to detect that the store moved on to a different question.
    /// Consecutive questions often share their options (true/false
    /// rounds), so the prompt is compared as well.
    pub fn is_same_question(&self, other: &Question) -> bool {
        self.prompt == other.prompt && self.answers == other.answers
    }

    /// Checks the snapshot against the configured limits and the guess
    /// vector length invariant
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn check(&self) -> Result<(), Error> {
        self.validate()?;

        if !self.answers.iter().map(|answer| &answer.text).all_unique() {
            return Err(Error::DuplicateAnswer);
        }

        let expected = self.answers.len();
        if let Some((player, guess)) = self
            .player_guesses
            .iter()
            .sorted_by_key(|(player, _)| *player)
            .find(|(_, guess)| guess.len() != expected)
        {
            return Err(Error::GuessLength {
                player: player.clone(),
                expected,
                actual: guess.len(),
            });
        }

        Ok(())
    }
}
