//! Answer selection toggling
//!
//! Tapping an answer flips it in the local player's guess vector, but only
//! while the game is collecting answers. Outside that phase taps are
//! silently ignored.

use thiserror::Error;

use crate::{phase::GamePhase, question::GuessVector};

/// Errors that can occur when toggling a selection
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The tapped index does not exist on the current question
    #[error("answer index {index} is out of range for {len} answers")]
    IndexOutOfRange {
        /// The index that was tapped
        index: usize,
        /// Number of answers on the question
        len: usize,
    },
}

/// Computes the guess vector that results from tapping answer `index`
///
/// Returns a new vector with position `index` negated when `phase` accepts
/// answers, and an unchanged copy otherwise. `current` is never modified so
/// the previous state stays available to the caller.
///
/// # Errors
///
/// Returns [`Error::IndexOutOfRange`] when `index` is not a valid position,
/// whatever the phase.
pub fn toggle(current: &GuessVector, index: usize, phase: GamePhase) -> Result<GuessVector, Error> {
    if index >= current.len() {
        return Err(Error::IndexOutOfRange {
            index,
            len: current.len(),
        });
    }

    if phase.accepts_answers() {
        Ok(current.with_flipped(index))
    } else {
        Ok(current.clone())
    }
}
