//! Live answer tallies
//!
//! Every update from the store recomputes the per-answer counts from the
//! full set of submitted guesses. Nothing is cached between snapshots.

use itertools::Itertools;
use serde::Serialize;

use crate::question::Question;

/// How many players picked a single answer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionTally {
    /// Number of players who selected this answer
    pub count: usize,
    /// `count` as a percentage of all responders
    pub percentage: f64,
}

/// Number of distinct players who have submitted a guess vector
pub fn responders(question: &Question) -> usize {
    question.player_guesses.len()
}

/// Computes the count and percentage of every answer on `question`
///
/// Percentages are relative to the number of responders, floored at one so
/// a question nobody has answered yet reports 0% everywhere. Because
/// players may select several answers, percentages need not sum to 100.
/// Guess vectors shorter than the answer list count as unselected for the
/// missing positions.
pub fn tally(question: &Question) -> Vec<OptionTally> {
    let denominator = responders(question).max(1) as f64;

    (0..question.answer_count())
        .map(|index| {
            let count = question
                .player_guesses
                .values()
                .filter(|guess| guess.is_selected(index))
                .count();
            OptionTally {
                count,
                percentage: count as f64 / denominator * 100.,
            }
        })
        .collect_vec()
}

/// Width, in percent, to draw a tally bar at
///
/// Bars never shrink below
/// [`MIN_BAR_WIDTH_PERCENT`](crate::constants::display::MIN_BAR_WIDTH_PERCENT)
/// so answers nobody picked still show up.
pub fn bar_width(percentage: f64) -> f64 {
    percentage.max(crate::constants::display::MIN_BAR_WIDTH_PERCENT)
}
