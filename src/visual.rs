//! Per-answer visual classification
//!
//! Classification depends only on whether the local player selected an
//! answer, whether it is correct, and whether the phase reveals
//! correctness. Role-based text is layered on top by [`feedback`] and
//! never feeds back into [`classify`].

use serde::Serialize;

use crate::{
    phase::GamePhase,
    player::Role,
    question::{Answer, Question},
};

/// How a single answer option should be presented
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum VisualState {
    /// Not selected, correctness hidden
    Neutral,
    /// Selected, correctness hidden
    SelectedPending,
    /// Selected and correct
    SelectedCorrect,
    /// Selected and incorrect
    SelectedIncorrect,
    /// Not selected but correct
    UnselectedMissedCorrect,
    /// Not selected and incorrect
    UnselectedNeutral,
}

/// Personalised text shown next to an answer after the reveal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Feedback {
    /// The player picked a correct answer
    GotIt,
    /// The player left a correct answer unpicked
    Missed,
}

impl Feedback {
    /// The text displayed for this feedback
    pub fn text(self) -> &'static str {
        match self {
            Feedback::GotIt => "You got it!",
            Feedback::Missed => "You missed this one.",
        }
    }
}

/// Classifies an answer for display
pub fn classify(answer: &Answer, selected: bool, phase: GamePhase) -> VisualState {
    match (phase.reveals_correctness(), selected, answer.is_correct) {
        (true, true, true) => VisualState::SelectedCorrect,
        (true, true, false) => VisualState::SelectedIncorrect,
        (true, false, true) => VisualState::UnselectedMissedCorrect,
        (true, false, false) => VisualState::UnselectedNeutral,
        (false, true, _) => VisualState::SelectedPending,
        (false, false, _) => VisualState::Neutral,
    }
}

/// Number of correct answers on `question`
pub fn total_correct_options(question: &Question) -> usize {
    question
        .answers
        .iter()
        .filter(|answer| answer.is_correct)
        .count()
}

/// Pre-reveal hint telling players how many answers to pick
pub fn pick_guidance(correct_options: usize) -> String {
    format!(
        "Pick {}",
        pluralizer::pluralize("answer", correct_options as isize, true)
    )
}

/// Personalised feedback for an already classified answer
///
/// Presenters never receive feedback.
pub fn feedback(state: VisualState, role: Role) -> Option<Feedback> {
    if !role.sees_personal_feedback() {
        return None;
    }

    match state {
        VisualState::SelectedCorrect => Some(Feedback::GotIt),
        VisualState::UnselectedMissedCorrect => Some(Feedback::Missed),
        _ => None,
    }
}
