//! Configuration constants for the live quiz board
//!
//! This module contains the limits applied when validating question
//! snapshots and the constants used when projecting them for display.

/// Question configuration constants
pub mod question {
    /// Maximum length of a question prompt in characters
    pub const MAX_PROMPT_LENGTH: usize = 500;
    /// Maximum length of the explanation shown after the reveal
    pub const MAX_EXPLANATION_LENGTH: usize = 2000;
    /// Maximum number of answer options for a single question
    pub const MAX_ANSWER_COUNT: usize = 8;
}

/// Answer text configuration constants
pub mod answer_text {
    /// Maximum length of answer text in characters
    pub const MAX_LENGTH: usize = 200;
}

/// Display constants
pub mod display {
    /// Smallest width, in percent, a tally bar is drawn with
    pub const MIN_BAR_WIDTH_PERCENT: f64 = 2.0;
    /// Path segment placed between the origin and the game id in share links
    pub const SHARE_PATH: &str = "game";
}
