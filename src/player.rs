//! Participant identity and roles
//!
//! Players are identified by the id their authentication provider hands
//! out. The crate never generates or parses these ids, it only uses them
//! as keys into the shared guess mapping.

use serde::{Deserialize, Serialize};

/// A unique identifier for a participant in the game
///
/// The format is owned by the authentication provider, so the id is kept
/// as an opaque string.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Creates a player id from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The role a client renders the board for
///
/// The presenter drives the shared screen and never answers; players
/// answer on their own devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The shared presenter screen
    Presenter,
    /// A participant answering on their own device
    #[default]
    Player,
}

impl Role {
    /// Whether personalised feedback may be shown to this role
    pub fn sees_personal_feedback(self) -> bool {
        matches!(self, Role::Player)
    }
}
