//! Game ID handling and share links
//!
//! Game ids are issued by the store that owns the game document. This
//! module wraps them and derives the join link that is turned into a QR
//! code on the presenter screen.

use std::{convert::Infallible, str::FromStr};

use serde::{Deserialize, Serialize};

/// A unique identifier for a game session
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
pub struct GameId(String);

impl GameId {
    /// Creates a game id from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the join link for this game
    ///
    /// The link has the form `<origin>/game/<id>`. No validation is done on
    /// either part.
    pub fn share_link(&self, origin: &str) -> String {
        format!(
            "{origin}/{}/{}",
            crate::constants::display::SHARE_PATH,
            self.0
        )
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl FromStr for GameId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}
