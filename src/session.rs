//! Collaborators that carry a guess to the backend
//!
//! This module defines the traits the board uses to identify the local
//! player and to push their guess vector to the store. Implementations
//! might talk HTTP, a realtime database SDK, or an in-memory fake; the
//! board only sees these seams.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{game_id::GameId, player::PlayerId, question::GuessVector};

/// Failure to obtain an authorization token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not obtain auth token: {0}")]
pub struct AuthError(pub String);

/// Failure reported by the store write endpoint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("store rejected guess: {0}")]
pub struct StoreError(pub String);

/// Errors that can occur while submitting a guess
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// No token could be obtained, nothing was sent
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// The store did not accept the guess
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Identity of the local user
pub trait Authenticator {
    /// The id of the signed-in user
    fn current_user_id(&self) -> PlayerId;

    /// Obtains a token to authorize a store write
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when no token can be issued.
    fn auth_token(&self) -> Result<String, AuthError>;
}

/// Write side of the shared game store
pub trait GuessStore {
    /// Stores `submission` on behalf of the holder of `token`
    ///
    /// The store derives the player from the token, so the submission does
    /// not carry it.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the write is rejected or cannot be
    /// delivered.
    fn submit(&self, token: &str, submission: &GuessSubmission) -> Result<(), StoreError>;
}

/// Payload accepted by the store write endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessSubmission {
    /// The full guess vector of the submitting player
    pub guess_vector: GuessVector,
    /// The game the guess belongs to
    pub game_id: GameId,
}

impl GuessSubmission {
    /// Converts the submission to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// Fetches a token and sends `submission` to the store
///
/// # Errors
///
/// Returns [`SubmitError::Auth`] without contacting the store when no token
/// is available, and [`SubmitError::Store`] when the write fails.
pub fn submit_guess<A: Authenticator + ?Sized, S: GuessStore + ?Sized>(
    auth: &A,
    store: &S,
    submission: &GuessSubmission,
) -> Result<(), SubmitError> {
    let token = auth.auth_token()?;
    store.submit(&token, submission)?;
    Ok(())
}
