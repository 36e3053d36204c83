//! Strongly-typed identifier value objects.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Symbols a session code may contain. `0`, `O`, `1` and `I` are left out
/// so codes can be read aloud and typed without ambiguity.
pub const SESSION_CODE_ALPHABET: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Number of characters in a session code.
pub const SESSION_CODE_LENGTH: usize = 6;

/// Number of hex characters in a participant id.
pub const PARTICIPANT_ID_LENGTH: usize = 12;

/// Short human-friendly code identifying a live session.
///
/// Always stored uppercase. Codes coming from clients are normalized on
/// construction, so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCode(String);

impl SessionCode {
    /// Generates a random code from [`SESSION_CODE_ALPHABET`].
    pub fn generate() -> Self {
        let alphabet = SESSION_CODE_ALPHABET.as_bytes();
        let mut rng = rand::thread_rng();
        let code = (0..SESSION_CODE_LENGTH)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
            .collect();
        Self(code)
    }

    /// Normalizes client input into a code. Does not check the alphabet:
    /// a malformed code simply never matches a live session.
    pub fn normalize(raw: &str) -> Self {
        Self(raw.to_uppercase())
    }

    /// Returns true if the code has the generated shape.
    pub fn is_well_formed(&self) -> bool {
        self.0.chars().count() == SESSION_CODE_LENGTH
            && self.0.chars().all(|c| SESSION_CODE_ALPHABET.contains(c))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionCode {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

/// Identifier of a participant within a session.
///
/// Server-generated ids are 12 lowercase hex characters. Ids sent back by
/// clients are taken as-is and resolved against the roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Creates a new random ParticipantId.
    pub fn new() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(hex[..PARTICIPANT_ID_LENGTH].to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
