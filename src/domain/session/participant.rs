//! Session participants.

use serde::Serialize;

use crate::domain::foundation::{ParticipantId, Timestamp, ValidationError};

/// A person taking part in a session.
///
/// # Invariants
///
/// - `name` is trimmed and non-empty
/// - exactly one participant per session has `is_host` set, the creator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    id: ParticipantId,
    name: String,
    is_host: bool,
    joined_at: Timestamp,
}

impl Participant {
    /// Creates the host participant for a new session.
    ///
    /// # Errors
    ///
    /// - `EmptyField("hostName")` if the name is blank
    pub fn host(name: &str) -> Result<Self, ValidationError> {
        Self::build(name, true, "hostName")
    }

    /// Creates a non-host participant joining an existing session.
    ///
    /// # Errors
    ///
    /// - `EmptyField("name")` if the name is blank
    pub fn guest(name: &str) -> Result<Self, ValidationError> {
        Self::build(name, false, "name")
    }

    fn build(name: &str, is_host: bool, field: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        Ok(Self {
            id: ParticipantId::new(),
            name: name.to_string(),
            is_host,
            joined_at: Timestamp::now(),
        })
    }

    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_host(&self) -> bool {
        self.is_host
    }

    pub fn joined_at(&self) -> &Timestamp {
        &self.joined_at
    }
}
