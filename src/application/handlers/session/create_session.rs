//! CreateSessionHandler - Command handler for starting a new session.

use std::sync::Arc;

use crate::adapters::registry::SessionRegistry;
use crate::domain::session::{Scale, SessionError, SessionView};

/// Command to create a new session.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    /// Scale name, case-insensitive (`fibonacci`, `tshirt`, ...).
    pub scale: String,
    pub host_name: String,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    registry: Arc<SessionRegistry>,
}

impl CreateSessionHandler {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    /// Registers a session with the caller as host and returns the host's view.
    ///
    /// # Errors
    ///
    /// - `Validation` if the host name is blank or the scale is unknown
    pub fn handle(&self, cmd: CreateSessionCommand) -> Result<SessionView, SessionError> {
        let scale: Scale = cmd.scale.parse()?;
        let shared = self.registry.create(scale, &cmd.host_name)?;
        let session = shared.lock();

        tracing::info!(
            session_code = %session.code(),
            scale = %scale,
            "Created session"
        );

        Ok(session.view_for(session.host_id()))
    }
}
