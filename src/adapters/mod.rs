//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to the outside world:
//! - `registry` - In-memory session store
//! - `websocket` - Live event fan-out to connected clients
//! - `scheduler` - Idle-session expiry
//! - `http` - REST API

pub mod http;
pub mod registry;
pub mod scheduler;
pub mod websocket;

pub use registry::{SessionRegistry, SharedSession};
pub use scheduler::{CleanupScheduler, CleanupSchedulerConfig};
pub use websocket::{BroadcastCoordinator, Connection};
