//! Session registry adapter.
//!
//! Sessions are volatile: they live in process memory only and are lost on
//! restart.

mod session_registry;

pub use session_registry::{IdleSession, SessionRegistry, SharedSession};
