//! Domain layer - planning poker business logic.
//!
//! - `foundation` - identifiers, timestamps, shared error types
//! - `session` - the session aggregate, its events, and vote aggregation

pub mod foundation;
pub mod session;
