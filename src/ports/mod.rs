//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionEventPublisher` - fan-out of session events to connected clients

mod event_publisher;

pub use event_publisher::SessionEventPublisher;
