//! WebSocket adapters for live session updates.
//!
//! Pushes session events to connected clients.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Command handlers                          │
//! │   join / vote / reveal / reset / end                         │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              │ SessionEventPublisher
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  BroadcastCoordinator                        │
//! │   Group: K7M2QX        Group: 9HPWZA                         │
//! │   ├── conn-a           ├── conn-d                            │
//! │   └── conn-b           └── conn-e                            │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              │ per-connection queue (events and
//!                              ▼  direct replies, one FIFO)
//!                     socket writer task
//! ```
//!
//! # Components
//!
//! - [`coordinator`] - Group management and event fan-out
//! - [`messages`] - WebSocket message protocol types
//! - [`subscribe`] - Attaching a connection to a session
//! - [`handler`] - Axum WebSocket upgrade handler and command dispatch

pub mod coordinator;
pub mod handler;
pub mod messages;
pub mod subscribe;

pub use coordinator::{BroadcastCoordinator, Connection, ConnectionId, Delivery, Outbound};
pub use handler::{websocket_routes, ws_handler, WebSocketState};
pub use messages::{
    CastVoteRequest, ClientMessage, ConnectedMessage, ErrorMessage, EventMessage, PongMessage,
    ServerMessage, SessionRequest, SessionSnapshot, SubscribeRequest, SubscribedMessage,
};
pub use subscribe::{SubscribeSessionCommand, SubscribeSessionHandler};
