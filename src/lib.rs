//! Planning Poker - Real-time estimation sessions
//!
//! A host opens a session with a card scale, participants join with the
//! session code, vote in secret, and the host reveals every vote at once
//! together with summary statistics. Sessions live in memory and expire
//! after a period of inactivity.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
