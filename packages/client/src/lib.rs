//! Minimal WebSocket chat client.
//!
//! The client keeps a single connection to a relay endpoint, sends whatever
//! the user submits as a plain text frame, and appends every inbound text
//! message to a display board in arrival order.

pub mod client;
pub mod config;
pub mod connection;
pub mod error;
pub mod events;
pub mod runner;
pub mod ui;
pub mod view;

pub use client::ChatClient;
pub use config::ClientConfig;
pub use connection::{Connection, InboundStream, WebSocketConnection};
pub use error::ClientError;
pub use runner::{run_client, run_session};
