//! WebSocket layer: upgrade, per-connection read loop, lifecycle handling.
//!
//! Clients connect at `/` or `/ws`, optionally negotiating the configured
//! sub-protocol, and send bare text commands. Nothing is ever sent back.

pub mod connection;
pub mod handler;
pub mod lifecycle;

pub use lifecycle::ConnectionHandler;
