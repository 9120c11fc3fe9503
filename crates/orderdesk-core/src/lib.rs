#![deny(missing_docs)]
//! Order Desk core library.
//!
//! Per-user session state, the SMM panel client and the transport-agnostic
//! dispatcher that ties them together.

/// Menu and remote action tags.
pub mod action;
/// Configuration management.
pub mod config;
/// Conversation dispatcher.
pub mod dispatcher;
/// SMM panel API client.
pub mod panel;
/// Per-user session store.
pub mod session;
/// Utility functions.
pub mod utils;
/// User-facing texts and menu layout.
pub mod views;

#[cfg(test)]
pub mod testing;
