//! Route handlers for the server.
//!
//! # Modules
//!
//! - [`health`]: Liveness endpoint
//! - [`api`]: REST endpoints for results, parameters and latency
//! - [`web`]: Server-rendered HTML page
//! - [`ws`]: WebSocket result stream

pub mod api;
pub mod health;
pub mod web;
pub mod ws;
