//! Server crate: Axum-based HTTP and WebSocket surface for the cost simulator.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐         ┌────────────────────────┐
//! │  SimulationState        │         │  Axum Server           │
//! │  (sync, one Mutex)      │         │  (async/await)         │
//! │                         │         │                        │
//! │  recompute()            │────────>│ broadcast to WS        │
//! │  hook.on_result()       │ channel │ handle REST requests   │
//! │                         │<────────│ update_parameters()    │
//! └─────────────────────────┘  calls  └────────────────────────┘
//!                                           │ Notify
//!                                           ▼
//!                                     RefreshLoop (early fetch)
//! ```
//!
//! # Design Principles
//!
//! - **Declarative**: Routes and handlers declared via Axum's type-safe routing
//! - **Modular**: Each feature (health, WebSocket, API, page) in separate module
//! - **SoC**: `SimulationState` owns data; server reads, validates and forwards
//!
//! # Modules
//!
//! - [`app`]: Axum application builder and router setup
//! - [`state`]: Shared server state (simulation handle, channels, metrics)
//! - [`error`]: Unified error handling with HTTP status codes
//! - [`routes`]: HTTP route handlers (health, api, web, ws)
//! - [`hooks`]: `ResultHook` implementation feeding the WebSocket broadcast

pub mod app;
pub mod error;
pub mod hooks;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use app::{ServerConfig, create_app};
pub use error::{AppError, AppResult};
pub use hooks::BroadcastHook;
pub use state::{RESULT_CHANNEL_CAPACITY, ServerMetrics, ServerState};
