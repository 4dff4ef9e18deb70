//! WebSocket adapters for the real-time room channel.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Application handlers                  │
//! │   connect / update_character / roll_dice / coins      │
//! └──────────────────────────────────────────────────────┘
//!                          │ RoomEvent
//!                          ▼
//! ┌──────────────────────────────────────────────────────┐
//! │                 ConnectionRegistry                    │
//! │   conn-a ── queue    conn-b ── queue    conn-c ── …   │
//! │   explicit fan-out loop, best-effort try_send         │
//! └──────────────────────────────────────────────────────┘
//!                          │ ServerMessage (JSON)
//!                          ▼
//!                 per-socket send task
//! ```
//!
//! # Components
//!
//! - [`messages`] - wire protocol types
//! - [`connections`] - live endpoint registry implementing `Broadcaster`
//! - [`handler`] - axum upgrade handler and socket lifecycle

pub mod connections;
pub mod handler;
pub mod messages;

pub use connections::ConnectionRegistry;
pub use handler::{ws_handler, ws_router, WsState};
pub use messages::{ClientMessage, ServerMessage};
