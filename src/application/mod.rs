//! Application layer - command handlers and shared state.

pub mod handlers;
mod state;

pub use state::AppState;
