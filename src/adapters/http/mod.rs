//! HTTP adapters - registration and read-only accessors.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::health;
pub use routes::api_router;
