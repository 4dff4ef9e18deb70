//! Axum router configuration for the HTTP surface.

use axum::{
    routing::{get, post},
    Router,
};

use crate::application::AppState;

use super::handlers::{get_character, get_players, register_master, register_player};

/// Create the API router.
///
/// # Routes
///
/// - `POST /register` - register a player, issue a bearer token
/// - `POST /register/master` - register the master, reset the coin ledger
/// - `GET /players` - read-only roster for the rendering surface
/// - `GET /characters/:token` - read-only single character record
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_player))
        .route("/register/master", post(register_master))
        .route("/players", get(get_players))
        .route("/characters/:token", get(get_character))
}
