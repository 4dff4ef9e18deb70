//! HTTP handlers for registration and the read-only rendering accessors.
//!
//! These handlers connect axum routes to the application layer. Everything
//! here is thin I/O glue; the room semantics live in the handlers they call.

use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};

use crate::application::handlers::RegisterCommand;
use crate::application::AppState;
use crate::domain::character::{CharacterSheet, Role};
use crate::domain::foundation::PlayerToken;
use crate::ports::IdentityStore;

use super::dto::{CharacterResponse, ErrorResponse, RegisterResponse};

/// `POST /api/register` - submit a character sheet, receive a bearer token.
pub async fn register_player(
    State(state): State<AppState>,
    Form(sheet): Form<CharacterSheet>,
) -> impl IntoResponse {
    register(state, sheet, Role::Player).await
}

/// `POST /api/register/master` - same sheet, master role.
///
/// Registering a master also resets the coin ledger to zero.
pub async fn register_master(
    State(state): State<AppState>,
    Form(sheet): Form<CharacterSheet>,
) -> impl IntoResponse {
    register(state, sheet, Role::Master).await
}

async fn register(state: AppState, sheet: CharacterSheet, role: Role) -> impl IntoResponse {
    match state
        .register_handler()
        .handle(RegisterCommand { sheet, role })
        .await
    {
        Ok(token) => (
            StatusCode::CREATED,
            Json(RegisterResponse {
                token: token.to_string(),
            }),
        )
            .into_response(),
        Err(err) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::from(err)),
        )
            .into_response(),
    }
}

/// `GET /api/players` - the current roster, as broadcast to the room.
pub async fn get_players(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.roster().await)
}

/// `GET /api/characters/:token` - one full record for the rendering surface.
pub async fn get_character(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> impl IntoResponse {
    let token: PlayerToken = match token.parse() {
        Ok(token) => token,
        Err(_) => return StatusCode::NOT_FOUND.into_response(),
    };
    match state.store.get(&token).await {
        Some(record) => Json(CharacterResponse::from(&record)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// `GET /health` - liveness probe.
pub async fn health() -> impl IntoResponse {
    "ok"
}
