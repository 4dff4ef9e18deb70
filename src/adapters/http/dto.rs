//! Request/response DTOs for the HTTP surface.

use serde::Serialize;

use crate::domain::character::CharacterRecord;
use crate::domain::foundation::ValidationError;

/// Successful registration: the bearer token the client must present on
/// every connection.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub token: String,
}

/// Field-keyed validation failure.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub field: String,
    pub message: String,
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        Self {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

/// Full character view for the rendering surface.
///
/// The token itself is not echoed back; the caller already holds it.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterResponse {
    pub name: String,
    pub description: String,
    pub insomnia: String,
    pub recent_event: String,
    pub appearance: String,
    pub true_self: String,
    pub path: String,
    pub madness_skill: String,
    pub exhaustion_skill: String,
    pub madness: i64,
    pub discipline: i64,
    pub exhaustion: i64,
    pub fight: i64,
    pub flight: i64,
    pub is_master: bool,
    pub in_game: bool,
}

impl From<&CharacterRecord> for CharacterResponse {
    fn from(record: &CharacterRecord) -> Self {
        Self {
            name: record.name().to_string(),
            description: record.description().to_string(),
            insomnia: record.insomnia().to_string(),
            recent_event: record.recent_event().to_string(),
            appearance: record.appearance().to_string(),
            true_self: record.true_self().to_string(),
            path: record.path().to_string(),
            madness_skill: record.madness_skill().to_string(),
            exhaustion_skill: record.exhaustion_skill().to_string(),
            madness: record.madness(),
            discipline: record.discipline(),
            exhaustion: record.exhaustion(),
            fight: record.fight(),
            flight: record.flight(),
            is_master: record.is_master(),
            in_game: record.in_game(),
        }
    }
}
