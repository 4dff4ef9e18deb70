//! The character record - one identity per issued bearer token.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ConnectionId, PlayerToken, ValidationError};

use super::registration::{CharacterSheet, Role};

/// Default starting discipline for a fresh character.
pub const DEFAULT_DISCIPLINE: i64 = 3;

/// A registered participant and their character state.
///
/// Free-text sheet fields are set once at registration and never change.
/// Numeric stats mutate only through the allow-listed [`StatPatch`]; role
/// and identity fields stay frozen so a client cannot rewrite them after
/// registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRecord {
    token: PlayerToken,
    name: String,
    description: String,
    insomnia: String,
    recent_event: String,
    appearance: String,
    true_self: String,
    path: String,
    madness_skill: String,
    exhaustion_skill: String,
    madness: i64,
    discipline: i64,
    exhaustion: i64,
    fight: i64,
    flight: i64,
    role: Role,
    in_game: bool,
    connection_id: Option<ConnectionId>,
}

impl CharacterRecord {
    /// Builds a record from a submitted sheet.
    ///
    /// `name` is the only required field, trimmed and non-empty - and only
    /// for players. A master never appears on the roster, so a nameless
    /// master is accepted (their rolls fall back to the anonymous label).
    pub fn new(
        token: PlayerToken,
        sheet: CharacterSheet,
        role: Role,
    ) -> Result<Self, ValidationError> {
        let name = sheet.name.trim().to_string();
        if name.is_empty() && !role.is_master() {
            return Err(ValidationError::empty_field("name"));
        }

        Ok(Self {
            token,
            name,
            fight: sheet.fight(),
            flight: sheet.flight(),
            description: sheet.description,
            insomnia: sheet.insomnia,
            recent_event: sheet.recent_event,
            appearance: sheet.appearance,
            true_self: sheet.true_self,
            path: sheet.path,
            madness_skill: sheet.madness_skill,
            exhaustion_skill: sheet.exhaustion_skill,
            madness: 0,
            discipline: DEFAULT_DISCIPLINE,
            exhaustion: 0,
            role,
            in_game: false,
            connection_id: None,
        })
    }

    pub fn token(&self) -> &PlayerToken {
        &self.token
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn insomnia(&self) -> &str {
        &self.insomnia
    }

    pub fn recent_event(&self) -> &str {
        &self.recent_event
    }

    pub fn appearance(&self) -> &str {
        &self.appearance
    }

    pub fn true_self(&self) -> &str {
        &self.true_self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn madness_skill(&self) -> &str {
        &self.madness_skill
    }

    pub fn exhaustion_skill(&self) -> &str {
        &self.exhaustion_skill
    }

    pub fn madness(&self) -> i64 {
        self.madness
    }

    pub fn discipline(&self) -> i64 {
        self.discipline
    }

    pub fn exhaustion(&self) -> i64 {
        self.exhaustion
    }

    pub fn fight(&self) -> i64 {
        self.fight
    }

    pub fn flight(&self) -> i64 {
        self.flight
    }

    pub fn is_master(&self) -> bool {
        self.role.is_master()
    }

    pub fn in_game(&self) -> bool {
        self.in_game
    }

    pub fn connection_id(&self) -> Option<ConnectionId> {
        self.connection_id
    }

    /// Applies an allow-listed stat patch. Present values are clamped to
    /// non-negative; absent fields keep their value. Returns whether
    /// anything changed.
    pub fn apply(&mut self, patch: StatPatch) -> bool {
        let before = (
            self.madness,
            self.discipline,
            self.exhaustion,
            self.fight,
            self.flight,
        );
        if let Some(v) = patch.madness {
            self.madness = v.max(0);
        }
        if let Some(v) = patch.discipline {
            self.discipline = v.max(0);
        }
        if let Some(v) = patch.exhaustion {
            self.exhaustion = v.max(0);
        }
        if let Some(v) = patch.fight {
            self.fight = v.max(0);
        }
        if let Some(v) = patch.flight {
            self.flight = v.max(0);
        }
        before
            != (
                self.madness,
                self.discipline,
                self.exhaustion,
                self.fight,
                self.flight,
            )
    }

    /// Marks this identity present under `connection_id`.
    ///
    /// A repeated connect simply overwrites the connection id - last writer
    /// wins, no duplicate-session detection.
    pub fn mark_connected(&mut self, connection_id: ConnectionId) {
        self.in_game = true;
        self.connection_id = Some(connection_id);
    }

    /// Clears presence. The record itself survives - a disconnected token is
    /// idle, not deleted.
    pub fn mark_disconnected(&mut self) {
        self.in_game = false;
        self.connection_id = None;
    }

    /// Public roster view: name and numeric stats, none of the sheet text.
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            name: self.name.clone(),
            madness: self.madness,
            discipline: self.discipline,
            exhaustion: self.exhaustion,
            fight: self.fight,
            flight: self.flight,
        }
    }
}

/// Allow-listed mutable stats.
///
/// This is the entire mutation surface exposed to clients after
/// registration. Unknown fields in the inbound payload are dropped during
/// deserialization, never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct StatPatch {
    #[serde(default)]
    pub madness: Option<i64>,
    #[serde(default)]
    pub discipline: Option<i64>,
    #[serde(default)]
    pub exhaustion: Option<i64>,
    #[serde(default)]
    pub fight: Option<i64>,
    #[serde(default)]
    pub flight: Option<i64>,
}

impl StatPatch {
    pub fn is_empty(&self) -> bool {
        self.madness.is_none()
            && self.discipline.is_none()
            && self.exhaustion.is_none()
            && self.fight.is_none()
            && self.flight.is_none()
    }
}

/// Roster entry broadcast to every client: name plus numeric stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub madness: i64,
    pub discipline: i64,
    pub exhaustion: i64,
    pub fight: i64,
    pub flight: i64,
}
