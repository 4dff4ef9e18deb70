//! Roll request and result types.

use serde::{Deserialize, Serialize};

/// Display name used when the acting identity registered without a name.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Inbound roll parameters.
///
/// The master reads `yellow`; players read the two extras. Extras are
/// deliberately not clamped - a negative extra is accepted and simply
/// shrinks (possibly past zero) the reported pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RollRequest {
    #[serde(default)]
    pub yellow: Option<i64>,
    #[serde(default)]
    pub red_extra: i64,
    #[serde(default)]
    pub black_extra: i64,
}

/// Outcome of a single roll, broadcast once and discarded.
///
/// Serializes with a `type` tag of `"yellow"` or `"player"`, matching the
/// wire shape clients render from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RollResult {
    Yellow(YellowRoll),
    Player(PlayerRoll),
}

/// Master roll: one yellow pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YellowRoll {
    pub player_name: String,
    pub dice_count: i64,
    pub results: Vec<u8>,
}

/// Player roll: white (discipline), red (madness + extra) and black
/// (exhaustion + extra) pools.
///
/// Pool sizes are reported as computed, so a negative extra can surface a
/// negative size alongside an empty result sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRoll {
    pub player_name: String,
    pub white_dice: i64,
    pub red_dice: i64,
    pub black_dice: i64,
    pub white_results: Vec<u8>,
    pub red_results: Vec<u8>,
    pub black_results: Vec<u8>,
}
