//! DieRoller port - the randomness seam of the dice engine.

/// Source of single d6 draws.
///
/// Implementations must return each face in `1..=6` with (statistically)
/// uniform probability; cryptographic strength is not required. Tests
/// substitute deterministic sequences.
pub trait DieRoller: Send + Sync {
    /// One uniform d6 face in `1..=6`.
    fn roll(&self) -> u8;
}
