//! Dice rolling: pool sizing rules, the roll branch per role, and the
//! tagged results fanned out to the room.

mod engine;
mod roll;

pub use engine::{DiceEngine, YELLOW_MAX, YELLOW_MIN};
pub use roll::{PlayerRoll, RollRequest, RollResult, YellowRoll, ANONYMOUS_NAME};
