//! The dice engine: pool sizing and drawing for both roll branches.

use std::sync::Arc;

use crate::domain::character::CharacterRecord;
use crate::ports::DieRoller;

use super::roll::{PlayerRoll, RollRequest, RollResult, YellowRoll, ANONYMOUS_NAME};

/// Smallest yellow pool the master can roll.
pub const YELLOW_MIN: i64 = 1;
/// Largest yellow pool the master can roll.
pub const YELLOW_MAX: i64 = 15;

/// Produces sorted dice-roll results for master and player requests.
///
/// The engine is pure apart from the injected [`DieRoller`]; every draw is
/// an independent uniform d6 and each pool is sorted ascending before it
/// leaves the engine.
pub struct DiceEngine {
    roller: Arc<dyn DieRoller>,
}

impl DiceEngine {
    pub fn new(roller: Arc<dyn DieRoller>) -> Self {
        Self { roller }
    }

    /// Rolls for the given identity, branching on its role.
    ///
    /// Master: a single yellow pool, the requested count clamped into
    /// [`YELLOW_MIN`]..=[`YELLOW_MAX`]. Player: white from discipline, red
    /// from madness + extra, black from exhaustion + extra. Pool sizes are
    /// reported as computed; a non-positive size draws nothing.
    pub fn roll(&self, record: &CharacterRecord, request: RollRequest) -> RollResult {
        let player_name = display_name(record);

        if record.is_master() {
            let dice_count = request.yellow.unwrap_or(1).clamp(YELLOW_MIN, YELLOW_MAX);
            RollResult::Yellow(YellowRoll {
                player_name,
                dice_count,
                results: self.draw_pool(dice_count),
            })
        } else {
            let white_dice = record.discipline();
            let red_dice = record.madness() + request.red_extra;
            let black_dice = record.exhaustion() + request.black_extra;
            RollResult::Player(PlayerRoll {
                player_name,
                white_dice,
                red_dice,
                black_dice,
                white_results: self.draw_pool(white_dice),
                red_results: self.draw_pool(red_dice),
                black_results: self.draw_pool(black_dice),
            })
        }
    }

    fn draw_pool(&self, size: i64) -> Vec<u8> {
        let mut results: Vec<u8> = (0..size.max(0)).map(|_| self.roller.roll()).collect();
        results.sort_unstable();
        results
    }
}

fn display_name(record: &CharacterRecord) -> String {
    if record.name().is_empty() {
        ANONYMOUS_NAME.to_string()
    } else {
        record.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use proptest::prelude::*;

    use crate::domain::character::{CharacterSheet, Role, StatPatch};
    use crate::domain::foundation::PlayerToken;

    use super::*;

    /// Roller that replays a fixed face sequence, cycling when exhausted.
    struct ScriptedRoller {
        faces: Vec<u8>,
        next: Mutex<usize>,
    }

    impl ScriptedRoller {
        fn new(faces: Vec<u8>) -> Arc<Self> {
            Arc::new(Self {
                faces,
                next: Mutex::new(0),
            })
        }
    }

    impl DieRoller for ScriptedRoller {
        fn roll(&self) -> u8 {
            let mut next = self.next.lock().unwrap();
            let face = self.faces[*next % self.faces.len()];
            *next += 1;
            face
        }
    }

    fn engine(faces: Vec<u8>) -> DiceEngine {
        DiceEngine::new(ScriptedRoller::new(faces))
    }

    fn record(role: Role, name: &str) -> CharacterRecord {
        let sheet = CharacterSheet {
            name: name.to_string(),
            ..CharacterSheet::default()
        };
        CharacterRecord::new(PlayerToken::new(), sheet, role).unwrap()
    }

    fn player_with_stats(madness: i64, discipline: i64, exhaustion: i64) -> CharacterRecord {
        let mut record = record(Role::Player, "Vera");
        record.apply(StatPatch {
            madness: Some(madness),
            discipline: Some(discipline),
            exhaustion: Some(exhaustion),
            ..StatPatch::default()
        });
        record
    }

    #[test]
    fn master_roll_is_sorted_ascending() {
        let engine = engine(vec![6, 1, 4, 2]);
        let result = engine.roll(
            &record(Role::Master, "GM"),
            RollRequest {
                yellow: Some(4),
                ..RollRequest::default()
            },
        );
        match result {
            RollResult::Yellow(roll) => {
                assert_eq!(roll.dice_count, 4);
                assert_eq!(roll.results, vec![1, 2, 4, 6]);
            }
            other => panic!("expected yellow roll, got {:?}", other),
        }
    }

    #[test]
    fn master_request_below_range_rolls_one_die() {
        let engine = engine(vec![3]);
        let result = engine.roll(
            &record(Role::Master, "GM"),
            RollRequest {
                yellow: Some(-5),
                ..RollRequest::default()
            },
        );
        match result {
            RollResult::Yellow(roll) => {
                assert_eq!(roll.dice_count, 1);
                assert_eq!(roll.results.len(), 1);
            }
            other => panic!("expected yellow roll, got {:?}", other),
        }
    }

    #[test]
    fn master_request_above_range_rolls_fifteen_dice() {
        let engine = engine(vec![1, 2, 3, 4, 5, 6]);
        let result = engine.roll(
            &record(Role::Master, "GM"),
            RollRequest {
                yellow: Some(99),
                ..RollRequest::default()
            },
        );
        match result {
            RollResult::Yellow(roll) => {
                assert_eq!(roll.dice_count, 15);
                assert_eq!(roll.results.len(), 15);
            }
            other => panic!("expected yellow roll, got {:?}", other),
        }
    }

    #[test]
    fn master_roll_defaults_to_one_die() {
        let engine = engine(vec![5]);
        match engine.roll(&record(Role::Master, "GM"), RollRequest::default()) {
            RollResult::Yellow(roll) => assert_eq!(roll.dice_count, 1),
            other => panic!("expected yellow roll, got {:?}", other),
        }
    }

    #[test]
    fn player_pools_follow_stats_and_extras() {
        let engine = engine(vec![2, 5, 3, 6, 1, 4]);
        let result = engine.roll(
            &player_with_stats(1, 3, 0),
            RollRequest {
                red_extra: 1,
                black_extra: 2,
                ..RollRequest::default()
            },
        );
        match result {
            RollResult::Player(roll) => {
                assert_eq!(roll.white_dice, 3);
                assert_eq!(roll.red_dice, 2);
                assert_eq!(roll.black_dice, 2);
                assert_eq!(roll.white_results.len(), 3);
                assert_eq!(roll.red_results.len(), 2);
                assert_eq!(roll.black_results.len(), 2);
            }
            other => panic!("expected player roll, got {:?}", other),
        }
    }

    #[test]
    fn negative_extra_reports_negative_pool_and_draws_nothing() {
        let engine = engine(vec![4]);
        let result = engine.roll(
            &player_with_stats(0, 3, 0),
            RollRequest {
                red_extra: -2,
                ..RollRequest::default()
            },
        );
        match result {
            RollResult::Player(roll) => {
                assert_eq!(roll.red_dice, -2);
                assert!(roll.red_results.is_empty());
                assert_eq!(roll.white_results.len(), 3);
            }
            other => panic!("expected player roll, got {:?}", other),
        }
    }

    #[test]
    fn nameless_master_rolls_under_the_anonymous_label() {
        let engine = engine(vec![2]);
        match engine.roll(&record(Role::Master, ""), RollRequest::default()) {
            RollResult::Yellow(roll) => assert_eq!(roll.player_name, ANONYMOUS_NAME),
            other => panic!("expected yellow roll, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn every_pool_is_in_range_sorted_and_sized(
            faces in proptest::collection::vec(1u8..=6, 1..64),
            madness in 0i64..20,
            discipline in 0i64..20,
            exhaustion in 0i64..20,
            red_extra in -20i64..20,
            black_extra in -20i64..20,
        ) {
            let engine = engine(faces);
            let result = engine.roll(
                &player_with_stats(madness, discipline, exhaustion),
                RollRequest { yellow: None, red_extra, black_extra },
            );
            let roll = match result {
                RollResult::Player(roll) => roll,
                other => panic!("expected player roll, got {:?}", other),
            };
            for (size, results) in [
                (roll.white_dice, &roll.white_results),
                (roll.red_dice, &roll.red_results),
                (roll.black_dice, &roll.black_results),
            ] {
                prop_assert_eq!(results.len() as i64, size.max(0));
                prop_assert!(results.iter().all(|f| (1..=6).contains(f)));
                prop_assert!(results.windows(2).all(|w| w[0] <= w[1]));
            }
        }

        #[test]
        fn yellow_count_is_always_clamped(requested in -1000i64..1000) {
            let engine = engine(vec![1, 6, 3]);
            let result = engine.roll(
                &record(Role::Master, "GM"),
                RollRequest { yellow: Some(requested), ..RollRequest::default() },
            );
            let roll = match result {
                RollResult::Yellow(roll) => roll,
                other => panic!("expected yellow roll, got {:?}", other),
            };
            prop_assert!((YELLOW_MIN..=YELLOW_MAX).contains(&roll.dice_count));
            prop_assert_eq!(roll.results.len() as i64, roll.dice_count);
            prop_assert!(roll.results.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
