//! Registration input - the character sheet form as the browser submits it.

use serde::Deserialize;

/// Participant role, fixed at registration.
///
/// The master controls the coin totals and rolls the yellow pool; players
/// roll the three colored pools driven by their stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Master,
    Player,
}

impl Role {
    pub fn is_master(&self) -> bool {
        matches!(self, Role::Master)
    }
}

/// Raw character-sheet form input.
///
/// Field names mirror the HTML form. Checkbox fields carry whatever the
/// browser sent: `"on"` when ticked, absent otherwise, so any present
/// non-empty value counts as checked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CharacterSheet {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub insomnia: String,
    #[serde(default, rename = "recent-event")]
    pub recent_event: String,
    #[serde(default)]
    pub appearance: String,
    #[serde(default, rename = "true-self")]
    pub true_self: String,
    #[serde(default)]
    pub path: String,
    #[serde(default, rename = "madness-skill")]
    pub madness_skill: String,
    #[serde(default, rename = "exhaustion-skill")]
    pub exhaustion_skill: String,

    #[serde(default, rename = "reaction-hit1")]
    pub reaction_hit1: Option<String>,
    #[serde(default, rename = "reaction-hit2")]
    pub reaction_hit2: Option<String>,
    #[serde(default, rename = "reaction-hit3")]
    pub reaction_hit3: Option<String>,
    #[serde(default, rename = "reaction-run1")]
    pub reaction_run1: Option<String>,
    #[serde(default, rename = "reaction-run2")]
    pub reaction_run2: Option<String>,
    #[serde(default, rename = "reaction-run3")]
    pub reaction_run3: Option<String>,
}

impl CharacterSheet {
    /// Starting fight stat: count of ticked hit-reaction checkboxes.
    pub fn fight(&self) -> i64 {
        count_checked(&[
            &self.reaction_hit1,
            &self.reaction_hit2,
            &self.reaction_hit3,
        ])
    }

    /// Starting flight stat: count of ticked run-reaction checkboxes.
    pub fn flight(&self) -> i64 {
        count_checked(&[
            &self.reaction_run1,
            &self.reaction_run2,
            &self.reaction_run3,
        ])
    }
}

fn count_checked(boxes: &[&Option<String>]) -> i64 {
    boxes
        .iter()
        .filter(|b| b.as_deref().is_some_and(|v| !v.is_empty()))
        .count() as i64
}
