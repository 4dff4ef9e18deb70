//! The shared hope/despair coin ledger.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Current coin totals, both always non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinTotals {
    pub hope: i64,
    pub despair: i64,
}

/// Partial coin update: a present field replaces the stored value (clamped
/// to non-negative), an absent field keeps it. Unknown payload fields are
/// dropped during deserialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct CoinUpdate {
    #[serde(default)]
    pub hope: Option<i64>,
    #[serde(default)]
    pub despair: Option<i64>,
}

/// The single process-wide ledger.
///
/// Created at startup, reset to zero whenever a master registers, never
/// deleted. Callers enforce the master-only write gate before calling
/// [`CoinLedger::apply`]; the ledger itself only knows the clamp rule.
#[derive(Debug, Default)]
pub struct CoinLedger {
    totals: Mutex<CoinTotals>,
}

impl CoinLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current totals.
    pub fn totals(&self) -> CoinTotals {
        *self.totals.lock().expect("coin ledger lock poisoned")
    }

    /// Applies a clamped partial update and returns the new totals.
    pub fn apply(&self, update: CoinUpdate) -> CoinTotals {
        let mut totals = self.totals.lock().expect("coin ledger lock poisoned");
        if let Some(hope) = update.hope {
            totals.hope = hope.max(0);
        }
        if let Some(despair) = update.despair {
            totals.despair = despair.max(0);
        }
        *totals
    }

    /// Resets both counters to zero (master registration).
    pub fn reset(&self) {
        *self.totals.lock().expect("coin ledger lock poisoned") = CoinTotals::default();
    }
}
