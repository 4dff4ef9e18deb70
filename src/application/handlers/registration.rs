//! RegisterHandler - issues a bearer token for a submitted character sheet.

use std::sync::Arc;

use crate::domain::character::{CharacterRecord, CharacterSheet, Role};
use crate::domain::coins::CoinLedger;
use crate::domain::foundation::{PlayerToken, ValidationError};
use crate::ports::IdentityStore;

/// Command to register a new participant.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub sheet: CharacterSheet,
    pub role: Role,
}

/// Handler for registration submissions.
pub struct RegisterHandler {
    store: Arc<dyn IdentityStore>,
    ledger: Arc<CoinLedger>,
}

impl RegisterHandler {
    pub fn new(store: Arc<dyn IdentityStore>, ledger: Arc<CoinLedger>) -> Self {
        Self { store, ledger }
    }

    /// Validates the sheet, stores the record and returns the fresh token.
    ///
    /// A master registration also resets the coin ledger to zero - the
    /// ledger belongs to whoever runs the table.
    pub async fn handle(&self, cmd: RegisterCommand) -> Result<PlayerToken, ValidationError> {
        let token = PlayerToken::new();
        let record = CharacterRecord::new(token, cmd.sheet, cmd.role)?;
        let is_master = record.is_master();

        self.store.insert(record).await;
        if is_master {
            self.ledger.reset();
        }

        tracing::info!(master = is_master, "participant registered");
        Ok(token)
    }
}
