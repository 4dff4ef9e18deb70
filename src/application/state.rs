//! Shared application state wired at startup.

use std::sync::Arc;

use crate::domain::coins::CoinLedger;
use crate::domain::dice::DiceEngine;
use crate::ports::{Broadcaster, DieRoller, IdentityStore};

use super::handlers::{
    ConnectHandler, DisconnectHandler, RegisterHandler, RequestCoinsHandler, RollDiceHandler,
    UpdateCoinsHandler, UpdateStatsHandler,
};

/// Shared application state containing all dependencies.
///
/// Cloned per request/connection; everything inside is Arc-wrapped. Handlers
/// are constructed on demand from the shared pieces.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn IdentityStore>,
    pub broadcaster: Arc<dyn Broadcaster>,
    pub ledger: Arc<CoinLedger>,
    pub engine: Arc<DiceEngine>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn IdentityStore>,
        broadcaster: Arc<dyn Broadcaster>,
        roller: Arc<dyn DieRoller>,
    ) -> Self {
        Self {
            store,
            broadcaster,
            ledger: Arc::new(CoinLedger::new()),
            engine: Arc::new(DiceEngine::new(roller)),
        }
    }

    pub fn register_handler(&self) -> RegisterHandler {
        RegisterHandler::new(self.store.clone(), self.ledger.clone())
    }

    pub fn connect_handler(&self) -> ConnectHandler {
        ConnectHandler::new(
            self.store.clone(),
            self.broadcaster.clone(),
            self.ledger.clone(),
        )
    }

    pub fn disconnect_handler(&self) -> DisconnectHandler {
        DisconnectHandler::new(self.store.clone(), self.broadcaster.clone())
    }

    pub fn update_stats_handler(&self) -> UpdateStatsHandler {
        UpdateStatsHandler::new(self.store.clone(), self.broadcaster.clone())
    }

    pub fn roll_dice_handler(&self) -> RollDiceHandler {
        RollDiceHandler::new(
            self.store.clone(),
            self.broadcaster.clone(),
            self.engine.clone(),
        )
    }

    pub fn update_coins_handler(&self) -> UpdateCoinsHandler {
        UpdateCoinsHandler::new(
            self.store.clone(),
            self.ledger.clone(),
            self.broadcaster.clone(),
        )
    }

    pub fn request_coins_handler(&self) -> RequestCoinsHandler {
        RequestCoinsHandler::new(self.ledger.clone(), self.broadcaster.clone())
    }
}
