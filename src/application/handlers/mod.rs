//! Application command handlers - one per inbound operation.

mod character;
mod coins;
mod dice;
mod presence;
mod registration;

pub use character::{UpdateStatsCommand, UpdateStatsHandler};
pub use coins::{
    RequestCoinsCommand, RequestCoinsHandler, UpdateCoinsCommand, UpdateCoinsHandler,
};
pub use dice::{RollDiceCommand, RollDiceHandler};
pub use presence::{ConnectCommand, ConnectHandler, DisconnectCommand, DisconnectHandler};
pub use registration::{RegisterCommand, RegisterHandler};
