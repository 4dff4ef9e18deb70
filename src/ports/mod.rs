//! Ports - interfaces between the application core and its adapters.

mod broadcaster;
mod die_roller;
mod identity_store;

pub use broadcaster::{Broadcaster, RoomEvent};
pub use die_roller::DieRoller;
pub use identity_store::IdentityStore;
