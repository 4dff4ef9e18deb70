//! Adapters - infrastructure implementations of the ports.

pub mod broadcast;
pub mod dice;
pub mod http;
pub mod memory;
pub mod websocket;

pub use broadcast::InMemoryBroadcaster;
pub use dice::{SequenceRoller, ThreadRngRoller};
pub use memory::InMemoryIdentityStore;
pub use websocket::ConnectionRegistry;
