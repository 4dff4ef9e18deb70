//! Foundation value objects shared across the domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{SessionError, ValidationError};
pub use ids::{ConnectionId, PlayerToken};
pub use timestamp::Timestamp;
