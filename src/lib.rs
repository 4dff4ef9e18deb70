//! Nocturne - real-time session server for a tabletop-game companion tool.
//!
//! Tracks one master and several players in a single shared room, keeps each
//! participant's character state consistent across browser connections, and
//! fans out dice rolls and the shared hope/despair coin totals to every
//! connected client.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
