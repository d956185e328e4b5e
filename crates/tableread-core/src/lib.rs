//! Tableread Core - Shared Script Synchronization
//!
//! This crate provides the collaborative heart of tableread:
//! - A single shared screenplay with monotonic revision tracking
//! - Subscription management keyed by registration tokens
//! - Broadcast delivery of every accepted edit to all subscribers
//! - A simulated collaborator active only while the room is occupied

pub mod document;
pub mod registry;
pub mod room;
pub mod simulator;

pub use document::{Script, ScriptUpdate, UpdateOrigin, SEED_SCRIPT};
pub use registry::{SubscriberId, Subscription};
pub use room::{RoomConfig, RoomStats, ScriptRoom};
pub use simulator::{DEFAULT_PEER_INTERVAL, PEER_LINE};
