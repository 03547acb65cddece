//! Session domain module.
//!
//! Owns the single authoritative record of "who is logged in": the pairing
//! of a bearer credential with the authenticated user's profile, kept
//! consistent with durable storage and observable by other components.
//!
//! # Module Structure
//!
//! - `model`: the `Session` snapshot type
//! - `manager`: `SessionManager` - login/logout/restore plus subscriptions

mod manager;
mod model;

pub use manager::{SessionManager, SubscriberId, keys};
pub use model::Session;
