//! Application layer managing state and portal workflows.
//!
//! This module coordinates between the domain layer and presentation
//! layer. All state changes are synchronous; network work is queued as
//! requests and applied back later as outcomes.

pub mod state;

pub use state::*;
