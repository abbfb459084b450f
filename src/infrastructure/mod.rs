//! Infrastructure layer providing external service integrations.
//!
//! This module contains the HTTP client for the portal API, the
//! background request worker, session file persistence, and the
//! roster CSV export.

pub mod api;
pub mod worker;
pub mod session;
pub mod roster;

pub use api::*;
pub use worker::*;
pub use session::*;
pub use roster::*;
