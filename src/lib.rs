//! Utsav - Festival Portal Client Library
//!
//! A terminal client for the Utsav festival portal, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
