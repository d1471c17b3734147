//! Core types for huddle.
//!
//! This crate holds everything the CLI needs that doesn't talk to the network:
//! - `model`: profiles, events and log entries as the API returns them
//! - `timezone` and `format`: label-to-zone mapping and instant rendering
//! - `membership`: participant add/remove deltas for event edits
//! - `draft` and `board`: form validation and optimistic local updates
//! - `protocol`: request bodies for the scheduling API

pub mod board;
pub mod config;
pub mod draft;
pub mod error;
pub mod format;
pub mod membership;
pub mod model;
pub mod protocol;
pub mod timezone;

pub use error::{HuddleError, HuddleResult};
pub use model::*;
