//! Shared types for the Soundslice API.

pub mod common;
pub mod serde_helpers;

pub use common::*;
