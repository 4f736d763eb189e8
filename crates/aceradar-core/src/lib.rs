//! Core types and definitions for the ACE RADAR tracker.
//!
//! This crate defines the vocabulary shared across the other crates:
//! entity kinds, blip styles, configuration, errors, events, and the
//! serializable snapshot view. It knows nothing about how a frame is run.

pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

pub use error::{RadarError, RadarResult};
