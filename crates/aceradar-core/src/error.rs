//! Error types for the tracker's public operations.

use thiserror::Error;

use crate::enums::EntityKind;
use crate::types::TargetId;

/// Failures reported by registry operations and configuration loading.
///
/// None of these are fatal: callers log them and keep running.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RadarError {
    /// The entity handle is not (or no longer) present in the scene.
    #[error("Invalid entity: {0:?} is not present in the scene")]
    InvalidEntity(hecs::Entity),

    /// The target handle is not owned by this registry.
    #[error("Unknown target: {0} is not registered")]
    UnknownTarget(TargetId),

    /// A visibility rule read a property the kind does not expose.
    #[error("Missing property: {kind} has no property {property}")]
    MissingProperty {
        kind: EntityKind,
        property: &'static str,
    },

    /// Configuration could not be parsed or failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for RadarError {
    fn from(e: serde_json::Error) -> Self {
        RadarError::Config(e.to_string())
    }
}

impl From<std::io::Error> for RadarError {
    fn from(e: std::io::Error) -> Self {
        RadarError::Config(e.to_string())
    }
}

pub type RadarResult<T> = Result<T, RadarError>;
