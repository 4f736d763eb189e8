//! Events emitted by the registry for hosts that react to tracking changes.

use crate::enums::{EntityKind, RemovalReason};
use crate::types::{TargetId, ViewportId};

/// A change in the registry, reported once in the frame it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum RadarEvent {
    /// A new target started being tracked.
    TargetRegistered {
        target: TargetId,
        entity: hecs::Entity,
        kind: EntityKind,
    },
    /// A target stopped being tracked and its blips were released.
    TargetRemoved {
        target: TargetId,
        reason: RemovalReason,
    },
    /// An auxiliary viewport joined the viewport list.
    ViewportAttached { viewport: ViewportId },
    /// An auxiliary viewport left the viewport list.
    ViewportDetached { viewport: ViewportId },
    /// The session became active.
    SessionStarted,
    /// The session ended; `cleared` targets were dropped.
    SessionEnded { cleared: usize },
}
