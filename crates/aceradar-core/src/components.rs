//! ECS components a host world attaches to its simulation entities.
//!
//! Components are plain data structs with no behavior. The tracker's
//! `WorldScene` reads them; a host with its own world representation can
//! ignore this module and implement `Scene` directly.

use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;

/// Runtime kinds (scripts) attached to an entity, first one primary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scripts(pub Vec<EntityKind>);

/// Marks an entity as present but switched off in the scene.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Inactive;

/// Marks the entity whose pose is the radar's reference frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Observer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Disabled(pub bool);

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dead(pub bool);

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Destroyed(pub bool);

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CriticallyDamaged(pub bool);

/// Ordnance has left its carrier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Fired(pub bool);

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Launched(pub bool);

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Exploded(pub bool);

/// Number of sub-pieces still attached to fracturable scenery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Fragments(pub usize);

// Pose is defined in types.rs and used directly as a component.
