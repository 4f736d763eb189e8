//! The registry's record for one tracked entity.

use std::collections::HashMap;

use hecs::Entity;

use aceradar_core::enums::{EntityKind, TargetCategory};
use aceradar_core::types::{BlipId, BlipPlacement, BlipStyle, Pose, TargetId, ViewportId};

use crate::scene::Scene;
use crate::visibility::VisibilityRule;

/// Second entity that is authoritative for position, heading and damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkedEntity {
    pub entity: Entity,
    pub kind: EntityKind,
}

/// One tracked entity and the blips that draw it.
///
/// The source entity is not owned: it may vanish from the scene between
/// frames. The blips are owned and released when the record goes away.
#[derive(Debug, Clone)]
pub struct RadarTarget {
    pub(crate) id: TargetId,
    pub(crate) entity: Entity,
    pub(crate) kind: EntityKind,
    pub(crate) category: TargetCategory,
    pub(crate) linked: Option<LinkedEntity>,
    pub(crate) rule: VisibilityRule,
    pub(crate) primary_blip: BlipId,
    /// One blip per auxiliary viewport, keyed by viewport.
    pub(crate) aux_blips: HashMap<ViewportId, BlipId>,
    pub(crate) style: BlipStyle,
    pub(crate) rotatable: bool,
    pub(crate) forced_visibility: Option<bool>,
    // Outcome of the most recent sweep.
    pub(crate) visible: bool,
    pub(crate) placement: BlipPlacement,
}

impl RadarTarget {
    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn category(&self) -> TargetCategory {
        self.category
    }

    pub fn linked(&self) -> Option<LinkedEntity> {
        self.linked
    }

    pub fn rule(&self) -> VisibilityRule {
        self.rule
    }

    pub fn primary_blip(&self) -> BlipId {
        self.primary_blip
    }

    pub fn aux_blip(&self, viewport: ViewportId) -> Option<BlipId> {
        self.aux_blips.get(&viewport).copied()
    }

    pub fn aux_blip_count(&self) -> usize {
        self.aux_blips.len()
    }

    pub fn style(&self) -> BlipStyle {
        self.style
    }

    pub fn rotatable(&self) -> bool {
        self.rotatable
    }

    pub fn forced_visibility(&self) -> Option<bool> {
        self.forced_visibility
    }

    /// Whether the last sweep showed this target.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Main-viewport placement from the last sweep that showed the target.
    pub fn placement(&self) -> BlipPlacement {
        self.placement
    }

    /// Whether the source entity has left the scene.
    pub fn is_deleted(&self, scene: &impl Scene) -> bool {
        !scene.contains(self.entity)
    }

    /// Current world pose, read from the linked entity when there is one.
    pub fn source_pose(&self, scene: &impl Scene) -> Option<Pose> {
        match self.linked {
            Some(linked) => scene.pose(linked.entity),
            None => scene.pose(self.entity),
        }
    }

    /// Every blip this target owns: primary first.
    pub(crate) fn all_blips(&self) -> impl Iterator<Item = BlipId> + '_ {
        std::iter::once(self.primary_blip).chain(self.aux_blips.values().copied())
    }
}
