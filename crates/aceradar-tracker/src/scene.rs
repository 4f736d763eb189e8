//! Scene collaborator: the tracker's read-only view of the live simulation.
//!
//! The tracker never owns simulation entities. It reads their kind and a
//! small set of typed state accessors through `Scene`, which any host world
//! can implement. `WorldScene` is the implementation over a `hecs::World`
//! carrying the components from `aceradar_core::components`.

use hecs::{Component, Entity, World};

use aceradar_core::components::*;
use aceradar_core::enums::{EntityKind, StateFlag};
use aceradar_core::types::Pose;

/// Read access to the simulation the radar observes.
///
/// Accessors return `None` when the entity does not exist or its kind does
/// not expose the requested state.
pub trait Scene {
    /// Every live entity paired with each runtime kind it carries.
    /// May be expensive; the registry throttles how often it asks.
    fn live_entities(&self) -> Vec<(Entity, EntityKind)>;

    /// Whether the handle still refers to a live entity.
    fn contains(&self, entity: Entity) -> bool;

    /// Whether the entity is switched on in the scene.
    fn is_active(&self, entity: Entity) -> bool;

    /// Every runtime kind the entity carries, primary first.
    fn kinds_of(&self, entity: Entity) -> Vec<EntityKind>;

    /// Primary runtime kind of the entity.
    fn kind_of(&self, entity: Entity) -> Option<EntityKind> {
        self.kinds_of(entity).first().copied()
    }

    /// Entity providing capability `kind` alongside `entity`, if any.
    fn co_located(&self, entity: Entity, kind: EntityKind) -> Option<Entity>;

    fn flag(&self, entity: Entity, flag: StateFlag) -> Option<bool>;

    /// Remaining structural sub-pieces of fracturable scenery.
    fn child_count(&self, entity: Entity) -> Option<usize>;

    fn pose(&self, entity: Entity) -> Option<Pose>;
}

/// `Scene` over a borrowed hecs world.
pub struct WorldScene<'w> {
    world: &'w World,
}

impl<'w> WorldScene<'w> {
    pub fn new(world: &'w World) -> Self {
        Self { world }
    }

    /// Pose of the entity marked `Observer`, if there is one.
    pub fn observer_pose(&self) -> Option<Pose> {
        self.world
            .query::<(&Observer, &Pose)>()
            .iter()
            .next()
            .map(|(_, (_, pose))| *pose)
    }

    fn read<C: Component + Copy>(&self, entity: Entity) -> Option<C> {
        self.world.get::<&C>(entity).ok().map(|c| *c)
    }
}

impl Scene for WorldScene<'_> {
    fn live_entities(&self) -> Vec<(Entity, EntityKind)> {
        let mut query = self.world.query::<&Scripts>();
        query
            .iter()
            .flat_map(|(entity, scripts)| scripts.0.iter().map(move |kind| (entity, *kind)))
            .collect()
    }

    fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    fn is_active(&self, entity: Entity) -> bool {
        self.world.contains(entity) && self.world.get::<&Inactive>(entity).is_err()
    }

    fn kinds_of(&self, entity: Entity) -> Vec<EntityKind> {
        self.world
            .get::<&Scripts>(entity)
            .map(|scripts| scripts.0.clone())
            .unwrap_or_default()
    }

    fn co_located(&self, entity: Entity, kind: EntityKind) -> Option<Entity> {
        let scripts = self.world.get::<&Scripts>(entity).ok()?;
        scripts.0.contains(&kind).then_some(entity)
    }

    fn flag(&self, entity: Entity, flag: StateFlag) -> Option<bool> {
        match flag {
            StateFlag::Disabled => self.read::<Disabled>(entity).map(|c| c.0),
            StateFlag::Dead => self.read::<Dead>(entity).map(|c| c.0),
            StateFlag::Destroyed => self.read::<Destroyed>(entity).map(|c| c.0),
            StateFlag::CriticallyDamaged => self.read::<CriticallyDamaged>(entity).map(|c| c.0),
            StateFlag::Fired => self.read::<Fired>(entity).map(|c| c.0),
            StateFlag::Launched => self.read::<Launched>(entity).map(|c| c.0),
            StateFlag::Exploded => self.read::<Exploded>(entity).map(|c| c.0),
        }
    }

    fn child_count(&self, entity: Entity) -> Option<usize> {
        self.read::<Fragments>(entity).map(|c| c.0)
    }

    fn pose(&self, entity: Entity) -> Option<Pose> {
        self.read::<Pose>(entity)
    }
}
