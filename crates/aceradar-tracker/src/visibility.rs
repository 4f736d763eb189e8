//! Visibility oracle: decides whether a target's blips are hidden this frame.
//!
//! Each kind resolves once, at registration, to a `VisibilityRule`. Every
//! frame the rule reads the typed state accessors it names. A rule whose
//! state is missing on the entity is a configuration error: it is logged
//! and the target stays shown so the frame loop keeps running.

use hecs::Entity;

use aceradar_core::enums::{EntityKind, StateFlag};
use aceradar_core::error::{RadarError, RadarResult};

use crate::scene::Scene;
use crate::target::RadarTarget;

/// How a kind's current state maps to "hidden".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityRule {
    /// Hidden while the flag is set on the source entity.
    HiddenWhen(StateFlag),
    /// Hidden while the flag is set on the linked entity.
    HiddenWhenLinked(StateFlag),
    /// Shown only between `launched` becoming true and `spent` becoming true.
    InFlight { launched: StateFlag, spent: StateFlag },
    /// Hidden once fewer than this many structural pieces remain.
    MinChildren(usize),
    AlwaysShown,
}

/// Rule table for the closed kind set.
pub fn rule_for(kind: EntityKind, fracture_min_children: usize) -> VisibilityRule {
    match kind {
        EntityKind::RotatingMissileLauncher => VisibilityRule::HiddenWhen(StateFlag::Disabled),
        EntityKind::AntiAircraftTank => VisibilityRule::HiddenWhen(StateFlag::Dead),
        EntityKind::SimpleGroundVehicle => VisibilityRule::HiddenWhen(StateFlag::Destroyed),
        EntityKind::SinkableShip => VisibilityRule::HiddenWhen(StateFlag::CriticallyDamaged),
        EntityKind::AiControlledAircraft => {
            VisibilityRule::HiddenWhenLinked(StateFlag::CriticallyDamaged)
        }
        EntityKind::Missile | EntityKind::Bomb => VisibilityRule::InFlight {
            launched: StateFlag::Fired,
            spent: StateFlag::Destroyed,
        },
        EntityKind::Rocket => VisibilityRule::InFlight {
            launched: StateFlag::Launched,
            spent: StateFlag::Exploded,
        },
        EntityKind::FracturedObject => VisibilityRule::MinChildren(fracture_min_children),
        _ => VisibilityRule::AlwaysShown,
    }
}

/// Whether the target's blips should be hidden this frame.
///
/// Missing state is logged and treated as "not hidden".
pub fn should_hide(scene: &impl Scene, target: &RadarTarget) -> bool {
    match evaluate(scene, target) {
        Ok(hidden) => hidden,
        Err(e) => {
            log::error!("Visibility check for {} failed: {e}", target.id());
            false
        }
    }
}

/// Evaluate visibility, surfacing missing state as an error.
pub fn evaluate(scene: &impl Scene, target: &RadarTarget) -> RadarResult<bool> {
    if let Some(forced) = target.forced_visibility {
        return Ok(forced);
    }
    if !scene.contains(target.entity) || !scene.is_active(target.entity) {
        return Ok(true);
    }

    let source = Source {
        entity: target.entity,
        kind: target.kind,
    };
    match target.rule {
        VisibilityRule::HiddenWhen(flag) => source.flag(scene, flag),
        VisibilityRule::HiddenWhenLinked(flag) => match target.linked {
            Some(linked) => Source {
                entity: linked.entity,
                kind: linked.kind,
            }
            .flag(scene, flag),
            None => Err(missing(target.kind, flag)),
        },
        VisibilityRule::InFlight { launched, spent } => {
            Ok(!source.flag(scene, launched)? || source.flag(scene, spent)?)
        }
        VisibilityRule::MinChildren(min) => scene
            .child_count(target.entity)
            .map(|count| count < min)
            .ok_or(RadarError::MissingProperty {
                kind: target.kind,
                property: "childCount",
            }),
        VisibilityRule::AlwaysShown => Ok(false),
    }
}

struct Source {
    entity: Entity,
    kind: EntityKind,
}

impl Source {
    fn flag(&self, scene: &impl Scene, flag: StateFlag) -> RadarResult<bool> {
        scene
            .flag(self.entity, flag)
            .ok_or_else(|| missing(self.kind, flag))
    }
}

fn missing(kind: EntityKind, flag: StateFlag) -> RadarError {
    RadarError::MissingProperty {
        kind,
        property: flag.property_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use hecs::World;

    use aceradar_core::components::*;
    use aceradar_core::constants::FRACTURE_MIN_CHILDREN;
    use aceradar_core::enums::TargetCategory;
    use aceradar_core::types::{BlipId, BlipPlacement, BlipStyle, TargetId};

    use crate::scene::WorldScene;
    use crate::target::LinkedEntity;

    fn target_for(world: &World, entity: Entity, kind: EntityKind) -> RadarTarget {
        let scene = WorldScene::new(world);
        let linked = (kind == EntityKind::AiControlledAircraft)
            .then(|| scene.co_located(entity, EntityKind::Aircraft))
            .flatten()
            .map(|e| LinkedEntity {
                entity: e,
                kind: EntityKind::Aircraft,
            });
        RadarTarget {
            id: TargetId(1),
            entity,
            kind,
            category: TargetCategory::Ground,
            linked,
            rule: rule_for(kind, FRACTURE_MIN_CHILDREN),
            primary_blip: BlipId(1),
            aux_blips: HashMap::new(),
            style: BlipStyle::default(),
            rotatable: false,
            forced_visibility: None,
            visible: false,
            placement: BlipPlacement::default(),
        }
    }

    fn hidden(world: &World, target: &RadarTarget) -> bool {
        should_hide(&WorldScene::new(world), target)
    }

    #[test]
    fn test_ground_flags() {
        let cases = [
            (EntityKind::RotatingMissileLauncher, StateFlag::Disabled),
            (EntityKind::AntiAircraftTank, StateFlag::Dead),
            (EntityKind::SimpleGroundVehicle, StateFlag::Destroyed),
            (EntityKind::SinkableShip, StateFlag::CriticallyDamaged),
        ];
        for (kind, flag) in cases {
            assert_eq!(rule_for(kind, 3), VisibilityRule::HiddenWhen(flag));
        }

        let mut world = World::new();
        let tank = world.spawn((Scripts(vec![EntityKind::AntiAircraftTank]), Dead(false)));
        let target = target_for(&world, tank, EntityKind::AntiAircraftTank);
        assert!(!hidden(&world, &target));
        world.insert_one(tank, Dead(true)).unwrap();
        assert!(hidden(&world, &target));
    }

    #[test]
    fn test_missile_lifecycle() {
        let mut world = World::new();
        let missile = world.spawn((
            Scripts(vec![EntityKind::Missile]),
            Fired(false),
            Destroyed(false),
        ));
        let target = target_for(&world, missile, EntityKind::Missile);
        assert!(hidden(&world, &target), "unfired ordnance is hidden");

        world.insert_one(missile, Fired(true)).unwrap();
        assert!(!hidden(&world, &target), "ordnance in flight is shown");

        world.insert_one(missile, Destroyed(true)).unwrap();
        assert!(hidden(&world, &target), "spent ordnance is hidden");
    }

    #[test]
    fn test_rocket_lifecycle() {
        let mut world = World::new();
        let rocket = world.spawn((
            Scripts(vec![EntityKind::Rocket]),
            Launched(false),
            Exploded(false),
        ));
        let target = target_for(&world, rocket, EntityKind::Rocket);
        assert!(hidden(&world, &target));
        world.insert_one(rocket, Launched(true)).unwrap();
        assert!(!hidden(&world, &target));
        world.insert_one(rocket, Exploded(true)).unwrap();
        assert!(hidden(&world, &target));
    }

    #[test]
    fn test_fractured_object_threshold() {
        let mut world = World::new();
        let rock = world.spawn((Scripts(vec![EntityKind::FracturedObject]), Fragments(2)));
        let target = target_for(&world, rock, EntityKind::FracturedObject);
        assert!(hidden(&world, &target));
        world.insert_one(rock, Fragments(3)).unwrap();
        assert!(!hidden(&world, &target));
    }

    #[test]
    fn test_linked_aircraft_damage() {
        let mut world = World::new();
        let pilot = world.spawn((
            Scripts(vec![EntityKind::AiControlledAircraft, EntityKind::Aircraft]),
            CriticallyDamaged(false),
        ));
        let target = target_for(&world, pilot, EntityKind::AiControlledAircraft);
        assert!(target.linked.is_some());
        assert!(!hidden(&world, &target));
        world.insert_one(pilot, CriticallyDamaged(true)).unwrap();
        assert!(hidden(&world, &target));
    }

    #[test]
    fn test_unlinked_aircraft_is_shown_with_error() {
        let mut world = World::new();
        let pilot = world.spawn((
            Scripts(vec![EntityKind::AiControlledAircraft]),
            CriticallyDamaged(true),
        ));
        let target = target_for(&world, pilot, EntityKind::AiControlledAircraft);
        let scene = WorldScene::new(&world);
        assert!(matches!(
            evaluate(&scene, &target),
            Err(RadarError::MissingProperty { .. })
        ));
        assert!(!should_hide(&scene, &target));
    }

    #[test]
    fn test_missing_property_defaults_to_shown() {
        let mut world = World::new();
        let launcher = world.spawn((Scripts(vec![EntityKind::RotatingMissileLauncher]),));
        let target = target_for(&world, launcher, EntityKind::RotatingMissileLauncher);
        let scene = WorldScene::new(&world);
        let err = evaluate(&scene, &target).unwrap_err();
        assert_eq!(
            err,
            RadarError::MissingProperty {
                kind: EntityKind::RotatingMissileLauncher,
                property: "IsDisabled",
            }
        );
        assert!(!should_hide(&scene, &target));
    }

    #[test]
    fn test_kinds_without_rules_are_shown() {
        let mut world = World::new();
        for kind in [EntityKind::Ring, EntityKind::BombTarget, EntityKind::Sam] {
            let e = world.spawn((Scripts(vec![kind]),));
            let target = target_for(&world, e, kind);
            assert_eq!(target.rule, VisibilityRule::AlwaysShown);
            assert!(!hidden(&world, &target), "{kind}");
        }
    }

    #[test]
    fn test_inactive_and_deleted_are_hidden() {
        let mut world = World::new();
        let ring = world.spawn((Scripts(vec![EntityKind::Ring]), Inactive));
        let target = target_for(&world, ring, EntityKind::Ring);
        assert!(hidden(&world, &target));

        world.despawn(ring).unwrap();
        assert!(hidden(&world, &target));
    }

    #[test]
    fn test_forced_visibility_short_circuits() {
        let mut world = World::new();
        let tank = world.spawn((Scripts(vec![EntityKind::AntiAircraftTank]), Dead(true)));
        let mut target = target_for(&world, tank, EntityKind::AntiAircraftTank);
        target.forced_visibility = Some(false);
        assert!(!hidden(&world, &target));

        world.insert_one(tank, Dead(false)).unwrap();
        target.forced_visibility = Some(true);
        assert!(hidden(&world, &target));

        target.forced_visibility = None;
        assert!(!hidden(&world, &target));
    }
}
