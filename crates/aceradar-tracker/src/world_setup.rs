//! Entity spawn factories for populating a scene world.
//!
//! Used by the replay tool and the tests. Each factory attaches the
//! components `WorldScene` reads for that kind of entity.

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use aceradar_core::components::*;
use aceradar_core::enums::EntityKind;
use aceradar_core::types::Pose;

/// Spawn the entity the radar is centered on.
pub fn spawn_observer(world: &mut World, pose: Pose) -> Entity {
    world.spawn((Observer, pose))
}

/// Spawn an entity carrying only its kind and a pose.
pub fn spawn_contact(world: &mut World, kind: EntityKind, pose: Pose) -> Entity {
    world.spawn((Scripts(vec![kind]), pose))
}

/// Spawn a ground unit with the damage flag its kind reports, initially intact.
pub fn spawn_ground_unit(world: &mut World, kind: EntityKind, pose: Pose) -> Entity {
    let scripts = Scripts(vec![kind]);
    match kind {
        EntityKind::RotatingMissileLauncher => world.spawn((scripts, pose, Disabled(false))),
        EntityKind::AntiAircraftTank => world.spawn((scripts, pose, Dead(false))),
        EntityKind::SimpleGroundVehicle => world.spawn((scripts, pose, Destroyed(false))),
        EntityKind::SinkableShip => world.spawn((scripts, pose, CriticallyDamaged(false))),
        _ => world.spawn((scripts, pose)),
    }
}

/// Spawn an AI pilot together with the aircraft it flies.
pub fn spawn_ai_aircraft(world: &mut World, pose: Pose) -> Entity {
    world.spawn((
        Scripts(vec![EntityKind::AiControlledAircraft, EntityKind::Aircraft]),
        pose,
        CriticallyDamaged(false),
    ))
}

/// Spawn ordnance that has not left its carrier yet.
pub fn spawn_ordnance(world: &mut World, kind: EntityKind, pose: Pose) -> Entity {
    let scripts = Scripts(vec![kind]);
    match kind {
        EntityKind::Rocket => world.spawn((scripts, pose, Launched(false), Exploded(false))),
        _ => world.spawn((scripts, pose, Fired(false), Destroyed(false))),
    }
}

/// Spawn fracturable scenery with `fragments` pieces still attached.
pub fn spawn_fractured_object(world: &mut World, pose: Pose, fragments: usize) -> Entity {
    world.spawn((
        Scripts(vec![EntityKind::FracturedObject]),
        pose,
        Fragments(fragments),
    ))
}

/// Spawn `count` random contacts scattered within `range` of the origin.
pub fn spawn_random_contacts(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    count: usize,
    range: f64,
) -> Vec<Entity> {
    (0..count)
        .map(|_| {
            let position = DVec3::new(
                rng.gen_range(-range..range),
                rng.gen_range(0.0..2_000.0),
                rng.gen_range(-range..range),
            );
            let pose = Pose::new(position, rng.gen_range(0.0..360.0));
            match rng.gen_range(0..4) {
                0 => spawn_ai_aircraft(world, pose),
                1 => spawn_ordnance(world, EntityKind::Missile, pose),
                2 => spawn_fractured_object(world, pose, rng.gen_range(0..6)),
                _ => {
                    let kinds = [
                        EntityKind::RotatingMissileLauncher,
                        EntityKind::AntiAircraftTank,
                        EntityKind::SimpleGroundVehicle,
                        EntityKind::SinkableShip,
                    ];
                    spawn_ground_unit(world, kinds[rng.gen_range(0..kinds.len())], pose)
                }
            }
        })
        .collect()
}
