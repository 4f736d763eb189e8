//! Entity classifier: runtime kind → radar category and default blip.
//!
//! The three membership lists below are the single source of truth for
//! which kinds the radar tracks. Pure functions, no state.

use aceradar_core::enums::{EntityKind, RadarColor, SpriteId, TargetCategory};
use aceradar_core::types::{BlipColor, BlipStyle};

pub const GROUND_KINDS: &[EntityKind] = &[
    EntityKind::RotatingMissileLauncher,
    EntityKind::AntiAircraftTank,
    EntityKind::SimpleGroundVehicle,
    EntityKind::SinkableShip,
    EntityKind::BombTarget,
    EntityKind::FracturedObject,
    EntityKind::Ring,
];

pub const AIR_KINDS: &[EntityKind] = &[EntityKind::AiControlledAircraft];

pub const WEAPON_KINDS: &[EntityKind] = &[
    EntityKind::AntiAircraftMissile,
    EntityKind::Sam,
    EntityKind::Missile,
    EntityKind::Bomb,
    EntityKind::Rocket,
];

/// Default rendering hints for a newly tracked target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlipDefaults {
    pub style: BlipStyle,
    pub rotatable: bool,
}

pub fn classify(kind: EntityKind) -> TargetCategory {
    if WEAPON_KINDS.contains(&kind) {
        TargetCategory::Weapon
    } else if AIR_KINDS.contains(&kind) {
        TargetCategory::Air
    } else if GROUND_KINDS.contains(&kind) {
        TargetCategory::Ground
    } else {
        TargetCategory::Unsupported
    }
}

pub fn is_supported(kind: EntityKind) -> bool {
    classify(kind) != TargetCategory::Unsupported
}

/// Kind an entity is tracked as: its first supported kind, else its primary one.
pub fn tracking_kind(kinds: &[EntityKind]) -> EntityKind {
    kinds
        .iter()
        .copied()
        .find(|kind| is_supported(*kind))
        .or_else(|| kinds.first().copied())
        .unwrap_or(EntityKind::Unrecognized)
}

/// Default sprite, color and rotatability for a category.
///
/// Unsupported kinds only get tracked when a caller registers them
/// explicitly; they fall back to the ground styling.
pub fn default_blip(category: TargetCategory, default_color: BlipColor) -> BlipDefaults {
    match category {
        TargetCategory::Weapon => BlipDefaults {
            style: BlipStyle {
                sprite: SpriteId::Line,
                color: RadarColor::FullWhite.color(),
            },
            rotatable: true,
        },
        TargetCategory::Air => BlipDefaults {
            style: BlipStyle {
                sprite: SpriteId::AirSmall,
                color: default_color,
            },
            rotatable: true,
        },
        TargetCategory::Ground | TargetCategory::Unsupported => BlipDefaults {
            style: BlipStyle {
                sprite: SpriteId::GroundSmall,
                color: default_color,
            },
            rotatable: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_lists_are_disjoint_and_complete() {
        let supported: Vec<EntityKind> = EntityKind::ALL
            .into_iter()
            .filter(|k| is_supported(*k))
            .collect();
        assert_eq!(
            supported.len(),
            GROUND_KINDS.len() + AIR_KINDS.len() + WEAPON_KINDS.len()
        );
        assert_eq!(supported.len(), 13);
    }

    #[test]
    fn test_categories() {
        assert_eq!(classify(EntityKind::SinkableShip), TargetCategory::Ground);
        assert_eq!(classify(EntityKind::FracturedObject), TargetCategory::Ground);
        assert_eq!(classify(EntityKind::AiControlledAircraft), TargetCategory::Air);
        assert_eq!(classify(EntityKind::Rocket), TargetCategory::Weapon);
        assert_eq!(classify(EntityKind::Sam), TargetCategory::Weapon);
        assert_eq!(classify(EntityKind::Aircraft), TargetCategory::Unsupported);
        assert_eq!(classify(EntityKind::Unrecognized), TargetCategory::Unsupported);
    }

    #[test]
    fn test_default_blips() {
        let translucent = RadarColor::White.color();

        let weapon = default_blip(TargetCategory::Weapon, translucent);
        assert_eq!(weapon.style.sprite, SpriteId::Line);
        assert_eq!(weapon.style.color, RadarColor::FullWhite.color());
        assert!(weapon.rotatable);

        let air = default_blip(TargetCategory::Air, translucent);
        assert_eq!(air.style.sprite, SpriteId::AirSmall);
        assert_eq!(air.style.color, translucent);
        assert!(air.rotatable);

        let ground = default_blip(TargetCategory::Ground, translucent);
        assert_eq!(ground.style.sprite, SpriteId::GroundSmall);
        assert_eq!(ground.style.color, translucent);
        assert!(!ground.rotatable);
    }

    #[test]
    fn test_default_color_is_configurable() {
        let red = RadarColor::Red.color();
        assert_eq!(default_blip(TargetCategory::Ground, red).style.color, red);
        // Ordnance always uses the opaque line.
        assert_eq!(
            default_blip(TargetCategory::Weapon, red).style.color,
            RadarColor::FullWhite.color()
        );
    }

    #[test]
    fn test_tracking_kind_prefers_supported_script() {
        assert_eq!(
            tracking_kind(&[EntityKind::Aircraft, EntityKind::AiControlledAircraft]),
            EntityKind::AiControlledAircraft
        );
        assert_eq!(tracking_kind(&[EntityKind::Aircraft]), EntityKind::Aircraft);
        assert_eq!(tracking_kind(&[]), EntityKind::Unrecognized);
    }
}
