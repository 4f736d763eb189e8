//! Enumeration types used throughout the tracker.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::BlipColor;

/// Runtime kind of a simulation entity, as reported by the host.
///
/// The set is closed: anything the host reports that is not listed here is
/// `Unrecognized` and never tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    // Ground
    #[serde(rename = "RotatingMissileLauncherScript")]
    RotatingMissileLauncher,
    #[serde(rename = "AntiAircraftTankScript")]
    AntiAircraftTank,
    #[serde(rename = "SimpleGroundVehicleScript")]
    SimpleGroundVehicle,
    #[serde(rename = "SinkableShipScript")]
    SinkableShip,
    #[serde(rename = "BombTargetScript")]
    BombTarget,
    #[serde(rename = "FracturedObject")]
    FracturedObject,
    #[serde(rename = "RingScript")]
    Ring,
    // Air
    #[serde(rename = "AiControlledAircraftScript")]
    AiControlledAircraft,
    // Weapons
    #[serde(rename = "AntiAircraftMissileScript")]
    AntiAircraftMissile,
    #[serde(rename = "SamScript")]
    Sam,
    #[serde(rename = "MissileScript")]
    Missile,
    #[serde(rename = "BombScript")]
    Bomb,
    #[serde(rename = "RocketScript")]
    Rocket,
    /// Physical aircraft body. Never tracked on its own; AI pilots link to it.
    #[serde(rename = "AircraftScript")]
    Aircraft,
    /// Anything the tracker has no rules for.
    #[serde(other)]
    Unrecognized,
}

impl EntityKind {
    /// Every named kind, in declaration order.
    pub const ALL: [EntityKind; 14] = [
        EntityKind::RotatingMissileLauncher,
        EntityKind::AntiAircraftTank,
        EntityKind::SimpleGroundVehicle,
        EntityKind::SinkableShip,
        EntityKind::BombTarget,
        EntityKind::FracturedObject,
        EntityKind::Ring,
        EntityKind::AiControlledAircraft,
        EntityKind::AntiAircraftMissile,
        EntityKind::Sam,
        EntityKind::Missile,
        EntityKind::Bomb,
        EntityKind::Rocket,
        EntityKind::Aircraft,
    ];

    /// Host-facing runtime type name.
    pub fn type_name(self) -> &'static str {
        match self {
            EntityKind::RotatingMissileLauncher => "RotatingMissileLauncherScript",
            EntityKind::AntiAircraftTank => "AntiAircraftTankScript",
            EntityKind::SimpleGroundVehicle => "SimpleGroundVehicleScript",
            EntityKind::SinkableShip => "SinkableShipScript",
            EntityKind::BombTarget => "BombTargetScript",
            EntityKind::FracturedObject => "FracturedObject",
            EntityKind::Ring => "RingScript",
            EntityKind::AiControlledAircraft => "AiControlledAircraftScript",
            EntityKind::AntiAircraftMissile => "AntiAircraftMissileScript",
            EntityKind::Sam => "SamScript",
            EntityKind::Missile => "MissileScript",
            EntityKind::Bomb => "BombScript",
            EntityKind::Rocket => "RocketScript",
            EntityKind::Aircraft => "AircraftScript",
            EntityKind::Unrecognized => "Unrecognized",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for EntityKind {
    type Err = std::convert::Infallible;

    /// Unknown names map to `Unrecognized`; parsing never fails.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(EntityKind::ALL
            .into_iter()
            .find(|kind| kind.type_name() == s)
            .unwrap_or(EntityKind::Unrecognized))
    }
}

/// Radar category a kind classifies into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetCategory {
    Ground,
    Air,
    Weapon,
    Unsupported,
}

/// Blip sprite selector. The canvas owns the actual images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    #[default]
    AirSmall,
    AirLarge,
    GroundSmall,
    GroundLarge,
    /// Thin heading line used for ordnance.
    Line,
}

/// Named radar palette colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RadarColor {
    White,
    Red,
    Blue,
    Green,
    Yellow,
    FullWhite,
}

impl RadarColor {
    pub fn color(self) -> BlipColor {
        match self {
            RadarColor::White => BlipColor::new(1.0, 1.0, 1.0, 0.5),
            RadarColor::Red => BlipColor::new(1.0, 0.0, 0.0, 0.5),
            RadarColor::Blue => BlipColor::new(0.0, 0.5, 1.0, 0.5),
            RadarColor::Green => BlipColor::new(0.0, 1.0, 0.0, 0.5),
            RadarColor::Yellow => BlipColor::new(1.0, 1.0, 0.0, 0.5),
            RadarColor::FullWhite => BlipColor::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

/// Boolean state a host exposes on some entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateFlag {
    Disabled,
    Dead,
    Destroyed,
    CriticallyDamaged,
    Fired,
    Launched,
    Exploded,
}

impl StateFlag {
    /// Property name as the host spells it.
    pub fn property_name(self) -> &'static str {
        match self {
            StateFlag::Disabled => "IsDisabled",
            StateFlag::Dead => "IsDead",
            StateFlag::Destroyed => "IsDestroyed",
            StateFlag::CriticallyDamaged => "IsCriticallyDamaged",
            StateFlag::Fired => "Fired",
            StateFlag::Launched => "IsLaunched",
            StateFlag::Exploded => "HasExploded",
        }
    }
}

/// Whether the tracker is running its per-frame loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMode {
    #[default]
    Inactive,
    Active,
}

/// Why a target left the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    /// The source entity no longer exists in the scene.
    SourceDeleted,
    /// A caller removed it through the public API.
    Explicit,
    /// The session ended and the registry was cleared.
    SessionEnded,
}
