//! Tracking engine for ACE RADAR.
//!
//! Discovers trackable entities in a host scene, decides every frame
//! whether and where each one shows up, and drives blips on the main radar
//! and on any attached auxiliary displays.

pub mod canvas;
pub mod classifier;
pub mod input;
pub mod projection;
pub mod registry;
pub mod scene;
pub mod snapshot;
pub mod target;
pub mod visibility;
pub mod world_setup;
pub mod zoom;

pub use aceradar_core as core;
pub use registry::TargetRegistry;
