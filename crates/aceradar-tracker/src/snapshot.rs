//! Snapshot builder: turns registry state into a `RadarSnapshot`.
//!
//! Read-only. It never touches the scene or the canvas.

use aceradar_core::enums::SessionMode;
use aceradar_core::state::*;
use aceradar_core::types::ViewportId;

use crate::projection::ring_scale;
use crate::registry::TargetRegistry;
use crate::target::RadarTarget;

/// Build a complete snapshot of the registry after the last frame.
pub fn build_snapshot(registry: &TargetRegistry) -> RadarSnapshot {
    RadarSnapshot {
        frame: registry.frame(),
        mode: registry.mode(),
        viewports: build_viewports(registry),
        targets: registry.targets().iter().map(build_target).collect(),
    }
}

/// Main viewport first, then auxiliaries in attach order.
fn build_viewports(registry: &TargetRegistry) -> Vec<ViewportView> {
    let active = registry.mode() == SessionMode::Active;
    let main = registry.main_viewport();

    let mut views = Vec::with_capacity(1 + registry.aux_viewports().len());
    views.push(ViewportView {
        id: ViewportId::Main,
        radius: main.radius(),
        ring_scale: ring_scale(main.radius()),
        visible: active && registry.main_shown(),
        input_driven: false,
    });
    views.extend(registry.aux_viewports().iter().map(|v| ViewportView {
        id: v.id(),
        radius: v.radius(),
        ring_scale: ring_scale(v.radius()),
        visible: active,
        input_driven: v.is_input_driven(),
    }));
    views
}

fn build_target(target: &RadarTarget) -> TargetView {
    TargetView {
        id: target.id(),
        entity: target.entity().to_bits().get(),
        kind: target.kind(),
        category: target.category(),
        visible: target.visible(),
        rotatable: target.rotatable(),
        style: target.style(),
        placement: target.placement(),
        aux_blips: target.aux_blip_count(),
    }
}
