//! Canvas collaborator: where blips are instantiated and drawn.
//!
//! The registry decides what to show, where, and whether. A `BlipCanvas`
//! turns those decisions into pixels. `WorldCanvas` is a headless canvas
//! that stores each blip as an entity in its own `hecs::World`; hosts use
//! it for replay and tests, and it is what snapshots are checked against.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use aceradar_core::types::{AttachmentInfo, BlipColor, BlipId, BlipPlacement, BlipStyle, ViewportId};

/// Rendering services for every viewport the registry drives.
pub trait BlipCanvas {
    /// Make a viewport available. `attachment` is `None` for the main viewport.
    fn attach_viewport(&mut self, viewport: ViewportId, attachment: Option<&AttachmentInfo>);

    /// Forget a viewport. Any blips still on it are the caller's to release.
    fn detach_viewport(&mut self, viewport: ViewportId);

    fn set_viewport_visible(&mut self, viewport: ViewportId, visible: bool);

    /// Scale of the range rings relative to the reference radius.
    fn set_ring_scale(&mut self, viewport: ViewportId, scale: f64);

    /// Instantiate a hidden blip on a viewport.
    fn spawn_blip(&mut self, viewport: ViewportId, style: BlipStyle) -> BlipId;

    /// Destroy a blip. Returns false if the blip was unknown (already released).
    fn release_blip(&mut self, blip: BlipId) -> bool;

    fn set_blip_style(&mut self, blip: BlipId, style: BlipStyle);

    fn set_blip_visible(&mut self, blip: BlipId, visible: bool);

    fn place_blip(&mut self, blip: BlipId, placement: BlipPlacement);
}

/// Viewport this blip is drawn on.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BlipOf(ViewportId);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Shown(bool);

/// Canvas-side state of one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasViewport {
    pub visible: bool,
    pub ring_scale: f64,
    pub sort_order: u8,
    pub frame_color: Option<BlipColor>,
}

/// Canvas-side state of one blip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlipRecord {
    pub viewport: ViewportId,
    pub style: BlipStyle,
    pub placement: BlipPlacement,
    pub visible: bool,
}

/// Headless canvas backed by a hecs world.
pub struct WorldCanvas {
    blips: World,
    viewports: BTreeMap<ViewportId, CanvasViewport>,
    released: u64,
    rejected_releases: u64,
}

impl Default for WorldCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldCanvas {
    /// A canvas with a hidden main viewport.
    pub fn new() -> Self {
        let mut canvas = Self {
            blips: World::new(),
            viewports: BTreeMap::new(),
            released: 0,
            rejected_releases: 0,
        };
        canvas.attach_viewport(ViewportId::Main, None);
        canvas
    }

    pub fn viewport(&self, viewport: ViewportId) -> Option<&CanvasViewport> {
        self.viewports.get(&viewport)
    }

    pub fn viewport_count(&self) -> usize {
        self.viewports.len()
    }

    pub fn blip(&self, blip: BlipId) -> Option<BlipRecord> {
        let entity = Entity::from_bits(blip.0)?;
        let viewport = self.blips.get::<&BlipOf>(entity).ok()?.0;
        let style = *self.blips.get::<&BlipStyle>(entity).ok()?;
        let placement = *self.blips.get::<&BlipPlacement>(entity).ok()?;
        let visible = self.blips.get::<&Shown>(entity).ok()?.0;
        Some(BlipRecord {
            viewport,
            style,
            placement,
            visible,
        })
    }

    /// Live blips across all viewports.
    pub fn blip_count(&self) -> usize {
        self.blips.len() as usize
    }

    /// Live blips on one viewport.
    pub fn blips_on(&self, viewport: ViewportId) -> usize {
        self.blips
            .query::<&BlipOf>()
            .iter()
            .filter(|(_, of)| of.0 == viewport)
            .count()
    }

    /// Blips released successfully so far.
    pub fn released(&self) -> u64 {
        self.released
    }

    /// Release calls that named a blip which no longer existed.
    pub fn rejected_releases(&self) -> u64 {
        self.rejected_releases
    }

    fn entity(blip: BlipId) -> Option<Entity> {
        Entity::from_bits(blip.0)
    }
}

impl BlipCanvas for WorldCanvas {
    fn attach_viewport(&mut self, viewport: ViewportId, attachment: Option<&AttachmentInfo>) {
        self.viewports.insert(
            viewport,
            CanvasViewport {
                visible: false,
                ring_scale: 1.0,
                sort_order: attachment.map_or(0, |a| a.sort_order),
                frame_color: attachment.map(|a| a.frame_color),
            },
        );
    }

    fn detach_viewport(&mut self, viewport: ViewportId) {
        self.viewports.remove(&viewport);
    }

    fn set_viewport_visible(&mut self, viewport: ViewportId, visible: bool) {
        if let Some(v) = self.viewports.get_mut(&viewport) {
            v.visible = visible;
        }
    }

    fn set_ring_scale(&mut self, viewport: ViewportId, scale: f64) {
        if let Some(v) = self.viewports.get_mut(&viewport) {
            v.ring_scale = scale;
        }
    }

    fn spawn_blip(&mut self, viewport: ViewportId, style: BlipStyle) -> BlipId {
        let entity = self
            .blips
            .spawn((BlipOf(viewport), style, BlipPlacement::default(), Shown(false)));
        BlipId(entity.to_bits().get())
    }

    fn release_blip(&mut self, blip: BlipId) -> bool {
        let despawned = Self::entity(blip).is_some_and(|e| self.blips.despawn(e).is_ok());
        if despawned {
            self.released += 1;
        } else {
            self.rejected_releases += 1;
            log::warn!("Release of unknown blip {blip:?}");
        }
        despawned
    }

    fn set_blip_style(&mut self, blip: BlipId, style: BlipStyle) {
        if let Some(mut s) = Self::entity(blip).and_then(|e| self.blips.get::<&mut BlipStyle>(e).ok()) {
            *s = style;
        }
    }

    fn set_blip_visible(&mut self, blip: BlipId, visible: bool) {
        if let Some(mut s) = Self::entity(blip).and_then(|e| self.blips.get::<&mut Shown>(e).ok()) {
            s.0 = visible;
        }
    }

    fn place_blip(&mut self, blip: BlipId, placement: BlipPlacement) {
        if let Some(mut p) =
            Self::entity(blip).and_then(|e| self.blips.get::<&mut BlipPlacement>(e).ok())
        {
            *p = placement;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aceradar_core::enums::SpriteId;
    use aceradar_core::types::AttachmentId;
    use glam::DVec2;

    #[test]
    fn test_new_canvas_has_hidden_main_viewport() {
        let canvas = WorldCanvas::new();
        let main = canvas.viewport(ViewportId::Main).unwrap();
        assert!(!main.visible);
        assert_eq!(main.frame_color, None);
        assert_eq!(canvas.blip_count(), 0);
    }

    #[test]
    fn test_blip_lifecycle() {
        let mut canvas = WorldCanvas::new();
        let style = BlipStyle {
            sprite: SpriteId::Line,
            ..Default::default()
        };
        let blip = canvas.spawn_blip(ViewportId::Main, style);
        let record = canvas.blip(blip).unwrap();
        assert_eq!(record.style, style);
        assert!(!record.visible);

        canvas.set_blip_visible(blip, true);
        let placement = BlipPlacement {
            position: DVec2::new(3.0, -4.0),
            rotation_deg: 12.0,
        };
        canvas.place_blip(blip, placement);
        let record = canvas.blip(blip).unwrap();
        assert!(record.visible);
        assert_eq!(record.placement, placement);

        assert!(canvas.release_blip(blip));
        assert!(canvas.blip(blip).is_none());
        assert!(!canvas.release_blip(blip), "second release must be rejected");
        assert_eq!(canvas.released(), 1);
        assert_eq!(canvas.rejected_releases(), 1);
    }

    #[test]
    fn test_attachment_styling_is_kept() {
        let mut canvas = WorldCanvas::new();
        let info = AttachmentInfo {
            sort_order: 7,
            ..AttachmentInfo::shared(4)
        };
        let id = ViewportId::Attachment(AttachmentId(4));
        canvas.attach_viewport(id, Some(&info));
        let viewport = canvas.viewport(id).unwrap();
        assert_eq!(viewport.sort_order, 7);
        assert_eq!(viewport.frame_color, Some(info.frame_color));

        canvas.spawn_blip(id, BlipStyle::default());
        canvas.spawn_blip(ViewportId::Main, BlipStyle::default());
        assert_eq!(canvas.blips_on(id), 1);
        assert_eq!(canvas.blip_count(), 2);

        canvas.detach_viewport(id);
        assert!(canvas.viewport(id).is_none());
    }
}
