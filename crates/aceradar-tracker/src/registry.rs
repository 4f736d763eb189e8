//! Target registry: the tracker's orchestrator.
//!
//! `TargetRegistry` owns the tracked targets, the auxiliary viewport list
//! and the zoom controller, and runs the per-frame loop. It is headless: the
//! scene and the canvas are handed in on every call, so the whole loop can
//! be stepped deterministically in tests.

use std::collections::HashSet;
use std::mem;

use glam::DVec3;
use hecs::Entity;

use aceradar_core::config::RadarConfig;
use aceradar_core::constants::MAX_SORT_ORDER;
use aceradar_core::enums::{EntityKind, RemovalReason, SessionMode, SpriteId};
use aceradar_core::error::{RadarError, RadarResult};
use aceradar_core::events::RadarEvent;
use aceradar_core::state::RadarSnapshot;
use aceradar_core::types::*;

use crate::canvas::BlipCanvas;
use crate::classifier;
use crate::input::FrameInput;
use crate::projection::{self, ring_scale};
use crate::scene::Scene;
use crate::snapshot;
use crate::target::{LinkedEntity, RadarTarget};
use crate::visibility;
use crate::zoom::{ZoomController, ZoomStep};

/// A rendering destination and its current radar radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    id: ViewportId,
    radius_source: RadiusSource,
    radius: f64,
}

impl Viewport {
    pub fn id(&self) -> ViewportId {
        self.id
    }

    /// Current radar radius (world units).
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn radius_source(&self) -> RadiusSource {
        self.radius_source
    }

    pub fn is_input_driven(&self) -> bool {
        matches!(self.radius_source, RadiusSource::Input(_))
    }
}

/// Caller-supplied rendering hints for `register_target`.
/// Unset fields fall back to the classifier's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlipOverrides {
    pub sprite: Option<SpriteId>,
    pub color: Option<BlipColor>,
    pub rotatable: Option<bool>,
}

/// What happened during one `tick`.
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub frame: u64,
    pub mode: SessionMode,
    /// The scene was scanned for new entities this frame.
    pub scanned: bool,
    pub tracked: usize,
    pub visible: usize,
    /// Changes since the previous report, including ones made through the public API.
    pub events: Vec<RadarEvent>,
}

/// Owns every tracked target and drives the radar viewports.
pub struct TargetRegistry {
    config: RadarConfig,
    mode: SessionMode,
    frame: u64,
    frames_until_scan: u32,
    targets: Vec<RadarTarget>,
    next_target_id: u32,
    main: Viewport,
    main_shown: bool,
    aux_viewports: Vec<Viewport>,
    zoom: ZoomController,
    observer: Pose,
    events: Vec<RadarEvent>,
    despawn_buffer: Vec<usize>,
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::build(RadarConfig::default())
    }
}

impl TargetRegistry {
    /// Create a registry after validating the config.
    pub fn new(config: RadarConfig) -> RadarResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: RadarConfig) -> Self {
        let zoom = ZoomController::from_validated(&config);
        Self {
            main: Viewport {
                id: ViewportId::Main,
                radius_source: RadiusSource::Shared,
                radius: zoom.radius(),
            },
            zoom,
            config,
            mode: SessionMode::Inactive,
            frame: 0,
            frames_until_scan: 0,
            targets: Vec::new(),
            next_target_id: 0,
            main_shown: false,
            aux_viewports: Vec::new(),
            observer: Pose::default(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
        }
    }

    // --- Public operations ---

    /// Start tracking `entity`, or return its existing target.
    ///
    /// The entity is tracked as its first supported kind, the same one a
    /// scan would pick, and classified for default rendering; any
    /// field set in `overrides` wins. Unsupported kinds may be registered
    /// this way even though scans skip them.
    pub fn register_target(
        &mut self,
        scene: &impl Scene,
        canvas: &mut impl BlipCanvas,
        entity: Entity,
        overrides: BlipOverrides,
    ) -> RadarResult<TargetId> {
        if !scene.contains(entity) {
            log::warn!("Refusing to register {entity:?}: not present in the scene");
            return Err(RadarError::InvalidEntity(entity));
        }
        if let Some(existing) = self.find_by_entity(entity) {
            log::debug!("{entity:?} is already tracked as {existing}");
            return Ok(existing);
        }
        let kind = classifier::tracking_kind(&scene.kinds_of(entity));
        Ok(self.insert_target(scene, canvas, entity, kind, overrides))
    }

    /// Restyle every blip of a target and change its rotatability.
    pub fn modify_blip(
        &mut self,
        canvas: &mut impl BlipCanvas,
        target: TargetId,
        sprite: SpriteId,
        color: BlipColor,
        rotatable: bool,
    ) -> RadarResult<()> {
        let Some(t) = self.targets.iter_mut().find(|t| t.id == target) else {
            log::warn!("Cannot modify blip of {target}: not registered");
            return Err(RadarError::UnknownTarget(target));
        };
        t.style = BlipStyle { sprite, color };
        t.rotatable = rotatable;
        for blip in t.all_blips() {
            canvas.set_blip_style(blip, t.style);
        }
        Ok(())
    }

    /// `modify_blip` for the target tracking `entity`.
    pub fn modify_blip_for_entity(
        &mut self,
        canvas: &mut impl BlipCanvas,
        entity: Entity,
        sprite: SpriteId,
        color: BlipColor,
        rotatable: bool,
    ) -> RadarResult<TargetId> {
        let Some(target) = self.find_by_entity(entity) else {
            log::warn!("Cannot modify blip of {entity:?}: not tracked");
            return Err(RadarError::InvalidEntity(entity));
        };
        self.modify_blip(canvas, target, sprite, color, rotatable)?;
        Ok(target)
    }

    /// Stop tracking a target and release all of its blips.
    pub fn remove_target(
        &mut self,
        canvas: &mut impl BlipCanvas,
        target: TargetId,
    ) -> RadarResult<()> {
        let Some(index) = self.targets.iter().position(|t| t.id == target) else {
            log::warn!("Cannot remove {target}: not registered");
            return Err(RadarError::UnknownTarget(target));
        };
        self.remove_at(canvas, index, RemovalReason::Explicit);
        Ok(())
    }

    /// Target tracking `entity`, if any.
    pub fn find_by_entity(&self, entity: Entity) -> Option<TargetId> {
        self.targets
            .iter()
            .find(|t| t.entity == entity)
            .map(|t| t.id)
    }

    /// Override computed visibility: `Some(true)` hides, `Some(false)` shows, `None` clears.
    pub fn set_forced_visibility(
        &mut self,
        target: TargetId,
        forced_hidden: Option<bool>,
    ) -> RadarResult<()> {
        let Some(t) = self.targets.iter_mut().find(|t| t.id == target) else {
            log::warn!("Cannot force visibility of {target}: not registered");
            return Err(RadarError::UnknownTarget(target));
        };
        t.forced_visibility = forced_hidden;
        Ok(())
    }

    /// Distance from the target's current position to `point`.
    /// `Ok(None)` when the scene has no pose for it.
    pub fn target_distance(
        &self,
        scene: &impl Scene,
        target: TargetId,
        point: DVec3,
    ) -> RadarResult<Option<f64>> {
        let t = self.target(target).ok_or(RadarError::UnknownTarget(target))?;
        Ok(t.source_pose(scene).map(|pose| pose.distance_to(point)))
    }

    /// Auxiliary blips of a target, in viewport order.
    pub fn aux_blips(&self, target: TargetId) -> RadarResult<Vec<BlipId>> {
        let t = self.target(target).ok_or(RadarError::UnknownTarget(target))?;
        Ok(self
            .aux_viewports
            .iter()
            .filter_map(|v| t.aux_blip(v.id))
            .collect())
    }

    // --- Accessors ---

    pub fn target(&self, target: TargetId) -> Option<&RadarTarget> {
        self.targets.iter().find(|t| t.id == target)
    }

    /// Tracked targets in registration order.
    pub fn targets(&self) -> &[RadarTarget] {
        &self.targets
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn config(&self) -> &RadarConfig {
        &self.config
    }

    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn main_viewport(&self) -> &Viewport {
        &self.main
    }

    /// Whether the main viewport is toggled on. Only drawn while Active.
    pub fn main_shown(&self) -> bool {
        self.main_shown
    }

    /// Auxiliary viewports in attach order.
    pub fn aux_viewports(&self) -> &[Viewport] {
        &self.aux_viewports
    }

    pub fn observer(&self) -> Pose {
        self.observer
    }

    /// Read-only view of the current radar state.
    pub fn snapshot(&self) -> RadarSnapshot {
        snapshot::build_snapshot(self)
    }

    // --- Frame loop ---

    /// Advance one frame.
    ///
    /// Order within a frame: session transition, map toggle, scan,
    /// attachment sync, zoom, observer pose, visibility/position sweep.
    pub fn tick(
        &mut self,
        scene: &impl Scene,
        canvas: &mut impl BlipCanvas,
        input: &FrameInput,
    ) -> FrameReport {
        self.frame += 1;

        match (self.mode, input.session_active()) {
            (SessionMode::Inactive, true) => self.enter_session(canvas),
            (SessionMode::Active, false) => self.exit_session(canvas),
            _ => {}
        }

        let mut scanned = false;
        if self.mode == SessionMode::Active {
            if input.toggle_map {
                self.set_main_shown(canvas, !self.main_shown);
            }
            scanned = self.scan_step(scene, canvas);
            self.sync_attachments(canvas, &input.attachments);
            self.advance_zoom(canvas, input);
            self.observer = input.observer;
            self.sweep(scene, canvas);
        }

        FrameReport {
            frame: self.frame,
            mode: self.mode,
            scanned,
            tracked: self.targets.len(),
            visible: self.targets.iter().filter(|t| t.visible).count(),
            events: mem::take(&mut self.events),
        }
    }

    /// Register every supported, untracked entity in the scene.
    /// Returns how many targets were added.
    pub fn scan(&mut self, scene: &impl Scene, canvas: &mut impl BlipCanvas) -> usize {
        let mut tracked: HashSet<Entity> = self.targets.iter().map(|t| t.entity).collect();
        let mut added = 0;
        for (entity, kind) in scene.live_entities() {
            if !classifier::is_supported(kind) || tracked.contains(&entity) {
                continue;
            }
            let kind = classifier::tracking_kind(&scene.kinds_of(entity));
            self.insert_target(scene, canvas, entity, kind, BlipOverrides::default());
            tracked.insert(entity);
            added += 1;
        }
        if added > 0 {
            log::debug!("Scan registered {added} new radar targets");
        }
        added
    }

    fn scan_step(&mut self, scene: &impl Scene, canvas: &mut impl BlipCanvas) -> bool {
        if self.frames_until_scan > 0 {
            self.frames_until_scan -= 1;
            return false;
        }
        self.frames_until_scan = self.config.scan_interval_frames - 1;
        self.scan(scene, canvas);
        true
    }

    /// Auxiliary viewports are picked up by the attachment sync later in the same frame.
    fn enter_session(&mut self, canvas: &mut impl BlipCanvas) {
        self.mode = SessionMode::Active;
        self.frames_until_scan = 0;
        self.events.push(RadarEvent::SessionStarted);
        self.set_main_shown(canvas, true);
        log::info!("Radar session started");
    }

    fn exit_session(&mut self, canvas: &mut impl BlipCanvas) {
        let cleared = self.targets.len();
        for index in (0..self.targets.len()).rev() {
            self.remove_at(canvas, index, RemovalReason::SessionEnded);
        }
        for index in (0..self.aux_viewports.len()).rev() {
            self.detach_viewport_at(canvas, index);
        }
        self.set_main_shown(canvas, false);
        self.mode = SessionMode::Inactive;
        self.events.push(RadarEvent::SessionEnded { cleared });
        log::info!("Radar session ended, cleared {cleared} radar targets");
    }

    fn set_main_shown(&mut self, canvas: &mut impl BlipCanvas, shown: bool) {
        self.main_shown = shown;
        canvas.set_viewport_visible(ViewportId::Main, shown);
    }

    fn insert_target(
        &mut self,
        scene: &impl Scene,
        canvas: &mut impl BlipCanvas,
        entity: Entity,
        kind: EntityKind,
        overrides: BlipOverrides,
    ) -> TargetId {
        let category = classifier::classify(kind);
        let defaults = classifier::default_blip(category, self.config.default_blip_color);
        let style = BlipStyle {
            sprite: overrides.sprite.unwrap_or(defaults.style.sprite),
            color: overrides.color.unwrap_or(defaults.style.color),
        };
        let rotatable = overrides.rotatable.unwrap_or(defaults.rotatable);

        let linked = if kind == EntityKind::AiControlledAircraft {
            let linked = scene
                .co_located(entity, EntityKind::Aircraft)
                .map(|e| LinkedEntity {
                    entity: e,
                    kind: EntityKind::Aircraft,
                });
            if linked.is_none() {
                log::warn!("{entity:?} ({kind}) has no {} alongside it", EntityKind::Aircraft);
            }
            linked
        } else {
            None
        };

        let primary_blip = canvas.spawn_blip(ViewportId::Main, style);
        let aux_blips = self
            .aux_viewports
            .iter()
            .map(|v| (v.id, canvas.spawn_blip(v.id, style)))
            .collect();

        let id = TargetId(self.next_target_id);
        self.next_target_id += 1;
        self.targets.push(RadarTarget {
            id,
            entity,
            kind,
            category,
            linked,
            rule: visibility::rule_for(kind, self.config.fracture_min_children),
            primary_blip,
            aux_blips,
            style,
            rotatable,
            forced_visibility: None,
            visible: false,
            placement: BlipPlacement::default(),
        });

        log::info!("Registered new radar target {id}: {entity:?} ({kind})");
        self.events.push(RadarEvent::TargetRegistered {
            target: id,
            entity,
            kind,
        });
        id
    }

    fn remove_at(&mut self, canvas: &mut impl BlipCanvas, index: usize, reason: RemovalReason) {
        let target = self.targets.remove(index);
        for blip in target.all_blips() {
            canvas.release_blip(blip);
        }
        match reason {
            RemovalReason::SourceDeleted => log::info!(
                "Unregistered radar target {} as its {} entity no longer exists",
                target.id,
                target.kind
            ),
            _ => log::info!(
                "Unregistered radar target {}: {:?} ({}), {reason:?}",
                target.id,
                target.entity,
                target.kind
            ),
        }
        self.events.push(RadarEvent::TargetRemoved {
            target: target.id,
            reason,
        });
    }

    fn attach_viewport(&mut self, canvas: &mut impl BlipCanvas, info: &AttachmentInfo) {
        let info = AttachmentInfo {
            sort_order: info.sort_order.min(MAX_SORT_ORDER),
            ..*info
        };
        let id = ViewportId::Attachment(info.id);
        let radius = match info.radius_source {
            RadiusSource::Shared => self.zoom.radius(),
            RadiusSource::Input(radius) => radius,
        };

        canvas.attach_viewport(id, Some(&info));
        canvas.set_viewport_visible(id, true);
        canvas.set_ring_scale(id, ring_scale(radius));
        for target in &mut self.targets {
            let blip = canvas.spawn_blip(id, target.style);
            target.aux_blips.insert(id, blip);
        }
        self.aux_viewports.push(Viewport {
            id,
            radius_source: info.radius_source,
            radius,
        });

        log::info!("Attached auxiliary viewport {id}");
        self.events.push(RadarEvent::ViewportAttached { viewport: id });
    }

    fn detach_viewport_at(&mut self, canvas: &mut impl BlipCanvas, index: usize) {
        let viewport = self.aux_viewports.remove(index);
        for target in &mut self.targets {
            if let Some(blip) = target.aux_blips.remove(&viewport.id) {
                canvas.release_blip(blip);
            }
        }
        canvas.detach_viewport(viewport.id);

        log::info!("Detached auxiliary viewport {}", viewport.id);
        self.events.push(RadarEvent::ViewportDetached {
            viewport: viewport.id,
        });
    }

    /// Drop viewports whose attachment is gone, pick up input radii, and
    /// attach newcomers at the end of the list.
    fn sync_attachments(&mut self, canvas: &mut impl BlipCanvas, attachments: &[AttachmentInfo]) {
        let mut index = 0;
        while index < self.aux_viewports.len() {
            let id = self.aux_viewports[index].id;
            match attachments
                .iter()
                .find(|a| ViewportId::Attachment(a.id) == id)
            {
                Some(info) => {
                    self.aux_viewports[index].radius_source = info.radius_source;
                    index += 1;
                }
                None => self.detach_viewport_at(canvas, index),
            }
        }

        for info in attachments {
            let id = ViewportId::Attachment(info.id);
            if !self.aux_viewports.iter().any(|v| v.id == id) {
                self.attach_viewport(canvas, info);
            }
        }
    }

    fn advance_zoom(&mut self, canvas: &mut impl BlipCanvas, input: &FrameInput) {
        let step = self
            .zoom
            .update(input.zoom_in, input.zoom_out, input.unscaled_dt);
        if step != ZoomStep::None {
            log::debug!(
                "Zoom {step:?} to preset {} ({} units)",
                self.zoom.preset_index(),
                self.zoom.target_radius()
            );
        }

        let shared_radius = self.zoom.radius();
        self.main.radius = shared_radius;
        canvas.set_ring_scale(ViewportId::Main, ring_scale(shared_radius));
        for viewport in &mut self.aux_viewports {
            viewport.radius = match viewport.radius_source {
                RadiusSource::Shared => shared_radius,
                RadiusSource::Input(radius) => radius,
            };
            canvas.set_ring_scale(viewport.id, ring_scale(viewport.radius));
        }
    }

    /// Hide, place or remove every target, in registration order.
    fn sweep(&mut self, scene: &impl Scene, canvas: &mut impl BlipCanvas) {
        let observer = self.observer;
        let main_radius = self.main.radius;
        let mut deleted = mem::take(&mut self.despawn_buffer);
        deleted.clear();

        for (index, target) in self.targets.iter_mut().enumerate() {
            if target.is_deleted(scene) {
                hide_all(canvas, target);
                deleted.push(index);
                continue;
            }

            let pose = if visibility::should_hide(scene, target) {
                None
            } else {
                let pose = target.source_pose(scene);
                if pose.is_none() {
                    log::error!(
                        "Radar target {} ({}) has no readable pose; hiding it",
                        target.id,
                        target.kind
                    );
                }
                pose
            };

            let Some(pose) = pose else {
                hide_all(canvas, target);
                continue;
            };

            let fix = projection::relative_fix(&observer, &pose, target.rotatable);
            target.visible = true;
            target.placement = fix.placement(main_radius);
            canvas.set_blip_visible(target.primary_blip, true);
            canvas.place_blip(target.primary_blip, target.placement);
            for viewport in &self.aux_viewports {
                if let Some(&blip) = target.aux_blips.get(&viewport.id) {
                    canvas.set_blip_visible(blip, true);
                    canvas.place_blip(blip, fix.placement(viewport.radius));
                }
            }
        }

        for (removed, &index) in deleted.iter().enumerate() {
            self.remove_at(canvas, index - removed, RemovalReason::SourceDeleted);
        }
        self.despawn_buffer = deleted;
    }
}

fn hide_all(canvas: &mut impl BlipCanvas, target: &mut RadarTarget) {
    target.visible = false;
    for blip in target.all_blips() {
        canvas.set_blip_visible(blip, false);
    }
}
