//! Per-frame input sample and key-chord bindings.
//!
//! Everything the registry needs from the host for one frame arrives in a
//! `FrameInput`, sampled once before the frame runs.

use serde::{Deserialize, Serialize};

use aceradar_core::types::{AttachmentInfo, Pose};

/// Host state sampled at the start of a frame.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// A level is loaded.
    pub in_level: bool,
    /// The vehicle designer is open.
    pub in_designer: bool,
    /// Real time since the previous frame, unaffected by time scale or pause.
    pub unscaled_dt: f64,
    /// Zoom-in chord was pressed this frame.
    pub zoom_in: bool,
    /// Zoom-out chord was pressed this frame.
    pub zoom_out: bool,
    /// Map show/hide chord was pressed this frame.
    pub toggle_map: bool,
    /// Pose of the observer the radar is centered on.
    pub observer: Pose,
    /// Auxiliary display attachments currently present, in host order.
    pub attachments: Vec<AttachmentInfo>,
}

impl FrameInput {
    /// An in-level, out-of-designer frame with no input edges.
    pub fn active(unscaled_dt: f64, observer: Pose) -> Self {
        Self {
            in_level: true,
            in_designer: false,
            unscaled_dt,
            observer,
            ..Default::default()
        }
    }

    /// A frame outside of any level.
    pub fn inactive(unscaled_dt: f64) -> Self {
        Self {
            unscaled_dt,
            ..Default::default()
        }
    }

    /// The radar runs in a level, outside of the designer.
    pub fn session_active(&self) -> bool {
        self.in_level && !self.in_designer
    }
}

/// Source of per-frame key press edges.
pub trait KeySource {
    /// The key went down this frame.
    fn pressed_this_frame(&self, key: &str) -> bool;
}

/// A binding made of keys that must all go down in the same frame.
///
/// Empty key names stand for an unbound slot and are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChord {
    pub keys: Vec<String>,
}

impl KeyChord {
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse `"LeftControl+Equals"` style bindings.
    pub fn parse(binding: &str) -> Self {
        Self::new(binding.split('+').map(str::trim))
    }

    /// Whether the chord has at least one bound key.
    pub fn is_bound(&self) -> bool {
        self.keys.iter().any(|k| !k.is_empty())
    }

    /// Every bound key went down this frame. Unbound chords never fire.
    pub fn pressed(&self, source: &impl KeySource) -> bool {
        self.is_bound()
            && self
                .keys
                .iter()
                .filter(|k| !k.is_empty())
                .all(|k| source.pressed_this_frame(k))
    }
}

/// The radar's resolved key bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChordInput {
    pub zoom_in: KeyChord,
    pub zoom_out: KeyChord,
    pub toggle_map: KeyChord,
}

impl ChordInput {
    /// Write this frame's chord edges into `frame`.
    pub fn sample(&self, source: &impl KeySource, frame: &mut FrameInput) {
        frame.zoom_in = self.zoom_in.pressed(source);
        frame.zoom_out = self.zoom_out.pressed(source);
        frame.toggle_map = self.toggle_map.pressed(source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Pressed(HashSet<&'static str>);

    impl KeySource for Pressed {
        fn pressed_this_frame(&self, key: &str) -> bool {
            self.0.contains(key)
        }
    }

    fn pressed(keys: &[&'static str]) -> Pressed {
        Pressed(keys.iter().copied().collect())
    }

    #[test]
    fn test_session_active_only_outside_designer() {
        let mut frame = FrameInput::active(0.016, Pose::default());
        assert!(frame.session_active());
        frame.in_designer = true;
        assert!(!frame.session_active());
        assert!(!FrameInput::inactive(0.016).session_active());
    }

    #[test]
    fn test_chord_requires_every_key() {
        let chord = KeyChord::parse("LeftControl + Equals");
        assert_eq!(chord.keys, vec!["LeftControl", "Equals"]);
        assert!(chord.pressed(&pressed(&["LeftControl", "Equals"])));
        assert!(!chord.pressed(&pressed(&["Equals"])));
        assert!(!chord.pressed(&pressed(&[])));
    }

    #[test]
    fn test_unbound_slots_are_ignored() {
        let chord = KeyChord::new(["", "Minus"]);
        assert!(chord.pressed(&pressed(&["Minus"])));
        assert!(!KeyChord::new([""]).pressed(&pressed(&["Minus"])));
        assert!(!KeyChord::default().is_bound());
    }

    #[test]
    fn test_sample_fills_frame_edges() {
        let bindings = ChordInput {
            zoom_in: KeyChord::parse("Equals"),
            zoom_out: KeyChord::parse("Minus"),
            toggle_map: KeyChord::parse("LeftAlt+M"),
        };
        let mut frame = FrameInput::active(0.016, Pose::default());
        bindings.sample(&pressed(&["Minus", "LeftAlt", "M"]), &mut frame);
        assert!(!frame.zoom_in);
        assert!(frame.zoom_out);
        assert!(frame.toggle_map);
    }

    #[test]
    fn test_bindings_load_from_json() {
        let json = r#"{ "zoom_in": { "keys": ["Equals"] } }"#;
        let bindings: ChordInput = serde_json::from_str(json).unwrap();
        assert_eq!(bindings.zoom_in, KeyChord::parse("Equals"));
        assert!(!bindings.zoom_out.is_bound());
    }
}
