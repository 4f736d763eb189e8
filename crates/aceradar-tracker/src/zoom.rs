//! Zoom controller: debounced discrete preset selection driving a
//! rate-limited continuous radius.
//!
//! Pure state machine with no ECS dependency. Time is the unscaled frame
//! delta, so zooming keeps working while the simulation is slowed or paused.

use aceradar_core::config::RadarConfig;
use aceradar_core::error::RadarResult;

/// Discrete action taken by one `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomStep {
    None,
    In,
    Out,
}

#[derive(Debug, Clone)]
pub struct ZoomController {
    presets: Vec<f64>,
    rates: Vec<f64>,
    cooldown_required: f64,
    cooldown_timer: f64,
    preset_index: usize,
    current_radius: f64,
    /// Rate of the most recent discrete step; zero until the first step.
    active_rate: f64,
}

impl ZoomController {
    /// Controller resting on the configured initial preset.
    pub fn new(config: &RadarConfig) -> RadarResult<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    /// `new` for a config that already passed `RadarConfig::validate`.
    pub(crate) fn from_validated(config: &RadarConfig) -> Self {
        let preset_index = config.initial_preset.min(config.zoom_presets.len() - 1);
        Self {
            presets: config.zoom_presets.clone(),
            rates: config.zoom_rates.clone(),
            cooldown_required: config.zoom_cooldown_secs,
            // Ready immediately: the first press is never swallowed.
            cooldown_timer: config.zoom_cooldown_secs,
            preset_index,
            current_radius: config.zoom_presets[preset_index],
            active_rate: 0.0,
        }
    }

    /// Advance one frame with this frame's zoom edges.
    pub fn update(&mut self, zoom_in: bool, zoom_out: bool, unscaled_dt: f64) -> ZoomStep {
        let mut step = ZoomStep::None;

        if self.cooldown_timer < self.cooldown_required {
            self.cooldown_timer += unscaled_dt;
        } else if zoom_in && !zoom_out && self.preset_index > 0 {
            self.cooldown_timer = 0.0;
            self.preset_index -= 1;
            self.active_rate = self.rates[self.preset_index];
            step = ZoomStep::In;
        } else if zoom_out && !zoom_in && self.preset_index < self.presets.len() - 1 {
            self.cooldown_timer = 0.0;
            self.active_rate = self.rates[self.preset_index];
            self.preset_index += 1;
            step = ZoomStep::Out;
        }

        self.current_radius = move_towards(
            self.current_radius,
            self.target_radius(),
            self.active_rate * unscaled_dt,
        );
        step
    }

    pub fn radius(&self) -> f64 {
        self.current_radius
    }

    /// Radius of the selected preset.
    pub fn target_radius(&self) -> f64 {
        self.presets[self.preset_index]
    }

    pub fn preset_index(&self) -> usize {
        self.preset_index
    }

    pub fn active_rate(&self) -> f64 {
        self.active_rate
    }

    pub fn is_settled(&self) -> bool {
        self.current_radius == self.target_radius()
    }
}

/// Step `current` toward `target` by at most `max_delta`, never overshooting.
fn move_towards(current: f64, target: f64, max_delta: f64) -> f64 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aceradar_core::error::RadarError;

    const FRAME: f64 = 1.0 / 60.0;

    fn controller() -> ZoomController {
        ZoomController::new(&RadarConfig::default()).unwrap()
    }

    #[test]
    fn test_starts_on_middle_preset() {
        let zoom = controller();
        assert_eq!(zoom.preset_index(), 1);
        assert_eq!(zoom.radius(), 16_000.0);
        assert!(zoom.is_settled());
    }

    #[test]
    fn test_zoom_in_converges_at_source_rate() {
        let mut zoom = controller();
        assert_eq!(zoom.update(true, false, 0.01), ZoomStep::In);
        assert_eq!(zoom.preset_index(), 0);
        assert_eq!(zoom.active_rate(), 80_000.0);
        // 80000 * 0.01 = 800 units on the step frame.
        assert!((zoom.radius() - 15_200.0).abs() < 1e-6);

        // 8000 units at 80000/s is 0.1s total.
        for _ in 0..9 {
            zoom.update(false, false, 0.01);
        }
        assert!((zoom.radius() - 8_000.0).abs() < 1e-6);
        zoom.update(false, false, 0.01);
        assert_eq!(zoom.radius(), 8_000.0, "clamped, never overshoots");
    }

    #[test]
    fn test_zoom_out_rate_comes_from_source_preset() {
        let mut zoom = controller();
        assert_eq!(zoom.update(false, true, FRAME), ZoomStep::Out);
        assert_eq!(zoom.preset_index(), 2);
        assert_eq!(zoom.active_rate(), 160_000.0);
        assert!(zoom.radius() > 16_000.0);
    }

    #[test]
    fn test_simultaneous_edges_do_nothing() {
        let mut zoom = controller();
        assert_eq!(zoom.update(true, true, FRAME), ZoomStep::None);
        assert_eq!(zoom.preset_index(), 1);
        assert_eq!(zoom.radius(), 16_000.0);
    }

    #[test]
    fn test_cooldown_swallows_presses() {
        // Binary-exact step so the timer crosses 0.1 on a known frame.
        let dt = 1.0 / 32.0;
        let mut zoom = controller();
        assert_eq!(zoom.update(false, true, dt), ZoomStep::Out);
        // Timer goes 0.03125, 0.0625, 0.09375, 0.125 while presses are ignored.
        for _ in 0..4 {
            assert_eq!(zoom.update(true, false, dt), ZoomStep::None);
            assert_eq!(zoom.preset_index(), 2);
        }
        assert_eq!(zoom.update(true, false, dt), ZoomStep::In);
        assert_eq!(zoom.preset_index(), 1);
    }

    #[test]
    fn test_limits_are_respected() {
        let mut zoom = controller();
        zoom.update(true, false, 1.0);
        zoom.update(false, false, 1.0);
        assert_eq!(zoom.preset_index(), 0);
        assert_eq!(zoom.update(true, false, 1.0), ZoomStep::None);
        assert_eq!(zoom.preset_index(), 0);

        zoom.update(false, true, 1.0);
        zoom.update(false, false, 1.0);
        zoom.update(false, true, 1.0);
        zoom.update(false, false, 1.0);
        assert_eq!(zoom.preset_index(), 2);
        assert_eq!(zoom.update(false, true, 1.0), ZoomStep::None);
        assert_eq!(zoom.radius(), 32_000.0);
    }

    #[test]
    fn test_reversal_mid_animation_keeps_moving_smoothly() {
        let config = RadarConfig {
            zoom_cooldown_secs: 0.0,
            ..Default::default()
        };
        let mut zoom = ZoomController::new(&config).unwrap();
        zoom.update(true, false, 0.05); // toward 8000 at 80000/s: 16000 -> 12000
        assert!((zoom.radius() - 12_000.0).abs() < 1e-6);
        zoom.update(false, true, 0.01); // back toward 16000 at the preset-0 rate
        assert_eq!(zoom.preset_index(), 1);
        assert_eq!(zoom.active_rate(), 80_000.0);
        assert!((zoom.radius() - 12_800.0).abs() < 1e-6);
    }

    #[test]
    fn test_move_towards() {
        assert_eq!(move_towards(0.0, 10.0, 3.0), 3.0);
        assert_eq!(move_towards(10.0, 0.0, 3.0), 7.0);
        assert_eq!(move_towards(9.0, 10.0, 3.0), 10.0);
        assert_eq!(move_towards(5.0, 5.0, 0.0), 5.0);
    }

    #[test]
    fn test_new_rejects_unusable_tables() {
        let empty = RadarConfig {
            zoom_presets: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(ZoomController::new(&empty), Err(RadarError::Config(_))));

        let short_rates = RadarConfig {
            zoom_rates: vec![80_000.0],
            ..Default::default()
        };
        assert!(matches!(
            ZoomController::new(&short_rates),
            Err(RadarError::Config(_))
        ));
    }
}
