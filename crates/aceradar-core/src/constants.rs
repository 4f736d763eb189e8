//! Tracker constants and tuning defaults.

// --- Display geometry ---

/// Display units covered by the visible radar radius.
pub const DISPLAY_UNITS_PER_RADIUS: f64 = 256.0;

/// Radar radius at which range rings are drawn at unit scale.
pub const REFERENCE_RADIUS: f64 = 16_000.0;

// --- Zoom ---

/// Discrete radar radii the zoom controller moves between (world units).
pub const ZOOM_PRESETS: [f64; 3] = [8_000.0, 16_000.0, 32_000.0];

/// Convergence rate (world units / second) indexed by the preset a transition starts from.
pub const ZOOM_RATES: [f64; 2] = [80_000.0, 160_000.0];

/// Preset selected when a viewport is created.
pub const ZOOM_INITIAL_PRESET: usize = 1;

/// Minimum unscaled time between two discrete zoom steps (seconds).
pub const ZOOM_COOLDOWN_SECS: f64 = 0.1;

// --- Scanning ---

/// Frames between two scans of the scene for new entities.
pub const SCAN_INTERVAL_FRAMES: u32 = 20;

// --- Visibility ---

/// Fractured scenery with fewer remaining pieces than this is considered destroyed.
pub const FRACTURE_MIN_CHILDREN: usize = 3;

// --- Attachments ---

/// Highest canvas sort order an attachment may request.
pub const MAX_SORT_ORDER: u8 = 15;
