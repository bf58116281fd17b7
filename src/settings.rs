//! Simulation settings
//!
//! Loaded from a JSON file on native hosts. Any field missing from the file
//! falls back to its default.

use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, SceneError};
use crate::sim::{CollisionMode, Color};

/// Scene and scheduling settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of circles placed in a new scene
    pub circle_count: usize,
    /// Colors picked uniformly for new circles
    pub palette: Vec<Color>,
    /// Circle radius range (half-open)
    pub radius_range: Range<i32>,
    /// Per-axis speed range (half-open)
    pub speed_range: Range<i32>,

    // === Scheduling ===
    /// Fixed tick interval in host time units (milliseconds on native)
    pub tick_interval_ms: u64,
    /// How pairwise collisions are interleaved with movement
    pub collision_mode: CollisionMode,

    // === Placement ===
    /// RNG seed for reproducible scenes (random when unset)
    pub seed: Option<u64>,
    /// Seed point redraws allowed per circle before giving up
    pub max_placement_attempts: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            circle_count: CIRCLE_COUNT,
            palette: Color::DEFAULT_PALETTE.to_vec(),
            radius_range: CIRCLE_MIN_RADIUS..CIRCLE_MAX_RADIUS,
            speed_range: CIRCLE_MIN_SPEED..CIRCLE_MAX_SPEED,

            tick_interval_ms: TICK_INTERVAL_MS,
            collision_mode: CollisionMode::default(),

            seed: None,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check these settings against a viewport before placing circles
    pub fn validate_for(&self, width: i32, height: i32) -> Result<(), SceneError> {
        check_viewport(width, height)?;

        let radius = &self.radius_range;
        if radius.is_empty() {
            return Err(SceneError::invalid(format!(
                "radius range {}..{} is empty",
                radius.start, radius.end
            )));
        }
        if radius.start <= 0 {
            return Err(SceneError::invalid(format!(
                "radius range starts at {}, radii must be positive",
                radius.start
            )));
        }

        let speed = &self.speed_range;
        if speed.is_empty() {
            return Err(SceneError::invalid(format!(
                "speed range {}..{} is empty",
                speed.start, speed.end
            )));
        }
        if speed.start < 0 {
            return Err(SceneError::invalid(format!(
                "speed range starts at {}, speeds cannot be negative",
                speed.start
            )));
        }
        // One step may not cross the whole viewport
        let shortest = width.min(height);
        if speed.end - 1 >= shortest {
            return Err(SceneError::invalid(format!(
                "speeds up to {} cross a {width}x{height} viewport in one tick",
                speed.end - 1
            )));
        }

        if self.circle_count > 0 && self.palette.is_empty() {
            return Err(SceneError::invalid("palette is empty"));
        }
        if self.max_placement_attempts == 0 {
            return Err(SceneError::invalid("max_placement_attempts must be at least 1"));
        }

        // Seed points are drawn from [r, extent - r), which must not be empty
        let largest_diameter = i64::from(radius.end - 1) * 2;
        if largest_diameter >= i64::from(width) || largest_diameter >= i64::from(height) {
            return Err(SceneError::invalid(format!(
                "circles up to {largest_diameter} wide do not fit a {width}x{height} viewport"
            )));
        }

        Ok(())
    }
}

/// Viewport extents must be positive and at most [`MAX_VIEWPORT_EXTENT`]
pub(crate) fn check_viewport(width: i32, height: i32) -> Result<(), SceneError> {
    if width <= 0 || height <= 0 {
        return Err(SceneError::invalid(format!(
            "viewport {width}x{height} has no area"
        )));
    }
    if width > MAX_VIEWPORT_EXTENT || height > MAX_VIEWPORT_EXTENT {
        return Err(SceneError::invalid(format!(
            "viewport {width}x{height} exceeds {MAX_VIEWPORT_EXTENT} on a side"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(err: SceneError) -> String {
        match err {
            SceneError::InvalidConfiguration { reason } => reason,
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_match_classic_demo() {
        let settings = Settings::default();
        assert_eq!(settings.circle_count, 15);
        assert_eq!(settings.radius_range, 20..70);
        assert_eq!(settings.speed_range, 5..10);
        assert_eq!(settings.tick_interval_ms, 30);
        assert_eq!(settings.palette.len(), 5);
        assert_eq!(settings.collision_mode, CollisionMode::Interleaved);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "circle_count": 4, "seed": 7 }"#).unwrap();
        assert_eq!(settings.circle_count, 4);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.radius_range, 20..70);
        assert_eq!(settings.tick_interval_ms, 30);
    }

    #[test]
    fn test_json_ranges_and_mode() {
        let json = r#"{
            "radius_range": { "start": 5, "end": 9 },
            "speed_range": { "start": 1, "end": 3 },
            "collision_mode": "deferred"
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.radius_range, 5..9);
        assert_eq!(settings.speed_range, 1..3);
        assert_eq!(settings.collision_mode, CollisionMode::Deferred);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(matches!(
            Settings::load_from("/definitely/not/here/settings.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_defaults_fit_a_phone_screen() {
        assert!(Settings::default().validate_for(720, 1280).is_ok());
    }

    #[test]
    fn test_rejects_circles_wider_than_viewport() {
        let settings = Settings::default();
        // radius up to 69 -> diameter 138
        let err = settings.validate_for(138, 500).unwrap_err();
        assert!(reason(err).contains("do not fit"));
        assert!(settings.validate_for(139, 139).is_ok());
    }

    #[test]
    fn test_rejects_bad_ranges() {
        let mut settings = Settings::default();
        settings.radius_range = 10..10;
        assert!(reason(settings.validate_for(500, 500).unwrap_err()).contains("empty"));

        settings.radius_range = 0..10;
        assert!(reason(settings.validate_for(500, 500).unwrap_err()).contains("positive"));

        settings.radius_range = 5..10;
        settings.speed_range = -1..3;
        assert!(reason(settings.validate_for(500, 500).unwrap_err()).contains("negative"));
    }

    #[test]
    fn test_rejects_empty_palette_only_with_circles() {
        let mut settings = Settings {
            palette: Vec::new(),
            ..Default::default()
        };
        assert!(settings.validate_for(500, 500).is_err());

        settings.circle_count = 0;
        assert!(settings.validate_for(500, 500).is_ok());
    }

    #[test]
    fn test_rejects_speeds_crossing_viewport() {
        let mut settings = Settings {
            speed_range: 2_000_000_000..2_000_000_001,
            ..Default::default()
        };
        let err = settings.validate_for(720, 1280).unwrap_err();
        assert!(reason(err).contains("one tick"));

        // Max speed is end - 1; it must stay below the shorter side
        settings.speed_range = 5..721;
        assert!(settings.validate_for(720, 1280).is_err());
        settings.speed_range = 5..720;
        assert!(settings.validate_for(720, 1280).is_ok());
    }

    #[test]
    fn test_rejects_oversized_viewport() {
        let err = Settings::default()
            .validate_for(i32::MAX, 500)
            .unwrap_err();
        assert!(reason(err).contains("exceeds"));
        assert!(Settings::default()
            .validate_for(MAX_VIEWPORT_EXTENT, MAX_VIEWPORT_EXTENT)
            .is_ok());
    }

    #[test]
    fn test_rejects_empty_viewport() {
        assert!(Settings::default().validate_for(0, 500).is_err());
        assert!(Settings::default().validate_for(500, -1).is_err());
    }
}
