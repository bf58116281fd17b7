//! Bouncing Circles - circles drifting around a rectangular viewport
//!
//! Core modules:
//! - `sim`: Deterministic simulation (placement, wall and circle collisions)
//! - `animator`: Host-facing driver (viewport lifecycle, tick scheduling, frames)
//! - `settings`: Data-driven scene configuration
//! - `error`: Scene construction and settings errors

pub mod animator;
pub mod error;
pub mod settings;
pub mod sim;

pub use animator::{Animator, CircleView, Frame};
pub use error::{ConfigError, SceneError};
pub use settings::Settings;

/// Simulation defaults
pub mod consts {
    /// Circles placed in a new scene
    pub const CIRCLE_COUNT: usize = 15;

    /// Radius range (half-open)
    pub const CIRCLE_MIN_RADIUS: i32 = 20;
    pub const CIRCLE_MAX_RADIUS: i32 = 70;

    /// Per-axis speed range (half-open), pixels per tick
    pub const CIRCLE_MIN_SPEED: i32 = 5;
    pub const CIRCLE_MAX_SPEED: i32 = 10;

    /// Headings are drawn in whole degrees from [0, FULL_DEGREE)
    pub const FULL_DEGREE: i32 = 360;

    /// Fixed tick interval (milliseconds)
    pub const TICK_INTERVAL_MS: u64 = 30;
    /// Maximum ticks per `advance` call to prevent spiral of death
    pub const MAX_TICKS_PER_ADVANCE: u32 = 8;

    /// Largest accepted viewport side; keeps positions far from i32 overflow
    pub const MAX_VIEWPORT_EXTENT: i32 = 1 << 20;

    /// Seed point draws per circle before placement gives up
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;
}
