//! Host-facing driver
//!
//! Owns the scene between viewport changes, runs ticks on a fixed interval
//! and publishes a [`Frame`] for the renderer after every completed tick.
//! Renderers only ever read the published frame, never the scene mid-tick.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::MAX_TICKS_PER_ADVANCE;
use crate::error::SceneError;
use crate::settings::Settings;
use crate::sim::{Circle, Color, Scene, TickReport, tick};

/// What the renderer needs to paint one filled disc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CircleView {
    pub position: IVec2,
    pub radius: i32,
    pub color: Color,
}

impl From<&Circle> for CircleView {
    fn from(circle: &Circle) -> Self {
        Self {
            position: circle.position,
            radius: circle.radius(),
            color: circle.color(),
        }
    }
}

/// Read-only snapshot of the scene after a completed tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Ticks run since the scene was created
    pub tick: u64,
    pub width: i32,
    pub height: i32,
    /// Circles in draw order
    pub circles: Vec<CircleView>,
}

impl Frame {
    fn capture(scene: &Scene, tick: u64) -> Self {
        Self {
            tick,
            width: scene.width(),
            height: scene.height(),
            circles: scene.circles().iter().map(CircleView::from).collect(),
        }
    }
}

/// Scene lifecycle and tick scheduling
pub struct Animator {
    settings: Settings,
    seed: u64,
    rng: Pcg32,
    scene: Option<Scene>,
    frame: Frame,
    running: bool,
    accumulator_ms: u64,
    ticks: u64,
}

impl Animator {
    /// Create an animator with no scene yet
    ///
    /// Uses `settings.seed` when set, otherwise a random seed.
    pub fn new(settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        log::info!("Animator seed: {}", seed);

        Self {
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            scene: None,
            frame: Frame::default(),
            running: false,
            accumulator_ms: 0,
            ticks: 0,
        }
    }

    /// The viewport has a size: build a fresh scene and start ticking
    ///
    /// Called again on resize, which discards the old scene. On error the
    /// animator is left stopped with no scene.
    pub fn on_viewport_ready(&mut self, width: i32, height: i32) -> Result<&Frame, SceneError> {
        self.running = false;
        self.scene = None;
        self.accumulator_ms = 0;
        self.ticks = 0;

        let scene = match Scene::initialize(width, height, &self.settings, &mut self.rng) {
            Ok(scene) => scene,
            Err(e) => {
                log::error!("Scene {}x{} failed: {}", width, height, e);
                self.frame = Frame::default();
                return Err(e);
            }
        };

        log::info!(
            "Scene ready: {}x{} with {} circles",
            width,
            height,
            scene.len()
        );
        self.frame = Frame::capture(&scene, 0);
        self.scene = Some(scene);
        self.running = true;

        Ok(&self.frame)
    }

    /// Resume ticking. Returns false when there is no scene to tick.
    pub fn start(&mut self) -> bool {
        self.running = self.scene.is_some();
        self.running
    }

    /// Stop ticking; the last frame stays valid for repaint
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator_ms = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run a single tick and publish the resulting frame
    ///
    /// Returns `None` while stopped or before the viewport is ready.
    pub fn step(&mut self) -> Option<TickReport> {
        if !self.running {
            return None;
        }
        let scene = self.scene.as_mut()?;

        let report = tick(scene, self.settings.collision_mode);
        self.ticks += 1;
        self.frame = Frame::capture(scene, self.ticks);

        Some(report)
    }

    /// Feed elapsed host time and run every whole tick interval it covers
    ///
    /// At most [`MAX_TICKS_PER_ADVANCE`] ticks run per call; time beyond
    /// that is dropped. Returns whether a repaint is needed.
    pub fn advance(&mut self, elapsed_ms: u64) -> bool {
        if !self.running {
            return false;
        }

        let interval = self.settings.tick_interval_ms.max(1);
        let cap = interval.saturating_mul(u64::from(MAX_TICKS_PER_ADVANCE));
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms).min(cap);

        let mut redraw = false;
        while self.accumulator_ms >= interval {
            match self.step() {
                Some(report) => redraw |= report.needs_redraw,
                None => break,
            }
            self.accumulator_ms -= interval;
        }

        redraw
    }

    /// The latest published frame
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Seed used for placement, for reproducing a run
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Ticks run on the current scene
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> Animator {
        Animator::new(Settings {
            seed: Some(seed),
            radius_range: 10..30,
            ..Default::default()
        })
    }

    #[test]
    fn test_nothing_runs_before_viewport() {
        let mut animator = seeded(1);
        assert!(!animator.is_running());
        assert!(!animator.start());
        assert!(animator.step().is_none());
        assert!(!animator.advance(1000));
        assert!(animator.frame().circles.is_empty());
    }

    #[test]
    fn test_viewport_ready_builds_and_starts() {
        let mut animator = seeded(12345);
        let frame = animator.on_viewport_ready(720, 1280).unwrap();
        assert_eq!(frame.tick, 0);
        assert_eq!(frame.circles.len(), 15);
        assert_eq!((frame.width, frame.height), (720, 1280));
        assert!(animator.is_running());
    }

    #[test]
    fn test_step_publishes_frame() {
        let mut animator = seeded(12345);
        animator.on_viewport_ready(720, 1280).unwrap();

        let report = animator.step().unwrap();
        assert!(report.needs_redraw);
        assert_eq!(animator.ticks(), 1);

        let frame = animator.frame();
        assert_eq!(frame.tick, 1);
        let scene = animator.scene().unwrap();
        for (view, circle) in frame.circles.iter().zip(scene.circles()) {
            assert_eq!(*view, CircleView::from(circle));
        }
    }

    #[test]
    fn test_stop_freezes_frame() {
        let mut animator = seeded(3);
        animator.on_viewport_ready(500, 500).unwrap();
        animator.step();
        animator.stop();

        let before = animator.frame().clone();
        assert!(animator.step().is_none());
        assert!(!animator.advance(300));
        assert_eq!(animator.frame(), &before);

        assert!(animator.start());
        assert!(animator.step().is_some());
        assert_eq!(animator.frame().tick, 2);
    }

    #[test]
    fn test_advance_runs_whole_intervals() {
        let mut animator = seeded(4);
        animator.on_viewport_ready(500, 500).unwrap();

        // 30 ms interval: 65 ms covers two ticks with 5 ms left over
        assert!(animator.advance(65));
        assert_eq!(animator.ticks(), 2);

        assert!(!animator.advance(20));
        assert_eq!(animator.ticks(), 2);

        assert!(animator.advance(5));
        assert_eq!(animator.ticks(), 3);
    }

    #[test]
    fn test_advance_caps_catch_up() {
        let mut animator = seeded(5);
        animator.on_viewport_ready(500, 500).unwrap();
        assert!(animator.advance(60_000));
        assert_eq!(animator.ticks(), u64::from(MAX_TICKS_PER_ADVANCE));
    }

    #[test]
    fn test_advance_survives_huge_interval() {
        let mut animator = Animator::new(Settings {
            seed: Some(9),
            radius_range: 10..30,
            tick_interval_ms: u64::MAX / 2,
            ..Default::default()
        });
        animator.on_viewport_ready(500, 500).unwrap();

        assert!(!animator.advance(10));
        // 10 ms banked plus half of u64 covers exactly one interval
        assert!(animator.advance(u64::MAX / 2));
        assert_eq!(animator.ticks(), 1);
    }

    #[test]
    fn test_advance_survives_huge_elapsed() {
        let mut animator = seeded(10);
        animator.on_viewport_ready(500, 500).unwrap();

        assert!(animator.advance(u64::MAX));
        assert!(animator.advance(u64::MAX));
        assert_eq!(animator.ticks(), 2 * u64::from(MAX_TICKS_PER_ADVANCE));
    }

    #[test]
    fn test_resize_replaces_scene() {
        let mut animator = seeded(6);
        animator.on_viewport_ready(500, 500).unwrap();
        animator.advance(90);
        assert_eq!(animator.ticks(), 3);

        let frame = animator.on_viewport_ready(800, 400).unwrap();
        assert_eq!(frame.tick, 0);
        assert_eq!((frame.width, frame.height), (800, 400));
        assert_eq!(animator.ticks(), 0);
        assert!(animator.is_running());
    }

    #[test]
    fn test_bad_viewport_leaves_animator_stopped() {
        let mut animator = seeded(7);
        animator.on_viewport_ready(500, 500).unwrap();

        let err = animator.on_viewport_ready(50, 500).unwrap_err();
        assert!(matches!(err, SceneError::InvalidConfiguration { .. }));
        assert!(!animator.is_running());
        assert!(animator.scene().is_none());
        assert!(!animator.start());
    }

    #[test]
    fn test_same_seed_same_frames() {
        let mut a = seeded(2024);
        let mut b = seeded(2024);
        a.on_viewport_ready(640, 480).unwrap();
        b.on_viewport_ready(640, 480).unwrap();

        for _ in 0..50 {
            a.step();
            b.step();
        }
        assert_eq!(a.frame(), b.frame());
        assert_eq!(a.seed(), 2024);
    }

    #[test]
    fn test_frame_serializes() {
        let mut animator = seeded(8);
        animator.on_viewport_ready(400, 400).unwrap();
        let json = serde_json::to_value(animator.frame()).unwrap();
        assert_eq!(json["tick"], 0);
        assert_eq!(json["circles"].as_array().unwrap().len(), 15);
    }
}
