//! Scene state: circles and the viewport they live in

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::circles_overlap;
use crate::consts::FULL_DEGREE;
use crate::error::SceneError;
use crate::settings::{Settings, check_viewport};

/// Packed ARGB fill color
///
/// Opaque to the simulation, only carried through to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLUE: Color = Color(0xFF00_00FF);
    pub const GREEN: Color = Color(0xFF00_FF00);
    pub const MAGENTA: Color = Color(0xFFFF_00FF);
    pub const RED: Color = Color(0xFFFF_0000);
    pub const CYAN: Color = Color(0xFF00_FFFF);

    pub const DEFAULT_PALETTE: [Color; 5] = [
        Color::BLUE,
        Color::GREEN,
        Color::MAGENTA,
        Color::RED,
        Color::CYAN,
    ];

    /// Red, green, blue components
    pub fn rgb(self) -> (u8, u8, u8) {
        let [_, r, g, b] = self.0.to_be_bytes();
        (r, g, b)
    }
}

/// A circle entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    radius: i32,
    /// Resting point chosen at placement, before the heading offset
    seed: IVec2,
    /// Initial heading in whole degrees, [0, 360)
    heading: i32,
    pub position: IVec2,
    pub velocity: IVec2,
    color: Color,
}

impl Circle {
    /// Create a circle resting at `seed`, nudged once along `heading`
    ///
    /// The nudge is `speed * (cos, sin)` of the heading, rounded, where the
    /// speed is taken per axis from `velocity`.
    pub fn new(radius: i32, seed: IVec2, heading: i32, velocity: IVec2, color: Color) -> Self {
        let radians = f64::from(heading).to_radians();
        let offset = IVec2::new(
            (f64::from(velocity.x) * radians.cos()).round() as i32,
            (f64::from(velocity.y) * radians.sin()).round() as i32,
        );

        Self {
            radius,
            seed,
            heading,
            position: seed + offset,
            velocity,
            color,
        }
    }

    /// Create a circle at an exact position (no placement offset)
    pub fn at(radius: i32, position: IVec2, velocity: IVec2, color: Color) -> Self {
        Self {
            radius,
            seed: position,
            heading: 0,
            position,
            velocity,
            color,
        }
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    #[inline]
    pub fn seed(&self) -> IVec2 {
        self.seed
    }

    #[inline]
    pub fn heading(&self) -> i32 {
        self.heading
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Advance by one step of velocity
    #[inline]
    pub fn translate(&mut self) {
        self.position += self.velocity;
    }

    /// Reverse both velocity components
    #[inline]
    pub fn flip_direction(&mut self) {
        self.velocity = -self.velocity;
    }

    /// Whether the bounding box lies inside a `width` x `height` viewport
    pub fn is_within(&self, width: i32, height: i32) -> bool {
        let r = self.radius;
        let p = self.position;
        p.x - r >= 0 && p.x + r <= width && p.y - r >= 0 && p.y + r <= height
    }
}

/// The circles and the viewport bounding them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    width: i32,
    height: i32,
    /// Draw and collision order (insertion order)
    circles: Vec<Circle>,
}

impl Scene {
    /// Build a scene of randomly placed, non-overlapping circles
    ///
    /// Seed points are redrawn until they clear every circle placed so far,
    /// up to `settings.max_placement_attempts` draws per circle.
    pub fn initialize<R: Rng>(
        width: i32,
        height: i32,
        settings: &Settings,
        rng: &mut R,
    ) -> Result<Self, SceneError> {
        settings.validate_for(width, height)?;

        let mut scene = Self {
            width,
            height,
            circles: Vec::with_capacity(settings.circle_count),
        };
        let mut retries: u64 = 0;

        for _ in 0..settings.circle_count {
            let color = settings.palette[rng.random_range(0..settings.palette.len())];
            let radius = rng.random_range(settings.radius_range.clone());
            let speed = rng.random_range(settings.speed_range.clone());
            let heading = rng.random_range(0..FULL_DEGREE);

            let seed = scene
                .find_free_seed(radius, settings.max_placement_attempts, rng, &mut retries)
                .ok_or_else(|| {
                    log::warn!(
                        "Placement exhausted after {} circles in {}x{}",
                        scene.circles.len(),
                        width,
                        height
                    );
                    SceneError::PlacementExhausted {
                        placed: scene.circles.len(),
                        requested: settings.circle_count,
                        attempts: settings.max_placement_attempts,
                    }
                })?;

            scene
                .circles
                .push(Circle::new(radius, seed, heading, IVec2::splat(speed), color));
        }

        log::debug!(
            "Scene {}x{}: placed {} circles ({} retries)",
            width,
            height,
            scene.circles.len(),
            retries
        );

        Ok(scene)
    }

    /// Build a scene from explicit circles
    ///
    /// Every radius must be positive and fit the viewport, every center must
    /// lie inside it, and no velocity component may cross it in one tick. A
    /// circle may still protrude past a wall; the first tick clamps it.
    pub fn from_circles(
        width: i32,
        height: i32,
        circles: Vec<Circle>,
    ) -> Result<Self, SceneError> {
        check_viewport(width, height)?;
        let shortest = width.min(height);

        for (i, c) in circles.iter().enumerate() {
            if c.radius <= 0 {
                return Err(SceneError::invalid(format!(
                    "circle {i} has non-positive radius {}",
                    c.radius
                )));
            }
            if i64::from(c.radius) * 2 > i64::from(shortest) {
                return Err(SceneError::invalid(format!(
                    "circle {i} with radius {} does not fit a {width}x{height} viewport",
                    c.radius
                )));
            }
            let p = c.position;
            if !(0..=width).contains(&p.x) || !(0..=height).contains(&p.y) {
                return Err(SceneError::invalid(format!(
                    "circle {i} centered at ({}, {}) is outside the viewport",
                    p.x, p.y
                )));
            }
            let v = c.velocity;
            if v.x.unsigned_abs().max(v.y.unsigned_abs()) >= shortest.unsigned_abs() {
                return Err(SceneError::invalid(format!(
                    "circle {i} velocity ({}, {}) crosses the viewport in one tick",
                    v.x, v.y
                )));
            }
        }

        Ok(Self {
            width,
            height,
            circles,
        })
    }

    /// Draw seed points until one clears every placed circle's seed
    fn find_free_seed<R: Rng>(
        &self,
        radius: i32,
        max_attempts: u32,
        rng: &mut R,
        retries: &mut u64,
    ) -> Option<IVec2> {
        for attempt in 0..max_attempts {
            let seed = self.random_seed_point(radius, rng);
            let blocked = self
                .circles
                .iter()
                .any(|c| circles_overlap(seed, radius, c.seed, c.radius));
            if !blocked {
                *retries += u64::from(attempt);
                return Some(seed);
            }
        }
        *retries += u64::from(max_attempts);
        None
    }

    /// A point keeping the whole circle inside the viewport
    fn random_seed_point<R: Rng>(&self, radius: i32, rng: &mut R) -> IVec2 {
        IVec2::new(
            rng.random_range(radius..self.width - radius),
            rng.random_range(radius..self.height - radius),
        )
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Circles in draw order
    #[inline]
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    #[inline]
    pub(crate) fn circles_mut(&mut self) -> &mut [Circle] {
        &mut self.circles
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    /// Whether every circle lies fully inside the viewport
    pub fn is_contained(&self) -> bool {
        self.circles
            .iter()
            .all(|c| c.is_within(self.width, self.height))
    }
}
