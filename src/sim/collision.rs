//! Wall and circle-circle collision handling
//!
//! Responses are direction flips only. Walls reflect one axis and clamp the
//! circle back inside; overlapping circles both reverse their whole velocity
//! without being pushed apart.

use glam::IVec2;

use super::state::Circle;

/// Whether two circles touch or overlap
///
/// Compares squared distance against squared radius sum in `i64`, so large
/// viewports cannot overflow.
#[inline]
pub fn circles_overlap(a: IVec2, a_radius: i32, b: IVec2, b_radius: i32) -> bool {
    let d = a.as_i64vec2() - b.as_i64vec2();
    let reach = i64::from(a_radius) + i64::from(b_radius);
    d.length_squared() <= reach * reach
}

/// Which axes a wall contact reflected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeContact {
    pub x: bool,
    pub y: bool,
}

impl EdgeContact {
    /// Number of axes flipped (0, 1, or 2 on a corner)
    pub fn flips(self) -> u32 {
        u32::from(self.x) + u32::from(self.y)
    }
}

/// Reflect and clamp a circle against the viewport walls
///
/// An axis flips when the circle's edge has reached or passed either wall on
/// that axis. Both axes are checked against the pre-flip velocity, so a
/// corner hit flips both. Clamping then pulls the circle back inside.
pub fn resolve_edge_collision(circle: &mut Circle, width: i32, height: i32) -> EdgeContact {
    let r = circle.radius();
    let pos = circle.position;

    let contact = EdgeContact {
        x: pos.x - r <= 0 || pos.x + r >= width,
        y: pos.y - r <= 0 || pos.y + r >= height,
    };

    if contact.x {
        circle.velocity.x = -circle.velocity.x;
    }
    if contact.y {
        circle.velocity.y = -circle.velocity.y;
    }

    circle.position = IVec2::new(clamp_axis(pos.x, r, width), clamp_axis(pos.y, r, height));

    contact
}

/// Keep `[center - r, center + r]` within `[0, extent]`
#[inline]
fn clamp_axis(mut center: i32, r: i32, extent: i32) -> i32 {
    if center + r > extent {
        center = extent - r;
    }
    // Far wall first, so an oversized circle ends up pinned to the near one
    if center - r < 0 {
        center = r;
    }
    center
}

/// Flip every overlapping pair once
///
/// Scans all pairs `(i, j)` with `i < j` in collection order and reverses
/// both velocities of each overlapping pair. Returns the number of pairs
/// flipped.
pub fn resolve_circle_collisions(circles: &mut [Circle]) -> u32 {
    let mut flipped = 0;

    for i in 0..circles.len() {
        for j in (i + 1)..circles.len() {
            let (head, tail) = circles.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);

            if circles_overlap(a.position, a.radius(), b.position, b.radius()) {
                a.flip_direction();
                b.flip_direction();
                flipped += 1;
                log::trace!("Circles {} and {} collided", i, j);
            }
        }
    }

    flipped
}
