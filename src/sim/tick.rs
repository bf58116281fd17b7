//! Fixed interval simulation tick
//!
//! Moves every circle one step and resolves wall and circle collisions.

use serde::{Deserialize, Serialize};

use super::collision::{resolve_circle_collisions, resolve_edge_collision};
use super::state::Scene;

/// When pairwise collisions are resolved relative to movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionMode {
    /// Rescan every pair after each single circle moves.
    ///
    /// A pair that stays in contact while both members move gets flipped
    /// once per rescan, so it can end the tick flipped an even number of
    /// times (back to where it started).
    #[default]
    Interleaved,
    /// Move every circle first, then scan all pairs once
    Deferred,
}

/// What a tick changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// State changed and the renderer should repaint
    pub needs_redraw: bool,
    /// Velocity axes reflected off a wall
    pub edge_flips: u32,
    /// Overlapping pairs flipped, counting repeats across rescans
    pub pair_flips: u32,
}

/// Advance the scene by one tick
///
/// Per circle, in collection order: translate by velocity, then reflect and
/// clamp against the walls. Pairwise collisions are resolved according to
/// `mode`. Never fails; all state is already valid.
pub fn tick(scene: &mut Scene, mode: CollisionMode) -> TickReport {
    let (width, height) = (scene.width(), scene.height());
    let circles = scene.circles_mut();
    let mut report = TickReport {
        needs_redraw: true,
        ..Default::default()
    };

    for i in 0..circles.len() {
        let circle = &mut circles[i];
        circle.translate();
        report.edge_flips += resolve_edge_collision(circle, width, height).flips();

        if mode == CollisionMode::Interleaved {
            report.pair_flips += resolve_circle_collisions(circles);
        }
    }

    if mode == CollisionMode::Deferred {
        report.pair_flips += resolve_circle_collisions(circles);
    }

    log::trace!(
        "Tick: {} edge flips, {} pair flips",
        report.edge_flips,
        report.pair_flips
    );

    report
}
