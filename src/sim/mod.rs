//! Deterministic simulation module
//!
//! Everything that moves circles lives here. No rendering, timing or
//! platform dependencies:
//! - Integer positions and velocities only
//! - Seeded RNG only (placement)
//! - Stable iteration order (insertion order)

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{
    EdgeContact, circles_overlap, resolve_circle_collisions, resolve_edge_collision,
};
pub use state::{Circle, Color, Scene};
pub use tick::{CollisionMode, TickReport, tick};
