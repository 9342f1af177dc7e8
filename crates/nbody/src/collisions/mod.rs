//! Close-encounter detection
//!
//! Two particles "collide" when their separation drops below the sum of
//! their collision radii. For stars carrying disks the collision radius is
//! an encounter trigger rather than a physical size; the consumer shrinks it
//! after each resolved encounter so the same flyby is not reported twice.

pub mod detection;

#[cfg(test)]
mod detection_test;

pub use detection::{detect_collisions, CollisionEvent};
