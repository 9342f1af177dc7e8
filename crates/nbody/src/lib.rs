//! Gravitational dynamics for star clusters.
//!
//! Particles carry a mass (M☉), a collision radius (AU), a position (AU) and
//! a velocity (AU/yr). Time is measured in years, so the gravitational
//! constant is 4π².

pub mod body;
pub mod code;
pub mod collisions;
pub mod forces;
pub mod integrator;
pub mod state;

#[cfg(test)]
mod body_test;
#[cfg(test)]
mod code_test;
#[cfg(test)]
mod state_test;

pub use body::{Particle, ParticleKey};
pub use code::NbodyCode;
pub use collisions::CollisionEvent;
pub use state::ClusterState;
