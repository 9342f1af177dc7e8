use crate::body::{Particle, ParticleKey};
use crate::state::ClusterState;

/// A detected encounter between two particles
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionEvent {
    pub particle_a: ParticleKey,
    pub particle_b: ParticleKey,
    /// Separation at detection (AU)
    pub separation: f64,
    /// Sum of the two collision radii (AU)
    pub collision_radius: f64,
}

impl CollisionEvent {
    /// Pair ordered by key, used to deduplicate repeated detections.
    pub fn ordered_pair(&self) -> (ParticleKey, ParticleKey) {
        if self.particle_a <= self.particle_b {
            (self.particle_a, self.particle_b)
        } else {
            (self.particle_b, self.particle_a)
        }
    }
}

fn check_pair(a: &Particle, b: &Particle) -> Option<CollisionEvent> {
    let separation = a.distance_to(b);
    let collision_radius = a.collision_radius + b.collision_radius;

    if separation < collision_radius {
        Some(CollisionEvent {
            particle_a: a.key,
            particle_b: b.key,
            separation,
            collision_radius,
        })
    } else {
        None
    }
}

/// Direct O(N²) scan over every pair.
pub fn detect_collisions(state: &ClusterState) -> Vec<CollisionEvent> {
    let n = state.particles.len();

    (0..n)
        .flat_map(|i| {
            ((i + 1)..n).filter_map(move |j| check_pair(&state.particles[i], &state.particles[j]))
        })
        .collect()
}
