//! Stellar physics used by cluster simulations: FUV luminosities of massive
//! stars, a parametric main-sequence evolution code with supernova detection,
//! and initial-mass-function sampling.

pub mod evolution;
pub mod luminosity;
pub mod sampling;

#[cfg(test)]
mod evolution_test;

pub use evolution::{
    main_sequence_lifetime, ParametricEvolution, StellarParticle, NEUTRON_STAR_MASS,
    SUPERNOVA_PROGENITOR_MASS,
};
pub use luminosity::{fuv_luminosity, LSUN_ERG_PER_S};
pub use sampling::{sample_mass_kroupa, sample_power_law};
