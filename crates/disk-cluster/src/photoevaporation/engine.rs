use tracing::debug;
use units::{Mass, Time};

use super::mass_loss_grid::{FuvQuery, MassLossGrid};
use super::radiation::{euv_distance, euv_mass_loss_rate, fuv_flux_g0};
use crate::disk::DiskGrid;
use crate::star::Star;

/// Effect of one photoevaporation step on a disk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhotoevaporationOutcome {
    /// Mass was removed from the outside in and the disk lives on.
    Evaporated { mass_lost: Mass },
    /// The disk is gone and must be retired.
    Dispersed { mass_lost: Mass },
}

pub struct PhotoevaporationEngine {
    grid: MassLossGrid,
    /// Disks lighter than this are dispersed
    min_disk_mass: Mass,
}

impl PhotoevaporationEngine {
    pub fn new(grid: MassLossGrid, min_disk_mass: Mass) -> Self {
        Self {
            grid,
            min_disk_mass,
        }
    }

    pub fn mass_loss_grid(&self) -> &MassLossGrid {
        &self.grid
    }

    /// Set each disk-bearing star's incident FUV flux and EUV flag from the
    /// bright stars of `stars`.
    ///
    /// A disk inside the EUV distance of any bright star is flagged for EUV
    /// mass loss; bright stars further away add their FUV flux.
    pub fn irradiate(&self, stars: &mut [Star]) {
        let sources: Vec<(usize, f64)> = stars
            .iter()
            .enumerate()
            .filter(|(_, s)| s.bright)
            .map(|(i, s)| (i, stellar::fuv_luminosity(s.stellar_mass)))
            .collect();

        for target in 0..stars.len() {
            if !stars[target].has_disk() {
                continue;
            }
            let mut g0 = 0.0;
            let mut euv = false;
            let d_min = euv_distance(stars[target].disk_radius);

            for &(source, luminosity) in &sources {
                let distance = stars[source].distance_to(&stars[target]);
                if distance < d_min {
                    euv = true;
                } else {
                    g0 += fuv_flux_g0(luminosity, distance);
                }
            }

            let star = &mut stars[target];
            star.g0 = g0;
            star.euv = star.euv || euv;
        }
    }

    /// Combined EUV and FUV mass loss over `dt` for a disk with the given star.
    ///
    /// Consumes the star's EUV flag.
    pub fn mass_loss(&self, star: &mut Star, disk: &DiskGrid, dt: Time) -> Mass {
        let radius = disk.radius();

        let euv = if star.euv {
            star.euv = false;
            euv_mass_loss_rate(radius).integrate(dt)
        } else {
            Mass::zero()
        };

        let query = FuvQuery {
            stellar_mass: star.stellar_mass,
            fuv_flux: star.g0,
            disk_mass: disk.disk_mass(radius),
            disk_radius: radius,
        };
        let fuv = self.grid.mass_loss_rate(&query).integrate(dt);

        euv + fuv
    }

    /// Apply one step of photoevaporation to `star` and its disk.
    ///
    /// The disk is declared dispersed, without touching the grid, once the
    /// cumulative loss reaches the initial disk mass or the disk is lighter
    /// than the minimum mass. Otherwise the mass is evaporated from the
    /// outside in; a disk too light to supply it is dispersed as well.
    pub fn evaporate_star(
        &self,
        star: &mut Star,
        disk: &mut DiskGrid,
        dt: Time,
    ) -> PhotoevaporationOutcome {
        let mass_lost = self.mass_loss(star, disk, dt);
        star.photoevap_mass_loss = mass_lost;
        star.cumulative_photoevap_mass_loss += mass_lost;

        if star.cumulative_photoevap_mass_loss >= star.initial_disk_mass
            || star.disk_mass < self.min_disk_mass
        {
            return PhotoevaporationOutcome::Dispersed { mass_lost };
        }

        match disk.evaporate(mass_lost) {
            Some(_) => {
                star.disk_radius = disk.radius();
                star.disk_mass = disk.disk_mass(star.disk_radius);
                star.refresh_total_mass();
                debug!(
                    star = %star.key,
                    g0 = star.g0,
                    lost_msun = mass_lost.to_solar_masses(),
                    radius_au = star.disk_radius.to_au(),
                    "photoevaporated"
                );
                PhotoevaporationOutcome::Evaporated { mass_lost }
            }
            None => PhotoevaporationOutcome::Dispersed { mass_lost },
        }
    }
}
