//! Physical quantities read off a disk grid, and the two operations that
//! remove material from it.
//!
//! A grid whose innermost cell is already below the density floor is a
//! degenerate, zero-size disk: its radius is the innermost cell radius and its
//! mean density is zero.

use units::{Length, Mass, SurfaceDensity};

use super::grid::DiskGrid;

impl DiskGrid {
    /// Index of the outermost cell before the column density first drops
    /// below `density_floor`.
    pub fn edge_index(&self, density_floor: SurfaceDensity) -> usize {
        let floor = density_floor.to_grams_per_cm2();
        match self.sigma.iter().position(|&s| s < floor) {
            Some(0) => 0,
            Some(i) => i - 1,
            None => self.sigma.len() - 1,
        }
    }

    /// Radius of the last cell whose column density is at least `density_floor`.
    pub fn disk_radius(&self, density_floor: SurfaceDensity) -> Length {
        Length::from_au(self.radius_au[self.edge_index(density_floor)])
    }

    /// Disk radius at the grid's own edge density.
    pub fn radius(&self) -> Length {
        self.disk_radius(self.edge_density())
    }

    /// Mass in every cell with radius ≤ `radius`.
    pub fn disk_mass(&self, radius: Length) -> Mass {
        let limit = radius.to_au();
        let grams = self
            .radius_au
            .iter()
            .zip(self.sigma.iter().zip(&self.area))
            .take_while(|(r, _)| **r <= limit)
            .map(|(_, (s, a))| s * a)
            .sum();
        Mass::from_grams(grams)
    }

    /// Mass inside the grid's own disk radius.
    pub fn mass(&self) -> Mass {
        self.disk_mass(self.radius())
    }

    /// Mean column density of the cells inside the disk edge, the edge cell
    /// itself excluded.
    pub fn mean_density(&self, density_floor: SurfaceDensity) -> SurfaceDensity {
        let edge = self.edge_index(density_floor);
        if edge == 0 {
            return SurfaceDensity::zero();
        }
        let mean = self.sigma[..edge].iter().sum::<f64>() / edge as f64;
        SurfaceDensity::from_grams_per_cm2(mean)
    }

    /// Set every cell outside `new_radius` to `density_floor`.
    pub fn truncate(&mut self, new_radius: Length, density_floor: SurfaceDensity) {
        let limit = new_radius.to_au();
        let floor = density_floor.to_grams_per_cm2();
        for (sigma, r) in self.sigma.iter_mut().zip(&self.radius_au) {
            if *r > limit {
                *sigma = floor;
            }
        }
    }

    /// Remove `mass_to_remove` from the outside in.
    ///
    /// Cells are swept from the disk edge inward until the swept mass reaches
    /// the target; the disk is then truncated at the radius of that cell and
    /// the new radius returned. Returns `None`, leaving the grid untouched,
    /// when the whole disk holds less than the target.
    pub fn evaporate(&mut self, mass_to_remove: Mass) -> Option<Length> {
        let target = mass_to_remove.to_grams();
        let edge = self.edge_index(self.edge_density());

        let mut swept = 0.0;
        for i in (0..=edge).rev() {
            swept += self.sigma[i] * self.area[i];
            if swept >= target {
                let radius = Length::from_au(self.radius_au[i]);
                let floor = SurfaceDensity::from_grams_per_cm2(self.floors.truncation);
                self.truncate(radius, floor);
                return Some(radius);
            }
        }

        None
    }

    /// Column density that marks this disk's edge.
    pub fn edge_density(&self) -> SurfaceDensity {
        SurfaceDensity::from_grams_per_cm2(self.floors.edge)
    }
}
