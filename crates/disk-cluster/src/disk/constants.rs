/// Gravitational constant (cm³/(g·s²))
pub const G: f64 = 6.674e-8;

/// Boltzmann constant (erg/K)
pub const K_B: f64 = 1.380649e-16;

/// Hydrogen atom mass (g)
pub const M_H: f64 = 1.6735e-24;

/// Mean molecular weight of the disk gas
pub const MU: f64 = 2.33;

/// Pi
pub const PI: f64 = std::f64::consts::PI;
