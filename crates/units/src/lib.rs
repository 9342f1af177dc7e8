pub mod length;
pub mod mass;
pub mod mass_rate;
pub mod surface_density;
pub mod temperature;
pub mod time;


pub use length::Length;
pub use mass::{Mass, EARTH_MASS_G, JUPITER_MASS_G, SOLAR_MASS_G};
pub use mass_rate::MassRate;
pub use surface_density::SurfaceDensity;
pub use temperature::Temperature;
pub use time::Time;
