// tn-core/src/units.rs

use uom::si::f64::ThermodynamicTemperature as UomThermodynamicTemperature;

// Public canonical unit types (SI, f64)
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

/// Absolute temperature in kelvin, the only scale the engine computes in.
#[inline]
pub fn to_kelvin(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

#[inline]
pub fn to_celsius(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    t.get::<degree_celsius>()
}

pub mod constants {
    /// Stefan–Boltzmann constant, W·m⁻²·K⁻⁴ (CODATA 2018, exact).
    pub const STEFAN_BOLTZMANN: f64 = 5.670_374_419e-8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celsius_converts_to_kelvin() {
        let t = to_kelvin(celsius(22.0));
        assert!((t - 295.15).abs() < 1e-9);
        assert_eq!(to_kelvin(k(0.0)), 0.0);
    }

    #[test]
    fn kelvin_converts_to_celsius() {
        assert!((to_celsius(k(273.15))).abs() < 1e-9);
        assert!((to_celsius(celsius(-40.0)) + 40.0).abs() < 1e-9);
    }
}
