//! Per-mode heat-exchange formulas and the resolved `LinkPhysics` sum type.
//!
//! Sign convention: every rate is the heat flowing INTO the source endpoint
//! (node 1). With `T1 > T2` conduction, contact and radiation all return a
//! negative rate. The inverse link therefore only has to negate.

use tn_core::{LinkId, Real, constants::STEFAN_BOLTZMANN};

use crate::error::{LinkError, LinkResult};
use crate::params::{Emissivities, LinkMode, LinkParameters};

/// Grey-body radiation between two surfaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiationParams {
    pub emissivity1: Real,
    pub emissivity2: Real,
    pub area1: Real,
    pub area2: Real,
    pub view_factor: Real,
}

impl RadiationParams {
    /// Radiative exchange factor in W/K⁴:
    /// `F_r = σ / [(1-e1)/(e1·A1) + 1/(A1·F) + (1-e2)/(e2·A2)]`
    ///
    /// A zero emissivity, area or view factor is a division by zero.
    pub fn exchange_factor(&self) -> LinkResult<Real> {
        let surface1 = (1.0 - self.emissivity1)
            / usable_divisor(self.emissivity1 * self.area1, "emissivity1 * radiation_area1")?;
        let space = 1.0 / usable_divisor(self.area1 * self.view_factor, "radiation_area1 * view_factor")?;
        let surface2 = (1.0 - self.emissivity2)
            / usable_divisor(self.emissivity2 * self.area2, "emissivity2 * radiation_area2")?;
        let total = usable_divisor(surface1 + space + surface2, "radiative resistance")?;
        Ok(STEFAN_BOLTZMANN / total)
    }
}

/// One-dimensional conduction through a solid path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConductionParams {
    pub area: Real,
    pub conductivity: Real,
    pub length: Real,
}

impl ConductionParams {
    /// `R = L / (k·A)`
    pub fn resistance(&self) -> Real {
        self.length / (self.conductivity * self.area)
    }
}

/// Contact between two touching surfaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactParams {
    pub area: Real,
    pub resistance: Real,
}

/// Source of a manual rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualRate {
    /// Negated aggregate of another link, looked up at every evaluation.
    InverseOf(LinkId),
}

/// Resolves the live aggregate exchange of another link.
///
/// Manual rates go through this seam so a link never captures its
/// counterpart's value at construction time.
pub trait LinkEvaluator {
    fn heat_exchange(&self, link: LinkId) -> LinkResult<Real>;
}

impl<F> LinkEvaluator for F
where
    F: Fn(LinkId) -> LinkResult<Real>,
{
    fn heat_exchange(&self, link: LinkId) -> LinkResult<Real> {
        self(link)
    }
}

/// Evaluator for contexts without manual links.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoManualLinks;

impl LinkEvaluator for NoManualLinks {
    fn heat_exchange(&self, link: LinkId) -> LinkResult<Real> {
        Err(LinkError::UnknownLink { link })
    }
}

/// One resolved transfer mode, carrying only the fields it uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkPhysics {
    Radiation(RadiationParams),
    Conduction(ConductionParams),
    Contact(ContactParams),
    Manual(ManualRate),
}

impl LinkPhysics {
    pub fn mode_name(&self) -> &'static str {
        match self {
            LinkPhysics::Radiation(_) => "radiation",
            LinkPhysics::Conduction(_) => "conduction",
            LinkPhysics::Contact(_) => "contact",
            LinkPhysics::Manual(_) => "manual",
        }
    }

    /// Instantaneous heat flow into node 1 (W).
    ///
    /// Radiation requires absolute temperatures (K).
    pub fn heat_exchange_rate(
        &self,
        t1: Real,
        t2: Real,
        links: &dyn LinkEvaluator,
    ) -> LinkResult<Real> {
        let rate = match self {
            LinkPhysics::Radiation(p) => radiation_rate(t1, t2, p)?,
            LinkPhysics::Conduction(p) => conduction_rate(t1, t2, p)?,
            LinkPhysics::Contact(p) => contact_rate(t1, t2, p)?,
            LinkPhysics::Manual(ManualRate::InverseOf(forward)) => -links.heat_exchange(*forward)?,
        };
        if !rate.is_finite() {
            return Err(LinkError::NonFinite {
                mode: self.mode_name(),
                value: rate,
            });
        }
        Ok(rate)
    }
}

fn usable_divisor(value: Real, what: &'static str) -> LinkResult<Real> {
    if value.is_finite() && value != 0.0 {
        Ok(value)
    } else {
        Err(LinkError::DivisionByZero { what, value })
    }
}

/// `rate = -F_r · (T1⁴ - T2⁴)`, see [`RadiationParams::exchange_factor`]
pub fn radiation_rate(t1: Real, t2: Real, params: &RadiationParams) -> LinkResult<Real> {
    let factor = params.exchange_factor()?;
    Ok(-factor * (t1.powi(4) - t2.powi(4)))
}

/// `rate = -(T1 - T2) / R`, `R = L / (k·A)`
pub fn conduction_rate(t1: Real, t2: Real, params: &ConductionParams) -> LinkResult<Real> {
    let r = usable_divisor(params.resistance(), "conductive resistance")?;
    Ok(-(t1 - t2) / r)
}

/// `rate = -(T1 - T2) · A / R_contact`
pub fn contact_rate(t1: Real, t2: Real, params: &ContactParams) -> LinkResult<Real> {
    let r = usable_divisor(params.resistance, "contact resistance")?;
    Ok(-(t1 - t2) * params.area / r)
}

/// Resolve declared mode selectors into typed physics.
///
/// All selected modes are checked before anything is returned, so one error
/// lists every missing field of the link.
pub fn resolve_modes(
    modes: &[LinkMode],
    params: &LinkParameters,
    emissivities: Emissivities,
) -> LinkResult<Vec<LinkPhysics>> {
    if modes.is_empty() {
        return Err(LinkError::EmptyModes);
    }
    if let Some(mode) = modes
        .iter()
        .find(|m| matches!(m, LinkMode::Ambient | LinkMode::VacuumChamber))
    {
        return Err(LinkError::Unsupported { mode: mode.name() });
    }

    let mut missing: Vec<&'static str> = Vec::new();
    for mode in modes {
        for field in mode.required_fields() {
            if params.get(field).is_none() && !missing.contains(field) {
                missing.push(field);
            }
        }
        if *mode == LinkMode::Radiation {
            if emissivities.source.is_none() && !missing.contains(&"emissivity1") {
                missing.push("emissivity1");
            }
            if emissivities.target.is_none() && !missing.contains(&"emissivity2") {
                missing.push("emissivity2");
            }
        }
    }
    if !missing.is_empty() {
        return Err(LinkError::MissingParameters { fields: missing });
    }

    modes
        .iter()
        .map(|mode| resolve_one(*mode, params, emissivities))
        .collect()
}

fn resolve_one(
    mode: LinkMode,
    params: &LinkParameters,
    emissivities: Emissivities,
) -> LinkResult<LinkPhysics> {
    let field = |name: &'static str| -> LinkResult<Real> {
        let value = params
            .get(name)
            .ok_or(LinkError::MissingParameters { fields: vec![name] })?;
        non_negative(name, value)
    };

    match mode {
        LinkMode::Radiation => {
            let emissivity1 = emissivity("emissivity1", emissivities.source)?;
            let emissivity2 = emissivity("emissivity2", emissivities.target)?;
            Ok(LinkPhysics::Radiation(RadiationParams {
                emissivity1,
                emissivity2,
                area1: field("radiation_area1")?,
                area2: field("radiation_area2")?,
                view_factor: field("view_factor")?,
            }))
        }
        LinkMode::Conduction => Ok(LinkPhysics::Conduction(ConductionParams {
            area: field("conduction_area")?,
            conductivity: field("conductivity")?,
            length: field("length")?,
        })),
        LinkMode::Contact => Ok(LinkPhysics::Contact(ContactParams {
            area: field("contact_area")?,
            resistance: field("contact_resistance")?,
        })),
        LinkMode::Ambient | LinkMode::VacuumChamber => {
            Err(LinkError::Unsupported { mode: mode.name() })
        }
    }
}

fn non_negative(field: &'static str, value: Real) -> LinkResult<Real> {
    if !value.is_finite() {
        return Err(LinkError::InvalidParameter {
            field,
            value,
            reason: "must be finite",
        });
    }
    if value < 0.0 {
        return Err(LinkError::InvalidParameter {
            field,
            value,
            reason: "must not be negative",
        });
    }
    Ok(value)
}

fn emissivity(field: &'static str, value: Option<Real>) -> LinkResult<Real> {
    let value = value.ok_or(LinkError::MissingParameters {
        fields: vec![field],
    })?;
    if !(0.0..=1.0).contains(&value) {
        return Err(LinkError::InvalidParameter {
            field,
            value,
            reason: "must lie in [0, 1]",
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn conduction_bag() -> LinkParameters {
        LinkParameters {
            conduction_area: Some(1.0),
            conductivity: Some(1.0),
            length: Some(1.0),
            ..Default::default()
        }
    }

    fn radiation() -> RadiationParams {
        RadiationParams {
            emissivity1: 0.8,
            emissivity2: 0.6,
            area1: 0.002,
            area2: 0.003,
            view_factor: 0.8,
        }
    }

    #[test]
    fn conduction_unit_resistance() {
        let p = ConductionParams {
            area: 1.0,
            conductivity: 1.0,
            length: 1.0,
        };
        assert_eq!(p.resistance(), 1.0);
        assert_eq!(conduction_rate(100.0, 0.0, &p).unwrap(), -100.0);
        assert_eq!(conduction_rate(0.0, 100.0, &p).unwrap(), 100.0);
    }

    #[test]
    fn contact_scales_with_area() {
        let p = ContactParams {
            area: 0.003,
            resistance: 0.05,
        };
        let q = contact_rate(300.0, 290.0, &p).unwrap();
        assert!((q - (-10.0 * 0.003 / 0.05)).abs() < 1e-12);
    }

    #[test]
    fn radiation_matches_formula() {
        let p = radiation();
        let sum = (1.0 - 0.8) / (0.8 * 0.002) + 1.0 / (0.002 * 0.8) + (1.0 - 0.6) / (0.6 * 0.003);
        let factor = STEFAN_BOLTZMANN / sum;
        let expected = -factor * (300.0_f64.powi(4) - 250.0_f64.powi(4));
        let q = radiation_rate(300.0, 250.0, &p).unwrap();
        assert!((q - expected).abs() <= 1e-9 * expected.abs());
    }

    #[test]
    fn radiation_between_low_emissivity_plates_is_sub_milliwatt() {
        // Two 0.002 m² gold-coated faces one kelvin apart.
        let p = RadiationParams {
            emissivity1: 0.045,
            emissivity2: 0.045,
            area1: 0.002,
            area2: 0.002,
            view_factor: 0.8,
        };
        let factor = p.exchange_factor().unwrap();
        assert!(factor > 0.0 && factor < 1e-12);
        let q = radiation_rate(296.15, 295.15, &p).unwrap();
        assert!((q - (-2.6829365e-4)).abs() < 1e-9, "rate {q}");
        let back = radiation_rate(295.15, 296.15, &p).unwrap();
        assert!((q + back).abs() < 1e-15);
    }

    #[test]
    fn zero_contact_resistance_fails_on_evaluation() {
        let p = ContactParams {
            area: 1.0,
            resistance: 0.0,
        };
        let err = contact_rate(1.0, 2.0, &p).unwrap_err();
        assert!(matches!(err, LinkError::DivisionByZero { .. }));
        assert!(!err.is_configuration());
    }

    #[test]
    fn zero_length_fails_on_evaluation() {
        let p = ConductionParams {
            area: 1.0,
            conductivity: 1.0,
            length: 0.0,
        };
        assert!(matches!(
            conduction_rate(1.0, 2.0, &p),
            Err(LinkError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn zero_view_factor_fails_on_evaluation() {
        let p = RadiationParams {
            view_factor: 0.0,
            ..radiation()
        };
        assert!(matches!(
            radiation_rate(300.0, 200.0, &p),
            Err(LinkError::DivisionByZero { .. })
        ));
        let p = RadiationParams {
            emissivity2: 0.0,
            ..radiation()
        };
        assert!(matches!(
            p.exchange_factor(),
            Err(LinkError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn resolve_reports_all_missing_fields_at_once() {
        let params = LinkParameters {
            contact_area: Some(1.0),
            ..Default::default()
        };
        let err = resolve_modes(
            &[LinkMode::Radiation, LinkMode::Contact],
            &params,
            Emissivities {
                source: Some(0.5),
                target: None,
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            LinkError::MissingParameters {
                fields: vec![
                    "radiation_area1",
                    "radiation_area2",
                    "view_factor",
                    "emissivity2",
                    "contact_resistance",
                ]
            }
        );
    }

    #[test]
    fn resolve_keeps_mode_order() {
        let params = LinkParameters {
            contact_area: Some(2.0),
            contact_resistance: Some(0.5),
            ..conduction_bag()
        };
        let physics = resolve_modes(
            &[LinkMode::Contact, LinkMode::Conduction],
            &params,
            Emissivities::default(),
        )
        .unwrap();
        assert_eq!(physics.len(), 2);
        assert_eq!(physics[0].mode_name(), "contact");
        assert_eq!(physics[1].mode_name(), "conduction");
    }

    #[test]
    fn resolve_rejects_empty_and_unsupported() {
        assert_eq!(
            resolve_modes(&[], &conduction_bag(), Emissivities::default()),
            Err(LinkError::EmptyModes)
        );
        assert_eq!(
            resolve_modes(
                &[LinkMode::Conduction, LinkMode::Ambient],
                &conduction_bag(),
                Emissivities::default()
            ),
            Err(LinkError::Unsupported { mode: "ambient" })
        );
        assert_eq!(
            resolve_modes(
                &[LinkMode::VacuumChamber],
                &conduction_bag(),
                Emissivities::default()
            ),
            Err(LinkError::Unsupported {
                mode: "vacuum_chamber"
            })
        );
    }

    #[test]
    fn resolve_rejects_bad_values() {
        let params = LinkParameters {
            length: Some(Real::NAN),
            ..conduction_bag()
        };
        assert!(matches!(
            resolve_modes(&[LinkMode::Conduction], &params, Emissivities::default()),
            Err(LinkError::InvalidParameter { field: "length", .. })
        ));

        let params = LinkParameters {
            radiation_area1: Some(1.0),
            radiation_area2: Some(1.0),
            view_factor: Some(1.0),
            ..Default::default()
        };
        let err = resolve_modes(
            &[LinkMode::Radiation],
            &params,
            Emissivities {
                source: Some(1.5),
                target: Some(0.5),
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LinkError::InvalidParameter {
                field: "emissivity1",
                ..
            }
        ));
    }

    #[test]
    fn manual_rate_negates_live_value() {
        let forward = LinkId::from_index(7);
        let manual = LinkPhysics::Manual(ManualRate::InverseOf(forward));
        let lookup = |id: LinkId| -> LinkResult<Real> {
            assert_eq!(id, forward);
            Ok(12.5)
        };
        assert_eq!(manual.heat_exchange_rate(0.0, 0.0, &lookup).unwrap(), -12.5);
        assert!(matches!(
            manual.heat_exchange_rate(0.0, 0.0, &NoManualLinks),
            Err(LinkError::UnknownLink { .. })
        ));
    }

    proptest! {
        #[test]
        fn equal_temperatures_exchange_nothing(
            t in 0.0f64..2000.0,
            area in 1e-6f64..10.0,
            k in 1e-3f64..500.0,
            len in 1e-4f64..2.0,
            res in 1e-4f64..10.0,
        ) {
            let cond = ConductionParams { area, conductivity: k, length: len };
            let cont = ContactParams { area, resistance: res };
            prop_assert_eq!(conduction_rate(t, t, &cond).unwrap(), 0.0);
            prop_assert_eq!(contact_rate(t, t, &cont).unwrap(), 0.0);
        }

        #[test]
        fn radiation_flows_from_hot_to_cold(
            t_cold in 1.0f64..500.0,
            dt in 0.1f64..500.0,
            e1 in 0.01f64..1.0,
            e2 in 0.01f64..1.0,
            f in 0.01f64..1.0,
        ) {
            let p = RadiationParams { emissivity1: e1, emissivity2: e2, area1: 0.01, area2: 0.02, view_factor: f };
            let t_hot = t_cold + dt;
            // Heat leaves the hot source...
            prop_assert!(radiation_rate(t_hot, t_cold, &p).unwrap() < 0.0);
            // ...and enters the cold source.
            prop_assert!(radiation_rate(t_cold, t_hot, &p).unwrap() > 0.0);
        }
    }
}
