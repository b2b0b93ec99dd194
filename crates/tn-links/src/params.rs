//! Mode selectors and the raw parameter bag a link is declared with.

use std::fmt;
use tn_core::Real;

/// Transfer mode selected for a declared link.
///
/// `Ambient` and `VacuumChamber` are known boundary conditions that the engine
/// does not model; selecting them fails at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkMode {
    Radiation,
    Conduction,
    Contact,
    Ambient,
    VacuumChamber,
}

impl LinkMode {
    pub fn name(self) -> &'static str {
        match self {
            LinkMode::Radiation => "radiation",
            LinkMode::Conduction => "conduction",
            LinkMode::Contact => "contact",
            LinkMode::Ambient => "ambient",
            LinkMode::VacuumChamber => "vacuum_chamber",
        }
    }

    /// Parameter fields this mode reads from the bag.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            LinkMode::Radiation => &["radiation_area1", "radiation_area2", "view_factor"],
            LinkMode::Conduction => &["conduction_area", "conductivity", "length"],
            LinkMode::Contact => &["contact_area", "contact_resistance"],
            LinkMode::Ambient | LinkMode::VacuumChamber => &[],
        }
    }
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Union of every field any mode may need. Each mode extracts its own subset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkParameters {
    /// Radiating area of the source surface (m²)
    pub radiation_area1: Option<Real>,
    /// Radiating area of the target surface (m²)
    pub radiation_area2: Option<Real>,
    /// Fraction of radiation leaving the source that reaches the target
    pub view_factor: Option<Real>,
    /// Contact area (m²)
    pub contact_area: Option<Real>,
    /// Lumped contact resistance
    pub contact_resistance: Option<Real>,
    /// Conduction cross-section (m²)
    pub conduction_area: Option<Real>,
    /// Material conductivity (W/(m·K))
    pub conductivity: Option<Real>,
    /// Conduction path length (m)
    pub length: Option<Real>,
}

impl LinkParameters {
    pub(crate) fn get(&self, field: &str) -> Option<Real> {
        match field {
            "radiation_area1" => self.radiation_area1,
            "radiation_area2" => self.radiation_area2,
            "view_factor" => self.view_factor,
            "contact_area" => self.contact_area,
            "contact_resistance" => self.contact_resistance,
            "conduction_area" => self.conduction_area,
            "conductivity" => self.conductivity,
            "length" => self.length,
            _ => None,
        }
    }
}

/// Emissivities of the two interface nodes a link connects.
///
/// Radiation needs both; other modes ignore them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Emissivities {
    pub source: Option<Real>,
    pub target: Option<Real>,
}
