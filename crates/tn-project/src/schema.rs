//! Project schema definitions.

use serde::{Deserialize, Serialize};
use tn_links::{LinkMode, LinkParameters};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    pub simulation: SimulationDef,
    #[serde(default)]
    pub nodes: Vec<HeatStorageDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SimulationDef {
    pub duration_s: f64,
    pub timestep_s: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatStorageDef {
    pub name: String,
    #[serde(alias = "mass")]
    pub mass_kg: f64,
    #[serde(alias = "heatCapacity")]
    pub heat_capacity_j_per_kg_k: f64,
    #[serde(default, alias = "heatGeneration")]
    pub heat_generation_w: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<TemperatureDef>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceDef>,
}

/// Temperature as written in the file: `{ kelvin: 295.15 }`,
/// `{ celsius: 22.0 }`, or a bare number in kelvin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TemperatureDef {
    Kelvin { kelvin: f64 },
    Celsius { celsius: f64 },
    Absolute(f64),
}

impl TemperatureDef {
    pub fn kelvin(&self) -> f64 {
        match *self {
            TemperatureDef::Kelvin { kelvin } | TemperatureDef::Absolute(kelvin) => kelvin,
            TemperatureDef::Celsius { celsius } => tn_core::to_kelvin(tn_core::celsius(celsius)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterfaceDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emissivity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absorptivity: Option<f64>,
    #[serde(default)]
    pub links: Vec<LinkDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkDef {
    pub name: String,
    pub target: TargetDef,
    #[serde(default)]
    pub modes: Vec<LinkModeDef>,
    #[serde(default)]
    pub parameters: LinkParametersDef,
}

/// `(heat storage node, interface)` pair a link points at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetDef {
    pub node: String,
    pub interface: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LinkModeDef {
    Radiation,
    Conduction,
    Contact,
    Ambient,
    VacuumChamber,
}

impl From<LinkModeDef> for LinkMode {
    fn from(def: LinkModeDef) -> Self {
        match def {
            LinkModeDef::Radiation => LinkMode::Radiation,
            LinkModeDef::Conduction => LinkMode::Conduction,
            LinkModeDef::Contact => LinkMode::Contact,
            LinkModeDef::Ambient => LinkMode::Ambient,
            LinkModeDef::VacuumChamber => LinkMode::VacuumChamber,
        }
    }
}

/// Union of all link parameter keys. Unknown keys are ignored on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LinkParametersDef {
    #[serde(default, alias = "radiationArea1", skip_serializing_if = "Option::is_none")]
    pub radiation_area1_m2: Option<f64>,
    #[serde(default, alias = "radiationArea2", skip_serializing_if = "Option::is_none")]
    pub radiation_area2_m2: Option<f64>,
    #[serde(default, alias = "viewingFactor", skip_serializing_if = "Option::is_none")]
    pub view_factor: Option<f64>,
    #[serde(default, alias = "contactArea", skip_serializing_if = "Option::is_none")]
    pub contact_area_m2: Option<f64>,
    #[serde(default, alias = "resistance", skip_serializing_if = "Option::is_none")]
    pub contact_resistance: Option<f64>,
    #[serde(default, alias = "conductionArea", skip_serializing_if = "Option::is_none")]
    pub conduction_area_m2: Option<f64>,
    #[serde(default, alias = "conductivity", skip_serializing_if = "Option::is_none")]
    pub conductivity_w_per_m_k: Option<f64>,
    #[serde(default, alias = "length", skip_serializing_if = "Option::is_none")]
    pub length_m: Option<f64>,
}

impl From<&LinkParametersDef> for LinkParameters {
    fn from(def: &LinkParametersDef) -> Self {
        LinkParameters {
            radiation_area1: def.radiation_area1_m2,
            radiation_area2: def.radiation_area2_m2,
            view_factor: def.view_factor,
            contact_area: def.contact_area_m2,
            contact_resistance: def.contact_resistance,
            conduction_area: def.conduction_area_m2,
            conductivity: def.conductivity_w_per_m_k,
            length: def.length_m,
        }
    }
}

impl LinkDef {
    pub fn link_modes(&self) -> Vec<LinkMode> {
        self.modes.iter().copied().map(LinkMode::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celsius_is_converted() {
        let t = TemperatureDef::Celsius { celsius: 22.0 };
        assert!((t.kelvin() - 295.15).abs() < 1e-9);
        assert_eq!(TemperatureDef::Kelvin { kelvin: 10.0 }.kelvin(), 10.0);
        assert_eq!(TemperatureDef::Absolute(10.0).kelvin(), 10.0);
    }

    #[test]
    fn camel_case_parameter_keys_are_accepted() {
        let yaml = "{radiationArea1: 0.002, viewingFactor: 0.8, resistance: 0.05, \
                    conductionArea: 1.0e-5, length: 0.1, colour: blue}";
        let params: LinkParametersDef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(params.radiation_area1_m2, Some(0.002));
        assert_eq!(params.view_factor, Some(0.8));
        assert_eq!(params.contact_resistance, Some(0.05));
        assert_eq!(params.conduction_area_m2, Some(1.0e-5));
        assert_eq!(params.length_m, Some(0.1));
        assert_eq!(params.conductivity_w_per_m_k, None);
    }

    #[test]
    fn modes_are_snake_case() {
        let modes: Vec<LinkModeDef> =
            serde_yaml::from_str("[radiation, contact, vacuum_chamber]").unwrap();
        assert_eq!(
            modes,
            vec![
                LinkModeDef::Radiation,
                LinkModeDef::Contact,
                LinkModeDef::VacuumChamber
            ]
        );
    }

    #[test]
    fn temperature_map_and_bare_forms() {
        let t: TemperatureDef = serde_yaml::from_str("{celsius: -10.0}").unwrap();
        assert_eq!(t, TemperatureDef::Celsius { celsius: -10.0 });
        let t: TemperatureDef = serde_yaml::from_str("{ kelvin: 295.15 }").unwrap();
        assert_eq!(t, TemperatureDef::Kelvin { kelvin: 295.15 });
        let t: TemperatureDef = serde_yaml::from_str("celsius: 22").unwrap();
        assert_eq!(t, TemperatureDef::Celsius { celsius: 22.0 });
        let t: TemperatureDef = serde_json::from_str(r#"{"kelvin": 4.0}"#).unwrap();
        assert_eq!(t, TemperatureDef::Kelvin { kelvin: 4.0 });
        let t: TemperatureDef = serde_yaml::from_str("280.5").unwrap();
        assert_eq!(t, TemperatureDef::Absolute(280.5));
        assert!(serde_yaml::from_str::<TemperatureDef>("{fahrenheit: 70.0}").is_err());
    }

    #[test]
    fn node_temperature_in_flow_mapping() {
        let yaml = "name: panel\nmass_kg: 0.1\nheat_capacity_j_per_kg_k: 887.0\n\
                    temperature: { celsius: 22.0 }\n";
        let node: HeatStorageDef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(node.temperature, Some(TemperatureDef::Celsius { celsius: 22.0 }));
        let text = serde_yaml::to_string(&node).unwrap();
        let back: HeatStorageDef = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back, node);
    }
}
