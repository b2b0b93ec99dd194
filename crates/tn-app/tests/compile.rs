//! Staged construction of networks from project definitions.

use tn_app::{compile_network, construct};
use tn_core::{Tolerances, nearly_equal};
use tn_project::schema::*;

fn node(name: &str, celsius: f64, interfaces: Vec<InterfaceDef>) -> HeatStorageDef {
    HeatStorageDef {
        name: name.to_string(),
        mass_kg: 0.5,
        heat_capacity_j_per_kg_k: 900.0,
        heat_generation_w: 0.0,
        temperature: Some(TemperatureDef::Celsius { celsius }),
        interfaces,
    }
}

fn face(name: &str, links: Vec<LinkDef>) -> InterfaceDef {
    InterfaceDef {
        name: name.to_string(),
        emissivity: Some(0.5),
        absorptivity: None,
        links,
    }
}

fn contact(name: &str, node: &str, interface: &str) -> LinkDef {
    LinkDef {
        name: name.to_string(),
        target: TargetDef {
            node: node.to_string(),
            interface: interface.to_string(),
        },
        modes: vec![LinkModeDef::Contact],
        parameters: LinkParametersDef {
            contact_area_m2: Some(0.01),
            contact_resistance: Some(0.1),
            ..Default::default()
        },
    }
}

#[test]
fn links_may_target_later_nodes() {
    let nodes = vec![
        node("First", 20.0, vec![face("f", vec![contact("ahead", "Second", "g")])]),
        node("Second", 30.0, vec![face("g", vec![])]),
    ];
    let network = compile_network(&nodes).unwrap();
    assert_eq!(network.nodes().len(), 2);
    assert_eq!(network.links().len(), 2);
    assert!(network.link_id("Second", "g", "First.f.ahead~inverse").is_some());
}

#[test]
fn celsius_becomes_kelvin() {
    let network = compile_network(&[node("Warm", 25.0, vec![])]).unwrap();
    let t = network.nodes()[0].temperature();
    assert!(nearly_equal(t, 298.15, Tolerances::default()));
}

#[test]
fn unresolved_target_is_a_configuration_error() {
    let nodes = vec![node("Only", 0.0, vec![face("f", vec![contact("lost", "Ghost", "f")])])];
    let err = compile_network(&nodes).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("Ghost"));
}

#[test]
fn duplicate_node_is_a_configuration_error() {
    let nodes = vec![node("Twin", 0.0, vec![]), node("Twin", 0.0, vec![])];
    assert!(compile_network(&nodes).unwrap_err().is_configuration());
}

#[test]
fn missing_parameters_are_listed_together() {
    let mut link = contact("bare", "B", "g");
    link.modes = vec![LinkModeDef::Conduction, LinkModeDef::Radiation];
    link.parameters = LinkParametersDef::default();
    let nodes = vec![
        node("A", 0.0, vec![face("f", vec![link])]),
        node("B", 0.0, vec![face("g", vec![])]),
    ];
    let message = compile_network(&nodes).unwrap_err().to_string();
    for field in ["conduction_area", "conductivity", "length", "view_factor"] {
        assert!(message.contains(field), "{message}");
    }
}

#[test]
fn zero_mass_is_not_a_configuration_error() {
    let mut lump = node("Lump", 0.0, vec![]);
    lump.mass_kg = 0.0;
    let err = compile_network(&[lump]).unwrap_err();
    assert!(!err.is_configuration());
}

#[test]
fn construct_uses_given_duration_and_timestep() {
    let nodes = vec![
        node("A", 50.0, vec![face("f", vec![contact("touch", "B", "g")])]),
        node("B", 10.0, vec![face("g", vec![])]),
    ];
    let mut engine = construct(10.0, 3.0, &nodes).unwrap();
    engine.simulate().unwrap();
    assert_eq!(engine.readings().times(), vec![3.0, 6.0, 9.0]);
    assert!(engine.temperature("A").unwrap() < 323.15);
    assert!(engine.temperature("B").unwrap() > 283.15);
}
