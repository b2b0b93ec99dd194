//! Project validation logic.
//!
//! Every problem is collected so a file can be fixed in one pass.

use std::collections::{HashMap, HashSet};

use tn_links::{Emissivities, LinkError, LinkParameters, resolve_modes};

use crate::LATEST_VERSION;
use crate::schema::{HeatStorageDef, InterfaceDef, Project};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unsupported version: {version} (latest is {latest})")]
    UnsupportedVersion { version: u32, latest: u32 },

    #[error("Duplicate {kind} name '{name}' in {context}")]
    DuplicateName {
        kind: &'static str,
        name: String,
        context: String,
    },

    #[error("Missing reference: link '{link}' targets unknown interface {node}.{interface}")]
    MissingReference {
        link: String,
        node: String,
        interface: String,
    },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: f64,
        reason: &'static str,
    },

    #[error("Link '{link}': {source}")]
    Link { link: String, source: LinkError },
}

/// All problems found in a project.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{} problem(s): {}", .problems.len(), join(.problems))]
pub struct ValidationErrors {
    pub problems: Vec<ValidationError>,
}

fn join(problems: &[ValidationError]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn validate_project(project: &Project) -> Result<(), ValidationErrors> {
    let problems = collect_problems(project);
    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { problems })
    }
}

/// Every problem in `project`, in file order.
pub fn collect_problems(project: &Project) -> Vec<ValidationError> {
    let mut problems = Vec::new();

    if project.version == 0 || project.version > LATEST_VERSION {
        problems.push(ValidationError::UnsupportedVersion {
            version: project.version,
            latest: LATEST_VERSION,
        });
    }

    let sim = &project.simulation;
    if !(sim.duration_s.is_finite() && sim.duration_s >= 0.0) {
        problems.push(invalid(
            "simulation.duration_s",
            sim.duration_s,
            "must be non-negative and finite",
        ));
    }
    if !(sim.timestep_s.is_finite() && sim.timestep_s > 0.0) {
        problems.push(invalid(
            "simulation.timestep_s",
            sim.timestep_s,
            "must be positive and finite",
        ));
    }

    // node -> interface -> emissivity, first declaration wins
    let mut surfaces: HashMap<&str, HashMap<&str, Option<f64>>> = HashMap::new();
    for node in &project.nodes {
        if surfaces.contains_key(node.name.as_str()) {
            problems.push(ValidationError::DuplicateName {
                kind: "heat storage node",
                name: node.name.clone(),
                context: "network".to_string(),
            });
            continue;
        }
        validate_node(node, &mut problems);
        let mut faces = HashMap::new();
        for ifn in &node.interfaces {
            if faces.contains_key(ifn.name.as_str()) {
                problems.push(ValidationError::DuplicateName {
                    kind: "interface",
                    name: ifn.name.clone(),
                    context: node.name.clone(),
                });
                continue;
            }
            validate_interface(&node.name, ifn, &mut problems);
            faces.insert(ifn.name.as_str(), ifn.emissivity);
        }
        surfaces.insert(node.name.as_str(), faces);
    }

    for node in &project.nodes {
        for ifn in &node.interfaces {
            let context = format!("{}.{}", node.name, ifn.name);
            let mut names = HashSet::new();
            for link in &ifn.links {
                let qualified = format!("{context}.{}", link.name);
                if !names.insert(link.name.as_str()) {
                    problems.push(ValidationError::DuplicateName {
                        kind: "link",
                        name: link.name.clone(),
                        context: context.clone(),
                    });
                    continue;
                }
                let target = surfaces
                    .get(link.target.node.as_str())
                    .and_then(|faces| faces.get(link.target.interface.as_str()));
                let Some(&target_emissivity) = target else {
                    problems.push(ValidationError::MissingReference {
                        link: qualified,
                        node: link.target.node.clone(),
                        interface: link.target.interface.clone(),
                    });
                    continue;
                };
                let emissivities = Emissivities {
                    source: ifn.emissivity,
                    target: target_emissivity,
                };
                let params = LinkParameters::from(&link.parameters);
                if let Err(source) = resolve_modes(&link.link_modes(), &params, emissivities) {
                    problems.push(ValidationError::Link {
                        link: qualified,
                        source,
                    });
                }
            }
        }
    }

    problems
}

fn validate_node(node: &HeatStorageDef, problems: &mut Vec<ValidationError>) {
    let field = |name: &str| format!("{}.{name}", node.name);
    if !(node.mass_kg.is_finite() && node.mass_kg > 0.0) {
        problems.push(invalid(field("mass_kg"), node.mass_kg, "must be positive"));
    }
    if !(node.heat_capacity_j_per_kg_k.is_finite() && node.heat_capacity_j_per_kg_k > 0.0) {
        problems.push(invalid(
            field("heat_capacity_j_per_kg_k"),
            node.heat_capacity_j_per_kg_k,
            "must be positive",
        ));
    }
    if !node.heat_generation_w.is_finite() {
        problems.push(invalid(
            field("heat_generation_w"),
            node.heat_generation_w,
            "must be finite",
        ));
    }
    if let Some(t) = node.temperature {
        let kelvin = t.kelvin();
        if !(kelvin.is_finite() && kelvin >= 0.0) {
            problems.push(invalid(
                field("temperature"),
                kelvin,
                "must be at or above absolute zero",
            ));
        }
    }
}

fn validate_interface(node: &str, ifn: &InterfaceDef, problems: &mut Vec<ValidationError>) {
    for (name, value) in [
        ("emissivity", ifn.emissivity),
        ("absorptivity", ifn.absorptivity),
    ] {
        if let Some(v) = value
            && !(0.0..=1.0).contains(&v)
        {
            problems.push(invalid(
                format!("{node}.{}.{name}", ifn.name),
                v,
                "must lie in [0, 1]",
            ));
        }
    }
}

fn invalid(field: impl Into<String>, value: f64, reason: &'static str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value,
        reason,
    }
}
