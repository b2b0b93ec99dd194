//! Compile project definitions into a runnable [`ThermalNetwork`].
//!
//! Construction is staged: every heat storage node, then every interface,
//! then every link. A link may therefore target a node declared after its own.

use tn_links::LinkParameters;
use tn_network::{HeatStorageParams, InterfaceParams, Network, NetworkBuilder, NetworkResult};
use tn_project::schema::{HeatStorageDef, Project};
use tn_sim::{SimOptions, ThermalNetwork};

use crate::error::AppResult;

/// Build an engine for `nodes` that runs `duration_s` in steps of `timestep_s`.
pub fn construct(
    duration_s: f64,
    timestep_s: f64,
    nodes: &[HeatStorageDef],
) -> AppResult<ThermalNetwork> {
    let network = compile_network(nodes)?;
    Ok(ThermalNetwork::new(
        network,
        SimOptions::new(duration_s, timestep_s),
    )?)
}

/// [`construct`] with the project's own simulation settings.
pub fn compile_project(project: &Project, parallel: bool) -> AppResult<ThermalNetwork> {
    let network = compile_network(&project.nodes)?;
    let options = SimOptions {
        dt: project.simulation.timestep_s,
        t_end: project.simulation.duration_s,
        parallel,
    };
    Ok(ThermalNetwork::new(network, options)?)
}

pub fn compile_network(nodes: &[HeatStorageDef]) -> AppResult<Network> {
    let mut builder = NetworkBuilder::new();

    let mut hsn_ids = Vec::with_capacity(nodes.len());
    for def in nodes {
        let mut params = HeatStorageParams::new(def.mass_kg, def.heat_capacity_j_per_kg_k)
            .with_heat_generation(def.heat_generation_w);
        if let Some(t) = def.temperature {
            params = params.with_temperature(t.kelvin());
        }
        hsn_ids.push(builder.add_heat_storage(&def.name, params)?);
    }

    let mut ifn_ids = Vec::with_capacity(nodes.len());
    for (def, &hsn) in nodes.iter().zip(&hsn_ids) {
        let ids = def
            .interfaces
            .iter()
            .map(|ifn| {
                let params = InterfaceParams {
                    emissivity: ifn.emissivity,
                    absorptivity: ifn.absorptivity,
                };
                builder.add_interface(hsn, &ifn.name, params)
            })
            .collect::<NetworkResult<Vec<_>>>()?;
        ifn_ids.push(ids);
    }

    for (def, ids) in nodes.iter().zip(&ifn_ids) {
        for (ifn, &source) in def.interfaces.iter().zip(ids) {
            for link in &ifn.links {
                let target = builder.resolve_interface(&link.target.node, &link.target.interface)?;
                builder.add_link(
                    source,
                    &link.name,
                    target,
                    &link.link_modes(),
                    LinkParameters::from(&link.parameters),
                )?;
            }
        }
    }

    Ok(builder.build()?)
}
