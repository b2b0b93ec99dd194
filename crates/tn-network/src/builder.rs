//! Incremental network builder.

use std::collections::HashMap;

use tn_core::{HsnId, IfnId, LinkId, Real};
use tn_links::{Emissivities, LinkMode, LinkParameters, LinkPhysics, ManualRate, resolve_modes};
use tracing::{debug, info};

use crate::error::{NetworkError, NetworkResult};
use crate::network::{HeatStorageNode, InterfaceNode, Link, LinkKind, Network};
use crate::validate;

/// Parameters of a heat storage node.
///
/// Temperatures are absolute (K) throughout the network API, whether or
/// not the node takes part in radiation. Convert Celsius input with
/// `tn_core::to_kelvin` before building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatStorageParams {
    /// kg, > 0
    pub mass: Real,
    /// J/(kg·K), > 0
    pub heat_capacity: Real,
    /// W
    pub heat_generation: Real,
    /// Initial absolute temperature (K), >= 0
    pub temperature: Real,
}

impl HeatStorageParams {
    /// No generation, starting at 0 K.
    pub fn new(mass: Real, heat_capacity: Real) -> Self {
        Self {
            mass,
            heat_capacity,
            heat_generation: 0.0,
            temperature: 0.0,
        }
    }

    pub fn with_heat_generation(mut self, watts: Real) -> Self {
        self.heat_generation = watts;
        self
    }

    /// Initial temperature in kelvin. Negative values are rejected by
    /// [`NetworkBuilder::add_heat_storage`].
    pub fn with_temperature(mut self, kelvin: Real) -> Self {
        self.temperature = kelvin;
        self
    }
}

/// Optical properties of an interface node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InterfaceParams {
    pub emissivity: Option<Real>,
    pub absorptivity: Option<Real>,
}

/// Builder for constructing a network incrementally.
///
/// Every `add_*` call validates before it mutates, so a rejected call leaves
/// the builder unchanged. Call `build()` to freeze the result.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: Vec<HeatStorageNode>,
    interfaces: Vec<InterfaceNode>,
    links: Vec<Link>,
    node_index: HashMap<String, HsnId>,
}

impl NetworkBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a heat storage node. Names are global.
    pub fn add_heat_storage(
        &mut self,
        name: impl Into<String>,
        params: HeatStorageParams,
    ) -> NetworkResult<HsnId> {
        let name = name.into();
        if self.node_index.contains_key(&name) {
            return Err(NetworkError::DuplicateName {
                kind: "heat storage node",
                name,
                parent: "network".to_string(),
            });
        }

        let capacitance = params.mass * params.heat_capacity;
        if !(params.mass > 0.0 && params.heat_capacity > 0.0 && capacitance.is_finite()) {
            return Err(NetworkError::NonPositiveCapacitance {
                node: name,
                mass: params.mass,
                heat_capacity: params.heat_capacity,
            });
        }
        if !params.temperature.is_finite() || params.temperature < 0.0 {
            return Err(NetworkError::InvalidParameter {
                owner: name,
                field: "temperature",
                value: params.temperature,
                reason: "must be a finite absolute temperature (K)",
            });
        }
        if !params.heat_generation.is_finite() {
            return Err(NetworkError::InvalidParameter {
                owner: name,
                field: "heat_generation",
                value: params.heat_generation,
                reason: "must be finite",
            });
        }

        let id = HsnId::from_index(self.nodes.len());
        self.node_index.insert(name.clone(), id);
        self.nodes.push(HeatStorageNode {
            id,
            name,
            mass: params.mass,
            heat_capacity: params.heat_capacity,
            heat_generation: params.heat_generation,
            interfaces: Vec::new(),
            temperature: params.temperature,
        });
        Ok(id)
    }

    /// Attach an interface node. Names are scoped to the owning node.
    pub fn add_interface(
        &mut self,
        node: HsnId,
        name: impl Into<String>,
        params: InterfaceParams,
    ) -> NetworkResult<IfnId> {
        let name = name.into();
        let owner = self
            .nodes
            .get(node.index())
            .ok_or(NetworkError::IdNotFound { what: "HsnId" })?;
        if owner
            .interfaces
            .iter()
            .any(|id| self.interfaces[id.index()].name == name)
        {
            return Err(NetworkError::DuplicateName {
                kind: "interface node",
                name,
                parent: owner.name.clone(),
            });
        }
        for (field, value) in [
            ("emissivity", params.emissivity),
            ("absorptivity", params.absorptivity),
        ] {
            if let Some(v) = value
                && !(0.0..=1.0).contains(&v)
            {
                return Err(NetworkError::InvalidParameter {
                    owner: format!("{}.{}", owner.name, name),
                    field,
                    value: v,
                    reason: "must lie in [0, 1]",
                });
            }
        }

        let id = IfnId::from_index(self.interfaces.len());
        self.interfaces.push(InterfaceNode {
            id,
            name,
            owner: node,
            emissivity: params.emissivity,
            absorptivity: params.absorptivity,
            links: Vec::new(),
        });
        self.nodes[node.index()].interfaces.push(id);
        Ok(id)
    }

    /// Declare a link `source -> target` and generate its inverse on `target`.
    ///
    /// The inverse is named `"<node>.<interface>.<link>~inverse"` after the
    /// declared link and evaluates to the negated live rate of the declared link.
    pub fn add_link(
        &mut self,
        source: IfnId,
        name: impl Into<String>,
        target: IfnId,
        modes: &[LinkMode],
        parameters: LinkParameters,
    ) -> NetworkResult<LinkId> {
        let name = name.into();
        let src = self
            .interfaces
            .get(source.index())
            .ok_or(NetworkError::IdNotFound { what: "IfnId" })?;
        let dst = self
            .interfaces
            .get(target.index())
            .ok_or(NetworkError::IdNotFound { what: "IfnId" })?;
        let src_node = &self.nodes[src.owner.index()].name;
        let dst_node = &self.nodes[dst.owner.index()].name;
        let qualified = format!("{}.{}.{}", src_node, src.name, name);
        let inverse_name = format!("{qualified}~inverse");

        if self.has_link_named(source, &name) {
            return Err(NetworkError::DuplicateName {
                kind: "link",
                name,
                parent: format!("{}.{}", src_node, src.name),
            });
        }
        // A self-link puts both names on the same interface; they differ by suffix.
        if self.has_link_named(target, &inverse_name) {
            return Err(NetworkError::DuplicateName {
                kind: "link",
                name: inverse_name,
                parent: format!("{}.{}", dst_node, dst.name),
            });
        }

        let emissivities = Emissivities {
            source: src.emissivity,
            target: dst.emissivity,
        };
        let physics = resolve_modes(modes, &parameters, emissivities).map_err(|source| {
            NetworkError::Link {
                link: qualified.clone(),
                source,
            }
        })?;

        let forward = LinkId::from_index(self.links.len());
        let inverse = LinkId::from_index(self.links.len() + 1);
        self.links.push(Link {
            id: forward,
            name,
            source,
            target,
            kind: LinkKind::Declared { inverse },
            physics,
            parameters,
        });
        self.links.push(Link {
            id: inverse,
            name: inverse_name,
            source: target,
            target: source,
            kind: LinkKind::Inverse { forward },
            physics: vec![LinkPhysics::Manual(ManualRate::InverseOf(forward))],
            parameters: LinkParameters::default(),
        });
        self.interfaces[source.index()].links.push(forward);
        self.interfaces[target.index()].links.push(inverse);
        debug!(link = %qualified, ?forward, ?inverse, "declared link with generated inverse");
        Ok(forward)
    }

    /// Look up a declared heat storage node by name.
    pub fn heat_storage_id(&self, name: &str) -> Option<HsnId> {
        self.node_index.get(name).copied()
    }

    /// Resolve a `(node, interface)` pair, failing with a configuration error.
    pub fn resolve_interface(&self, node: &str, interface: &str) -> NetworkResult<IfnId> {
        let hsn = self
            .heat_storage_id(node)
            .ok_or_else(|| NetworkError::UnknownHeatStorage {
                name: node.to_string(),
            })?;
        self.nodes[hsn.index()]
            .interfaces
            .iter()
            .copied()
            .find(|id| self.interfaces[id.index()].name == interface)
            .ok_or_else(|| NetworkError::UnknownInterface {
                node: node.to_string(),
                interface: interface.to_string(),
            })
    }

    /// Validate and freeze the network.
    pub fn build(self) -> NetworkResult<Network> {
        validate::validate_structure(&self.nodes, &self.interfaces, &self.links)?;
        info!(
            nodes = self.nodes.len(),
            interfaces = self.interfaces.len(),
            links = self.links.len(),
            "thermal network built"
        );
        Ok(Network {
            nodes: self.nodes,
            interfaces: self.interfaces,
            links: self.links,
            node_index: self.node_index,
        })
    }

    fn has_link_named(&self, ifn: IfnId, name: &str) -> bool {
        self.interfaces[ifn.index()]
            .links
            .iter()
            .any(|id| self.links[id.index()].name == name)
    }
}
