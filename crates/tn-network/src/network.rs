//! Core network data structures and snapshot evaluation.

use std::collections::HashMap;

use rayon::prelude::*;
use tn_core::{HsnId, IfnId, LinkId, Real};
use tn_links::{LinkError, LinkEvaluator, LinkParameters, LinkPhysics, LinkResult};

use crate::error::{NetworkError, NetworkResult};

/// A lumped thermal mass.
///
/// The temperature is only ever written by the network's commit step.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatStorageNode {
    pub id: HsnId,
    pub name: String,
    /// kg
    pub mass: Real,
    /// J/(kg·K)
    pub heat_capacity: Real,
    /// Internal generation (W)
    pub heat_generation: Real,
    /// Attached interfaces in creation order.
    pub interfaces: Vec<IfnId>,
    pub(crate) temperature: Real,
}

impl HeatStorageNode {
    /// Last committed temperature (K).
    pub fn temperature(&self) -> Real {
        self.temperature
    }

    /// `mass · heat_capacity` (J/K)
    pub fn capacitance(&self) -> Real {
        self.mass * self.heat_capacity
    }

    /// Forward-Euler increment `ΔT = P·Δt / (m·c)`.
    pub fn temperature_increment(&self, net_power: Real, dt: Real) -> Real {
        net_power * dt / (self.mass * self.heat_capacity)
    }
}

/// A massless contact surface of a heat storage node.
///
/// Its temperature is its owner's temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceNode {
    pub id: IfnId,
    pub name: String,
    pub owner: HsnId,
    pub emissivity: Option<Real>,
    /// Reserved for environment links; not read by the engine.
    pub absorptivity: Option<Real>,
    /// Outgoing links in creation order (declared and generated).
    pub links: Vec<LinkId>,
}

/// How a link came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Declared in the model description; `inverse` is its generated mirror.
    Declared { inverse: LinkId },
    /// Generated mirror of a declared link.
    Inverse { forward: LinkId },
}

/// A directed coupling `source -> target`. Its rate is heat flowing into `source`.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: LinkId,
    pub name: String,
    pub source: IfnId,
    pub target: IfnId,
    pub kind: LinkKind,
    /// Resolved modes, never empty.
    pub physics: Vec<LinkPhysics>,
    /// Raw parameters as declared (empty for inverse links).
    pub parameters: LinkParameters,
}

/// The validated, immutable-topology network.
///
/// Nodes, interfaces and links live in vectors indexed by their IDs; creation
/// order is iteration order everywhere.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) nodes: Vec<HeatStorageNode>,
    pub(crate) interfaces: Vec<InterfaceNode>,
    pub(crate) links: Vec<Link>,
    pub(crate) node_index: HashMap<String, HsnId>,
}

/// Resolves manual rates against one frozen snapshot.
struct SnapshotEvaluator<'a> {
    network: &'a Network,
    temps: &'a [Real],
}

impl LinkEvaluator for SnapshotEvaluator<'_> {
    fn heat_exchange(&self, link: LinkId) -> LinkResult<Real> {
        let link = self
            .network
            .links
            .get(link.index())
            .ok_or(LinkError::UnknownLink { link })?;
        // Inverse links only reference declared links, so this never nests
        // more than one level.
        self.network.sum_link(link, self.temps)
    }
}

impl Network {
    /// All heat storage nodes, in creation order.
    pub fn nodes(&self) -> &[HeatStorageNode] {
        &self.nodes
    }

    /// All interface nodes, in creation order.
    pub fn interfaces(&self) -> &[InterfaceNode] {
        &self.interfaces
    }

    /// All links, in creation order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node(&self, id: HsnId) -> Option<&HeatStorageNode> {
        self.nodes.get(id.index())
    }

    pub fn interface(&self, id: IfnId) -> Option<&InterfaceNode> {
        self.interfaces.get(id.index())
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id.index())
    }

    /// Look up a heat storage node by its global name.
    pub fn node_id(&self, name: &str) -> Option<HsnId> {
        self.node_index.get(name).copied()
    }

    /// Look up an interface by `(node name, interface name)`.
    pub fn interface_id(&self, node: &str, interface: &str) -> Option<IfnId> {
        let node = self.node(self.node_id(node)?)?;
        node.interfaces
            .iter()
            .copied()
            .find(|id| self.interfaces[id.index()].name == interface)
    }

    /// Look up an outgoing link of an interface by name.
    pub fn link_id(&self, node: &str, interface: &str, link: &str) -> Option<LinkId> {
        let ifn = self.interface(self.interface_id(node, interface)?)?;
        ifn.links
            .iter()
            .copied()
            .find(|id| self.links[id.index()].name == link)
    }

    /// The generated mirror of a declared link, or the declared link an inverse mirrors.
    pub fn counterpart(&self, id: LinkId) -> Option<LinkId> {
        match self.link(id)?.kind {
            LinkKind::Declared { inverse } => Some(inverse),
            LinkKind::Inverse { forward } => Some(forward),
        }
    }

    /// Heat storage node owning an interface.
    pub fn owner(&self, id: IfnId) -> Option<&HeatStorageNode> {
        self.node(self.interface(id)?.owner)
    }

    /// `node.interface.link` label used in messages and inverse link names.
    pub fn qualified_link_name(&self, id: LinkId) -> String {
        match self.link(id) {
            Some(link) => {
                let ifn = &self.interfaces[link.source.index()];
                let node = &self.nodes[ifn.owner.index()];
                format!("{}.{}.{}", node.name, ifn.name, link.name)
            }
            None => format!("<link {id}>"),
        }
    }

    /// Snapshot of the committed temperatures, indexed by `HsnId`.
    pub fn temperatures(&self) -> Vec<Real> {
        self.nodes.iter().map(|n| n.temperature).collect()
    }

    /// Aggregated rate of one link (W into its source), evaluated on `temps`.
    pub fn link_heat_exchange(&self, id: LinkId, temps: &[Real]) -> NetworkResult<Real> {
        self.check_snapshot(temps)?;
        let link = self.link(id).ok_or(NetworkError::IdNotFound { what: "LinkId" })?;
        self.sum_link(link, temps)
            .map_err(|source| NetworkError::Link {
                link: self.qualified_link_name(id),
                source,
            })
    }

    /// Sum of all outgoing links of one interface (W into its owner).
    pub fn interface_heat_exchange(&self, id: IfnId, temps: &[Real]) -> NetworkResult<Real> {
        self.check_snapshot(temps)?;
        self.sum_interface(id, temps)
    }

    /// `heat_generation + Σ interface exchange` for one node (W).
    pub fn net_power(&self, id: HsnId, temps: &[Real]) -> NetworkResult<Real> {
        self.check_snapshot(temps)?;
        self.node_net_power(id, temps)
    }

    /// Net power of every node, in creation order, all read from `temps`.
    pub fn net_powers(&self, temps: &[Real]) -> NetworkResult<Vec<Real>> {
        self.check_snapshot(temps)?;
        self.nodes
            .iter()
            .map(|n| self.node_net_power(n.id, temps))
            .collect()
    }

    /// Same as [`Network::net_powers`], one rayon task per node.
    ///
    /// Every node sums its own terms in the same order as the sequential path,
    /// so results are bit-identical.
    pub fn net_powers_par(&self, temps: &[Real]) -> NetworkResult<Vec<Real>> {
        self.check_snapshot(temps)?;
        self.nodes
            .par_iter()
            .map(|n| self.node_net_power(n.id, temps))
            .collect()
    }

    /// Σ Cᵢ·Tᵢ over all nodes (J, relative to 0 K).
    pub fn stored_energy(&self, temps: &[Real]) -> NetworkResult<Real> {
        self.check_snapshot(temps)?;
        Ok(self
            .nodes
            .iter()
            .zip(temps)
            .map(|(n, t)| n.capacitance() * t)
            .sum())
    }

    /// Write a full set of new temperatures. This is the only temperature mutator.
    pub fn commit_temperatures(&mut self, temps: &[Real]) -> NetworkResult<()> {
        self.check_snapshot(temps)?;
        for (node, &t) in self.nodes.iter_mut().zip(temps) {
            node.temperature = t;
        }
        Ok(())
    }

    /// Replace a node's internal generation between steps.
    pub fn set_heat_generation(&mut self, id: HsnId, watts: Real) -> NetworkResult<()> {
        let node = self
            .nodes
            .get_mut(id.index())
            .ok_or(NetworkError::IdNotFound { what: "HsnId" })?;
        if !watts.is_finite() {
            return Err(NetworkError::InvalidParameter {
                owner: node.name.clone(),
                field: "heat_generation",
                value: watts,
                reason: "must be finite",
            });
        }
        node.heat_generation = watts;
        Ok(())
    }

    fn check_snapshot(&self, temps: &[Real]) -> NetworkResult<()> {
        if temps.len() != self.nodes.len() {
            return Err(NetworkError::SnapshotLength {
                expected: self.nodes.len(),
                actual: temps.len(),
            });
        }
        Ok(())
    }

    fn sum_link(&self, link: &Link, temps: &[Real]) -> LinkResult<Real> {
        let t1 = temps[self.interfaces[link.source.index()].owner.index()];
        let t2 = temps[self.interfaces[link.target.index()].owner.index()];
        let evaluator = SnapshotEvaluator {
            network: self,
            temps,
        };
        let mut total = 0.0;
        for physics in &link.physics {
            total += physics.heat_exchange_rate(t1, t2, &evaluator)?;
        }
        Ok(total)
    }

    fn sum_interface(&self, id: IfnId, temps: &[Real]) -> NetworkResult<Real> {
        let ifn = self
            .interface(id)
            .ok_or(NetworkError::IdNotFound { what: "IfnId" })?;
        let mut total = 0.0;
        for &link_id in &ifn.links {
            let link = &self.links[link_id.index()];
            total += self
                .sum_link(link, temps)
                .map_err(|source| NetworkError::Link {
                    link: self.qualified_link_name(link_id),
                    source,
                })?;
        }
        Ok(total)
    }

    fn node_net_power(&self, id: HsnId, temps: &[Real]) -> NetworkResult<Real> {
        let node = self.node(id).ok_or(NetworkError::IdNotFound { what: "HsnId" })?;
        let mut exchange = 0.0;
        for &ifn in &node.interfaces {
            exchange += self.sum_interface(ifn, temps)?;
        }
        Ok(node.heat_generation + exchange)
    }
}
