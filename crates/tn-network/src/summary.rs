//! Human-readable listing of a network.

use std::fmt;

use crate::network::{LinkKind, Network};

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} heat storage nodes, {} interfaces, {} links",
            self.nodes.len(),
            self.interfaces.len(),
            self.links.len()
        )?;
        for node in &self.nodes {
            writeln!(
                f,
                "{}: C={} J/K, T={} K, Q_gen={} W",
                node.name,
                node.capacitance(),
                node.temperature,
                node.heat_generation
            )?;
            for &ifn in &node.interfaces {
                let iface = &self.interfaces[ifn.index()];
                write!(f, "  {}", iface.name)?;
                if let Some(e) = iface.emissivity {
                    write!(f, " (e={e})")?;
                }
                writeln!(f)?;
                for &link_id in &iface.links {
                    let link = &self.links[link_id.index()];
                    let target = &self.interfaces[link.target.index()];
                    let target_node = &self.nodes[target.owner.index()];
                    let modes: Vec<&str> = link.physics.iter().map(|p| p.mode_name()).collect();
                    let marker = match link.kind {
                        LinkKind::Declared { .. } => "->",
                        LinkKind::Inverse { .. } => "<-",
                    };
                    writeln!(
                        f,
                        "    {} {} {}.{} [{}]",
                        link.name,
                        marker,
                        target_node.name,
                        target.name,
                        modes.join(", ")
                    )?;
                }
            }
        }
        Ok(())
    }
}
