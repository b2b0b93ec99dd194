//! Network validation logic.

use tn_links::{LinkPhysics, ManualRate};

use crate::error::{NetworkError, NetworkResult};
use crate::network::{HeatStorageNode, InterfaceNode, Link, LinkKind};

fn invariant(what: String) -> NetworkError {
    NetworkError::Invariant { what }
}

/// Validate the arena structure: IDs match positions, every reference exists,
/// adjacency agrees with ownership and every declared link has a matching inverse.
pub(crate) fn validate_structure(
    nodes: &[HeatStorageNode],
    interfaces: &[InterfaceNode],
    links: &[Link],
) -> NetworkResult<()> {
    for (i, node) in nodes.iter().enumerate() {
        if node.id.index() != i {
            return Err(invariant(format!("node '{}' stored out of order", node.name)));
        }
        for &ifn in &node.interfaces {
            match interfaces.get(ifn.index()) {
                Some(iface) if iface.owner == node.id => {}
                _ => {
                    return Err(invariant(format!(
                        "node '{}' lists interface {} it does not own",
                        node.name, ifn
                    )));
                }
            }
        }
    }

    for (i, iface) in interfaces.iter().enumerate() {
        if iface.id.index() != i {
            return Err(invariant(format!("interface '{}' stored out of order", iface.name)));
        }
        let Some(owner) = nodes.get(iface.owner.index()) else {
            return Err(invariant(format!(
                "interface '{}' refers to non-existent node {}",
                iface.name, iface.owner
            )));
        };
        if !owner.interfaces.contains(&iface.id) {
            return Err(invariant(format!(
                "interface '{}' missing from its owner's list",
                iface.name
            )));
        }
        for &link in &iface.links {
            match links.get(link.index()) {
                Some(l) if l.source == iface.id => {}
                _ => {
                    return Err(invariant(format!(
                        "interface '{}' lists link {} it is not the source of",
                        iface.name, link
                    )));
                }
            }
        }
    }

    for (i, link) in links.iter().enumerate() {
        if link.id.index() != i {
            return Err(invariant(format!("link '{}' stored out of order", link.name)));
        }
        if link.physics.is_empty() {
            return Err(invariant(format!("link '{}' has no modes", link.name)));
        }
        if interfaces.get(link.source.index()).is_none()
            || interfaces.get(link.target.index()).is_none()
        {
            return Err(invariant(format!(
                "link '{}' refers to a non-existent interface",
                link.name
            )));
        }
        match link.kind {
            LinkKind::Declared { inverse } => {
                let ok = links.get(inverse.index()).is_some_and(|inv| {
                    inv.kind == LinkKind::Inverse { forward: link.id }
                        && inv.source == link.target
                        && inv.target == link.source
                });
                if !ok {
                    return Err(invariant(format!(
                        "declared link '{}' has no matching inverse",
                        link.name
                    )));
                }
            }
            LinkKind::Inverse { forward } => {
                let ok = link.physics == [LinkPhysics::Manual(ManualRate::InverseOf(forward))]
                    && links
                        .get(forward.index())
                        .is_some_and(|f| matches!(f.kind, LinkKind::Declared { .. }));
                if !ok {
                    return Err(invariant(format!(
                        "inverse link '{}' does not mirror a declared link",
                        link.name
                    )));
                }
            }
        }
    }

    Ok(())
}
