//! Integration tests: pairwise conservation and evaluation over whole networks.

use proptest::prelude::*;
use tn_links::{LinkMode, LinkParameters};
use tn_network::{HeatStorageParams, InterfaceParams, LinkKind, Network, NetworkBuilder};

fn all_modes() -> LinkParameters {
    LinkParameters {
        radiation_area1: Some(0.002),
        radiation_area2: Some(0.003),
        view_factor: Some(0.8),
        contact_area: Some(0.004),
        contact_resistance: Some(0.05),
        conduction_area: Some(1.35e-5),
        conductivity: Some(398.0),
        length: Some(0.108),
    }
}

/// Three bodies in a chain with every mode on every link, plus a self-link.
fn chain(t: [f64; 3]) -> Network {
    let mut b = NetworkBuilder::new();
    let optics = InterfaceParams {
        emissivity: Some(0.045),
        absorptivity: Some(0.0),
    };
    let ids: Vec<_> = ["Antenna", "SSI", "MS"]
        .iter()
        .zip(t)
        .map(|(name, temp)| {
            b.add_heat_storage(*name, HeatStorageParams::new(0.03, 887.0).with_temperature(temp))
                .unwrap()
        })
        .collect();
    let faces: Vec<_> = ids
        .iter()
        .map(|&id| b.add_interface(id, "face", optics).unwrap())
        .collect();
    let modes = [LinkMode::Radiation, LinkMode::Conduction, LinkMode::Contact];
    b.add_link(faces[0], "a-s", faces[1], &modes, all_modes()).unwrap();
    b.add_link(faces[1], "s-m", faces[2], &modes, all_modes()).unwrap();
    b.add_link(faces[2], "m-m", faces[2], &[LinkMode::Conduction], all_modes())
        .unwrap();
    b.build().unwrap()
}

#[test]
fn every_declared_link_has_an_inverse_on_its_target() {
    let net = chain([300.0, 290.0, 280.0]);
    assert_eq!(net.links().len(), 6);
    for link in net.links() {
        if let LinkKind::Declared { inverse } = link.kind {
            let inv = net.link(inverse).unwrap();
            assert_eq!(inv.source, link.target);
            assert_eq!(inv.target, link.source);
            assert!(net.interface(link.target).unwrap().links.contains(&inverse));
        }
    }
}

#[test]
fn self_link_exchanges_nothing() {
    let net = chain([300.0, 290.0, 280.0]);
    let id = net.link_id("MS", "face", "m-m").unwrap();
    let temps = net.temperatures();
    assert_eq!(net.link_heat_exchange(id, &temps).unwrap(), 0.0);
}

#[test]
fn interface_sum_is_sum_of_links() {
    let net = chain([300.0, 290.0, 280.0]);
    let temps = net.temperatures();
    let ssi = net.interface_id("SSI", "face").unwrap();
    let total: f64 = net
        .interface(ssi)
        .unwrap()
        .links
        .iter()
        .map(|&l| net.link_heat_exchange(l, &temps).unwrap())
        .sum();
    assert_eq!(net.interface_heat_exchange(ssi, &temps).unwrap(), total);
}

#[test]
fn insertion_order_is_iteration_order() {
    let net = chain([1.0, 2.0, 3.0]);
    let names: Vec<_> = net.nodes().iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["Antenna", "SSI", "MS"]);
    assert_eq!(net.temperatures(), vec![1.0, 2.0, 3.0]);
}

proptest! {
    #[test]
    fn inverse_is_exact_negation(
        t0 in 1.0f64..600.0,
        t1 in 1.0f64..600.0,
        t2 in 1.0f64..600.0,
    ) {
        let net = chain([t0, t1, t2]);
        let temps = net.temperatures();
        for link in net.links() {
            if let LinkKind::Declared { inverse } = link.kind {
                let fwd = net.link_heat_exchange(link.id, &temps).unwrap();
                let back = net.link_heat_exchange(inverse, &temps).unwrap();
                prop_assert_eq!(fwd, -back);
            }
        }
    }

    #[test]
    fn net_exchange_sums_to_zero_without_generation(
        t0 in 1.0f64..600.0,
        t1 in 1.0f64..600.0,
        t2 in 1.0f64..600.0,
    ) {
        let net = chain([t0, t1, t2]);
        let powers = net.net_powers(&net.temperatures()).unwrap();
        let total: f64 = powers.iter().sum();
        let scale: f64 = powers.iter().map(|p| p.abs()).sum::<f64>().max(1.0);
        prop_assert!(total.abs() <= 1e-9 * scale);
    }
}
