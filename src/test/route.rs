use super::{TWO_SWITCH, WITH_ISOLATED, build};
use crate::Error;
use crate::net::RouteResolver;
use crate::topo::Topology;
use crate::topo::generator::{GeneratorOpts, generate_topology};
use std::net::Ipv4Addr;

fn generated(num_switch: usize, num_host: usize, links: &str) -> RouteResolver {
    let spec = generate_topology(&GeneratorOpts {
        num_switch,
        num_host,
        switch_links: links.to_string(),
    })
    .expect("generate topology");
    RouteResolver::new(Topology::build(&spec).expect("build topology"))
}

#[test]
fn route_two_switches_egress_then_host_port() {
    let resolver = RouteResolver::new(build(TWO_SWITCH));
    assert_eq!(resolver.route_ports("h11", "h21").unwrap(), vec![3, 1]);
    assert_eq!(resolver.route_ports("h21", "h11").unwrap(), vec![3, 1]);
    assert_eq!(resolver.route_ports("10.0.1.2", "h21").unwrap(), vec![3, 1]);
}

#[test]
fn route_reports_resolved_endpoints_and_switches() {
    let resolver = RouteResolver::new(build(TWO_SWITCH));
    let route = resolver.resolve("h11", "10.0.2.2").unwrap();
    let topo = resolver.topology();

    assert_eq!(route.src, Ipv4Addr::new(10, 0, 1, 2));
    assert_eq!(route.dst, Ipv4Addr::new(10, 0, 2, 2));
    assert_eq!(route.src_switch, topo.switch_id("s1").unwrap());
    assert_eq!(route.dst_switch, topo.switch_id("s2").unwrap());
    assert_eq!(route.switches, vec![route.src_switch, route.dst_switch]);
    assert_eq!(route.ports, vec![3, 1]);
}

#[test]
fn route_to_self_is_rejected() {
    let resolver = generated(3, 2, "s1-s2,s2-s3");
    for host in resolver.topology().hosts() {
        let err = resolver.route_ports(host.name(), host.name()).unwrap_err();
        assert!(matches!(err, Error::SameEndpoint(a) if a == host.addr()));
    }
    // 名称与地址指向同一主机
    assert!(matches!(
        resolver.route_ports("h11", "10.0.1.2"),
        Err(Error::SameEndpoint(_))
    ));
}

#[test]
fn route_same_switch_is_single_host_port() {
    let resolver = generated(2, 3, "s1-s2");
    // h12 = 10.0.1.4，h13 = 10.0.1.6
    assert_eq!(resolver.route_ports("h11", "h12").unwrap(), vec![2]);
    assert_eq!(resolver.route_ports("h11", "h13").unwrap(), vec![3]);
    assert_eq!(resolver.route_ports("h13", "h11").unwrap(), vec![1]);

    for host in resolver.topology().hosts() {
        for other in resolver.topology().hosts() {
            let same_switch =
                host.attachment().map(|a| a.switch) == other.attachment().map(|a| a.switch);
            if host.name() == other.name() || !same_switch {
                continue;
            }
            let ports = resolver.route_ports(host.name(), other.name()).unwrap();
            assert_eq!(ports, vec![u16::from(other.addr().octets()[3] / 2)]);
        }
    }
}

#[test]
fn route_multi_hop_follows_neighbor_ports() {
    // 每台交换机一台主机：s1-p2/s2-p2，s2-p3/s3-p2
    let resolver = generated(3, 1, "s1-s2,s2-s3");
    assert_eq!(resolver.route_ports("h11", "h31").unwrap(), vec![2, 3, 1]);
    assert_eq!(resolver.route_ports("h31", "h11").unwrap(), vec![2, 2, 1]);
    assert_eq!(resolver.route_ports("h21", "h31").unwrap(), vec![3, 1]);
}

#[test]
fn route_from_address_outside_topology_uses_convention() {
    let resolver = RouteResolver::new(build(TWO_SWITCH));
    assert_eq!(resolver.route_ports("10.0.1.100", "h21").unwrap(), vec![3, 1]);
    assert!(matches!(
        resolver.route_ports("10.0.8.2", "h21"),
        Err(Error::NoProxySwitch(_))
    ));
}

#[test]
fn route_explicit_attachment_overrides_address_convention() {
    let resolver = RouteResolver::new(build(
        r#"{
            "switches": { "s1": {}, "s2": {} },
            "hosts": {
                "ha": { "ip": "10.0.5.8/31", "mac": "08:00:00:00:05:01" },
                "hb": { "ip": "10.0.6.2/31", "mac": "08:00:00:00:06:01" }
            },
            "links": [ ["ha", "s1-p7"], ["hb", "s2-p9"], ["s1-p1", "s2-p2"] ]
        }"#,
    ));
    assert_eq!(resolver.route_ports("hb", "ha").unwrap(), vec![2, 7]);
    assert_eq!(resolver.route_ports("ha", "hb").unwrap(), vec![1, 9]);
}

#[test]
fn route_to_isolated_switch_is_unreachable() {
    let resolver = RouteResolver::new(build(WITH_ISOLATED));
    let err = resolver.route_ports("h11", "h31").unwrap_err();
    assert!(matches!(err, Error::Unreachable { ref from, ref to } if from == "s1" && to == "s3"));
    assert!(matches!(
        resolver.route_ports("h31", "h21"),
        Err(Error::Unreachable { .. })
    ));
    // 连通部分不受影响
    assert_eq!(resolver.route_ports("h11", "h21").unwrap(), vec![3, 1]);
}

#[test]
fn route_propagates_resolution_errors() {
    let resolver = RouteResolver::new(build(TWO_SWITCH));
    assert!(matches!(resolver.route_ports("h11", "h99"), Err(Error::UnknownHost(_))));
    assert!(matches!(resolver.route_ports("s1", "h21"), Err(Error::InvalidToken(_))));
    assert!(matches!(
        resolver.route_ports("h11", "10.0.2.300"),
        Err(Error::InvalidAddress(_))
    ));
}
