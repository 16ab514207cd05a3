use super::{TWO_SWITCH, WITH_ISOLATED, build};
use crate::topo::LookupMode;

#[test]
fn lookup_lists_switch_ports() {
    let topo = build(TWO_SWITCH);
    assert_eq!(
        topo.lookup(LookupMode::Node).to_string(),
        "Nodes\n----------\ns1 : {'s2': 3}\ns2 : {'s1': 3}\n\n"
    );
}

#[test]
fn lookup_lists_adjacency_starting_with_self() {
    let topo = build(WITH_ISOLATED);
    assert_eq!(
        topo.lookup(LookupMode::Edge).to_string(),
        "Edges\n----------\ns1 : ['s1', 's2']\ns2 : ['s2', 's1']\ns3 : ['s3']\n\n"
    );
    assert!(topo.lookup(LookupMode::Node).to_string().contains("s3 : {}\n"));
}
