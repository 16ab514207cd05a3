use crate::Error;
use crate::topo::generator::{GeneratorOpts, generate_topology};
use crate::topo::{LinkSpec, Topology, TopologySpec};

fn opts(num_switch: usize, num_host: usize, links: &str) -> GeneratorOpts {
    GeneratorOpts {
        num_switch,
        num_host,
        switch_links: links.to_string(),
    }
}

#[test]
fn generator_follows_addressing_and_port_conventions() {
    let spec = generate_topology(&opts(2, 2, "s1-s2")).unwrap();
    assert_eq!(spec.switches.len(), 2);
    assert_eq!(spec.hosts.len(), 4);
    assert_eq!(
        spec.switches["s2"]["runtime_json"].as_str(),
        Some("topo/s2-runtime.json")
    );

    let h12 = &spec.hosts["h12"];
    assert_eq!(h12.ip.as_deref(), Some("10.0.1.4/31"));
    assert_eq!(h12.mac.as_deref(), Some("08:00:00:00:01:02"));
    assert_eq!(
        h12.commands,
        vec![
            "route add default gw 10.0.1.5 dev eth0".to_string(),
            "arp -i eth0 -s 10.0.1.5 08:00:00:00:01:00".to_string(),
        ]
    );

    assert!(spec.links.contains(&LinkSpec::new("h12", "s1-p2")));
    assert_eq!(spec.links.last(), Some(&LinkSpec::new("s1-p3", "s2-p3")));
}

#[test]
fn generator_allocates_next_free_port_per_switch() {
    let spec = generate_topology(&opts(3, 1, "s1-s2, s1-s3 ,s2-s3")).unwrap();
    let switch_links: Vec<LinkSpec> = spec.links.iter().skip(3).cloned().collect();
    assert_eq!(
        switch_links,
        vec![
            LinkSpec::new("s1-p2", "s2-p2"),
            LinkSpec::new("s1-p3", "s3-p2"),
            LinkSpec::new("s2-p3", "s3-p3"),
        ]
    );
}

#[test]
fn generator_output_builds_and_survives_json() {
    let spec = generate_topology(&opts(3, 2, "s1-s2,s2-s3")).unwrap();
    let file = spec.to_json_with_indent(b"\t").unwrap();
    assert!(file.contains("\n\t\"hosts\": {\n\t\t\"h11\": {"));
    let stdout = spec.to_json_with_indent(b"    ").unwrap();
    assert!(stdout.contains("\n    \"hosts\": {\n        \"h11\": {"));

    let reparsed = TopologySpec::from_json(&file).unwrap();
    assert_eq!(reparsed, spec);
    assert_eq!(TopologySpec::from_json(&stdout).unwrap(), spec);

    let topo = Topology::build(&reparsed).unwrap();
    assert_eq!(topo.switch_count(), 3);
    assert_eq!(topo.edges().len(), 2);
    assert!(topo.hosts().iter().all(|h| h.attachment().is_some()));
}

#[test]
fn generator_rejects_bad_parameters() {
    for bad in [
        opts(0, 1, ""),
        opts(10, 1, ""),
        opts(2, 6, "s1-s2"),
        opts(2, 1, "s1-s9"),
        opts(2, 1, "s1s2"),
        opts(2, 1, "s1-s1"),
    ] {
        assert!(
            matches!(generate_topology(&bad), Err(Error::InvalidParameters(_))),
            "{bad:?} should be rejected"
        );
    }
}
