mod generator;
mod lookup;
mod route;

use crate::topo::{Topology, TopologySpec};

/// s1 --(p3:p3)-- s2，h11 接在 s1-p1，h21 接在 s2-p1
pub(crate) const TWO_SWITCH: &str = r#"
{
    "hosts": {
        "h11": { "ip": "10.0.1.2/31", "mac": "08:00:00:00:01:01" },
        "h21": { "ip": "10.0.2.2/31", "mac": "08:00:00:00:02:01" }
    },
    "switches": {
        "s1": { "runtime_json": "topo/s1-runtime.json" },
        "s2": { "runtime_json": "topo/s2-runtime.json" }
    },
    "links": [
        ["h11", "s1-p1"],
        ["h21", "s2-p1"],
        ["s1-p3", "s2-p3"]
    ]
}
"#;

/// 在 TWO_SWITCH 基础上多一台没有任何交换机链路的 s3
pub(crate) const WITH_ISOLATED: &str = r#"
{
    "hosts": {
        "h11": { "ip": "10.0.1.2/31", "mac": "08:00:00:00:01:01" },
        "h21": { "ip": "10.0.2.2/31", "mac": "08:00:00:00:02:01" },
        "h31": { "ip": "10.0.3.2/31", "mac": "08:00:00:00:03:01" }
    },
    "switches": { "s1": {}, "s2": {}, "s3": {} },
    "links": [
        ["h11", "s1-p1"],
        ["h21", "s2-p1"],
        ["h31", "s3-p1"],
        ["s1-p3", "s2-p3"]
    ]
}
"#;

pub(crate) fn build(raw: &str) -> Topology {
    let spec = TopologySpec::from_json(raw).expect("parse topology");
    Topology::build(&spec).expect("build topology")
}

pub(crate) fn build_err(raw: &str) -> crate::Error {
    let spec = TopologySpec::from_json(raw).expect("parse topology");
    Topology::build(&spec).expect_err("topology should be rejected")
}
