//! 拓扑描述生成
//!
//! 每台交换机 `sX` 下挂 `num_host` 台主机 `hXY`，主机 `Y` 接在端口 `Y`；
//! 交换机之间的链路依次占用 `num_host + 1` 起的空闲端口。
//! 地址 `10.0.X.2Y/31`，网关为 `10.0.X.2Y+1`。

use std::collections::BTreeMap;

use serde_json::json;

use super::spec::{HostSpec, LinkSpec, TopologySpec};
use crate::error::{Error, Result};

pub const MAX_SWITCHES: usize = 9;
pub const MAX_HOSTS_PER_SWITCH: usize = 5;

#[derive(Debug, Clone)]
pub struct GeneratorOpts {
    pub num_switch: usize,
    pub num_host: usize,
    /// `s1-s2,s1-s3` 形式的交换机链路列表
    pub switch_links: String,
}

impl Default for GeneratorOpts {
    fn default() -> Self {
        Self {
            num_switch: 2,
            num_host: 1,
            switch_links: "s1-s2".to_string(),
        }
    }
}

pub fn generate_topology(opts: &GeneratorOpts) -> Result<TopologySpec> {
    if opts.num_switch == 0 || opts.num_switch > MAX_SWITCHES {
        return Err(Error::InvalidParameters(format!(
            "number of switches must be in 1..={MAX_SWITCHES}, got {}",
            opts.num_switch
        )));
    }
    if opts.num_host > MAX_HOSTS_PER_SWITCH {
        return Err(Error::InvalidParameters(format!(
            "number of hosts per switch must be at most {MAX_HOSTS_PER_SWITCH}, got {}",
            opts.num_host
        )));
    }

    let mut spec = TopologySpec::default();
    for sw in 1..=opts.num_switch {
        spec.switches.insert(
            format!("s{sw}"),
            json!({ "runtime_json": format!("topo/s{sw}-runtime.json") }),
        );
        for h in 1..=opts.num_host {
            let postfix = h * 2;
            let gw = postfix + 1;
            let name = format!("h{sw}{h}");
            spec.hosts.insert(
                name.clone(),
                HostSpec {
                    ip: Some(format!("10.0.{sw}.{postfix}/31")),
                    mac: Some(format!("08:00:00:00:0{sw}:0{h}")),
                    commands: vec![
                        format!("route add default gw 10.0.{sw}.{gw} dev eth0"),
                        format!("arp -i eth0 -s 10.0.{sw}.{gw} 08:00:00:00:0{sw}:00"),
                    ],
                },
            );
            spec.links.push(LinkSpec::new(name, format!("s{sw}-p{h}")));
        }
    }

    append_switch_links(&mut spec, opts.num_host, &opts.switch_links)?;
    Ok(spec)
}

fn append_switch_links(spec: &mut TopologySpec, num_host: usize, raw: &str) -> Result<()> {
    let mut next_port: BTreeMap<&str, usize> =
        spec.switches.keys().map(|s| (s.as_str(), num_host + 1)).collect();
    let mut links = Vec::new();

    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (a, b) = pair.split_once('-').ok_or_else(|| {
            Error::InvalidParameters(format!("switch link '{pair}' is not of the form sA-sB"))
        })?;
        if a == b {
            return Err(Error::InvalidParameters(format!(
                "switch link '{pair}' is a self-loop"
            )));
        }
        let mut take = |sw: &str| -> Result<usize> {
            let port = next_port.get_mut(sw).ok_or_else(|| {
                Error::InvalidParameters(format!("switch link '{pair}' names unknown switch '{sw}'"))
            })?;
            let p = *port;
            *port += 1;
            Ok(p)
        };
        let pa = take(a)?;
        let pb = take(b)?;
        links.push(LinkSpec::new(format!("{a}-p{pa}"), format!("{b}-p{pb}")));
    }

    spec.links.extend(links);
    Ok(())
}
