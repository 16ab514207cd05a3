//! 拓扑模型
//!
//! 由拓扑描述一次性构建的只读图：交换机是顶点，交换机之间的链路是无向边；
//! 主机-交换机链路只用来记录主机的接入交换机与最后一跳端口，不进入图。

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::path::Path;

use tracing::{debug, info, trace, warn};

use super::endpoint::Endpoint;
use super::node::{Attachment, Host, MacAddr, Switch, parse_host_ip};
use super::spec::TopologySpec;
use crate::error::{Error, Result};
use crate::net::SwitchId;

/// 拓扑图
#[derive(Debug, Clone, Default)]
pub struct Topology {
    switches: Vec<Switch>,
    switch_ids: HashMap<String, SwitchId>,
    hosts: Vec<Host>,
    host_by_name: HashMap<String, usize>,
    host_by_addr: HashMap<Ipv4Addr, usize>,
    /// 无向边，端点按 id 升序存放
    edges: Vec<(SwitchId, SwitchId)>,
}

enum NodeRef {
    Switch(SwitchId),
    Host(usize),
}

impl Topology {
    /// 从拓扑文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let spec = TopologySpec::from_file(path)?;
        Self::build(&spec)
    }

    /// 从解析后的拓扑描述建图
    #[tracing::instrument(skip(spec), fields(switches = spec.switches.len(), hosts = spec.hosts.len(), links = spec.links.len()))]
    pub fn build(spec: &TopologySpec) -> Result<Self> {
        let mut topo = Topology::default();

        // BTreeMap 迭代即名称字典序，id 由此确定
        for name in spec.switches.keys() {
            let id = SwitchId(topo.switches.len());
            topo.switches.push(Switch::new(id, name.clone()));
            topo.switch_ids.insert(name.clone(), id);
            trace!(name = %name, id = ?id, "添加交换机");
        }

        for (name, host) in &spec.hosts {
            if topo.switch_ids.contains_key(name) {
                return Err(Error::malformed(format!(
                    "'{name}' is declared both as a switch and as a host"
                )));
            }
            let ip = host
                .ip
                .as_deref()
                .ok_or_else(|| Error::malformed(format!("host '{name}' has no address")))?;
            let mac = host
                .mac
                .as_deref()
                .ok_or_else(|| Error::malformed(format!("host '{name}' has no MAC address")))?;
            let (addr, prefix_len) = parse_host_ip(ip)?;
            let mac: MacAddr = mac.parse()?;

            let idx = topo.hosts.len();
            if let Some(&other) = topo.host_by_addr.get(&addr) {
                return Err(Error::malformed(format!(
                    "hosts '{}' and '{name}' share address {addr}",
                    topo.hosts[other].name()
                )));
            }
            topo.hosts.push(Host::new(name.clone(), addr, prefix_len, mac));
            topo.host_by_name.insert(name.clone(), idx);
            topo.host_by_addr.insert(addr, idx);
            trace!(name = %name, addr = %addr, "添加主机");
        }

        for link in &spec.links {
            topo.add_link(&link.a, &link.b)?;
        }

        info!(
            switches = topo.switches.len(),
            hosts = topo.hosts.len(),
            edges = topo.edges.len(),
            "🧱 拓扑构建完成"
        );
        Ok(topo)
    }

    fn resolve_node(&self, ep: &Endpoint) -> Result<NodeRef> {
        if let Some(&id) = self.switch_ids.get(&ep.node) {
            return Ok(NodeRef::Switch(id));
        }
        if let Some(&idx) = self.host_by_name.get(&ep.node) {
            return Ok(NodeRef::Host(idx));
        }
        Err(Error::malformed(format!(
            "link endpoint '{ep}' references unknown node '{}'",
            ep.node
        )))
    }

    fn add_link(&mut self, a: &str, b: &str) -> Result<()> {
        let ea = Endpoint::parse(a)?;
        let eb = Endpoint::parse(b)?;
        match (self.resolve_node(&ea)?, self.resolve_node(&eb)?) {
            (NodeRef::Switch(sa), NodeRef::Switch(sb)) => {
                let pa = switch_port(&ea)?;
                let pb = switch_port(&eb)?;
                if sa == sb {
                    return Err(Error::malformed(format!("link {a} <-> {b} is a self-loop")));
                }
                self.connect(sa, pa, sb, pb);
            }
            (NodeRef::Host(h), NodeRef::Switch(s)) => self.attach(h, s, switch_port(&eb)?)?,
            (NodeRef::Switch(s), NodeRef::Host(h)) => self.attach(h, s, switch_port(&ea)?)?,
            (NodeRef::Host(_), NodeRef::Host(_)) => {
                return Err(Error::malformed(format!(
                    "link {a} <-> {b} connects two hosts"
                )));
            }
        }
        Ok(())
    }

    fn connect(&mut self, a: SwitchId, pa: u16, b: SwitchId, pb: u16) {
        let old_a = self.switches[a.0].insert_neighbor(b, pa);
        let old_b = self.switches[b.0].insert_neighbor(a, pb);
        if old_a.is_some() || old_b.is_some() {
            warn!(
                from = %self.switches[a.0].name(),
                to = %self.switches[b.0].name(),
                "重复的交换机链路，使用最后一条记录的端口"
            );
        } else {
            self.edges.push((a.min(b), a.max(b)));
        }
        debug!(
            from = %self.switches[a.0].name(),
            from_port = pa,
            to = %self.switches[b.0].name(),
            to_port = pb,
            "添加交换机链路"
        );
    }

    fn attach(&mut self, host: usize, switch: SwitchId, port: u16) -> Result<()> {
        let h = &mut self.hosts[host];
        if let Some(prev) = h.attachment() {
            return Err(Error::malformed(format!(
                "host '{}' is attached to both '{}' and '{}'",
                h.name(),
                self.switches[prev.switch.0].name(),
                self.switches[switch.0].name()
            )));
        }
        h.set_attachment(Attachment { switch, port });
        debug!(host = %h.name(), switch = %self.switches[switch.0].name(), port, "主机接入交换机");
        Ok(())
    }

    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    pub fn switches(&self) -> &[Switch] {
        &self.switches
    }

    pub fn switch(&self, id: SwitchId) -> &Switch {
        &self.switches[id.0]
    }

    pub fn switch_id(&self, name: &str) -> Option<SwitchId> {
        self.switch_ids.get(name).copied()
    }

    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    pub fn host_by_name(&self, name: &str) -> Option<&Host> {
        self.host_by_name.get(name).map(|&i| &self.hosts[i])
    }

    pub fn host_by_addr(&self, addr: Ipv4Addr) -> Option<&Host> {
        self.host_by_addr.get(&addr).map(|&i| &self.hosts[i])
    }

    pub fn edges(&self) -> &[(SwitchId, SwitchId)] {
        &self.edges
    }

    /// `from` 到直连邻居 `to` 的出端口
    pub fn port_towards(&self, from: SwitchId, to: SwitchId) -> Option<u16> {
        self.switches[from.0].port_towards(to)
    }
}

fn switch_port(ep: &Endpoint) -> Result<u16> {
    ep.port.ok_or_else(|| {
        Error::malformed(format!(
            "switch endpoint '{ep}' is not of the form <node>-p<port>"
        ))
    })
}
