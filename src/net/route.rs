//! 源路由计算
//!
//! 拓扑与最短路径表在启动时构建一次，之后每次查询都是只读计算。

use std::net::Ipv4Addr;
use std::path::Path;

use tracing::{debug, info};

use super::addr::AddressResolver;
use super::id::SwitchId;
use super::routing::PathTable;
use crate::error::{Error, Result};
use crate::topo::Topology;

/// 一次查询的完整结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub src: Ipv4Addr,
    pub dst: Ipv4Addr,
    pub src_switch: SwitchId,
    pub dst_switch: SwitchId,
    /// 经过的交换机（含两端）
    pub switches: Vec<SwitchId>,
    /// 逐跳出端口，最后一个是目的交换机朝向目的主机的端口
    pub ports: Vec<u16>,
}

#[derive(Debug, Clone)]
pub struct RouteResolver {
    topo: Topology,
    paths: PathTable,
}

impl RouteResolver {
    pub fn new(topo: Topology) -> Self {
        let paths = PathTable::compute(&topo);
        Self { topo, paths }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Topology::load(path)?))
    }

    pub fn topology(&self) -> &Topology {
        &self.topo
    }

    pub fn paths(&self) -> &PathTable {
        &self.paths
    }

    pub fn addresses(&self) -> AddressResolver<'_> {
        AddressResolver::new(&self.topo)
    }

    /// 源/目的（主机名或地址）之间的逐跳端口序列
    pub fn route_ports(&self, src: &str, dst: &str) -> Result<Vec<u16>> {
        self.resolve(src, dst).map(|r| r.ports)
    }

    #[tracing::instrument(skip(self))]
    pub fn resolve(&self, src: &str, dst: &str) -> Result<Route> {
        let addrs = self.addresses();
        let src = addrs.resolve_address(src)?;
        let dst = addrs.resolve_address(dst)?;
        if src == dst {
            return Err(Error::SameEndpoint(src));
        }

        let src_switch = addrs.proxy_switch_of(src)?;
        let dst_switch = addrs.proxy_switch_of(dst)?;
        let host_port = addrs.host_port(dst);
        debug!(
            src = %src,
            dst = %dst,
            src_switch = %self.topo.switch(src_switch).name(),
            dst_switch = %self.topo.switch(dst_switch).name(),
            host_port,
            "解析端点"
        );

        if src_switch == dst_switch {
            return Ok(Route {
                src,
                dst,
                src_switch,
                dst_switch,
                switches: vec![src_switch],
                ports: vec![host_port],
            });
        }

        let path = self
            .paths
            .path(src_switch, dst_switch)
            .ok_or_else(|| Error::Unreachable {
                from: self.topo.switch(src_switch).name().to_string(),
                to: self.topo.switch(dst_switch).name().to_string(),
            })?;

        let mut ports = Vec::with_capacity(path.len());
        for hop in path.windows(2) {
            // 路径只由图中的边拼接而来，这里必然有端口
            let port = self.topo.port_towards(hop[0], hop[1]).ok_or_else(|| {
                Error::malformed(format!(
                    "no port from '{}' to '{}'",
                    self.topo.switch(hop[0]).name(),
                    self.topo.switch(hop[1]).name()
                ))
            })?;
            ports.push(port);
        }
        ports.push(host_port);

        info!(src = %src, dst = %dst, ports = ?ports, "🧭 源路由");
        Ok(Route {
            src,
            dst,
            src_switch,
            dst_switch,
            switches: path.to_vec(),
            ports,
        })
    }
}
