//! 地址解析
//!
//! 把主机名 / 点分地址互相转换，并找到主机所接入的代理交换机。
//!
//! 接入交换机与最后一跳端口优先取拓扑文件里主机-交换机链路给出的值；
//! 没有这条链路时退回拓扑生成器的约定：`10.0.X.Y` 接在 `sX`，端口为 `Y / 2`。

use std::net::Ipv4Addr;

use tracing::trace;

use super::id::SwitchId;
use crate::error::{Error, Result};
use crate::topo::Topology;

#[derive(Debug, Clone, Copy)]
pub struct AddressResolver<'a> {
    topo: &'a Topology,
}

impl<'a> AddressResolver<'a> {
    pub fn new(topo: &'a Topology) -> Self {
        Self { topo }
    }

    /// 主机名或地址 -> 地址
    ///
    /// 合法的点分地址原样返回，即使拓扑中没有对应主机（例如发送端网卡地址）。
    pub fn resolve_address(&self, token: &str) -> Result<Ipv4Addr> {
        self.reject_switch(token)?;
        if token.contains('.') {
            return parse_ipv4(token);
        }
        self.topo
            .host_by_name(token)
            .map(|h| h.addr())
            .ok_or_else(|| Error::UnknownHost(token.to_string()))
    }

    /// 主机名或地址 -> 主机名
    pub fn resolve_name(&self, token: &str) -> Result<&'a str> {
        self.reject_switch(token)?;
        let host = if token.contains('.') {
            self.topo.host_by_addr(parse_ipv4(token)?)
        } else {
            self.topo.host_by_name(token)
        };
        host.map(|h| h.name())
            .ok_or_else(|| Error::UnknownHost(token.to_string()))
    }

    /// 主机名或地址 -> 代理交换机
    pub fn proxy_switch(&self, token: &str) -> Result<SwitchId> {
        let addr = self.resolve_address(token)?;
        self.proxy_switch_of(addr)
    }

    pub fn proxy_switch_of(&self, addr: Ipv4Addr) -> Result<SwitchId> {
        if let Some(att) = self.topo.host_by_addr(addr).and_then(|h| h.attachment()) {
            return Ok(att.switch);
        }
        let name = format!("s{}", addr.octets()[2]);
        trace!(addr = %addr, switch = %name, "按地址约定推导代理交换机");
        self.topo
            .switch_id(&name)
            .ok_or(Error::NoProxySwitch(addr))
    }

    /// 代理交换机上朝向该主机的端口
    pub fn host_port(&self, addr: Ipv4Addr) -> u16 {
        match self.topo.host_by_addr(addr).and_then(|h| h.attachment()) {
            Some(att) => att.port,
            None => u16::from(addr.octets()[3] / 2),
        }
    }

    fn reject_switch(&self, token: &str) -> Result<()> {
        let looks_like_switch = token
            .strip_prefix('s')
            .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()));
        if looks_like_switch || self.topo.switch_id(token).is_some() {
            return Err(Error::InvalidToken(token.to_string()));
        }
        Ok(())
    }
}

/// 严格的点分十进制：恰好四段，每段 0-255，不允许前导零
pub fn parse_ipv4(token: &str) -> Result<Ipv4Addr> {
    token
        .parse::<Ipv4Addr>()
        .map_err(|_| Error::InvalidAddress(token.to_string()))
}
