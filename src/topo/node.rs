//! 节点类型
//!
//! 定义拓扑中的交换机与主机。加载后只读。

use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::net::SwitchId;

/// 交换机节点
#[derive(Debug, Clone)]
pub struct Switch {
    id: SwitchId,
    name: String,
    /// 直连邻居 -> 本地出端口
    neighbors: BTreeMap<SwitchId, u16>,
}

impl Switch {
    pub(crate) fn new(id: SwitchId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            neighbors: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> SwitchId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 到直连邻居 `to` 的出端口
    pub fn port_towards(&self, to: SwitchId) -> Option<u16> {
        self.neighbors.get(&to).copied()
    }

    pub fn neighbors(&self) -> impl Iterator<Item = (SwitchId, u16)> + '_ {
        self.neighbors.iter().map(|(&id, &port)| (id, port))
    }

    /// 记录邻居端口，返回被覆盖的旧端口
    pub(crate) fn insert_neighbor(&mut self, to: SwitchId, port: u16) -> Option<u16> {
        self.neighbors.insert(to, port)
    }
}

/// 主机接入点：所在交换机以及交换机上朝向主机的端口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment {
    pub switch: SwitchId,
    pub port: u16,
}

/// 主机节点
#[derive(Debug, Clone)]
pub struct Host {
    name: String,
    addr: Ipv4Addr,
    prefix_len: u8,
    mac: MacAddr,
    attachment: Option<Attachment>,
}

impl Host {
    pub(crate) fn new(
        name: impl Into<String>,
        addr: Ipv4Addr,
        prefix_len: u8,
        mac: MacAddr,
    ) -> Self {
        Self {
            name: name.into(),
            addr,
            prefix_len,
            mac,
            attachment: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn mac(&self) -> MacAddr {
        self.mac
    }

    /// 拓扑文件中显式给出的接入点（主机-交换机链路）
    pub fn attachment(&self) -> Option<Attachment> {
        self.attachment
    }

    pub(crate) fn set_attachment(&mut self, attachment: Attachment) {
        self.attachment = Some(attachment);
    }
}

/// 解析 `a.b.c.d/len`；没有前缀长度时视为 /32
pub(crate) fn parse_host_ip(raw: &str) -> Result<(Ipv4Addr, u8)> {
    let (addr, len) = match raw.split_once('/') {
        Some((addr, len)) => {
            let len = len
                .parse::<u8>()
                .ok()
                .filter(|l| *l <= 32)
                .ok_or_else(|| Error::malformed(format!("bad prefix length in '{raw}'")))?;
            (addr, len)
        }
        None => (raw, 32),
    };
    let addr = addr
        .parse::<Ipv4Addr>()
        .map_err(|_| Error::malformed(format!("'{raw}' is not a valid host address")))?;
    Ok((addr, len))
}

/// 以太网 MAC 地址
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr(pub [u8; 6]);

impl FromStr for MacAddr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::malformed(format!("'{s}' is not a valid MAC address"));
        let mut out = [0u8; 6];
        let mut parts = s.split(':');
        for byte in out.iter_mut() {
            let part = parts
                .next()
                .filter(|p| p.len() == 2 && p.bytes().all(|b| b.is_ascii_hexdigit()))
                .ok_or_else(bad)?;
            *byte = u8::from_str_radix(part, 16).map_err(|_| bad())?;
        }
        if parts.next().is_some() {
            return Err(bad());
        }
        Ok(Self(out))
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}
