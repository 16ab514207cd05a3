//! 源路由头
//!
//! 以太网类型 `0x1234` 之后是一串 16 bit 大端的跳：最高位是 bos（栈底，
//! 只在最后一跳置 1），低 15 位是出端口。bos 之后紧跟 IPv4 载荷。

use crate::error::{Error, Result};

pub const ETHERTYPE_SOURCE_ROUTE: u16 = 0x1234;
pub const ETHERTYPE_IPV4: u16 = 0x0800;

const BOS_BIT: u16 = 0x8000;
const PORT_MASK: u16 = 0x7fff;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRouteHeader {
    pub ports: Vec<u16>,
}

impl SourceRouteHeader {
    pub fn new(ports: Vec<u16>) -> Self {
        Self { ports }
    }

    /// 空端口序列编码为空字节串，此时帧里不携带源路由头
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.ports.len() * 2);
        let last = self.ports.len().saturating_sub(1);
        for (i, &port) in self.ports.iter().enumerate() {
            if port > PORT_MASK {
                return Err(Error::PortOutOfRange(port));
            }
            let word = if i == last { port | BOS_BIT } else { port };
            out.extend_from_slice(&word.to_be_bytes());
        }
        Ok(out)
    }

    /// 读到 bos 为止，返回头部以及消耗的字节数
    pub fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        let mut ports = Vec::new();
        for (i, chunk) in buf.chunks(2).enumerate() {
            let [hi, lo] = chunk else {
                return Err(Error::TruncatedHeader(buf.len()));
            };
            let word = u16::from_be_bytes([*hi, *lo]);
            ports.push(word & PORT_MASK);
            if word & BOS_BIT != 0 {
                return Ok((Self { ports }, (i + 1) * 2));
            }
        }
        Err(Error::TruncatedHeader(buf.len()))
    }

    pub fn to_hex(&self) -> Result<String> {
        Ok(self
            .encode()?
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect())
    }
}
