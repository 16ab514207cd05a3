//! 链路端点描述
//!
//! 端点形如 `<node>-p<port>`；主机一侧也可以只写主机名。

use std::fmt;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub node: String,
    pub port: Option<u16>,
}

impl Endpoint {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::malformed("empty link endpoint"));
        }
        // 不带 `-p<数字>` 后缀的整体视为裸主机名，由建图时校验
        let split = raw.rsplit_once('-').and_then(|(node, suffix)| {
            suffix
                .strip_prefix('p')
                .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
                .map(|digits| (node, digits))
        });
        let Some((node, digits)) = split else {
            return Ok(Self {
                node: raw.to_string(),
                port: None,
            });
        };
        if node.is_empty() {
            return Err(Error::malformed(format!("link endpoint '{raw}' has no node name")));
        }
        let port = digits
            .parse::<u16>()
            .map_err(|_| Error::malformed(format!("port in link endpoint '{raw}' is out of range")))?;
        Ok(Self {
            node: node.to_string(),
            port: Some(port),
        })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(p) => write!(f, "{}-p{}", self.node, p),
            None => f.write_str(&self.node),
        }
    }
}
