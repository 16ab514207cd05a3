//! 拓扑描述文件
//!
//! 与拓扑生成工具互通的 JSON 格式：`switches`、`hosts`、`links` 三段，缺一不可。

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::ser::PrettyFormatter;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologySpec {
    pub hosts: BTreeMap<String, HostSpec>,
    pub switches: BTreeMap<String, serde_json::Value>,
    pub links: Vec<LinkSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostSpec {
    /// `a.b.c.d/len`
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
    /// 主机启动后执行的命令（网关路由、静态 ARP 等），核心不解释
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
}

/// 一条链路：`[a, b, ...]`
///
/// 前两项是端点，之后的项（时延、带宽等）原样保留，建图时不解释。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkSpec {
    pub a: String,
    pub b: String,
    pub extra: Vec<serde_json::Value>,
}

impl LinkSpec {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            extra: Vec::new(),
        }
    }
}

impl Serialize for LinkSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2 + self.extra.len()))?;
        seq.serialize_element(&self.a)?;
        seq.serialize_element(&self.b)?;
        for v in &self.extra {
            seq.serialize_element(v)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for LinkSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct LinkVisitor;

        impl<'de> Visitor<'de> for LinkVisitor {
            type Value = LinkSpec;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a link [endpoint, endpoint, ...]")
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> std::result::Result<LinkSpec, A::Error> {
                let a: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let b: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let mut extra = Vec::new();
                while let Some(v) = seq.next_element::<serde_json::Value>()? {
                    extra.push(v);
                }
                Ok(LinkSpec { a, b, extra })
            }
        }

        deserializer.deserialize_seq(LinkVisitor)
    }
}

impl TopologySpec {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| Error::malformed(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// 以给定缩进输出，如 `b"\t"`、`b"    "`
    pub fn to_json_with_indent(&self, indent: &[u8]) -> Result<String> {
        to_json_with_indent(self, indent)
    }
}

pub(crate) fn to_json_with_indent<T: Serialize + ?Sized>(
    value: &T,
    indent: &[u8],
) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent));
    value.serialize(&mut ser).map_err(Error::Json)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
