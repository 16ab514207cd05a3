//! 交换机运行时配置
//!
//! 源路由不需要任何表项，每台交换机只需一份指向编译产物的空配置。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::topo::Topology;
use crate::topo::spec::to_json_with_indent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub target: String,
    pub p4info: String,
    pub bmv2_json: String,
    pub table_entries: Vec<serde_json::Value>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            target: "bmv2".to_string(),
            p4info: "build/source_routing.p4.p4info.txt".to_string(),
            bmv2_json: "build/source_routing.json".to_string(),
            table_entries: Vec::new(),
        }
    }
}

impl RuntimeConfig {
    /// 以 tab 缩进输出
    pub fn to_json(&self) -> Result<String> {
        to_json_with_indent(self, b"\t")
    }
}

/// 为每台交换机写出 `<dir>/<switch>-runtime.json`，返回写出的文件路径
pub fn write_runtime_configs(topo: &Topology, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;

    let content = RuntimeConfig::default().to_json()?;
    let mut written = Vec::with_capacity(topo.switch_count());
    for sw in topo.switches() {
        let path = dir.join(format!("{}-runtime.json", sw.name()));
        fs::write(&path, &content).map_err(|source| io_error(&path, source))?;
        written.push(path);
    }
    info!(dir = %dir.display(), files = written.len(), "📝 写出交换机运行时配置");
    Ok(written)
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}
