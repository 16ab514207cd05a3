//! 拓扑诊断输出
//!
//! `Nodes`：每台交换机的邻居->端口表；`Edges`：每台交换机的邻接表（首项是自身）。

use std::fmt;

use super::model::Topology;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    Node,
    Edge,
}

/// 可直接 `print!` 的诊断列表
pub struct Lookup<'a> {
    topo: &'a Topology,
    mode: LookupMode,
}

impl Topology {
    pub fn lookup(&self, mode: LookupMode) -> Lookup<'_> {
        Lookup { topo: self, mode }
    }
}

impl fmt::Display for Lookup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self.mode {
            LookupMode::Node => "Nodes",
            LookupMode::Edge => "Edges",
        };
        writeln!(f, "{title}")?;
        writeln!(f, "----------")?;
        for sw in self.topo.switches() {
            write!(f, "{} : ", sw.name())?;
            match self.mode {
                LookupMode::Node => {
                    let ports: Vec<String> = sw
                        .neighbors()
                        .map(|(n, p)| format!("'{}': {}", self.topo.switch(n).name(), p))
                        .collect();
                    writeln!(f, "{{{}}}", ports.join(", "))?;
                }
                LookupMode::Edge => {
                    let adj: Vec<String> = std::iter::once(sw.name())
                        .chain(sw.neighbors().map(|(n, _)| self.topo.switch(n).name()))
                        .map(|name| format!("'{name}'"))
                        .collect();
                    writeln!(f, "[{}]", adj.join(", "))?;
                }
            }
        }
        writeln!(f)
    }
}
