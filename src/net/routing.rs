//! 全源最短路径表
//!
//! 交换机图上所有边权相同，按 Floyd-Warshall 方式以每台交换机为中转点松弛，
//! 同时维护距离与路径（交换机序列）。
//!
//! 等长路径的取舍：中转点按 id（名称字典序）从小到大尝试，只有严格更短才替换，
//! 因此结果是确定的。

use tracing::{debug, trace};

use super::id::SwitchId;
use crate::topo::Topology;

#[derive(Debug, Clone)]
pub struct PathTable {
    n: usize,
    /// 不可达距离，严格大于交换机数量
    unreachable: usize,
    dist: Vec<usize>,
    paths: Vec<Vec<SwitchId>>,
}

impl PathTable {
    #[tracing::instrument(skip(topo), fields(switches = topo.switch_count()))]
    pub fn compute(topo: &Topology) -> Self {
        let n = topo.switch_count();
        let unreachable = n + 1;
        let mut table = Self {
            n,
            unreachable,
            dist: vec![unreachable; n * n],
            paths: vec![Vec::new(); n * n],
        };

        for s in 0..n {
            let i = table.idx(s, s);
            table.dist[i] = 0;
            table.paths[i] = vec![SwitchId(s)];
        }
        for &(a, b) in topo.edges() {
            for (s, d) in [(a, b), (b, a)] {
                let i = table.idx(s.0, d.0);
                table.dist[i] = 1;
                table.paths[i] = vec![s, d];
            }
        }

        for via in 0..n {
            for s in 0..n {
                if s == via {
                    continue;
                }
                let sv = table.idx(s, via);
                if table.dist[sv] >= unreachable {
                    continue;
                }
                for d in 0..n {
                    if d == s || d == via {
                        continue;
                    }
                    let sd = table.idx(s, d);
                    let vd = table.idx(via, d);
                    if table.dist[sd] <= 1 || table.dist[vd] >= unreachable {
                        continue;
                    }
                    let through = table.dist[sv] + table.dist[vd];
                    if through < table.dist[sd] {
                        let mut path = table.paths[sv].clone();
                        path.extend_from_slice(&table.paths[vd][1..]);
                        trace!(s, d, via, old = table.dist[sd], new = through, "松弛");
                        table.paths[sd] = path;
                        table.dist[sd] = through;
                    }
                }
            }
        }

        debug!(
            reachable_pairs = table.dist.iter().filter(|&&d| d < unreachable).count(),
            "最短路径表计算完成"
        );
        table
    }

    fn idx(&self, s: usize, d: usize) -> usize {
        s * self.n + d
    }

    /// 跳数；不可达时为 `None`
    pub fn distance(&self, src: SwitchId, dst: SwitchId) -> Option<usize> {
        let d = self.dist[self.idx(src.0, dst.0)];
        (d < self.unreachable).then_some(d)
    }

    /// 含两端的交换机序列；`src == dst` 时为 `[src]`，不可达时为 `None`
    pub fn path(&self, src: SwitchId, dst: SwitchId) -> Option<&[SwitchId]> {
        let i = self.idx(src.0, dst.0);
        (self.dist[i] < self.unreachable).then(|| self.paths[i].as_slice())
    }

    pub fn switch_count(&self) -> usize {
        self.n
    }
}
