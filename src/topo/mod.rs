//! 拓扑
//!
//! 拓扑描述文件的读写、建图与诊断输出，以及演示用的拓扑生成器。

mod endpoint;
mod lookup;
mod model;
mod node;
pub(crate) mod spec;

pub mod generator;

pub use endpoint::Endpoint;
pub use lookup::{Lookup, LookupMode};
pub use model::Topology;
pub use node::{Attachment, Host, MacAddr, Switch};
pub use spec::{HostSpec, LinkSpec, TopologySpec};
