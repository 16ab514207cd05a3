//! 路由核心
//!
//! 交换机间全源最短路径、主机地址解析，以及把两者组合成逐跳端口序列的源路由计算。

// 子模块声明
mod id;
mod addr;
mod routing;
mod route;
mod source_route;

// 重新导出公共接口
pub use id::SwitchId;
pub use addr::{AddressResolver, parse_ipv4};
pub use routing::PathTable;
pub use route::{Route, RouteResolver};
pub use source_route::{ETHERTYPE_IPV4, ETHERTYPE_SOURCE_ROUTE, SourceRouteHeader};
