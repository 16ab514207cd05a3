//! 错误类型
//!
//! 拓扑加载、地址解析、路由计算与源路由头编码共用的错误定义。

use std::net::Ipv4Addr;
use std::path::PathBuf;

use thiserror::Error;

/// crate 统一的 `Result` 别名
pub type Result<T> = std::result::Result<T, Error>;

/// 源路由核心的错误
#[derive(Debug, Error)]
pub enum Error {
    /// 无法读写文件
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 拓扑描述结构错误（启动阶段致命）
    #[error("malformed topology: {0}")]
    MalformedTopology(String),
    /// 主机名或地址不在拓扑中
    #[error("the target '{0}' is not in the topology")]
    UnknownHost(String),
    /// 不是合法的点分十进制 IPv4 地址
    #[error("'{0}' is not a valid IPv4 address")]
    InvalidAddress(String),
    /// 传入的是交换机名，而不是主机名或地址
    #[error("expected a host name or IPv4 address, not switch name '{0}'")]
    InvalidToken(String),
    /// 源与目的相同
    #[error("source should not be the same as destination ({0})")]
    SameEndpoint(Ipv4Addr),
    /// 两个代理交换机之间没有路径
    #[error("no path from switch '{from}' to switch '{to}'")]
    Unreachable { from: String, to: String },
    /// 找不到主机所接入的交换机
    #[error("no switch serves host address {0}")]
    NoProxySwitch(Ipv4Addr),
    /// 端口超出源路由头的 15 bit 范围
    #[error("port {0} does not fit in a 15-bit source-route hop")]
    PortOutOfRange(u16),
    /// 源路由头在 bos 之前就结束了
    #[error("source-route header truncated after {0} bytes")]
    TruncatedHeader(usize),
    /// JSON 序列化失败
    #[error("cannot serialize json: {0}")]
    Json(#[source] serde_json::Error),
    /// 拓扑生成参数不合法
    #[error("invalid topology parameters: {0}")]
    InvalidParameters(String),
}

impl Error {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedTopology(msg.into())
    }
}
