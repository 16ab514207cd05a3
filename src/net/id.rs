//! 标识符类型

/// 交换机标识符：加载时按名称字典序分配的稠密下标
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SwitchId(pub usize);
