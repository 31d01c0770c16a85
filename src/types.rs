//! 通用类型定义
//!
//! 顶点键约束和边权重类型

use std::fmt::Debug;
use std::hash::Hash;

/// 边权重（非负有限值，由 `Graph::add_weighted_edge` 保证）
pub type Weight = f64;

/// 顶点键约束
///
/// 任何可比较、可哈希、可克隆的类型都可以作为顶点，
/// 例如 `u64`、`&str`、`String` 或自定义 ID 类型。
pub trait VertexKey: Eq + Hash + Clone + Debug {}

impl<T: Eq + Hash + Clone + Debug> VertexKey for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct NodeId(u64);

    fn takes_vertex_key<V: VertexKey>(v: V) -> V {
        v
    }

    #[test]
    fn test_vertex_key_blanket_impl() {
        assert_eq!(takes_vertex_key(42u64), 42u64);
        assert_eq!(takes_vertex_key("a"), "a");
        assert_eq!(takes_vertex_key(NodeId(7)), NodeId(7));
    }
}
