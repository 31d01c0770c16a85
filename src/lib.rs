//! LiteGraph - 轻量级内存加权图引擎
//!
//! 面向通用场景的图数据结构与算法库，支持：
//! - 有向 / 无向加权图存储（插入有序、允许平行边）
//! - 广度 / 深度优先遍历
//! - Dijkstra 最短路径与路径重构
//! - 连通性检测、环检测、拓扑排序

pub mod algorithm;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod types;

// 重导出常用类型
pub use algorithm::{
    reconstruct_path, GraphAnalyzer, PathFinder, PathResult, ShortestPaths, TopoSort, Traversal,
};
pub use error::{Error, Result};
pub use graph::{AdjacencyIndex, Graph};
pub use types::{VertexKey, Weight};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
