//! 图算法模块
//!
//! 包含遍历、最短路径和结构分析算法

mod shortest_path;
mod structure;
mod traversal;

pub use shortest_path::{reconstruct_path, PathFinder, PathResult, ShortestPaths};
pub use structure::{GraphAnalyzer, TopoSort};
pub use traversal::Traversal;
