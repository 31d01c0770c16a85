//! 图数据结构
//!
//! 内存加权图的核心，支持有向 / 无向两种模式

use super::index::AdjacencyIndex;
use crate::error::{Error, Result};
use crate::metrics::global_metrics;
use crate::types::{VertexKey, Weight};

/// 加权图
///
/// 方向性在构造时固定。无向图的每条边以一对镜像的有向边存储，
/// 两个方向携带相同权重，且总是一并插入 / 删除。
///
/// 所有查询对未知顶点返回空值或 `None`，不报错。
pub struct Graph<V: VertexKey> {
    /// 是否为有向图
    directed: bool,
    /// 邻接索引
    index: AdjacencyIndex<V>,
}

impl<V: VertexKey> Graph<V> {
    /// 创建有向图
    pub fn directed() -> Self {
        Self {
            directed: true,
            index: AdjacencyIndex::new(),
        }
    }

    /// 创建无向图
    pub fn undirected() -> Self {
        Self {
            directed: false,
            index: AdjacencyIndex::new(),
        }
    }

    /// 是否为有向图
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点（幂等）
    pub fn add_vertex(&mut self, v: V) {
        if self.index.ensure_vertex(v) {
            global_metrics().record_vertex_insert();
        }
    }

    /// 判断顶点是否存在
    pub fn contains_vertex(&self, v: &V) -> bool {
        self.index.contains(v)
    }

    /// 按插入顺序遍历所有顶点
    ///
    /// 插入顺序同时是算法层的确定性平局规则（见 `PathFinder`）。
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.index.vertices()
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.index.vertex_count()
    }

    /// 获取顶点的度数（邻居序列长度，含平行边），未知顶点为 0
    pub fn degree(&self, v: &V) -> usize {
        self.index.neighbors(v).len()
    }

    // ==================== 边操作 ====================

    /// 添加权重为 1 的边
    pub fn add_edge(&mut self, u: V, v: V) {
        self.insert_edge(u, v, 1.0);
    }

    /// 添加带权边
    ///
    /// 两端顶点不存在时自动创建。重复添加同一条边会在邻居序列中
    /// 追加重复条目，权重覆盖而非累加。拒绝负权重和非有限值，
    /// 这是 Dijkstra 非负权重前提的构造期保证。
    pub fn add_weighted_edge(&mut self, u: V, v: V, weight: Weight) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight(format!(
                "{:?} -> {:?}: {}",
                u, v, weight
            )));
        }
        self.insert_edge(u, v, weight);
        Ok(())
    }

    fn insert_edge(&mut self, u: V, v: V, weight: Weight) {
        self.index.ensure_vertex(u.clone());
        self.index.ensure_vertex(v.clone());
        if !self.directed {
            self.index.append(v.clone(), u.clone(), weight);
        }
        self.index.append(u, v, weight);
        global_metrics().record_edge_insert();
    }

    /// 删除边
    ///
    /// 移除 `u` 邻居序列中首个 `v`（无向图时同时移除镜像），
    /// 并无条件清除权重记录。边不存在时为空操作。
    /// 存在平行边时，剩余的邻接条目将不再有权重记录。
    pub fn remove_edge(&mut self, u: &V, v: &V) {
        let removed = self.index.remove_first(u, v);
        if !self.directed {
            self.index.remove_first(v, u);
        }
        if removed {
            global_metrics().record_edge_remove();
        }
    }

    /// 判断边是否存在（线性扫描 `u` 的邻居序列，开销与度数成正比）
    pub fn has_edge(&self, u: &V, v: &V) -> bool {
        self.index.has_edge(u, v)
    }

    /// 获取边权重，从未设置时返回 `None`
    pub fn weight(&self, u: &V, v: &V) -> Option<Weight> {
        self.index.weight(u, v)
    }

    /// 获取顶点的邻居序列（加边顺序，含平行边），未知顶点返回空序列
    pub fn neighbors(&self, v: &V) -> &[V] {
        self.index.neighbors(v)
    }

    /// 获取边数量
    ///
    /// 统计邻接条目总数；无向图中每条边存储两个方向，计数减半。
    pub fn edge_count(&self) -> usize {
        if self.directed {
            self.index.entry_count()
        } else {
            self.index.entry_count() / 2
        }
    }

    /// 获取邻接索引引用
    pub fn adjacency(&self) -> &AdjacencyIndex<V> {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_basic() {
        let mut graph: Graph<&str> = Graph::undirected();

        graph.add_vertex("a");
        graph.add_vertex("b");
        graph.add_vertex("a");

        assert_eq!(graph.vertex_count(), 2);
        assert!(graph.contains_vertex(&"a"));
        assert!(!graph.contains_vertex(&"c"));

        graph.add_weighted_edge("a", "b", 5.0).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors(&"a"), &["b"]);
        assert_eq!(graph.neighbors(&"b"), &["a"]);
    }

    #[test]
    fn test_undirected_edges_are_mirrored() {
        let mut graph: Graph<u64> = Graph::undirected();
        graph.add_weighted_edge(1, 2, 5.0).unwrap();

        assert!(graph.has_edge(&1, &2));
        assert!(graph.has_edge(&2, &1));
        assert_eq!(graph.weight(&1, &2), Some(5.0));
        assert_eq!(graph.weight(&2, &1), Some(5.0));
    }

    #[test]
    fn test_directed_edges_are_one_way() {
        let mut graph: Graph<&str> = Graph::directed();
        graph.add_edge("x", "y");
        graph.add_edge("y", "z");

        assert!(graph.has_edge(&"x", &"y"));
        assert!(!graph.has_edge(&"y", &"x"));
        assert_eq!(graph.weight(&"y", &"x"), None);
    }

    #[test]
    fn test_add_edge_creates_missing_vertices() {
        let mut graph: Graph<u64> = Graph::directed();
        graph.add_edge(1, 2);

        assert_eq!(graph.vertex_count(), 2);
        assert!(graph.contains_vertex(&1));
        assert!(graph.contains_vertex(&2));
    }

    #[test]
    fn test_parallel_edges_keep_duplicates() {
        let mut graph: Graph<u64> = Graph::directed();
        graph.add_weighted_edge(1, 2, 5.0).unwrap();
        graph.add_weighted_edge(1, 2, 7.0).unwrap();

        // 度数包含重复条目，权重只保留最后一次
        assert_eq!(graph.degree(&1), 2);
        assert_eq!(graph.weight(&1, &2), Some(7.0));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_remove_edge() {
        let mut graph: Graph<u64> = Graph::undirected();
        graph.add_weighted_edge(1, 2, 5.0).unwrap();
        graph.remove_edge(&1, &2);

        assert!(!graph.has_edge(&1, &2));
        assert!(!graph.has_edge(&2, &1));
        assert_eq!(graph.weight(&1, &2), None);
        assert_eq!(graph.edge_count(), 0);

        // 空操作
        graph.remove_edge(&1, &2);
        graph.remove_edge(&8, &9);
        assert_eq!(graph.vertex_count(), 2);
    }

    #[test]
    fn test_remove_edge_with_parallel_edges_desyncs_weight() {
        let mut graph: Graph<u64> = Graph::directed();
        graph.add_weighted_edge(1, 2, 5.0).unwrap();
        graph.add_weighted_edge(1, 2, 7.0).unwrap();
        graph.remove_edge(&1, &2);

        // 邻接条目仍在，但权重记录已被清除
        assert!(graph.has_edge(&1, &2));
        assert_eq!(graph.degree(&1), 1);
        assert_eq!(graph.weight(&1, &2), None);
    }

    #[test]
    fn test_rejects_invalid_weights() {
        let mut graph: Graph<u64> = Graph::directed();

        assert!(matches!(
            graph.add_weighted_edge(1, 2, -1.0),
            Err(Error::InvalidWeight(_))
        ));
        assert!(matches!(
            graph.add_weighted_edge(1, 2, f64::NAN),
            Err(Error::InvalidWeight(_))
        ));
        assert!(matches!(
            graph.add_weighted_edge(1, 2, f64::INFINITY),
            Err(Error::InvalidWeight(_))
        ));
        // 被拒绝的边不会留下任何痕迹
        assert!(!graph.has_edge(&1, &2));
    }

    #[test]
    fn test_unknown_vertex_queries_are_soft() {
        let graph: Graph<u64> = Graph::directed();

        assert_eq!(graph.neighbors(&42), &[] as &[u64]);
        assert_eq!(graph.degree(&42), 0);
        assert!(!graph.has_edge(&42, &43));
        assert_eq!(graph.weight(&42, &43), None);
    }

    #[test]
    fn test_vertices_in_insertion_order() {
        let mut graph: Graph<&str> = Graph::directed();
        graph.add_vertex("c");
        graph.add_edge("a", "b");
        graph.add_vertex("a");

        let order: Vec<&str> = graph.vertices().copied().collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }
}
