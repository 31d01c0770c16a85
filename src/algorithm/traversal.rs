//! 图遍历算法
//!
//! 广度优先和深度优先遍历，供最短路径与结构分析复用

use crate::graph::Graph;
use crate::metrics::global_metrics;
use crate::types::VertexKey;
use indexmap::IndexSet;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// 遍历器
pub struct Traversal<'a, V: VertexKey> {
    graph: &'a Graph<V>,
}

impl<'a, V: VertexKey> Traversal<'a, V> {
    /// 创建遍历器
    pub fn new(graph: &'a Graph<V>) -> Self {
        Self { graph }
    }

    /// 广度优先遍历，返回各可达顶点到起点的层数
    ///
    /// 起点距离恒为 0，即使它不在图中或没有出边；
    /// 不可达顶点不出现在结果中。
    pub fn bfs(&self, start: &V) -> HashMap<V, usize> {
        self.bfs_with(start, |_, _| {})
    }

    /// 广度优先遍历，按发现顺序对每个顶点调用一次 `visit(顶点, 距离)`
    pub fn bfs_with<F>(&self, start: &V, mut visit: F) -> HashMap<V, usize>
    where
        F: FnMut(&V, usize),
    {
        global_metrics().record_bfs_run();

        let mut distances: HashMap<V, usize> = HashMap::new();
        let mut queue: VecDeque<(V, usize)> = VecDeque::new();

        distances.insert(start.clone(), 0);
        queue.push_back((start.clone(), 0));

        while let Some((current, dist)) = queue.pop_front() {
            visit(&current, dist);
            for neighbor in self.graph.neighbors(&current) {
                if !distances.contains_key(neighbor) {
                    distances.insert(neighbor.clone(), dist + 1);
                    queue.push_back((neighbor.clone(), dist + 1));
                }
            }
        }

        debug!("bfs 完成: 起点 {:?}, 可达 {} 个顶点", start, distances.len());
        distances
    }

    /// 深度优先遍历，返回按发现顺序排列的已访问顶点集合
    ///
    /// 邻居按存储顺序展开。使用显式工作栈而非递归，
    /// 深度只受堆内存限制。
    pub fn dfs(&self, start: &V) -> IndexSet<V> {
        self.dfs_with(start, |_| {})
    }

    /// 深度优先遍历，按先序对每个顶点调用一次 `visit`
    pub fn dfs_with<F>(&self, start: &V, mut visit: F) -> IndexSet<V>
    where
        F: FnMut(&V),
    {
        global_metrics().record_dfs_run();

        let mut visited: IndexSet<V> = IndexSet::new();
        visited.insert(start.clone());
        visit(start);

        // 工作栈帧: (顶点, 下一个待展开的邻居序号)
        let mut stack: Vec<(V, usize)> = vec![(start.clone(), 0)];

        while let Some(frame) = stack.last_mut() {
            let neighbors = self.graph.neighbors(&frame.0);
            if frame.1 >= neighbors.len() {
                stack.pop();
                continue;
            }
            let next = neighbors[frame.1].clone();
            frame.1 += 1;

            if !visited.contains(&next) {
                visited.insert(next.clone());
                visit(&next);
                stack.push((next, 0));
            }
        }

        debug!("dfs 完成: 起点 {:?}, 访问 {} 个顶点", start, visited.len());
        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    fn chain_graph() -> Graph<u64> {
        // 1 -> 2 -> 3 -> 4
        let mut graph = Graph::directed();
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.add_edge(3, 4);
        graph
    }

    #[test]
    fn test_bfs_layered_distances() {
        init_tracing();
        //     2 - 4
        //    /
        //   1
        //    \
        //     3 - 5
        let mut graph = Graph::undirected();
        graph.add_edge(1, 2);
        graph.add_edge(1, 3);
        graph.add_edge(2, 4);
        graph.add_edge(3, 5);

        let distances = Traversal::new(&graph).bfs(&1);
        assert_eq!(distances[&1], 0);
        assert_eq!(distances[&2], 1);
        assert_eq!(distances[&3], 1);
        assert_eq!(distances[&4], 2);
        assert_eq!(distances[&5], 2);
    }

    #[test]
    fn test_bfs_unreachable_vertices_absent() {
        let mut graph = chain_graph();
        graph.add_vertex(99);

        let distances = Traversal::new(&graph).bfs(&2);
        assert_eq!(distances.len(), 3);
        assert_eq!(distances[&2], 0);
        assert_eq!(distances[&4], 2);
        assert!(!distances.contains_key(&1));
        assert!(!distances.contains_key(&99));
    }

    #[test]
    fn test_bfs_start_without_edges() {
        let mut graph: Graph<u64> = Graph::directed();
        graph.add_vertex(7);

        let distances = Traversal::new(&graph).bfs(&7);
        assert_eq!(distances.len(), 1);
        assert_eq!(distances[&7], 0);

        // 起点不在图中也一样
        let distances = Traversal::new(&graph).bfs(&42);
        assert_eq!(distances.len(), 1);
        assert_eq!(distances[&42], 0);
    }

    #[test]
    fn test_bfs_visit_order_and_count() {
        let graph = chain_graph();

        let mut seen = Vec::new();
        Traversal::new(&graph).bfs_with(&1, |v, d| seen.push((*v, d)));
        assert_eq!(seen, vec![(1, 0), (2, 1), (3, 2), (4, 3)]);
    }

    #[test]
    fn test_bfs_visits_each_vertex_once_in_cycle() {
        let mut graph = Graph::directed();
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.add_edge(3, 1);

        let mut count = 0;
        Traversal::new(&graph).bfs_with(&1, |_, _| count += 1);
        assert_eq!(count, 3);
    }

    #[test]
    fn test_dfs_follows_stored_neighbor_order() {
        //   1 -> 2 -> 4
        //   1 -> 3
        let mut graph = Graph::directed();
        graph.add_edge(1, 2);
        graph.add_edge(1, 3);
        graph.add_edge(2, 4);

        let visited = Traversal::new(&graph).dfs(&1);
        let order: Vec<u64> = visited.into_iter().collect();
        assert_eq!(order, vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_dfs_guards_against_cycles() {
        let mut graph = Graph::undirected();
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.add_edge(3, 1);

        let mut seen = Vec::new();
        let visited = Traversal::new(&graph).dfs_with(&1, |v| seen.push(*v));
        assert_eq!(visited.len(), 3);
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_dfs_deep_chain_does_not_overflow() {
        let mut graph = Graph::directed();
        for i in 0..50_000u64 {
            graph.add_edge(i, i + 1);
        }

        let visited = Traversal::new(&graph).dfs(&0);
        assert_eq!(visited.len(), 50_001);
    }
}
