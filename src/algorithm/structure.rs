//! 结构分析算法
//!
//! 连通性检测、环检测和拓扑排序

use crate::algorithm::Traversal;
use crate::graph::Graph;
use crate::metrics::global_metrics;
use crate::types::VertexKey;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// 拓扑排序结果
///
/// 有环的有向图没有合法的拓扑顺序，无向图不适用拓扑排序，
/// 两种情况都以显式变体表达，而不是静默返回无效顺序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TopoSort<V: VertexKey> {
    /// 合法的拓扑顺序
    Sorted(Vec<V>),
    /// 有向图中检测到环
    CycleDetected,
    /// 无向图不适用
    NotApplicable,
}

impl<V: VertexKey> TopoSort<V> {
    /// 取出排序结果，失败变体返回 `None`
    pub fn order(self) -> Option<Vec<V>> {
        match self {
            TopoSort::Sorted(order) => Some(order),
            _ => None,
        }
    }
}

/// 结构分析器
pub struct GraphAnalyzer<'a, V: VertexKey> {
    graph: &'a Graph<V>,
}

impl<'a, V: VertexKey> GraphAnalyzer<'a, V> {
    /// 创建分析器
    pub fn new(graph: &'a Graph<V>) -> Self {
        Self { graph }
    }

    /// 判断图是否连通
    ///
    /// 空图视为连通。从最早插入的顶点做 BFS，比较可达数与顶点总数。
    /// 对有向图这只是单根可达性检查（弱、单向语义），
    /// 不是强连通性判定。
    pub fn is_connected(&self) -> bool {
        global_metrics().record_connectivity_check();

        let Some(first) = self.graph.vertices().next() else {
            return true;
        };
        let reached = Traversal::new(self.graph).bfs(first);
        reached.len() == self.graph.vertex_count()
    }

    /// 判断图中是否存在环
    ///
    /// 按插入顺序对每个未访问分量做 DFS，覆盖非连通图。
    /// 无向图排除指向直接父顶点的回边；有向图以在途标记判定。
    pub fn has_cycle(&self) -> bool {
        global_metrics().record_cycle_check();

        let found = if self.graph.is_directed() {
            self.has_cycle_directed()
        } else {
            self.has_cycle_undirected()
        };
        debug!("环检测完成: {}", found);
        found
    }

    fn has_cycle_directed(&self) -> bool {
        // 顶点不在映射中 = 未访问；1 = 在当前路径上；2 = 已完成
        let mut colour: HashMap<V, u8> = HashMap::new();

        for root in self.graph.vertices() {
            if colour.contains_key(root) {
                continue;
            }
            colour.insert(root.clone(), 1);
            let mut stack: Vec<(V, usize)> = vec![(root.clone(), 0)];

            while let Some(frame) = stack.last_mut() {
                let neighbors = self.graph.neighbors(&frame.0);
                if frame.1 >= neighbors.len() {
                    if let Some((done, _)) = stack.pop() {
                        colour.insert(done, 2);
                    }
                    continue;
                }
                let next = neighbors[frame.1].clone();
                frame.1 += 1;

                match colour.get(&next).copied() {
                    // 指向当前路径上的顶点
                    Some(1) => return true,
                    Some(_) => {}
                    None => {
                        colour.insert(next.clone(), 1);
                        stack.push((next, 0));
                    }
                }
            }
        }
        false
    }

    fn has_cycle_undirected(&self) -> bool {
        let mut visited: HashSet<V> = HashSet::new();

        for root in self.graph.vertices() {
            if visited.contains(root) {
                continue;
            }
            visited.insert(root.clone());
            // 工作栈帧: (顶点, 父顶点, 下一个待展开的邻居序号)
            let mut stack: Vec<(V, Option<V>, usize)> = vec![(root.clone(), None, 0)];

            while let Some(frame) = stack.last_mut() {
                let neighbors = self.graph.neighbors(&frame.0);
                if frame.2 >= neighbors.len() {
                    stack.pop();
                    continue;
                }
                let next = neighbors[frame.2].clone();
                frame.2 += 1;

                // 指向直接父顶点的回边不构成环
                if frame.1.as_ref() == Some(&next) {
                    continue;
                }
                if visited.contains(&next) {
                    return true;
                }
                visited.insert(next.clone());
                let parent = frame.0.clone();
                stack.push((next, Some(parent), 0));
            }
        }
        false
    }

    /// 计算拓扑排序
    ///
    /// 只对无环有向图给出 `Sorted`：按插入顺序对各分量做 DFS，
    /// 完成顺序逆序即拓扑顺序，结果确定。
    pub fn topological_sort(&self) -> TopoSort<V> {
        global_metrics().record_topo_sort();

        if !self.graph.is_directed() {
            return TopoSort::NotApplicable;
        }
        if self.has_cycle() {
            return TopoSort::CycleDetected;
        }

        let mut visited: HashSet<V> = HashSet::new();
        let mut order: Vec<V> = Vec::with_capacity(self.graph.vertex_count());

        for root in self.graph.vertices() {
            if visited.contains(root) {
                continue;
            }
            visited.insert(root.clone());
            let mut stack: Vec<(V, usize)> = vec![(root.clone(), 0)];

            while let Some(frame) = stack.last_mut() {
                let neighbors = self.graph.neighbors(&frame.0);
                if frame.1 >= neighbors.len() {
                    if let Some((done, _)) = stack.pop() {
                        order.push(done);
                    }
                    continue;
                }
                let next = neighbors[frame.1].clone();
                frame.1 += 1;

                if !visited.contains(&next) {
                    visited.insert(next.clone());
                    stack.push((next, 0));
                }
            }
        }

        order.reverse();
        TopoSort::Sorted(order)
    }
}
