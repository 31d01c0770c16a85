//! 最短路径算法
//!
//! Dijkstra 单源最短路径与路径重构，要求非负边权重
//! （由 `Graph::add_weighted_edge` 在构造期保证）

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::metrics::global_metrics;
use crate::types::{VertexKey, Weight};
use priority_queue::PriorityQueue;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// 最短路径树
///
/// `distances` 只包含可达顶点，顶点缺席即抽象意义上的“无穷远”；
/// `previous` 记录每个可达顶点在最短路径树中的前驱。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortestPaths<V: VertexKey> {
    /// 起点到各可达顶点的最短距离
    pub distances: HashMap<V, Weight>,
    /// 最短路径树中的前驱顶点
    pub previous: HashMap<V, V>,
}

/// 路径结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult<V: VertexKey> {
    /// 路径上的顶点序列（含两端）
    pub vertices: Vec<V>,
    /// 路径总权重
    pub distance: Weight,
}

/// 堆中的排序键：距离优先，插入序号打破平局
#[derive(Debug, Clone, Copy)]
struct QueueKey {
    dist: Weight,
    seq: usize,
}

impl PartialEq for QueueKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueKey {}

impl PartialOrd for QueueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist
            .total_cmp(&other.dist)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// 最短路径查找器
pub struct PathFinder<'a, V: VertexKey> {
    graph: &'a Graph<V>,
}

impl<'a, V: VertexKey> PathFinder<'a, V> {
    /// 创建查找器
    pub fn new(graph: &'a Graph<V>) -> Self {
        Self { graph }
    }

    /// 计算从 `start` 出发的最短路径树
    ///
    /// 顶点选择采用线性扫描，距离相同时取最早插入的顶点，
    /// 结果完全确定。复杂度 O(V² + E)。
    pub fn dijkstra(&self, start: &V) -> Result<ShortestPaths<V>> {
        self.run(start, None)
    }

    /// 同 `dijkstra`，但在 `target` 的距离确定后提前结束
    ///
    /// 提前结束时，尚未选中顶点的距离只是上界，不保证最短。
    pub fn dijkstra_to(&self, start: &V, target: &V) -> Result<ShortestPaths<V>> {
        self.run(start, Some(target))
    }

    fn run(&self, start: &V, target: Option<&V>) -> Result<ShortestPaths<V>> {
        global_metrics().record_dijkstra_run();

        let mut distances: HashMap<V, Weight> = HashMap::new();
        let mut previous: HashMap<V, V> = HashMap::new();
        let mut visited: HashSet<V> = HashSet::new();

        distances.insert(start.clone(), 0.0);

        loop {
            // 线性扫描未访问顶点中距离最小者，插入顺序打破平局
            let mut current: Option<V> = None;
            let mut best = Weight::INFINITY;
            for v in self.graph.vertices() {
                if visited.contains(v) {
                    continue;
                }
                if let Some(&d) = distances.get(v) {
                    if d < best {
                        best = d;
                        current = Some(v.clone());
                    }
                }
            }

            // 剩余顶点全部不可达
            let Some(current) = current else { break };
            visited.insert(current.clone());
            if target == Some(&current) {
                break;
            }

            for neighbor in self.graph.neighbors(&current) {
                let Some(weight) = self.graph.weight(&current, neighbor) else {
                    // 邻接条目没有权重记录，说明存储层契约已被破坏
                    return Err(Error::MissingWeight(format!(
                        "{:?} -> {:?}",
                        current, neighbor
                    )));
                };
                if visited.contains(neighbor) {
                    continue;
                }
                let candidate = best + weight;
                let improved = match distances.get(neighbor) {
                    Some(&known) => candidate < known,
                    None => true,
                };
                if improved {
                    distances.insert(neighbor.clone(), candidate);
                    previous.insert(neighbor.clone(), current.clone());
                }
            }
        }

        debug!(
            "dijkstra 完成: 起点 {:?}, 可达 {} 个顶点",
            start,
            distances.len()
        );
        Ok(ShortestPaths {
            distances,
            previous,
        })
    }

    /// 堆加速版 Dijkstra，结果与 `dijkstra` 完全一致
    ///
    /// 优先级为（距离, 顶点插入序号），平局规则与线性扫描相同。
    /// 复杂度 O((V + E) log V)。
    pub fn dijkstra_heap(&self, start: &V) -> Result<ShortestPaths<V>> {
        global_metrics().record_dijkstra_run();

        let index = self.graph.adjacency();
        let mut distances: HashMap<V, Weight> = HashMap::new();
        let mut previous: HashMap<V, V> = HashMap::new();

        distances.insert(start.clone(), 0.0);

        let Some(start_pos) = index.position_of(start) else {
            // 起点不在图中，没有可扩展的边
            return Ok(ShortestPaths {
                distances,
                previous,
            });
        };

        let mut visited = vec![false; index.vertex_count()];
        let mut queue: PriorityQueue<usize, Reverse<QueueKey>> = PriorityQueue::new();
        queue.push(
            start_pos,
            Reverse(QueueKey {
                dist: 0.0,
                seq: start_pos,
            }),
        );

        while let Some((pos, _)) = queue.pop() {
            visited[pos] = true;
            let Some(current) = index.vertex_at(pos) else {
                continue;
            };
            let Some(&dist) = distances.get(current) else {
                continue;
            };

            for neighbor in index.neighbors(current) {
                let Some(weight) = index.weight(current, neighbor) else {
                    return Err(Error::MissingWeight(format!(
                        "{:?} -> {:?}",
                        current, neighbor
                    )));
                };
                let Some(neighbor_pos) = index.position_of(neighbor) else {
                    continue;
                };
                if visited[neighbor_pos] {
                    continue;
                }
                let candidate = dist + weight;
                let improved = match distances.get(neighbor) {
                    Some(&known) => candidate < known,
                    None => true,
                };
                if improved {
                    distances.insert(neighbor.clone(), candidate);
                    previous.insert(neighbor.clone(), current.clone());
                    let key = Reverse(QueueKey {
                        dist: candidate,
                        seq: neighbor_pos,
                    });
                    if queue.get(&neighbor_pos).is_some() {
                        queue.change_priority(&neighbor_pos, key);
                    } else {
                        queue.push(neighbor_pos, key);
                    }
                }
            }
        }

        Ok(ShortestPaths {
            distances,
            previous,
        })
    }

    /// 计算从 `start` 到 `target` 的最短路径
    ///
    /// 不可达时返回 `Ok(None)`，调用方不需要处理任何无穷大哨兵值。
    pub fn shortest_path(&self, start: &V, target: &V) -> Result<Option<PathResult<V>>> {
        let tree = self.dijkstra_to(start, target)?;
        let Some(&distance) = tree.distances.get(target) else {
            return Ok(None);
        };
        match reconstruct_path(&tree.previous, start, target) {
            Some(vertices) => Ok(Some(PathResult { vertices, distance })),
            None => Ok(None),
        }
    }
}

/// 沿前驱映射从 `target` 回溯到 `start`，重构路径
///
/// 回溯链到不了 `start`（目标不可达或映射不完整）时返回 `None`。
pub fn reconstruct_path<V: VertexKey>(
    previous: &HashMap<V, V>,
    start: &V,
    target: &V,
) -> Option<Vec<V>> {
    let mut path = vec![target.clone()];
    let mut current = target;
    // 合法的前驱映射是一棵树；步数上限保证畸形输入也能终止
    let mut remaining = previous.len() + 1;

    while current != start {
        if remaining == 0 {
            return None;
        }
        remaining -= 1;
        current = previous.get(current)?;
        path.push(current.clone());
    }

    path.reverse();
    Some(path)
}
