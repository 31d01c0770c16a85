//! 邻接索引
//!
//! 顶点邻接序列和边权重的内存索引，支持快速查找

use crate::types::{VertexKey, Weight};
use indexmap::IndexMap;
use std::collections::HashMap;

/// 邻接索引
///
/// 键集合即顶点集合，键顺序为顶点插入顺序；
/// 每个邻居序列保持加边顺序，允许重复（平行边）。
pub struct AdjacencyIndex<V: VertexKey> {
    /// 顶点到出边邻居序列的映射
    outgoing: IndexMap<V, Vec<V>>,
    /// 源顶点到（目标顶点到权重）的映射
    weights: HashMap<V, HashMap<V, Weight>>,
}

impl<V: VertexKey> AdjacencyIndex<V> {
    /// 创建新索引
    pub fn new() -> Self {
        Self {
            outgoing: IndexMap::new(),
            weights: HashMap::new(),
        }
    }

    /// 确保顶点存在，返回是否为新插入
    pub fn ensure_vertex(&mut self, v: V) -> bool {
        match self.outgoing.entry(v) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(e) => {
                e.insert(Vec::new());
                true
            }
        }
    }

    /// 追加邻接条目并记录权重（重复追加时权重覆盖，不累加）
    ///
    /// 调用方须先通过 `ensure_vertex` 保证两端顶点存在。
    pub fn append(&mut self, src: V, dst: V, weight: Weight) {
        if let Some(list) = self.outgoing.get_mut(&src) {
            list.push(dst.clone());
        }
        self.weights.entry(src).or_default().insert(dst, weight);
    }

    /// 移除首个匹配的邻接条目，并无条件清除权重记录
    ///
    /// 返回是否移除了邻接条目。存在平行边时，剩余条目将失去权重记录。
    pub fn remove_first(&mut self, src: &V, dst: &V) -> bool {
        let removed = match self.outgoing.get_mut(src) {
            Some(list) => match list.iter().position(|n| n == dst) {
                Some(pos) => {
                    list.remove(pos);
                    true
                }
                None => false,
            },
            None => false,
        };
        if let Some(map) = self.weights.get_mut(src) {
            map.remove(dst);
        }
        removed
    }

    /// 获取顶点的邻居序列，未知顶点返回空序列
    pub fn neighbors(&self, v: &V) -> &[V] {
        self.outgoing.get(v).map(|list| list.as_slice()).unwrap_or(&[])
    }

    /// 判断邻接条目是否存在（线性扫描，开销与度数成正比）
    pub fn has_edge(&self, src: &V, dst: &V) -> bool {
        self.neighbors(src).contains(dst)
    }

    /// 获取权重记录，从未设置时返回 None
    pub fn weight(&self, src: &V, dst: &V) -> Option<Weight> {
        self.weights.get(src).and_then(|map| map.get(dst)).copied()
    }

    /// 判断顶点是否存在
    pub fn contains(&self, v: &V) -> bool {
        self.outgoing.contains_key(v)
    }

    /// 按插入顺序遍历所有顶点
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.outgoing.keys()
    }

    /// 获取顶点的插入序号
    pub fn position_of(&self, v: &V) -> Option<usize> {
        self.outgoing.get_index_of(v)
    }

    /// 按插入序号获取顶点
    pub fn vertex_at(&self, index: usize) -> Option<&V> {
        self.outgoing.get_index(index).map(|(v, _)| v)
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    /// 获取邻接条目总数（含平行边）
    pub fn entry_count(&self) -> usize {
        self.outgoing.values().map(|list| list.len()).sum()
    }
}

impl<V: VertexKey> Default for AdjacencyIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}
