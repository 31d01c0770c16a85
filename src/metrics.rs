//! 性能指标收集模块
//!
//! 提供图操作和算法运行计数的收集和导出功能

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// 系统全局指标
#[derive(Debug)]
pub struct Metrics {
    /// 图操作统计
    graph_stats: GraphStats,
    /// 算法运行统计
    algorithm_stats: AlgorithmStats,
    /// 启动时间
    start_time: Instant,
}

/// 图操作统计
#[derive(Debug)]
struct GraphStats {
    /// 顶点插入数
    vertices_inserted: AtomicU64,
    /// 边插入数
    edges_inserted: AtomicU64,
    /// 边删除数
    edges_removed: AtomicU64,
}

/// 算法运行统计
#[derive(Debug)]
struct AlgorithmStats {
    /// BFS 运行数
    bfs_runs: AtomicU64,
    /// DFS 运行数
    dfs_runs: AtomicU64,
    /// Dijkstra 运行数
    dijkstra_runs: AtomicU64,
    /// 连通性检测数
    connectivity_checks: AtomicU64,
    /// 环检测数
    cycle_checks: AtomicU64,
    /// 拓扑排序数
    topo_sorts: AtomicU64,
}

/// 可导出的指标快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    // 图操作指标
    pub vertices_inserted: u64,
    pub edges_inserted: u64,
    pub edges_removed: u64,

    // 算法运行指标
    pub bfs_runs: u64,
    pub dfs_runs: u64,
    pub dijkstra_runs: u64,
    pub connectivity_checks: u64,
    pub cycle_checks: u64,
    pub topo_sorts: u64,

    // 系统指标
    pub uptime_seconds: u64,
}

/// Prometheus 格式指标
#[derive(Debug, Clone)]
pub struct PrometheusMetrics {
    pub content: String,
}

impl Metrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            graph_stats: GraphStats {
                vertices_inserted: AtomicU64::new(0),
                edges_inserted: AtomicU64::new(0),
                edges_removed: AtomicU64::new(0),
            },
            algorithm_stats: AlgorithmStats {
                bfs_runs: AtomicU64::new(0),
                dfs_runs: AtomicU64::new(0),
                dijkstra_runs: AtomicU64::new(0),
                connectivity_checks: AtomicU64::new(0),
                cycle_checks: AtomicU64::new(0),
                topo_sorts: AtomicU64::new(0),
            },
            start_time: Instant::now(),
        }
    }

    /// 记录顶点插入
    pub fn record_vertex_insert(&self) {
        self.graph_stats
            .vertices_inserted
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 记录边插入
    pub fn record_edge_insert(&self) {
        self.graph_stats
            .edges_inserted
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 记录边删除
    pub fn record_edge_remove(&self) {
        self.graph_stats
            .edges_removed
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 记录 BFS 运行
    pub fn record_bfs_run(&self) {
        self.algorithm_stats.bfs_runs.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录 DFS 运行
    pub fn record_dfs_run(&self) {
        self.algorithm_stats.dfs_runs.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录 Dijkstra 运行
    pub fn record_dijkstra_run(&self) {
        self.algorithm_stats
            .dijkstra_runs
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 记录连通性检测
    pub fn record_connectivity_check(&self) {
        self.algorithm_stats
            .connectivity_checks
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 记录环检测
    pub fn record_cycle_check(&self) {
        self.algorithm_stats
            .cycle_checks
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 记录拓扑排序
    pub fn record_topo_sort(&self) {
        self.algorithm_stats
            .topo_sorts
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            vertices_inserted: self.graph_stats.vertices_inserted.load(Ordering::Relaxed),
            edges_inserted: self.graph_stats.edges_inserted.load(Ordering::Relaxed),
            edges_removed: self.graph_stats.edges_removed.load(Ordering::Relaxed),
            bfs_runs: self.algorithm_stats.bfs_runs.load(Ordering::Relaxed),
            dfs_runs: self.algorithm_stats.dfs_runs.load(Ordering::Relaxed),
            dijkstra_runs: self.algorithm_stats.dijkstra_runs.load(Ordering::Relaxed),
            connectivity_checks: self
                .algorithm_stats
                .connectivity_checks
                .load(Ordering::Relaxed),
            cycle_checks: self.algorithm_stats.cycle_checks.load(Ordering::Relaxed),
            topo_sorts: self.algorithm_stats.topo_sorts.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 导出为 Prometheus 格式
    pub fn to_prometheus(&self) -> PrometheusMetrics {
        let snapshot = self.snapshot();

        let mut content = String::new();

        // 图操作指标
        content.push_str("# HELP litegraph_vertices_inserted_total Total vertices inserted\n");
        content.push_str("# TYPE litegraph_vertices_inserted_total counter\n");
        content.push_str(&format!(
            "litegraph_vertices_inserted_total {}\n",
            snapshot.vertices_inserted
        ));

        content.push_str("# HELP litegraph_edges_inserted_total Total edges inserted\n");
        content.push_str("# TYPE litegraph_edges_inserted_total counter\n");
        content.push_str(&format!(
            "litegraph_edges_inserted_total {}\n",
            snapshot.edges_inserted
        ));

        content.push_str("# HELP litegraph_edges_removed_total Total edges removed\n");
        content.push_str("# TYPE litegraph_edges_removed_total counter\n");
        content.push_str(&format!(
            "litegraph_edges_removed_total {}\n",
            snapshot.edges_removed
        ));

        // 算法运行指标
        content.push_str("# HELP litegraph_bfs_runs_total Number of BFS traversals\n");
        content.push_str("# TYPE litegraph_bfs_runs_total counter\n");
        content.push_str(&format!("litegraph_bfs_runs_total {}\n", snapshot.bfs_runs));

        content.push_str("# HELP litegraph_dfs_runs_total Number of DFS traversals\n");
        content.push_str("# TYPE litegraph_dfs_runs_total counter\n");
        content.push_str(&format!("litegraph_dfs_runs_total {}\n", snapshot.dfs_runs));

        content.push_str("# HELP litegraph_dijkstra_runs_total Number of Dijkstra runs\n");
        content.push_str("# TYPE litegraph_dijkstra_runs_total counter\n");
        content.push_str(&format!(
            "litegraph_dijkstra_runs_total {}\n",
            snapshot.dijkstra_runs
        ));

        content.push_str("# HELP litegraph_connectivity_checks_total Number of connectivity checks\n");
        content.push_str("# TYPE litegraph_connectivity_checks_total counter\n");
        content.push_str(&format!(
            "litegraph_connectivity_checks_total {}\n",
            snapshot.connectivity_checks
        ));

        content.push_str("# HELP litegraph_cycle_checks_total Number of cycle checks\n");
        content.push_str("# TYPE litegraph_cycle_checks_total counter\n");
        content.push_str(&format!(
            "litegraph_cycle_checks_total {}\n",
            snapshot.cycle_checks
        ));

        content.push_str("# HELP litegraph_topo_sorts_total Number of topological sorts\n");
        content.push_str("# TYPE litegraph_topo_sorts_total counter\n");
        content.push_str(&format!(
            "litegraph_topo_sorts_total {}\n",
            snapshot.topo_sorts
        ));

        // 系统指标
        content.push_str("# HELP litegraph_uptime_seconds System uptime in seconds\n");
        content.push_str("# TYPE litegraph_uptime_seconds counter\n");
        content.push_str(&format!(
            "litegraph_uptime_seconds {}\n",
            snapshot.uptime_seconds
        ));

        PrometheusMetrics { content }
    }

    /// 重置所有指标
    pub fn reset(&self) {
        self.graph_stats.vertices_inserted.store(0, Ordering::Relaxed);
        self.graph_stats.edges_inserted.store(0, Ordering::Relaxed);
        self.graph_stats.edges_removed.store(0, Ordering::Relaxed);

        self.algorithm_stats.bfs_runs.store(0, Ordering::Relaxed);
        self.algorithm_stats.dfs_runs.store(0, Ordering::Relaxed);
        self.algorithm_stats.dijkstra_runs.store(0, Ordering::Relaxed);
        self.algorithm_stats
            .connectivity_checks
            .store(0, Ordering::Relaxed);
        self.algorithm_stats.cycle_checks.store(0, Ordering::Relaxed);
        self.algorithm_stats.topo_sorts.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 全局指标实例
static METRICS: Lazy<Arc<Metrics>> = Lazy::new(|| Arc::new(Metrics::new()));

/// 获取全局指标实例
pub fn global_metrics() -> Arc<Metrics> {
    METRICS.clone()
}
