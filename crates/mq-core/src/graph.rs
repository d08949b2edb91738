//! Migration dependency graph and its structural analyses

use crate::error::{CoreError, CoreResult};
use crate::migration::MigrationRecord;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Kind of structural problem found in the migration graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    MultipleHeads,
    Cycle,
    MissingDependency,
    Orphan,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::MultipleHeads => write!(f, "multiple-heads"),
            IssueKind::Cycle => write!(f, "cycle"),
            IssueKind::MissingDependency => write!(f, "missing-dependency"),
            IssueKind::Orphan => write!(f, "orphan"),
        }
    }
}

/// Severity of a graph issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Warning,
    Critical,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueSeverity::Warning => write!(f, "warning"),
            IssueSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// A single problem detected in the migration graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphIssue {
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    pub description: String,
    /// Implicated migration ids, in a deterministic order
    pub nodes: Vec<String>,
}

/// DFS marking used by cycle detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Directed graph of migration dependencies.
///
/// An edge `node -> dependency` means "node depends on dependency". Forward
/// adjacency is a node's outgoing neighbours (its dependencies), reverse
/// adjacency its incoming neighbours (its dependents).
#[derive(Debug, Default)]
pub struct MigrationGraph {
    /// The underlying graph
    graph: DiGraph<String, ()>,

    /// Map from migration id to node index, ordered by id
    node_map: BTreeMap<String, NodeIndex>,

    /// Ids added through `add_node` (i.e. backed by a discovered migration)
    declared: BTreeSet<String>,
}

impl MigrationGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from discovered migration records.
    ///
    /// Every record becomes a declared node; every declared dependency becomes
    /// an edge, even when the dependency does not exist.
    pub fn build(records: &[MigrationRecord]) -> Self {
        let mut graph = Self::new();
        for record in records {
            graph.add_node(record.id.as_str());
        }
        for record in records {
            for dependency in &record.dependencies {
                graph.add_edge(record.id.as_str(), dependency);
            }
        }
        graph
    }

    /// Add a migration to the graph. Idempotent.
    pub fn add_node(&mut self, id: &str) {
        self.ensure_node(id);
        self.declared.insert(id.to_string());
    }

    /// Add a dependency edge (`node` depends on `dependency`). Idempotent.
    pub fn add_edge(&mut self, node: &str, dependency: &str) {
        let from = self.ensure_node(node);
        let to = self.ensure_node(dependency);
        self.graph.update_edge(from, to, ());
    }

    fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.node_map.insert(id.to_string(), idx);
        idx
    }

    /// All node ids, sorted
    pub fn nodes(&self) -> Vec<String> {
        self.node_map.keys().cloned().collect()
    }

    /// Check if a node exists in the graph
    pub fn contains(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }

    /// Number of distinct edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Direct dependencies of a migration, sorted
    pub fn dependencies(&self, id: &str) -> Vec<String> {
        self.neighbours_of(id, Direction::Outgoing)
    }

    /// Direct dependents of a migration, sorted
    pub fn dependents(&self, id: &str) -> Vec<String> {
        self.neighbours_of(id, Direction::Incoming)
    }

    fn neighbours_of(&self, id: &str, direction: Direction) -> Vec<String> {
        match self.node_map.get(id) {
            Some(&idx) => self
                .sorted_neighbours(idx, direction)
                .into_iter()
                .map(|n| self.graph[n].clone())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Neighbour indices ordered by node id
    fn sorted_neighbours(&self, idx: NodeIndex, direction: Direction) -> Vec<NodeIndex> {
        let mut neighbours: Vec<NodeIndex> =
            self.graph.neighbors_directed(idx, direction).collect();
        neighbours.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
        neighbours.dedup();
        neighbours
    }

    fn has_neighbours(&self, idx: NodeIndex, direction: Direction) -> bool {
        self.graph.neighbors_directed(idx, direction).next().is_some()
    }

    /// Nodes nothing depends on (the latest migration of each chain), sorted
    pub fn find_heads(&self) -> Vec<String> {
        self.node_map
            .iter()
            .filter(|(_, &idx)| !self.has_neighbours(idx, Direction::Incoming))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Nodes that depend on nothing, sorted
    pub fn find_roots(&self) -> Vec<String> {
        self.node_map
            .iter()
            .filter(|(_, &idx)| !self.has_neighbours(idx, Direction::Outgoing))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Nodes with neither dependencies nor dependents, sorted
    pub fn find_orphans(&self) -> Vec<String> {
        self.node_map
            .iter()
            .filter(|(_, &idx)| {
                !self.has_neighbours(idx, Direction::Outgoing)
                    && !self.has_neighbours(idx, Direction::Incoming)
            })
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// The head list when the history has diverged (more than one head)
    pub fn detect_multiple_heads(&self) -> Vec<String> {
        let heads = self.find_heads();
        if heads.len() > 1 {
            heads
        } else {
            Vec::new()
        }
    }

    /// Find cycles with an iterative three-colour DFS.
    ///
    /// Start nodes and dependencies are visited in id order. Every edge into
    /// an in-progress node yields one path, so overlapping cycles closed by
    /// different back-edges are all reported.
    pub fn detect_cycles(&self) -> Vec<Vec<String>> {
        let count = self.graph.node_count();
        let mut marks = vec![Mark::Unvisited; count];
        let mut parent: Vec<Option<NodeIndex>> = vec![None; count];
        let mut cycles = Vec::new();

        for &start in self.node_map.values() {
            if marks[start.index()] != Mark::Unvisited {
                continue;
            }

            let mut stack = vec![(start, false)];
            while let Some((node, finished)) = stack.pop() {
                if finished {
                    marks[node.index()] = Mark::Done;
                    continue;
                }
                // Pushed more than once before being expanded
                if marks[node.index()] != Mark::Unvisited {
                    continue;
                }

                marks[node.index()] = Mark::InProgress;
                stack.push((node, true));

                for dep in self.sorted_neighbours(node, Direction::Outgoing) {
                    match marks[dep.index()] {
                        Mark::InProgress => cycles.push(self.cycle_path(dep, node, &parent)),
                        Mark::Unvisited => {
                            parent[dep.index()] = Some(node);
                            stack.push((dep, false));
                        }
                        Mark::Done => {}
                    }
                }
            }
        }

        cycles
    }

    /// Walk parent links back from `node` to the back-edge target, then reverse
    fn cycle_path(
        &self,
        target: NodeIndex,
        node: NodeIndex,
        parent: &[Option<NodeIndex>],
    ) -> Vec<String> {
        if target == node {
            return vec![self.graph[node].clone(), self.graph[node].clone()];
        }
        let mut path = vec![self.graph[target].clone(), self.graph[node].clone()];
        let mut current = parent[node.index()];
        while let Some(idx) = current {
            if idx == target {
                break;
            }
            path.push(self.graph[idx].clone());
            current = parent[idx.index()];
        }
        path.reverse();
        path
    }

    /// `(migration, dependency)` pairs where a declared migration depends on
    /// an id no discovered migration declares.
    ///
    /// Ordered by migration id, then dependency id.
    pub fn missing_dependencies(&self) -> Vec<(String, String)> {
        let mut missing = Vec::new();
        for id in &self.declared {
            let Some(&idx) = self.node_map.get(id) else {
                continue;
            };
            for dep in self.sorted_neighbours(idx, Direction::Outgoing) {
                let dep_id = &self.graph[dep];
                if !self.declared.contains(dep_id) {
                    missing.push((id.clone(), dep_id.clone()));
                }
            }
        }
        missing
    }

    /// Order migrations so every dependency precedes its dependents.
    ///
    /// Kahn's algorithm where the in-degree is the number of dependencies.
    /// Ready nodes are taken smallest id first so the order is deterministic.
    pub fn topological_sort(&self) -> CoreResult<Vec<String>> {
        let mut remaining: Vec<usize> = vec![0; self.graph.node_count()];
        let mut ready: BTreeSet<(&str, NodeIndex)> = BTreeSet::new();

        for (id, &idx) in &self.node_map {
            let degree = self.graph.neighbors_directed(idx, Direction::Outgoing).count();
            remaining[idx.index()] = degree;
            if degree == 0 {
                ready.insert((id.as_str(), idx));
            }
        }

        let mut order = Vec::with_capacity(self.node_map.len());
        while let Some((id, idx)) = ready.pop_first() {
            order.push(id.to_string());
            for dependent in self.graph.neighbors_directed(idx, Direction::Incoming) {
                let slot = &mut remaining[dependent.index()];
                *slot = slot.saturating_sub(1);
                if *slot == 0 {
                    ready.insert((self.graph[dependent].as_str(), dependent));
                }
            }
        }

        if order.len() != self.node_map.len() {
            let unresolved: Vec<&str> = self
                .node_map
                .iter()
                .filter(|(_, &idx)| remaining[idx.index()] > 0)
                .map(|(id, _)| id.as_str())
                .collect();
            return Err(CoreError::CycleDetected {
                unresolved: unresolved.join(", "),
            });
        }

        Ok(order)
    }

    /// Run every structural analysis.
    ///
    /// Issues come out most severe first: multiple heads, cycles, missing
    /// dependencies, then a single combined orphan warning.
    pub fn analyze(&self) -> Vec<GraphIssue> {
        let mut issues = Vec::new();

        let heads = self.detect_multiple_heads();
        if !heads.is_empty() {
            issues.push(GraphIssue {
                kind: IssueKind::MultipleHeads,
                severity: IssueSeverity::Critical,
                description: format!(
                    "Migration graph has {} heads, this will cause merge conflicts. \
                     Create a merge migration to resolve.",
                    heads.len()
                ),
                nodes: heads,
            });
        }

        for cycle in self.detect_cycles() {
            issues.push(GraphIssue {
                kind: IssueKind::Cycle,
                severity: IssueSeverity::Critical,
                description: format!(
                    "Circular dependency detected: {}. This will prevent migrations from running.",
                    cycle.join(" -> ")
                ),
                nodes: cycle,
            });
        }

        for (node, dep) in self.missing_dependencies() {
            issues.push(GraphIssue {
                kind: IssueKind::MissingDependency,
                severity: IssueSeverity::Critical,
                description: format!("Migration '{node}' depends on '{dep}' which does not exist."),
                nodes: vec![node, dep],
            });
        }

        let orphans = self.find_orphans();
        if !orphans.is_empty() {
            issues.push(GraphIssue {
                kind: IssueKind::Orphan,
                severity: IssueSeverity::Warning,
                description: format!(
                    "Found {} orphan migration(s) with no dependencies or dependents.",
                    orphans.len()
                ),
                nodes: orphans,
            });
        }

        issues
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
