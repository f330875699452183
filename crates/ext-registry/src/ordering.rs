//! Topological ordering over the declared load-after graph.
//!
//! Extension packages declare which other extension packages they must load
//! after. The loader configuration has to list shared-library files in an
//! order that honors every such declaration, and it has to list them in the
//! *same* order on every regeneration so the artifact diffs cleanly. This
//! module provides the graph structure and a deterministic topological sort
//! for that.
//!
//! # Example
//!
//! ```
//! use std::collections::{BTreeMap, BTreeSet};
//! use ext_registry::ordering::topological_order;
//!
//! let mut deps = BTreeMap::new();
//! deps.insert("intl".to_string(), BTreeSet::from(["unicode-base".to_string()]));
//!
//! let order = topological_order(&deps).unwrap();
//! assert_eq!(order, vec!["unicode-base", "intl"]);
//! ```

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap};

use crate::error::{Error, Result};

/// Directed graph of load-order dependencies between named packages.
///
/// Edges point from dependent to dependency: if A must load after B, the
/// edge is `A -> B` and the sort places B before A. Nodes are remembered in
/// the order they are first mentioned, and ties between unconstrained nodes
/// are broken by that discovery order, so the same input always produces
/// the same output.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    names: Vec<String>,
    index: HashMap<String, usize>,
    /// deps[i] holds the node indices that node i must load after.
    deps: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Create an empty dependency graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a dependency mapping.
    ///
    /// Dependency names that are not themselves keys in the mapping are
    /// still added as nodes with no further dependencies, so a package may
    /// declare a load-after requirement on something not separately
    /// tracked.
    pub fn from_dependencies(dependencies: &BTreeMap<String, BTreeSet<String>>) -> Self {
        let mut graph = Self::new();
        for (name, requires) in dependencies {
            graph.add_node(name);
            for dep in requires {
                graph.add_edge(name, dep);
            }
        }
        graph
    }

    /// Add a node to the graph. Re-adding an existing name is a no-op.
    pub fn add_node(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        self.deps.push(Vec::new());
        idx
    }

    /// Declare that `from` must load after `to`.
    ///
    /// Both nodes are created if missing. Duplicate declarations are
    /// collapsed to a single edge.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let from_idx = self.add_node(from);
        let to_idx = self.add_node(to);
        if !self.deps[from_idx].contains(&to_idx) {
            self.deps[from_idx].push(to_idx);
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Perform a topological sort using Kahn's algorithm.
    ///
    /// Returns every node exactly once, dependencies first: if A must load
    /// after B, B appears before A. Nodes with no ordering constraint
    /// between them come out in discovery order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CycleDetected`] naming the participating nodes when
    /// no valid linear order exists. No partial order is produced.
    pub fn sort(&self) -> Result<Vec<String>> {
        let mut pending: Vec<usize> = self.deps.iter().map(|d| d.len()).collect();

        // Reverse adjacency: dependents[i] = nodes that load after node i
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); self.names.len()];
        for (from, deps) in self.deps.iter().enumerate() {
            for &to in deps {
                dependents[to].push(from);
            }
        }

        // Min-heap over discovery index keeps ties deterministic
        let mut ready: BinaryHeap<Reverse<usize>> = pending
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count == 0)
            .map(|(idx, _)| Reverse(idx))
            .collect();

        let mut order = Vec::with_capacity(self.names.len());
        while let Some(Reverse(idx)) = ready.pop() {
            order.push(self.names[idx].clone());
            for &dependent in &dependents[idx] {
                pending[dependent] -= 1;
                if pending[dependent] == 0 {
                    ready.push(Reverse(dependent));
                }
            }
        }

        if order.len() != self.names.len() {
            let placed: BTreeSet<&str> = order.iter().map(|n| n.as_str()).collect();
            let mut participants: Vec<String> = self
                .names
                .iter()
                .filter(|n| !placed.contains(n.as_str()))
                .cloned()
                .collect();
            participants.sort();
            return Err(Error::CycleDetected { participants });
        }

        Ok(order)
    }
}

/// Sort a dependency mapping into load order.
///
/// Convenience wrapper over [`DependencyGraph::from_dependencies`] and
/// [`DependencyGraph::sort`].
pub fn topological_order(dependencies: &BTreeMap<String, BTreeSet<String>>) -> Result<Vec<String>> {
    DependencyGraph::from_dependencies(dependencies).sort()
}
