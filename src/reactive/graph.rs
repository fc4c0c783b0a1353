use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Dependency declarations
// ---------------------------------------------------------------------------

/// What a node reads: a raw input or the output of another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dependency<N, I> {
    Input(I),
    Node(N),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node {0} is declared more than once")]
    Duplicate(String),
    #[error("node {node} depends on undeclared node {dependency}")]
    UnknownDependency { node: String, dependency: String },
    #[error("dependency cycle involving {0}")]
    Cycle(String),
}

/// Collects node declarations, then validates them into a [`DependencyGraph`].
#[derive(Debug)]
pub struct GraphBuilder<N, I> {
    nodes: Vec<(N, BTreeSet<Dependency<N, I>>)>,
}

impl<N, I> Default for GraphBuilder<N, I> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<N, I> GraphBuilder<N, I>
where
    N: Copy + Ord + Debug,
    I: Copy + Ord + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `node` with the full set of things it reads.
    pub fn node(mut self, node: N, deps: impl IntoIterator<Item = Dependency<N, I>>) -> Self {
        self.nodes.push((node, deps.into_iter().collect()));
        self
    }

    /// Validate the declarations and fix a topological order.
    ///
    /// Among nodes that are ready at the same time, declaration order wins,
    /// so the resulting order is deterministic.
    pub fn build(self) -> Result<DependencyGraph<N, I>, GraphError> {
        let mut deps: BTreeMap<N, BTreeSet<Dependency<N, I>>> = BTreeMap::new();
        for (node, node_deps) in &self.nodes {
            if deps.insert(*node, node_deps.clone()).is_some() {
                return Err(GraphError::Duplicate(format!("{node:?}")));
            }
        }
        for (node, node_deps) in &self.nodes {
            for dep in node_deps {
                if let Dependency::Node(upstream) = dep {
                    if !deps.contains_key(upstream) {
                        return Err(GraphError::UnknownDependency {
                            node: format!("{node:?}"),
                            dependency: format!("{upstream:?}"),
                        });
                    }
                }
            }
        }

        // Kahn's algorithm over node→node edges.
        let mut order: Vec<N> = Vec::with_capacity(self.nodes.len());
        let mut placed: BTreeSet<N> = BTreeSet::new();
        while order.len() < self.nodes.len() {
            let next = self.nodes.iter().find(|(node, node_deps)| {
                !placed.contains(node)
                    && node_deps.iter().all(|dep| match dep {
                        Dependency::Node(upstream) => placed.contains(upstream),
                        Dependency::Input(_) => true,
                    })
            });
            match next {
                Some((node, _)) => {
                    placed.insert(*node);
                    order.push(*node);
                }
                None => {
                    let stuck = self
                        .nodes
                        .iter()
                        .map(|(node, _)| node)
                        .find(|node| !placed.contains(node))
                        .map(|node| format!("{node:?}"))
                        .unwrap_or_default();
                    return Err(GraphError::Cycle(stuck));
                }
            }
        }

        Ok(DependencyGraph { order, deps })
    }
}

// ---------------------------------------------------------------------------
// DependencyGraph
// ---------------------------------------------------------------------------

/// A validated, acyclic set of node declarations.
#[derive(Debug, Clone)]
pub struct DependencyGraph<N, I> {
    order: Vec<N>,
    deps: BTreeMap<N, BTreeSet<Dependency<N, I>>>,
}

impl<N, I> DependencyGraph<N, I>
where
    N: Copy + Ord + Debug,
    I: Copy + Ord + Debug,
{
    pub fn builder() -> GraphBuilder<N, I> {
        GraphBuilder::new()
    }

    /// Every node, upstream before downstream.
    pub fn topological_order(&self) -> &[N] {
        &self.order
    }

    /// Nodes that must be recomputed after `changed` inputs moved, in
    /// topological order. Nodes depending on no changed input, directly or
    /// through another node, are left out.
    pub fn affected_by(&self, changed: &BTreeSet<I>) -> Vec<N> {
        let mut dirty: BTreeSet<N> = BTreeSet::new();
        for node in &self.order {
            let is_dirty = self.deps[node].iter().any(|dep| match dep {
                Dependency::Input(input) => changed.contains(input),
                Dependency::Node(upstream) => dirty.contains(upstream),
            });
            if is_dirty {
                dirty.insert(*node);
            }
        }
        self.order
            .iter()
            .copied()
            .filter(|node| dirty.contains(node))
            .collect()
    }
}
