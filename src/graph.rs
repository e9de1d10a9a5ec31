//! Builds the undirected pattern graph from a [`Catalog`].
//!
//! One node per categorized pattern, one edge per declared relationship
//! whose endpoints are both categorized. Reverse and repeated declarations
//! collapse into a single edge.

use crate::catalog::{Catalog, DanglingRelationship};
use crate::model::{Category, PatternNode};
use indexmap::IndexMap;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// What the builder skipped while materialising edges.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub dropped: Vec<DanglingRelationship>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatternGraph {
    graph: UnGraph<PatternNode, ()>,
    index: IndexMap<String, NodeIndex>,
}

impl PatternGraph {
    pub fn build(catalog: &Catalog) -> Self {
        Self::build_with_report(catalog).0
    }

    pub fn build_with_report(catalog: &Catalog) -> (Self, BuildReport) {
        let mut graph = UnGraph::new_undirected();
        let mut index = IndexMap::new();

        for (name, category) in catalog.categories() {
            let idx = graph.add_node(PatternNode::new(name, category));
            index.insert(name.to_string(), idx);
        }

        let mut report = BuildReport::default();
        for (source, related) in catalog.relationships() {
            for target in related {
                match (index.get(source), index.get(target.as_str())) {
                    (Some(&a), Some(&b)) => {
                        // update_edge keeps the graph free of parallel edges
                        graph.update_edge(a, b, ());
                    }
                    (a, b) => {
                        let mut missing = Vec::new();
                        if a.is_none() {
                            missing.push(source.to_string());
                        }
                        if b.is_none() {
                            missing.push(target.clone());
                        }
                        tracing::warn!(
                            from = source,
                            to = target.as_str(),
                            missing = ?missing,
                            "Dropping relationship to uncategorized pattern"
                        );
                        report.dropped.push(DanglingRelationship {
                            source: source.to_string(),
                            target: target.clone(),
                            missing,
                        });
                    }
                }
            }
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            dropped = report.dropped.len(),
            "Built pattern graph"
        );

        (Self { graph, index }, report)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in catalog order.
    pub fn nodes(&self) -> impl Iterator<Item = &PatternNode> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Each undirected edge once, as `(source, target)` in the direction it
    /// was first declared.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].name.as_str(),
                self.graph[edge.target()].name.as_str(),
            )
        })
    }

    /// Edges as node positions (indices into [`PatternGraph::nodes`]).
    pub fn edge_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source().index(), edge.target().index()))
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    pub fn category_of(&self, name: &str) -> Option<Category> {
        self.index.get(name).map(|&idx| self.graph[idx].category)
    }

    pub fn nodes_in(&self, category: Category) -> impl Iterator<Item = &PatternNode> {
        self.nodes().filter(move |node| node.category == category)
    }

    /// Number of distinct neighbours, or `None` for an unknown pattern.
    pub fn degree(&self, name: &str) -> Option<usize> {
        self.index
            .get(name)
            .map(|&idx| self.graph.neighbors(idx).count())
    }

    /// Patterns with no relationships at all.
    pub fn isolated(&self) -> impl Iterator<Item = &PatternNode> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors(idx).next().is_none())
            .map(|idx| &self.graph[idx])
    }
}
