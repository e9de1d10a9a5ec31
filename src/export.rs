//! JSON export of the pattern graph, in the `{nodes, links}` shape that
//! force-graph style web viewers consume.

use crate::error::Result;
use crate::graph::PatternGraph;
use crate::model::UNKNOWN_CATEGORY;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDocument {
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<LinkRecord>,
}

impl NetworkDocument {
    pub fn from_graph(graph: &PatternGraph) -> Self {
        let nodes = graph
            .nodes()
            .map(|node| NodeRecord {
                id: node.name.clone(),
                category: graph
                    .category_of(&node.name)
                    .map(|c| c.label())
                    .unwrap_or(UNKNOWN_CATEGORY)
                    .to_string(),
            })
            .collect();

        let links = graph
            .edges()
            .map(|(source, target)| LinkRecord {
                source: source.to_string(),
                target: target.to_string(),
            })
            .collect();

        Self { nodes, links }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let mut content = self.to_json()?;
        content.push('\n');
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Serialize `graph` to `path` as pretty-printed JSON.
pub fn export(graph: &PatternGraph, path: &Path) -> Result<()> {
    let document = NetworkDocument::from_graph(graph);
    document.write(path)?;
    tracing::info!(
        path = %path.display(),
        nodes = document.nodes.len(),
        links = document.links.len(),
        "Wrote network data"
    );
    Ok(())
}
