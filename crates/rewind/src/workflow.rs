/// Workflow builder state captured as whole-value snapshots.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A step in the workflow graph.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub id: String,
    /// Node type, e.g. `"trigger"` or `"send-webhook"`.
    pub kind: String,
    #[serde(default)]
    pub label: String,
    /// Free-form node settings edited in the side panel.
    #[serde(default)]
    pub config: Value,
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Everything the builder tracks for undo: graph, name and description.
///
/// Selection and publish status are not part of the snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowSnapshot {
    pub nodes: Vec<WorkflowNode>,
    pub edges: Vec<WorkflowEdge>,
    pub name: String,
    pub description: String,
}

impl WorkflowSnapshot {
    pub fn with_node(&self, node: WorkflowNode) -> Self {
        let mut next = self.clone();
        next.nodes.push(node);
        next
    }

    /// Removes a node together with every edge attached to it.
    pub fn without_node(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.nodes.retain(|n| n.id != id);
        next.edges.retain(|e| e.source != id && e.target != id);
        next
    }

    pub fn with_edge(&self, edge: WorkflowEdge) -> Self {
        let mut next = self.clone();
        next.edges.push(edge);
        next
    }

    pub fn without_edge(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.edges.retain(|e| e.id != id);
        next
    }

    pub fn renamed(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..self.clone()
        }
    }

    pub fn described(&self, description: &str) -> Self {
        Self {
            description: description.to_string(),
            ..self.clone()
        }
    }

    /// Replaces a node's config. Unknown ids leave the workflow unchanged.
    pub fn with_node_config(&self, id: &str, config: Value) -> Self {
        let mut next = self.clone();
        if let Some(node) = next.nodes.iter_mut().find(|n| n.id == id) {
            node.config = config;
        }
        next
    }
}
