// 🔗 Component Resolver - connected components of the relation graph
// Breadth-first from each unvisited node, in node order. O(V + E).

use crate::graph::RelationGraph;
use std::collections::{HashMap, VecDeque};

/// Components - disjoint member lists plus the reverse index
#[derive(Debug, Clone, Default)]
pub struct Components {
    /// Members per component, in traversal order
    pub groups: Vec<Vec<String>>,

    /// Identifier → component index
    pub index: HashMap<String, usize>,
}

impl Components {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn component_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }
}

/// Partition the graph into connected components.
///
/// Components come out in order of discovery. A node is marked visited
/// when queued, so it lands in exactly one component.
pub fn connected_components(graph: &RelationGraph) -> Components {
    let mut visited = vec![false; graph.node_count()];
    let mut components = Components::default();
    let mut queue = VecDeque::new();

    for start in 0..graph.node_count() {
        if visited[start] {
            continue;
        }

        let idx = components.groups.len();
        let mut group = Vec::new();
        visited[start] = true;
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            let id = graph.label(node).to_string();
            components.index.insert(id.clone(), idx);
            group.push(id);

            for next in graph.neighbors(node) {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }

        components.groups.push(group);
    }

    components
}
