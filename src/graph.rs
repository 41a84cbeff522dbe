// 🕸️ Relation Graph - undirected "same as" edges between WISH ids
//
// Built once from the accepted records, then only read.
// Nodes are numbered in first-encounter order (subject, then its references,
// row by row); neighbour sets are ordered by that number, so traversal over
// the graph is deterministic for a given input.

use crate::loader::ChartRecord;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    /// Identifier per node, in first-encounter order
    nodes: Vec<String>,

    /// Identifier → node number
    index: HashMap<String, usize>,

    /// Adjacency sets (symmetric, no self loops)
    neighbors: Vec<BTreeSet<usize>>,
}

impl RelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from accepted records
    pub fn from_records(records: &[ChartRecord]) -> Self {
        let mut graph = RelationGraph::new();
        for record in records {
            graph.add_record(record);
        }
        graph
    }

    /// Ensure the subject exists, then link it to each reference
    pub fn add_record(&mut self, record: &ChartRecord) {
        let subject = self.ensure_node(&record.wish);
        for other in &record.same_as {
            let other = self.ensure_node(other);
            self.link(subject, other);
        }
    }

    /// Node number for `id`, inserting it if new
    pub fn ensure_node(&mut self, id: &str) -> usize {
        if let Some(&n) = self.index.get(id) {
            return n;
        }
        let n = self.nodes.len();
        self.nodes.push(id.to_string());
        self.index.insert(id.to_string(), n);
        self.neighbors.push(BTreeSet::new());
        n
    }

    /// Insert the undirected edge {a, b}. Self loops are ignored.
    pub fn link(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.neighbors[a].insert(b);
        self.neighbors[b].insert(a);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct undirected edges
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_id(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Identifier for a node number
    pub fn label(&self, node: usize) -> &str {
        &self.nodes[node]
    }

    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors[node].iter().copied()
    }

    /// True if `a` and `b` share an edge
    pub fn are_linked(&self, a: &str, b: &str) -> bool {
        match (self.node_id(a), self.node_id(b)) {
            (Some(x), Some(y)) => self.neighbors[x].contains(&y),
            _ => false,
        }
    }
}
