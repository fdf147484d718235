pub mod edge;
pub mod node;

use std::collections::HashMap;

use petgraph::Directed;
use petgraph::stable_graph::{NodeIndex, StableGraph};

use crate::row::{EdgeRow, Endpoint};
use crate::scope::{Direction, Scope};
use edge::ResolutionKind;
use node::ObjectNode;

/// Dedup key: rendered qualified name + lower-cased kind.
type NodeKey = (String, String);

/// The dependency graph for one invocation: a directed petgraph StableGraph
/// with an O(1) identity index over (name, kind).
///
/// Built once from the result rows, read once by the serializer, then
/// discarded — nothing is persisted.
pub struct DependencyGraph {
    pub graph: StableGraph<ObjectNode, ResolutionKind, Directed>,
    index: HashMap<NodeKey, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Build the graph from parsed rows, in row order.
    ///
    /// Both endpoints of every row are interned (referenced side first), then
    /// one classified edge is attached: referencing -> referenced for forward
    /// traversals, flipped for reverse so that reverse graphs read in the
    /// same dependent-to-dependency sense once rendered with reversed
    /// arrowheads. Self-edges and repeated pairs are kept as-is.
    pub fn build(scope: &Scope, direction: Direction, rows: &[EdgeRow]) -> Self {
        let mut g = Self::new();
        for row in rows {
            let referenced = g.intern(scope, &row.referenced);
            let referencing = g.intern(scope, &row.referencing);
            let (src, dst) = if direction.is_reverse() {
                (referenced, referencing)
            } else {
                (referencing, referenced)
            };
            g.graph.add_edge(src, dst, row.resolution);
        }
        g
    }

    /// Intern an endpoint, reusing the existing node when this (name, kind)
    /// has been seen before.
    fn intern(&mut self, scope: &Scope, ep: &Endpoint) -> NodeIndex {
        let name = scope.qualified_name(&ep.database, &ep.schema, &ep.name);
        let kind = ep.domain.to_lowercase();
        let key = (name, kind);
        if let Some(&existing) = self.index.get(&key) {
            return existing;
        }
        let idx = self.graph.add_node(ObjectNode {
            name: key.0.clone(),
            kind: key.1.clone(),
        });
        self.index.insert(key, idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Outgoing targets of `idx` carrying `kind`, in insertion (row) order.
    ///
    /// Walks global edge indices rather than the adjacency list: StableGraph
    /// edge indices follow insertion order, while per-node adjacency iterates
    /// most-recent-first.
    pub fn targets_by_kind(&self, idx: NodeIndex, kind: ResolutionKind) -> Vec<NodeIndex> {
        self.graph
            .edge_indices()
            .filter_map(|e| {
                let (src, dst) = self.graph.edge_endpoints(e)?;
                (src == idx && self.graph[e] == kind).then_some(dst)
            })
            .collect()
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
