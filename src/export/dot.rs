use std::fmt::Write;

use crate::graph::DependencyGraph;
use crate::graph::edge::ResolutionKind;
use crate::scope::{Direction, Scope};

/// Render the dependency graph as a DOT digraph.
///
/// Layout runs left-to-right for global/database views (breadth) and
/// top-to-bottom for object-rooted traversals (depth of a chain). Reverse
/// traversals render with `dir="back"`, compensating for the builder's
/// attachment flip so arrowheads always point from dependent to dependency.
///
/// Node declarations come out in node-insertion order, then each node's
/// edges grouped BY_ID, BY_NAME, BY_NAME_AND_ID with every list in row
/// order — the output is deterministic for a given result set.
pub fn render_dot(graph: &DependencyGraph, scope: &Scope, direction: Direction) -> String {
    let rankdir = if scope.is_object_rooted() { "TB" } else { "LR" };
    let dir = if direction.is_reverse() {
        "back"
    } else {
        "forward"
    };

    let mut out = String::new();
    writeln!(out, "digraph G {{").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  graph [ rankdir=\"{rankdir}\" bgcolor=\"#ffffff\" ]").unwrap();
    writeln!(
        out,
        "  node [ style=\"filled\" shape=\"record\" color=\"SkyBlue\" ]"
    )
    .unwrap();
    writeln!(
        out,
        "  edge [ penwidth=\"1\" color=\"#696969\" dir=\"{dir}\" ]"
    )
    .unwrap();
    writeln!(out).unwrap();

    for idx in graph.graph.node_indices() {
        writeln!(out, "  {};", graph.graph[idx].dot_label()).unwrap();
    }
    writeln!(out).unwrap();

    for idx in graph.graph.node_indices() {
        for kind in ResolutionKind::ALL {
            for target in graph.targets_by_kind(idx, kind) {
                writeln!(
                    out,
                    "  {} -> {} [ style=\"{}\" ];",
                    graph.graph[idx].dot_label(),
                    graph.graph[target].dot_label(),
                    kind.dot_style(),
                )
                .unwrap();
            }
        }
    }
    writeln!(out, "}}").unwrap();
    out
}
