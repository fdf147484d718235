/// One deduplicated catalog object under the active scope.
///
/// Identity is structural: two endpoints with the same rendered qualified
/// name and (lower-cased) kind are the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectNode {
    /// Qualified name as rendered under the query's scope.
    pub name: String,
    /// Lower-cased object domain: "table", "view", "function", ...
    pub kind: String,
}

impl ObjectNode {
    /// The quoted DOT label: name over kind, e.g. `"D.S.T\n(table)"`.
    pub fn dot_label(&self) -> String {
        format!("\"{}\\n({})\"", escape(&self.name), escape(&self.kind))
    }
}

/// Escape backslashes and quotes so arbitrary object names stay inside a
/// quoted DOT string.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
