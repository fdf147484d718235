use thiserror::Error;

/// Errors produced by the graph core itself. Failures of the query
/// collaborator (connectivity, SQL syntax, authorization) travel as
/// `anyhow` errors and are propagated to the caller unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// A starting object was named without both a database and a schema in
    /// the active profile. Rejected before any query text is generated.
    #[error(
        "you must connect with both a database and a schema when referencing one object ('{0}')"
    )]
    ScopeViolation(String),

    /// A result row is missing a required field, carries an unknown
    /// dependency type, or has the wrong arity. Aborts the whole build;
    /// no partial graph is emitted.
    #[error("malformed dependency row: {0}")]
    MalformedRow(String),
}

/// Process exit status for a rejected object-rooted scope.
pub const SCOPE_VIOLATION_EXIT: i32 = 2;
