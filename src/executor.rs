use anyhow::Result;

use crate::row::RawRow;

/// Executes generated SQL against the dependency catalog and returns the raw
/// result rows in server order.
///
/// Implementors report their own failures (connectivity, SQL syntax,
/// authorization); the core propagates them unchanged and never retries.
pub trait QueryExecutor {
    fn execute(&mut self, sql: &str) -> Result<Vec<RawRow>>;
}
