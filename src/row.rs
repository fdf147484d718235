use crate::error::Error;
use crate::graph::edge::ResolutionKind;

/// A raw result row as returned by the query collaborator: 11 positional
/// string-or-null fields, in the catalog view's column order.
pub type RawRow = Vec<Option<String>>;

/// Column names of the catalog view, used for malformed-row messages.
const COLUMNS: [&str; 11] = [
    "referenced_database",
    "referenced_schema",
    "referenced_object_name",
    "referenced_object_id",
    "referenced_object_domain",
    "referencing_database",
    "referencing_schema",
    "referencing_object_name",
    "referencing_object_id",
    "referencing_object_domain",
    "dependency_type",
];

/// One endpoint of a dependency edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub database: String,
    pub schema: String,
    pub name: String,
    pub id: String,
    pub domain: String,
}

/// One dependency edge from the catalog: the depended-upon object, the
/// dependent object, and how the catalog resolved the relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRow {
    pub referenced: Endpoint,
    pub referencing: Endpoint,
    pub resolution: ResolutionKind,
}

impl EdgeRow {
    /// Parse one raw row. Any missing field or unknown dependency type is a
    /// `MalformedRow`, which aborts the whole build.
    pub fn parse(row: &RawRow) -> Result<Self, Error> {
        if row.len() != COLUMNS.len() {
            return Err(Error::MalformedRow(format!(
                "expected {} columns, got {}",
                COLUMNS.len(),
                row.len()
            )));
        }
        Ok(EdgeRow {
            referenced: endpoint(row, 0)?,
            referencing: endpoint(row, 5)?,
            resolution: field(row, 10)?.parse()?,
        })
    }

    /// Parse every row, failing fast on the first malformed one.
    pub fn parse_all(rows: &[RawRow]) -> Result<Vec<EdgeRow>, Error> {
        rows.iter().map(Self::parse).collect()
    }
}

fn field(row: &RawRow, idx: usize) -> Result<String, Error> {
    row[idx]
        .clone()
        .ok_or_else(|| Error::MalformedRow(format!("null {}", COLUMNS[idx])))
}

fn endpoint(row: &RawRow, base: usize) -> Result<Endpoint, Error> {
    Ok(Endpoint {
        database: field(row, base)?,
        schema: field(row, base + 1)?,
        name: field(row, base + 2)?,
        id: field(row, base + 3)?,
        domain: field(row, base + 4)?,
    })
}

#[cfg(test)]
pub(crate) fn raw(fields: [&str; 11]) -> RawRow {
    fields.iter().map(|s| Some((*s).to_string())).collect()
}
