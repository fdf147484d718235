use crate::error::Error;

/// Which slice of the dependency catalog a run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// The whole account: no database or schema restriction.
    Global,
    /// One database, optionally narrowed to one schema within it.
    Database {
        database: String,
        schema: Option<String>,
    },
    /// Anchored at one named object; the traversal starts there.
    Object {
        database: String,
        schema: String,
        name: String,
    },
}

impl Scope {
    /// Build the scope for a run from the active profile and the optional
    /// starting-object argument.
    ///
    /// A starting object without both a database and a schema in the profile
    /// is a caller error, rejected here before any query text exists.
    pub fn resolve(
        database: Option<&str>,
        schema: Option<&str>,
        start: Option<&str>,
    ) -> Result<Self, Error> {
        match start {
            Some(name) => match (database, schema) {
                (Some(db), Some(sch)) => Ok(Scope::Object {
                    database: db.to_owned(),
                    schema: sch.to_owned(),
                    name: name.to_owned(),
                }),
                _ => Err(Error::ScopeViolation(name.to_owned())),
            },
            None => match database {
                Some(db) => Ok(Scope::Database {
                    database: db.to_owned(),
                    schema: schema.map(str::to_owned),
                }),
                None => Ok(Scope::Global),
            },
        }
    }

    /// True when the run is anchored at a single starting object.
    pub fn is_object_rooted(&self) -> bool {
        matches!(self, Scope::Object { .. })
    }

    /// Render an endpoint's qualified name under this scope.
    ///
    /// Segments the scope already fixes are dropped to keep labels short: a
    /// fixed database leaves `schema.name`, a fixed database and schema leave
    /// the bare name. Object-rooted traversals always show the full
    /// three-part name since they may cross schemas and databases.
    pub fn qualified_name(&self, database: &str, schema: &str, name: &str) -> String {
        match self {
            Scope::Database {
                schema: Some(_), ..
            } => name.to_owned(),
            Scope::Database { schema: None, .. } => format!("{schema}.{name}"),
            Scope::Global | Scope::Object { .. } => format!("{database}.{schema}.{name}"),
        }
    }
}

/// Traversal direction for object-rooted scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// What the starting object depends on, transitively (toward roots).
    #[default]
    Forward,
    /// What depends on the starting object, transitively (toward leaves).
    Reverse,
}

impl Direction {
    pub fn is_reverse(self) -> bool {
        matches!(self, Direction::Reverse)
    }
}
