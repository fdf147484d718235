use crate::scope::{Direction, Scope};

/// The catalog view holding one row per object-to-object dependency edge.
const CATALOG: &str = "snowflake.account_usage.object_dependencies";

/// One of the four query templates a run can issue.
///
/// Scope and direction select the variant up front so each template is a
/// distinct, testable case rather than a chain of string appends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
    /// Every edge in the account.
    AllEdges,
    /// Edges whose both endpoints live in one database (and schema, if set).
    ScopedEdges {
        database: String,
        schema: Option<String>,
    },
    /// Recursive closure over what the starting object depends on.
    ForwardClosure {
        database: String,
        schema: String,
        name: String,
    },
    /// Recursive closure over what depends on the starting object.
    ReverseClosure {
        database: String,
        schema: String,
        name: String,
    },
}

impl QueryPlan {
    /// Select the template for a scope and direction. Direction only matters
    /// for object-rooted scopes; elsewhere the full edge slice is fetched and
    /// the builder decides attachment.
    pub fn new(scope: &Scope, direction: Direction) -> Self {
        match scope {
            Scope::Global => QueryPlan::AllEdges,
            Scope::Database { database, schema } => QueryPlan::ScopedEdges {
                database: database.clone(),
                schema: schema.clone(),
            },
            Scope::Object {
                database,
                schema,
                name,
            } => {
                let (database, schema, name) = (database.clone(), schema.clone(), name.clone());
                if direction.is_reverse() {
                    QueryPlan::ReverseClosure {
                        database,
                        schema,
                        name,
                    }
                } else {
                    QueryPlan::ForwardClosure {
                        database,
                        schema,
                        name,
                    }
                }
            }
        }
    }

    /// Render the SQL text for this plan.
    ///
    /// The recursive templates join on (object id, object domain) — never on
    /// name alone, since names are not unique across object kinds.
    pub fn sql(&self) -> String {
        match self {
            QueryPlan::AllEdges => format!("select * from {CATALOG}"),

            QueryPlan::ScopedEdges { database, schema } => {
                let mut sql = format!(
                    "select * from {CATALOG}\n  where referenced_database = {db} and referencing_database = {db}",
                    db = quote(database),
                );
                if let Some(schema) = schema {
                    sql.push_str(&format!(
                        "\n  and referenced_schema = {sch} and referencing_schema = {sch}",
                        sch = quote(schema),
                    ));
                }
                sql
            }

            QueryPlan::ForwardClosure {
                database,
                schema,
                name,
            } => format!(
                "with recursive cte as (\n\
                 \x20 select * from {CATALOG}\n\
                 \x20   where referencing_object_name = {name}\n\
                 \x20     and referencing_database = {db}\n\
                 \x20     and referencing_schema = {sch}\n\
                 \x20 union all\n\
                 \x20 select deps.*\n\
                 \x20   from {CATALOG} deps\n\
                 \x20   join cte\n\
                 \x20     on deps.referencing_object_id = cte.referenced_object_id\n\
                 \x20     and deps.referencing_object_domain = cte.referenced_object_domain\n\
                 )\n\
                 select * from cte",
                name = quote(name),
                db = quote(database),
                sch = quote(schema),
            ),

            QueryPlan::ReverseClosure {
                database,
                schema,
                name,
            } => format!(
                "with recursive cte as (\n\
                 \x20 select * from {CATALOG}\n\
                 \x20   where referenced_object_name = {name}\n\
                 \x20     and referenced_database = {db}\n\
                 \x20     and referenced_schema = {sch}\n\
                 \x20 union all\n\
                 \x20 select deps.*\n\
                 \x20   from {CATALOG} deps\n\
                 \x20   join cte\n\
                 \x20     on cte.referencing_object_id = deps.referenced_object_id\n\
                 \x20     and cte.referencing_object_domain = deps.referenced_object_domain\n\
                 )\n\
                 select * from cte",
                name = quote(name),
                db = quote(database),
                sch = quote(schema),
            ),
        }
    }
}

/// Quote a SQL string literal, doubling embedded single quotes.
fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_scope_selects_everything() {
        let plan = QueryPlan::new(&Scope::Global, Direction::Forward);
        assert_eq!(plan, QueryPlan::AllEdges);
        assert_eq!(
            plan.sql(),
            "select * from snowflake.account_usage.object_dependencies"
        );
    }

    #[test]
    fn test_database_scope_filters_both_endpoints() {
        let scope = Scope::Database {
            database: "SALES".into(),
            schema: None,
        };
        let sql = QueryPlan::new(&scope, Direction::Forward).sql();
        assert!(sql.contains("where referenced_database = 'SALES' and referencing_database = 'SALES'"));
        assert!(!sql.contains("referenced_schema"));
    }

    #[test]
    fn test_schema_scope_adds_schema_filter() {
        let scope = Scope::Database {
            database: "SALES".into(),
            schema: Some("PUBLIC".into()),
        };
        let sql = QueryPlan::new(&scope, Direction::Forward).sql();
        assert!(sql.contains("referenced_database = 'SALES'"));
        assert!(sql.contains("and referenced_schema = 'PUBLIC' and referencing_schema = 'PUBLIC'"));
    }

    #[test]
    fn test_forward_closure_anchors_on_referencing_endpoint() {
        let scope = Scope::Object {
            database: "D".into(),
            schema: "S".into(),
            name: "ORDERS".into(),
        };
        let plan = QueryPlan::new(&scope, Direction::Forward);
        assert!(matches!(plan, QueryPlan::ForwardClosure { .. }));
        let sql = plan.sql();
        assert!(sql.starts_with("with recursive cte as ("));
        assert!(sql.contains("where referencing_object_name = 'ORDERS'"));
        assert!(sql.contains("and referencing_database = 'D'"));
        assert!(sql.contains("and referencing_schema = 'S'"));
        // New edges join where their referencing side matches an already
        // accumulated referenced side, on id and domain.
        assert!(sql.contains("on deps.referencing_object_id = cte.referenced_object_id"));
        assert!(sql.contains("and deps.referencing_object_domain = cte.referenced_object_domain"));
        assert!(sql.ends_with("select * from cte"));
    }

    #[test]
    fn test_reverse_closure_anchors_on_referenced_endpoint() {
        let scope = Scope::Object {
            database: "D".into(),
            schema: "S".into(),
            name: "ORDERS".into(),
        };
        let plan = QueryPlan::new(&scope, Direction::Reverse);
        assert!(matches!(plan, QueryPlan::ReverseClosure { .. }));
        let sql = plan.sql();
        assert!(sql.contains("where referenced_object_name = 'ORDERS'"));
        assert!(sql.contains("and referenced_database = 'D'"));
        assert!(sql.contains("and referenced_schema = 'S'"));
        assert!(sql.contains("on cte.referencing_object_id = deps.referenced_object_id"));
        assert!(sql.contains("and cte.referencing_object_domain = deps.referenced_object_domain"));
    }

    #[test]
    fn test_join_key_never_uses_names() {
        for direction in [Direction::Forward, Direction::Reverse] {
            let scope = Scope::Object {
                database: "D".into(),
                schema: "S".into(),
                name: "X".into(),
            };
            let sql = QueryPlan::new(&scope, direction).sql();
            // The recursive step must not correlate on object names.
            assert!(!sql.contains("cte.referenced_object_name"));
            assert!(!sql.contains("cte.referencing_object_name"));
        }
    }

    #[test]
    fn test_string_literals_are_escaped() {
        let scope = Scope::Object {
            database: "D".into(),
            schema: "S".into(),
            name: "O'BRIEN".into(),
        };
        let sql = QueryPlan::new(&scope, Direction::Forward).sql();
        assert!(sql.contains("referencing_object_name = 'O''BRIEN'"));
    }
}
