use crate::scope::{Direction, Scope};

/// Wrap a DOT digraph in a self-contained HTML page that renders it in the
/// browser with d3-graphviz.
///
/// See <https://github.com/magjac/d3-graphviz#creating-a-graphviz-renderer>.
pub fn html_page(dot: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <meta charset=\"utf-8\">\n\
         <body>\
         <script src=\"https://d3js.org/d3.v5.min.js\"></script>\n\
         <script src=\"https://unpkg.com/@hpcc-js/wasm@0.3.11/dist/index.min.js\"></script>\n\
         <script src=\"https://unpkg.com/d3-graphviz@3.0.5/build/d3-graphviz.js\"></script>\n\
         <div id=\"graph\" style=\"text-align: center;\"></div>\n\
         <script>\n\
         var graphviz = d3.select(\"#graph\").graphviz()\n\
         \x20  .on(\"initEnd\", () => {{ graphviz.renderDot(d3.select(\"#digraph\").text()); }});\n\
         </script>\n\
         <div id=\"digraph\" style=\"display:none;\">\n\
         {dot}\
         </div>\n"
    )
}

/// Output file name for a run, encoding account, scope and direction:
/// `<account>[-<database>[.<schema>[.<object>]]][-rev].html`.
pub fn output_filename(account: &str, scope: &Scope, direction: Direction) -> String {
    let mut name = account.to_owned();
    match scope {
        Scope::Global => {}
        Scope::Database { database, schema } => {
            name.push('-');
            name.push_str(database);
            if let Some(schema) = schema {
                name.push('.');
                name.push_str(schema);
            }
        }
        Scope::Object {
            database,
            schema,
            name: object,
        } => {
            name.push_str(&format!("-{database}.{schema}.{object}"));
        }
    }
    if direction.is_reverse() {
        name.push_str("-rev");
    }
    name.push_str(".html");
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_embeds_digraph() {
        let page = html_page("digraph G {\n}\n");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("d3-graphviz"));
        assert!(page.contains("<div id=\"digraph\" style=\"display:none;\">\ndigraph G {\n}\n</div>"));
    }

    #[test]
    fn test_filename_encodes_scope_and_direction() {
        assert_eq!(
            output_filename("acct", &Scope::Global, Direction::Forward),
            "acct.html"
        );
        let db = Scope::Database {
            database: "D".into(),
            schema: None,
        };
        assert_eq!(output_filename("acct", &db, Direction::Forward), "acct-D.html");
        let db_schema = Scope::Database {
            database: "D".into(),
            schema: Some("S".into()),
        };
        assert_eq!(
            output_filename("acct", &db_schema, Direction::Forward),
            "acct-D.S.html"
        );
        let rooted = Scope::Object {
            database: "D".into(),
            schema: "S".into(),
            name: "ORDERS".into(),
        };
        assert_eq!(
            output_filename("acct", &rooted, Direction::Reverse),
            "acct-D.S.ORDERS-rev.html"
        );
    }
}
