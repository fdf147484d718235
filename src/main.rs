mod cli;
mod config;
mod connector;
mod error;
mod executor;
mod export;
mod graph;
mod query;
mod row;
mod scope;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use connector::SnowflakeClient;
use error::SCOPE_VIOLATION_EXIT;
use executor::QueryExecutor;
use export::{dot::render_dot, html};
use graph::DependencyGraph;
use query::QueryPlan;
use row::EdgeRow;
use scope::{Direction, Scope};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let profile = config::load_profile(&cli.config, &cli.profile)?;

    // Scope violations are rejected before any query text is generated.
    let scope = Scope::resolve(
        profile.database.as_deref(),
        profile.schema.as_deref(),
        cli.object.as_deref(),
    )
    .unwrap_or_else(|err| {
        eprintln!("{err}");
        std::process::exit(SCOPE_VIOLATION_EXIT);
    });
    let direction = if cli.reverse {
        Direction::Reverse
    } else {
        Direction::Forward
    };

    let sql = QueryPlan::new(&scope, direction).sql();
    println!("Generated SQL query:");
    println!("{sql}");

    println!("\nConnecting as {}@{}...", profile.user, profile.account);
    let mut client = SnowflakeClient::connect(&profile)?;
    let raw = client.execute(&sql).context("dependency query failed")?;
    let rows = EdgeRow::parse_all(&raw)?;

    let graph = DependencyGraph::build(&scope, direction, &rows);
    println!(
        "\nBuilt graph: {} object(s), {} dependencies.",
        graph.node_count(),
        graph.edge_count()
    );
    let dot = render_dot(&graph, &scope, direction);
    println!("\nGenerated DOT digraph:");
    println!("{dot}");

    if !cli.stdout {
        std::fs::create_dir_all(&cli.out_dir)
            .with_context(|| format!("cannot create {}", cli.out_dir.display()))?;
        let path = cli
            .out_dir
            .join(html::output_filename(&profile.account, &scope, direction));
        std::fs::write(&path, html::html_page(&dot))
            .with_context(|| format!("cannot write {}", path.display()))?;
        println!("Generated {}", path.display());
    }

    Ok(())
}
