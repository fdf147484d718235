use std::path::PathBuf;

use clap::Parser;

/// Visualize Snowflake object dependencies as a DOT digraph.
///
/// With no arguments the whole dependency catalog is graphed, narrowed to the
/// profile's database and schema when those are set. Naming a starting object
/// graphs what it transitively depends on; --reverse flips that to what
/// transitively depends on it.
#[derive(Parser, Debug)]
#[command(name = "snowdeps", version, about, long_about = None)]
pub struct Cli {
    /// Starting object name. Requires both a database and a schema in the
    /// active profile.
    pub object: Option<String>,

    /// Traverse from referenced to referencing objects: graph what depends
    /// on the starting object instead of what it depends on.
    #[arg(short, long)]
    pub reverse: bool,

    /// Path to the profiles file.
    #[arg(long, default_value = "profiles_db.toml")]
    pub config: PathBuf,

    /// Profile to use.
    #[arg(long, default_value = "default")]
    pub profile: String,

    /// Directory the generated HTML file is written to.
    #[arg(long, default_value = "out")]
    pub out_dir: PathBuf,

    /// Print the DOT digraph to stdout only; skip the HTML file.
    #[arg(long)]
    pub stdout: bool,
}
