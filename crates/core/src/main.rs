use anyhow::Result;
use clap::Parser;
use tracegraph::{execute, loader::load_graph, Cli};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let graph = load_graph(&cli.graph)?;
    let outcomes = execute(&graph, &cli.command)?;
    info!("Answered {} queries", outcomes.len());

    for (label, outcome) in &outcomes {
        if cli.json {
            println!("{}", outcome.render_json()?);
        } else if outcomes.len() > 1 {
            println!("{}: {}", label, outcome.render_text());
        } else {
            println!("{}", outcome.render_text());
        }
    }

    Ok(())
}
