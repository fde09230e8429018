use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use netflow_core::{solve_with_options, validate, Graph, Report, SolverOptions};
use tracing::info;

mod logging;
mod sample;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Solve an uncapacitated minimum-cost flow instance"
)]
struct Cli {
    /// JSON instance: {"balances": [...], "arcs": [{"from", "to", "cost"}]}
    #[arg(long)]
    instance: Option<PathBuf>,

    /// Stop after this many augmentations
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Wall-clock budget in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let graph = load_graph(&cli)?;
    info!(
        nodes = graph.node_count(),
        arcs = graph.edge_count(),
        "instance loaded"
    );
    validate(&graph)?;

    let solution = solve_with_options(&graph, &options(&cli));
    let report = Report::new(&graph, &solution);
    match cli.format {
        OutputFormat::Table => print!("{report}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if !solution.status.is_optimal() {
        return Err(format!("no optimal flow: {}", solution.status).into());
    }
    Ok(())
}

fn load_graph(cli: &Cli) -> Result<Graph, Box<dyn std::error::Error>> {
    match &cli.instance {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|err| format!("Failed to read {}: {err}", path.display()))?;
            let graph = serde_json::from_str(&text)
                .map_err(|err| format!("Failed to parse {}: {err}", path.display()))?;
            Ok(graph)
        }
        None => Ok(sample::sample_graph()?),
    }
}

fn options(cli: &Cli) -> SolverOptions {
    let mut options = SolverOptions::new();
    if let Some(max_iterations) = cli.max_iterations {
        options = options.with_max_iterations(max_iterations);
    }
    if let Some(ms) = cli.time_limit_ms {
        options = options.with_time_limit(Duration::from_millis(ms));
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_solver_options() {
        let cli = Cli::parse_from([
            "netflow",
            "--max-iterations",
            "5",
            "--time-limit-ms",
            "250",
            "--format",
            "json",
            "-vv",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        let options = options(&cli);
        assert_eq!(options.max_iterations, Some(5));
        assert_eq!(options.time_limit, Some(Duration::from_millis(250)));
    }

    #[test]
    fn defaults_solve_the_sample() {
        let cli = Cli::parse_from(["netflow"]);
        assert!(options(&cli).is_empty());
        let graph = load_graph(&cli).unwrap();
        assert_eq!(graph.node_count(), 7);
    }

    #[test]
    fn missing_instance_file_is_reported() {
        let cli = Cli::parse_from(["netflow", "--instance", "/nonexistent/netflow.json"]);
        let err = load_graph(&cli).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
