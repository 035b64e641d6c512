use std::path::PathBuf;

use anyhow::{Context, Result};
use cbn_core::models::Assignment;
use cbn_core::tracing_setup::{init_json_tracing, init_tracing};
use cbn_core::CbnConfig;
use cbn_engine::{persistence, CausalBayesianNetworkDoc};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "cbn")]
#[command(about = "Exact inference over saved causal Bayesian network projects")]
struct Args {
    /// Project file holding `{"cbn_docs": [...]}`
    project: PathBuf,

    /// Document to operate on (default: the first one)
    #[arg(short, long)]
    doc: Option<String>,

    /// TOML configuration file (`CBN_*` environment variables override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write log events to stderr as JSON lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load every document and report its size
    Validate,
    /// Print P(node = true) for every node
    Marginals {
        /// Intervention, e.g. `--do Rain=true` (repeatable)
        #[arg(long = "do", value_parser = parse_binding)]
        interventions: Vec<(String, bool)>,
    },
    /// Print the truth table of a node
    Table { node: String },
    /// Print P(node = true | evidence), optionally under interventions
    Query {
        node: String,
        /// Observation, e.g. `--evidence Rain=true` (repeatable)
        #[arg(short, long, value_parser = parse_binding)]
        evidence: Vec<(String, bool)>,
        /// Intervention, e.g. `--do Sprinkler=false` (repeatable)
        #[arg(long = "do", value_parser = parse_binding)]
        interventions: Vec<(String, bool)>,
    },
}

/// Parse `NAME=true|false` (also `1`/`0`).
fn parse_binding(raw: &str) -> Result<(String, bool), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))?;
    let value = match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "t" => true,
        "false" | "0" | "f" => false,
        other => return Err(format!("expected true or false, got {other:?}")),
    };
    Ok((name.trim().to_string(), value))
}

fn to_assignment(bindings: Vec<(String, bool)>) -> Assignment {
    bindings.into_iter().collect()
}

fn select_doc(
    docs: Vec<CausalBayesianNetworkDoc>,
    name: Option<&str>,
) -> Result<CausalBayesianNetworkDoc> {
    match name {
        Some(name) => docs
            .into_iter()
            .find(|d| d.name() == name)
            .with_context(|| format!("no document named {name:?}")),
        None => docs
            .into_iter()
            .next()
            .context("project contains no documents"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.json_logs {
        init_json_tracing();
    } else {
        init_tracing();
    }

    let config = CbnConfig::load(args.config.as_deref())?;
    let json = std::fs::read_to_string(&args.project)
        .with_context(|| format!("reading {}", args.project.display()))?;
    let docs = persistence::import_project(&json, &config)?;
    info!(project = %args.project.display(), docs = docs.len(), "project loaded");

    if let Command::Validate = args.command {
        for doc in &docs {
            let network = doc.network().read()?;
            println!(
                "{}: {} nodes, {} instances",
                doc.name(),
                network.len(),
                doc.positions().values().map(Vec::len).sum::<usize>()
            );
        }
        return Ok(());
    }

    let doc = select_doc(docs, args.doc.as_deref())?;
    let network = doc.network().read()?;
    match args.command {
        Command::Validate => {}
        Command::Marginals { interventions } => {
            let marginals = if interventions.is_empty() {
                network.marginal_probabilities()?
            } else {
                network.interventional_marginals(&to_assignment(interventions))?
            };
            println!("{}", serde_json::to_string_pretty(&marginals)?);
        }
        Command::Table { node } => {
            let rows = network.cpd_rows(&node)?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Command::Query {
            node,
            evidence,
            interventions,
        } => {
            let evidence = to_assignment(evidence);
            let p = if interventions.is_empty() {
                network.query(&node, &evidence)?
            } else {
                network.intervention(&node, &to_assignment(interventions), &evidence)?
            };
            println!("{p}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_parse() {
        assert_eq!(parse_binding("Rain=true").unwrap(), ("Rain".into(), true));
        assert_eq!(parse_binding("Oil = 0").unwrap(), ("Oil".into(), false));
        assert!(parse_binding("Rain").is_err());
        assert!(parse_binding("Rain=maybe").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn query_arguments_collect() {
        let args = Args::try_parse_from([
            "cbn",
            "project.json",
            "query",
            "WetGrass",
            "--evidence",
            "Rain=true",
            "--do",
            "Sprinkler=false",
        ])
        .unwrap();
        match args.command {
            Command::Query {
                node,
                evidence,
                interventions,
            } => {
                assert_eq!(node, "WetGrass");
                assert_eq!(evidence, vec![("Rain".to_string(), true)]);
                assert_eq!(interventions, vec![("Sprinkler".to_string(), false)]);
            }
            _ => panic!("expected query"),
        }
        assert!(!args.json_logs);
    }

    #[test]
    fn json_logs_flag_parses() {
        let args =
            Args::try_parse_from(["cbn", "--json-logs", "project.json", "validate"]).unwrap();
        assert!(args.json_logs);
        assert!(matches!(args.command, Command::Validate));
    }
}
