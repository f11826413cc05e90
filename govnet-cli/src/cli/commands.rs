//! Command implementations and argument parsing for the govnet CLI.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use govnet_core::{
    AssortativityError, EdgeOrientation, GovernanceGraph, GovernanceRecords, GraphError,
    NetworkBuilder, NetworkOutcome, Outcome, RelationPolicy,
};
use govnet_providers_tabular::{TableError, TabularLoader, TimeWindow};

use crate::gml;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "govnet",
    about = "Derive governance interaction networks from CSV tables."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands, one per generated network family.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build the undirected aligned co-voting network.
    CoVote(RunArgs),
    /// Build a directed co-voting network, aligned or opposed stance.
    CoVoteDirected(CoVoteDirectedArgs),
    /// Build the proposer→voter networks, one per vote outcome.
    ProposerVote(RunArgs),
    /// Build the undirected co-staking network.
    CoStake(RunArgs),
}

/// Options shared by every network-building command.
#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Directory containing the governance CSV tables.
    #[arg(long = "data-dir", default_value = "data/raw")]
    pub data_dir: PathBuf,

    /// Directory GML files are written into.
    #[arg(long = "out-dir", default_value = "data/network")]
    pub out_dir: PathBuf,

    /// Organization name to build the network for.
    #[arg(long)]
    pub dao: String,

    /// Keep only records strictly before this dd/mm/yyyy date.
    #[arg(long)]
    pub before: Option<String>,
}

/// Options for the directed co-voting command.
#[derive(Debug, Args, Clone)]
pub struct CoVoteDirectedArgs {
    /// Shared network-building options.
    #[command(flatten)]
    pub run: RunArgs,

    /// Whether edges connect same-stance or cross-stance voters.
    #[arg(long, value_enum)]
    pub stance: Stance,
}

/// Stance selector for directed co-voting networks.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum Stance {
    /// Connect voters who backed the same outcome.
    Aligned,
    /// Connect Pass voters to Fail voters.
    Opposed,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while writing an output graph.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Table loading failed.
    #[error(transparent)]
    Table(#[from] TableError),
    /// Graph construction failed.
    #[error(transparent)]
    Core(#[from] GraphError),
}

/// Report for one written graph.
#[derive(Debug, Clone)]
pub struct GraphReport {
    /// Human-readable label of the generated network.
    pub label: String,
    /// Path the GML file was written to.
    pub path: PathBuf,
    /// Number of nodes in the graph.
    pub nodes: usize,
    /// Number of distinct weighted edges.
    pub edges: usize,
    /// Assortativity coefficient, or the reason it is undefined.
    pub assortativity: Result<f64, AssortativityError>,
    /// Count of proposals with opposing stakes, for staking networks.
    pub opposing_stakes: Option<u64>,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Organization the networks were built for.
    pub dao: String,
    /// One report per written graph.
    pub reports: Vec<GraphReport>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, construction, or writing fails.
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::CoVote(args) => {
            span.record("command", field::display("co-vote"));
            co_vote(&args)
        }
        Command::CoVoteDirected(args) => {
            span.record("command", field::display("co-vote-directed"));
            co_vote_directed(&args)
        }
        Command::ProposerVote(args) => {
            span.record("command", field::display("proposer-vote"));
            proposer_vote(&args)
        }
        Command::CoStake(args) => {
            span.record("command", field::display("co-stake"));
            co_stake(&args)
        }
    }
}

struct Prepared {
    loader: TabularLoader,
    dao_id: String,
    window: Option<TimeWindow>,
}

fn prepare(args: &RunArgs) -> Result<Prepared, CliError> {
    let loader = TabularLoader::new(&args.data_dir);
    let dao_id = loader.resolve_organization(&args.dao)?;
    let window = args.before.as_deref().map(TimeWindow::parse).transpose()?;
    fs::create_dir_all(&args.out_dir).map_err(|source| CliError::Io {
        path: args.out_dir.clone(),
        source,
    })?;
    Ok(Prepared {
        loader,
        dao_id,
        window,
    })
}

#[instrument(name = "cli.co_vote", err, skip(args), fields(dao = %args.dao))]
fn co_vote(args: &RunArgs) -> Result<ExecutionSummary, CliError> {
    let prep = prepare(args)?;
    let roster = prep.loader.roster(&prep.dao_id, prep.window)?;
    let records = GovernanceRecords {
        votes: prep.loader.votes(&prep.dao_id, prep.window)?,
        ..GovernanceRecords::default()
    };
    let network = NetworkBuilder::new()
        .with_policy(RelationPolicy::CoVoteAligned)
        .build()?;
    let outcome = network.run(&roster, &records)?;

    let path = args.out_dir.join(format!("{}_vote.gml", args.dao));
    write_graph(outcome.graph(), &path)?;
    Ok(summary(args, vec![report("co-vote", path, &outcome, false)]))
}

#[instrument(
    name = "cli.co_vote_directed",
    err,
    skip(args),
    fields(dao = %args.run.dao, stance = ?args.stance),
)]
fn co_vote_directed(args: &CoVoteDirectedArgs) -> Result<ExecutionSummary, CliError> {
    let prep = prepare(&args.run)?;
    let roster = prep.loader.roster(&prep.dao_id, prep.window)?;
    let records = GovernanceRecords {
        votes: prep.loader.votes(&prep.dao_id, prep.window)?,
        ..GovernanceRecords::default()
    };
    let (label, file_name, builder) = match args.stance {
        Stance::Aligned => (
            "co-vote-directed",
            format!("{}_vote_directed.gml", args.run.dao),
            NetworkBuilder::new()
                .with_policy(RelationPolicy::CoVoteAligned)
                .with_orientation(EdgeOrientation::Directed),
        ),
        Stance::Opposed => (
            "co-vote-opposed",
            format!("{}_opposite_vote_directed.gml", args.run.dao),
            NetworkBuilder::new().with_policy(RelationPolicy::CoVoteOpposed),
        ),
    };
    let outcome = builder.build()?.run(&roster, &records)?;

    let path = args.run.out_dir.join(file_name);
    write_graph(outcome.graph(), &path)?;
    Ok(summary(&args.run, vec![report(label, path, &outcome, false)]))
}

#[instrument(name = "cli.proposer_vote", err, skip(args), fields(dao = %args.dao))]
fn proposer_vote(args: &RunArgs) -> Result<ExecutionSummary, CliError> {
    let prep = prepare(args)?;
    let roster = prep.loader.roster(&prep.dao_id, prep.window)?;
    let votes = prep.loader.votes(&prep.dao_id, prep.window)?;
    let proposals = prep.loader.proposals(&prep.dao_id, prep.window)?;

    let mut reports = Vec::with_capacity(2);
    for (label, suffix, outcome_filter) in [
        ("proposer-vote-for", "proposal_vote_for", Outcome::Pass),
        ("proposer-vote-against", "proposal_vote_against", Outcome::Fail),
    ] {
        let records = GovernanceRecords {
            proposals: proposals.clone(),
            votes: votes
                .iter()
                .filter(|vote| vote.outcome == outcome_filter)
                .cloned()
                .collect(),
            ..GovernanceRecords::default()
        };
        let network = NetworkBuilder::new()
            .with_policy(RelationPolicy::ProposerVoter)
            .build()?;
        let outcome = network.run(&roster, &records)?;

        let path = args.out_dir.join(format!("{}_{suffix}.gml", args.dao));
        write_graph(outcome.graph(), &path)?;
        reports.push(report(label, path, &outcome, false));
    }
    Ok(summary(args, reports))
}

#[instrument(name = "cli.co_stake", err, skip(args), fields(dao = %args.dao))]
fn co_stake(args: &RunArgs) -> Result<ExecutionSummary, CliError> {
    let prep = prepare(args)?;
    let roster = prep.loader.roster(&prep.dao_id, prep.window)?;
    let records = GovernanceRecords {
        stakes: prep.loader.stakes(&prep.dao_id, prep.window)?,
        ..GovernanceRecords::default()
    };
    let network = NetworkBuilder::new()
        .with_policy(RelationPolicy::CoStakeAligned)
        .build()?;
    let outcome = network.run(&roster, &records)?;

    let path = args.out_dir.join(format!("{}_stake.gml", args.dao));
    write_graph(outcome.graph(), &path)?;
    Ok(summary(args, vec![report("co-stake", path, &outcome, true)]))
}

fn summary(args: &RunArgs, reports: Vec<GraphReport>) -> ExecutionSummary {
    for item in &reports {
        info!(
            label = item.label.as_str(),
            nodes = item.nodes,
            edges = item.edges,
            path = %item.path.display(),
            "network written"
        );
    }
    ExecutionSummary {
        dao: args.dao.clone(),
        reports,
    }
}

fn report(label: &str, path: PathBuf, outcome: &NetworkOutcome, with_stakes: bool) -> GraphReport {
    GraphReport {
        label: label.to_owned(),
        path,
        nodes: outcome.graph().node_count(),
        edges: outcome.graph().edge_count(),
        assortativity: outcome.graph().degree_assortativity(),
        opposing_stakes: with_stakes.then(|| outcome.stats().opposing_outcome_proposals),
    }
}

fn write_graph(graph: &GovernanceGraph, path: &Path) -> Result<(), CliError> {
    let wrap = |source: io::Error| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(wrap)?;
    let mut writer = BufWriter::new(file);
    gml::write_gml(graph, &mut writer).map_err(wrap)?;
    writer.flush().map_err(wrap)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "organization: {}", summary.dao)?;
    for item in &summary.reports {
        writeln!(writer, "{}:", item.label)?;
        writeln!(writer, "  nodes: {}", item.nodes)?;
        writeln!(writer, "  edges: {}", item.edges)?;
        match &item.assortativity {
            Ok(coefficient) => writeln!(writer, "  assortativity: {coefficient:.2}")?,
            Err(reason) => writeln!(writer, "  assortativity: undefined ({reason})")?,
        }
        if let Some(count) = item.opposing_stakes {
            writeln!(writer, "  proposals with opposing stakes: {count}")?;
        }
        writeln!(writer, "  saved to: {}", item.path.display())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use govnet_core::{Node, NodeAttributes};

    #[test]
    fn summary_rendering_reports_undefined_assortativity() {
        let summary = ExecutionSummary {
            dao: "alphadao".to_owned(),
            reports: vec![GraphReport {
                label: "co-vote".to_owned(),
                path: PathBuf::from("out/alphadao_vote.gml"),
                nodes: 3,
                edges: 1,
                assortativity: Err(AssortativityError::InsufficientEdges { edges: 1 }),
                opposing_stakes: None,
            }],
        };
        let mut buffer = Vec::new();
        render_summary(&summary, &mut buffer).expect("render must succeed");
        let text = String::from_utf8(buffer).expect("summary is utf-8");
        assert!(text.contains("organization: alphadao"));
        assert!(text.contains("assortativity: undefined"));
        assert!(!text.contains("opposing stakes"));
    }

    #[test]
    fn graph_writes_are_wrapped_with_path_context() {
        let nodes = vec![Node::new(0, "0xa", NodeAttributes::Reputation { reputation: 0.0 })];
        let graph = GovernanceGraph::try_new(nodes, Vec::new(), EdgeOrientation::Undirected)
            .expect("fixture graph must be valid");
        let missing = Path::new("definitely/missing/dir/out.gml");
        let err = write_graph(&graph, missing).expect_err("parent directory is absent");
        assert!(matches!(err, CliError::Io { path, .. } if path == missing));
    }

    #[test]
    fn stance_values_parse_from_kebab_case() {
        use clap::ValueEnum as _;
        assert_eq!(Stance::from_str("aligned", true), Ok(Stance::Aligned));
        assert_eq!(Stance::from_str("opposed", true), Ok(Stance::Opposed));
    }
}
