//! Argument parsing and command execution for the govnet CLI.

mod commands;

pub use commands::{
    Cli, CliError, Command, CoVoteDirectedArgs, ExecutionSummary, GraphReport, RunArgs, Stance,
    render_summary, run_cli,
};
