//! Command-line front end for govnet.
//!
//! Wires the tabular loader and the graph-construction core into one
//! subcommand per network family, writes GML files the downstream analysis
//! scripts consume, and renders a run summary to stdout.

pub mod cli;
pub mod gml;
pub mod logging;
