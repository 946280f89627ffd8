//! Command-line interface for msa2gfa

use crate::alignment::{read_path_list_file, ListedPath};
use crate::builder::GraphBuilder;
use crate::gfa::write_gfa;
use crate::graph::{Graph, NodeId};
use crate::stats::GraphStats;
use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

/// msa2gfa - build a variation graph from a multiple sequence alignment
///
/// Output is GFA 1.0 by default, or vg JSON with --json.
#[derive(Debug, Parser)]
#[command(name = "msa2gfa")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["fasta", "list"])))]
pub struct Cli {
    /// An input aligned FASTA file (plain or .gz)
    #[arg(short, long, value_name = "FASTA")]
    pub fasta: Option<PathBuf>,

    /// A file with the paths of multiple aligned FASTA files, one per line
    #[arg(short, long, value_name = "LIST")]
    pub list: Option<PathBuf>,

    /// Output as vg JSON instead of GFA
    #[arg(short, long)]
    pub json: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Identifier of the first node
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub first_id: NodeId,

    /// Print graph statistics to stderr (as JSON with --json)
    #[arg(long)]
    pub stats: bool,

    /// Disable the progress display
    #[arg(long)]
    pub no_progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Where the graph comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A single aligned FASTA file
    Fasta(PathBuf),
    /// A list file naming several aligned FASTA files
    List(PathBuf),
}

impl Cli {
    /// The selected input source
    pub fn input(&self) -> Option<Input> {
        match (&self.fasta, &self.list) {
            (Some(fasta), _) => Some(Input::Fasta(fasta.clone())),
            (None, Some(list)) => Some(Input::List(list.clone())),
            (None, None) => None,
        }
    }
}

/// Run the CLI application
pub fn run(cli: Cli) -> Result<()> {
    let input = cli
        .input()
        .context("either --fasta or --list must be given")?;

    let start = Instant::now();
    let graph = build(&input, cli.first_id, !cli.no_progress)?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        paths = graph.path_count(),
        elapsed = ?start.elapsed(),
        "graph complete"
    );

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_graph(&graph, cli.json, BufWriter::new(file))
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            write_graph(&graph, cli.json, BufWriter::new(stdout.lock()))
                .context("failed to write graph to stdout")?;
        }
    }

    if cli.stats {
        let stats = GraphStats::from_graph(&graph);
        if cli.json {
            eprintln!("{}", stats.to_json()?);
        } else {
            eprintln!("{}", stats.format_summary());
        }
    }

    Ok(())
}

/// Build the whole graph before anything is written
fn build(input: &Input, first_id: NodeId, progress: bool) -> Result<Graph> {
    let mut builder = GraphBuilder::new(first_id);

    match input {
        Input::Fasta(path) => {
            let message = format!("Building graph from {}...", path.display());
            let spinner = create_spinner(&message, progress);
            builder
                .add_file(path)
                .with_context(|| format!("failed to build graph from {}", path.display()))?;
            spinner.finish_and_clear();
        }
        Input::List(list) => {
            let entries = read_list(list)?;
            let bar = create_progress_bar(entries.len() as u64, progress);
            for entry in &entries {
                bar.set_message(entry.path.display().to_string());
                builder.add_listed(entry).with_context(|| {
                    format!("failed to build graph from {}", entry.path.display())
                })?;
                bar.inc(1);
            }
            bar.finish_and_clear();
            info!(alignments = builder.alignment_count(), "processed batch list");
        }
    }

    Ok(builder.finish())
}

fn read_list(list: &Path) -> Result<Vec<ListedPath>> {
    let entries = read_path_list_file(list)
        .with_context(|| format!("failed to read list file {}", list.display()))?;
    if entries.is_empty() {
        anyhow::bail!("list file {} names no alignments", list.display());
    }
    Ok(entries)
}

fn write_graph<W: Write>(graph: &Graph, json: bool, mut writer: W) -> Result<()> {
    if json {
        graph.write_json(&mut writer)?;
    } else {
        write_gfa(graph, &mut writer)?;
    }
    writer.flush()?;
    Ok(())
}

fn create_spinner(message: &str, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn create_progress_bar(len: u64, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ "),
    );
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_fasta() {
        let cli = Cli::try_parse_from(["msa2gfa", "-f", "aln.fa"]).unwrap();
        assert_eq!(cli.input(), Some(Input::Fasta(PathBuf::from("aln.fa"))));
        assert!(!cli.json);
        assert_eq!(cli.first_id, 1);
    }

    #[test]
    fn test_cli_parse_list_json() {
        let cli = Cli::try_parse_from([
            "msa2gfa", "--list", "paths.txt", "-j", "--first-id", "100",
        ])
        .unwrap();
        assert_eq!(cli.input(), Some(Input::List(PathBuf::from("paths.txt"))));
        assert!(cli.json);
        assert_eq!(cli.first_id, 100);
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["msa2gfa", "--json"]).is_err());
    }

    #[test]
    fn test_cli_inputs_conflict() {
        assert!(Cli::try_parse_from(["msa2gfa", "-f", "a.fa", "-l", "list.txt"]).is_err());
    }

    #[test]
    fn test_cli_rejects_zero_first_id() {
        assert!(Cli::try_parse_from(["msa2gfa", "-f", "a.fa", "--first-id", "0"]).is_err());
    }
}
