use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wrroc_store::RdfFormat;

#[derive(Parser)]
#[command(
    name = "wrroc",
    about = "Append workflow-run provenance to RO-Crates and aggregate them as linked data",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to ./wrroc.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge the provenance of one zipped crate
    Append(AppendArgs),
    /// Merge every crate in a directory into one aggregate graph
    Batch(BatchArgs),
    /// Show what a merge would add and refresh, without writing
    Inspect(InspectArgs),
}

#[derive(Args)]
pub struct AppendArgs {
    pub archive: PathBuf,
    /// Acting user recorded as the workflow's creator
    #[arg(short, long)]
    pub user: Option<String>,
    /// Extraction directory (defaults to the archive path without `.zip`)
    #[arg(long)]
    pub workdir: Option<PathBuf>,
}

#[derive(Args)]
pub struct BatchArgs {
    pub dir: PathBuf,
    #[arg(short, long)]
    pub user: Option<String>,
    /// Aggregate graph file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// turtle or ntriples
    #[arg(long = "rdf-format")]
    pub rdf_format: Option<RdfFormat>,
    /// Abort on the first crate that fails
    #[arg(long)]
    pub fail_fast: bool,
}

#[derive(Args)]
pub struct InspectArgs {
    pub archive: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_append() {
        let cli = Cli::try_parse_from(["wrroc", "append", "run.zip"]).unwrap();
        if let Command::Append(args) = cli.command {
            assert_eq!(args.archive, PathBuf::from("run.zip"));
            assert!(args.user.is_none());
            assert!(args.workdir.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_append_with_user_and_workdir() {
        let cli = Cli::try_parse_from(["wrroc", "append", "run.zip", "-u", "user2341", "--workdir", "/tmp/x"]).unwrap();
        if let Command::Append(args) = cli.command {
            assert_eq!(args.user, Some("user2341".into()));
            assert_eq!(args.workdir, Some(PathBuf::from("/tmp/x")));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_batch() {
        let cli = Cli::try_parse_from([
            "wrroc", "batch", "crates", "-o", "out.nt", "--rdf-format", "ntriples", "--fail-fast",
        ])
        .unwrap();
        if let Command::Batch(args) = cli.command {
            assert_eq!(args.dir, PathBuf::from("crates"));
            assert_eq!(args.output, Some(PathBuf::from("out.nt")));
            assert_eq!(args.rdf_format, Some(RdfFormat::NTriples));
            assert!(args.fail_fast);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_batch_rejects_unknown_rdf_format() {
        assert!(Cli::try_parse_from(["wrroc", "batch", "d", "--rdf-format", "rdfxml"]).is_err());
    }

    #[test]
    fn parse_inspect() {
        let cli = Cli::try_parse_from(["wrroc", "inspect", "run.zip"]).unwrap();
        assert!(matches!(cli.command, Command::Inspect(_)));
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from(["wrroc", "inspect", "run.zip", "--config", "c.toml", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["wrroc", "--format", "json", "inspect", "run.zip"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
