use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "attest",
    version,
    about = "Inspect and maintain the validation result cache"
)]
pub struct Cli {
    #[command(flatten)]
    pub cache: CacheArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show entry counts, disk usage and hit rate
    Stats(OutputArgs),
    /// Remove expired and corrupted entries, then show statistics
    Clean(OutputArgs),
    /// Remove every cached entry
    Clear,
    /// List cached entries, newest first
    List(OutputArgs),
    /// Print the attest version
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct CacheArgs {
    /// Cache directory (default: ./.cache/validations)
    #[arg(long, global = true, env = "ATTEST_CACHE_DIR")]
    pub dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable
    Text,
    /// Pretty-printed JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn every_subcommand_has_help() {
        let cmd = Cli::command();
        for sub in cmd.get_subcommands() {
            assert!(sub.get_about().is_some(), "{} has no help", sub.get_name());
        }
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("Print the attest version"));
    }

    #[test]
    fn dir_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["attest", "stats", "--dir", "/tmp/c"]).unwrap();
        assert_eq!(cli.cache.dir, Some(PathBuf::from("/tmp/c")));
        assert!(matches!(cli.cmd, Command::Stats(_)));
    }

    #[test]
    fn format_defaults_to_text() {
        let cli = Cli::try_parse_from(["attest", "list"]).unwrap();
        match cli.cmd {
            Command::List(out) => assert_eq!(out.format, OutputFormat::Text),
            _ => panic!("expected list"),
        }
    }
}
