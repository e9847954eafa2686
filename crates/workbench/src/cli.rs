//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "workbench")]
#[command(about = "Extract API traffic from console logs and turn it into client code", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a log file and summarize the API calls found in it
    Analyze(AnalyzeArgs),

    /// Manage saved analyses
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct AnalyzeArgs {
    /// Log file to scan
    pub file: PathBuf,

    /// Display name for the analysis (defaults to the file name)
    #[arg(long)]
    pub name: Option<String>,

    /// Save the analysis to history
    #[arg(long)]
    pub save: bool,

    /// Write a TypeScript client stub to this path
    #[arg(long, value_name = "OUT")]
    pub typescript: Option<PathBuf>,

    /// Print one curl command per endpoint
    #[arg(long)]
    pub curl: bool,

    /// Output the analysis as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum HistoryAction {
    /// List saved analyses, newest first
    List,

    /// Show one saved analysis
    Show {
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete one saved analysis
    Delete { id: String },

    /// Delete every saved analysis
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_flags() {
        let cli = Cli::try_parse_from([
            "workbench", "analyze", "app.log", "--name", "login", "--save", "--typescript", "api.ts", "--curl",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.file, PathBuf::from("app.log"));
                assert_eq!(args.name.as_deref(), Some("login"));
                assert!(args.save);
                assert!(args.curl);
                assert!(!args.json);
                assert_eq!(args.typescript, Some(PathBuf::from("api.ts")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_history_actions() {
        let cli = Cli::try_parse_from(["workbench", "history", "show", "abc", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::History { action: HistoryAction::Show { ref id, json: true } } if id == "abc"
        ));

        let cli = Cli::try_parse_from(["workbench", "history", "clear"]).unwrap();
        assert!(matches!(cli.command, Commands::History { action: HistoryAction::Clear }));
    }

    #[test]
    fn test_analyze_requires_file() {
        assert!(Cli::try_parse_from(["workbench", "analyze"]).is_err());
    }
}
