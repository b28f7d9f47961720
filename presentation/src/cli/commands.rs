//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for debate transcripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored transcript
    Text,
    /// Share-record JSON
    Json,
}

/// CLI arguments for expert-debate
#[derive(Parser, Debug)]
#[command(name = "expert-debate")]
#[command(author, version, about = "Four expert personas debate a topic, then a judge rules")]
#[command(long_about = r#"
Expert Debate runs a round-robin debate between four expert personas, each
voiced by a different model, and closes it with a judge's verdict.

The debate has three stages:
1. Seed: the topic is announced
2. Turns: the experts speak in a fixed order (12 turns by default)
3. Verdict: a judge model weighs the arguments and rules

Press Ctrl-C during a debate to stop it early; the judge still rules on what
was said so far.

Configuration files are loaded from (in priority order):
1. DEBATE_<SECTION>__<KEY>                 Environment variables
2. --config <path>                          Explicit config file
3. ./debate.toml                            Project-level config
4. ~/.config/expert-debate/config.toml      Global config

Example:
  expert-debate debate "Yapay zekâ tehlikeli mi?" -e fizik -e felsefe -e biyoloji -e ekonomi
  expert-debate experts add "Veri Bilimi" --describe
  expert-debate show Ab3dEf7h
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress streaming output; print the transcript once finished
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a debate between four experts
    Debate(DebateArgs),

    /// List and manage expert personas
    Experts {
        #[command(subcommand)]
        action: ExpertsAction,
    },

    /// Draft a description for an expert field
    Describe {
        /// Name of the field (e.g. "Astronomi")
        name: String,
    },

    /// Show a shared debate
    Show {
        /// 8-character share id
        share_id: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show configuration sources and check the merged configuration
    Config,
}

#[derive(Args, Debug)]
pub struct DebateArgs {
    /// The topic to debate
    pub topic: String,

    /// Expert id, given exactly four times (see `experts list`)
    #[arg(short, long = "expert", value_name = "ID", required = true)]
    pub experts: Vec<String>,

    /// Number of turns (default from config, 12 if unset)
    #[arg(short, long, value_name = "N")]
    pub turns: Option<usize>,

    /// Skip the pauses between turns and retries
    #[arg(long)]
    pub no_pacing: bool,

    /// Save the concluded debate and print its share id
    #[arg(long)]
    pub share: bool,

    /// Append debate events as JSONL to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,

    /// Output format for the final result
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum ExpertsAction {
    /// List built-in and custom experts
    List,

    /// Add a custom expert
    Add {
        /// Display name; the id is derived from it
        name: String,

        /// Description of the expert's field
        #[arg(short, long, conflicts_with = "generate")]
        description: Option<String>,

        /// Draft the description with the describe model
        #[arg(short, long = "describe")]
        generate: bool,
    },

    /// Rename or re-describe a custom expert
    Update {
        id: String,
        name: String,
        description: String,
    },

    /// Remove a custom expert
    Remove { id: String },
}
