use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{apply_command, init_command, modules_command, watch_command};

#[derive(Parser, Debug)]
#[command(name = "spotless-applier")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project directory (defaults to the current directory)
    #[arg(short, long = "project")]
    pub project: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Reformat only this file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Module to reformat (repeatable)
    #[arg(short, long = "module", conflicts_with = "file")]
    pub modules: Vec<String>,

    /// Reformat the root project instead of individual modules
    #[arg(long, conflicts_with_all = ["file", "modules"])]
    pub root: bool,

    /// Reformat every module
    #[arg(long, conflicts_with_all = ["file", "modules", "root"])]
    pub all: bool,

    /// Never prompt; without module flags the root project (or every
    /// module when there is no root) is reformatted
    #[arg(long)]
    pub non_interactive: bool,

    /// Print the commands without executing them
    #[arg(short, long)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run spotless on the project, selected modules, or a single file
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),
    /// List the modules spotless can run on
    #[command(visible_alias = "m")]
    Modules {
        #[command(flatten)]
        project: ProjectArgs,

        /// Print modules as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reformat each file as it is saved
    Watch {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Write a default .spotless-applier.json
    Init {
        #[command(flatten)]
        project: ProjectArgs,

        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    /// Execute the command
    pub async fn execute(self) -> Result<()> {
        match self {
            Commands::Apply(args) => apply_command(args).await,
            Commands::Modules { project, json } => modules_command(&project, json),
            Commands::Watch { project } => watch_command(&project).await,
            Commands::Init { project, force } => init_command(&project, force),
        }
    }
}
