use crate::types::TemplateKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "acontext")]
#[command(about = "Acontext CLI - Build context-aware AI applications", long_about = None)]
#[command(version = crate::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version information
    Version,

    /// Create a new project from a template
    Create {
        #[command(subcommand)]
        command: CreateCommand,
    },

    /// Manage the local Docker services
    Docker {
        #[command(subcommand)]
        command: DockerCommand,
    },
}

#[derive(Subcommand)]
pub enum CreateCommand {
    /// Scaffold a project directory
    Project {
        name: String,

        #[arg(long, short = 't', default_value = "python")]
        template: TemplateKind,

        #[arg(long, default_value = ".", help = "Parent directory of the new project")]
        dir: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum DockerCommand {
    /// Start the services in the background
    Up,

    /// Stop and remove the services
    Down,

    /// List the running services
    Status,

    /// Show service logs
    Logs {
        service: Option<String>,

        #[arg(long, short = 'f')]
        follow: bool,
    },

    /// Print the compose environment
    Env,
}
