use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

mod completion;
mod dispatch;
mod render;


#[derive(Parser, Debug)]
#[command(name = "ami")]
#[command(version)]
#[command(about = "Virtual environment and requirements manager for Python projects", long_about = None)]
struct Cli {
    /// Project directory (defaults to the current working directory)
    #[arg(long, global = true, value_name = "DIR")]
    project_root: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Provision a virtual environment and manifest for this project
    Init,
    /// Install packages (no names: install everything from the manifest)
    Install { names: Vec<String> },
    /// Uninstall packages and drop them from the manifest
    Uninstall {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Run a script with the environment's interpreter
    Run {
        script: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List packages installed in the environment
    List,
    /// Show how to activate the environment in your shell
    Activate,
    /// Report interpreter, environment, and manifest status
    Doctor,
    /// Generate a shell completion script on stdout
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    dispatch::run_cli(Cli::parse())
}
