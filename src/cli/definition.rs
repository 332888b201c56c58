//! Top-level clap definitions for the `taskdeck` binary

use clap::{Parser, Subcommand};

use super::config::ConfigCommands;
use super::task::{AddArgs, DeleteArgs, ListArgs, ReorderArgs, UpdateArgs};
use crate::config::API_URI_ENV;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Manage the task board from the terminal")]
#[command(version)]
pub struct Cli {
    /// Backend root URL; tasks live at <URI>/tasks
    #[arg(long, global = true, env = API_URI_ENV)]
    pub api_uri: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks in display order
    #[command(alias = "ls")]
    List(ListArgs),

    /// Create a task
    Add(AddArgs),

    /// Change fields of a task
    Update(UpdateArgs),

    /// Delete a task
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Move tasks to the front, in the given order
    Reorder(ReorderArgs),

    /// Show or change the saved configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
