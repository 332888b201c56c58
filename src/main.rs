//! Taskdeck - task board client for the terminal

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use taskdeck::cli::{self, Cli, Commands, Reported};
use taskdeck::toast::ToastQueue;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("TASKDECK_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("taskdeck=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    let api_uri = cli.api_uri.as_deref();

    // Commands that never talk to the backend.
    match cli.command {
        Commands::Completion { shell } => {
            generate(shell, &mut Cli::command(), "taskdeck", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Config { command } => return cli::config::run(command, api_uri).await,
        _ => {}
    }

    // One queue for the whole process, shared by everything that notifies.
    let toasts = ToastQueue::new();
    let manager = cli::build_manager(api_uri, toasts.clone())?;

    let result = match cli.command {
        Commands::List(args) => cli::task::run_list(&manager, args).await,
        Commands::Add(args) => cli::task::run_add(&manager, args).await,
        Commands::Update(args) => cli::task::run_update(&manager, args).await,
        Commands::Delete(args) => cli::task::run_delete(&manager, args).await,
        Commands::Reorder(args) => cli::task::run_reorder(&manager, args).await,
        Commands::Completion { .. } | Commands::Config { .. } => unreachable!(),
    };

    cli::flush_toasts(&toasts);

    match result {
        Err(e) if e.downcast_ref::<Reported>().is_some() => std::process::exit(1),
        other => other,
    }
}
