//! Fieldmaster CLI - walk a field-service work order from arrival to payment

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use fieldmaster::cli::commands;
use fieldmaster::cli::{ChecklistAction, Cli, Commands, PhotoAction};
use fieldmaster::errors::to_exit_code;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over the verbosity flags
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> fieldmaster::Result<()> {
    let data_dir = cli.data_dir.as_deref();
    match cli.command {
        Some(Commands::Show { json }) => commands::show::run(data_dir, json).await,
        Some(Commands::Start) => commands::order::run_start(data_dir).await,
        Some(Commands::Photo { action }) => match action {
            PhotoAction::Add { stage, uri } => {
                commands::photo::run_add(data_dir, stage, &uri).await
            }
            PhotoAction::Remove { stage, index } => {
                commands::photo::run_remove(data_dir, stage, index).await
            }
        },
        Some(Commands::Checklist { action }) => match action {
            ChecklistAction::Add { title } => commands::checklist::run_add(data_dir, &title).await,
            ChecklistAction::Toggle { id, undo } => {
                commands::checklist::run_toggle(data_dir, &id, !undo).await
            }
            ChecklistAction::Remove { id } => commands::checklist::run_remove(data_dir, &id).await,
        },
        Some(Commands::NextStage) => commands::order::run_next_stage(data_dir).await,
        Some(Commands::Amount { amount, reason }) => {
            commands::payment::run_amount(data_dir, amount, reason.as_deref()).await
        }
        Some(Commands::Pay { method, received }) => {
            commands::payment::run_pay(data_dir, method, received).await
        }
        Some(Commands::Reset) => commands::order::run_reset(data_dir).await,
        Some(Commands::Dispatch { action }) => commands::dispatch::run(data_dir, action).await,
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
