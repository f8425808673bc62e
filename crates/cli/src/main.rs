//! Folio CLI - Database migrations and admin account management.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending database migrations
//! folio-cli migrate run
//!
//! # Show which migrations are applied and which are pending
//! folio-cli migrate status
//!
//! # Create the administrator account (password read from stdin)
//! folio-cli admin create -e admin@example.com -n "Site Admin"
//!
//! # Replace an administrator's password (password read from stdin)
//! folio-cli admin set-password -e admin@example.com
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run or inspect database migrations
//! - `admin` - Manage the administrator account

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "folio-cli")]
#[command(author, version, about = "Folio CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Manage the administrator account
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Run,
    /// Show applied and pending migrations
    Status,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create an administrator account (password read from stdin)
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,
    },
    /// Replace an administrator's password (read from stdin)
    SetPassword {
        /// Admin email address
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { action } => match action {
            MigrateAction::Run => commands::migrate::run().await?,
            MigrateAction::Status => commands::migrate::status().await?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Create { email, name } => {
                commands::admin::create(&email, &name).await?;
            }
            AdminAction::SetPassword { email } => {
                commands::admin::set_password(&email).await?;
            }
        },
    }
    Ok(())
}
