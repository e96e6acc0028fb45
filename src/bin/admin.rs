//! CLI administration tool for affiliate-portal.
//!
//! Provides commands for managing admin accounts, viewing statistics,
//! and checking database connectivity without going through the web UI.
//!
//! # Usage
//!
//! ```bash
//! # Create an admin account (interactive)
//! cargo run --bin admin -- account create-admin
//!
//! # Create an admin account non-interactively
//! cargo run --bin admin -- account create-admin -e admin@example.com -p s3cret -y
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use affiliate_portal::application::services::CredentialService;
use affiliate_portal::domain::repositories::{
    AccountRepository, ClickRepository, PayoutRepository,
};
use affiliate_portal::infrastructure::persistence::{
    PgAccountRepository, PgClickRepository, PgPayoutRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing affiliate-portal.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum AccountAction {
    /// Create an administrator account (no-op if the email exists)
    CreateAdmin {
        /// Admin email
        #[arg(short, long)]
        email: Option<String>,

        /// Admin password (prompted securely if not provided)
        #[arg(short, long)]
        password: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = Arc::new(PgPool::connect(&database_url).await?);

    match cli.command {
        Commands::Account { action } => match action {
            AccountAction::CreateAdmin {
                email,
                password,
                yes,
            } => create_admin(pool, email, password, yes).await?,
        },
        Commands::Stats => show_stats(pool).await?,
        Commands::Db { action } => match action {
            DbAction::Check => db_check(pool).await?,
        },
    }

    Ok(())
}

async fn create_admin(
    pool: Arc<PgPool>,
    email: Option<String>,
    password: Option<String>,
    yes: bool,
) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Admin email").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Admin password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create admin account for '{email}'?"))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Aborted".yellow());
            return Ok(());
        }
    }

    let accounts = Arc::new(PgAccountRepository::new(pool));
    let already_exists = accounts.find_by_email(&email).await?.is_some();

    let credentials = CredentialService::new(accounts);
    credentials.bootstrap_admin(&email, &password).await?;

    if already_exists {
        println!(
            "{} account for '{}' already exists, nothing to do",
            "OK".green().bold(),
            email
        );
    } else {
        println!("{} admin account '{}' created", "OK".green().bold(), email);
    }

    Ok(())
}

async fn show_stats(pool: Arc<PgPool>) -> Result<()> {
    let accounts = PgAccountRepository::new(pool.clone());
    let clicks = PgClickRepository::new(pool.clone());
    let payouts = PgPayoutRepository::new(pool);

    let affiliate_count = accounts.count_affiliates().await?;
    let click_count = clicks.count_all().await?;
    let pending_payouts = payouts.count_pending().await?;

    println!("{}", "Portal statistics".bold());
    println!("  {} {}", "Affiliates:".cyan(), affiliate_count);
    println!("  {} {}", "Clicks:".cyan(), click_count);
    println!("  {} {}", "Pending payouts:".cyan(), pending_payouts);

    Ok(())
}

async fn db_check(pool: Arc<PgPool>) -> Result<()> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool.as_ref())
        .await
        .context("Database check query failed")?;

    println!("{} database connection OK", "OK".green().bold());

    Ok(())
}
