//! CLI administration tool for the book catalog.
//!
//! # Usage
//!
//! ```bash
//! # Create an account (prompts for anything not given)
//! cargo run --bin admin -- user create --admin
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Drop a cached author or book
//! cargo run --bin admin -- cache purge book dune
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `REDIS_URL` (for `cache purge`): Redis connection string

use book_catalog::application::caching;
use book_catalog::application::use_cases::{Register, RegisterCommand};
use book_catalog::domain::entities::Role;
use book_catalog::infrastructure::cache::{CacheBackend, RedisBackend};
use book_catalog::infrastructure::persistence::{PgSession, PgUserRepository};
use book_catalog::infrastructure::security::Argon2Hasher;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Cache maintenance
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create an account
    Create {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        /// Grant the admin role
        #[arg(long)]
        admin: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[derive(Subcommand)]
enum CacheAction {
    /// Delete the cached entry of one author or book
    Purge {
        entity: CachedEntity,
        slug: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CachedEntity {
    Author,
    Book,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::User { action } => handle_user_action(action, &connect().await?).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
        Commands::Cache { action } => handle_cache_action(action).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    match action {
        UserAction::Create {
            email,
            first_name,
            last_name,
            admin,
            yes,
        } => create_user(pool, email, first_name, last_name, admin, yes).await,
    }
}

fn prompt_unless_given(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

/// Creates an account through the same workflow as `POST /v1/auth/register`.
async fn create_user(
    pool: &PgPool,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    is_admin: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create user".bright_blue().bold());
    println!();

    let email = prompt_unless_given(email, "Email")?;
    let first_name = prompt_unless_given(first_name, "First name")?;
    let last_name = prompt_unless_given(last_name, "Last name")?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    let role = if is_admin { Role::Admin } else { Role::User };

    println!();
    println!("  Email: {}", email.cyan());
    println!("  Name:  {} {}", first_name.cyan(), last_name.cyan());
    println!("  Role:  {}", role.as_str().bright_yellow());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let session = Arc::new(PgSession::new(pool.clone()));
    let register = Register::new(
        Arc::new(PgUserRepository::new(session.clone())),
        Arc::new(Argon2Hasher::new()),
        session,
    );

    let user = register
        .execute(RegisterCommand {
            email,
            password,
            first_name,
            last_name,
            is_admin,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "User created".green().bold());
    println!("  ID: {}", user.id.to_string().bright_black());
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}

async fn handle_cache_action(action: CacheAction) -> Result<()> {
    match action {
        CacheAction::Purge { entity, slug } => {
            let redis_url = std::env::var("REDIS_URL").context("REDIS_URL must be set")?;
            let backend = RedisBackend::connect(&redis_url).await?;

            let key = match entity {
                CachedEntity::Author => caching::author_by_slug(&slug),
                CachedEntity::Book => caching::book_by_slug(&slug),
            };

            backend.delete(&key).await?;

            println!("{} {}", "Purged".green().bold(), key.cyan());
        }
    }

    Ok(())
}
