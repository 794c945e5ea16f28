//! CLI administration tool for shortn.
//!
//! Provides commands for creating users, inspecting short links, viewing
//! totals and checking the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for missing values)
//! cargo run --bin admin -- user create --email alice@example.com
//!
//! # Show a short link and its counters
//! cargo run --bin admin -- link show 1kHz7Po
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
//! - `HOST`, `PORT`: public host of short URLs (defaults `localhost`, `3000`)
//! - `PASSWORD_HASH_COST`: Argon2 time cost for new users (default 2)

use shortn::application::services::{UrlService, UserService};
use shortn::infrastructure::persistence::{PgUrlMappingRepository, PgUserRepository};
use shortn::utils::password::PasswordHasherConfig;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortn.
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
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Inspect short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Login email
        #[arg(short, long)]
        email: Option<String>,

        /// Password (prompted or generated if not provided)
        #[arg(short, long)]
        password: Option<String>,

        /// Skip prompts: generate a password and create without confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Show a short link by alias
    Show {
        /// The 7-character alias
        alias: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Link { action } => handle_link_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn user_service(pool: &PgPool) -> UserService<PgUserRepository> {
    let cost = std::env::var("PASSWORD_HASH_COST")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(2);

    UserService::new(
        Arc::new(PgUserRepository::new(Arc::new(pool.clone()))),
        PasswordHasherConfig::new(cost),
        false,
    )
}

fn url_service(pool: &PgPool) -> UrlService<PgUrlMappingRepository> {
    let host = std::env::var("HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());

    UrlService::new(
        Arc::new(PgUrlMappingRepository::new(Arc::new(pool.clone()))),
        format!("{}:{}", host, port),
    )
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    match action {
        UserAction::Create {
            email,
            password,
            yes,
        } => create_user(pool, email, password, yes).await,
    }
}

/// Creates a user with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for email (or use provided)
/// 2. Prompt for password, or generate one
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Hash with Argon2id and store
///
/// A generated password is displayed once and cannot be retrieved later.
async fn create_user(
    pool: &PgPool,
    email: Option<String>,
    password: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let (password, generated) = match password {
        Some(p) => (p, false),
        None if skip_confirm => (generate_password(), true),
        None => {
            let generate = Confirm::new()
                .with_prompt("Generate a random password?")
                .default(true)
                .interact()?;

            if generate {
                (generate_password(), true)
            } else {
                let entered = Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Repeat password", "Passwords do not match")
                    .interact()?;
                (entered, false)
            }
        }
    };

    println!();
    println!("{}", "User details:".bright_white().bold());
    println!("  Email:    {}", email.trim().to_lowercase().cyan());
    if generated {
        println!("  Password: {}", password.bright_yellow().bold());
        println!();
        println!(
            "{}",
            "⚠️  Save this password now! You won't be able to see it again."
                .red()
                .bold()
        );
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let user = user_service(pool)
        .create_user(&email, &password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!(
        "{} {}",
        "✅ User created with id".green().bold(),
        user.id.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    match action {
        LinkAction::Show { alias } => show_link(pool, &alias).await,
    }
}

/// Prints a mapping and its counters without counting an access.
///
/// # Output Format
///
/// ```text
/// 🔗 localhost:3000/1kHz7Po
///
///   Alias:           1kHz7Po
///   Original URL:    example.com/page
///   Owner:           (anonymous)
///   Times shortened: 3
///   Times accessed:  12
///   Created:         2024-01-15 10:30
/// ```
async fn show_link(pool: &PgPool, alias: &str) -> Result<()> {
    let mapping = url_service(pool)
        .find_by_alias(alias)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let owner = if mapping.is_anonymous() {
        "(anonymous)".bright_black()
    } else {
        mapping.owner.cyan()
    };

    println!("{} {}", "🔗".bright_blue(), mapping.short_url.bright_blue().bold());
    println!();
    println!("  Alias:           {}", mapping.alias().bright_white());
    println!("  Original URL:    {}", mapping.original_url.bright_white());
    println!("  Owner:           {}", owner);
    println!(
        "  Times shortened: {}",
        mapping.times_shortened.to_string().bright_green().bold()
    );
    println!(
        "  Times accessed:  {}",
        mapping.times_accessed.to_string().bright_green().bold()
    );
    println!(
        "  Created:         {}",
        mapping
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Number of users
/// - Number of URL mappings
/// - Total shorten requests and redirects
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count = user_service(pool)
        .count_users()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;

    let (mappings_count, shortened_total, accessed_total): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*),
               COALESCE(SUM(times_shortened), 0)::BIGINT,
               COALESCE(SUM(times_accessed), 0)::BIGINT
        FROM url_mappings
        "#,
    )
    .fetch_one(pool)
    .await?;

    println!(
        "  Users:           {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Short links:     {}",
        mappings_count.to_string().bright_green().bold()
    );
    println!(
        "  Times shortened: {}",
        shortened_total.to_string().bright_green().bold()
    );
    println!(
        "  Times accessed:  {}",
        accessed_total.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            url_service(pool)
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

/// Generates a random password.
///
/// # Format
///
/// - Length: 20 characters
/// - Character set: A-Z, a-z, 0-9
fn generate_password() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const PASSWORD_LEN: usize = 20;

    let mut rng = rand::rng();

    (0..PASSWORD_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
