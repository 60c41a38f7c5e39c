//! CLI administration tool for tinylink.
//!
//! Inspects the configured key-value store without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check the store answers PING
//! cargo run --bin admin -- ping
//!
//! # Show where an identifier points
//! cargo run --bin admin -- resolve aHR0c6MDA=
//!
//! # Show a client's submission count for the current window
//! cargo run --bin admin -- quota 203.0.113.7
//!
//! # Compute the identifier for a URL and expiry, offline
//! cargo run --bin admin -- gen-id https://www.google.com 2021-07-18T16:58:30+08:00
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `REDIS_URL` or `REDIS_ADDR`/`REDIS_PASSWORD`/`REDIS_DB`,
//! `REDIS_POOL_SIZE`, `REDIS_TIMEOUT_MS`, `RATE_LIMIT_PER_DAY`.

use tinylink::config::{self, Config};
use tinylink::domain::repositories::{LinkRepository, QuotaRepository};
use tinylink::infrastructure::persistence::{KvLinkRepository, KvQuotaRepository};
use tinylink::server::connect_store;
use tinylink::utils::id_codec::generate_id;

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for inspecting tinylink's store.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the store connection
    Ping,

    /// Show the target URL of a short link
    Resolve {
        /// Short link identifier
        id: String,
    },

    /// Show a client's submission count
    Quota {
        /// Client IP as seen by the server
        ip: String,
    },

    /// Compute a short link identifier without storing anything
    GenId {
        /// Target URL
        url: String,

        /// Expiry exactly as it would be submitted (RFC 3339)
        expire_at: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Commands::GenId { url, expire_at } = &cli.command {
        return gen_id(url, expire_at);
    }

    let config = config::load_from_env()?;

    match cli.command {
        Commands::Ping => ping(&config).await?,
        Commands::Resolve { id } => resolve(&config, &id).await?,
        Commands::Quota { ip } => quota(&config, &ip).await?,
        Commands::GenId { .. } => {}
    }

    Ok(())
}

async fn ping(config: &Config) -> Result<()> {
    println!("{}", "Store check".bright_blue().bold());
    println!();
    println!("  Backend: {}", config.store_backend.to_string().cyan());

    let store = connect_store(config).await?;

    match store.ping().await {
        Ok(()) => println!("  Status:  {}", "OK".green().bold()),
        Err(e) => {
            println!("  Status:  {}", "FAILED".red().bold());
            anyhow::bail!("PING failed: {}", e);
        }
    }
    println!();

    Ok(())
}

async fn resolve(config: &Config, id: &str) -> Result<()> {
    let store = connect_store(config).await?;
    let links = KvLinkRepository::new(store);

    let target = links
        .find_target(id)
        .await
        .context("Lookup failed")?;

    match target {
        Some(url) => {
            println!("  {} -> {}", id.bright_white().bold(), url.green());
        }
        None => {
            println!("  {} {}", id.bright_white().bold(), "not found or expired".yellow());
        }
    }

    Ok(())
}

async fn quota(config: &Config, ip: &str) -> Result<()> {
    let store = connect_store(config).await?;
    let quotas = KvQuotaRepository::new(store);

    let count = quotas
        .current_count(ip)
        .await
        .context("Failed to read quota")?;

    let limit = config.rate_limit_per_day;
    let status = if count >= limit {
        "LIMITED".red()
    } else {
        "OK".green()
    };

    println!("{}", "Client quota".bright_blue().bold());
    println!();
    println!("  Key:    {}", KvQuotaRepository::key_for(ip).bright_black());
    println!(
        "  Used:   {} / {}",
        count.to_string().bright_white().bold(),
        limit
    );
    println!("  Status: {}", status);
    println!();

    Ok(())
}

fn gen_id(url: &str, expire_at: &str) -> Result<()> {
    if let Err(e) = DateTime::parse_from_rfc3339(expire_at) {
        println!(
            "{}",
            format!("Warning: '{}' is not RFC 3339 ({}), the server would reject it", expire_at, e)
                .yellow()
        );
    }

    println!("{}", generate_id(url, expire_at));
    Ok(())
}
