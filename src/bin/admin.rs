//! CLI administration tool for hexlinks.
//!
//! Works directly against the configured mapping store, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Hex a new link
//! cargo run --bin hexlinks-admin -- create https://example.com
//!
//! # Look up where a slug points
//! cargo run --bin hexlinks-admin -- resolve Xk_3
//!
//! # Check that the store is reachable
//! cargo run --bin hexlinks-admin -- check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `STORE_BACKEND`, `REDIS_URL` / `DATABASE_URL`,
//! `BASE_URL`, `MAPPING_TTL_SECONDS`, `SLUG_MAX_ATTEMPTS`.

use hexlinks::application::MappingService;
use hexlinks::config::{self, Config, StoreBackend};
use hexlinks::error::AppError;
use hexlinks::infrastructure::store;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing hexlinks mappings.
#[derive(Parser)]
#[command(name = "hexlinks-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a new mapping and print its short URL
    Create {
        /// Absolute URL to shorten
        url: String,
    },

    /// Print the target URL of a slug
    Resolve {
        /// 4-character slug
        slug: String,
    },

    /// Check store connectivity
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    if config.store_backend == StoreBackend::Memory {
        println!(
            "{}",
            "⚠️  STORE_BACKEND is 'memory': mappings live only as long as this process".yellow()
        );
    }

    let service = build_service(&config).await?;

    match cli.command {
        Commands::Create { url } => create(&service, &url).await,
        Commands::Resolve { slug } => resolve(&service, &slug).await,
        Commands::Check => check(&service).await,
    }
}

async fn build_service(config: &Config) -> Result<MappingService> {
    let store = store::connect(config).await?;

    Ok(MappingService::new(store, config.base_url.clone())
        .with_ttl(config.mapping_ttl())
        .with_max_attempts(config.slug_max_attempts))
}

async fn create(service: &MappingService, url: &str) -> Result<()> {
    match service.create_mapping(url).await {
        Ok(mapping) => {
            println!("{}", "✨ Mapping created".green().bold());
            println!("  {} {}", "Slug:".bold(), mapping.slug.cyan());
            println!("  {} {}", "Target:".bold(), mapping.target);
            println!(
                "  {} {}",
                "Short URL:".bold(),
                service.short_url(&mapping.slug).bright_blue()
            );
            if let Some(expires_at) = mapping.expires_at {
                println!("  {} {}", "Expires:".bold(), expires_at.to_rfc3339());
            }
            Ok(())
        }
        Err(e) => fail(e),
    }
}

async fn resolve(service: &MappingService, slug: &str) -> Result<()> {
    match service.resolve(slug).await {
        Ok(target) => {
            println!("{} {} {}", slug.cyan(), "→".dimmed(), target);
            Ok(())
        }
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("No mapping for '{}'", slug).yellow());
            Ok(())
        }
        Err(e) => fail(e),
    }
}

async fn check(service: &MappingService) -> Result<()> {
    let backend = service.store_backend();

    match service.check_store().await {
        Ok(()) => {
            println!("{} {} store is reachable", "✓".green(), backend);
            Ok(())
        }
        Err(e) => fail(e),
    }
}

fn fail(e: AppError) -> Result<()> {
    eprintln!("{} {}", "✗".red(), e.to_string().red());
    anyhow::bail!("command failed ({})", e.status_code())
}
