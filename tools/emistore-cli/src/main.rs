//! emistore - browse phones and EMI plans from the terminal.
//!
//! Commands:
//! - `emistore products` - List products, optionally filtered by category
//! - `emistore show` - Product details with variant and EMI plan selection
//! - `emistore health` - Check that the catalog API is reachable
//! - `emistore config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use emistore_observability::{LogConfig, LogFormat, LogLevel};

use commands::{ConfigArgs, ProductsArgs, ShowArgs};

/// emistore - Browse phones and EMI plans
#[derive(Parser)]
#[command(name = "emistore")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products(ProductsArgs),

    /// Show a product with its variants and EMI plans
    Show(ShowArgs),

    /// Check the catalog API
    Health,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = if cli.json { LogFormat::Json } else { LogFormat::Human };
    let level = if cli.verbose { LogLevel::Debug } else { LogLevel::Error };
    emistore_observability::init_with(LogConfig::new(format).with_default_level(level));

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Health => commands::health::run(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
