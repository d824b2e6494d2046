//! CLI command implementations.

pub mod config;
pub mod health;
pub mod products;
pub mod show;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only list products in this category.
    #[arg(short, long, conflicts_with = "all")]
    pub category: Option<String>,

    /// List every category, ignoring the configured default.
    #[arg(long)]
    pub all: bool,

    /// Only list products of this brand.
    #[arg(short, long)]
    pub brand: Option<String>,

    /// Maximum number of products.
    #[arg(short, long)]
    pub limit: Option<u32>,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product slug.
    pub slug: String,

    /// Variant to select (default: the first).
    #[arg(long)]
    pub variant: Option<String>,

    /// EMI plan to select (default: the first).
    #[arg(long)]
    pub plan: Option<String>,

    /// Pick the variant and plan interactively.
    #[arg(short, long)]
    pub interactive: bool,

    /// Proceed to checkout with the selection.
    #[arg(long)]
    pub buy: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the configuration.
    Validate,
}
