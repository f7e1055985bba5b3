pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "portals")]
#[command(about = "A terminal NFT marketplace storefront", long_about = None)]
pub struct Cli {
    /// Seed for the generated catalog (random when omitted)
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    /// Skip the loading screen
    #[arg(long)]
    pub no_splash: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Launch the storefront (default)
    Tui,
    /// Print the generated catalog
    Catalog {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the config file location
    ConfigPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_tui() {
        let cli = Cli::try_parse_from(["portals"]).unwrap();
        assert_eq!(cli.command, None);
        assert!(!cli.no_splash);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_catalog_with_global_seed() {
        let cli = Cli::try_parse_from(["portals", "catalog", "--json", "--seed", "7"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Catalog { json: true }));
        assert_eq!(cli.seed, Some(7));
    }

    #[test]
    fn test_config_path_subcommand() {
        let cli = Cli::try_parse_from(["portals", "--no-splash", "config-path"]).unwrap();
        assert_eq!(cli.command, Some(Commands::ConfigPath));
        assert!(cli.no_splash);
    }
}
