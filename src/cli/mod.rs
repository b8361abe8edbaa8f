pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "soc-admin")]
#[command(about = "SOC admin CLI - users, SOC companies, sync jobs and file storage")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Print the query string for paging, sort and filter flags")]
    Query(commands::query::QueryCommand),

    #[command(about = "User management")]
    Users {
        #[command(subcommand)]
        cmd: commands::users::UsersCommands,
    },

    #[command(about = "SOC companies")]
    Companies {
        #[command(subcommand)]
        cmd: commands::companies::CompaniesCommands,
    },

    #[command(about = "SOC units")]
    Units {
        #[command(subcommand)]
        cmd: commands::units::UnitsCommands,
    },

    #[command(about = "SOC data synchronization")]
    Sync {
        #[command(subcommand)]
        cmd: commands::sync::SyncCommands,
    },

    #[command(about = "File storage")]
    S3 {
        #[command(subcommand)]
        cmd: commands::s3::S3Commands,
    },

    #[command(about = "Authentication and token management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Stored CLI configuration")]
    Config {
        #[command(subcommand)]
        cmd: commands::profile::ConfigCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Query(cmd) => commands::query::handle(cmd, output_format).await,
        Commands::Users { cmd } => commands::users::handle(cmd, output_format).await,
        Commands::Companies { cmd } => commands::companies::handle(cmd, output_format).await,
        Commands::Units { cmd } => commands::units::handle(cmd, output_format).await,
        Commands::Sync { cmd } => commands::sync::handle(cmd, output_format).await,
        Commands::S3 { cmd } => commands::s3::handle(cmd, output_format).await,
        Commands::Auth { cmd } => commands::auth::handle(cmd, output_format).await,
        Commands::Config { cmd } => commands::profile::handle(cmd, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn json_flag_is_global() {
        let cli = Cli::parse_from(["soc-admin", "users", "get", "u1", "--json"]);
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
    }
}
