use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{get_config_dir, load_profile, resolve_api_url, save_profile};
use crate::cli::OutputFormat;
use crate::cli::utils::output_success;
use crate::config::config;

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Show the effective configuration")]
    Show,

    #[command(about = "Store the API base URL")]
    SetUrl {
        #[arg(help = "API base URL, e.g. https://api.example.com")]
        url: String,
    },
}

pub async fn handle(cmd: ConfigCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let profile = load_profile()?;
            let app = config();
            let details = json!({
                "config_dir": get_config_dir()?.display().to_string(),
                "environment": app.environment,
                "api_url": resolve_api_url(&profile),
                "logged_in": app.api.access_token.is_some() || profile.access_token.is_some(),
                "timeout_secs": app.api.timeout_secs,
                "default_page_size": app.query.default_page_size,
                "query": app.query.options,
                "updated_at": profile.updated_at,
            });
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&details)?),
                OutputFormat::Text => {
                    if let Some(fields) = details.as_object() {
                        for (key, value) in fields {
                            println!("{:<18} {}", format!("{}:", key), value);
                        }
                    }
                }
            }
            Ok(())
        }
        ConfigCommands::SetUrl { url } => {
            reqwest::Url::parse(&url).map_err(|e| anyhow::anyhow!("Invalid URL '{}': {}", url, e))?;
            let mut profile = load_profile()?;
            profile.set_api_url(&url);
            save_profile(&profile)?;
            if config().api.base_url.is_some() {
                tracing::warn!("SOC_ADMIN_API_URL is set and takes precedence over the stored URL");
            }
            output_success(&output_format, &format!("API URL set to {}", url), Some(json!({ "api_url": profile.api_url })))
        }
    }
}
