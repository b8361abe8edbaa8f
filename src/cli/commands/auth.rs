use clap::Subcommand;
use chrono::Utc;
use serde_json::json;

use crate::auth::inspect_token;
use crate::cli::config::{load_profile, save_profile};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::config;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Store an access token issued by the identity provider")]
    Login {
        #[arg(long, help = "Bearer token")]
        token: String,
    },

    #[command(about = "Forget the stored token")]
    Logout,

    #[command(about = "Show who the current token belongs to")]
    Status,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { token } => {
            let token = token.trim().to_string();
            // Opaque tokens are accepted; JWT claims are only informative.
            let subject = match inspect_token(&token) {
                Ok(claims) => {
                    if claims.is_expired_at(Utc::now()) {
                        tracing::warn!("Stored token is already expired");
                    }
                    claims.preferred_username.or(claims.email).or(claims.sub)
                }
                Err(e) => {
                    tracing::debug!("Token is not a readable JWT: {}", e);
                    None
                }
            };

            let mut profile = load_profile()?;
            profile.set_token(Some(token));
            save_profile(&profile)?;

            let message = match &subject {
                Some(who) => format!("Logged in as {}", who),
                None => "Token stored".to_string(),
            };
            output_success(&output_format, &message, Some(json!({ "subject": subject })))
        }
        AuthCommands::Logout => {
            let mut profile = load_profile()?;
            profile.set_token(None);
            save_profile(&profile)?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let profile = load_profile()?;
            let (token, source) = match (&config().api.access_token, &profile.access_token) {
                (Some(t), _) => (t.clone(), "environment"),
                (None, Some(t)) => (t.clone(), "profile"),
                (None, None) => anyhow::bail!("Not logged in"),
            };

            let claims = inspect_token(&token)?;
            let expired = claims.is_expired_at(Utc::now());
            match output_format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({
                            "source": source,
                            "claims": claims,
                            "expires_at": claims.expires_at(),
                            "expired": expired,
                        }))?
                    );
                }
                OutputFormat::Text => {
                    println!("Token source: {}", source);
                    if let Some(sub) = &claims.sub {
                        println!("Subject: {}", sub);
                    }
                    if let Some(name) = &claims.name {
                        println!("Name: {}", name);
                    }
                    if let Some(email) = &claims.email {
                        println!("E-mail: {}", email);
                    }
                    if let Some(exp) = claims.expires_at() {
                        println!("Expires: {}{}", exp.to_rfc3339(), if expired { " (expired)" } else { "" });
                    }
                }
            }
            Ok(())
        }
    }
}
