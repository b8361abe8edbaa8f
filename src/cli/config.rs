use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{AuthError, TokenProvider};
use crate::config::config;
use crate::http::ApiClient;

const PROFILE_FILE: &str = "profile.json";

/// Connection details remembered between CLI runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub api_url: Option<String>,
    pub access_token: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProfileConfig {
    pub fn set_api_url(&mut self, url: &str) {
        self.api_url = Some(url.trim().trim_end_matches('/').to_string());
        self.updated_at = Some(Utc::now());
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.access_token = token;
        self.updated_at = Some(Utc::now());
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("SOC_ADMIN_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("soc-admin")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_profile_from(dir: &Path) -> anyhow::Result<ProfileConfig> {
    let profile_file = dir.join(PROFILE_FILE);

    if !profile_file.exists() {
        return Ok(ProfileConfig::default());
    }

    let content = fs::read_to_string(profile_file)?;
    let profile: ProfileConfig = serde_json::from_str(&content)?;
    Ok(profile)
}

pub fn save_profile_to(dir: &Path, profile: &ProfileConfig) -> anyhow::Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let content = serde_json::to_string_pretty(profile)?;
    fs::write(dir.join(PROFILE_FILE), content)?;
    Ok(())
}

pub fn load_profile() -> anyhow::Result<ProfileConfig> {
    load_profile_from(&get_config_dir()?)
}

pub fn save_profile(profile: &ProfileConfig) -> anyhow::Result<()> {
    save_profile_to(&get_config_dir()?, profile)
}

/// Token from `SOC_ADMIN_ACCESS_TOKEN`, else the stored profile.
/// A 401 clears the stored token.
pub struct ProfileTokenProvider {
    dir: PathBuf,
    env_token: Option<String>,
}

impl ProfileTokenProvider {
    pub fn new(dir: PathBuf, env_token: Option<String>) -> Self {
        Self { dir, env_token }
    }
}

#[async_trait]
impl TokenProvider for ProfileTokenProvider {
    async fn access_token(&self) -> Result<Option<String>, AuthError> {
        if let Some(token) = &self.env_token {
            return Ok(Some(token.clone()));
        }
        let profile = load_profile_from(&self.dir).map_err(|e| AuthError::Unavailable(e.to_string()))?;
        Ok(profile.access_token)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let mut profile = load_profile_from(&self.dir).map_err(|e| AuthError::Unavailable(e.to_string()))?;
        if profile.access_token.is_some() {
            profile.set_token(None);
            save_profile_to(&self.dir, &profile).map_err(|e| AuthError::Unavailable(e.to_string()))?;
            tracing::info!("Stored access token cleared");
        }
        Ok(())
    }
}

/// Base URL precedence: environment, then stored profile, then the default.
pub fn resolve_api_url(profile: &ProfileConfig) -> String {
    let config = config();
    match (&config.api.base_url, &profile.api_url) {
        (Some(url), _) => url.clone(),
        (None, Some(url)) => url.clone(),
        (None, None) => config.base_url().to_string(),
    }
}

/// Client for the current environment and stored profile.
pub fn api_client() -> anyhow::Result<ApiClient> {
    let dir = get_config_dir()?;
    let profile = load_profile_from(&dir)?;
    let mut app_config = config().clone();
    app_config.api.base_url = Some(resolve_api_url(&profile));

    let tokens = Arc::new(ProfileTokenProvider::new(dir, app_config.api.access_token.clone()));
    Ok(ApiClient::from_config(&app_config, tokens)?)
}
