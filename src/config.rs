use anyhow::{bail, Result};
use secrecy::SecretString;
use serde::Deserialize;

use crate::models::{DiceLimits, MIN_DICE_COUNT, MIN_DIE_SIDES};

/// Largest `MAX_DICE_COUNT` accepted at startup.
const DICE_COUNT_CAP: u32 = 100_000;
/// Largest `MAX_DIE_SIDES` accepted at startup.
const DIE_SIDES_CAP: u32 = 1_000_000;

/// Where the service runs. Threaded into the signature verifier and the
/// audit sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    /// No signature checks, no audit writes.
    Development,
    /// Signatures enforced; rejections carry a plaintext reason.
    Staging,
    /// Signatures enforced; rejections have an empty body.
    Production,
}

impl DeploymentMode {
    pub fn verifies_signatures(self) -> bool {
        !matches!(self, Self::Development)
    }

    pub fn writes_audit_log(self) -> bool {
        !matches!(self, Self::Development)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_deployment_mode")]
    pub deployment_mode: DeploymentMode,

    pub slack_signing_secret: Option<SecretString>,

    #[serde(default = "default_signature_tolerance")]
    pub slack_signature_tolerance_secs: u64,

    pub slack_client_id: Option<String>,

    pub slack_client_secret: Option<SecretString>,

    pub slack_redirect_uri: Option<String>,

    #[serde(default = "default_oauth_scopes")]
    pub slack_oauth_scopes: String,

    #[serde(default = "default_slack_api_base_url")]
    pub slack_api_base_url: String,

    pub database_url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default = "default_max_dice_count")]
    pub max_dice_count: u32,

    #[serde(default = "default_max_die_sides")]
    pub max_die_sides: u32,

    #[serde(default = "default_max_displayed_rolls")]
    pub max_displayed_rolls: u32,

    #[serde(default = "default_command_name")]
    pub command_name: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_deployment_mode() -> DeploymentMode {
    DeploymentMode::Production
}

fn default_signature_tolerance() -> u64 {
    300
}

fn default_oauth_scopes() -> String {
    "commands".to_string()
}

fn default_slack_api_base_url() -> String {
    "https://slack.com/api".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_max_dice_count() -> u32 {
    1000
}

fn default_max_die_sides() -> u32 {
    100
}

fn default_max_displayed_rolls() -> u32 {
    100
}

fn default_command_name() -> String {
    "/roll".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            deployment_mode: default_deployment_mode(),
            slack_signing_secret: None,
            slack_signature_tolerance_secs: default_signature_tolerance(),
            slack_client_id: None,
            slack_client_secret: None,
            slack_redirect_uri: None,
            slack_oauth_scopes: default_oauth_scopes(),
            slack_api_base_url: default_slack_api_base_url(),
            database_url: None,
            database_max_connections: default_max_connections(),
            max_dice_count: default_max_dice_count(),
            max_die_sides: default_max_die_sides(),
            max_displayed_rolls: default_max_displayed_rolls(),
            command_name: default_command_name(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.deployment_mode.verifies_signatures() && self.slack_signing_secret.is_none() {
            bail!(
                "SLACK_SIGNING_SECRET is required in {} mode",
                self.deployment_mode.as_str()
            );
        }
        if !(MIN_DICE_COUNT..=DICE_COUNT_CAP).contains(&self.max_dice_count) {
            bail!("MAX_DICE_COUNT must be between {MIN_DICE_COUNT} and {DICE_COUNT_CAP}");
        }
        if !(MIN_DIE_SIDES..=DIE_SIDES_CAP).contains(&self.max_die_sides) {
            bail!("MAX_DIE_SIDES must be between {MIN_DIE_SIDES} and {DIE_SIDES_CAP}");
        }
        Ok(())
    }

    pub fn dice_limits(&self) -> DiceLimits {
        DiceLimits {
            max_dice: self.max_dice_count,
            max_sides: self.max_die_sides,
            max_displayed_rolls: self.max_displayed_rolls,
        }
    }

    /// Scopes as a list, split on commas.
    pub fn oauth_scopes(&self) -> Vec<&str> {
        self.slack_oauth_scopes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}
