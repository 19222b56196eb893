use crate::model::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;

const TOKEN_ENV: &str = "LINE_NOTIFY_TOKEN";
const URL_ENV: &str = "URL";

/// Which elements bound a listings section, a single listing, and each named
/// field of a listing. Selectors live in the rules file so layout drift on
/// the target site is a config change, not a code change.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ExtractionRule {
    Table(TableRule),
    Card(CardRule),
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableRule {
    /// The site serves the same scrollable wrapper under two legacy style
    /// attributes, so more than one container selector may match.
    pub containers: Vec<String>,
    pub table: String,
    pub row: String,
    pub cell: String,
    pub empty_sentinel: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardRule {
    pub card: String,
    /// Result-count element above the cards. Its absence means the page
    /// layout drifted, not that there are no results.
    pub summary: String,
    /// Summary text prefix meaning zero results, e.g. "0".
    pub zero_results_marker: String,
    pub plan: String,
    pub room: String,
    pub image: String,
    pub date_range: String,
    /// Check-in and check-out render as the 2nd and 3rd element of this
    /// shared text class within a card.
    pub time_text: String,
    pub total_price: String,
    pub individual_price: String,
    /// Which match of `individual_price` carries the per-person price.
    #[serde(default)]
    pub individual_price_index: usize,
    pub empty_sentinel: Option<String>,
}

impl ExtractionRule {
    pub fn empty_sentinel(&self) -> Option<&str> {
        match self {
            ExtractionRule::Table(r) => r.empty_sentinel.as_deref(),
            ExtractionRule::Card(r) => r.empty_sentinel.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RulesFile {
    pub rule: ExtractionRule,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_notify_endpoint")]
    pub notify_endpoint: String,
    /// Legacy convention: exit non-zero when a notification was sent, so an
    /// external monitor can key off the exit code. Off by default.
    #[serde(default)]
    pub legacy_exit_codes: bool,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) VacancyWatch/0.1".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_notify_endpoint() -> String {
    "https://notify-api.line.me/api/notify".to_string()
}

#[derive(Debug)]
pub struct AppConfig {
    pub notify_token: String,
    pub target_url: String,
    pub rules: RulesFile,
}

/// Reads the rules file and the two required environment variables. Both env
/// vars must be present; failing here keeps a missing token from surfacing
/// as a broken request deep in the pipeline.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let notify_token = env::var(TOKEN_ENV).map_err(|_| ConfigError::MissingEnv(TOKEN_ENV))?;
    let target_url = env::var(URL_ENV).map_err(|_| ConfigError::MissingEnv(URL_ENV))?;

    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_string(),
        source: e,
    })?;
    let rules: RulesFile = serde_json::from_str(&content).map_err(|e| ConfigError::Malformed {
        path: path.to_string(),
        source: e,
    })?;

    Ok(AppConfig {
        notify_token,
        target_url,
        rules,
    })
}
