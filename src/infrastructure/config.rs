use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub clock: ClockSettings,
    #[serde(default)]
    pub refresh: RefreshSettings,
    #[serde(default)]
    pub remote: RemoteSettings,
    #[serde(default)]
    pub overlay: OverlaySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClockSettings {
    /// Facility civil time as a fixed offset from UTC
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshSettings {
    #[serde(default = "default_refresh_seconds")]
    pub interval_seconds: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval_seconds: default_refresh_seconds(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RemoteSettings {
    /// Document used when no GitHub repository is configured
    #[serde(default = "default_seed_path")]
    pub seed_path: PathBuf,
    #[serde(default)]
    pub github: Option<GitHubSettings>,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            seed_path: default_seed_path(),
            github: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GitHubSettings {
    pub owner: String,
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default = "default_document_path")]
    pub path: String,
    /// Write credential; set through the environment, never in a checked-in file
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_raw_base")]
    pub raw_base: String,
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OverlaySettings {
    #[serde(default = "default_overlay_path")]
    pub path: PathBuf,
    #[serde(default = "default_overlay_key")]
    pub key: String,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            path: default_overlay_path(),
            key: default_overlay_key(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_utc_offset_minutes() -> i32 {
    // Saskatchewan keeps CST all year
    -6 * 60
}

fn default_refresh_seconds() -> u64 {
    300
}

fn default_seed_path() -> PathBuf {
    PathBuf::from("dashboard-data.json")
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_document_path() -> String {
    "dashboard-data.json".to_string()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_raw_base() -> String {
    "https://raw.githubusercontent.com".to_string()
}

fn default_commit_message() -> String {
    "Dashboard admin update".to_string()
}

fn default_overlay_path() -> PathBuf {
    PathBuf::from("data/local-storage.json")
}

fn default_overlay_key() -> String {
    "ymcaDashboardData".to_string()
}

/// `config/dashboard.{toml,json,...}` if present, then `DASHBOARD__*` environment variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
