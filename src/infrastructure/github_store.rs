// GitHub-hosted dashboard document
use crate::application::remote_store::{RemoteDocument, RemoteStore};
use crate::domain::error::DashboardError;
use crate::infrastructure::config::GitHubSettings;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

const USER_AGENT: &str = concat!("facility-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct GitHubStore {
    client: reqwest::Client,
    settings: GitHubSettings,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    sha: String,
}

#[derive(Debug, Serialize)]
struct ContentsUpdate<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
    branch: &'a str,
}

fn network(context: &str, e: impl std::fmt::Display) -> DashboardError {
    DashboardError::Network(format!("{}: {}", context, e))
}

impl GitHubStore {
    pub fn new(settings: GitHubSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, settings })
    }

    fn encoded_path(&self) -> String {
        self.settings
            .path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn raw_url(&self) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.settings.raw_base.trim_end_matches('/'),
            self.settings.owner,
            self.settings.repo,
            urlencoding::encode(&self.settings.branch),
            self.encoded_path()
        )
    }

    fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.owner,
            self.settings.repo,
            self.encoded_path()
        )
    }

    /// Revision token of the file on the branch; `None` if the file does not exist yet.
    async fn current_sha(&self, token: &str) -> Result<Option<String>, DashboardError> {
        let response = self
            .client
            .get(self.contents_url())
            .query(&[("ref", self.settings.branch.as_str())])
            .header("Authorization", format!("token {}", token))
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| network("Failed to request document revision", e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::Network(format!(
                "GitHub revision lookup failed with status {}: {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| network("Failed to read document revision", e))?;
        let contents: ContentsResponse = serde_json::from_str(&body)?;
        Ok(Some(contents.sha))
    }
}

#[async_trait]
impl RemoteStore for GitHubStore {
    async fn load(&self) -> Result<RemoteDocument, DashboardError> {
        let url = self.raw_url();
        tracing::debug!("Fetching dashboard document from {}", url);

        let response = self
            .client
            .get(&url)
            .header("Cache-Control", "no-cache")
            .send()
            .await
            .map_err(|e| network("GitHub fetch failed", e))?;

        if !response.status().is_success() {
            return Err(DashboardError::Network(format!(
                "GitHub fetch failed {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| network("Failed to read dashboard document", e))?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn save(&self, document: &RemoteDocument) -> Result<(), DashboardError> {
        let Some(token) = self.settings.token.as_deref() else {
            tracing::debug!("No GitHub token configured, skipping remote write");
            return Ok(());
        };

        let sha = self.current_sha(token).await?;
        let update = ContentsUpdate {
            message: &self.settings.commit_message,
            content: base64::encode(serde_json::to_vec_pretty(document)?),
            sha,
            branch: &self.settings.branch,
        };

        let response = self
            .client
            .put(self.contents_url())
            .header("Authorization", format!("token {}", token))
            .header("Accept", "application/vnd.github+json")
            .json(&update)
            .send()
            .await
            .map_err(|e| network("GitHub push failed", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::Network(format!(
                "GitHub push failed with status {}: {}",
                status, body
            )));
        }

        tracing::info!(
            "Pushed dashboard document to {}/{}@{}",
            self.settings.owner,
            self.settings.repo,
            self.settings.branch
        );
        Ok(())
    }
}
