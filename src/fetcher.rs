use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::error::{Result, UpdaterError};
use crate::types::{GitHubReleaseResponse, ReleaseMetadata, UpdaterConfig};

/// Fetches metadata for the latest release of the tracked repository.
#[async_trait::async_trait]
pub trait ReleaseFetcher: Send + Sync {
    async fn fetch_latest(&self) -> Result<ReleaseMetadata>;
}

/// Fetches the latest release from the GitHub REST API.
pub struct GitHubReleaseFetcher {
    client: Client,
    url: String,
    user_agent: String,
    token: Option<String>,
}

impl GitHubReleaseFetcher {
    /// Creates a fetcher for the repository named in `config`.
    pub fn new(config: &UpdaterConfig) -> Result<Self> {
        // Validate repo format
        if !is_valid_repo_format(&config.repo) {
            return Err(UpdaterError::InvalidRepo(config.repo.clone()));
        }

        // Validate base URL
        if Url::parse(&config.base_url).is_err() {
            return Err(UpdaterError::InvalidBaseUrl(config.base_url.clone()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            url: format!(
                "{}/repos/{}/releases/latest",
                config.base_url.trim_end_matches('/'),
                config.repo
            ),
            user_agent: config.user_agent.clone(),
            token: config.token.clone(),
        })
    }
}

#[async_trait::async_trait]
impl ReleaseFetcher for GitHubReleaseFetcher {
    async fn fetch_latest(&self) -> Result<ReleaseMetadata> {
        debug!(url = %self.url, "fetching latest release");

        let mut request = self
            .client
            .get(&self.url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", &self.user_agent);

        if let Some(ref token) = self.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        let response = request.send().await?;

        if response.status() != StatusCode::OK {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(UpdaterError::ApiError { status, message });
        }

        let body = response.bytes().await?;
        let release: GitHubReleaseResponse = serde_json::from_slice(&body)?;

        ReleaseMetadata::try_from(release)
    }
}

/// Maximum length for a GitHub username/organization name.
const MAX_GITHUB_OWNER_LENGTH: usize = 39;

/// Maximum length for a GitHub repository name.
const MAX_GITHUB_REPO_LENGTH: usize = 100;

/// Checks "owner/repo" against GitHub's naming rules: the owner is alphanumeric or
/// hyphens without a leading/trailing hyphen, the repo adds underscores and dots.
fn is_valid_repo_format(repo: &str) -> bool {
    let Some((owner, name)) = repo.split_once('/') else {
        return false;
    };

    !name.contains('/') && is_valid_owner(owner) && is_valid_repo_name(name)
}

fn is_valid_owner(owner: &str) -> bool {
    (1..=MAX_GITHUB_OWNER_LENGTH).contains(&owner.len())
        && !owner.starts_with('-')
        && !owner.ends_with('-')
        && owner.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn is_valid_repo_name(name: &str) -> bool {
    (1..=MAX_GITHUB_REPO_LENGTH).contains(&name.len())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
