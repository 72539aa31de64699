use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::UpdaterError;
use crate::version::strip_v_prefix;

/// How long fetched release metadata stays fresh: 6 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(6 * 60 * 60);

const DEFAULT_USER_AGENT: &str = concat!("menumaster/", env!("CARGO_PKG_VERSION"));

/// Configuration for the release cache and its GitHub fetcher.
#[derive(Debug, Clone)]
pub struct UpdaterConfig {
    /// The repository in "owner/repo" format.
    pub repo: String,
    /// How long a fetched release is served before it is fetched again.
    pub ttl: Duration,
    /// Optional GitHub access token, sent as `Authorization: token <value>`.
    pub token: Option<String>,
    /// User-Agent header sent to GitHub.
    pub user_agent: String,
    /// Optional request timeout. `None` keeps the HTTP client's default.
    pub timeout: Option<Duration>,
    /// Optional path to a file for persisting the cache entry to disk.
    pub cache_file_path: Option<String>,
    /// Base URL for GitHub API (for testing). Defaults to "https://api.github.com".
    pub(crate) base_url: String,
}

impl UpdaterConfig {
    /// Creates a new config for the given repository.
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            ttl: DEFAULT_TTL,
            token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            cache_file_path: None,
            base_url: "https://api.github.com".to_string(),
        }
    }

    /// Sets a custom base URL (for testing).
    #[doc(hidden)]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets how long fetched metadata stays fresh.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the GitHub access token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Reads the access token from an environment variable such as `GITHUB_ACCESS_TOKEN`.
    ///
    /// An unset or empty variable leaves the current token untouched.
    pub fn token_from_env(mut self, var: &str) -> Self {
        if let Ok(token) = std::env::var(var) {
            if !token.trim().is_empty() {
                self.token = Some(token);
            }
        }
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the cache file path.
    pub fn cache_file_path(mut self, path: impl Into<String>) -> Self {
        self.cache_file_path = Some(path.into());
        self
    }
}

/// Static plugin metadata supplied by the host, used for update responses and the info screen.
#[derive(Debug, Clone)]
pub struct PluginHeader {
    pub slug: String,
    /// Plugin file as the host knows it, e.g. "menumaster/menumaster-plugin.php".
    pub plugin_file: String,
    pub name: String,
    pub author: String,
    pub author_uri: String,
    pub plugin_uri: String,
    pub description: String,
    pub requires: String,
    pub requires_php: String,
    /// Host version the plugin was last tested against.
    pub tested: String,
}

impl PluginHeader {
    pub fn new(slug: impl Into<String>, plugin_file: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            name: slug.clone(),
            slug,
            plugin_file: plugin_file.into(),
            author: String::new(),
            author_uri: String::new(),
            plugin_uri: String::new(),
            description: String::new(),
            requires: "5.2".to_string(),
            requires_php: "7.2".to_string(),
            tested: String::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>, author_uri: impl Into<String>) -> Self {
        self.author = author.into();
        self.author_uri = author_uri.into();
        self
    }

    pub fn plugin_uri(mut self, uri: impl Into<String>) -> Self {
        self.plugin_uri = uri.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn requires(mut self, host: impl Into<String>, php: impl Into<String>) -> Self {
        self.requires = host.into();
        self.requires_php = php.into();
        self
    }

    pub fn tested(mut self, tested: impl Into<String>) -> Self {
        self.tested = tested.into();
        self
    }
}

/// The latest published release of the plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseMetadata {
    /// The release tag name (e.g., "v1.0.0").
    pub tag_name: String,
    /// The URL to the release page.
    pub html_url: String,
    /// The URL of the source archive for this release.
    pub zipball_url: String,
    /// When the release was published.
    pub published_at: Option<DateTime<Utc>>,
    /// The release notes, as written on GitHub.
    pub body: Option<String>,
}

impl ReleaseMetadata {
    /// The tag with its leading 'v's removed ("v2.3.0" -> "2.3.0").
    pub fn version(&self) -> &str {
        strip_v_prefix(&self.tag_name)
    }
}

/// Internal structure for GitHub API response.
#[derive(Debug, Deserialize)]
pub(crate) struct GitHubReleaseResponse {
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub zipball_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub body: Option<String>,
}

impl TryFrom<GitHubReleaseResponse> for ReleaseMetadata {
    type Error = UpdaterError;

    fn try_from(response: GitHubReleaseResponse) -> Result<Self, Self::Error> {
        let tag_name = response
            .tag_name
            .ok_or(UpdaterError::MissingField("tag_name"))?;

        Ok(Self {
            tag_name,
            html_url: response.html_url.unwrap_or_default(),
            zipball_url: response.zipball_url.unwrap_or_default(),
            published_at: response.published_at,
            body: response.body,
        })
    }
}

/// The single cached release and the moment it stops being served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CacheEntry {
    /// The "owner/repo" the release was fetched for.
    pub repo: String,
    pub value: ReleaseMetadata,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// An available update, as handed to the host's update screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateDescriptor {
    pub slug: String,
    pub plugin: String,
    pub new_version: String,
    /// Where the host downloads the update package from.
    pub download_url: String,
    /// The release page.
    pub info_url: String,
}

/// Details shown on the host's "view details" screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    pub name: String,
    pub slug: String,
    pub version: String,
    pub author: String,
    pub author_profile: String,
    pub requires: String,
    pub tested: String,
    pub requires_php: String,
    pub last_updated: Option<NaiveDate>,
    pub homepage: String,
    pub short_description: String,
    pub sections: PluginSections,
    pub download_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginSections {
    pub description: String,
    /// Release notes, HTML-escaped with line breaks.
    pub changelog: String,
}

/// What the host reports after an upgrade run finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeEvent {
    /// e.g. "update" or "install".
    pub action: String,
    /// e.g. "plugin", "theme" or "core".
    pub kind: String,
}

impl UpgradeEvent {
    pub fn new(action: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            kind: kind.into(),
        }
    }

    /// Whether this event is a finished plugin update.
    pub fn is_plugin_update(&self) -> bool {
        self.action == "update" && self.kind == "plugin"
    }
}
