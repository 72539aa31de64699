use tracing::debug;

use crate::cache::VersionCache;
use crate::changelog::format_changelog;
use crate::error::Result;
use crate::types::{
    PluginHeader, PluginInfo, PluginSections, ReleaseMetadata, UpdateDescriptor, UpdaterConfig,
    UpgradeEvent,
};
use crate::version::is_newer;

/// Info-screen action the host asks about when showing plugin details.
const PLUGIN_INFORMATION_ACTION: &str = "plugin_information";

/// Answers the host's update questions for a single plugin.
pub struct UpdateChecker {
    header: PluginHeader,
    cache: VersionCache,
}

impl UpdateChecker {
    /// Creates a checker that fetches releases from GitHub.
    pub fn new(header: PluginHeader, config: &UpdaterConfig) -> Result<Self> {
        Ok(Self::with_cache(header, VersionCache::new(config)?))
    }

    /// Creates a checker around an existing cache.
    pub fn with_cache(header: PluginHeader, cache: VersionCache) -> Self {
        Self { header, cache }
    }

    /// Checks whether the latest release is newer than `current_version`.
    ///
    /// `None` covers both "already up to date" and "release data unavailable"; fetch
    /// failures are never surfaced to the caller.
    pub async fn check_for_update(&self, current_version: &str) -> Option<UpdateDescriptor> {
        let release = self.cache.get().await?;
        let candidate = release.version();

        if !is_newer(candidate, current_version) {
            debug!(current = current_version, latest = candidate, "no update available");
            return None;
        }

        debug!(current = current_version, latest = candidate, "update available");
        Some(UpdateDescriptor {
            slug: self.header.slug.clone(),
            plugin: self.header.plugin_file.clone(),
            new_version: candidate.to_string(),
            download_url: release.zipball_url.clone(),
            info_url: release.html_url.clone(),
        })
    }

    /// Builds the "view details" payload for the latest release.
    pub async fn describe_for_info_screen(&self) -> Option<PluginInfo> {
        let release = self.cache.get().await?;
        Some(self.plugin_info(&release))
    }

    /// Host entry point for the details screen. Only answers for this plugin's slug.
    pub async fn plugin_information(&self, action: &str, slug: &str) -> Option<PluginInfo> {
        if action != PLUGIN_INFORMATION_ACTION || slug != self.header.slug {
            return None;
        }
        self.describe_for_info_screen().await
    }

    /// Clears cached release data once the host finishes a plugin update.
    ///
    /// Returns whether the cache was cleared.
    pub async fn on_host_update_completed(&self, event: &UpgradeEvent) -> bool {
        if !event.is_plugin_update() {
            return false;
        }
        self.cache.invalidate().await;
        true
    }

    fn plugin_info(&self, release: &ReleaseMetadata) -> PluginInfo {
        let header = &self.header;
        PluginInfo {
            name: header.name.clone(),
            slug: header.slug.clone(),
            version: release.version().to_string(),
            author: header.author.clone(),
            author_profile: header.author_uri.clone(),
            requires: header.requires.clone(),
            tested: header.tested.clone(),
            requires_php: header.requires_php.clone(),
            last_updated: release.published_at.map(|at| at.date_naive()),
            homepage: header.plugin_uri.clone(),
            short_description: header.description.clone(),
            sections: PluginSections {
                description: header.description.clone(),
                changelog: release
                    .body
                    .as_deref()
                    .map(format_changelog)
                    .unwrap_or_default(),
            },
            download_link: release.zipball_url.clone(),
        }
    }
}
