//! # menumaster
//!
//! Hidden navigation-menu items and GitHub release update checks for the MenuMaster plugin.
//!
//! ## Example
//!
//! ```no_run
//! use menumaster::{PluginHeader, UpdateChecker, UpdaterConfig, UpgradeEvent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = UpdaterConfig::new("marvinfpham/menumaster")
//!         .token_from_env("GITHUB_ACCESS_TOKEN")
//!         .cache_file_path("/tmp/menumaster-release.json");
//!     let header = PluginHeader::new("menumaster", "menumaster/menumaster-plugin.php")
//!         .name("MenuMaster");
//!
//!     let checker = UpdateChecker::new(header, &config)?;
//!
//!     if let Some(update) = checker.check_for_update("1.0.1").await {
//!         println!("Update available: {} ({})", update.new_version, update.download_url);
//!     }
//!
//!     // After the host has installed the update
//!     checker
//!         .on_host_update_completed(&UpgradeEvent::new("update", "plugin"))
//!         .await;
//!
//!     Ok(())
//! }
//! ```

mod cache;
mod changelog;
mod checker;
mod clock;
mod error;
mod fetcher;
pub mod menu;
mod types;
mod version;

pub use cache::VersionCache;
pub use changelog::{escape_html, format_changelog};
pub use checker::UpdateChecker;
pub use clock::{Clock, SystemClock};
pub use error::{Result, UpdaterError};
pub use fetcher::{GitHubReleaseFetcher, ReleaseFetcher};
pub use types::{
    PluginHeader, PluginInfo, PluginSections, ReleaseMetadata, UpdateDescriptor, UpdaterConfig,
    UpgradeEvent, DEFAULT_TTL,
};
pub use version::{compare_versions, is_newer, strip_v_prefix};
