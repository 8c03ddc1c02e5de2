//! VCS driver trait and common types.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

use crate::error::{Result, VcsError};
use crate::http::{ContentFetcher, ContextParams, HttpError, NotificationHook, StreamContextFactory};
use crate::json::parse_json;
use crate::package::{Dist, Source};

/// Label name -> raw changeset id, in the order the host listed them.
pub type RevisionLabels = IndexMap<String, String>;

/// Trait for VCS drivers
///
/// Methods that may hit the network take `&mut self`: drivers memoize what
/// they fetch and are meant for a single caller at a time.
pub trait VcsDriver: Send {
    /// Parse the repository URL; fails with [`VcsError::UnsupportedUrl`]
    fn initialize(&mut self) -> Result<()>;

    /// Get the root/tip changeset identifier
    fn get_root_identifier(&mut self) -> Result<String>;

    /// Get the repository URL as given
    fn get_url(&self) -> &str;

    /// Source descriptor for re-fetching `identifier` with the VCS tool.
    /// Known tag ids are reported by tag name.
    fn get_source(&mut self, identifier: &str) -> Result<Source>;

    /// Archive descriptor for `identifier`
    fn get_dist(&mut self, identifier: &str) -> Result<Dist>;

    /// composer.json at `identifier`, or `None` when the revision has none
    fn get_composer_information(&mut self, identifier: &str) -> Result<Option<Value>>;

    /// Get all tags with their identifiers
    fn get_tags(&mut self) -> Result<RevisionLabels>;

    /// Get all branches with their identifiers
    fn get_branches(&mut self) -> Result<RevisionLabels>;

    /// Get the VCS type (git, hg, svn, etc.)
    fn get_vcs_type(&self) -> &str;

    /// Check if the driver supports the given URL. Never touches the network.
    fn supports(url: &str, deep: bool) -> bool
    where
        Self: Sized;
}

/// Shared download plumbing for drivers: builds a context for every request
/// and hands it to the fetcher.
#[derive(Clone)]
pub struct DriverTransport {
    fetcher: Arc<dyn ContentFetcher>,
    factory: StreamContextFactory,
    notification: Option<NotificationHook>,
}

impl DriverTransport {
    pub fn new(fetcher: Arc<dyn ContentFetcher>, factory: StreamContextFactory) -> Self {
        Self {
            fetcher,
            factory,
            notification: None,
        }
    }

    pub fn with_notification(mut self, hook: NotificationHook) -> Self {
        self.notification = Some(hook);
        self
    }

    pub fn factory(&self) -> &StreamContextFactory {
        &self.factory
    }

    /// Download `url` as text.
    pub fn get_contents(&self, url: &str) -> Result<String> {
        let mut options = Map::new();
        options.insert("http".to_string(), json!({"method": "GET"}));

        let params = ContextParams {
            notification: self.notification.clone(),
            options: None,
        };

        let context = self
            .factory
            .get_context(options, params)
            .map_err(|source| fetch_error(url, source))?;

        log::debug!("Downloading {}", url);
        let body = self
            .fetcher
            .get_contents(url, &context)
            .map_err(|source| fetch_error(url, source))?;

        String::from_utf8(body).map_err(|e| VcsError::InvalidResponse {
            url: url.to_string(),
            message: format!("body is not valid UTF-8: {}", e),
        })
    }

    /// Download and decode a JSON document.
    pub fn get_json(&self, url: &str) -> Result<Value> {
        let contents = self.get_contents(url)?;
        parse_json(&contents, url)
    }
}

fn fetch_error(url: &str, source: HttpError) -> VcsError {
    match source {
        HttpError::MissingTls => VcsError::MissingCapability(format!(
            "TLS support is required to fetch {} through an https proxy",
            url
        )),
        source => VcsError::Fetch {
            url: url.to_string(),
            source,
        },
    }
}

/// Normalize a version string from a tag
pub fn normalize_tag(tag: &str) -> Option<String> {
    let tag = tag.trim();

    // Strip common prefixes
    let version = tag
        .strip_prefix("release-")
        .or_else(|| tag.strip_prefix('v'))
        .unwrap_or(tag);

    // Basic validation - must start with a digit
    if !version.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    Some(version.to_string())
}

/// Normalize a branch name to a version
pub fn normalize_branch(branch: &str) -> String {
    let branch = branch.trim();

    // Numbered branches (e.g. "1.0", "2.x") become dev versions
    if branch.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{}-dev", branch.replace(".x", ".9999999"))
    } else {
        format!("dev-{}", branch)
    }
}
