//! Mercurial driver for bitbucket.org - uses the Bitbucket 1.0 API and raw
//! file access, no local clone.

use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use super::driver::{DriverTransport, RevisionLabels, VcsDriver};
use crate::error::{Result, VcsError};
use crate::http::{tls_available, ContentFetcher, NotificationHook, StreamContextFactory};
use crate::package::{Dist, Source};

const SITE_HOST: &str = "bitbucket.org";
const API_HOST: &str = "api.bitbucket.org";

lazy_static! {
    static ref REPOSITORY_URL_RE: Regex = Regex::new(r"^https://bitbucket\.org/([^/]+)/([^/]+)/?$").unwrap();
}

/// Owner and repository name parsed from a repository URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryCoordinate {
    pub owner: String,
    pub name: String,
}

/// Parse `https://bitbucket.org/<owner>/<repo>[/]`.
pub fn parse_hg_bitbucket_url(url: &str) -> Option<RepositoryCoordinate> {
    let captures = REPOSITORY_URL_RE.captures(url)?;

    Some(RepositoryCoordinate {
        owner: captures[1].to_string(),
        name: captures[2].to_string(),
    })
}

/// Bitbucket driver for Mercurial repositories
pub struct HgBitbucketDriver {
    /// Repository URL
    url: String,
    transport: DriverTransport,
    /// Set by `initialize()`
    coordinate: Option<RepositoryCoordinate>,
    /// URL scheme for API and raw requests, fixed at initialization
    scheme: &'static str,
    tags: Option<RevisionLabels>,
    branches: Option<RevisionLabels>,
    root_identifier: Option<String>,
    /// composer.json per identifier, keyed exactly as requested
    info_cache: HashMap<String, Value>,
}

impl HgBitbucketDriver {
    /// Create a driver; call [`VcsDriver::initialize`] before querying it.
    pub fn new(
        url: impl Into<String>,
        fetcher: Arc<dyn ContentFetcher>,
        factory: StreamContextFactory,
    ) -> Self {
        Self {
            url: url.into(),
            transport: DriverTransport::new(fetcher, factory),
            coordinate: None,
            scheme: "https",
            tags: None,
            branches: None,
            root_identifier: None,
            info_cache: HashMap::new(),
        }
    }

    /// Forward download progress of every request to `hook`
    pub fn with_notification(mut self, hook: NotificationHook) -> Self {
        self.transport = self.transport.with_notification(hook);
        self
    }

    pub fn coordinate(&self) -> Option<&RepositoryCoordinate> {
        self.coordinate.as_ref()
    }

    pub fn scheme(&self) -> &str {
        self.scheme
    }

    /// [`VcsDriver::supports`] with an explicit TLS capability.
    ///
    /// The API is HTTPS-only, so without TLS the driver declines instead of
    /// failing later.
    pub fn supports_with_tls(url: &str, tls: bool) -> bool {
        if !REPOSITORY_URL_RE.is_match(url) {
            return false;
        }

        if !tls {
            log::debug!(
                "Skipping Bitbucket hg driver for {} because TLS support is not available",
                url
            );
            return false;
        }

        true
    }

    fn coordinate_or_err(&self) -> Result<&RepositoryCoordinate> {
        self.coordinate.as_ref().ok_or(VcsError::NotInitialized)
    }

    fn api_url(&self, endpoint: &str) -> Result<String> {
        let coordinate = self.coordinate_or_err()?;
        Ok(format!(
            "{}://{}/1.0/repositories/{}/{}/{}",
            self.scheme, API_HOST, coordinate.owner, coordinate.name, endpoint
        ))
    }

    fn site_url(&self, path: &str) -> Result<String> {
        let coordinate = self.coordinate_or_err()?;
        Ok(format!(
            "{}://{}/{}/{}/{}",
            self.scheme, SITE_HOST, coordinate.owner, coordinate.name, path
        ))
    }

    fn load_tags(&mut self) -> Result<&RevisionLabels> {
        if self.tags.is_none() {
            let url = self.api_url("tags")?;
            let data = self.transport.get_json(&url)?;
            self.tags = Some(parse_labels(&data, &url)?);
        }

        Ok(&*self.tags.get_or_insert_with(RevisionLabels::new))
    }

    fn load_branches(&mut self) -> Result<&RevisionLabels> {
        if self.branches.is_none() {
            let url = self.api_url("branches")?;
            let data = self.transport.get_json(&url)?;
            self.branches = Some(parse_labels(&data, &url)?);
        }

        Ok(&*self.branches.get_or_insert_with(RevisionLabels::new))
    }

    /// Tag name pointing at `identifier`, or the identifier itself.
    fn label_for(&mut self, identifier: &str) -> Result<String> {
        let tags = self.load_tags()?;

        Ok(tags
            .iter()
            .find(|(_, node)| node.as_str() == identifier)
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| identifier.to_string()))
    }

    fn fetch_manifest(&self, url: &str) -> Result<Option<String>> {
        let contents = self.transport.get_contents(url)?;
        if contents.is_empty() {
            log::debug!("Empty composer.json at {}", url);
            return Ok(None);
        }

        Ok(Some(contents))
    }
}

impl VcsDriver for HgBitbucketDriver {
    fn initialize(&mut self) -> Result<()> {
        let coordinate = parse_hg_bitbucket_url(&self.url)
            .ok_or_else(|| VcsError::UnsupportedUrl(self.url.clone()))?;

        self.scheme = if self.transport.factory().tls() {
            "https"
        } else {
            "http"
        };
        log::trace!(
            "Initialized Bitbucket hg driver for {}/{}",
            coordinate.owner,
            coordinate.name
        );
        self.coordinate = Some(coordinate);

        Ok(())
    }

    fn get_root_identifier(&mut self) -> Result<String> {
        if let Some(root) = &self.root_identifier {
            return Ok(root.clone());
        }

        let root = match self.tags.as_ref().and_then(|tags| tags.get("tip")) {
            Some(tip) => tip.clone(),
            None => {
                let url = self.api_url("tags")?;
                let data = self.transport.get_json(&url)?;

                let tip = data
                    .get("tip")
                    .and_then(|tip| tip.get("raw_node"))
                    .and_then(Value::as_str)
                    .ok_or_else(|| VcsError::InvalidResponse {
                        url: url.clone(),
                        message: "missing tip.raw_node".to_string(),
                    })?
                    .to_string();

                // Other malformed labels only matter to get_tags
                if self.tags.is_none() {
                    if let Ok(tags) = parse_labels(&data, &url) {
                        self.tags = Some(tags);
                    }
                }
                tip
            }
        };

        self.root_identifier = Some(root.clone());
        Ok(root)
    }

    fn get_url(&self) -> &str {
        &self.url
    }

    fn get_source(&mut self, identifier: &str) -> Result<Source> {
        let label = self.label_for(identifier)?;

        Ok(Source::hg(self.url.clone(), label))
    }

    fn get_dist(&mut self, identifier: &str) -> Result<Dist> {
        let label = self.label_for(identifier)?;
        let url = self.site_url(&format!("get/{}.zip", label))?;

        Ok(Dist::zip(url).with_reference(label).with_shasum(""))
    }

    fn get_composer_information(&mut self, identifier: &str) -> Result<Option<Value>> {
        if let Some(info) = self.info_cache.get(identifier) {
            return Ok(Some(info.clone()));
        }

        let manifest_url = self.site_url(&format!("raw/{}/composer.json", identifier))?;

        // Empty bodies are not cached; the next call asks again.
        let Some(contents) = self.fetch_manifest(&manifest_url)? else {
            return Ok(None);
        };

        let mut composer = crate::json::parse_json(&contents, &manifest_url)?;
        let Some(object) = composer.as_object_mut() else {
            return Err(VcsError::InvalidResponse {
                url: manifest_url,
                message: "composer.json must contain a JSON object".to_string(),
            });
        };

        if object.get("time").map_or(true, Value::is_null) {
            let url = self.api_url(&format!("changesets/{}", identifier))?;
            let changeset = self.transport.get_json(&url)?;
            let timestamp = changeset
                .get("timestamp")
                .cloned()
                .ok_or_else(|| VcsError::InvalidResponse {
                    url: url.clone(),
                    message: "missing timestamp".to_string(),
                })?;
            object.insert("time".to_string(), timestamp);
        }

        self.info_cache.insert(identifier.to_string(), composer.clone());
        Ok(Some(composer))
    }

    fn get_tags(&mut self) -> Result<RevisionLabels> {
        self.load_tags().cloned()
    }

    fn get_branches(&mut self) -> Result<RevisionLabels> {
        self.load_branches().cloned()
    }

    fn get_vcs_type(&self) -> &str {
        "hg"
    }

    fn supports(url: &str, _deep: bool) -> bool {
        Self::supports_with_tls(url, tls_available())
    }
}

/// Read a `{label: {"raw_node": ...}}` listing.
fn parse_labels(data: &Value, url: &str) -> Result<RevisionLabels> {
    let entries = data.as_object().ok_or_else(|| VcsError::InvalidResponse {
        url: url.to_string(),
        message: "expected an object of labels".to_string(),
    })?;

    entries
        .iter()
        .map(|(label, entry)| {
            let node = entry
                .get("raw_node")
                .and_then(Value::as_str)
                .ok_or_else(|| VcsError::InvalidResponse {
                    url: url.to_string(),
                    message: format!("label \"{}\" has no raw_node", label),
                })?;
            Ok((label.clone(), node.to_string()))
        })
        .collect()
}
