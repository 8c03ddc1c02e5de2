//! Driver selection and version discovery for VCS repositories.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::driver::{normalize_branch, normalize_tag, VcsDriver};
use super::hg_bitbucket::HgBitbucketDriver;
use crate::error::{Result, VcsError};
use crate::http::{ContentFetcher, StreamContextFactory};
use crate::package::VcsPackage;

/// The drivers this crate knows about, in probing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcsType {
    /// Mercurial repositories on bitbucket.org
    HgBitbucket,
}

impl VcsType {
    pub const ALL: &'static [VcsType] = &[VcsType::HgBitbucket];

    pub fn as_str(&self) -> &'static str {
        match self {
            VcsType::HgBitbucket => "hg-bitbucket",
        }
    }

    /// Whether this driver kind can handle `url`, given the TLS capability.
    pub fn supports(&self, url: &str, _deep: bool, tls: bool) -> bool {
        match self {
            VcsType::HgBitbucket => HgBitbucketDriver::supports_with_tls(url, tls),
        }
    }

    /// First driver kind, in [`VcsType::ALL`] order, that supports `url`.
    pub fn detect(url: &str, deep: bool, tls: bool) -> Option<VcsType> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.supports(url, deep, tls))
    }

    fn create(
        &self,
        url: &str,
        fetcher: Arc<dyn ContentFetcher>,
        factory: StreamContextFactory,
    ) -> Box<dyn VcsDriver> {
        match self {
            VcsType::HgBitbucket => Box::new(HgBitbucketDriver::new(url, fetcher, factory)),
        }
    }
}

impl fmt::Display for VcsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the first driver that supports `url` and initialize it.
pub fn create_driver(
    url: &str,
    fetcher: Arc<dyn ContentFetcher>,
    factory: StreamContextFactory,
) -> Result<Box<dyn VcsDriver>> {
    let kind = VcsType::detect(url, false, factory.tls())
        .ok_or_else(|| VcsError::UnsupportedUrl(url.to_string()))?;

    log::debug!("Using {} driver for {}", kind, url);
    let mut driver = kind.create(url, fetcher, factory);
    driver.initialize()?;

    Ok(driver)
}

/// A VCS repository read through a driver.
pub struct VcsRepository {
    driver: Box<dyn VcsDriver>,
}

impl VcsRepository {
    pub fn new(
        url: &str,
        fetcher: Arc<dyn ContentFetcher>,
        factory: StreamContextFactory,
    ) -> Result<Self> {
        Ok(Self::from_driver(create_driver(url, fetcher, factory)?))
    }

    /// Wrap an already initialized driver.
    pub fn from_driver(driver: Box<dyn VcsDriver>) -> Self {
        Self { driver }
    }

    pub fn url(&self) -> &str {
        self.driver.get_url()
    }

    pub fn driver_mut(&mut self) -> &mut dyn VcsDriver {
        self.driver.as_mut()
    }

    /// One package per tag that looks like a version and per branch, for
    /// revisions that carry a composer.json with a name.
    ///
    /// Listing failures propagate; a broken revision is logged and skipped.
    pub fn load_packages(&mut self) -> Result<Vec<VcsPackage>> {
        let mut packages = Vec::new();

        let tags = self.driver.get_tags()?;
        for (tag, identifier) in &tags {
            let Some(version) = normalize_tag(tag) else {
                log::debug!("Skipped tag {}, invalid tag name", tag);
                continue;
            };

            match self.load_package(identifier, version) {
                Ok(Some(package)) => packages.push(package),
                Ok(None) => log::debug!("Skipped tag {}, no usable composer.json", tag),
                Err(e) => log::warn!("Skipped tag {}: {}", tag, e),
            }
        }

        let branches = self.driver.get_branches()?;
        for (branch, identifier) in &branches {
            match self.load_package(identifier, normalize_branch(branch)) {
                Ok(Some(package)) => packages.push(package),
                Ok(None) => log::debug!("Skipped branch {}, no usable composer.json", branch),
                Err(e) => log::warn!("Skipped branch {}: {}", branch, e),
            }
        }

        log::info!("Found {} versions in {}", packages.len(), self.url());
        Ok(packages)
    }

    fn load_package(&mut self, identifier: &str, version: String) -> Result<Option<VcsPackage>> {
        let Some(manifest) = self.driver.get_composer_information(identifier)? else {
            return Ok(None);
        };

        let Some(name) = manifest.get("name").and_then(Value::as_str) else {
            log::warn!("composer.json at {} has no name", identifier);
            return Ok(None);
        };

        Ok(Some(VcsPackage {
            name: name.to_string(),
            version,
            identifier: identifier.to_string(),
            source: self.driver.get_source(identifier)?,
            dist: self.driver.get_dist(identifier)?,
            time: manifest.get("time").and_then(Value::as_str).map(str::to_string),
            manifest,
        }))
    }
}
