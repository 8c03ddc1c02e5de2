//! Package descriptors produced by VCS drivers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Source information for a package (VCS like git, hg, svn)
///
/// The source represents where the package source code can be obtained from
/// version control systems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Type of source repository (git, hg, svn, etc.)
    #[serde(rename = "type")]
    pub source_type: String,

    /// URL to the repository
    pub url: String,

    /// Reference (commit hash, tag, branch) to check out
    pub reference: String,
}

impl Source {
    pub fn new(
        source_type: impl Into<String>,
        url: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            source_type: source_type.into(),
            url: url.into(),
            reference: reference.into(),
        }
    }

    /// Creates a mercurial (hg) source
    pub fn hg(url: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::new("hg", url, reference)
    }
}

/// Distribution information for a package (archive download)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dist {
    /// Type of distribution archive (zip, tar, etc.)
    #[serde(rename = "type")]
    pub dist_type: String,

    /// URL to download the archive
    pub url: String,

    /// Reference (tag name or changeset id)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// SHA-1 checksum of the archive. Empty when the host generates archives
    /// on the fly; the downloader has to verify what it gets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shasum: Option<String>,
}

impl Dist {
    pub fn new(dist_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            dist_type: dist_type.into(),
            url: url.into(),
            reference: None,
            shasum: None,
        }
    }

    /// Creates a zip distribution
    pub fn zip(url: impl Into<String>) -> Self {
        Self::new("zip", url)
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_shasum(mut self, shasum: impl Into<String>) -> Self {
        self.shasum = Some(shasum.into());
        self
    }
}

/// One version of a package discovered in a VCS repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VcsPackage {
    pub name: String,
    pub version: String,
    /// Changeset the version was read from
    pub identifier: String,
    pub source: Source,
    pub dist: Dist,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Decoded composer.json at `identifier`
    pub manifest: Value,
}
