//! VCS repository support - discovers packages from version control systems
//! through the hosting provider's HTTP API.
//!
//! This module provides:
//! - The [`VcsDriver`] trait every provider driver implements
//! - [`HgBitbucketDriver`] for Mercurial repositories on bitbucket.org
//! - Driver selection ([`create_driver`]) and [`VcsRepository`], which turns
//!   tags and branches into package versions

mod driver;
mod hg_bitbucket;
mod repository;

pub use driver::{normalize_branch, normalize_tag, DriverTransport, RevisionLabels, VcsDriver};
pub use hg_bitbucket::{parse_hg_bitbucket_url, HgBitbucketDriver, RepositoryCoordinate};
pub use repository::{create_driver, VcsRepository, VcsType};
