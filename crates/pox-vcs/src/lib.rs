pub mod config;
pub mod error;
pub mod http;
pub mod json;
pub mod package;
pub mod vcs;

pub use config::{Config, ConfigLoader};
pub use error::{Result, VcsError};
pub use http::{ContentFetcher, HttpFetcher, ProxyConfig, StreamContext, StreamContextFactory};
pub use package::{Dist, Source, VcsPackage};
pub use vcs::{create_driver, HgBitbucketDriver, VcsDriver, VcsRepository, VcsType};
