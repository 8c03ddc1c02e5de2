//! Configuration for network access
//!
//! Settings come from built-in defaults plus, when enabled, the process
//! environment. The only environment-driven settings are the proxy variables
//! `http_proxy` and `HTTP_PROXY`; they are read once into an immutable
//! [`ProxyConfig`](crate::http::ProxyConfig).
//!
//! # Example
//!
//! ```rust,no_run
//! use pox_vcs::config::{default_fetcher, Config};
//! use pox_vcs::vcs::VcsRepository;
//!
//! let config = Config::build(true);
//! let mut repository = VcsRepository::new(
//!     "https://bitbucket.org/owner/repo",
//!     default_fetcher(&config),
//!     config.context_factory(),
//! )
//! .unwrap();
//!
//! for package in repository.load_packages().unwrap() {
//!     println!("{} {}", package.name, package.version);
//! }
//! ```

mod config;
mod source;

pub use config::{default_fetcher, Config};
pub use source::ConfigLoader;
