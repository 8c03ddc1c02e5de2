//! Outbound HTTP support for VCS drivers.
//!
//! A fetch is described by a [`StreamContext`] built by the
//! [`StreamContextFactory`] from caller defaults and an immutable
//! [`ProxyConfig`], then executed by a [`ContentFetcher`].
//!
//! ```no_run
//! use pox_vcs::http::{ContentFetcher, ContextParams, HttpFetcher, ProxyConfig, StreamContextFactory};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = StreamContextFactory::new(ProxyConfig::from_env());
//! let context = factory.get_context(serde_json::Map::new(), ContextParams::default())?;
//!
//! let body = HttpFetcher::default().get_contents("https://bitbucket.org/", &context)?;
//! println!("{} bytes", body.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod context;
mod proxy;

pub use client::{ContentFetcher, HttpClientConfig, HttpError, HttpFetcher};
pub use context::{
    merge_options, ContextParams, Notification, NotificationHook, StreamContext,
    StreamContextFactory,
};
pub use proxy::{ProxyConfig, ProxyTransport, StreamProxy};

/// Whether this build can speak TLS (HTTPS targets and `https://` proxies).
pub const fn tls_available() -> bool {
    cfg!(feature = "tls")
}
