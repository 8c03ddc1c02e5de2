use std::sync::Arc;

use crate::http::{
    tls_available, ContentFetcher, HttpClientConfig, HttpFetcher, ProxyConfig, StreamContextFactory,
};

use super::source::ConfigLoader;

/// Network settings shared by every driver of a run.
#[derive(Debug, Clone)]
pub struct Config {
    pub http: HttpClientConfig,
    pub proxy: ProxyConfig,
    /// Runtime TLS capability; defaults to what the build supports
    pub tls: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpClientConfig::default(),
            proxy: ProxyConfig::none(),
            tls: tls_available(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the configuration, reading the proxy from the environment when
    /// `use_environment` is set.
    pub fn build(use_environment: bool) -> Self {
        let loader = ConfigLoader::new(use_environment);
        let proxy = loader.proxy_config();

        if let Some(url) = proxy.url() {
            log::debug!("Using HTTP proxy {}", url);
        }

        Self {
            proxy,
            ..Self::default()
        }
    }

    pub fn with_http(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }

    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    pub fn context_factory(&self) -> StreamContextFactory {
        StreamContextFactory::new(self.proxy.clone()).with_tls(self.tls)
    }

    pub fn fetcher(&self) -> HttpFetcher {
        HttpFetcher::new(self.http.clone())
    }
}

/// Build the default fetcher behind a trait object, ready for drivers.
pub fn default_fetcher(config: &Config) -> Arc<dyn ContentFetcher> {
    Arc::new(config.fetcher())
}
