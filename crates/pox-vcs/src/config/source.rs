use std::env;

use crate::http::ProxyConfig;

/// Reads settings from the process environment
#[derive(Debug)]
pub struct ConfigLoader {
    use_environment: bool,
}

impl ConfigLoader {
    pub fn new(use_environment: bool) -> Self {
        Self { use_environment }
    }

    /// Get a non-empty environment variable
    pub fn get_env(&self, var: &str) -> Option<String> {
        if !self.use_environment {
            return None;
        }

        env::var(var).ok().filter(|s| !s.is_empty())
    }

    /// Resolve `http_proxy` / `HTTP_PROXY`, lowercase first
    pub fn proxy_config(&self) -> ProxyConfig {
        ProxyConfig::from_lookup(|name| self.get_env(name))
    }
}
