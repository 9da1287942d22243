//! Where the autos API lives.
//!
//! The default target is fixed at compile time: the local development server,
//! or the hosted deployment when built with the `hosted` feature. A process
//! can still point elsewhere through the environment:
//!
//! - `AUTOS_API_URL`: base URL, replacing the target's (e.g. `http://10.0.0.5:3000/api`)
//! - `AUTOS_API_TIMEOUT_SECS`: per-request timeout; unset means the HTTP
//!   client's own default

use std::env;
use std::time::Duration;

pub const LOCAL_API_URL: &str = "http://localhost:3000/api";
pub const HOSTED_API_URL: &str = "https://api-autos-pedro.onrender.com/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTarget {
    Local,
    Hosted,
}

impl ApiTarget {
    #[cfg(not(feature = "hosted"))]
    pub const DEFAULT: ApiTarget = ApiTarget::Local;
    #[cfg(feature = "hosted")]
    pub const DEFAULT: ApiTarget = ApiTarget::Hosted;

    pub fn base_url(self) -> &'static str {
        match self {
            ApiTarget::Local => LOCAL_API_URL,
            ApiTarget::Hosted => HOSTED_API_URL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_target(ApiTarget::DEFAULT)
    }
}

impl ClientConfig {
    pub fn for_target(target: ApiTarget) -> Self {
        Self {
            base_url: target.base_url().to_string(),
            timeout: None,
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("AUTOS_API_URL").filter(|url| !url.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        config.timeout = lookup("AUTOS_API_TIMEOUT_SECS")
            .and_then(|secs| secs.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        config
    }
}
