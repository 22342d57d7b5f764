use crate::error::{Result, ScrapeError};
use std::fmt;
use std::str::FromStr;

/// One entry of the proxy list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyCredential {
    /// No proxy, connect directly
    Direct,
    Authenticated {
        username: String,
        password: String,
        host: String,
        port: u16,
    },
}

impl ProxyCredential {
    /// Proxy endpoint without credentials, e.g. `http://10.0.0.1:8080`
    pub fn endpoint(&self) -> Option<String> {
        match self {
            ProxyCredential::Direct => None,
            ProxyCredential::Authenticated { host, port, .. } => {
                Some(format!("http://{}:{}", host, port))
            }
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, ProxyCredential::Direct)
    }
}

impl FromStr for ProxyCredential {
    type Err = ScrapeError;

    /// Parses `user:pass@host:port`
    fn from_str(line: &str) -> Result<Self> {
        let normalized = line.trim().replace('@', ":");
        let parts: Vec<&str> = normalized.split(':').collect();

        let [username, password, host, port] = parts.as_slice() else {
            return Err(ScrapeError::InvalidProxy(line.to_string()));
        };
        if host.is_empty() {
            return Err(ScrapeError::InvalidProxy(line.to_string()));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| ScrapeError::InvalidProxy(line.to_string()))?;

        Ok(ProxyCredential::Authenticated {
            username: username.to_string(),
            password: password.to_string(),
            host: host.to_string(),
            port,
        })
    }
}

// Never prints the password, safe for logs.
impl fmt::Display for ProxyCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyCredential::Direct => write!(f, "direct"),
            ProxyCredential::Authenticated {
                username, host, port, ..
            } => write!(f, "{}:***@{}:{}", username, host, port),
        }
    }
}

/// Parses a line-oriented proxy list, skipping blank lines
pub fn parse_proxy_list(text: &str) -> Result<Vec<ProxyCredential>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::parse)
        .collect()
}
