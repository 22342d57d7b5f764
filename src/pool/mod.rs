//! Proxy and fingerprint rotation.
//!
//! The pool is built once at start and only read afterwards. Every session
//! draws one proxy and one impersonation profile uniformly at random.

pub mod profile;
pub mod proxy;

pub use profile::ImpersonationProfile;
pub use proxy::{parse_proxy_list, ProxyCredential};

use crate::error::{Result, ScrapeError};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::path::Path;
use tracing::{debug, info};

static DIRECT: ProxyCredential = ProxyCredential::Direct;

#[derive(Debug, Clone)]
pub struct FingerprintPool {
    proxies: Vec<ProxyCredential>,
    profiles: Vec<ImpersonationProfile>,
}

impl FingerprintPool {
    /// An empty proxy list falls back to a direct connection; an empty
    /// profile list is rejected.
    pub fn new(
        proxies: Vec<ProxyCredential>,
        profiles: Vec<ImpersonationProfile>,
    ) -> Result<Self> {
        if profiles.is_empty() {
            return Err(ScrapeError::EmptyCatalog);
        }
        let proxies = if proxies.is_empty() {
            vec![ProxyCredential::Direct]
        } else {
            proxies
        };

        Ok(Self { proxies, profiles })
    }

    /// Pool over the given proxies and the full impersonation catalog
    pub fn with_proxies(proxies: Vec<ProxyCredential>) -> Result<Self> {
        Self::new(proxies, ImpersonationProfile::ALL.to_vec())
    }

    /// Direct connections only
    pub fn direct() -> Result<Self> {
        Self::with_proxies(Vec::new())
    }

    pub fn from_proxy_list(text: &str) -> Result<Self> {
        Self::with_proxies(parse_proxy_list(text)?)
    }

    /// Loads a line-oriented proxy file. An empty file is valid.
    pub fn from_proxy_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let pool = Self::from_proxy_list(&text)?;
        info!(
            "Loaded {} proxies from {}",
            pool.proxy_count(),
            path.display()
        );
        Ok(pool)
    }

    pub fn select_proxy(&self) -> &ProxyCredential {
        self.select_proxy_with(&mut rand::rng())
    }

    pub fn select_proxy_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &ProxyCredential {
        // non-empty by construction
        let proxy = self.proxies.choose(rng).unwrap_or(&DIRECT);
        debug!("Selected proxy {}", proxy);
        proxy
    }

    pub fn select_impersonation(&self) -> ImpersonationProfile {
        self.select_impersonation_with(&mut rand::rng())
    }

    pub fn select_impersonation_with<R: Rng + ?Sized>(&self, rng: &mut R) -> ImpersonationProfile {
        let profile = self
            .profiles
            .choose(rng)
            .copied()
            .unwrap_or(ImpersonationProfile::CHROME_136);
        debug!("Selected impersonation {}", profile);
        profile
    }

    pub fn proxies(&self) -> &[ProxyCredential] {
        &self.proxies
    }

    pub fn proxy_count(&self) -> usize {
        self.proxies.iter().filter(|p| !p.is_direct()).count()
    }

    pub fn profiles(&self) -> &[ImpersonationProfile] {
        &self.profiles
    }
}
