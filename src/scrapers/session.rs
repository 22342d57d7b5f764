use crate::error::Result;
use crate::pool::{FingerprintPool, ImpersonationProfile, ProxyCredential};
use crate::scrapers::traits::{RawResponse, SessionFactory, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use wreq::header::ACCEPT;
use wreq::{Client, Proxy};

/// wreq client bound to one proxy and one browser emulation
pub struct HttpSession {
    client: Client,
    proxy: ProxyCredential,
    profile: ImpersonationProfile,
}

impl HttpSession {
    pub fn new(
        proxy: ProxyCredential,
        profile: ImpersonationProfile,
        timeout: Duration,
    ) -> Result<Self> {
        let mut builder = Client::builder()
            .emulation(profile.emulation())
            .timeout(timeout)
            .cookie_store(true);

        // Same credentials for both schemes
        builder = match (proxy.endpoint(), &proxy) {
            (
                Some(endpoint),
                ProxyCredential::Authenticated {
                    username, password, ..
                },
            ) => builder
                .proxy(Proxy::http(&endpoint)?.basic_auth(username, password))
                .proxy(Proxy::https(&endpoint)?.basic_auth(username, password)),
            _ => builder.no_proxy(),
        };

        let client = builder.build()?;
        debug!("Opened session via {} as {}", proxy, profile);

        Ok(Self {
            client,
            proxy,
            profile,
        })
    }

    pub fn proxy(&self) -> &ProxyCredential {
        &self.proxy
    }

    pub fn profile(&self) -> ImpersonationProfile {
        self.profile
    }

    async fn read(response: wreq::Response) -> Result<RawResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("Downloaded {} bytes ({})", body.len(), status);

        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpSession {
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<RawResponse> {
        debug!("GET {} ({} query params)", url, query.len());
        let response = self.client.get(url).query(query).send().await?;
        Self::read(response).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse> {
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;
        Self::read(response).await
    }
}

/// Opens an [`HttpSession`] on a freshly drawn proxy and profile per call
pub struct PooledSessions {
    pool: FingerprintPool,
    timeout: Duration,
}

impl PooledSessions {
    pub fn new(pool: FingerprintPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    pub fn pool(&self) -> &FingerprintPool {
        &self.pool
    }
}

impl SessionFactory for PooledSessions {
    type Session = HttpSession;

    fn open_session(&self) -> Result<HttpSession> {
        let proxy = self.pool.select_proxy().clone();
        let profile = self.pool.select_impersonation();
        HttpSession::new(proxy, profile, self.timeout)
    }
}
