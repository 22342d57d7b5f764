use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Status and text body of one upstream response
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A client session bound to one proxy and one impersonation profile
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET with query pairs, repeated keys allowed
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<RawResponse>;

    /// POST with a JSON body
    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse>;
}

/// Opens a fresh session for every logical call
pub trait SessionFactory: Send + Sync {
    type Session: Transport;

    fn open_session(&self) -> Result<Self::Session>;
}
