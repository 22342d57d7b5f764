pub mod config;
pub mod error;
pub mod models;
pub mod pool;
pub mod scrapers;

pub use config::ClientConfig;
pub use error::{Result, ScrapeError};
pub use models::{CityResult, CommentEntry, HotelSummary};
pub use pool::{FingerprintPool, ImpersonationProfile, ProxyCredential};
pub use scrapers::{HotelSearchParams, TripClient};
