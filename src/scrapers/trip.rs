use crate::config::ClientConfig;
use crate::error::Result;
use crate::models::{CityResult, CommentEntry, HotelSummary};
use crate::pool::FingerprintPool;
use crate::scrapers::dates::normalize_date;
use crate::scrapers::extract::{extract_city, extract_comments, extract_hotels};
use crate::scrapers::session::PooledSessions;
use crate::scrapers::traits::{RawResponse, SessionFactory, Transport};
use crate::scrapers::types::{to_query_pairs, HotelSearchParams, QueryValue};
use crate::scrapers::unwrap::{decode_payload, unwrap_embedded_hotel_json};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

pub const KEYWORD_SEARCH_PATH: &str = "/htls/getKeyWordSearch";
pub const HOTEL_LIST_PATH: &str = "/hotels/list";
pub const HOTEL_COMMENT_PATH: &str = "/restapi/soa2/28820/ctgetHotelComment";

const LOCALE: &str = "en-XX";
const CURRENCY: &str = "USD";

/// trip.com client. Every call opens its own session, so one proxy and one
/// profile serve exactly one request.
pub struct TripClient<S = PooledSessions> {
    sessions: S,
    base_url: String,
}

impl TripClient<PooledSessions> {
    /// Loads the proxy list (if configured) and builds the pool
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let pool = match &config.proxies_file {
            Some(path) => FingerprintPool::from_proxy_file(path)?,
            None => FingerprintPool::direct()?,
        };
        Ok(Self::new(
            PooledSessions::new(pool, config.timeout),
            &config.base_url,
        ))
    }
}

impl<S: SessionFactory> TripClient<S> {
    pub fn new(sessions: S, base_url: &str) -> Self {
        Self {
            sessions,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Resolves a free-text keyword to the first matching city
    pub async fn search_city(&self, keyword: &str) -> Result<CityResult> {
        info!("Searching city {:?}", keyword);

        let session = self.sessions.open_session()?;
        let response = session
            .post_json(&self.url(KEYWORD_SEARCH_PATH), &keyword_search_envelope(keyword))
            .await?;
        log_status(KEYWORD_SEARCH_PATH, &response);
        let doc = decode_payload(&response.body)?;

        let city = extract_city(keyword, &doc)?;
        info!("Matched {:?} to {} ({})", keyword, city.city_name, city.city_code);
        Ok(city)
    }

    /// First page of hotels for a city, in upstream order
    pub async fn list_hotels(&self, params: &HotelSearchParams) -> Result<Vec<HotelSummary>> {
        let check_in = normalize_date(&params.check_in)?;
        let check_out = normalize_date(&params.check_out)?;
        info!(
            "Listing hotels in {} ({}) from {} to {}",
            params.city_name, params.city_code, check_in, check_out
        );

        let query = to_query_pairs(&[
            ("city", QueryValue::from(params.city_code)),
            ("cityName", QueryValue::from(params.city_name.as_str())),
            ("checkin", QueryValue::from(check_in)),
            ("checkout", QueryValue::from(check_out)),
            ("barCurr", QueryValue::from(CURRENCY)),
            ("locale", QueryValue::from(LOCALE)),
            ("curr", QueryValue::from(CURRENCY)),
            ("adult", QueryValue::from(params.adults)),
            ("children", QueryValue::from(params.children)),
        ]);

        let session = self.sessions.open_session()?;
        let response = session.get(&self.url(HOTEL_LIST_PATH), &query).await?;
        log_status(HOTEL_LIST_PATH, &response);

        let payload = unwrap_embedded_hotel_json(&response.body);
        debug!(
            "Unwrapped {} of {} bytes from listing page",
            payload.len(),
            response.body.len()
        );
        let doc = decode_payload(payload)?;

        let hotels = extract_hotels(&doc)?;
        if hotels.is_empty() {
            warn!("No hotels listed for {}", params.city_name);
        } else {
            info!("Found {} hotels in {}", hotels.len(), params.city_name);
        }
        Ok(hotels)
    }

    /// First ten reviews of a hotel
    pub async fn list_comments(&self, hotel_id: i64) -> Result<Vec<CommentEntry>> {
        info!("Fetching comments for hotel {}", hotel_id);

        let session = self.sessions.open_session()?;
        let response = session
            .post_json(&self.url(HOTEL_COMMENT_PATH), &comments_envelope(hotel_id))
            .await?;
        log_status(HOTEL_COMMENT_PATH, &response);
        let doc = decode_payload(&response.body)?;

        let comments = extract_comments(&doc)?;
        info!("Found {} comments for hotel {}", comments.len(), hotel_id);
        Ok(comments)
    }
}

/// A blocked request often still carries the page, so decoding decides
fn log_status(path: &str, response: &RawResponse) {
    if !response.is_success() {
        warn!("{} returned status {}", path, response.status);
    }
}

/// Body of the keyword search. Upstream checks field presence, keep verbatim.
pub fn keyword_search_envelope(keyword: &str) -> Value {
    json!({
        "code": 0,
        "codeType": "",
        "keyWord": keyword,
        "searchType": "D",
        "scenicCode": 0,
        "cityCodeOfUser": 0,
        "searchConditions": [
            { "type": "D_PROVINCE", "value": "T" },
            { "type": "SupportNormalSearch", "value": "T" },
            { "type": "DisplayTagIcon", "value": "T" }
        ],
        "head": {
            "platform": "PC",
            "bu": "ibu",
            "group": "TRIP",
            "aid": "",
            "sid": "",
            "ouid": "",
            "caid": "",
            "csid": "",
            "couid": "",
            "region": "XX",
            "locale": LOCALE,
            "timeZone": "5",
            "currency": CURRENCY,
            "pageID": "10320668148",
            "deviceID": "PC",
            "clientVersion": "0",
            "extension": [
                { "name": "cityId", "value": "3263" },
                { "name": "checkIn", "value": "2025/06/01" },
                { "name": "checkOut", "value": "2025/06/03" },
                { "name": "region", "value": "XX" }
            ],
            "tripSub1": "",
            "hotelExtension": {}
        }
    })
}

/// Body of the comment request, first page of ten
pub fn comments_envelope(hotel_id: i64) -> Value {
    json!({
        "hotelId": hotel_id,
        "pageIndex": 1,
        "pageSize": 10,
        "repeatComment": 1,
        "needStaticInfo": false,
        "functionOptions": [
            "IntegratedTARating",
            "hidePicAndVideoAgg",
            "TripReviewsToServerOnline",
            "IntegratedExpediaList",
            "tripShuffled",
            "taAdvisorCount",
            "filterComment",
            "noShowNewExpedia"
        ],
        "head": {
            "platform": "PC",
            "cver": "0",
            "bu": "IBU",
            "group": "trip",
            "aid": "",
            "sid": "",
            "ouid": "",
            "locale": LOCALE,
            "timezone": "5",
            "currency": CURRENCY,
            "pageId": "10320668147"
        }
    })
}
