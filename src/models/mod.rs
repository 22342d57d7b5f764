use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Best keyword match of a city search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CityResult {
    pub city_code: i64,
    pub city_name: String,
}

/// One row of the hotel listing, in upstream order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HotelSummary {
    pub hotel_id: i64,
    pub hotel_name: String,
    pub hotel_address: String,
    /// As upstream wrote it, integer or decimal
    pub stars: Number,
    pub comments_score: String,
    /// Review count with the unit suffix removed
    pub comments_count: String,
    pub advantages: Vec<String>,
    /// `$<amount>` or `"unavailable"`
    pub total_price: String,
}

/// One guest review
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentEntry {
    pub comment: String,
    pub rating: Number,
}
