//! Maps decoded trip.com documents onto the output records.
//!
//! Required fields go through typed serde structs, so a missing one fails the
//! whole call with `SchemaMismatch`. Only the advantage tags and the price
//! text are allowed to be absent.

use crate::error::{Result, ScrapeError};
use crate::models::{CityResult, CommentEntry, HotelSummary};
use regex::Regex;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::{Number, Value};
use std::sync::OnceLock;
use tracing::debug;

pub const PRICE_UNAVAILABLE: &str = "unavailable";

const REVIEW_SUFFIX: &str = "reviews";

/// Number or text, upstream uses both for the same fields
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(Number),
    Text(String),
}

fn loose_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Number(n) => n.to_string(),
        Loose::Text(s) => s,
    })
}

fn loose_i64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i64, D::Error> {
    match Loose::deserialize(deserializer)? {
        Loose::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("expected an integer, got {}", n))),
        Loose::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected an integer, got {:?}", s))),
    }
}

/// Keeps the upstream number as written, `3` stays an integer
fn loose_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Number, D::Error> {
    match Loose::deserialize(deserializer)? {
        Loose::Number(n) => Ok(n),
        Loose::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a number, got {:?}", s))),
    }
}

fn schema_mismatch(what: &str, err: serde_json::Error, doc: &Value) -> ScrapeError {
    ScrapeError::SchemaMismatch {
        detail: format!("{}: {}", what, err),
        raw: doc.to_string(),
    }
}

// City search

#[derive(Deserialize)]
struct KeywordMatch {
    city: KeywordCity,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeywordCity {
    enus_name: String,
    #[serde(deserialize_with = "loose_i64")]
    geo_code: i64,
}

/// First entry of `keyWordSearchResults`; later matches are ignored
pub fn extract_city(keyword: &str, doc: &Value) -> Result<CityResult> {
    let first = doc
        .get("keyWordSearchResults")
        .and_then(Value::as_array)
        .and_then(|results| results.first())
        .ok_or_else(|| ScrapeError::NoMatch {
            keyword: keyword.to_string(),
            raw: doc.to_string(),
        })?;

    let found = KeywordMatch::deserialize(first)
        .map_err(|e| schema_mismatch("keyWordSearchResults[0]", e, doc))?;

    Ok(CityResult {
        city_code: found.city.geo_code,
        city_name: found.city.enus_name,
    })
}

// Hotel listing

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HotelListPage {
    init_data: InitData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitData {
    first_page_list: FirstPageList,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FirstPageList {
    hotel_list: Vec<HotelRow>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HotelRow {
    hotel_basic_info: HotelBasicInfo,
    hotel_star_info: HotelStarInfo,
    comment_info: CommentInfo,
    #[serde(default)]
    room_tags: Option<RoomTags>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HotelBasicInfo {
    #[serde(deserialize_with = "loose_i64")]
    hotel_id: i64,
    hotel_name: String,
    hotel_address: String,
    #[serde(default)]
    price_explanation: Option<String>,
}

#[derive(Deserialize)]
struct HotelStarInfo {
    #[serde(deserialize_with = "loose_number")]
    star: Number,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentInfo {
    #[serde(deserialize_with = "loose_string")]
    comment_score: String,
    #[serde(deserialize_with = "loose_string")]
    commenter_number: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoomTags {
    #[serde(default)]
    advantage_tags: Option<Vec<AdvantageTag>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdvantageTag {
    tag_title: String,
}

impl From<HotelRow> for HotelSummary {
    fn from(row: HotelRow) -> Self {
        let total_price = row
            .hotel_basic_info
            .price_explanation
            .as_deref()
            .map(extract_total_price)
            .unwrap_or_else(|| PRICE_UNAVAILABLE.to_string());

        let advantages = row
            .room_tags
            .and_then(|tags| tags.advantage_tags)
            .unwrap_or_default()
            .into_iter()
            .map(|tag| tag.tag_title)
            .collect();

        HotelSummary {
            hotel_id: row.hotel_basic_info.hotel_id,
            hotel_name: row.hotel_basic_info.hotel_name,
            hotel_address: row.hotel_basic_info.hotel_address,
            stars: row.hotel_star_info.star,
            comments_score: row.comment_info.comment_score,
            comments_count: strip_review_suffix(&row.comment_info.commenter_number).to_string(),
            advantages,
            total_price,
        }
    }
}

/// Rows of `initData.firstPageList.hotelList`, in order. One malformed row
/// fails the whole page.
pub fn extract_hotels(doc: &Value) -> Result<Vec<HotelSummary>> {
    let page = HotelListPage::deserialize(doc)
        .map_err(|e| schema_mismatch("initData.firstPageList.hotelList", e, doc))?;

    let hotels: Vec<HotelSummary> = page
        .init_data
        .first_page_list
        .hotel_list
        .into_iter()
        .map(HotelSummary::from)
        .collect();
    debug!("Extracted {} hotels", hotels.len());

    Ok(hotels)
}

fn price_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\d+").expect("valid price pattern"))
}

/// First `$<digits>` in the price text, or the placeholder
pub fn extract_total_price(text: &str) -> String {
    price_pattern()
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| PRICE_UNAVAILABLE.to_string())
}

/// Removes a literal `reviews` suffix, then one trailing space
pub fn strip_review_suffix(count: &str) -> &str {
    let count = count.strip_suffix(REVIEW_SUFFIX).unwrap_or(count);
    count.strip_suffix(' ').unwrap_or(count)
}

// Comments

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentPage {
    data: CommentData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentData {
    comment_list: Vec<CommentRow>,
}

#[derive(Deserialize)]
struct CommentRow {
    content: String,
    #[serde(deserialize_with = "loose_number")]
    rating: Number,
}

pub fn extract_comments(doc: &Value) -> Result<Vec<CommentEntry>> {
    let page = CommentPage::deserialize(doc)
        .map_err(|e| schema_mismatch("data.commentList", e, doc))?;

    Ok(page
        .data
        .comment_list
        .into_iter()
        .map(|row| CommentEntry {
            comment: row.content,
            rating: row.rating,
        })
        .collect())
}
