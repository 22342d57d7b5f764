use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use trip_scout::scrapers::{RawResponse, SessionFactory, Transport};
use trip_scout::{HotelSearchParams, ScrapeError, TripClient};

#[derive(Debug, Clone, PartialEq)]
enum Sent {
    Get {
        url: String,
        query: Vec<(String, String)>,
    },
    Post {
        url: String,
        body: Value,
    },
}

#[derive(Default)]
struct Recorder {
    opened: AtomicUsize,
    sent: Mutex<Vec<Sent>>,
}

/// Hands out sessions that answer every request with the same status and body
struct FakeSessions {
    status: u16,
    body: String,
    recorder: Arc<Recorder>,
}

struct FakeSession {
    status: u16,
    body: String,
    recorder: Arc<Recorder>,
}

impl SessionFactory for FakeSessions {
    type Session = FakeSession;

    fn open_session(&self) -> trip_scout::Result<FakeSession> {
        self.recorder.opened.fetch_add(1, Ordering::SeqCst);
        Ok(FakeSession {
            status: self.status,
            body: self.body.clone(),
            recorder: Arc::clone(&self.recorder),
        })
    }
}

#[async_trait]
impl Transport for FakeSession {
    async fn get(&self, url: &str, query: &[(String, String)]) -> trip_scout::Result<RawResponse> {
        self.recorder.sent.lock().unwrap().push(Sent::Get {
            url: url.to_string(),
            query: query.to_vec(),
        });
        Ok(RawResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }

    async fn post_json(&self, url: &str, body: &Value) -> trip_scout::Result<RawResponse> {
        self.recorder.sent.lock().unwrap().push(Sent::Post {
            url: url.to_string(),
            body: body.clone(),
        });
        Ok(RawResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

fn fake_client(body: impl Into<String>) -> (TripClient<FakeSessions>, Arc<Recorder>) {
    fake_client_with_status(200, body)
}

fn fake_client_with_status(
    status: u16,
    body: impl Into<String>,
) -> (TripClient<FakeSessions>, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let sessions = FakeSessions {
        status,
        body: body.into(),
        recorder: Arc::clone(&recorder),
    };
    (TripClient::new(sessions, "https://trip.test"), recorder)
}

fn params() -> HotelSearchParams {
    HotelSearchParams {
        city_code: 192,
        city_name: "Paris".to_string(),
        check_in: "2025-06-01".to_string(),
        check_out: "2025.6.3".to_string(),
        adults: 2,
        children: 1,
    }
}

fn listing_page(hotels: Value) -> String {
    let state = json!({ "initData": { "firstPageList": { "hotelList": hotels } } });
    format!(
        "<!DOCTYPE html><html><head><script>window.__APP=1;window.IBU_HOTEL={};window.other={{}};</script></head><body></body></html>",
        state
    )
}

#[tokio::test]
async fn search_city_posts_keyword_and_takes_first_match() {
    let body = json!({
        "keyWordSearchResults": [
            { "city": { "enusName": "Paris", "geoCode": 192 } },
            { "city": { "enusName": "Paris (Texas)", "geoCode": 30001 } }
        ]
    });
    let (client, recorder) = fake_client(body.to_string());

    let city = client.search_city("paris").await.unwrap();
    assert_eq!(city.city_code, 192);
    assert_eq!(city.city_name, "Paris");

    assert_eq!(recorder.opened.load(Ordering::SeqCst), 1);
    let sent = recorder.sent.lock().unwrap();
    match &sent[..] {
        [Sent::Post { url, body }] => {
            assert_eq!(url, "https://trip.test/htls/getKeyWordSearch");
            assert_eq!(body["keyWord"], "paris");
            assert_eq!(body["head"]["currency"], "USD");
        }
        other => panic!("unexpected requests {:?}", other),
    }
}

#[tokio::test]
async fn search_city_without_results_is_no_match() {
    let (client, _) = fake_client(r#"{"keyWordSearchResults":[]}"#);
    let err = client.search_city("nowhere").await.unwrap_err();
    assert!(matches!(err, ScrapeError::NoMatch { .. }));

    let (client, _) = fake_client(r#"{"keyWordSearchResults":{"city":{}}}"#);
    let err = client.search_city("nowhere").await.unwrap_err();
    assert!(matches!(err, ScrapeError::NoMatch { .. }));
}

#[tokio::test]
async fn search_city_with_html_body_is_decode_error() {
    let (client, _) = fake_client("<html>captcha</html>");
    match client.search_city("paris").await {
        Err(ScrapeError::PayloadDecode { raw, .. }) => assert_eq!(raw, "<html>captcha</html>"),
        other => panic!("expected PayloadDecode, got {:?}", other),
    }
}

#[tokio::test]
async fn list_hotels_builds_query_and_unwraps_page() {
    let page = listing_page(json!([
        {
            "hotelBasicInfo": {
                "hotelId": 101,
                "hotelName": "Hotel Lumiere",
                "hotelAddress": "1 Rue de Rivoli",
                "priceExplanation": "Total $342 for 2 nights"
            },
            "hotelStarInfo": { "star": 4 },
            "commentInfo": { "commentScore": "8.7", "commenterNumber": "2,315 reviews" },
            "roomTags": { "advantageTags": [{ "tagTitle": "Free WiFi" }, { "tagTitle": "Near metro" }] }
        },
        {
            "hotelBasicInfo": {
                "hotelId": 102,
                "hotelName": "Petit Hotel",
                "hotelAddress": "8 Rue Cler",
                "priceExplanation": "Sold out"
            },
            "hotelStarInfo": { "star": 2 },
            "commentInfo": { "commentScore": "7.1", "commenterNumber": "41reviews" },
            "roomTags": { "advantageTags": null }
        }
    ]));
    let (client, recorder) = fake_client(page);

    let hotels = client.list_hotels(&params()).await.unwrap();
    assert_eq!(hotels.len(), 2);
    assert_eq!(hotels[0].hotel_id, 101);
    assert_eq!(hotels[0].advantages, vec!["Free WiFi", "Near metro"]);
    assert_eq!(hotels[0].total_price, "$342");
    assert_eq!(hotels[0].comments_count, "2,315");
    assert_eq!(hotels[1].hotel_id, 102);
    assert!(hotels[1].advantages.is_empty());
    assert_eq!(hotels[1].total_price, "unavailable");
    assert_eq!(hotels[1].comments_count, "41");

    let sent = recorder.sent.lock().unwrap();
    let expected: Vec<(String, String)> = [
        ("city", "192"),
        ("cityName", "Paris"),
        ("checkin", "2025/06/01"),
        ("checkout", "2025/06/03"),
        ("barCurr", "USD"),
        ("locale", "en-XX"),
        ("curr", "USD"),
        ("adult", "2"),
        ("children", "1"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(
        sent.as_slice(),
        &[Sent::Get {
            url: "https://trip.test/hotels/list".to_string(),
            query: expected,
        }]
    );
}

#[tokio::test]
async fn list_hotels_serializes_with_camel_case_fields() {
    let page = listing_page(json!([{
        "hotelBasicInfo": { "hotelId": 7, "hotelName": "A", "hotelAddress": "B", "priceExplanation": "$5" },
        "hotelStarInfo": { "star": 3 },
        "commentInfo": { "commentScore": "9", "commenterNumber": "1 reviews" }
    }]));
    let (client, _) = fake_client(page);

    let hotels = client.list_hotels(&params()).await.unwrap();
    let value = serde_json::to_value(&hotels).unwrap();
    assert_eq!(
        value,
        json!([{
            "hotelId": 7,
            "hotelName": "A",
            "hotelAddress": "B",
            "stars": 3,
            "commentsScore": "9",
            "commentsCount": "1",
            "advantages": [],
            "totalPrice": "$5"
        }])
    );
}

#[tokio::test]
async fn blocked_status_with_json_body_still_decodes() {
    let body = json!({ "keyWordSearchResults": [{ "city": { "enusName": "Oslo", "geoCode": 4 } }] });
    let (client, _) = fake_client_with_status(403, body.to_string());
    let city = client.search_city("oslo").await.unwrap();
    assert_eq!(city.city_code, 4);

    let page = listing_page(json!([{
        "hotelBasicInfo": { "hotelId": 9, "hotelName": "Fjord", "hotelAddress": "Kai 1" },
        "hotelStarInfo": { "star": 4.5 },
        "commentInfo": { "commentScore": "9.2", "commenterNumber": "88 reviews" }
    }]));
    let (client, _) = fake_client_with_status(500, page);
    let hotels = client.list_hotels(&params()).await.unwrap();
    assert_eq!(hotels.len(), 1);
    assert_eq!(hotels[0].hotel_name, "Fjord");
}

#[tokio::test]
async fn blocked_status_with_html_body_is_decode_error() {
    let page = "<html><body>Access denied</body></html>";

    let (client, _) = fake_client_with_status(403, page);
    match client.search_city("oslo").await {
        Err(ScrapeError::PayloadDecode { raw, .. }) => assert_eq!(raw, page),
        other => panic!("expected PayloadDecode, got {:?}", other),
    }

    let (client, _) = fake_client_with_status(403, page);
    match client.list_hotels(&params()).await {
        Err(ScrapeError::PayloadDecode { raw, .. }) => assert_eq!(raw, page),
        other => panic!("expected PayloadDecode, got {:?}", other),
    }

    let (client, _) = fake_client_with_status(429, page);
    assert!(matches!(
        client.list_comments(1).await,
        Err(ScrapeError::PayloadDecode { .. })
    ));
}

#[tokio::test]
async fn list_hotels_rejects_bad_dates_before_sending() {
    let (client, recorder) = fake_client("{}");
    let mut bad = params();
    bad.check_out = "2025-06".to_string();

    let err = client.list_hotels(&bad).await.unwrap_err();
    assert!(matches!(err, ScrapeError::DateFormat { ref input } if input == "2025-06"));
    assert_eq!(recorder.opened.load(Ordering::SeqCst), 0);
    assert!(recorder.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn list_hotels_on_changed_page_is_decode_error() {
    let page = "<html><script>window.STATE={\"a\":1};</script></html>";
    let (client, _) = fake_client(page);

    match client.list_hotels(&params()).await {
        Err(ScrapeError::PayloadDecode { raw, .. }) => assert_eq!(raw, page),
        other => panic!("expected PayloadDecode, got {:?}", other),
    }
}

#[tokio::test]
async fn list_hotels_fails_whole_page_on_one_bad_row() {
    let page = listing_page(json!([
        {
            "hotelBasicInfo": { "hotelId": 1, "hotelName": "Ok", "hotelAddress": "x", "priceExplanation": "$1" },
            "hotelStarInfo": { "star": 3 },
            "commentInfo": { "commentScore": "9", "commenterNumber": "3 reviews" }
        },
        {
            "hotelBasicInfo": { "hotelId": 2, "hotelName": "No stars", "hotelAddress": "y" },
            "commentInfo": { "commentScore": "9", "commenterNumber": "3 reviews" }
        }
    ]));
    let (client, _) = fake_client(page);

    let err = client.list_hotels(&params()).await.unwrap_err();
    assert!(matches!(err, ScrapeError::SchemaMismatch { .. }));
}

#[tokio::test]
async fn list_comments_posts_hotel_id() {
    let body = json!({
        "data": {
            "commentList": [
                { "content": "Spotless rooms", "rating": 10 },
                { "content": "Breakfast was cold", "rating": 6 }
            ]
        }
    });
    let (client, recorder) = fake_client(body.to_string());

    let comments = client.list_comments(4551234).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].comment, "Spotless rooms");
    assert_eq!(comments[0].rating, serde_json::Number::from(10));
    assert_eq!(comments[1].comment, "Breakfast was cold");

    let sent = recorder.sent.lock().unwrap();
    match &sent[..] {
        [Sent::Post { url, body }] => {
            assert_eq!(url, "https://trip.test/restapi/soa2/28820/ctgetHotelComment");
            assert_eq!(body["hotelId"], 4551234);
            assert_eq!(body["pageIndex"], 1);
            assert_eq!(body["pageSize"], 10);
        }
        other => panic!("unexpected requests {:?}", other),
    }
}

#[tokio::test]
async fn every_call_opens_its_own_session() {
    let body = json!({
        "keyWordSearchResults": [{ "city": { "enusName": "Rome", "geoCode": 338 } }],
        "data": { "commentList": [] }
    });
    let (client, recorder) = fake_client(body.to_string());
    let client = Arc::new(client);

    let mut tasks = Vec::new();
    for _ in 0..4 {
        let client = Arc::clone(&client);
        tasks.push(tokio::spawn(async move { client.search_city("rome").await }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap().city_code, 338);
    }
    assert!(client.list_comments(1).await.unwrap().is_empty());

    assert_eq!(recorder.opened.load(Ordering::SeqCst), 5);
    assert_eq!(recorder.sent.lock().unwrap().len(), 5);
}
