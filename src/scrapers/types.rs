use serde::{Deserialize, Serialize};

/// Search parameters for the hotel listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelSearchParams {
    /// City code as returned by the city search
    pub city_code: i64,
    pub city_name: String,
    /// Year-month-day with any separators
    pub check_in: String,
    pub check_out: String,
    pub adults: u32,
    pub children: u32,
}

/// A query parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Int(i64),
    Bool(bool),
    /// Sent as one `key=value` pair per element
    List(Vec<QueryValue>),
}

impl QueryValue {
    fn push_pairs(&self, key: &str, out: &mut Vec<(String, String)>) {
        match self {
            QueryValue::Text(s) => out.push((key.to_string(), s.clone())),
            QueryValue::Int(n) => out.push((key.to_string(), n.to_string())),
            QueryValue::Bool(b) => out.push((key.to_string(), b.to_string())),
            QueryValue::List(items) => {
                for item in items {
                    item.push_pairs(key, out);
                }
            }
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Int(value.into())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        QueryValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Flattens parameters into ordered key/value pairs
pub fn to_query_pairs(params: &[(&str, QueryValue)]) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        value.push_pairs(key, &mut pairs);
    }
    pairs
}
