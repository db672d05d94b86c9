// Request and response types for the Places API
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Upstream operations, each bound to a fixed path under the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    NearbySearch,
    TextSearch,
    FindPlace,
    Details,
    PlaceAutocomplete,
    QueryAutocomplete,
}

impl Endpoint {
    /// Path relative to the base URL.
    pub const fn path(&self) -> &'static str {
        match self {
            Endpoint::NearbySearch => "nearbysearch/json",
            Endpoint::TextSearch => "textsearch/json",
            Endpoint::FindPlace => "findplacefromtext/json",
            Endpoint::Details => "details/json",
            Endpoint::PlaceAutocomplete => "autocomplete/json",
            Endpoint::QueryAutocomplete => "queryautocomplete/json",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// HTTP method used to reach an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
}

/// Kind of text passed to Find Place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    TextQuery,
    PhoneNumber,
}

impl InputType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            InputType::TextQuery => "textquery",
            InputType::PhoneNumber => "phonenumber",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A latitude/longitude pair, rendered as `lat,lng`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Outcome of a successful call.
///
/// `status` is the upstream status field (`OK` or `ZERO_RESULTS`). When the
/// response was served from the cache, `status` is the one recorded at the
/// time it was stored and `from_cache` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacesResponse<T> {
    pub status: String,
    pub data: T,
    /// Token for the next page of search results, when the API offers one.
    pub next_page_token: Option<String>,
    pub from_cache: bool,
}

impl<T> PlacesResponse<T> {
    /// True when the upstream matched nothing.
    pub fn is_zero_results(&self) -> bool {
        self.status == ZERO_RESULTS
    }

    /// Replace the payload, keeping the status metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PlacesResponse<U> {
        PlacesResponse {
            status: self.status,
            data: f(self.data),
            next_page_token: self.next_page_token,
            from_cache: self.from_cache,
        }
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

pub(crate) const OK: &str = "OK";
pub(crate) const ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Statuses the API uses for a well-formed answer.
pub(crate) fn is_success_status(status: &str) -> bool {
    status == OK || status == ZERO_RESULTS
}

/// Take the array stored under `field`, or an empty list if there is none.
pub(crate) fn take_list(mut body: Value, field: &str) -> Vec<Value> {
    match body.get_mut(field).map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Take the object stored under `field`, or `Null` if there is none.
pub(crate) fn take_object(mut body: Value, field: &str) -> Value {
    body.get_mut(field).map(Value::take).unwrap_or(Value::Null)
}
