// Places API client
// Author: kelexine (https://github.com/kelexine)

use super::params::{nearby_search_params, Params};
use super::types::{
    is_success_status, take_list, take_object, Endpoint, InputType, Method, PlacesResponse,
};
use crate::cache::{cache_key, CacheProvider};
use crate::config::{PlacesConfig, DEFAULT_BASE_URL};
use crate::error::{PlacesError, Result};
use crate::utils::logging::sanitize;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, trace};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Google Places web service.
///
/// Each operation checks the API key, builds its parameters, optionally
/// consults the response cache, performs a single HTTP request and hands
/// back the relevant part of the JSON body along with the upstream status.
/// There are no retries: one failed call is one error.
#[derive(Clone)]
pub struct PlacesClient {
    http_client: Client,
    api_key: Option<String>,
    verify_tls: bool,
    base_url: String,
    timeout: Duration,
    cache: Option<Arc<dyn CacheProvider>>,
    cache_ttl: Option<Duration>,
}

/// Builder for [`PlacesClient`].
#[derive(Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    verify_tls: Option<bool>,
    use_cache: bool,
    cache_provider: Option<Arc<dyn CacheProvider>>,
    cache_ttl: Option<Duration>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Verify TLS certificates (default `true`).
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = Some(verify);
        self
    }

    /// Enable the response cache. Requires a provider.
    pub fn use_cache(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    pub fn cache_provider(mut self, provider: Arc<dyn CacheProvider>) -> Self {
        self.cache_provider = Some(provider);
        self
    }

    /// Override the provider's default TTL for stored responses.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// Sets a custom base URL for the API (useful for testing).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<PlacesClient> {
        let cache = match (self.use_cache, self.cache_provider) {
            (true, Some(provider)) => Some(provider),
            (true, None) => {
                return Err(PlacesError::Config(
                    "caching is enabled but no cache provider was given".to_string(),
                ))
            }
            (false, _) => None,
        };

        let verify_tls = self.verify_tls.unwrap_or(true);
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

        Ok(PlacesClient {
            http_client: build_http_client(verify_tls, timeout)?,
            api_key: self.api_key,
            verify_tls,
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout,
            cache,
            cache_ttl: self.cache_ttl,
        })
    }
}

fn build_http_client(verify_tls: bool, timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .danger_accept_invalid_certs(!verify_tls)
        .use_rustls_tls()
        .build()
        .map_err(|e| PlacesError::Config(format!("Failed to create HTTP client: {}", e)))
}

impl PlacesClient {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client with only an API key and default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a client from loaded configuration. Passing a provider turns
    /// caching on.
    pub fn from_config(
        config: &PlacesConfig,
        cache: Option<Arc<dyn CacheProvider>>,
    ) -> Result<Self> {
        let mut builder = Self::builder()
            .verify_tls(config.verify_tls)
            .base_url(&config.base_url)
            .timeout(Duration::from_secs(config.timeout_seconds));

        if let Some(key) = &config.api_key {
            builder = builder.api_key(key);
        }
        if let Some(provider) = cache {
            builder = builder.use_cache(true).cache_provider(provider);
        }
        builder.build()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    /// Toggle TLS certificate verification. Rebuilds the HTTP client.
    pub fn set_verify_tls(&mut self, verify: bool) -> Result<&mut Self> {
        if verify != self.verify_tls {
            self.http_client = build_http_client(verify, self.timeout)?;
            self.verify_tls = verify;
        }
        Ok(self)
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Find Place request.
    ///
    /// `input` is a name, address or phone number, as told by `input_type`.
    /// Returns the `candidates` array.
    pub async fn find_place(
        &self,
        input: &str,
        input_type: InputType,
        mut params: Params,
    ) -> Result<PlacesResponse<Vec<Value>>> {
        self.require_key()?;

        params.insert("input", input);
        params.insert("inputtype", input_type);

        let response = self.dispatch(Endpoint::FindPlace, params, Method::Get).await?;
        Ok(response.map(|body| take_list(body, "candidates")))
    }

    /// Nearby Search request around `location`.
    ///
    /// `radius` (metres) is required unless `params` carries
    /// `rankby=distance`. Returns the `results` array.
    pub async fn nearby_search(
        &self,
        location: impl Display,
        radius: Option<u32>,
        params: Params,
    ) -> Result<PlacesResponse<Vec<Value>>> {
        self.require_key()?;

        let params = nearby_search_params(location, radius, params)?;

        let response = self.dispatch(Endpoint::NearbySearch, params, Method::Get).await?;
        Ok(response.map(|body| take_list(body, "results")))
    }

    /// Text Search request. Returns the `results` array.
    pub async fn text_search(
        &self,
        query: &str,
        mut params: Params,
    ) -> Result<PlacesResponse<Vec<Value>>> {
        self.require_key()?;

        params.insert("query", query);

        let response = self.dispatch(Endpoint::TextSearch, params, Method::Get).await?;
        Ok(response.map(|body| take_list(body, "results")))
    }

    /// Place Details request. Returns the bare `result` object, or `Null`
    /// when the response carries none.
    pub async fn place_details(
        &self,
        place_id: &str,
        mut params: Params,
    ) -> Result<PlacesResponse<Value>> {
        self.require_key()?;

        params.insert("placeid", place_id);

        let response = self.dispatch(Endpoint::Details, params, Method::Get).await?;
        Ok(response.map(|body| take_object(body, "result")))
    }

    /// Place Autocomplete request. Returns the `predictions` array.
    pub async fn place_autocomplete(
        &self,
        input: &str,
        mut params: Params,
    ) -> Result<PlacesResponse<Vec<Value>>> {
        self.require_key()?;

        params.insert("input", input);

        let response = self.dispatch(Endpoint::PlaceAutocomplete, params, Method::Get).await?;
        Ok(response.map(|body| take_list(body, "predictions")))
    }

    /// Query Autocomplete request. Returns the `predictions` array.
    pub async fn query_autocomplete(
        &self,
        input: &str,
        mut params: Params,
    ) -> Result<PlacesResponse<Vec<Value>>> {
        self.require_key()?;

        params.insert("input", input);

        let response = self.dispatch(Endpoint::QueryAutocomplete, params, Method::Get).await?;
        Ok(response.map(|body| take_list(body, "predictions")))
    }

    /// Send `params` to `endpoint` and return the whole JSON body.
    ///
    /// Serves from the cache when enabled and a stored response exists.
    /// Fails with [`PlacesError::Upstream`] unless the body's `status` is
    /// `OK` or `ZERO_RESULTS`; only such responses are cached.
    #[instrument(skip_all, fields(endpoint = %endpoint))]
    pub async fn dispatch(
        &self,
        endpoint: Endpoint,
        params: Params,
        method: Method,
    ) -> Result<PlacesResponse<Value>> {
        let key = self.require_key()?;

        let cached = match &self.cache {
            Some(cache) => Some((cache, cache_key(endpoint, &params)?)),
            None => None,
        };

        if let Some((cache, entry_key)) = &cached {
            if let Some(stored) = cache.get(entry_key).await? {
                debug!(backend = cache.name(), "Cache hit");
                let body: Value = serde_json::from_str(&stored)?;
                return into_response(body, true);
            }
            debug!(backend = cache.name(), "Cache miss");
        }

        let text = self.send(endpoint, key, &params, method).await?;
        let body: Value = serde_json::from_str(&text)?;
        let response = into_response(body, false)?;

        if let Some((cache, entry_key)) = &cached {
            let ttl = self.cache_ttl.unwrap_or_else(|| cache.default_ttl());
            cache.set(entry_key, &text, ttl).await?;
            trace!(ttl_secs = ttl.as_secs(), "Stored response in cache");
        }

        Ok(response)
    }

    /// Perform the HTTP request and return the raw body. Non-2xx statuses are
    /// not errors here; the body's `status` field decides.
    async fn send(
        &self,
        endpoint: Endpoint,
        key: &str,
        params: &Params,
        method: Method,
    ) -> Result<String> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint.path());

        let request = match method {
            Method::Get => {
                let mut query = params.clone();
                query.insert("key", key);
                self.http_client.get(&url).query(&query)
            }
            Method::Post => self
                .http_client
                .post(&url)
                .query(&[("key", key)])
                .json(params),
        }
        .build()?;

        debug!(url = %sanitize(request.url().as_str()), "Sending request to Places API");

        let response = self.http_client.execute(request).await?;
        let http_status = response.status();
        let text = response.text().await?;

        trace!(http_status = %http_status, body_len = text.len(), "Received response");
        Ok(text)
    }

    fn require_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(PlacesError::MissingApiKey)
    }
}

/// Check the body's `status` and wrap it.
fn into_response(body: Value, from_cache: bool) -> Result<PlacesResponse<Value>> {
    let status = body
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| PlacesError::InvalidResponse("missing 'status' field".to_string()))?
        .to_string();

    if !is_success_status(&status) {
        let message = body
            .get("error_message")
            .and_then(Value::as_str)
            .map(str::to_string);
        return Err(PlacesError::Upstream { status, message });
    }

    debug!(status = %status, from_cache, "Places API responded");

    let next_page_token = body
        .get("next_page_token")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(PlacesResponse {
        status,
        data: body,
        next_page_token,
        from_cache,
    })
}

impl fmt::Debug for PlacesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacesClient")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("verify_tls", &self.verify_tls)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("cache", &self.cache.as_ref().map(|c| c.name()))
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}
