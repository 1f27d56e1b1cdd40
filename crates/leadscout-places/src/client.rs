//! HTTP client for `places:searchText`.
//!
//! Every call is a JSON POST carrying the API key and a field mask in
//! headers. Non-2xx responses surface as [`PlacesError::Api`] with the body
//! verbatim so quota and validation messages reach the operator.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::types::{PagedSearch, SearchTextBody, TextSearch, TextSearchResponse};

pub const DEFAULT_BASE_URL: &str = "https://places.googleapis.com/v1";

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Fields requested per place. `nextPageToken` is required for pagination.
pub const ENTERPRISE_FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,\
places.addressComponents,places.internationalPhoneNumber,places.websiteUri,places.googleMapsUri,\
places.primaryType,places.types,places.rating,places.userRatingCount,places.priceLevel,\
places.businessStatus,places.location,nextPageToken";

pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    page_size: u32,
}

impl std::fmt::Debug for GooglePlacesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GooglePlacesClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl GooglePlacesClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::MissingApiKey`] if `api_key` is `None` or blank,
    /// or [`PlacesError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: Option<&str>, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`GooglePlacesClient::new`], plus
    /// [`PlacesError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(PlacesError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("leadscout/0.1 (lead-discovery)")
            .build()?;

        let raw = format!("{}/places:searchText", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&raw).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Results per page used when a search does not set `max_result_count`.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, DEFAULT_PAGE_SIZE);
        self
    }

    /// Fetches one page of results.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] on a non-2xx status.
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected shape.
    pub async fn search_text(
        &self,
        search: &TextSearch,
        page_token: Option<&str>,
    ) -> Result<TextSearchResponse, PlacesError> {
        let body = SearchTextBody {
            text_query: &search.text_query,
            max_result_count: search.max_result_count.unwrap_or(self.page_size),
            location_bias: search.location_bias.map(Into::into),
            included_type: search.included_type.as_deref(),
            min_rating: search.min_rating,
            page_token,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", ENTERPRISE_FIELD_MASK)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(PlacesError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| PlacesError::Deserialize {
            context: format!("searchText(query={})", search.text_query),
            source: e,
        })
    }

    /// Follows `nextPageToken` until it is absent or `max_pages` pages have
    /// been fetched. At least one page is always requested.
    ///
    /// # Errors
    ///
    /// Returns the first page error; places from earlier pages are discarded.
    pub async fn search_text_all(
        &self,
        search: &TextSearch,
        max_pages: u32,
    ) -> Result<PagedSearch, PlacesError> {
        let mut collected = PagedSearch::default();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.search_text(search, page_token.as_deref()).await?;
            collected.pages_fetched += 1;
            tracing::debug!(
                query = %search.text_query,
                page = collected.pages_fetched,
                results = page.places.len(),
                "fetched search page"
            );
            collected.places.extend(page.places);

            page_token = page.next_page_token.filter(|t| !t.is_empty());
            if page_token.is_none() || collected.pages_fetched >= max_pages {
                break;
            }
        }

        Ok(collected)
    }
}
