//! Cache-or-fetch place search.
//!
//! A search is cached by its exact `(text_query, included_type)` pair. The
//! cache remembers which places a search returned, not their attributes at
//! the time: a hit returns the current stored state of those places.

use leadscout_core::Place;
use leadscout_db::NewSearch;
use leadscout_places::{GooglePlacesClient, TextSearch};

use crate::error::LeadError;
use crate::normalize::to_place;
use crate::store::LeadStore;

pub type SearchQuery = TextSearch;

const DEFAULT_ALL_PAGES_CAP: u32 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Always call the API, even if a matching search is stored.
    pub skip_cache: bool,
    pub all_pages: bool,
    pub max_pages: Option<u32>,
}

impl SearchOptions {
    #[must_use]
    pub fn paginated(&self) -> bool {
        self.all_pages || self.max_pages.is_some()
    }

    /// Explicit cap, else 3 for `all_pages`, else a single page.
    #[must_use]
    pub fn page_cap(&self) -> u32 {
        match self.max_pages {
            Some(cap) => cap.max(1),
            None if self.all_pages => DEFAULT_ALL_PAGES_CAP,
            None => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub places: Vec<Place>,
    pub cached: bool,
    /// `None` on a cache hit.
    pub pages_fetched: Option<u32>,
}

pub struct LeadService<S> {
    store: S,
    places: GooglePlacesClient,
}

impl<S: LeadStore> LeadService<S> {
    #[must_use]
    pub fn new(store: S, places: GooglePlacesClient) -> Self {
        Self { store, places }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns stored places for a previously seen query, or fetches,
    /// persists, and links fresh results.
    ///
    /// # Errors
    ///
    /// - [`LeadError::Places`] if the API call fails. Nothing is stored.
    /// - [`LeadError::Store`] if a read or write fails.
    pub async fn search(
        &self,
        query: &SearchQuery,
        options: &SearchOptions,
    ) -> Result<SearchOutcome, LeadError> {
        if !options.skip_cache {
            if let Some(search_id) = self
                .store
                .find_search(&query.text_query, query.included_type.as_deref())
                .await?
            {
                let places = self.store.places_for_search(search_id).await?;
                tracing::debug!(
                    query = %query.text_query,
                    search_id,
                    results = places.len(),
                    "search cache hit"
                );
                return Ok(SearchOutcome {
                    places,
                    cached: true,
                    pages_fetched: None,
                });
            }
        }

        let (api_places, pages_fetched) = if options.paginated() {
            let paged = self.places.search_text_all(query, options.page_cap()).await?;
            (paged.places, paged.pages_fetched)
        } else {
            (self.places.search_text(query, None).await?.places, 1)
        };

        let places: Vec<Place> = api_places.into_iter().map(to_place).collect();
        for place in &places {
            self.store.upsert_place(place).await?;
        }

        let search_id = self
            .store
            .insert_search(&NewSearch {
                text_query: query.text_query.clone(),
                included_type: query.included_type.clone(),
                min_rating: query.min_rating,
                location_bias: query.location_bias,
                result_count: i32::try_from(places.len()).unwrap_or(i32::MAX),
                pages_fetched: Some(i32::try_from(pages_fetched).unwrap_or(i32::MAX)),
            })
            .await?;
        for place in &places {
            self.store.link_search_to_place(search_id, &place.id).await?;
        }

        tracing::debug!(
            query = %query.text_query,
            search_id,
            results = places.len(),
            pages_fetched,
            "search stored"
        );

        Ok(SearchOutcome {
            places,
            cached: false,
            pages_fetched: Some(pages_fetched),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_page_by_default() {
        let options = SearchOptions::default();
        assert!(!options.paginated());
        assert_eq!(options.page_cap(), 1);
    }

    #[test]
    fn all_pages_caps_at_three() {
        let options = SearchOptions {
            all_pages: true,
            ..SearchOptions::default()
        };
        assert!(options.paginated());
        assert_eq!(options.page_cap(), 3);
    }

    #[test]
    fn explicit_cap_wins() {
        let options = SearchOptions {
            all_pages: true,
            max_pages: Some(5),
            ..SearchOptions::default()
        };
        assert_eq!(options.page_cap(), 5);

        let only_cap = SearchOptions {
            max_pages: Some(2),
            ..SearchOptions::default()
        };
        assert!(only_cap.paginated());
        assert_eq!(only_cap.page_cap(), 2);
    }
}
