//! In-memory `LeadStore` shared by the integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;
use leadscout_core::{Place, ScrapeResult};
use leadscout_db::{DbError, NewSearch};
use leadscout_leads::LeadStore;

#[derive(Debug, Default)]
struct State {
    places: BTreeMap<String, Place>,
    searches: Vec<NewSearch>,
    links: BTreeSet<(i64, String)>,
    audits: Vec<(String, ScrapeResult)>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn with_places(places: impl IntoIterator<Item = Place>) -> Self {
        let store = Self::default();
        {
            let mut state = store.state.lock().unwrap();
            for place in places {
                state.places.insert(place.id.clone(), place);
            }
        }
        store
    }

    pub fn place(&self, id: &str) -> Option<Place> {
        self.state.lock().unwrap().places.get(id).cloned()
    }

    pub fn place_count(&self) -> usize {
        self.state.lock().unwrap().places.len()
    }

    pub fn searches(&self) -> Vec<NewSearch> {
        self.state.lock().unwrap().searches.clone()
    }

    pub fn link_count(&self) -> usize {
        self.state.lock().unwrap().links.len()
    }

    pub fn audits(&self) -> Vec<(String, ScrapeResult)> {
        self.state.lock().unwrap().audits.clone()
    }
}

#[async_trait]
impl LeadStore for MemoryStore {
    async fn find_search(
        &self,
        text_query: &str,
        included_type: Option<&str>,
    ) -> Result<Option<i64>, DbError> {
        let state = self.state.lock().unwrap();
        let found = state
            .searches
            .iter()
            .enumerate()
            .rev()
            .find(|(_, s)| s.text_query == text_query && s.included_type.as_deref() == included_type)
            .map(|(i, _)| i64::try_from(i + 1).unwrap());
        Ok(found)
    }

    async fn places_for_search(&self, search_id: i64) -> Result<Vec<Place>, DbError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .links
            .iter()
            .filter(|(id, _)| *id == search_id)
            .filter_map(|(_, place_id)| state.places.get(place_id).cloned())
            .collect())
    }

    async fn upsert_place(&self, place: &Place) -> Result<(), DbError> {
        self.state
            .lock()
            .unwrap()
            .places
            .insert(place.id.clone(), place.clone());
        Ok(())
    }

    async fn insert_search(&self, search: &NewSearch) -> Result<i64, DbError> {
        let mut state = self.state.lock().unwrap();
        state.searches.push(search.clone());
        Ok(i64::try_from(state.searches.len()).unwrap())
    }

    async fn link_search_to_place(&self, search_id: i64, place_id: &str) -> Result<(), DbError> {
        self.state
            .lock()
            .unwrap()
            .links
            .insert((search_id, place_id.to_string()));
        Ok(())
    }

    async fn places_pending_audit(&self, limit: Option<i64>) -> Result<Vec<Place>, DbError> {
        let state = self.state.lock().unwrap();
        let pending = state
            .places
            .values()
            .filter(|p| p.has_website())
            .filter(|p| !state.audits.iter().any(|(id, _)| *id == p.id))
            .cloned();
        Ok(match limit {
            Some(n) => pending.take(usize::try_from(n).unwrap()).collect(),
            None => pending.collect(),
        })
    }

    async fn insert_site_audit(
        &self,
        place_id: &str,
        result: &ScrapeResult,
    ) -> Result<i64, DbError> {
        let mut state = self.state.lock().unwrap();
        state.audits.push((place_id.to_string(), result.clone()));
        Ok(i64::try_from(state.audits.len()).unwrap())
    }
}
