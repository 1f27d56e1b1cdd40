//! Populate plan: which cities and business types to search.
//!
//! ```yaml
//! selection:
//!   min_pop: 25000
//!   max_pop: 50000
//!   limit: 60
//!   states: distinct        # or [CA, TX, FL]; omit for every state
//! types:
//!   - plumber
//!   - hair_salon
//! cities:
//!   - { name: Boulder, state_code: CO, lat: 40.01, lng: -105.27, population: 108250 }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::places::LocationBias;
use crate::ConfigError;

/// Bias circle radius for every generated query, in meters.
pub const QUERY_BIAS_RADIUS_METERS: f64 = 50_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub state_code: String,
    pub lat: f64,
    pub lng: f64,
    pub population: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StateFilter {
    #[default]
    All,
    Only(Vec<String>),
    /// Spread picks across as many states as possible.
    Distinct,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StateFilterRaw {
    Keyword(String),
    List(Vec<String>),
}

impl<'de> Deserialize<'de> for StateFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match StateFilterRaw::deserialize(deserializer)? {
            StateFilterRaw::Keyword(k) if k.eq_ignore_ascii_case("distinct") => {
                Ok(StateFilter::Distinct)
            }
            StateFilterRaw::Keyword(k) if k.eq_ignore_ascii_case("all") => Ok(StateFilter::All),
            StateFilterRaw::Keyword(k) => Ok(StateFilter::Only(parse_state_list(&k))),
            StateFilterRaw::List(list) => Ok(StateFilter::Only(
                list.iter().map(|s| s.trim().to_uppercase()).collect(),
            )),
        }
    }
}

/// Parse `"CA, tx,FL"` into upper-cased state codes.
#[must_use]
pub fn parse_state_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn default_min_pop() -> u64 {
    10_000
}

fn default_max_pop() -> u64 {
    200_000
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CitySelection {
    #[serde(default = "default_min_pop")]
    pub min_pop: u64,
    #[serde(default = "default_max_pop")]
    pub max_pop: u64,
    /// Maximum number of cities; `None` keeps every match.
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub states: StateFilter,
}

impl Default for CitySelection {
    fn default() -> Self {
        Self {
            min_pop: default_min_pop(),
            max_pop: default_max_pop(),
            limit: None,
            states: StateFilter::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PopulatePlan {
    #[serde(default)]
    pub selection: CitySelection,
    pub types: Vec<String>,
    pub cities: Vec<City>,
}

/// One search the populate run will issue.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulateQuery {
    pub business_type: String,
    pub city: String,
    pub state_code: String,
    pub text_query: String,
    /// Set only when `business_type` is a recognised place type.
    pub included_type: Option<String>,
    pub location_bias: LocationBias,
}

impl PopulatePlan {
    /// Cities matching the selection, largest first unless `distinct`
    /// round-robin ordering applies.
    #[must_use]
    pub fn select_cities(&self) -> Vec<City> {
        let sel = &self.selection;
        let mut matching: Vec<City> = self
            .cities
            .iter()
            .filter(|c| c.population >= sel.min_pop && c.population <= sel.max_pop)
            .cloned()
            .collect();

        if let StateFilter::Only(states) = &sel.states {
            let wanted: HashSet<String> = states.iter().map(|s| s.to_uppercase()).collect();
            matching.retain(|c| wanted.contains(&c.state_code.to_uppercase()));
        }

        matching.sort_by(|a, b| b.population.cmp(&a.population));
        let limit = sel.limit.unwrap_or(usize::MAX);

        if sel.states == StateFilter::Distinct {
            return round_robin_by_state(matching, limit);
        }
        matching.truncate(limit);
        matching
    }

    /// Cross product of cities and types, city-major.
    ///
    /// `is_known_type` decides whether a type is passed as the search's
    /// type filter or only appears in the query text.
    pub fn build_queries(
        &self,
        cities: &[City],
        is_known_type: impl Fn(&str) -> bool,
    ) -> Vec<PopulateQuery> {
        let mut queries = Vec::with_capacity(cities.len() * self.types.len());
        for city in cities {
            for business_type in &self.types {
                queries.push(PopulateQuery {
                    business_type: business_type.clone(),
                    city: city.name.clone(),
                    state_code: city.state_code.clone(),
                    text_query: format!("{business_type} in {}, {}", city.name, city.state_code),
                    included_type: is_known_type(business_type).then(|| business_type.clone()),
                    location_bias: LocationBias {
                        latitude: city.lat,
                        longitude: city.lng,
                        radius: QUERY_BIAS_RADIUS_METERS,
                    },
                });
            }
        }
        queries
    }
}

/// `cities` must already be sorted largest first.
fn round_robin_by_state(cities: Vec<City>, limit: usize) -> Vec<City> {
    let mut by_state: BTreeMap<String, std::collections::VecDeque<City>> = BTreeMap::new();
    for city in cities {
        by_state
            .entry(city.state_code.clone())
            .or_default()
            .push_back(city);
    }

    let mut picked = Vec::new();
    while picked.len() < limit {
        let mut progressed = false;
        for queue in by_state.values_mut() {
            if picked.len() >= limit {
                break;
            }
            if let Some(city) = queue.pop_front() {
                picked.push(city);
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }
    picked
}

/// Apply `offset` then `limit` to a generated query list.
#[must_use]
pub fn window<T: Clone>(items: &[T], offset: usize, limit: Option<usize>) -> Vec<T> {
    items
        .iter()
        .skip(offset)
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect()
}

/// Load and validate a populate plan from YAML.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_populate_plan(path: &Path) -> Result<PopulatePlan, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_populate_plan(&content, &path.display().to_string())
}

/// # Errors
///
/// Returns `ConfigError` on malformed YAML or an invalid plan.
pub fn parse_populate_plan(source: &str, origin: &str) -> Result<PopulatePlan, ConfigError> {
    let plan: PopulatePlan = serde_yaml::from_str(source).map_err(|e| ConfigError::FileParse {
        path: origin.to_string(),
        source: e,
    })?;
    validate_plan(&plan)?;
    Ok(plan)
}

fn validate_plan(plan: &PopulatePlan) -> Result<(), ConfigError> {
    if plan.types.is_empty() {
        return Err(ConfigError::Validation(
            "populate plan lists no business types".to_string(),
        ));
    }
    if plan.types.iter().any(|t| t.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "populate plan contains a blank business type".to_string(),
        ));
    }
    if plan.selection.min_pop > plan.selection.max_pop {
        return Err(ConfigError::Validation(format!(
            "min_pop {} exceeds max_pop {}",
            plan.selection.min_pop, plan.selection.max_pop
        )));
    }
    if let Some(city) = plan
        .cities
        .iter()
        .find(|c| c.name.trim().is_empty() || c.state_code.trim().is_empty())
    {
        return Err(ConfigError::Validation(format!(
            "city entry missing name or state code: {city:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "populate_test.rs"]
mod tests;
