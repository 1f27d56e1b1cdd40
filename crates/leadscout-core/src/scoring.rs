//! Outreach priority scoring for places.
//!
//! The weights are a provisional heuristic and should be retuned once audit
//! and reply data exist.

use crate::places::{BusinessStatus, Place};

pub const DEFAULT_MIN_SCORE: u32 = 30;

const NO_WEBSITE_POINTS: u32 = 50;
const PHONE_POINTS: u32 = 10;
const HIGH_RATING_POINTS: u32 = 10;
const ESTABLISHED_POINTS: u32 = 20;
const OPERATIONAL_POINTS: u32 = 5;
const BUDGET_PRICE_POINTS: u32 = 5;

const HIGH_RATING_THRESHOLD: f64 = 4.0;
const ESTABLISHED_MIN_RATINGS: i32 = 10;
const ESTABLISHED_MAX_RATINGS: i32 = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredLead {
    pub place: Place,
    pub has_website: bool,
    pub lead_score: u32,
}

/// Additive score; every rule is independent of the others.
#[must_use]
pub fn score_place(place: &Place) -> u32 {
    let mut score = 0;

    if !place.has_website() {
        score += NO_WEBSITE_POINTS;
    }
    if place.has_phone() {
        score += PHONE_POINTS;
    }
    if place.rating.is_some_and(|r| r >= HIGH_RATING_THRESHOLD) {
        score += HIGH_RATING_POINTS;
    }
    if place
        .user_rating_count
        .is_some_and(|n| (ESTABLISHED_MIN_RATINGS..ESTABLISHED_MAX_RATINGS).contains(&n))
    {
        score += ESTABLISHED_POINTS;
    }
    if place.business_status == Some(BusinessStatus::Operational) {
        score += OPERATIONAL_POINTS;
    }
    if place.price_level.is_some_and(|p| p.is_budget()) {
        score += BUDGET_PRICE_POINTS;
    }

    score
}

#[must_use]
pub fn score_leads(places: &[Place]) -> Vec<ScoredLead> {
    places
        .iter()
        .map(|place| ScoredLead {
            has_website: place.has_website(),
            lead_score: score_place(place),
            place: place.clone(),
        })
        .collect()
}

/// Leads scoring at least `min_score`, highest first.
///
/// Ties keep their input order.
#[must_use]
pub fn get_top_leads(places: &[Place], min_score: u32) -> Vec<ScoredLead> {
    let mut leads: Vec<ScoredLead> = score_leads(places)
        .into_iter()
        .filter(|lead| lead.lead_score >= min_score)
        .collect();
    leads.sort_by(|a, b| b.lead_score.cmp(&a.lead_score));
    leads
}
