// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Partnership compatibility between two ownership-interest profiles.
//!
//! Two hard gates (aircraft overlap, complementary shares) zero the score
//! outright. Past the gates, weighted factors add up to 100:
//!
//! | factor      | points |
//! |-------------|--------|
//! | aircraft    | 20     |
//! | share       | 20     |
//! | timeline    | 0-20   |
//! | pilot       | 0-10   |
//! | usage       | 0-10   |
//! | leaseback   | 0-10   |
//! | budget      | 0-5    |
//! | flexibility | 0-5    |
//!
//! plus the non-pilot penalty and the usage-frequency adjustment.

use log::debug;
use serde::{Deserialize, Serialize};

pub const OWNERS_FLEET_WILDCARD: &str = "owners_fleet";

const SHARE_EPSILON: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PilotStatus {
    Licensed,
    NonPilot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseTimeline {
    Immediate,
    #[serde(rename = "within_3_months")]
    Within3Months,
    #[serde(rename = "within_6_months")]
    Within6Months,
    WithinYear,
    Exploring,
}

impl PurchaseTimeline {
    fn ordinal(self) -> i32 {
        match self {
            PurchaseTimeline::Immediate => 0,
            PurchaseTimeline::Within3Months => 1,
            PurchaseTimeline::Within6Months => 2,
            PurchaseTimeline::WithinYear => 3,
            PurchaseTimeline::Exploring => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlyingTime {
    Weekdays,
    Weekends,
    Flexible,
    Varies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeasebackInterest {
    VeryInterested,
    Somewhat,
    NeedInfo,
    NotInterested,
}

impl LeasebackInterest {
    fn ordinal(self) -> i32 {
        match self {
            LeasebackInterest::VeryInterested => 0,
            LeasebackInterest::Somewhat => 1,
            LeasebackInterest::NeedInfo => 2,
            LeasebackInterest::NotInterested => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingFlexibility {
    VeryFlexible,
    SomewhatFlexible,
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    New,
    Contacted,
    Qualified,
    Matched,
    Closed,
}

impl ProfileStatus {
    /// Still available to be introduced to a partner.
    pub fn is_open(self) -> bool {
        matches!(self, ProfileStatus::New | ProfileStatus::Contacted)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnershipProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub aircraft_preference: Vec<String>,
    pub ownership_share_preferences: Vec<f64>,
    pub pilot_status: PilotStatus,
    pub purchase_timeline: PurchaseTimeline,
    pub typical_flying_time: FlyingTime,
    /// Days per month.
    pub usage_frequency_days: u32,
    pub leaseback_interest: LeasebackInterest,
    pub scheduling_flexibility: SchedulingFlexibility,
    #[serde(default)]
    pub calculated_monthly_net_cost: Option<f64>,
    pub status: ProfileStatus,
}

impl PartnershipProfile {
    fn has_wildcard(&self) -> bool {
        self.aircraft_preference
            .iter()
            .any(|a| a.eq_ignore_ascii_case(OWNERS_FLEET_WILDCARD))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Recommendation {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            Recommendation::Excellent
        } else if score >= 70.0 {
            Recommendation::Good
        } else if score >= 50.0 {
            Recommendation::Fair
        } else {
            Recommendation::Poor
        }
    }
}

/// Points awarded per factor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchFactors {
    pub aircraft: f64,
    pub share: f64,
    pub timeline: f64,
    pub pilot: f64,
    pub pilot_penalty: f64,
    pub usage: f64,
    pub usage_adjustment: f64,
    pub leaseback: f64,
    pub budget: f64,
    pub flexibility: f64,
}

impl MatchFactors {
    pub fn total(&self) -> f64 {
        self.aircraft
            + self.share
            + self.timeline
            + self.pilot
            + self.pilot_penalty
            + self.usage
            + self.usage_adjustment
            + self.leaseback
            + self.budget
            + self.flexibility
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f64,
    pub factors: MatchFactors,
    pub recommendation: Recommendation,
    pub warnings: Vec<String>,
}

impl MatchResult {
    fn rejected(warning: &str) -> Self {
        Self {
            score: 0.0,
            factors: MatchFactors::default(),
            recommendation: Recommendation::Poor,
            warnings: vec![warning.to_string()],
        }
    }
}

fn aircraft_compatible(a: &PartnershipProfile, b: &PartnershipProfile) -> bool {
    if a.has_wildcard() || b.has_wildcard() {
        return true;
    }
    a.aircraft_preference.iter().any(|x| {
        b.aircraft_preference
            .iter()
            .any(|y| x.eq_ignore_ascii_case(y))
    })
}

/// Two halves, or any pair adding up to the whole aircraft.
fn shares_complement(a: &[f64], b: &[f64]) -> bool {
    a.iter().any(|&s1| {
        b.iter().any(|&s2| {
            let both_half = (s1 - 0.5).abs() < SHARE_EPSILON && (s2 - 0.5).abs() < SHARE_EPSILON;
            both_half || (s1 + s2 - 1.0).abs() < SHARE_EPSILON
        })
    })
}

fn timeline_points(a: PurchaseTimeline, b: PurchaseTimeline) -> f64 {
    let distance = (a.ordinal() - b.ordinal()).abs();
    (20 - 5 * distance).max(0) as f64
}

/// Percentage compatibility for the pilot pairing.
fn pilot_compatibility(a: PilotStatus, b: PilotStatus) -> f64 {
    match (a, b) {
        (PilotStatus::Licensed, PilotStatus::NonPilot)
        | (PilotStatus::NonPilot, PilotStatus::Licensed) => 100.0,
        (PilotStatus::Licensed, PilotStatus::Licensed) => 80.0,
        (PilotStatus::NonPilot, PilotStatus::NonPilot) => 40.0,
    }
}

fn usage_compatibility(a: FlyingTime, b: FlyingTime) -> f64 {
    use FlyingTime::*;
    match (a, b) {
        (Weekdays, Weekends) | (Weekends, Weekdays) => 100.0,
        (Flexible | Varies, _) | (_, Flexible | Varies) => 70.0,
        _ if a == b => 40.0,
        _ => 50.0,
    }
}

fn leaseback_points(a: LeasebackInterest, b: LeasebackInterest) -> f64 {
    match (a.ordinal() - b.ordinal()).abs() {
        0 => 10.0,
        1 => 7.0,
        2 => 4.0,
        _ => 0.0,
    }
}

/// Points for how close the two projected monthly costs are, or `None` if the
/// gap is large enough to warn about.
fn budget_points(a: Option<f64>, b: Option<f64>) -> (f64, Option<f64>) {
    let (Some(a), Some(b)) = (a, b) else {
        return (3.0, None);
    };
    let larger = a.abs().max(b.abs());
    if larger == 0.0 {
        return (5.0, None);
    }
    let percent = (a - b).abs() / larger * 100.0;
    let points = if percent <= 10.0 {
        5.0
    } else if percent <= 25.0 {
        3.0
    } else if percent <= 50.0 {
        1.0
    } else {
        0.0
    };
    (points, Some(percent))
}

pub fn calculate_compatibility(a: &PartnershipProfile, b: &PartnershipProfile) -> MatchResult {
    if !aircraft_compatible(a, b) {
        return MatchResult::rejected("No overlap in aircraft preference");
    }
    if !shares_complement(&a.ownership_share_preferences, &b.ownership_share_preferences) {
        return MatchResult::rejected("Ownership shares do not add up to a complete aircraft");
    }

    let mut warnings = Vec::new();
    let mut factors = MatchFactors {
        aircraft: 20.0,
        share: 20.0,
        timeline: timeline_points(a.purchase_timeline, b.purchase_timeline),
        pilot: pilot_compatibility(a.pilot_status, b.pilot_status) / 10.0,
        usage: usage_compatibility(a.typical_flying_time, b.typical_flying_time) / 10.0,
        leaseback: leaseback_points(a.leaseback_interest, b.leaseback_interest),
        ..MatchFactors::default()
    };

    if a.pilot_status == PilotStatus::NonPilot && b.pilot_status == PilotStatus::NonPilot {
        factors.pilot_penalty = -5.0;
        warnings.push("Neither partner is a pilot; professional pilot services required".to_string());
    }

    let combined_days = a.usage_frequency_days.saturating_add(b.usage_frequency_days);
    if combined_days > 20 {
        factors.usage_adjustment = -10.0;
        warnings.push(format!(
            "High combined usage ({} days/month) may cause scheduling conflicts",
            combined_days
        ));
    } else if combined_days < 10 {
        factors.usage_adjustment = 5.0;
    }

    if factors.leaseback == 0.0 {
        warnings.push("Opposing views on leaseback".to_string());
    }

    let (budget, gap) = budget_points(a.calculated_monthly_net_cost, b.calculated_monthly_net_cost);
    factors.budget = budget;
    if let Some(percent) = gap.filter(|p| *p > 50.0) {
        warnings.push(format!("Monthly budgets differ by {:.0}%", percent));
    }

    if a.scheduling_flexibility == SchedulingFlexibility::VeryFlexible
        && b.scheduling_flexibility == SchedulingFlexibility::VeryFlexible
    {
        factors.flexibility = 5.0;
    }

    let score = factors.total().clamp(0.0, 100.0);
    MatchResult {
        score,
        factors,
        recommendation: Recommendation::from_score(score),
        warnings,
    }
}

/// Best open candidates for `profile`, strongest first. Candidates must be new or
/// contacted and score above 50.
pub fn find_top_matches<'a>(
    profile: &PartnershipProfile,
    candidates: &'a [PartnershipProfile],
    limit: usize,
) -> Vec<(&'a PartnershipProfile, MatchResult)> {
    let mut matches: Vec<(&PartnershipProfile, MatchResult)> = candidates
        .iter()
        .filter(|c| c.id != profile.id && c.status.is_open())
        .map(|c| (c, calculate_compatibility(profile, c)))
        .filter(|(_, m)| m.score > 50.0)
        .collect();

    matches.sort_by(|x, y| y.1.score.total_cmp(&x.1.score));
    matches.truncate(limit);

    debug!(
        "find_top_matches for {}: candidates={} returned={}",
        profile.id,
        candidates.len(),
        matches.len()
    );
    matches
}
