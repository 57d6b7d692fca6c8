// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use hangar_core::matching::{
    calculate_compatibility, find_top_matches, PartnershipProfile, ProfileStatus, Recommendation,
};

const PROFILES: &str = r#"[
  {
    "id": "p1", "name": "Weekday pilot",
    "aircraft_preference": ["sr22"], "ownership_share_preferences": [0.5],
    "pilot_status": "licensed", "purchase_timeline": "within_3_months",
    "typical_flying_time": "weekdays", "usage_frequency_days": 4,
    "leaseback_interest": "very_interested", "scheduling_flexibility": "very_flexible",
    "calculated_monthly_net_cost": 5000, "status": "new"
  },
  {
    "id": "p2", "name": "Weekend passenger",
    "aircraft_preference": ["SR22", "sf50"], "ownership_share_preferences": [0.5, 0.25],
    "pilot_status": "non_pilot", "purchase_timeline": "within_3_months",
    "typical_flying_time": "weekends", "usage_frequency_days": 4,
    "leaseback_interest": "very_interested", "scheduling_flexibility": "very_flexible",
    "calculated_monthly_net_cost": 5200, "status": "contacted"
  },
  {
    "id": "p3", "name": "Jet only",
    "aircraft_preference": ["sf50"], "ownership_share_preferences": [0.5],
    "pilot_status": "licensed", "purchase_timeline": "immediate",
    "typical_flying_time": "weekends", "usage_frequency_days": 4,
    "leaseback_interest": "very_interested", "scheduling_flexibility": "fixed",
    "status": "new"
  },
  {
    "id": "p4", "name": "Fleet member",
    "aircraft_preference": ["owners_fleet"], "ownership_share_preferences": [0.5],
    "pilot_status": "licensed", "purchase_timeline": "exploring",
    "typical_flying_time": "varies", "usage_frequency_days": 12,
    "leaseback_interest": "not_interested", "scheduling_flexibility": "fixed",
    "calculated_monthly_net_cost": 1000, "status": "new"
  },
  {
    "id": "p5", "name": "Already matched",
    "aircraft_preference": ["sr22"], "ownership_share_preferences": [0.5],
    "pilot_status": "non_pilot", "purchase_timeline": "within_3_months",
    "typical_flying_time": "weekends", "usage_frequency_days": 4,
    "leaseback_interest": "very_interested", "scheduling_flexibility": "very_flexible",
    "calculated_monthly_net_cost": 5000, "status": "matched"
  },
  {
    "id": "p6", "name": "Near fit",
    "aircraft_preference": ["sr22"], "ownership_share_preferences": [0.5],
    "pilot_status": "licensed", "purchase_timeline": "within_6_months",
    "typical_flying_time": "flexible", "usage_frequency_days": 8,
    "leaseback_interest": "somewhat", "scheduling_flexibility": "somewhat_flexible",
    "calculated_monthly_net_cost": 6000, "status": "new"
  }
]"#;

fn load() -> Vec<PartnershipProfile> {
    serde_json::from_str(PROFILES).expect("profiles parse")
}

fn by_id<'a>(all: &'a [PartnershipProfile], id: &str) -> &'a PartnershipProfile {
    all.iter().find(|p| p.id == id).expect("profile present")
}

#[test]
fn test_profiles_deserialize() {
    let all = load();
    assert_eq!(all.len(), 6);
    assert_eq!(by_id(&all, "p2").status, ProfileStatus::Contacted);
    assert_eq!(by_id(&all, "p3").calculated_monthly_net_cost, None);
}

#[test]
fn test_ideal_pair() {
    let all = load();
    let m = calculate_compatibility(by_id(&all, "p1"), by_id(&all, "p2"));
    // Perfect on every factor; 105 before clamping
    assert_eq!(m.score, 100.0);
    assert_eq!(m.recommendation, Recommendation::Excellent);
    assert_eq!(m.factors.flexibility, 5.0);
    assert_eq!(m.factors.usage_adjustment, 5.0);
    assert!(m.warnings.is_empty());
}

#[test]
fn test_score_is_symmetric_for_these_profiles() {
    let all = load();
    for a in &all {
        for b in &all {
            let ab = calculate_compatibility(a, b).score;
            let ba = calculate_compatibility(b, a).score;
            assert!((ab - ba).abs() < 1e-9, "{} / {}", a.id, b.id);
            assert!((0.0..=100.0).contains(&ab));
        }
    }
}

#[test]
fn test_aircraft_gate() {
    let all = load();
    let m = calculate_compatibility(by_id(&all, "p1"), by_id(&all, "p3"));
    assert_eq!(m.score, 0.0);
    assert_eq!(m.recommendation, Recommendation::Poor);
    assert_eq!(m.warnings.len(), 1);
}

#[test]
fn test_fleet_member_collects_warnings() {
    let all = load();
    let m = calculate_compatibility(by_id(&all, "p1"), by_id(&all, "p4"));
    // 20 + 20 + 5 (timeline) + 8 + 7 + 0 (leaseback) + 0 (budget), 16 days needs no adjustment
    assert!((m.score - 60.0).abs() < 1e-9, "{}", m.score);
    assert_eq!(m.recommendation, Recommendation::Fair);
    assert_eq!(m.warnings.len(), 2);
}

#[test]
fn test_top_matches_for_p1() {
    let all = load();
    let matches = find_top_matches(by_id(&all, "p1"), &all, 10);
    let ids: Vec<&str> = matches.iter().map(|(p, _)| p.id.as_str()).collect();

    // p3 is gated out, p5 is no longer open, p1 never matches itself
    assert_eq!(ids, vec!["p2", "p6", "p4"]);
    assert!(matches
        .windows(2)
        .all(|w| w[0].1.score >= w[1].1.score));
    assert!(matches.iter().all(|(_, m)| m.score > 50.0));
}

#[test]
fn test_top_matches_limit() {
    let all = load();
    let matches = find_top_matches(by_id(&all, "p1"), &all, 1);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].0.id, "p2");
    assert!(find_top_matches(by_id(&all, "p1"), &all, 0).is_empty());
}
