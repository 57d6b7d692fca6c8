// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use hangar_core::config::CalculatorConfig;
use hangar_core::finance::leaseback::{
    calculate_scenario, compare_scenarios, LeasebackInputs, ScenarioResults,
};
use hangar_core::finance::owners_fleet::{calculate_owners_fleet, OwnersFleetInputs};
use hangar_core::finance::sf50::{calculate_sf50_scenario, Sf50Inputs};
use hangar_core::finance::OWNERSHIP_SHARES;

const EPS: f64 = 1e-6;

fn assert_consistent(r: &ScenarioResults) {
    let m = &r.monthly;
    let fixed = m.parking + m.insurance + m.management + m.subscriptions + m.tci_training;
    assert!((m.fixed_costs - fixed).abs() < EPS);
    assert!((m.net_operating_income - (m.revenue - m.fixed_costs)).abs() < EPS);

    let variable = m.owner_usage_costs
        + m.pilot_services_cost
        + m.maintenance_cost
        + m.fuel_cost
        + m.pilot_pool_contribution
        + m.type_rating_recurrent;
    let net = m.net_operating_income - variable - m.debt_service;
    assert!((m.net_monthly_cash_flow - net).abs() < EPS);

    assert!((r.annual.net_cash_flow - m.net_monthly_cash_flow * 12.0).abs() < 1e-4);
    assert!((r.annual.variable_costs - variable * 12.0).abs() < 1e-4);
    assert!(r.cost_per_hour >= 0.0);
}

// ============================================================================
// SR22 standard vs leaseback
// ============================================================================

#[test]
fn test_cash_purchase_leaseback_numbers() {
    let inputs = LeasebackInputs {
        down_payment_percent: 100.0,
        ..LeasebackInputs::default()
    };
    let comparison = compare_scenarios(&inputs);

    let leaseback = &comparison.leaseback.monthly;
    assert!(comparison.leaseback.is_leaseback);
    assert_eq!(leaseback.revenue, 18_000.0);
    assert!((leaseback.fixed_costs - 4_050.0).abs() < EPS);
    assert_eq!(leaseback.owner_usage_costs, 3_750.0);
    assert_eq!(leaseback.debt_service, 0.0);
    assert!((leaseback.net_monthly_cash_flow - 10_200.0).abs() < EPS);

    let standard = &comparison.standard.monthly;
    assert!(!comparison.standard.is_leaseback);
    assert_eq!(standard.revenue, 0.0);
    assert_eq!(standard.tci_training, 0.0);
    assert!((standard.net_monthly_cash_flow + 6_702.5).abs() < EPS);
    assert!((comparison.standard.cost_per_hour - 670.25).abs() < EPS);

    assert!((comparison.monthly_advantage - 16_902.5).abs() < EPS);
    assert!((comparison.annual_advantage - 16_902.5 * 12.0).abs() < 1e-4);
}

#[test]
fn test_every_share_is_internally_consistent() {
    for share in OWNERSHIP_SHARES {
        let inputs = LeasebackInputs {
            ownership_share: Some(share),
            ..LeasebackInputs::default()
        };
        let comparison = compare_scenarios(&inputs);
        assert_consistent(&comparison.standard);
        assert_consistent(&comparison.leaseback);
        assert_eq!(comparison.leaseback.ownership_share, share);

        let sf50 = calculate_sf50_scenario(&Sf50Inputs {
            ownership_share: Some(share),
            ..Sf50Inputs::default()
        });
        assert_consistent(&sf50.scenario);
    }
}

#[test]
fn test_smaller_share_needs_less_down() {
    let down = |share| {
        calculate_scenario(&LeasebackInputs {
            ownership_share: Some(share),
            ..LeasebackInputs::default()
        })
        .financing
        .down_payment
    };
    assert!((down(1.0) - 190_000.0).abs() < EPS);
    assert!((down(0.5) - 95_000.0).abs() < EPS);
    assert!(down(0.25) < down(0.5));
}

#[test]
fn test_management_fee_is_never_split() {
    for share in OWNERSHIP_SHARES {
        let r = calculate_scenario(&LeasebackInputs {
            ownership_share: Some(share),
            ..LeasebackInputs::default()
        });
        assert_eq!(r.monthly.management, 1_500.0);
    }
}

// ============================================================================
// Config-supplied inputs
// ============================================================================

#[test]
fn test_default_config_inputs_run() {
    let config = CalculatorConfig::default();

    let sf50 = calculate_sf50_scenario(&config.sf50_leaseback);
    assert!(sf50.owner_flown);
    assert!(!sf50.scenario.is_leaseback);
    assert!(sf50.scenario.monthly.net_monthly_cash_flow < 0.0);

    let fleet = calculate_owners_fleet(&config.owners_fleet);
    assert_eq!(fleet, calculate_owners_fleet(&OwnersFleetInputs::default()));
    assert!((fleet.total_monthly - fleet.total_fixed_monthly - fleet.total_variable_monthly).abs() < EPS);
    assert!(fleet.cost_per_hour > 0.0);
}

#[test]
fn test_partial_inputs_json() -> anyhow::Result<()> {
    let inputs: LeasebackInputs =
        serde_json::from_str(r#"{ "rental_hours": 0, "ownership_share": 0.5 }"#)?;
    assert_eq!(inputs.purchase_price, 950_000.0);
    assert_eq!(inputs.ownership_share, Some(0.5));

    let r = calculate_scenario(&inputs);
    assert!(!r.is_leaseback);
    // Parking carries the partial-owner premium
    assert!((r.monthly.parking - 480.0).abs() < EPS);
    Ok(())
}
