// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};

use super::leaseback::{ScenarioResults, ScenarioTerms};
use super::{apply_fractional_ownership, calculate_financing, effective_share, CostType};

/// Vision Jet ownership inputs. Same conventions as `LeasebackInputs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sf50Inputs {
    pub purchase_price: f64,
    pub interest_rate: f64,
    pub down_payment_percent: f64,
    pub loan_term_years: f64,
    pub insurance_annual: f64,
    pub management_fee: f64,
    pub subscriptions: f64,
    pub tci_training: f64,
    pub parking: f64,
    pub rental_hours: f64,
    pub owner_hours: f64,
    pub rental_revenue_rate: f64,
    pub owner_usage_rate: f64,
    /// JetStream program rate. Kept for display; the program is prepaid so it is
    /// never charged per hour.
    pub jetstream_hourly: f64,
    pub fuel_burn: f64,
    pub fuel_price: f64,
    pub owner_flown: bool,
    pub pilot_services_hours: f64,
    pub pilot_services_rate: f64,
    pub pilot_pool_monthly: f64,
    pub type_rating_recurrent_annual: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership_share: Option<f64>,
}

impl Default for Sf50Inputs {
    fn default() -> Self {
        Self {
            purchase_price: 3_200_000.0,
            interest_rate: 7.5,
            down_payment_percent: 20.0,
            loan_term_years: 20.0,
            insurance_annual: 38_000.0,
            management_fee: 3_000.0,
            subscriptions: 900.0,
            tci_training: 600.0,
            parking: 1_800.0,
            rental_hours: 0.0,
            owner_hours: 15.0,
            rental_revenue_rate: 1_800.0,
            owner_usage_rate: 1_400.0,
            jetstream_hourly: 380.0,
            fuel_burn: 65.0,
            fuel_price: 6.0,
            owner_flown: true,
            pilot_services_hours: 5.0,
            pilot_services_rate: 150.0,
            pilot_pool_monthly: 1_000.0,
            type_rating_recurrent_annual: 12_000.0,
            ownership_share: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sf50Results {
    pub scenario: ScenarioResults,
    pub owner_flown: bool,
    pub type_rating_multiplier: f64,
}

/// Share of the recurrent type-rating cost carried by a partner.
///
/// The quarter share pays more than the half share. That is how the pricing
/// table is published; keep it as is.
pub fn type_rating_multiplier(share: f64) -> f64 {
    const TABLE: [(f64, f64); 3] = [(1.0, 1.0), (0.5, 0.5), (0.25, 0.75)];
    TABLE
        .iter()
        .find(|(s, _)| (share - s).abs() < 1e-6)
        .map_or(1.0, |(_, m)| *m)
}

pub fn calculate_sf50_scenario(inputs: &Sf50Inputs) -> Sf50Results {
    let share = effective_share(inputs.ownership_share);
    let is_leaseback = inputs.rental_hours > 0.0;

    let financing = calculate_financing(
        apply_fractional_ownership(inputs.purchase_price, share, CostType::Standard),
        inputs.down_payment_percent,
        inputs.interest_rate,
        inputs.loan_term_years,
    );

    let revenue = if is_leaseback {
        (inputs.rental_hours + inputs.owner_hours) * inputs.rental_revenue_rate * share
    } else {
        0.0
    };

    let tci_training = if is_leaseback {
        apply_fractional_ownership(inputs.tci_training, share, CostType::TciTraining)
    } else {
        0.0
    };

    // JetStream covers scheduled maintenance up front.
    let jetstream_hourly = 0.0;
    let (owner_usage_costs, maintenance_cost, fuel_cost) = if is_leaseback {
        (inputs.owner_hours * inputs.owner_usage_rate, 0.0, 0.0)
    } else {
        (
            0.0,
            inputs.owner_hours * jetstream_hourly,
            inputs.owner_hours * inputs.fuel_burn * inputs.fuel_price,
        )
    };

    // An owner-pilot only buys occasional mentoring, split with partners.
    let pilot_services_policy = if inputs.owner_flown {
        CostType::Standard
    } else {
        CostType::NoDiscount
    };
    let pilot_services_cost = apply_fractional_ownership(
        inputs.pilot_services_hours * inputs.pilot_services_rate,
        share,
        pilot_services_policy,
    );

    let pilot_pool_contribution = if inputs.owner_flown && inputs.pilot_services_hours > 0.0 {
        inputs.pilot_pool_monthly
    } else {
        0.0
    };

    let multiplier = type_rating_multiplier(share);
    // Charged to every owner, flown or not.
    let type_rating_recurrent = inputs.type_rating_recurrent_annual / 12.0 * multiplier;

    let scenario = ScenarioTerms {
        is_leaseback,
        share,
        owner_hours: inputs.owner_hours,
        financing,
        revenue,
        parking: apply_fractional_ownership(inputs.parking, share, CostType::Parking),
        insurance: apply_fractional_ownership(
            inputs.insurance_annual / 12.0,
            share,
            CostType::Insurance,
        ),
        management: apply_fractional_ownership(inputs.management_fee, share, CostType::NoDiscount),
        subscriptions: apply_fractional_ownership(inputs.subscriptions, share, CostType::Standard),
        tci_training,
        owner_usage_costs,
        pilot_services_cost,
        maintenance_cost,
        fuel_cost,
        pilot_pool_contribution,
        type_rating_recurrent,
    }
    .into_results();

    Sf50Results {
        scenario,
        owner_flown: inputs.owner_flown,
        type_rating_multiplier: multiplier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cash_only() -> Sf50Inputs {
        Sf50Inputs {
            down_payment_percent: 100.0,
            ..Sf50Inputs::default()
        }
    }

    #[test]
    fn test_type_rating_table() {
        assert_eq!(type_rating_multiplier(1.0), 1.0);
        assert_eq!(type_rating_multiplier(0.5), 0.5);
        assert_eq!(type_rating_multiplier(0.25), 0.75);
        assert_eq!(type_rating_multiplier(0.333), 1.0);
        // Non-monotonic on purpose.
        assert!(type_rating_multiplier(0.25) > type_rating_multiplier(0.5));
    }

    #[test]
    fn test_jetstream_is_prepaid() {
        let r = calculate_sf50_scenario(&cash_only());
        assert_eq!(r.scenario.monthly.maintenance_cost, 0.0);
        assert!((r.scenario.monthly.fuel_cost - 15.0 * 65.0 * 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_owner_flown_costs() {
        let r = calculate_sf50_scenario(&cash_only());
        assert_eq!(r.scenario.monthly.pilot_pool_contribution, 1000.0);
        assert_eq!(r.scenario.monthly.type_rating_recurrent, 1000.0);
        assert_eq!(r.scenario.monthly.pilot_services_cost, 750.0);
    }

    #[test]
    fn test_pilot_pool_needs_service_hours() {
        let r = calculate_sf50_scenario(&Sf50Inputs {
            pilot_services_hours: 0.0,
            ..cash_only()
        });
        assert_eq!(r.scenario.monthly.pilot_pool_contribution, 0.0);

        let r = calculate_sf50_scenario(&Sf50Inputs {
            owner_flown: false,
            ..cash_only()
        });
        assert_eq!(r.scenario.monthly.pilot_pool_contribution, 0.0);
    }

    #[test]
    fn test_type_rating_charged_without_owner_flying() {
        let flown = calculate_sf50_scenario(&cash_only());
        let crewed = calculate_sf50_scenario(&Sf50Inputs {
            owner_flown: false,
            ..cash_only()
        });
        assert_eq!(crewed.scenario.monthly.type_rating_recurrent, 1000.0);
        assert_eq!(
            crewed.scenario.monthly.type_rating_recurrent,
            flown.scenario.monthly.type_rating_recurrent
        );
    }

    #[test]
    fn test_pilot_services_share_policy() {
        let half = |owner_flown| {
            calculate_sf50_scenario(&Sf50Inputs {
                owner_flown,
                ownership_share: Some(0.5),
                ..cash_only()
            })
        };
        assert!((half(true).scenario.monthly.pilot_services_cost - 375.0).abs() < 1e-9);
        assert_eq!(half(false).scenario.monthly.pilot_services_cost, 750.0);
    }

    #[test]
    fn test_quarter_share_type_rating() {
        let r = calculate_sf50_scenario(&Sf50Inputs {
            ownership_share: Some(0.25),
            ..cash_only()
        });
        assert_eq!(r.type_rating_multiplier, 0.75);
        assert!((r.scenario.monthly.type_rating_recurrent - 750.0).abs() < 1e-9);
    }

    #[test]
    fn test_leaseback_variant() {
        let r = calculate_sf50_scenario(&Sf50Inputs {
            rental_hours: 20.0,
            ..cash_only()
        });
        assert!(r.scenario.is_leaseback);
        assert!((r.scenario.monthly.revenue - 35.0 * 1800.0).abs() < 1e-9);
        assert_eq!(r.scenario.monthly.owner_usage_costs, 15.0 * 1400.0);
        assert_eq!(r.scenario.monthly.fuel_cost, 0.0);
        assert_eq!(r.scenario.monthly.tci_training, 600.0);
    }
}
