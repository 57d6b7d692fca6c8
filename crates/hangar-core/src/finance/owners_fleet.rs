// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};

use super::{apply_fractional_ownership, calculate_financing, effective_share, CostType, Financing};

/// Per-aircraft part of an owners-fleet membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetAircraftInputs {
    pub purchase_price: f64,
    pub insurance_annual: f64,
    /// Monthly.
    pub parking: f64,
    pub maintenance_per_hour: f64,
    /// gal/hr
    pub fuel_burn: f64,
    /// $/gal
    pub fuel_price: f64,
    /// Owner hours per month.
    pub hours: f64,
}

impl Default for FleetAircraftInputs {
    fn default() -> Self {
        Self::piston()
    }
}

impl FleetAircraftInputs {
    pub fn piston() -> Self {
        Self {
            purchase_price: 950_000.0,
            insurance_annual: 12_000.0,
            parking: 800.0,
            maintenance_per_hour: 180.0,
            fuel_burn: 18.5,
            fuel_price: 6.5,
            hours: 8.0,
        }
    }

    pub fn jet() -> Self {
        Self {
            purchase_price: 3_200_000.0,
            insurance_annual: 38_000.0,
            parking: 1_800.0,
            maintenance_per_hour: 380.0,
            fuel_burn: 65.0,
            fuel_price: 6.0,
            hours: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnersFleetInputs {
    pub piston: FleetAircraftInputs,
    pub jet: FleetAircraftInputs,
    pub interest_rate: f64,
    pub down_payment_percent: f64,
    pub loan_term_years: f64,
    pub management_fee: f64,
    pub subscriptions: f64,
    pub pilot_pool_monthly: f64,
    pub professional_services_hours: f64,
    pub professional_services_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership_share: Option<f64>,
}

impl Default for OwnersFleetInputs {
    fn default() -> Self {
        Self {
            piston: FleetAircraftInputs::piston(),
            jet: FleetAircraftInputs::jet(),
            interest_rate: 7.5,
            down_payment_percent: 20.0,
            loan_term_years: 20.0,
            management_fee: 2_500.0,
            subscriptions: 1_200.0,
            pilot_pool_monthly: 1_000.0,
            professional_services_hours: 6.0,
            professional_services_rate: 150.0,
            ownership_share: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FleetAircraftCosts {
    pub financing: Financing,
    pub parking: f64,
    pub insurance: f64,
    pub debt_service: f64,
    pub fixed_monthly: f64,
    pub maintenance: f64,
    pub fuel: f64,
    pub variable_monthly: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OwnersFleetResults {
    pub ownership_share: f64,
    pub piston: FleetAircraftCosts,
    pub jet: FleetAircraftCosts,
    pub management: f64,
    pub subscriptions: f64,
    pub pilot_pool_contribution: f64,
    pub professional_services: f64,
    pub total_fixed_monthly: f64,
    pub total_variable_monthly: f64,
    pub total_monthly: f64,
    pub total_annual: f64,
    pub total_down_payment: f64,
    pub total_hours: f64,
    pub cost_per_hour: f64,
}

fn aircraft_costs(
    aircraft: &FleetAircraftInputs,
    share: f64,
    inputs: &OwnersFleetInputs,
) -> FleetAircraftCosts {
    let financing = calculate_financing(
        apply_fractional_ownership(aircraft.purchase_price, share, CostType::Standard),
        inputs.down_payment_percent,
        inputs.interest_rate,
        inputs.loan_term_years,
    );
    let parking = apply_fractional_ownership(aircraft.parking, share, CostType::Parking);
    let insurance =
        apply_fractional_ownership(aircraft.insurance_annual / 12.0, share, CostType::Insurance);
    let debt_service = financing.monthly_payment;

    let maintenance = aircraft.hours * aircraft.maintenance_per_hour;
    let fuel = aircraft.hours * aircraft.fuel_burn * aircraft.fuel_price;

    FleetAircraftCosts {
        financing,
        parking,
        insurance,
        debt_service,
        fixed_monthly: parking + insurance + debt_service,
        maintenance,
        fuel,
        variable_monthly: maintenance + fuel,
    }
}

/// Piston + jet membership. Unlike the single-jet model the pilot pool and
/// professional services are always charged.
pub fn calculate_owners_fleet(inputs: &OwnersFleetInputs) -> OwnersFleetResults {
    let share = effective_share(inputs.ownership_share);

    let piston = aircraft_costs(&inputs.piston, share, inputs);
    let jet = aircraft_costs(&inputs.jet, share, inputs);

    let management = apply_fractional_ownership(inputs.management_fee, share, CostType::NoDiscount);
    let subscriptions = apply_fractional_ownership(inputs.subscriptions, share, CostType::Standard);
    let pilot_pool_contribution = inputs.pilot_pool_monthly;
    let professional_services = apply_fractional_ownership(
        inputs.professional_services_hours * inputs.professional_services_rate,
        share,
        CostType::NoDiscount,
    );

    let total_fixed_monthly = piston.fixed_monthly
        + jet.fixed_monthly
        + management
        + subscriptions
        + pilot_pool_contribution;
    let total_variable_monthly =
        piston.variable_monthly + jet.variable_monthly + professional_services;
    let total_monthly = total_fixed_monthly + total_variable_monthly;
    let total_hours = inputs.piston.hours + inputs.jet.hours;

    OwnersFleetResults {
        ownership_share: share,
        piston,
        jet,
        management,
        subscriptions,
        pilot_pool_contribution,
        professional_services,
        total_fixed_monthly,
        total_variable_monthly,
        total_monthly,
        total_annual: total_monthly * 12.0,
        total_down_payment: piston.financing.down_payment + jet.financing.down_payment,
        total_hours,
        cost_per_hour: if total_hours > 0.0 {
            total_monthly / total_hours
        } else {
            0.0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cash_only() -> OwnersFleetInputs {
        OwnersFleetInputs {
            down_payment_percent: 100.0,
            ..OwnersFleetInputs::default()
        }
    }

    #[test]
    fn test_variable_costs_per_aircraft() {
        let r = calculate_owners_fleet(&cash_only());
        assert_eq!(r.piston.maintenance, 8.0 * 180.0);
        assert!((r.piston.fuel - 8.0 * 18.5 * 6.5).abs() < 1e-9);
        assert_eq!(r.jet.maintenance, 10.0 * 380.0);
        assert_eq!(r.jet.fuel, 10.0 * 65.0 * 6.0);
        let expected = r.piston.variable_monthly + r.jet.variable_monthly + 900.0;
        assert!((r.total_variable_monthly - expected).abs() < 1e-9);
    }

    #[test]
    fn test_pilot_pool_always_applies() {
        let r = calculate_owners_fleet(&cash_only());
        assert_eq!(r.pilot_pool_contribution, 1000.0);
        assert_eq!(r.professional_services, 900.0);

        let r = calculate_owners_fleet(&OwnersFleetInputs {
            ownership_share: Some(0.25),
            ..cash_only()
        });
        assert_eq!(r.pilot_pool_contribution, 1000.0);
        assert_eq!(r.professional_services, 900.0);
    }

    #[test]
    fn test_fixed_totals() {
        let r = calculate_owners_fleet(&cash_only());
        // parking 800 + 1800, insurance 1000 + 3166.67, mgmt 2500, subs 1200, pool 1000
        let expected = 800.0 + 1800.0 + 1000.0 + 38_000.0 / 12.0 + 2500.0 + 1200.0 + 1000.0;
        assert!((r.total_fixed_monthly - expected).abs() < 1e-9);
        assert!((r.total_annual - r.total_monthly * 12.0).abs() < 1e-6);
        assert_eq!(r.total_hours, 18.0);
    }

    #[test]
    fn test_share_scales_financing() {
        let r = calculate_owners_fleet(&OwnersFleetInputs {
            ownership_share: Some(0.5),
            ..OwnersFleetInputs::default()
        });
        assert!((r.total_down_payment - (950_000.0 + 3_200_000.0) * 0.5 * 0.2).abs() < 1e-6);
        assert!((r.piston.parking - 480.0).abs() < 1e-9);
    }
}
