// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};

use super::{apply_fractional_ownership, calculate_financing, effective_share, CostType, Financing};

/// Single-aircraft ownership inputs. Amounts are monthly unless the name says
/// otherwise; rates are $/hr.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeasebackInputs {
    pub purchase_price: f64,
    /// Percent.
    pub interest_rate: f64,
    /// Percent.
    pub down_payment_percent: f64,
    pub loan_term_years: f64,
    pub insurance_annual: f64,
    pub management_fee: f64,
    pub subscriptions: f64,
    pub tci_training: f64,
    pub parking: f64,
    /// Hours per month flown by renters. Zero means standard ownership.
    pub rental_hours: f64,
    pub owner_hours: f64,
    pub rental_revenue_rate: f64,
    /// What the operator bills the owner per hour in a leaseback.
    /// Covers maintenance and fuel.
    pub owner_usage_rate: f64,
    pub maintenance_per_hour: f64,
    /// gal/hr
    pub fuel_burn: f64,
    /// $/gal
    pub fuel_price: f64,
    pub pilot_services_hours: f64,
    pub pilot_services_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership_share: Option<f64>,
}

impl Default for LeasebackInputs {
    fn default() -> Self {
        Self {
            purchase_price: 950_000.0,
            interest_rate: 7.5,
            down_payment_percent: 20.0,
            loan_term_years: 20.0,
            insurance_annual: 12_000.0,
            management_fee: 1_500.0,
            subscriptions: 400.0,
            tci_training: 350.0,
            parking: 800.0,
            rental_hours: 30.0,
            owner_hours: 10.0,
            rental_revenue_rate: 450.0,
            owner_usage_rate: 375.0,
            maintenance_per_hour: 180.0,
            fuel_burn: 18.5,
            fuel_price: 6.5,
            pilot_services_hours: 0.0,
            pilot_services_rate: 100.0,
            ownership_share: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    pub revenue: f64,
    pub parking: f64,
    pub insurance: f64,
    pub management: f64,
    pub subscriptions: f64,
    pub tci_training: f64,
    pub fixed_costs: f64,
    pub net_operating_income: f64,
    pub owner_usage_costs: f64,
    pub pilot_services_cost: f64,
    pub maintenance_cost: f64,
    pub fuel_cost: f64,
    /// SF50 only.
    pub pilot_pool_contribution: f64,
    /// SF50 only.
    pub type_rating_recurrent: f64,
    pub debt_service: f64,
    pub net_monthly_cash_flow: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnualSummary {
    pub revenue: f64,
    pub fixed_costs: f64,
    pub net_operating_income: f64,
    pub variable_costs: f64,
    pub debt_service: f64,
    pub net_cash_flow: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResults {
    pub is_leaseback: bool,
    pub ownership_share: f64,
    pub financing: Financing,
    pub monthly: MonthlyBreakdown,
    pub annual: AnnualSummary,
    /// Absolute net monthly cash flow per owner hour.
    pub cost_per_hour: f64,
}

/// Already share-adjusted monthly figures; both the standard and SF50 models reduce
/// to this before the cash flow is assembled.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ScenarioTerms {
    pub is_leaseback: bool,
    pub share: f64,
    pub owner_hours: f64,
    pub financing: Financing,
    pub revenue: f64,
    pub parking: f64,
    pub insurance: f64,
    pub management: f64,
    pub subscriptions: f64,
    pub tci_training: f64,
    pub owner_usage_costs: f64,
    pub pilot_services_cost: f64,
    pub maintenance_cost: f64,
    pub fuel_cost: f64,
    pub pilot_pool_contribution: f64,
    pub type_rating_recurrent: f64,
}

impl ScenarioTerms {
    pub(crate) fn into_results(self) -> ScenarioResults {
        let fixed_costs =
            self.parking + self.insurance + self.management + self.subscriptions + self.tci_training;
        let net_operating_income = self.revenue - fixed_costs;
        let debt_service = self.financing.monthly_payment;
        let variable = self.owner_usage_costs
            + self.pilot_services_cost
            + self.maintenance_cost
            + self.fuel_cost
            + self.pilot_pool_contribution
            + self.type_rating_recurrent;
        let net_monthly_cash_flow = net_operating_income - variable - debt_service;

        let cost_per_hour = if self.owner_hours > 0.0 {
            net_monthly_cash_flow.abs() / self.owner_hours
        } else {
            0.0
        };

        ScenarioResults {
            is_leaseback: self.is_leaseback,
            ownership_share: self.share,
            financing: self.financing,
            monthly: MonthlyBreakdown {
                revenue: self.revenue,
                parking: self.parking,
                insurance: self.insurance,
                management: self.management,
                subscriptions: self.subscriptions,
                tci_training: self.tci_training,
                fixed_costs,
                net_operating_income,
                owner_usage_costs: self.owner_usage_costs,
                pilot_services_cost: self.pilot_services_cost,
                maintenance_cost: self.maintenance_cost,
                fuel_cost: self.fuel_cost,
                pilot_pool_contribution: self.pilot_pool_contribution,
                type_rating_recurrent: self.type_rating_recurrent,
                debt_service,
                net_monthly_cash_flow,
            },
            annual: AnnualSummary {
                revenue: self.revenue * 12.0,
                fixed_costs: fixed_costs * 12.0,
                net_operating_income: net_operating_income * 12.0,
                variable_costs: variable * 12.0,
                debt_service: debt_service * 12.0,
                net_cash_flow: net_monthly_cash_flow * 12.0,
            },
            cost_per_hour,
        }
    }
}

/// Monthly P&L for one aircraft. A leaseback is any scenario with rental hours.
pub fn calculate_scenario(inputs: &LeasebackInputs) -> ScenarioResults {
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

    // The leaseback owner-usage rate already includes maintenance and fuel.
    let (owner_usage_costs, maintenance_cost, fuel_cost) = if is_leaseback {
        (inputs.owner_hours * inputs.owner_usage_rate, 0.0, 0.0)
    } else {
        (
            0.0,
            inputs.owner_hours * inputs.maintenance_per_hour,
            inputs.owner_hours * inputs.fuel_burn * inputs.fuel_price,
        )
    };

    ScenarioTerms {
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
        pilot_services_cost: apply_fractional_ownership(
            inputs.pilot_services_hours * inputs.pilot_services_rate,
            share,
            CostType::NoDiscount,
        ),
        maintenance_cost,
        fuel_cost,
        ..ScenarioTerms::default()
    }
    .into_results()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub standard: ScenarioResults,
    pub leaseback: ScenarioResults,
    /// Leaseback net monthly cash flow minus standard. Positive favours leaseback.
    pub monthly_advantage: f64,
    pub annual_advantage: f64,
}

/// Runs the same inputs as standard ownership (no rental) and as a leaseback.
pub fn compare_scenarios(inputs: &LeasebackInputs) -> ScenarioComparison {
    let standard = calculate_scenario(&LeasebackInputs {
        rental_hours: 0.0,
        ..inputs.clone()
    });
    let leaseback = calculate_scenario(inputs);
    let monthly_advantage =
        leaseback.monthly.net_monthly_cash_flow - standard.monthly.net_monthly_cash_flow;

    ScenarioComparison {
        standard,
        leaseback,
        monthly_advantage,
        annual_advantage: monthly_advantage * 12.0,
    }
}
