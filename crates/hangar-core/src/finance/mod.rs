// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Ownership economics: loan amortization, fractional-share cost rules and the
//! monthly P&L models built on them.

pub mod leaseback;
pub mod owners_fleet;
pub mod sf50;

use serde::{Deserialize, Serialize};

/// Shared fixed costs carry a 20% coordination premium for partial owners.
const SHARED_FIXED_COST_PREMIUM: f64 = 1.2;

/// Shares offered to partners: whole, half, third, quarter.
pub const OWNERSHIP_SHARES: [f64; 4] = [1.0, 0.5, 0.333, 0.25];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostType {
    Parking,
    Insurance,
    TciTraining,
    /// Billed at the full rate whatever the share (pilot services, management).
    NoDiscount,
    Standard,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Financing {
    pub down_payment: f64,
    pub loan_amount: f64,
    pub monthly_payment: f64,
}

/// Standard amortized loan. `down_payment_percent` and `annual_rate_percent` are
/// percentages (20 = 20%).
pub fn calculate_financing(
    purchase_price: f64,
    down_payment_percent: f64,
    annual_rate_percent: f64,
    term_years: f64,
) -> Financing {
    let down_payment = purchase_price * down_payment_percent / 100.0;
    let loan_amount = purchase_price - down_payment;
    let months = term_years * 12.0;

    let monthly_payment = if loan_amount <= 0.0 || annual_rate_percent <= 0.0 || months <= 0.0 {
        0.0
    } else {
        let r = annual_rate_percent / 100.0 / 12.0;
        let growth = (1.0 + r).powf(months);
        loan_amount * r * growth / (growth - 1.0)
    };

    Financing {
        down_payment,
        loan_amount,
        monthly_payment,
    }
}

/// Resolves an optional share to the fraction actually owned.
pub fn effective_share(share: Option<f64>) -> f64 {
    share.unwrap_or(1.0)
}

/// Scales a cost to the owner's share according to its type. A whole share is
/// never adjusted.
pub fn apply_fractional_ownership(cost: f64, share: f64, cost_type: CostType) -> f64 {
    if share == 1.0 {
        return cost;
    }
    match cost_type {
        CostType::Parking | CostType::Insurance | CostType::TciTraining => {
            cost * share * SHARED_FIXED_COST_PREMIUM
        }
        CostType::NoDiscount => cost,
        CostType::Standard => cost * share,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_share_is_identity() {
        for cost_type in [
            CostType::Parking,
            CostType::Insurance,
            CostType::TciTraining,
            CostType::NoDiscount,
            CostType::Standard,
        ] {
            assert_eq!(apply_fractional_ownership(1234.5, 1.0, cost_type), 1234.5);
        }
    }

    #[test]
    fn test_fractional_rules() {
        assert!((apply_fractional_ownership(1000.0, 0.5, CostType::Parking) - 600.0).abs() < 1e-9);
        assert!(
            (apply_fractional_ownership(1000.0, 0.25, CostType::Insurance) - 300.0).abs() < 1e-9
        );
        assert_eq!(apply_fractional_ownership(1000.0, 0.5, CostType::NoDiscount), 1000.0);
        assert!(
            (apply_fractional_ownership(1000.0, 0.333, CostType::Standard) - 333.0).abs() < 1e-9
        );
    }

    #[test]
    fn test_full_down_payment() {
        for (rate, term) in [(0.0, 0.0), (7.5, 20.0), (12.0, 5.0)] {
            let f = calculate_financing(800_000.0, 100.0, rate, term);
            assert_eq!(f.down_payment, 800_000.0);
            assert_eq!(f.loan_amount, 0.0);
            assert_eq!(f.monthly_payment, 0.0);
        }
    }

    #[test]
    fn test_zero_rate_has_no_payment() {
        let f = calculate_financing(500_000.0, 20.0, 0.0, 10.0);
        assert_eq!(f.loan_amount, 400_000.0);
        assert_eq!(f.monthly_payment, 0.0);
    }

    #[test]
    fn test_amortized_payment() {
        // $100k at 6% over 30 years is the textbook $599.55
        let f = calculate_financing(100_000.0, 0.0, 6.0, 30.0);
        assert!((f.monthly_payment - 599.55).abs() < 0.01, "{}", f.monthly_payment);
    }
}
