// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use log::debug;
use serde::{Deserialize, Serialize};

use crate::aircraft::{calculate_flight, AircraftConfig, FlightRequest, FlightResult};

/// Margin over the payload-range constant before a warning is raised.
const PAYLOAD_RANGE_TOLERANCE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    AircraftA,
    AircraftB,
    Tie,
}

/// One side of a comparison: the config and the tag reported back.
#[derive(Debug, Clone, Copy)]
pub struct Contender<'a> {
    pub tag: &'a str,
    pub config: &'a AircraftConfig,
}

impl<'a> Contender<'a> {
    pub fn new(tag: &'a str, config: &'a AircraftConfig) -> Self {
        Self { tag, config }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub aircraft_a: FlightResult,
    pub aircraft_b: FlightResult,
    pub winner: Winner,
    /// `a.time - b.time`, minutes. Positive means B is faster.
    pub time_saved: f64,
    /// `b.cost - a.cost`, dollars. Positive means A is cheaper.
    /// Note the sign runs the other way from `time_saved`.
    pub cost_difference: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_range_warning: Option<String>,
    pub is_close_call: bool,
}

fn percent_of(value: f64, base: f64) -> f64 {
    if base == 0.0 {
        0.0
    } else {
        value / base * 100.0
    }
}

/// Winner policy. Rule order matters; the first match wins.
fn pick_winner(a: &FlightResult, b: &FlightResult, time_saved: f64, cost_difference: f64) -> Winner {
    match (a.is_feasible(), b.is_feasible()) {
        (false, true) => return Winner::AircraftB,
        (true, false) => return Winner::AircraftA,
        (false, false) => return Winner::Tie,
        (true, true) => {}
    }

    let time_savings_percent = percent_of(time_saved, a.time);
    let cost_savings_percent = percent_of(cost_difference, b.cost);

    if cost_savings_percent >= 60.0 && time_savings_percent <= 25.0 {
        Winner::AircraftA
    } else if cost_difference > 800.0 && time_saved < 20.0 {
        Winner::AircraftA
    } else if time_savings_percent > 20.0 || time_saved > 45.0 {
        Winner::AircraftB
    } else if b.stops < a.stops {
        Winner::AircraftB
    } else if a.stops == b.stops && cost_difference > 500.0 {
        Winner::AircraftA
    } else {
        Winner::Tie
    }
}

fn payload_range_warning(
    contender: &Contender,
    distance: f64,
    passengers: u32,
    bags: u32,
) -> Option<String> {
    let formula = contender.config.payload_range_formula.as_ref()?;
    let payload = contender.config.payload_weight(passengers, bags);
    if payload + distance > formula.constant + PAYLOAD_RANGE_TOLERANCE {
        Some(format!(
            "{}: {:.0} lb payload over {:.0} nm exceeds the payload-range limit ({})",
            contender.tag, payload, distance, formula.description
        ))
    } else {
        None
    }
}

/// Applied to infeasible results too: their zeroed time and cost count as-is.
fn is_close_call(b: &FlightResult, time_saved: f64, cost_difference: f64) -> bool {
    let cost_ratio = if b.cost == 0.0 {
        0.0
    } else {
        cost_difference / b.cost
    };
    time_saved.abs() <= 30.0 || (cost_ratio >= 0.6 && (15.0..=45.0).contains(&time_saved))
}

/// Flies both aircraft on the same trip and applies the winner policy.
pub fn compare_missions(
    a: Contender,
    b: Contender,
    request: &FlightRequest,
) -> ComparisonResult {
    let result_a = calculate_flight(a.config, a.tag, request);
    let result_b = calculate_flight(b.config, b.tag, request);

    let time_saved = result_a.time - result_b.time;
    let cost_difference = result_b.cost - result_a.cost;

    let winner = pick_winner(&result_a, &result_b, time_saved, cost_difference);
    let payload_range_warning =
        payload_range_warning(&a, request.distance, request.passengers, request.bags).or_else(
            || payload_range_warning(&b, request.distance, request.passengers, request.bags),
        );
    let close_call = is_close_call(&result_b, time_saved, cost_difference);

    debug!(
        "compare {} vs {} over {:.0} nm: winner={:?} time_saved={:.1} cost_difference={:.0}",
        a.tag, b.tag, request.distance, winner, time_saved, cost_difference
    );

    ComparisonResult {
        aircraft_a: result_a,
        aircraft_b: result_b,
        winner,
        time_saved,
        cost_difference,
        payload_range_warning,
        is_close_call: close_call,
    }
}
