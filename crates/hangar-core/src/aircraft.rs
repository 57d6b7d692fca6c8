// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Sentinel stop count for a mission the aircraft cannot fly.
pub const INFEASIBLE_STOPS: u32 = 999;

/// Ground time added per fuel stop.
pub const MINUTES_PER_STOP: f64 = 45.0;

/// More stops than this and the trip is not worth quoting.
pub const MAX_STOPS: u32 = 4;

pub const DEFAULT_HEADWIND_KT: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadRangeFormula {
    /// Payload (lb) plus distance (nm) should stay at or below this.
    pub constant: f64,
    pub description: String,
}

/// Physical and economic parameters of one aircraft type.
///
/// Units: kt, gal/hr, $/hr, nm, ft, gal, lb, lb/gal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftConfig {
    pub cruise_speed: f64,
    pub fuel_flow: f64,
    pub maintenance_cost: f64,
    pub range: f64,
    pub min_runway: f64,
    pub fuel_capacity: f64,
    pub usable_fuel: f64,
    pub max_passengers: u32,
    pub max_bags: u32,
    pub max_useful_load: f64,
    pub empty_weight: f64,
    /// 6.0 for avgas, 6.7 for Jet-A.
    pub fuel_weight_per_gallon: f64,
    pub avg_person_weight: f64,
    pub avg_bag_weight: f64,
    pub taxi_fuel: f64,
    pub contingency_fuel_min: f64,
    pub reserve_fuel: f64,
    pub max_takeoff_weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_range_formula: Option<PayloadRangeFormula>,
}

impl AircraftConfig {
    /// Cirrus SR22 (avgas piston single).
    pub fn sr22() -> Self {
        Self {
            cruise_speed: 172.0,
            fuel_flow: 18.5,
            maintenance_cost: 400.0,
            range: 1000.0,
            min_runway: 2500.0,
            fuel_capacity: 94.5,
            usable_fuel: 92.0,
            max_passengers: 3,
            max_bags: 4,
            max_useful_load: 1250.0,
            empty_weight: 2350.0,
            fuel_weight_per_gallon: 6.0,
            avg_person_weight: 190.0,
            avg_bag_weight: 25.0,
            taxi_fuel: 1.0,
            contingency_fuel_min: 5.0,
            reserve_fuel: 11.0,
            max_takeoff_weight: 3600.0,
            payload_range_formula: None,
        }
    }

    /// Cirrus SF50 Vision Jet (Jet-A single-engine jet).
    pub fn sf50() -> Self {
        Self {
            cruise_speed: 305.0,
            fuel_flow: 65.0,
            maintenance_cost: 1200.0,
            range: 1200.0,
            min_runway: 3200.0,
            fuel_capacity: 296.0,
            usable_fuel: 296.0,
            max_passengers: 5,
            max_bags: 6,
            max_useful_load: 2450.0,
            empty_weight: 3550.0,
            fuel_weight_per_gallon: 6.7,
            avg_person_weight: 190.0,
            avg_bag_weight: 25.0,
            taxi_fuel: 3.0,
            contingency_fuel_min: 10.0,
            reserve_fuel: 30.0,
            max_takeoff_weight: 6000.0,
            payload_range_formula: Some(PayloadRangeFormula {
                constant: 1800.0,
                description: "Payload (lb) + distance (nm) should not exceed 1800".to_string(),
            }),
        }
    }

    /// Checks the structural invariants of the config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.usable_fuel > self.fuel_capacity {
            return Err(ConfigError::Invariant(format!(
                "usable fuel {} gal exceeds fuel capacity {} gal",
                self.usable_fuel, self.fuel_capacity
            )));
        }
        if self.max_takeoff_weight < self.empty_weight {
            return Err(ConfigError::Invariant(format!(
                "max takeoff weight {} lb is below empty weight {} lb",
                self.max_takeoff_weight, self.empty_weight
            )));
        }
        Ok(())
    }

    pub fn payload_weight(&self, passengers: u32, bags: u32) -> f64 {
        passengers as f64 * self.avg_person_weight + bags as f64 * self.avg_bag_weight
    }

    pub fn zero_fuel_weight(&self, passengers: u32, bags: u32) -> f64 {
        self.empty_weight + self.payload_weight(passengers, bags)
    }
}

/// Trip parameters for a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightRequest {
    /// Nautical miles.
    pub distance: f64,
    pub passengers: u32,
    pub bags: u32,
    /// Knots, positive = headwind.
    pub headwind: f64,
    /// Minutes, applied at both ends.
    pub taxi_time_per_airport: f64,
    /// Shortest runway on the route in feet, if known.
    pub runway_available: Option<f64>,
}

impl FlightRequest {
    pub fn new(distance: f64, passengers: u32, bags: u32) -> Self {
        Self {
            distance,
            passengers,
            bags,
            headwind: DEFAULT_HEADWIND_KT,
            taxi_time_per_airport: 0.0,
            runway_available: None,
        }
    }

    pub fn with_headwind(mut self, headwind: f64) -> Self {
        self.headwind = headwind;
        self
    }

    pub fn with_taxi_time(mut self, minutes: f64) -> Self {
        self.taxi_time_per_airport = minutes;
        self
    }

    pub fn with_runway(mut self, feet: f64) -> Self {
        self.runway_available = Some(feet);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightResult {
    pub aircraft: String,
    /// Minutes, including taxi and stop time.
    pub time: f64,
    /// Gallons.
    pub fuel: f64,
    /// Dollars, rounded to $10.
    pub cost: f64,
    pub stops: u32,
    pub can_make_it: bool,
    pub runway_ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_margin_percent: Option<f64>,
}

impl FlightResult {
    fn infeasible(aircraft: &str, runway_ok: bool) -> Self {
        Self {
            aircraft: aircraft.to_string(),
            time: 0.0,
            fuel: 0.0,
            cost: 0.0,
            stops: INFEASIBLE_STOPS,
            can_make_it: false,
            runway_ok,
            fuel_margin_percent: None,
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.can_make_it && self.stops != INFEASIBLE_STOPS
    }
}

/// Evaluates one aircraft on one trip: time, fuel, cost, fuel stops and capacity.
///
/// Never fails. Anything the aircraft cannot do comes back as the infeasible
/// sentinel (`stops == INFEASIBLE_STOPS`, `can_make_it == false`, zeroed totals).
pub fn calculate_flight(
    config: &AircraftConfig,
    aircraft: &str,
    request: &FlightRequest,
) -> FlightResult {
    let runway_ok = request
        .runway_available
        .map_or(true, |available| available >= config.min_runway);

    if request.passengers > config.max_passengers || request.bags > config.max_bags {
        debug!(
            "{} over capacity: passengers={} bags={}",
            aircraft, request.passengers, request.bags
        );
        return FlightResult::infeasible(aircraft, runway_ok);
    }

    let zero_fuel_weight = config.zero_fuel_weight(request.passengers, request.bags);
    if zero_fuel_weight > config.max_takeoff_weight {
        debug!(
            "{} over weight before fuel: zfw={} mtow={}",
            aircraft, zero_fuel_weight, config.max_takeoff_weight
        );
        return FlightResult::infeasible(aircraft, runway_ok);
    }

    let available_fuel = config
        .usable_fuel
        .min((config.max_takeoff_weight - zero_fuel_weight) / config.fuel_weight_per_gallon);

    let ground_speed = config.cruise_speed - request.headwind;
    if ground_speed <= 0.0 {
        debug!("{} cannot make headway: ground_speed={}", aircraft, ground_speed);
        return FlightResult::infeasible(aircraft, runway_ok);
    }

    let flight_hours = request.distance / ground_speed;
    let trip_fuel = flight_hours * config.fuel_flow;
    let contingency = (trip_fuel * 0.05).max(config.contingency_fuel_min);
    let total_fuel_needed =
        trip_fuel + config.taxi_fuel * 2.0 + contingency + config.reserve_fuel;

    if available_fuel < config.taxi_fuel + config.reserve_fuel + 10.0 {
        debug!(
            "{} fuel-limited by weight: available_fuel={}",
            aircraft, available_fuel
        );
        return FlightResult::infeasible(aircraft, runway_ok);
    }

    let leg_fuel =
        available_fuel - config.taxi_fuel - config.reserve_fuel - config.contingency_fuel_min;
    let range_per_leg = leg_fuel / config.fuel_flow * ground_speed;

    let stops = if request.distance <= range_per_leg {
        0
    } else if range_per_leg <= 0.0 {
        return FlightResult::infeasible(aircraft, runway_ok);
    } else {
        let legs = (request.distance / range_per_leg).ceil() as u32;
        legs.saturating_sub(1)
    };

    if stops > MAX_STOPS {
        debug!(
            "{} needs too many stops: stops={} range_per_leg={:.1}",
            aircraft, stops, range_per_leg
        );
        return FlightResult::infeasible(aircraft, runway_ok);
    }

    let flight_minutes = flight_hours * 60.0;
    let taxi_minutes = request.taxi_time_per_airport * 2.0;
    let time = flight_minutes + taxi_minutes + stops as f64 * MINUTES_PER_STOP;
    let cost = crate::round_to(
        (flight_minutes + taxi_minutes) / 60.0 * config.maintenance_cost,
        10.0,
    );

    let fuel_margin_percent = if stops == 0 {
        Some((available_fuel - total_fuel_needed) / total_fuel_needed * 100.0)
    } else {
        None
    };

    FlightResult {
        aircraft: aircraft.to_string(),
        time,
        fuel: total_fuel_needed,
        cost,
        stops,
        can_make_it: true,
        runway_ok,
        fuel_margin_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AircraftConfig::sr22().validate().is_ok());
        assert!(AircraftConfig::sf50().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_overfull_tank() {
        let mut cfg = AircraftConfig::sr22();
        cfg.usable_fuel = 120.0;
        assert!(cfg.validate().is_err());

        let mut cfg = AircraftConfig::sr22();
        cfg.max_takeoff_weight = 2000.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_sr22_500nm_nonstop() {
        let cfg = AircraftConfig::sr22();
        let result = calculate_flight(&cfg, "SR22", &FlightRequest::new(500.0, 1, 0));

        assert!(result.can_make_it);
        assert_eq!(result.stops, 0);
        // 500 nm at 167 kt ground speed
        assert!((result.time - 500.0 / 167.0 * 60.0).abs() < 1e-9);
        assert_eq!(result.cost, 1200.0);
        assert!(result.fuel_margin_percent.unwrap() > 0.0);
        assert!(result.runway_ok);
    }

    #[test]
    fn test_outputs_never_negative() {
        for (tag, cfg) in [("SR22", AircraftConfig::sr22()), ("SF50", AircraftConfig::sf50())] {
            for distance in [0.0, 50.0, 500.0, 1000.0, 2000.0, 5000.0] {
                for passengers in 0..=6 {
                    for bags in 0..=7 {
                        for headwind in [-50.0, 0.0, 5.0, 100.0, 400.0] {
                            let request = FlightRequest::new(distance, passengers, bags)
                                .with_headwind(headwind)
                                .with_taxi_time(10.0);
                            let r = calculate_flight(&cfg, tag, &request);
                            let case = format!(
                                "{} {} nm {}p {}b {} kt",
                                tag, distance, passengers, bags, headwind
                            );
                            assert!(r.time >= 0.0, "time {}", case);
                            assert!(r.fuel >= 0.0, "fuel {}", case);
                            assert!(r.cost >= 0.0, "cost {}", case);
                            assert_eq!(r.is_feasible(), r.stops != INFEASIBLE_STOPS, "{}", case);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_capacity_rejection() {
        let cfg = AircraftConfig::sr22();
        for distance in [0.0, 50.0, 500.0, 5000.0] {
            let r = calculate_flight(&cfg, "SR22", &FlightRequest::new(distance, 4, 0));
            assert!(!r.can_make_it);
            assert_eq!(r.stops, INFEASIBLE_STOPS);
            assert_eq!(r.cost, 0.0);

            let r = calculate_flight(&cfg, "SR22", &FlightRequest::new(distance, 1, 5));
            assert!(!r.can_make_it);
            assert_eq!(r.stops, INFEASIBLE_STOPS);
        }
    }

    #[test]
    fn test_zero_fuel_weight_rejection() {
        let mut cfg = AircraftConfig::sr22();
        cfg.avg_person_weight = 500.0;
        // 2350 + 3 * 500 = 3850 > 3600
        let r = calculate_flight(&cfg, "SR22", &FlightRequest::new(100.0, 3, 0));
        assert!(!r.can_make_it);
        assert_eq!(r.stops, INFEASIBLE_STOPS);
    }

    #[test]
    fn test_heavy_cabin_limits_fuel() {
        let cfg = AircraftConfig::sr22();
        // 2350 + 570 + 100 = 3020 lb, leaving 580 lb = 96.7 gal: still tank-limited.
        let light = calculate_flight(&cfg, "SR22", &FlightRequest::new(300.0, 3, 4));
        assert!(light.can_make_it);

        let mut heavy = cfg.clone();
        heavy.empty_weight = 3300.0;
        // 3300 + 190 = 3490 lb, leaving 110 lb = 18.3 gal < 1 + 11 + 10.
        let r = calculate_flight(&heavy, "SR22", &FlightRequest::new(300.0, 1, 0));
        assert!(!r.can_make_it);
    }

    #[test]
    fn test_zero_distance() {
        let cfg = AircraftConfig::sr22();
        let r = calculate_flight(&cfg, "SR22", &FlightRequest::new(0.0, 2, 2));
        assert!(r.can_make_it);
        assert_eq!(r.stops, 0);
        assert_eq!(r.time, 0.0);
        assert_eq!(r.cost, 0.0);
    }

    #[test]
    fn test_multi_stop_adds_ground_time() {
        let cfg = AircraftConfig::sr22();
        let r = calculate_flight(&cfg, "SR22", &FlightRequest::new(1000.0, 1, 0));
        assert!(r.can_make_it);
        assert_eq!(r.stops, 1);
        assert!(r.fuel_margin_percent.is_none());
        let expected = 1000.0 / 167.0 * 60.0 + MINUTES_PER_STOP;
        assert!((r.time - expected).abs() < 1e-9);
    }

    #[test]
    fn test_too_many_stops() {
        let cfg = AircraftConfig::sr22();
        // Range per leg is ~677 nm, six legs needed.
        let r = calculate_flight(&cfg, "SR22", &FlightRequest::new(3500.0, 1, 0));
        assert!(!r.can_make_it);
        assert_eq!(r.stops, INFEASIBLE_STOPS);
    }

    #[test]
    fn test_headwind_at_or_above_cruise() {
        let cfg = AircraftConfig::sr22();
        let r = calculate_flight(
            &cfg,
            "SR22",
            &FlightRequest::new(200.0, 1, 0).with_headwind(172.0),
        );
        assert!(!r.can_make_it);
        assert!(r.time >= 0.0);
    }

    #[test]
    fn test_taxi_time_counts_both_ends() {
        let cfg = AircraftConfig::sr22();
        let base = calculate_flight(&cfg, "SR22", &FlightRequest::new(200.0, 1, 0));
        let taxi = calculate_flight(
            &cfg,
            "SR22",
            &FlightRequest::new(200.0, 1, 0).with_taxi_time(10.0),
        );
        assert!((taxi.time - base.time - 20.0).abs() < 1e-9);
        assert!(taxi.cost >= base.cost);
    }

    #[test]
    fn test_runway_check_is_advisory() {
        let cfg = AircraftConfig::sf50();
        let r = calculate_flight(
            &cfg,
            "SF50",
            &FlightRequest::new(300.0, 2, 2).with_runway(2800.0),
        );
        assert!(!r.runway_ok);
        assert!(r.can_make_it);
    }
}
