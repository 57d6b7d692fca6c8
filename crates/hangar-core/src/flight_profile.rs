// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Multi-phase (climb / cruise / descent) time and fuel estimate for the jet
//! profile, driven by [`FlightOpsConfig`].

use serde::{Deserialize, Serialize};

use crate::config::FlightOpsConfig;

const TRANSITION_ALTITUDE_FT: f64 = 10_000.0;

// True airspeeds per sub-phase, kt.
const CLIMB_TAS_LOW: f64 = 180.0;
const CLIMB_TAS_HIGH: f64 = 400.0;
const DESCENT_TAS_HIGH: f64 = 420.0;
const DESCENT_TAS_LOW: f64 = 360.0;

const MIN_GROUND_SPEED: f64 = 50.0;

/// Destination taxi is usually shorter (straight to the FBO).
const DESTINATION_TAXI_FACTOR: f64 = 0.7;

// Fuel burn, lb/hr.
const CRUISE_BURN_LB_HR: f64 = 900.0;
const CLIMB_DESCENT_BURN_LB_HR: f64 = 1100.0;

const MAJOR_AIRPORTS: &[&str] = &[
    "KATL", "KBOS", "KBWI", "KCLT", "KDCA", "KDEN", "KDFW", "KDTW", "KEWR", "KFLL", "KHNL",
    "KIAD", "KIAH", "KJFK", "KLAS", "KLAX", "KLGA", "KMCO", "KMDW", "KMIA", "KMSP", "KORD",
    "KPDX", "KPHL", "KPHX", "KSAN", "KSEA", "KSFO", "KSLC", "KTPA",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AirportSize {
    Major,
    Regional,
    Private,
}

impl std::str::FromStr for AirportSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(AirportSize::Major),
            "regional" => Ok(AirportSize::Regional),
            "private" => Ok(AirportSize::Private),
            other => Err(format!("unknown airport size '{}'", other)),
        }
    }
}

/// Classifies an airport by the known-hub list, then by runway count and length.
pub fn estimate_airport_size(
    code: &str,
    runway_count: u32,
    longest_runway_ft: f64,
) -> AirportSize {
    let code = code.trim().to_uppercase();
    if MAJOR_AIRPORTS.contains(&code.as_str()) {
        return AirportSize::Major;
    }
    if runway_count >= 3 || longest_runway_ft > 10_000.0 {
        AirportSize::Major
    } else if runway_count >= 2 || longest_runway_ft > 6_000.0 {
        AirportSize::Regional
    } else {
        AirportSize::Private
    }
}

/// Headwind component along `course` (degrees true). Positive = headwind.
/// `wind_dir` of `None` means variable.
pub fn calculate_headwind_component(wind_dir: Option<f64>, wind_speed: f64, course: f64) -> f64 {
    match wind_dir {
        Some(dir) if wind_speed != 0.0 => wind_speed * (dir - course).to_radians().cos(),
        _ => 0.0,
    }
}

/// Headwind below and above the 10,000 ft transition, kt.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhaseWinds {
    pub low: f64,
    pub high: f64,
}

impl PhaseWinds {
    pub fn uniform(headwind: f64) -> Self {
        Self {
            low: headwind,
            high: headwind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealisticFlightTime {
    pub cruise_altitude: f64,
    pub climb_minutes: f64,
    pub cruise_minutes: f64,
    pub descent_minutes: f64,
    pub taxi_minutes: f64,
    pub buffer_minutes: f64,
    pub total_minutes: f64,
    pub climb_distance: f64,
    pub cruise_distance: f64,
    pub descent_distance: f64,
    /// Pounds.
    pub fuel_burn: f64,
}

impl RealisticFlightTime {
    pub fn total_hours(&self) -> f64 {
        self.total_minutes / 60.0
    }
}

fn ground_speed(tas: f64, headwind: f64) -> f64 {
    (tas - headwind).max(MIN_GROUND_SPEED)
}

/// Minutes and nm flown for one sub-phase.
fn phase(altitude_change: f64, rate: f64, tas: f64, headwind: f64) -> (f64, f64) {
    if altitude_change <= 0.0 || rate <= 0.0 {
        return (0.0, 0.0);
    }
    let minutes = altitude_change / rate;
    (minutes, ground_speed(tas, headwind) * minutes / 60.0)
}

pub fn cruise_altitude(distance: f64, ops: &FlightOpsConfig) -> f64 {
    if distance < 100.0 {
        ops.altitude_bands.short_range
    } else if distance <= 350.0 {
        ops.altitude_bands.medium_range
    } else {
        ops.altitude_bands.long_range
    }
}

pub fn calculate_realistic_flight_time(
    distance: f64,
    ops: &FlightOpsConfig,
    origin: AirportSize,
    destination: AirportSize,
    winds: PhaseWinds,
) -> RealisticFlightTime {
    let altitude = cruise_altitude(distance, ops);
    let low_band = altitude.min(TRANSITION_ALTITUDE_FT);
    let high_band = (altitude - TRANSITION_ALTITUDE_FT).max(0.0);

    let (climb_low_min, climb_low_nm) = phase(low_band, ops.climb_rate, CLIMB_TAS_LOW, winds.low);
    let (climb_high_min, climb_high_nm) =
        phase(high_band, ops.climb_rate, CLIMB_TAS_HIGH, winds.high);
    let (desc_high_min, desc_high_nm) =
        phase(high_band, ops.descent_rate, DESCENT_TAS_HIGH, winds.high);
    let (desc_low_min, desc_low_nm) =
        phase(low_band, ops.descent_rate, DESCENT_TAS_LOW, winds.low);

    let mut climb_minutes = climb_low_min + climb_high_min;
    let mut climb_distance = climb_low_nm + climb_high_nm;
    let mut descent_minutes = desc_high_min + desc_low_min;
    let mut descent_distance = desc_high_nm + desc_low_nm;

    // Trip too short to reach the band altitude: shrink climb and descent to fit.
    let transition_distance = climb_distance + descent_distance;
    let cruise_distance = if transition_distance > distance && transition_distance > 0.0 {
        let scale = (distance / transition_distance).max(0.0);
        climb_minutes *= scale;
        climb_distance *= scale;
        descent_minutes *= scale;
        descent_distance *= scale;
        0.0
    } else {
        distance - climb_distance - descent_distance
    };
    let cruise_minutes = cruise_distance / ground_speed(ops.cruise_speed, winds.high) * 60.0;

    let taxi_minutes = ops.taxi_times.for_size(origin)
        + ops.taxi_times.for_size(destination) * DESTINATION_TAXI_FACTOR;
    let buffer_minutes = ops.takeoff_landing_buffer;

    let total_minutes =
        climb_minutes + cruise_minutes + descent_minutes + taxi_minutes + buffer_minutes;
    let fuel_burn = cruise_minutes / 60.0 * CRUISE_BURN_LB_HR
        + (climb_minutes + descent_minutes) / 60.0 * CLIMB_DESCENT_BURN_LB_HR;

    RealisticFlightTime {
        cruise_altitude: altitude,
        climb_minutes,
        cruise_minutes,
        descent_minutes,
        taxi_minutes,
        buffer_minutes,
        total_minutes,
        climb_distance,
        cruise_distance,
        descent_distance,
        fuel_burn,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Viability {
    /// Arrives inside the minimum window.
    Within,
    /// Past the minimum but before the maximum.
    Marginal,
    Exceeded,
    UnknownOrgan,
}

/// Checks a mission duration against the organ's transplant window.
pub fn assess_viability(ops: &FlightOpsConfig, organ: &str, mission_minutes: f64) -> Viability {
    let Some(window) = ops.viability_windows.get(&organ.trim().to_lowercase()) else {
        return Viability::UnknownOrgan;
    };
    let hours = mission_minutes / 60.0;
    if hours <= window.min_hours {
        Viability::Within
    } else if hours <= window.max_hours {
        Viability::Marginal
    } else {
        Viability::Exceeded
    }
}
