// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};

/// Earth radius per output unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Nm,
    Mi,
    Km,
}

impl DistanceUnit {
    pub fn earth_radius(self) -> f64 {
        match self {
            DistanceUnit::Nm => 3440.065,
            DistanceUnit::Mi => 3959.0,
            DistanceUnit::Km => 6371.0,
        }
    }
}

impl std::str::FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nm" => Ok(DistanceUnit::Nm),
            "mi" => Ok(DistanceUnit::Mi),
            "km" => Ok(DistanceUnit::Km),
            other => Err(format!("unknown distance unit '{}'", other)),
        }
    }
}

/// Great-circle (Haversine) distance between two points given in degrees.
/// NaN inputs propagate.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64, unit: DistanceUnit) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    unit.earth_radius() * c
}

pub fn distance_nm(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance(lat1, lon1, lat2, lon2, DistanceUnit::Nm)
}

/// Initial true course from the first point to the second, 0..360 degrees.
pub fn initial_course(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let y = d_lon.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lon.cos();
    (y.atan2(x).to_degrees() + 360.0) % 360.0
}
