// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod aircraft;
pub mod apt_dat;
pub mod config;
pub mod finance;
pub mod flight_profile;
pub mod geo;
pub mod matching;
pub mod mission;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HangarError {
    #[error("Unknown airport: {0}")]
    UnknownAirport(String),
    #[error("Airport {0} has no position")]
    MissingPosition(String),
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("apt.dat error: {0}")]
    AptDat(#[from] apt_dat::AptDatError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Directory holding `hangar.json`. Falls back to the working directory when the
/// platform has no config location (e.g. a stripped-down container).
pub fn get_config_root() -> PathBuf {
    directories::ProjectDirs::from("org", "hangar", "hangar")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Rounds to the nearest multiple of `step`, halves away from zero.
pub(crate) fn round_to(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1197.6, 10.0), 1200.0);
        assert_eq!(round_to(4794.9, 10.0), 4790.0);
        assert_eq!(round_to(1195.0, 10.0), 1200.0);
        assert_eq!(round_to(0.0, 10.0), 0.0);
    }

    #[test]
    fn test_config_root_is_named() {
        let root = get_config_root();
        assert!(!root.as_os_str().is_empty());
    }
}
