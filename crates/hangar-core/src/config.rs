// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::aircraft::{AircraftConfig, PayloadRangeFormula};
use crate::finance::leaseback::LeasebackInputs;
use crate::finance::owners_fleet::OwnersFleetInputs;
use crate::finance::sf50::Sf50Inputs;
use crate::flight_profile::AirportSize;

/// When a stored file has a lower version it is migrated and rewritten on load.
///
/// - v0: unversioned files, written before `schema_version` existed.
/// - v1: the SF50 payload-range formula is pinned to the POH-derived default.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

pub const CONFIG_FILE_NAME: &str = "hangar.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid aircraft config: {0}")]
    Invariant(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudeBands {
    /// Trips under 100 nm.
    pub short_range: f64,
    /// 100 to 350 nm.
    pub medium_range: f64,
    /// Over 350 nm.
    pub long_range: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxiTimes {
    pub major: f64,
    pub regional: f64,
    pub private: f64,
}

impl TaxiTimes {
    pub fn for_size(&self, size: AirportSize) -> f64 {
        match size {
            AirportSize::Major => self.major,
            AirportSize::Regional => self.regional,
            AirportSize::Private => self.private,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViabilityWindow {
    pub min_hours: f64,
    pub max_hours: f64,
}

/// Operations parameters for the multi-phase jet profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOpsConfig {
    /// True airspeed in cruise, kt.
    pub cruise_speed: f64,
    /// ft/min
    pub climb_rate: f64,
    /// ft/min
    pub descent_rate: f64,
    pub altitude_bands: AltitudeBands,
    /// Minutes per airport class.
    pub taxi_times: TaxiTimes,
    /// Minutes added once per trip.
    pub takeoff_landing_buffer: f64,
    /// Organ name -> transplant window.
    pub viability_windows: BTreeMap<String, ViabilityWindow>,
}

impl Default for FlightOpsConfig {
    fn default() -> Self {
        let window = |min_hours, max_hours| ViabilityWindow {
            min_hours,
            max_hours,
        };
        let mut viability_windows = BTreeMap::new();
        viability_windows.insert("heart".to_string(), window(4.0, 6.0));
        viability_windows.insert("lungs".to_string(), window(4.0, 8.0));
        viability_windows.insert("liver".to_string(), window(8.0, 12.0));
        viability_windows.insert("pancreas".to_string(), window(12.0, 18.0));
        viability_windows.insert("kidney".to_string(), window(24.0, 36.0));

        Self {
            cruise_speed: 440.0,
            climb_rate: 2500.0,
            descent_rate: 2000.0,
            altitude_bands: AltitudeBands {
                short_range: 15000.0,
                medium_range: 28000.0,
                long_range: 41000.0,
            },
            taxi_times: TaxiTimes {
                major: 15.0,
                regional: 8.0,
                private: 5.0,
            },
            takeoff_landing_buffer: 10.0,
            viability_windows,
        }
    }
}

/// Everything the calculators read, fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    pub schema_version: u32,
    pub sr22: AircraftConfig,
    pub sf50: AircraftConfig,
    pub flight_ops: FlightOpsConfig,
    pub leaseback: LeasebackInputs,
    pub sf50_leaseback: Sf50Inputs,
    pub owners_fleet: OwnersFleetInputs,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            sr22: AircraftConfig::sr22(),
            sf50: AircraftConfig::sf50(),
            flight_ops: FlightOpsConfig::default(),
            leaseback: LeasebackInputs::default(),
            sf50_leaseback: Sf50Inputs::default(),
            owners_fleet: OwnersFleetInputs::default(),
        }
    }
}

impl CalculatorConfig {
    /// Aircraft config by tag ("SR22" / "SF50", case-insensitive).
    pub fn aircraft(&self, tag: &str) -> Option<&AircraftConfig> {
        match tag.to_uppercase().as_str() {
            "SR22" => Some(&self.sr22),
            "SF50" => Some(&self.sf50),
            _ => None,
        }
    }
}

// --- Partial (persisted) shapes ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialAircraftConfig {
    pub cruise_speed: Option<f64>,
    pub fuel_flow: Option<f64>,
    pub maintenance_cost: Option<f64>,
    pub range: Option<f64>,
    pub min_runway: Option<f64>,
    pub fuel_capacity: Option<f64>,
    pub usable_fuel: Option<f64>,
    pub max_passengers: Option<u32>,
    pub max_bags: Option<u32>,
    pub max_useful_load: Option<f64>,
    pub empty_weight: Option<f64>,
    pub fuel_weight_per_gallon: Option<f64>,
    pub avg_person_weight: Option<f64>,
    pub avg_bag_weight: Option<f64>,
    pub taxi_fuel: Option<f64>,
    pub contingency_fuel_min: Option<f64>,
    pub reserve_fuel: Option<f64>,
    pub max_takeoff_weight: Option<f64>,
    pub payload_range_formula: Option<PayloadRangeFormula>,
}

impl PartialAircraftConfig {
    pub fn merge_with_defaults(self, defaults: &AircraftConfig) -> AircraftConfig {
        AircraftConfig {
            cruise_speed: self.cruise_speed.unwrap_or(defaults.cruise_speed),
            fuel_flow: self.fuel_flow.unwrap_or(defaults.fuel_flow),
            maintenance_cost: self.maintenance_cost.unwrap_or(defaults.maintenance_cost),
            range: self.range.unwrap_or(defaults.range),
            min_runway: self.min_runway.unwrap_or(defaults.min_runway),
            fuel_capacity: self.fuel_capacity.unwrap_or(defaults.fuel_capacity),
            usable_fuel: self.usable_fuel.unwrap_or(defaults.usable_fuel),
            max_passengers: self.max_passengers.unwrap_or(defaults.max_passengers),
            max_bags: self.max_bags.unwrap_or(defaults.max_bags),
            max_useful_load: self.max_useful_load.unwrap_or(defaults.max_useful_load),
            empty_weight: self.empty_weight.unwrap_or(defaults.empty_weight),
            fuel_weight_per_gallon: self
                .fuel_weight_per_gallon
                .unwrap_or(defaults.fuel_weight_per_gallon),
            avg_person_weight: self.avg_person_weight.unwrap_or(defaults.avg_person_weight),
            avg_bag_weight: self.avg_bag_weight.unwrap_or(defaults.avg_bag_weight),
            taxi_fuel: self.taxi_fuel.unwrap_or(defaults.taxi_fuel),
            contingency_fuel_min: self
                .contingency_fuel_min
                .unwrap_or(defaults.contingency_fuel_min),
            reserve_fuel: self.reserve_fuel.unwrap_or(defaults.reserve_fuel),
            max_takeoff_weight: self
                .max_takeoff_weight
                .unwrap_or(defaults.max_takeoff_weight),
            payload_range_formula: self
                .payload_range_formula
                .or_else(|| defaults.payload_range_formula.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialAltitudeBands {
    pub short_range: Option<f64>,
    pub medium_range: Option<f64>,
    pub long_range: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialTaxiTimes {
    pub major: Option<f64>,
    pub regional: Option<f64>,
    pub private: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialFlightOpsConfig {
    pub cruise_speed: Option<f64>,
    pub climb_rate: Option<f64>,
    pub descent_rate: Option<f64>,
    pub altitude_bands: Option<PartialAltitudeBands>,
    pub taxi_times: Option<PartialTaxiTimes>,
    pub takeoff_landing_buffer: Option<f64>,
    pub viability_windows: Option<BTreeMap<String, ViabilityWindow>>,
}

impl PartialFlightOpsConfig {
    pub fn merge_with_defaults(self, defaults: &FlightOpsConfig) -> FlightOpsConfig {
        let bands = self.altitude_bands.unwrap_or_default();
        let taxi = self.taxi_times.unwrap_or_default();

        // Stored windows override per organ; organs missing from the file keep defaults.
        let mut viability_windows = defaults.viability_windows.clone();
        if let Some(stored) = self.viability_windows {
            viability_windows.extend(stored);
        }

        FlightOpsConfig {
            cruise_speed: self.cruise_speed.unwrap_or(defaults.cruise_speed),
            climb_rate: self.climb_rate.unwrap_or(defaults.climb_rate),
            descent_rate: self.descent_rate.unwrap_or(defaults.descent_rate),
            altitude_bands: AltitudeBands {
                short_range: bands
                    .short_range
                    .unwrap_or(defaults.altitude_bands.short_range),
                medium_range: bands
                    .medium_range
                    .unwrap_or(defaults.altitude_bands.medium_range),
                long_range: bands.long_range.unwrap_or(defaults.altitude_bands.long_range),
            },
            taxi_times: TaxiTimes {
                major: taxi.major.unwrap_or(defaults.taxi_times.major),
                regional: taxi.regional.unwrap_or(defaults.taxi_times.regional),
                private: taxi.private.unwrap_or(defaults.taxi_times.private),
            },
            takeoff_landing_buffer: self
                .takeoff_landing_buffer
                .unwrap_or(defaults.takeoff_landing_buffer),
            viability_windows,
        }
    }
}

/// On-disk shape of `hangar.json`. Every field may be missing.
///
/// The financial input blocks are `#[serde(default)]` structs, so a partially
/// written block is completed field by field during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialCalculatorConfig {
    pub schema_version: Option<u32>,
    pub sr22: Option<PartialAircraftConfig>,
    pub sf50: Option<PartialAircraftConfig>,
    pub flight_ops: Option<PartialFlightOpsConfig>,
    pub leaseback: Option<LeasebackInputs>,
    pub sf50_leaseback: Option<Sf50Inputs>,
    pub owners_fleet: Option<OwnersFleetInputs>,
}

/// Completes a possibly-partial stored config from the canonical defaults.
pub fn merge_with_defaults(
    partial: PartialCalculatorConfig,
    defaults: &CalculatorConfig,
) -> CalculatorConfig {
    CalculatorConfig {
        schema_version: partial.schema_version.unwrap_or(0),
        sr22: partial
            .sr22
            .unwrap_or_default()
            .merge_with_defaults(&defaults.sr22),
        sf50: partial
            .sf50
            .unwrap_or_default()
            .merge_with_defaults(&defaults.sf50),
        flight_ops: partial
            .flight_ops
            .unwrap_or_default()
            .merge_with_defaults(&defaults.flight_ops),
        leaseback: partial
            .leaseback
            .unwrap_or_else(|| defaults.leaseback.clone()),
        sf50_leaseback: partial
            .sf50_leaseback
            .unwrap_or_else(|| defaults.sf50_leaseback.clone()),
        owners_fleet: partial
            .owners_fleet
            .unwrap_or_else(|| defaults.owners_fleet.clone()),
    }
}

/// Brings an outdated config up to `CURRENT_SCHEMA_VERSION`. Returns true if
/// anything was migrated.
fn migrate(config: &mut CalculatorConfig) -> bool {
    if config.schema_version >= CURRENT_SCHEMA_VERSION {
        return false;
    }

    info!(
        "Migrating {} from schema v{} to v{}",
        CONFIG_FILE_NAME, config.schema_version, CURRENT_SCHEMA_VERSION
    );

    // v0→v1: the stored SF50 payload-range formula is replaced, edited or not.
    if config.schema_version < 1 {
        let default_formula = AircraftConfig::sf50().payload_range_formula;
        if config.sf50.payload_range_formula != default_formula {
            warn!(
                "v0→v1: Overwriting edited SF50 payload-range formula {:?} with the default",
                config.sf50.payload_range_formula
            );
        } else {
            info!("v0→v1: SF50 payload-range formula set to the default");
        }
        config.sf50.payload_range_formula = default_formula;
    }

    config.schema_version = CURRENT_SCHEMA_VERSION;
    true
}

/// Supplies the calculators with a fully-populated config.
pub trait ConfigProvider {
    fn config(&self) -> CalculatorConfig;
}

/// Fixed in-memory config (tests, embedding callers).
#[derive(Debug, Clone, Default)]
pub struct StaticConfig(pub CalculatorConfig);

impl ConfigProvider for StaticConfig {
    fn config(&self) -> CalculatorConfig {
        self.0.clone()
    }
}

/// Reads `hangar.json`, merging it with defaults.
#[derive(Debug, Clone)]
pub struct FileConfigProvider {
    config_path: PathBuf,
}

impl Default for FileConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigProvider {
    pub fn new() -> Self {
        Self {
            config_path: crate::get_config_root().join(CONFIG_FILE_NAME),
        }
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<CalculatorConfig, ConfigError> {
        if !self.config_path.exists() {
            debug!(
                "No config file at {:?}, using defaults",
                self.config_path
            );
            return Ok(CalculatorConfig::default());
        }

        let content = fs::read_to_string(&self.config_path)?;
        let partial: PartialCalculatorConfig = serde_json::from_str(&content).map_err(|e| {
            warn!("JSON parse error for {:?}: {}", self.config_path, e);
            e
        })?;

        let mut config = merge_with_defaults(partial, &CalculatorConfig::default());

        if migrate(&mut config) {
            // Persist the migrated config so the next load is a no-op.
            if let Err(e) = self.save(&config) {
                warn!("Could not rewrite migrated config {:?}: {}", self.config_path, e);
            }
        }

        for (tag, aircraft) in [("SR22", &config.sr22), ("SF50", &config.sf50)] {
            if let Err(e) = aircraft.validate() {
                warn!("{} config violates an invariant: {}", tag, e);
            }
        }

        debug!("Loaded config from {:?}", self.config_path);
        Ok(config)
    }

    pub fn save(&self, config: &CalculatorConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_path, content)?;
        debug!("Saved config to {:?}", self.config_path);
        Ok(())
    }

    /// Overwrites the stored config with defaults.
    pub fn reset(&self) -> Result<CalculatorConfig, ConfigError> {
        let defaults = CalculatorConfig::default();
        self.save(&defaults)?;
        Ok(defaults)
    }
}

impl ConfigProvider for FileConfigProvider {
    fn config(&self) -> CalculatorConfig {
        self.load().unwrap_or_else(|e| {
            warn!(
                "Falling back to default config ({:?}): {}",
                self.config_path, e
            );
            CalculatorConfig::default()
        })
    }
}
