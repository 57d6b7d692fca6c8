// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hangar_core::aircraft::{calculate_flight, FlightRequest, FlightResult};
use hangar_core::apt_dat::AirportDirectory;
use hangar_core::config::{CalculatorConfig, FileConfigProvider};
use hangar_core::finance::leaseback::{compare_scenarios, LeasebackInputs, ScenarioResults};
use hangar_core::finance::owners_fleet::{calculate_owners_fleet, OwnersFleetInputs};
use hangar_core::finance::sf50::{calculate_sf50_scenario, Sf50Inputs};
use hangar_core::flight_profile::{
    assess_viability, calculate_realistic_flight_time, AirportSize, PhaseWinds,
};
use hangar_core::geo::{distance, DistanceUnit};
use hangar_core::matching::{find_top_matches, PartnershipProfile};
use hangar_core::mission::{compare_missions, Contender, Winner};
use hangar_core::HangarError;
use log::debug;
use serde::de::DeserializeOwned;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to hangar.json (defaults to the platform config dir)
    #[arg(short, long, global = true, env = "HANGAR_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Either an explicit distance or two ICAO codes resolved through apt.dat.
#[derive(clap::Args)]
struct Trip {
    /// Trip distance in nautical miles
    #[arg(short, long, conflicts_with_all = ["from", "to"])]
    distance: Option<f64>,
    /// Departure ICAO code
    #[arg(long, requires = "to")]
    from: Option<String>,
    /// Destination ICAO code
    #[arg(long, requires = "from")]
    to: Option<String>,
    /// apt.dat file used to resolve --from/--to
    #[arg(long, env = "HANGAR_APT_DAT")]
    apt_dat: Option<PathBuf>,
}

#[derive(clap::Args)]
struct Load {
    #[arg(short, long, default_value_t = 1)]
    passengers: u32,
    #[arg(short, long, default_value_t = 0)]
    bags: u32,
    /// Headwind in knots (negative for a tailwind)
    #[arg(long, default_value_t = 5.0, allow_hyphen_values = true)]
    headwind: f64,
    /// Taxi minutes at each end
    #[arg(long, default_value_t = 0.0)]
    taxi: f64,
    /// Shortest runway on the route, feet
    #[arg(long)]
    runway: Option<f64>,
}

impl Load {
    fn request(&self, distance: f64) -> FlightRequest {
        let request = FlightRequest::new(distance, self.passengers, self.bags)
            .with_headwind(self.headwind)
            .with_taxi_time(self.taxi);
        match self.runway {
            Some(feet) => request.with_runway(feet),
            None => request,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Great-circle distance between two positions (decimal degrees)
    Distance {
        #[arg(allow_hyphen_values = true)]
        lat1: f64,
        #[arg(allow_hyphen_values = true)]
        lon1: f64,
        #[arg(allow_hyphen_values = true)]
        lat2: f64,
        #[arg(allow_hyphen_values = true)]
        lon2: f64,
        /// nm, mi or km
        #[arg(short, long, default_value = "nm")]
        unit: DistanceUnit,
    },
    /// Evaluate one aircraft on a trip
    Flight {
        /// SR22 or SF50
        aircraft: String,
        #[command(flatten)]
        trip: Trip,
        #[command(flatten)]
        load: Load,
    },
    /// Compare two aircraft on the same trip
    Compare {
        #[arg(long, default_value = "SR22")]
        a: String,
        #[arg(long, default_value = "SF50")]
        b: String,
        #[command(flatten)]
        trip: Trip,
        #[command(flatten)]
        load: Load,
        #[arg(long)]
        json: bool,
    },
    /// Multi-phase jet profile with optional organ viability check
    Profile {
        #[command(flatten)]
        trip: Trip,
        /// major, regional or private (estimated from apt.dat when routing by code)
        #[arg(long)]
        origin_size: Option<AirportSize>,
        #[arg(long)]
        destination_size: Option<AirportSize>,
        /// Headwind below 10,000 ft, kt
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        wind_low: f64,
        /// Headwind above 10,000 ft, kt
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        wind_high: f64,
        /// heart, lungs, liver, pancreas, kidney
        #[arg(long)]
        organ: Option<String>,
    },
    /// SR22 standard ownership vs leaseback
    Leaseback {
        /// JSON file with leaseback inputs (missing fields use the configured values)
        #[arg(long)]
        inputs: Option<PathBuf>,
        #[arg(long)]
        share: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// SF50 ownership economics
    Sf50 {
        #[arg(long)]
        inputs: Option<PathBuf>,
        #[arg(long)]
        share: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Owners-fleet (SR22 + SF50) membership
    Fleet {
        #[arg(long)]
        inputs: Option<PathBuf>,
        #[arg(long)]
        share: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Rank partnership candidates for a profile
    Match {
        /// JSON array of partnership profiles
        #[arg(long)]
        profiles: PathBuf,
        /// Profile to find partners for
        #[arg(long)]
        id: String,
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },
    /// Inspect or reset the stored config
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config
    Show,
    /// Print the config file location
    Path,
    /// Overwrite the config file with defaults
    Reset,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // A second init only fails if a logger is already installed.
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let provider = match &cli.config {
        Some(path) => FileConfigProvider::at_path(path.clone()),
        None => FileConfigProvider::new(),
    };

    match &cli.command {
        Commands::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
            unit,
        } => {
            let d = distance(*lat1, *lon1, *lat2, *lon2, *unit);
            println!("{:.1} {}", d, format!("{:?}", unit).to_lowercase());
        }
        Commands::Flight {
            aircraft,
            trip,
            load,
        } => {
            let config = load_config(&provider)?;
            let aircraft_config = config
                .aircraft(aircraft)
                .with_context(|| format!("Unknown aircraft '{}' (expected SR22 or SF50)", aircraft))?;
            let (nm, _) = resolve_trip(trip)?;
            let result = calculate_flight(aircraft_config, &aircraft.to_uppercase(), &load.request(nm));
            print_flight(&result);
        }
        Commands::Compare {
            a,
            b,
            trip,
            load,
            json,
        } => {
            let config = load_config(&provider)?;
            let tag_a = a.to_uppercase();
            let tag_b = b.to_uppercase();
            let config_a = config
                .aircraft(&tag_a)
                .with_context(|| format!("Unknown aircraft '{}'", a))?;
            let config_b = config
                .aircraft(&tag_b)
                .with_context(|| format!("Unknown aircraft '{}'", b))?;
            let (nm, _) = resolve_trip(trip)?;

            let result = compare_missions(
                Contender::new(&tag_a, config_a),
                Contender::new(&tag_b, config_b),
                &load.request(nm),
            );

            if *json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Trip: {:.0} nm", nm);
                print_flight(&result.aircraft_a);
                print_flight(&result.aircraft_b);
                let winner = match result.winner {
                    Winner::AircraftA => tag_a.as_str(),
                    Winner::AircraftB => tag_b.as_str(),
                    Winner::Tie => "tie",
                };
                println!("Winner: {}", winner);
                println!(
                    "Time saved by {}: {:.0} min, extra cost: ${:.0}",
                    tag_b, result.time_saved, result.cost_difference
                );
                if result.is_close_call {
                    println!("Close call");
                }
                if let Some(warning) = &result.payload_range_warning {
                    println!("Warning: {}", warning);
                }
            }
        }
        Commands::Profile {
            trip,
            origin_size,
            destination_size,
            wind_low,
            wind_high,
            organ,
        } => {
            let config = load_config(&provider)?;
            let (nm, sizes) = resolve_trip(trip)?;
            let (est_origin, est_destination) =
                sizes.unwrap_or((AirportSize::Regional, AirportSize::Regional));
            let origin = origin_size.unwrap_or(est_origin);
            let destination = destination_size.unwrap_or(est_destination);

            let profile = calculate_realistic_flight_time(
                nm,
                &config.flight_ops,
                origin,
                destination,
                PhaseWinds {
                    low: *wind_low,
                    high: *wind_high,
                },
            );

            println!("Trip: {:.0} nm ({:?} -> {:?})", nm, origin, destination);
            println!("Cruise altitude: {:.0} ft", profile.cruise_altitude);
            println!(
                "Climb {:.1} min / {:.1} nm, cruise {:.1} min / {:.1} nm, descent {:.1} min / {:.1} nm",
                profile.climb_minutes,
                profile.climb_distance,
                profile.cruise_minutes,
                profile.cruise_distance,
                profile.descent_minutes,
                profile.descent_distance
            );
            println!(
                "Taxi {:.1} min, buffer {:.0} min",
                profile.taxi_minutes, profile.buffer_minutes
            );
            println!(
                "Total: {:.1} min ({:.2} h), fuel {:.0} lb",
                profile.total_minutes,
                profile.total_hours(),
                profile.fuel_burn
            );
            if let Some(organ) = organ {
                let viability =
                    assess_viability(&config.flight_ops, organ, profile.total_minutes);
                println!("Viability ({}): {:?}", organ, viability);
            }
        }
        Commands::Leaseback {
            inputs,
            share,
            json,
        } => {
            let config = load_config(&provider)?;
            let mut inputs: LeasebackInputs = read_inputs(inputs.as_deref(), &config.leaseback)?;
            if share.is_some() {
                inputs.ownership_share = *share;
            }
            let comparison = compare_scenarios(&inputs);
            if *json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                println!("Standard ownership");
                print_scenario(&comparison.standard);
                println!();
                println!("Leaseback");
                print_scenario(&comparison.leaseback);
                println!();
                println!(
                    "Leaseback advantage: ${:.2}/month, ${:.2}/year",
                    comparison.monthly_advantage, comparison.annual_advantage
                );
            }
        }
        Commands::Sf50 {
            inputs,
            share,
            json,
        } => {
            let config = load_config(&provider)?;
            let mut inputs: Sf50Inputs = read_inputs(inputs.as_deref(), &config.sf50_leaseback)?;
            if share.is_some() {
                inputs.ownership_share = *share;
            }
            let results = calculate_sf50_scenario(&inputs);
            if *json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_scenario(&results.scenario);
                println!(
                    "Owner flown: {}, type rating multiplier {:.2}",
                    results.owner_flown, results.type_rating_multiplier
                );
            }
        }
        Commands::Fleet {
            inputs,
            share,
            json,
        } => {
            let config = load_config(&provider)?;
            let mut inputs: OwnersFleetInputs =
                read_inputs(inputs.as_deref(), &config.owners_fleet)?;
            if share.is_some() {
                inputs.ownership_share = *share;
            }
            let results = calculate_owners_fleet(&inputs);
            if *json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                println!("Share: {:.3}", results.ownership_share);
                println!(
                    "SR22 fixed ${:.2}, variable ${:.2}",
                    results.piston.fixed_monthly, results.piston.variable_monthly
                );
                println!(
                    "SF50 fixed ${:.2}, variable ${:.2}",
                    results.jet.fixed_monthly, results.jet.variable_monthly
                );
                println!(
                    "Monthly ${:.2} (fixed ${:.2}, variable ${:.2}), annual ${:.2}",
                    results.total_monthly,
                    results.total_fixed_monthly,
                    results.total_variable_monthly,
                    results.total_annual
                );
                println!(
                    "Down payment ${:.2}, ${:.2}/hr over {:.0} h",
                    results.total_down_payment, results.cost_per_hour, results.total_hours
                );
            }
        }
        Commands::Match {
            profiles,
            id,
            limit,
        } => {
            let content = fs::read_to_string(profiles)
                .with_context(|| format!("Failed to read profiles from {}", profiles.display()))?;
            let all: Vec<PartnershipProfile> = serde_json::from_str(&content)
                .with_context(|| format!("Invalid profiles file {}", profiles.display()))?;
            let profile = all
                .iter()
                .find(|p| &p.id == id)
                .ok_or_else(|| HangarError::ProfileNotFound(id.clone()))?;

            let matches = find_top_matches(profile, &all, *limit);
            if matches.is_empty() {
                println!("No compatible partners for {}", id);
            }
            for (candidate, result) in matches {
                println!(
                    "{:5.1} {:?} {} ({})",
                    result.score, result.recommendation, candidate.name, candidate.id
                );
                for warning in &result.warnings {
                    println!("      ! {}", warning);
                }
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = load_config(&provider)?;
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            ConfigAction::Path => println!("{}", provider.path().display()),
            ConfigAction::Reset => {
                provider
                    .reset()
                    .with_context(|| format!("Failed to reset {}", provider.path().display()))?;
                println!("Reset {}", provider.path().display());
            }
        },
    }

    Ok(())
}

fn load_config(provider: &FileConfigProvider) -> Result<CalculatorConfig> {
    provider
        .load()
        .with_context(|| format!("Failed to load config from {}", provider.path().display()))
}

/// Trip distance in nm, plus estimated airport sizes when routed by code.
fn resolve_trip(trip: &Trip) -> Result<(f64, Option<(AirportSize, AirportSize)>)> {
    if let Some(nm) = trip.distance {
        return Ok((nm, None));
    }
    let (Some(from), Some(to)) = (&trip.from, &trip.to) else {
        anyhow::bail!("Specify --distance or --from/--to");
    };
    let path = trip
        .apt_dat
        .as_deref()
        .context("--from/--to need an apt.dat file (--apt-dat or HANGAR_APT_DAT)")?;
    let directory = AirportDirectory::load(path)?;
    let nm = directory.distance_between(from, to, DistanceUnit::Nm)?;
    debug!("Resolved {} -> {}: {:.1} nm", from, to, nm);
    let sizes = (
        directory.lookup(from)?.size_class(),
        directory.lookup(to)?.size_class(),
    );
    Ok((nm, Some(sizes)))
}

/// Reads a JSON inputs file over `defaults`. Keys absent from the file keep
/// their default value.
fn read_inputs<T>(path: Option<&Path>, defaults: &T) -> Result<T>
where
    T: DeserializeOwned + serde::Serialize + Clone,
{
    let Some(path) = path else {
        return Ok(defaults.clone());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read inputs from {}", path.display()))?;
    let overrides: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    let mut merged = serde_json::to_value(defaults)?;
    if let (Some(base), serde_json::Value::Object(over)) = (merged.as_object_mut(), overrides) {
        base.extend(over);
    }
    serde_json::from_value(merged)
        .with_context(|| format!("Invalid inputs in {}", path.display()))
}

fn print_flight(result: &FlightResult) {
    if !result.is_feasible() {
        println!("{}: cannot make this trip", result.aircraft);
        return;
    }
    let margin = result
        .fuel_margin_percent
        .map(|m| format!(", fuel margin {:.0}%", m))
        .unwrap_or_default();
    println!(
        "{}: {:.0} min, {:.1} gal, ${:.0}, {} stop(s){}{}",
        result.aircraft,
        result.time,
        result.fuel,
        result.cost,
        result.stops,
        margin,
        if result.runway_ok { "" } else { ", RUNWAY SHORT" }
    );
}

fn print_scenario(s: &ScenarioResults) {
    let m = &s.monthly;
    println!("  Share {:.3}, down payment ${:.2}", s.ownership_share, s.financing.down_payment);
    println!("  Revenue             {:>12.2}", m.revenue);
    println!("  Fixed costs         {:>12.2}", m.fixed_costs);
    println!("  Net operating       {:>12.2}", m.net_operating_income);
    println!("  Owner usage         {:>12.2}", m.owner_usage_costs);
    println!("  Maintenance         {:>12.2}", m.maintenance_cost);
    println!("  Fuel                {:>12.2}", m.fuel_cost);
    println!("  Pilot services      {:>12.2}", m.pilot_services_cost);
    println!("  Debt service        {:>12.2}", m.debt_service);
    println!("  Net monthly         {:>12.2}", m.net_monthly_cash_flow);
    println!("  Net annual          {:>12.2}", s.annual.net_cash_flow);
    println!("  Cost per owner hour {:>12.2}", s.cost_per_hour);
}
