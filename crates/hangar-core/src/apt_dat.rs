// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Airport directory read from X-Plane style `apt.dat` files.
//!
//! Only the rows needed for trip planning are read: airport headers (1/16/17),
//! land and water runways (100/101), helipads (102) and the end marker (99).

use anyhow::Context;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

use crate::flight_profile::{estimate_airport_size, AirportSize};
use crate::geo::{distance, DistanceUnit};
use crate::HangarError;

const FEET_PER_NM: f64 = 6076.12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum AirportType {
    Land,
    Seaplane,
    Heliport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub id: String,
    pub name: String,
    pub airport_type: AirportType,
    pub elevation_ft: Option<i32>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Land and water runways. Helipads are not counted.
    pub runway_count: u32,
    pub longest_runway_ft: f64,
}

impl Airport {
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lon?))
    }

    pub fn size_class(&self) -> AirportSize {
        estimate_airport_size(&self.id, self.runway_count, self.longest_runway_ft)
    }
}

#[derive(Error, Debug)]
pub enum AptDatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

pub struct AptDatParser;

impl AptDatParser {
    /// Parses an apt.dat file and returns a list of airports.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Airport>, AptDatError> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    pub fn parse<R: BufRead>(mut reader: R) -> Result<Vec<Airport>, AptDatError> {
        let mut airports = Vec::new();
        let mut line_buf = String::with_capacity(256);
        let mut current: Option<AirportBuilder> = None;
        let mut line_no = 0usize;

        loop {
            line_buf.clear();
            if reader.read_line(&mut line_buf)? == 0 {
                break;
            }
            line_no += 1;

            let line = line_buf.trim();
            let Some(code) = line.split_whitespace().next() else {
                continue;
            };

            match code {
                "1" | "16" | "17" => {
                    if let Some(builder) = current.take() {
                        airports.push(builder.build());
                    }
                    let apt_type = match code {
                        "16" => AirportType::Seaplane,
                        "17" => AirportType::Heliport,
                        _ => AirportType::Land,
                    };
                    current = Some(parse_airport_header(line, apt_type).ok_or_else(|| {
                        AptDatError::Parse(format!("line {}: truncated airport header", line_no))
                    })?);
                }
                "100" => {
                    if let Some(builder) = current.as_mut() {
                        // Land runway: thresholds at fields 9/10 and 18/19
                        builder.add_runway(threshold_pair(line, 9, 18));
                    }
                }
                "101" => {
                    if let Some(builder) = current.as_mut() {
                        // Water runway: thresholds at fields 4/5 and 7/8
                        builder.add_runway(threshold_pair(line, 4, 7));
                    }
                }
                "102" => {
                    if let Some(builder) = current.as_mut() {
                        if let Some(point) = coordinate_at(line, 2) {
                            builder.points.push(point);
                        }
                    }
                }
                "99" => break,
                _ => {}
            }
        }

        if let Some(builder) = current.take() {
            airports.push(builder.build());
        }

        debug!("apt.dat: parsed {} airports from {} lines", airports.len(), line_no);
        Ok(airports)
    }
}

struct AirportBuilder {
    id: String,
    name: String,
    airport_type: AirportType,
    elevation_ft: Option<i32>,
    points: Vec<(f64, f64)>,
    runway_count: u32,
    longest_runway_ft: f64,
}

impl AirportBuilder {
    fn add_runway(&mut self, thresholds: Option<((f64, f64), (f64, f64))>) {
        let Some((a, b)) = thresholds else {
            return;
        };
        self.runway_count += 1;
        let length_ft = distance(a.0, a.1, b.0, b.1, DistanceUnit::Nm) * FEET_PER_NM;
        self.longest_runway_ft = self.longest_runway_ft.max(length_ft);
        self.points.push(a);
        self.points.push(b);
    }

    /// The reference position is the mean of every threshold and helipad.
    fn build(self) -> Airport {
        let (lat, lon) = if self.points.is_empty() {
            (None, None)
        } else {
            let n = self.points.len() as f64;
            let lat = self.points.iter().map(|p| p.0).sum::<f64>() / n;
            let lon = self.points.iter().map(|p| p.1).sum::<f64>() / n;
            (Some(lat), Some(lon))
        };

        Airport {
            id: self.id,
            name: self.name,
            airport_type: self.airport_type,
            elevation_ft: self.elevation_ft,
            lat,
            lon,
            runway_count: self.runway_count,
            longest_runway_ft: self.longest_runway_ft,
        }
    }
}

fn parse_airport_header(line: &str, airport_type: AirportType) -> Option<AirportBuilder> {
    // 0:code 1:elevation 2,3:unused 4:ICAO 5..:name
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 5 {
        return None;
    }

    Some(AirportBuilder {
        id: parts[4].to_uppercase(),
        name: parts[5..].join(" "),
        airport_type,
        elevation_ft: parts[1].parse().ok(),
        points: Vec::with_capacity(4),
        runway_count: 0,
        longest_runway_ft: 0.0,
    })
}

fn coordinate_at(line: &str, index: usize) -> Option<(f64, f64)> {
    let mut parts = line.split_whitespace().skip(index);
    let lat = parts.next()?.parse::<f64>().ok()?;
    let lon = parts.next()?.parse::<f64>().ok()?;
    Some((lat, lon))
}

fn threshold_pair(line: &str, first: usize, second: usize) -> Option<((f64, f64), (f64, f64))> {
    Some((coordinate_at(line, first)?, coordinate_at(line, second)?))
}

/// In-memory index of airports keyed by upper-case ICAO code.
#[derive(Debug, Default, Clone)]
pub struct AirportDirectory {
    airports: HashMap<String, Airport>,
}

impl AirportDirectory {
    pub fn from_airports(airports: Vec<Airport>) -> Self {
        let airports = airports
            .into_iter()
            .map(|a| (a.id.to_uppercase(), a))
            .collect();
        Self { airports }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let airports = AptDatParser::parse_file(path)
            .with_context(|| format!("Failed to read airport data from {}", path.display()))?;
        info!("Loaded {} airports from {}", airports.len(), path.display());
        Ok(Self::from_airports(airports))
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Airport> {
        self.airports.get(&id.trim().to_uppercase())
    }

    pub fn lookup(&self, id: &str) -> Result<&Airport, HangarError> {
        self.get(id)
            .ok_or_else(|| HangarError::UnknownAirport(id.to_string()))
    }

    /// Great-circle distance between two airports in `unit`.
    pub fn distance_between(
        &self,
        from: &str,
        to: &str,
        unit: DistanceUnit,
    ) -> Result<f64, HangarError> {
        let (lat1, lon1) = self.position_of(from)?;
        let (lat2, lon2) = self.position_of(to)?;
        Ok(distance(lat1, lon1, lat2, lon2, unit))
    }

    fn position_of(&self, id: &str) -> Result<(f64, f64), HangarError> {
        let airport = self.lookup(id)?;
        airport
            .position()
            .ok_or_else(|| HangarError::MissingPosition(airport.id.clone()))
    }
}
