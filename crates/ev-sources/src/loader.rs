//! CSV loaders for offline collaborator data.
//!
//! # Formats
//!
//! Districts (one row per district, order preserved):
//!
//! ```csv
//! name,lat,lon
//! Srinagar,34.0837,74.7973
//! ```
//!
//! Precipitation (hourly readings; rows for the same coordinate are summed):
//!
//! ```csv
//! lat,lon,precipitation_mm
//! 34.0837,74.7973,12.5
//! 34.0837,74.7973,3.0
//! ```
//!
//! Seismic events (`magnitude` may be empty):
//!
//! ```csv
//! lat,lon,magnitude
//! 34.10,74.60,5.2
//! 33.90,75.00,
//! ```
//!
//! Shelters (`capacity` may be empty):
//!
//! ```csv
//! name,kind,lat,lon,capacity
//! Srinagar Emergency Shelter A,shelter,34.0850,74.8000,200
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ev_core::GeoPoint;
use ev_graph::{SourceError, SourceResult};

use crate::geocode::TableGeocoder;
use crate::precipitation::PrecipitationTable;
use crate::seismic::{QuakeCatalog, QuakeEvent};
use crate::shelters::Shelter;

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct DistrictRecord {
    name: String,
    lat:  f64,
    lon:  f64,
}

#[derive(Deserialize)]
struct PrecipitationRecord {
    lat:              f64,
    lon:              f64,
    precipitation_mm: f64,
}

#[derive(Deserialize)]
struct QuakeRecord {
    lat:       f64,
    lon:       f64,
    magnitude: Option<f64>,
}

#[derive(Deserialize)]
struct ShelterRecord {
    name:     String,
    kind:     String,
    lat:      f64,
    lon:      f64,
    capacity: Option<u32>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load district names (in file order) and a geocoder over their coordinates.
pub fn load_districts_csv(path: &Path) -> SourceResult<(Vec<String>, TableGeocoder)> {
    load_districts_reader(std::fs::File::open(path)?)
}

/// Like [`load_districts_csv`] but accepts any `Read` source.
pub fn load_districts_reader<R: Read>(reader: R) -> SourceResult<(Vec<String>, TableGeocoder)> {
    let rows: Vec<DistrictRecord> = read_rows(reader)?;
    let mut names = Vec::with_capacity(rows.len());
    let mut geocoder = TableGeocoder::new();
    for r in rows {
        geocoder.insert(r.name.clone(), GeoPoint::new(r.lat, r.lon));
        names.push(r.name);
    }
    Ok((names, geocoder))
}

pub fn load_precipitation_csv(path: &Path) -> SourceResult<PrecipitationTable> {
    load_precipitation_reader(std::fs::File::open(path)?)
}

pub fn load_precipitation_reader<R: Read>(reader: R) -> SourceResult<PrecipitationTable> {
    let rows: Vec<PrecipitationRecord> = read_rows(reader)?;
    Ok(PrecipitationTable::from_hourly(
        rows.into_iter()
            .map(|r| (GeoPoint::new(r.lat, r.lon), r.precipitation_mm)),
    ))
}

pub fn load_quakes_csv(path: &Path) -> SourceResult<QuakeCatalog> {
    load_quakes_reader(std::fs::File::open(path)?)
}

pub fn load_quakes_reader<R: Read>(reader: R) -> SourceResult<QuakeCatalog> {
    let rows: Vec<QuakeRecord> = read_rows(reader)?;
    Ok(QuakeCatalog::new(
        rows.into_iter()
            .map(|r| QuakeEvent { pos: GeoPoint::new(r.lat, r.lon), magnitude: r.magnitude })
            .collect(),
    ))
}

pub fn load_shelters_csv(path: &Path) -> SourceResult<Vec<Shelter>> {
    load_shelters_reader(std::fs::File::open(path)?)
}

pub fn load_shelters_reader<R: Read>(reader: R) -> SourceResult<Vec<Shelter>> {
    let rows: Vec<ShelterRecord> = read_rows(reader)?;
    Ok(rows
        .into_iter()
        .map(|r| Shelter {
            name:     r.name,
            kind:     r.kind,
            pos:      GeoPoint::new(r.lat, r.lon),
            capacity: r.capacity,
        })
        .collect())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read_rows<R: Read, T: for<'de> Deserialize<'de>>(reader: R) -> SourceResult<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv_reader
        .deserialize::<T>()
        .map(|row| row.map_err(|e| SourceError::Parse(e.to_string())))
        .collect()
}
