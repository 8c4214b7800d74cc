//! jk-evac: evacuation routes across the districts of Jammu & Kashmir.
//!
//! Runs the full planner against the built-in district table with an
//! embedded snapshot of rainfall, seismic events, and shelters, then prints
//! the plan as JSON on stdout.  Logs go to stderr (`RUST_LOG` overrides the
//! default `info` level).
//!
//! ```text
//! jk-evac [START] [END] [BLOCKED_TYPES] [K]
//! jk-evac Srinagar Jammu flood,landslide 3
//! ```
//!
//! `EV_CONFIG=path.json` loads an `EngineConfig`; missing fields keep their
//! defaults.

use std::io::Cursor;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ev_core::EngineConfig;
use ev_plan::{EvacuationRequest, PlannerBuilder};
use ev_sources::{
    district_names, load_precipitation_reader, load_quakes_reader, load_shelters_reader, CachedGeocoder,
    CachedPrecipitation, TableGeocoder,
};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_START:   &str = "Srinagar";
const DEFAULT_END:     &str = "Jammu";
const DEFAULT_BLOCKED: &str = "flood";

// ── Embedded data snapshot ────────────────────────────────────────────────────

// Hourly rainfall (mm) at district centres.  Budgam sits over the block
// threshold; Pulwama and Ramban are wet but passable.
const RAINFALL_CSV: &str = "\
lat,lon,precipitation_mm\n\
34.0159,74.7644,95.0\n\
34.0159,74.7644,80.0\n\
34.0159,74.7644,40.0\n\
33.8740,74.8994,60.0\n\
33.8740,74.8994,52.5\n\
33.2425,75.2441,35.0\n\
33.2425,75.2441,30.0\n\
34.0837,74.7973,12.0\n\
";

// Recent events; one has no reported magnitude.
const QUAKES_CSV: &str = "\
lat,lon,magnitude\n\
33.30,75.30,5.4\n\
34.40,74.20,4.2\n\
32.90,75.60,\n\
";

const SHELTERS_CSV: &str = "\
name,kind,lat,lon,capacity\n\
Srinagar Emergency Shelter A,shelter,34.0850,74.8000,200\n\
Baramulla Emergency Shelter,shelter,34.2105,74.3490,150\n\
Anantnag Central Shelter,shelter,33.7335,75.1500,180\n\
Jammu Relief Camp,shelter,32.7300,74.8600,400\n\
Jammu Relief Camp Annex,shelter,32.7310,74.8605,100\n\
GMC Hospital Jammu,hospital,32.7180,74.8640,\n\
Gandhi Nagar Police Station,police,32.7040,74.8720,\n\
";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // 1. Request from the command line.
    let args: Vec<String> = std::env::args().skip(1).collect();
    let start = args.first().map_or(DEFAULT_START, String::as_str);
    let end = args.get(1).map_or(DEFAULT_END, String::as_str);
    let blocked: Vec<&str> = args
        .get(2)
        .map_or(DEFAULT_BLOCKED, String::as_str)
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    let mut request = EvacuationRequest::new(start, end).blocked_types(blocked);
    if let Some(k) = args.get(3) {
        request = request.k(k.parse().with_context(|| format!("invalid k {k:?}"))?);
    }

    // 2. Config.
    let config = match std::env::var("EV_CONFIG") {
        Ok(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str::<EngineConfig>(&text).with_context(|| format!("parsing {path}"))?
        }
        Err(_) => EngineConfig::default(),
    };

    // 3. Collaborators.
    let rainfall = load_precipitation_reader(Cursor::new(RAINFALL_CSV))?;
    let quakes = load_quakes_reader(Cursor::new(QUAKES_CSV))?;
    let shelters = load_shelters_reader(Cursor::new(SHELTERS_CSV))?;
    info!(
        rain_points = rainfall.len(),
        quakes = quakes.len(),
        shelters = shelters.len(),
        "data snapshot loaded"
    );

    // 4. Planner.
    let planner = PlannerBuilder::new(
        config,
        CachedGeocoder::new(TableGeocoder::builtin()),
        CachedPrecipitation::new(rainfall),
        quakes,
    )
    .districts(district_names())
    .shelters(shelters)
    .disaster_type("Budgam", "flood")
    .disaster_type("Ramban", "landslide")
    .build()?;

    // 5. Plan.
    let t0 = Instant::now();
    let plan = planner.plan(&request);
    let elapsed = t0.elapsed();

    match plan.best() {
        Some(best) => info!(
            route = %best.path.join(" → "),
            cost = best.cost,
            risk_nodes = best.risk_nodes,
            alternatives = plan.routes.len() - 1,
            elapsed_ms = elapsed.as_secs_f64() * 1e3,
            "best route"
        ),
        None => info!(start, end, "no route found"),
    }

    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
