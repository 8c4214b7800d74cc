//! Engine configuration.
//!
//! Every threshold used by graph construction, risk scoring, and edge
//! reweighting lives here so applications can load it from a JSON/TOML file
//! and tests can tweak a single value.  `Default` reproduces the reference
//! heuristic exactly.

use crate::{EvError, EvResult};

// ── GraphConfig ───────────────────────────────────────────────────────────────

/// Graph-construction and hazard-lookup parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphConfig {
    /// Two districts are adjacent iff their great-circle distance is at most
    /// this many kilometres.
    pub adjacency_threshold_km: f64,

    /// Radius around a district within which seismic events are considered.
    pub seismic_radius_km: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            adjacency_threshold_km: 120.0,
            seismic_radius_km:      150.0,
        }
    }
}

// ── RiskConfig ────────────────────────────────────────────────────────────────

/// Thresholds and weights of the risk heuristic.
///
/// Bands are inclusive at their lower bound and evaluated highest-first.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RiskConfig {
    /// Rainfall at or above this blocks the district outright (mm / 24 h).
    pub rain_block_mm:  f64,
    pub rain_high_mm:   f64,
    pub rain_medium_mm: f64,
    pub rain_low_mm:    f64,

    pub quake_high_mag:   f64,
    pub quake_medium_mag: f64,
    pub quake_low_mag:    f64,

    /// Score awarded for the top, high, medium, and low band respectively.
    /// Seismic risk uses the first three.
    pub band_scores: [f64; 4],

    pub flood_multiplier:     f64,
    pub landslide_multiplier: f64,

    /// Edge penalty per unit of combined endpoint risk.
    pub risk_penalty_factor: f64,

    /// Flat penalty per edge endpoint whose disaster type is blocked.
    pub blocked_type_penalty: f64,

    /// A district counts as a risk node on a route above this score.
    pub risky_node_threshold: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            rain_block_mm:        200.0,
            rain_high_mm:         100.0,
            rain_medium_mm:       50.0,
            rain_low_mm:          20.0,
            quake_high_mag:       6.0,
            quake_medium_mag:     5.0,
            quake_low_mag:        4.0,
            band_scores:          [30.0, 18.0, 8.0, 3.0],
            flood_multiplier:     1.2,
            landslide_multiplier: 1.1,
            risk_penalty_factor:  0.1,
            blocked_type_penalty: 25.0,
            risky_node_threshold: 5.0,
        }
    }
}

// ── EngineConfig ──────────────────────────────────────────────────────────────

/// Top-level configuration for an evacuation planner.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub graph: GraphConfig,
    pub risk:  RiskConfig,

    /// Number of routes returned when a request does not specify `k`.
    pub default_k: usize,

    /// Requests asking for more routes are clamped to this.
    pub max_k: usize,

    /// How many nearby shelters to report per plan.
    pub shelter_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            graph:         GraphConfig::default(),
            risk:          RiskConfig::default(),
            default_k:     3,
            max_k:         5,
            shelter_count: 3,
        }
    }
}

impl EngineConfig {
    /// Reject configurations that would make the heuristic meaningless.
    pub fn validate(&self) -> EvResult<()> {
        let g = &self.graph;
        non_negative("adjacency_threshold_km", g.adjacency_threshold_km)?;
        non_negative("seismic_radius_km", g.seismic_radius_km)?;

        let r = &self.risk;
        descending("rain bands", &[r.rain_block_mm, r.rain_high_mm, r.rain_medium_mm, r.rain_low_mm])?;
        descending("quake bands", &[r.quake_high_mag, r.quake_medium_mag, r.quake_low_mag])?;
        for (i, s) in r.band_scores.iter().enumerate() {
            non_negative(&format!("band_scores[{i}]"), *s)?;
        }
        non_negative("flood_multiplier", r.flood_multiplier)?;
        non_negative("landslide_multiplier", r.landslide_multiplier)?;
        non_negative("risk_penalty_factor", r.risk_penalty_factor)?;
        non_negative("blocked_type_penalty", r.blocked_type_penalty)?;
        non_negative("risky_node_threshold", r.risky_node_threshold)?;

        if self.default_k == 0 {
            return Err(EvError::Config("default_k must be at least 1".into()));
        }
        if self.max_k < self.default_k {
            return Err(EvError::Config(format!(
                "max_k ({}) is smaller than default_k ({})",
                self.max_k, self.default_k
            )));
        }
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn non_negative(what: &str, v: f64) -> EvResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(EvError::Config(format!("{what} must be finite and >= 0, got {v}")))
    }
}

fn descending(what: &str, bands: &[f64]) -> EvResult<()> {
    for &b in bands {
        non_negative(what, b)?;
    }
    if bands.windows(2).all(|w| w[0] > w[1]) {
        Ok(())
    } else {
        Err(EvError::Config(format!("{what} must be strictly descending, got {bands:?}")))
    }
}
