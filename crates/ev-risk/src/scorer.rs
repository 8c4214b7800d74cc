//! Band-based risk scorer.

use ev_core::{Hazard, RiskConfig};

/// Scores hazards against a [`RiskConfig`].
///
/// Cheap to clone; holds no state besides its thresholds.
#[derive(Clone, Debug, Default)]
pub struct RiskScorer {
    config: RiskConfig,
}

impl RiskScorer {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Risk contribution from rainfall over the last 24 hours.
    ///
    /// Bands are inclusive at the lower bound, first match wins from the top.
    pub fn rainfall_risk(&self, precip_mm: f64) -> f64 {
        let c = &self.config;
        let [top, high, medium, low] = c.band_scores;
        if precip_mm >= c.rain_block_mm {
            top
        } else if precip_mm >= c.rain_high_mm {
            high
        } else if precip_mm >= c.rain_medium_mm {
            medium
        } else if precip_mm >= c.rain_low_mm {
            low
        } else {
            0.0
        }
    }

    /// Risk contribution from the largest nearby seismic magnitude.
    pub fn seismic_risk(&self, magnitude: f64) -> f64 {
        let c = &self.config;
        let [top, high, medium, _] = c.band_scores;
        if magnitude >= c.quake_high_mag {
            top
        } else if magnitude >= c.quake_medium_mag {
            high
        } else if magnitude >= c.quake_low_mag {
            medium
        } else {
            0.0
        }
    }

    /// Amplification from the free-text disaster classification.
    ///
    /// Case-insensitive substring match; `flood` is checked before
    /// `landslide`, so only one multiplier ever applies.
    pub fn contextual_multiplier(&self, disaster_type: &str) -> f64 {
        let label = disaster_type.to_lowercase();
        if label.contains("flood") {
            self.config.flood_multiplier
        } else if label.contains("landslide") {
            self.config.landslide_multiplier
        } else {
            1.0
        }
    }

    /// Combined, amplified risk score of one district.
    pub fn total_risk(&self, hazard: &Hazard) -> f64 {
        let base = self.rainfall_risk(hazard.precipitation_24h)
            + self.seismic_risk(hazard.seismic_magnitude);
        base * self.contextual_multiplier(&hazard.disaster_type)
    }

    /// `true` iff rainfall alone reaches the block threshold.  Seismic data
    /// and disaster type never block a district.
    pub fn is_blocked(&self, hazard: &Hazard) -> bool {
        hazard.precipitation_24h >= self.config.rain_block_mm
    }

    /// `true` if the district should be counted as a risk node on a route.
    pub fn is_risky(&self, hazard: &Hazard) -> bool {
        self.total_risk(hazard) > self.config.risky_node_threshold
    }
}
