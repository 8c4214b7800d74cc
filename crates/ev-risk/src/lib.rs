//! `ev-risk`: converts hazard observations into a comparable risk score.
//!
//! The score is a deliberately simple heuristic for *relative* comparison
//! between districts in one evaluation run.  It is not a predictive model
//! and says nothing about absolute danger.
//!
//! ```text
//! total   = (rainfall_risk(precip) + seismic_risk(magnitude)) × multiplier(disaster_type)
//! blocked = precip ≥ rain_block_mm
//! ```

pub mod scorer;


pub use scorer::RiskScorer;
