//! Risk-weighted filtering.
//!
//! Produces a reweighted copy of an enriched graph; the input is never
//! mutated, so one enriched graph can serve several queries with different
//! blocked-type selections.
//!
//! ```text
//! weight(u, v) = base_distance_km
//!              + risk_penalty_factor × (risk(u) + risk(v))
//!              + blocked_type_penalty × |{u, v} ∩ blocked-type districts|
//! ```
//!
//! Penalties are non-negative, so a reweighted edge is never cheaper than its
//! geographic length.  Two blocked-type endpoints add the flat penalty twice.

use rustc_hash::FxHashSet;
use tracing::debug;

use ev_core::{DistrictId, EdgeId};
use ev_risk::RiskScorer;

use crate::graph::{DistrictGraph, DistrictGraphBuilder};

/// Parameters of one reweighting pass.
#[derive(Clone, Debug, Default)]
pub struct ReweightOptions {
    /// Districts whose `disaster_type` equals one of these labels are
    /// strongly disfavoured.
    pub blocked_types: Vec<String>,
    /// Physically remove blocked districts (rain at or above the block
    /// threshold) along with their edges.
    pub remove_blocked: bool,
    /// Never removed, even if blocked.
    pub start: Option<String>,
    /// Never removed, even if blocked.
    pub end: Option<String>,
}

impl ReweightOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocked_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocked_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn remove_blocked(mut self, remove: bool) -> Self {
        self.remove_blocked = remove;
        self
    }

    pub fn endpoints(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self.end = Some(end.into());
        self
    }

    fn is_endpoint(&self, name: &str) -> bool {
        self.start.as_deref() == Some(name) || self.end.as_deref() == Some(name)
    }
}

/// Return a reweighted copy of `graph`.
pub fn reweight(graph: &DistrictGraph, options: &ReweightOptions, scorer: &RiskScorer) -> DistrictGraph {
    let mut out = if options.remove_blocked {
        without_blocked(graph, options, scorer)
    } else {
        graph.clone()
    };

    let blocked_types: FxHashSet<&str> = options
        .blocked_types
        .iter()
        .map(String::as_str)
        .filter(|t| !t.is_empty())
        .collect();

    let risk: Vec<f64> = out.districts().map(|(_, d)| scorer.total_risk(&d.hazard)).collect();
    let type_blocked: Vec<bool> = out
        .districts()
        .map(|(_, d)| blocked_types.contains(d.hazard.disaster_type.as_str()))
        .collect();

    let cfg = scorer.config();
    let updates: Vec<(EdgeId, f64)> = out
        .edges()
        .map(|(id, e)| {
            let (u, v) = e.endpoints();
            let mut penalty = cfg.risk_penalty_factor * (risk[u.index()] + risk[v.index()]);
            for end in [u, v] {
                if type_blocked[end.index()] {
                    penalty += cfg.blocked_type_penalty;
                }
            }
            (id, e.base_distance_km() + penalty)
        })
        .collect();

    for (id, w) in updates {
        out.set_weight(id, w);
    }
    out
}

/// Copy of `graph` minus blocked, non-endpoint districts and their edges.
/// Surviving districts keep their relative order but are re-numbered.
fn without_blocked(graph: &DistrictGraph, options: &ReweightOptions, scorer: &RiskScorer) -> DistrictGraph {
    let mut b = DistrictGraphBuilder::new();
    let mut remap = vec![DistrictId::INVALID; graph.district_count()];
    let mut removed = Vec::new();

    for (id, d) in graph.districts() {
        if scorer.is_blocked(&d.hazard) && !options.is_endpoint(d.name()) {
            removed.push(d.name());
            continue;
        }
        remap[id.index()] = b.add_district_with(d.name(), d.pos(), d.hazard.clone());
    }

    for (_, e) in graph.edges() {
        let (u, v) = e.endpoints();
        let (nu, nv) = (remap[u.index()], remap[v.index()]);
        if nu != DistrictId::INVALID && nv != DistrictId::INVALID {
            b.add_edge(nu, nv, e.base_distance_km());
        }
    }

    if !removed.is_empty() {
        debug!(?removed, "blocked districts removed");
    }
    b.build()
}
