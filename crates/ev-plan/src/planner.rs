//! The request pipeline.

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use ev_core::{EngineConfig, EvError};
use ev_graph::{
    build_graph, enrich, reweight, DistrictGraph, EnrichReport, Geocoder, Positions, PrecipitationSource,
    ReweightOptions, SeismicSource,
};
use ev_risk::RiskScorer;
use ev_routing::Router;
use ev_sources::{rank_nearest, RankedShelter, Shelter};

use crate::{EvacuationPlan, EvacuationRequest, PlanResult};

/// Answers evacuation requests.  Built by [`crate::PlannerBuilder`].
///
/// Every call to [`plan`](Self::plan) builds and enriches a fresh graph, so
/// a planner can serve concurrent requests when its collaborators allow it.
pub struct EvacuationPlanner<G, P, S, R> {
    pub(crate) config:         EngineConfig,
    pub(crate) scorer:         RiskScorer,
    pub(crate) geocoder:       G,
    pub(crate) precipitation:  P,
    pub(crate) seismic:        S,
    pub(crate) router:         R,
    pub(crate) districts:      Vec<String>,
    pub(crate) shelters:       Vec<Shelter>,
    pub(crate) disaster_types: FxHashMap<String, String>,
}

impl<G, P, S, R> EvacuationPlanner<G, P, S, R>
where
    G: Geocoder,
    P: PrecipitationSource,
    S: SeismicSource,
    R: Router,
{
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Configured district names, in order.
    pub fn districts(&self) -> &[String] {
        &self.districts
    }

    /// Shelter directory after dedup.
    pub fn shelters(&self) -> &[Shelter] {
        &self.shelters
    }

    /// Requested `k`, or the default, clamped to `1..=max_k`.
    pub fn effective_k(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.config.default_k)
            .clamp(1, self.config.max_k)
    }

    /// Build, annotate, and enrich a graph over the configured districts.
    pub fn enriched_graph(&self) -> (DistrictGraph, Positions, EnrichReport) {
        let (mut graph, positions) = build_graph(&self.districts, &self.geocoder, &self.config.graph);
        for (name, kind) in &self.disaster_types {
            if let Some(d) = graph.district_by_name_mut(name) {
                d.hazard.disaster_type = kind.clone();
            }
        }
        let report = enrich(&mut graph, &self.precipitation, &self.seismic, &self.config.graph);
        (graph, positions, report)
    }

    /// Run the full pipeline for one request.
    pub fn plan(&self, request: &EvacuationRequest) -> EvacuationPlan {
        let (graph, positions, enrichment) = self.enriched_graph();
        let district_count = graph.district_count();

        let options = ReweightOptions::new()
            .blocked_types(request.blocked_types.iter().cloned())
            .remove_blocked(request.remove_blocked)
            .endpoints(request.start.as_str(), request.end.as_str());
        let weighted = reweight(&graph, &options, &self.scorer);

        let k = self.effective_k(request.k);
        let routes = match (weighted.id_of(&request.start), weighted.id_of(&request.end)) {
            (Some(from), Some(to)) => self.router.routes(&weighted, from, to, k),
            _ => {
                debug!(start = %request.start, end = %request.end, "endpoint not resolved");
                Vec::new()
            }
        };

        let polyline = routes.first().map(|r| r.polyline(&positions)).unwrap_or_default();
        let shelters = positions
            .get(&request.end)
            .map(|&pos| rank_nearest(pos, &self.shelters, self.config.shelter_count))
            .unwrap_or_default();

        info!(
            start = %request.start,
            end = %request.end,
            k,
            routes = routes.len(),
            districts = district_count,
            "evacuation plan ready"
        );

        EvacuationPlan {
            routes,
            polyline,
            shelters,
            district_count,
            requested_districts: self.districts.len(),
            enrichment,
        }
    }

    /// The `k` shelters nearest a configured district.
    pub fn shelters_near(&self, district: &str, k: usize) -> PlanResult<Vec<RankedShelter>> {
        let pos = self
            .districts
            .iter()
            .any(|d| d == district)
            .then(|| self.geocoder.geocode(district))
            .flatten()
            .ok_or_else(|| EvError::DistrictNotFound(district.to_string()))?;
        Ok(rank_nearest(pos, &self.shelters, k))
    }
}
