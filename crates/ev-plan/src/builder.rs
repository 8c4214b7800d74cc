//! Fluent builder for constructing an [`EvacuationPlanner`].

use rustc_hash::FxHashMap;
use tracing::debug;

use ev_core::EngineConfig;
use ev_graph::{Geocoder, PrecipitationSource, SeismicSource};
use ev_risk::RiskScorer;
use ev_routing::{Router, YenRouter};
use ev_sources::{dedup_by_proximity, district_names, fallback_shelters, Shelter};

use crate::{EvacuationPlanner, PlanError, PlanResult};

/// Fluent builder for [`EvacuationPlanner<G, P, S, R>`].
///
/// # Required inputs
///
/// - [`EngineConfig`]: thresholds, default and maximum `k`, shelter count
/// - `G: Geocoder`: district name → coordinate
/// - `P: PrecipitationSource`, `S: SeismicSource`: hazard feeds
///
/// # Optional inputs (have defaults)
///
/// | Method                    | Default                                  |
/// |---------------------------|------------------------------------------|
/// | `.districts(names)`       | The built-in district table, in order    |
/// | `.shelters(v)`            | The built-in fallback shelters           |
/// | `.disaster_type(d, t)`    | Every district untyped                   |
/// | `.router(r)`              | `YenRouter` over the configured risk     |
///
/// # Example
///
/// ```rust,ignore
/// let planner = PlannerBuilder::new(config, geocoder, precipitation, quakes)
///     .districts(["Srinagar", "Budgam", "Jammu"])
///     .disaster_type("Budgam", "flash flood")
///     .build()?;
/// let plan = planner.plan(&EvacuationRequest::new("Srinagar", "Jammu"));
/// ```
pub struct PlannerBuilder<G, P, S, R = YenRouter> {
    config:         EngineConfig,
    geocoder:       G,
    precipitation:  P,
    seismic:        S,
    router:         R,
    districts:      Option<Vec<String>>,
    shelters:       Option<Vec<Shelter>>,
    disaster_types: FxHashMap<String, String>,
}

impl<G, P, S> PlannerBuilder<G, P, S, YenRouter>
where
    G: Geocoder,
    P: PrecipitationSource,
    S: SeismicSource,
{
    /// Create a builder with all required inputs and the default router.
    pub fn new(config: EngineConfig, geocoder: G, precipitation: P, seismic: S) -> Self {
        let router = YenRouter::new(RiskScorer::new(config.risk.clone()));
        Self {
            config,
            geocoder,
            precipitation,
            seismic,
            router,
            districts:      None,
            shelters:       None,
            disaster_types: FxHashMap::default(),
        }
    }
}

impl<G, P, S, R> PlannerBuilder<G, P, S, R>
where
    G: Geocoder,
    P: PrecipitationSource,
    S: SeismicSource,
    R: Router,
{
    /// Districts to build the graph from.  Order is kept; a repeated name
    /// counts once.
    pub fn districts<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.districts = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Shelter directory.  Entries within the dedup radius of an earlier one
    /// are dropped at build time.
    pub fn shelters(mut self, shelters: Vec<Shelter>) -> Self {
        self.shelters = Some(shelters);
        self
    }

    /// Attach a reported disaster type to a district.  A later report for
    /// the same district replaces the earlier one.
    pub fn disaster_type(mut self, district: impl Into<String>, kind: impl Into<String>) -> Self {
        self.disaster_types.insert(district.into(), kind.into());
        self
    }

    /// Replace the routing algorithm.
    pub fn router<R2: Router>(self, router: R2) -> PlannerBuilder<G, P, S, R2> {
        PlannerBuilder {
            config:         self.config,
            geocoder:       self.geocoder,
            precipitation:  self.precipitation,
            seismic:        self.seismic,
            router,
            districts:      self.districts,
            shelters:       self.shelters,
            disaster_types: self.disaster_types,
        }
    }

    /// Validate inputs and return a ready-to-query [`EvacuationPlanner`].
    pub fn build(self) -> PlanResult<EvacuationPlanner<G, P, S, R>> {
        self.config.validate()?;

        // ── Districts ─────────────────────────────────────────────────────
        let requested = match self.districts {
            Some(d) => d,
            None => district_names().iter().map(|n| n.to_string()).collect(),
        };
        let mut districts: Vec<String> = Vec::with_capacity(requested.len());
        for name in requested {
            if !districts.contains(&name) {
                districts.push(name);
            }
        }
        if districts.is_empty() {
            return Err(PlanError::NoDistricts);
        }

        for name in self.disaster_types.keys() {
            if !districts.contains(name) {
                return Err(PlanError::Config(format!(
                    "disaster type reported for unknown district {name:?}"
                )));
            }
        }

        // ── Shelters ──────────────────────────────────────────────────────
        let shelters = dedup_by_proximity(self.shelters.unwrap_or_else(fallback_shelters));

        debug!(
            districts = districts.len(),
            shelters = shelters.len(),
            typed = self.disaster_types.len(),
            "planner built"
        );

        Ok(EvacuationPlanner {
            scorer:         RiskScorer::new(self.config.risk.clone()),
            config:         self.config,
            geocoder:       self.geocoder,
            precipitation:  self.precipitation,
            seismic:        self.seismic,
            router:         self.router,
            districts,
            shelters,
            disaster_types: self.disaster_types,
        })
    }
}
