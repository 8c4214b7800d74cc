//! Integration tests for ev-plan.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ev_core::{DistrictId, EngineConfig, EvError, GeoPoint};
use ev_graph::{DistrictGraph, SourceError, SourceResult};
use ev_routing::{Route, Router};
use ev_sources::{Shelter, TableGeocoder};

use crate::{EvacuationRequest, PlanError, PlannerBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

type Rain = fn(GeoPoint) -> SourceResult<f64>;
type Quakes = fn(GeoPoint, f64) -> SourceResult<f64>;

/// A(0,0), B(0,1°), C(0,2°): A–B and B–C are ~111 km apart, A–C ~222 km.
fn line_geocoder() -> TableGeocoder {
    TableGeocoder::from_iter([
        ("A".to_string(), GeoPoint::new(0.0, 0.0)),
        ("B".to_string(), GeoPoint::new(0.0, 1.0)),
        ("C".to_string(), GeoPoint::new(0.0, 2.0)),
    ])
}

/// 250 mm on B, dry elsewhere.
fn rain_on_b(pos: GeoPoint) -> SourceResult<f64> {
    Ok(if (pos.lon - 1.0).abs() < 1e-9 { 250.0 } else { 0.0 })
}

fn rain_down(pos: GeoPoint) -> SourceResult<f64> {
    Err(SourceError::NotFound { lat: pos.lat, lon: pos.lon })
}

fn calm(_: GeoPoint, _: f64) -> SourceResult<f64> {
    Ok(0.0)
}

fn config(threshold_km: f64) -> EngineConfig {
    let mut c = EngineConfig::default();
    c.graph.adjacency_threshold_km = threshold_km;
    c
}

fn builder(threshold_km: f64) -> PlannerBuilder<TableGeocoder, Rain, Quakes> {
    PlannerBuilder::new(config(threshold_km), line_geocoder(), rain_on_b as Rain, calm as Quakes)
        .districts(["A", "B", "C"])
}

fn shelter(name: &str, lat: f64, lon: f64) -> Shelter {
    Shelter { name: name.into(), kind: "shelter".into(), pos: GeoPoint::new(lat, lon), capacity: None }
}

fn names(route: &Route) -> Vec<&str> {
    route.path.iter().map(String::as_str).collect()
}

// ── PlannerBuilder validation ─────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let planner = PlannerBuilder::new(EngineConfig::default(), TableGeocoder::builtin(), rain_on_b as Rain, calm as Quakes)
            .build()
            .unwrap();
        assert_eq!(planner.districts().len(), 19);
        assert_eq!(planner.districts()[0], "Anantnag");
        assert_eq!(planner.shelters().len(), 3);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut c = EngineConfig::default();
        c.default_k = 0;
        let result = PlannerBuilder::new(c, line_geocoder(), rain_on_b as Rain, calm as Quakes).build();
        assert!(matches!(result, Err(PlanError::Core(EvError::Config(_)))));
    }

    #[test]
    fn empty_district_list_is_rejected() {
        let result = builder(120.0).districts(Vec::<String>::new()).build();
        assert!(matches!(result, Err(PlanError::NoDistricts)));
    }

    #[test]
    fn disaster_type_for_unknown_district_is_rejected() {
        let result = builder(120.0).disaster_type("Z", "flood").build();
        assert!(matches!(result, Err(PlanError::Config(_))));
    }

    #[test]
    fn repeated_district_names_count_once() {
        let planner = builder(120.0).districts(["A", "B", "A", "C", "B"]).build().unwrap();
        assert_eq!(planner.districts(), ["A", "B", "C"]);
    }

    #[test]
    fn shelters_are_deduplicated() {
        let planner = builder(120.0)
            .shelters(vec![shelter("S1", 0.0, 2.0), shelter("S1-annex", 0.0, 2.001), shelter("S2", 0.0, 0.0)])
            .build()
            .unwrap();
        assert_eq!(planner.shelters().len(), 2);
    }

    #[test]
    fn k_is_clamped() {
        let planner = builder(120.0).build().unwrap();
        assert_eq!(planner.effective_k(None), 3);
        assert_eq!(planner.effective_k(Some(0)), 1);
        assert_eq!(planner.effective_k(Some(2)), 2);
        assert_eq!(planner.effective_k(Some(99)), 5);
    }
}

// ── Planning ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod plan_tests {
    use super::*;

    #[test]
    fn flooded_district_is_avoided() {
        let planner = builder(500.0)
            .disaster_type("B", "flood")
            .shelters(vec![shelter("far", 0.0, 0.0), shelter("near", 0.0, 2.01)])
            .build()
            .unwrap();
        let plan = planner.plan(&EvacuationRequest::new("A", "C").blocked_types(["flood"]));

        assert_eq!(plan.routes.len(), 2);
        assert_eq!(names(&plan.routes[0]), ["A", "C"]);
        assert_eq!(plan.routes[0].cost, 222.39);
        assert_eq!(plan.routes[0].risk_nodes, 0);
        assert_eq!(names(&plan.routes[1]), ["A", "B", "C"]);
        assert_eq!(plan.routes[1].risk_nodes, 1);

        assert_eq!(plan.polyline, [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 2.0)]);
        assert_eq!(plan.shelters[0].shelter.name, "near");
        assert_eq!(plan.shelters[1].shelter.name, "far");
        assert_eq!(plan.district_count, 3);
        assert!(plan.full_coverage());
        assert!(plan.enrichment.is_complete());
    }

    #[test]
    fn removing_blocked_bridge_leaves_no_route() {
        let planner = builder(120.0).build().unwrap();
        let plan = planner.plan(&EvacuationRequest::new("A", "C").remove_blocked(true));
        assert!(!plan.has_route());
        assert!(plan.polyline.is_empty());
        assert!(plan.best().is_none());
        // Destination resolved, so shelters are still ranked.
        assert_eq!(plan.shelters.len(), 3);
    }

    #[test]
    fn blocked_bridge_kept_without_removal() {
        let planner = builder(120.0).build().unwrap();
        let plan = planner.plan(&EvacuationRequest::new("A", "C"));
        assert_eq!(plan.routes.len(), 1);
        assert_eq!(names(&plan.routes[0]), ["A", "B", "C"]);
    }

    #[test]
    fn blocked_endpoint_is_not_removed() {
        let planner = builder(120.0).build().unwrap();
        let plan = planner.plan(&EvacuationRequest::new("A", "B").remove_blocked(true));
        assert_eq!(names(&plan.routes[0]), ["A", "B"]);
    }

    #[test]
    fn unknown_endpoint_gives_empty_plan() {
        let planner = builder(120.0).build().unwrap();
        let plan = planner.plan(&EvacuationRequest::new("A", "Atlantis"));
        assert!(plan.routes.is_empty());
        assert!(plan.shelters.is_empty());
        assert_eq!(plan.district_count, 3);
    }

    #[test]
    fn unresolved_district_reduces_coverage() {
        let planner = builder(120.0).districts(["A", "B", "C", "Nowhere"]).build().unwrap();
        let plan = planner.plan(&EvacuationRequest::new("A", "C"));
        assert_eq!(plan.district_count, 3);
        assert_eq!(plan.requested_districts, 4);
        assert!(!plan.full_coverage());
        assert!(plan.has_route());
    }

    #[test]
    fn failed_feed_degrades_to_zero() {
        let planner = PlannerBuilder::new(config(120.0), line_geocoder(), rain_down as Rain, calm as Quakes)
            .districts(["A", "B", "C"])
            .build()
            .unwrap();
        let plan = planner.plan(&EvacuationRequest::new("A", "C").remove_blocked(true));
        assert_eq!(plan.enrichment.precipitation_failures, 3);
        assert_eq!(plan.enrichment.seismic_failures, 0);
        // No rain observed, so nothing is blocked.
        assert_eq!(names(&plan.routes[0]), ["A", "B", "C"]);
        assert_eq!(plan.routes[0].risk_nodes, 0);
    }

    #[test]
    fn repeated_plans_are_identical() {
        let planner = builder(500.0).disaster_type("B", "flood").build().unwrap();
        let req = EvacuationRequest::new("A", "C").blocked_types(["flood"]);
        assert_eq!(planner.plan(&req), planner.plan(&req));
    }

    #[test]
    fn shelters_near_district() {
        let planner = builder(120.0)
            .shelters(vec![shelter("west", 0.0, -0.5), shelter("east", 0.0, 2.5)])
            .build()
            .unwrap();
        let near_a = planner.shelters_near("A", 1).unwrap();
        assert_eq!(near_a.len(), 1);
        assert_eq!(near_a[0].shelter.name, "west");

        let err = planner.shelters_near("Atlantis", 1).unwrap_err();
        assert!(matches!(err, PlanError::Core(EvError::DistrictNotFound(_))));
    }
}

// ── Custom router ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod router_tests {
    use super::*;

    /// Records the `k` it was asked for and returns nothing.
    struct Recording {
        last_k: Arc<AtomicUsize>,
    }

    impl Router for Recording {
        fn routes(&self, _graph: &DistrictGraph, _from: DistrictId, _to: DistrictId, k: usize) -> Vec<Route> {
            self.last_k.store(k, Ordering::SeqCst);
            Vec::new()
        }
    }

    #[test]
    fn router_receives_clamped_k() {
        let last_k = Arc::new(AtomicUsize::new(0));
        let planner = builder(120.0)
            .router(Recording { last_k: Arc::clone(&last_k) })
            .build()
            .unwrap();

        let plan = planner.plan(&EvacuationRequest::new("A", "C").k(50));
        assert_eq!(last_k.load(Ordering::SeqCst), 5);
        assert!(plan.routes.is_empty());

        planner.plan(&EvacuationRequest::new("A", "C"));
        assert_eq!(last_k.load(Ordering::SeqCst), 3);
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn request_fields_default() {
        let req: EvacuationRequest = serde_json::from_str(r#"{"start":"A","end":"C"}"#).unwrap();
        assert_eq!(req, EvacuationRequest::new("A", "C"));

        let req: EvacuationRequest =
            serde_json::from_str(r#"{"start":"A","end":"C","blocked_types":["flood"],"k":2}"#).unwrap();
        assert_eq!(req.blocked_types, ["flood"]);
        assert_eq!(req.k, Some(2));
    }

    #[test]
    fn plan_serializes() {
        let planner = builder(120.0).build().unwrap();
        let plan = planner.plan(&EvacuationRequest::new("A", "C"));
        let v = serde_json::to_value(&plan).unwrap();
        assert_eq!(v["routes"][0]["path"], serde_json::json!(["A", "B", "C"]));
        assert_eq!(v["district_count"], 3);
    }
}
