//! Routing trait and default Yen's k-shortest-simple-paths implementation.
//!
//! # Pluggability
//!
//! The planner calls routing via the [`Router`] trait, so applications can
//! swap in another path family without touching the pipeline.  The default
//! [`YenRouter`] enumerates loopless paths in non-decreasing cost.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use rustc_hash::FxHashSet;
use tracing::debug;

use ev_core::DistrictId;
use ev_graph::DistrictGraph;
use ev_risk::RiskScorer;

use crate::dijkstra::{shortest_path, Exclusions};
use crate::route::{round_cost, Route};

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable multi-route engine.
///
/// Implementations must be `Send + Sync` so one router can serve concurrent
/// requests, each with its own graph.
pub trait Router: Send + Sync {
    /// Up to `k` loopless routes from `from` to `to`, best first.
    ///
    /// An unreachable destination or `k == 0` yields an empty list; routing
    /// never fails.
    fn routes(&self, graph: &DistrictGraph, from: DistrictId, to: DistrictId, k: usize) -> Vec<Route>;
}

/// Name-based entry point with the default [`YenRouter`].
///
/// Unknown `start` or `end` names are not an error: the result is simply
/// empty, exactly as if no path existed.
pub fn find_k_routes(
    graph: &DistrictGraph,
    start: &str,
    end: &str,
    k: usize,
    scorer: &RiskScorer,
) -> Vec<Route> {
    let (Some(from), Some(to)) = (graph.id_of(start), graph.id_of(end)) else {
        debug!(start, end, "endpoint not in graph, no routes");
        return Vec::new();
    };
    YenRouter::new(scorer.clone()).routes(graph, from, to, k)
}

// ── YenRouter ─────────────────────────────────────────────────────────────────

/// Yen's algorithm over edge weights.
///
/// Holds a [`RiskScorer`] to count risk nodes, which also serves as the first
/// tie-breaker between routes of equal rounded cost.
#[derive(Clone, Debug, Default)]
pub struct YenRouter {
    scorer: RiskScorer,
}

impl YenRouter {
    pub fn new(scorer: RiskScorer) -> Self {
        Self { scorer }
    }
}

impl Router for YenRouter {
    fn routes(&self, graph: &DistrictGraph, from: DistrictId, to: DistrictId, k: usize) -> Vec<Route> {
        if k == 0 {
            return Vec::new();
        }
        let found = yen(graph, from, to, k, &self.scorer);
        debug!(
            from = graph.district(from).name(),
            to = graph.district(to).name(),
            k,
            found = found.len(),
            "routes computed"
        );
        found.into_iter().map(|c| c.into_route(graph)).collect()
    }
}

// ── Yen internals ─────────────────────────────────────────────────────────────

/// A path plus its ordering key.  Field order is the comparison order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
    cost:       OrderedFloat<f64>,
    risk_nodes: usize,
    hops:       usize,
    nodes:      Vec<DistrictId>,
}

impl Candidate {
    fn new(graph: &DistrictGraph, nodes: Vec<DistrictId>, scorer: &RiskScorer) -> Option<Self> {
        let cost = graph.path_weight(&nodes)?;
        let risk_nodes = nodes
            .iter()
            .filter(|&&d| scorer.is_risky(&graph.district(d).hazard))
            .count();
        Some(Self {
            cost: OrderedFloat(round_cost(cost)),
            risk_nodes,
            hops: nodes.len() - 1,
            nodes,
        })
    }

    fn into_route(self, graph: &DistrictGraph) -> Route {
        Route {
            path:       self.nodes.iter().map(|&d| graph.district(d).name().to_string()).collect(),
            cost:       self.cost.0,
            risk_nodes: self.risk_nodes,
        }
    }
}

fn yen(graph: &DistrictGraph, from: DistrictId, to: DistrictId, k: usize, scorer: &RiskScorer) -> Vec<Candidate> {
    let Some((first, _)) = shortest_path(graph, from, to, &Exclusions::none(graph)) else {
        return Vec::new();
    };
    let Some(first) = Candidate::new(graph, first, scorer) else {
        return Vec::new();
    };

    let mut seen: FxHashSet<Vec<DistrictId>> = FxHashSet::default();
    seen.insert(first.nodes.clone());

    // Accepted paths in emission order.
    let mut accepted: Vec<Candidate> = vec![first];
    let mut pending: BinaryHeap<Reverse<Candidate>> = BinaryHeap::new();

    loop {
        let Some(last) = accepted.last() else { break };
        for spur_candidate in spur_paths(graph, last, &accepted, to) {
            if seen.insert(spur_candidate.clone()) {
                if let Some(c) = Candidate::new(graph, spur_candidate, scorer) {
                    pending.push(Reverse(c));
                }
            }
        }

        if accepted.len() >= k {
            break;
        }
        let Some(Reverse(next)) = pending.pop() else { break };
        accepted.push(next);
    }

    // Candidates already generated that tie the k-th cost compete on the
    // secondary order.  No further spurs: the work stays bounded by k.
    if let Some(cutoff) = accepted.get(k - 1).map(|c| c.cost) {
        while pending.peek().is_some_and(|Reverse(c)| c.cost == cutoff) {
            let Some(Reverse(tied)) = pending.pop() else { break };
            accepted.push(tied);
        }
    }

    accepted.sort();
    accepted.truncate(k);
    accepted
}

/// Deviations from `last` at each of its spur nodes.
fn spur_paths(
    graph: &DistrictGraph,
    last: &Candidate,
    accepted: &[Candidate],
    to: DistrictId,
) -> Vec<Vec<DistrictId>> {
    let mut out = Vec::new();

    for i in 0..last.nodes.len().saturating_sub(1) {
        let spur = last.nodes[i];
        let root = &last.nodes[..=i];

        let mut excluded = Exclusions::none(graph);

        // Block the next edge of every accepted path sharing this root.
        for p in accepted {
            if p.nodes.len() > i + 1 && p.nodes[..=i] == *root {
                if let Some(e) = graph.edge_between(p.nodes[i], p.nodes[i + 1]) {
                    excluded.edges.insert(e);
                }
            }
        }
        // Root districts other than the spur stay off-limits (loopless).
        for &d in &root[..i] {
            excluded.districts[d.index()] = true;
        }

        if let Some((spur_path, _)) = shortest_path(graph, spur, to, &excluded) {
            let mut nodes = root[..i].to_vec();
            nodes.extend(spur_path);
            out.push(nodes);
        }
    }
    out
}
