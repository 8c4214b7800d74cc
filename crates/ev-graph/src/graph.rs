//! District graph representation and builder.
//!
//! # Data layout
//!
//! Edges are undirected and stored once in `edges`, indexed by `EdgeId`.
//! Per-district incidence uses **Compressed Sparse Row (CSR)** format: the
//! edges touching `DistrictId n` occupy
//!
//! ```text
//! incident[ incident_start[n] .. incident_start[n+1] ]
//! ```
//!
//! Each entry carries the neighbouring district alongside the `EdgeId`, so a
//! shortest-path inner loop is a contiguous scan with no edge lookup.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps a coordinate to the nearest `DistrictId`.
//! Entries are points on the unit sphere, where straight-line (chord)
//! distance orders candidates exactly as great-circle distance does.
//! Used to snap arbitrary coordinates (shelters, user positions) to a
//! district.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::{FxHashMap, FxHashSet};

use ev_core::{DistrictId, EdgeId, GeoPoint, Hazard};

/// Name → coordinate lookup for every district that made it into a graph.
pub type Positions = FxHashMap<String, GeoPoint>;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct DistrictEntry {
    point: [f64; 3], // unit-sphere xyz
    id: DistrictId,
}

impl RTreeObject for DistrictEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for DistrictEntry {
    /// Squared chord length between unit vectors.
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

fn unit_vector(pos: GeoPoint) -> [f64; 3] {
    let (lat, lon) = (pos.lat.to_radians(), pos.lon.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

// ── District & Edge ───────────────────────────────────────────────────────────

/// A district node.
///
/// Name and position are fixed once the district is added; only
/// [`hazard`](Self::hazard) may change afterwards.
#[derive(Clone, Debug)]
pub struct District {
    name: String,
    pos:  GeoPoint,
    /// Live observations, refreshed by enrichment.
    pub hazard: Hazard,
}

impl District {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pos(&self) -> GeoPoint {
        self.pos
    }
}

/// An undirected edge between two districts.
#[derive(Clone, Debug)]
pub struct Edge {
    a: DistrictId,
    b: DistrictId,
    base_distance_km: f64,
    weight: f64,
}

impl Edge {
    /// Endpoints in insertion order.
    pub fn endpoints(&self) -> (DistrictId, DistrictId) {
        (self.a, self.b)
    }

    /// Great-circle distance between the endpoints, fixed at construction.
    pub fn base_distance_km(&self) -> f64 {
        self.base_distance_km
    }

    /// Routing cost.  Equal to `base_distance_km` until reweighted.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// The endpoint that is not `from`.
    #[inline]
    pub fn other(&self, from: DistrictId) -> DistrictId {
        if self.a == from { self.b } else { self.a }
    }
}

// ── DistrictGraph ─────────────────────────────────────────────────────────────

/// Undirected district adjacency graph plus a spatial index.
///
/// Do not construct directly; use [`DistrictGraphBuilder`] or
/// [`build_graph`](crate::build_graph).  Cloning is a deep copy, which is how
/// the risk filter leaves its input untouched.
#[derive(Clone)]
pub struct DistrictGraph {
    districts: Vec<District>,
    edges:     Vec<Edge>,

    // ── CSR incidence ─────────────────────────────────────────────────────
    /// Length = `district_count + 1`.
    incident_start: Vec<u32>,
    /// `(edge, neighbour)` pairs grouped by district.
    incident: Vec<(EdgeId, DistrictId)>,

    by_name:     FxHashMap<String, DistrictId>,
    spatial_idx: RTree<DistrictEntry>,
}

impl DistrictGraph {
    /// Construct a graph with no districts or edges.
    pub fn empty() -> Self {
        DistrictGraphBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn district_count(&self) -> usize {
        self.districts.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    // ── Districts ─────────────────────────────────────────────────────────

    pub fn district(&self, id: DistrictId) -> &District {
        &self.districts[id.index()]
    }

    /// Mutable access for hazard refreshes.  Name and position stay fixed
    /// because `District` exposes no setters for them.
    pub fn district_mut(&mut self, id: DistrictId) -> &mut District {
        &mut self.districts[id.index()]
    }

    pub fn id_of(&self, name: &str) -> Option<DistrictId> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn district_by_name(&self, name: &str) -> Option<&District> {
        self.id_of(name).map(|id| self.district(id))
    }

    pub fn district_by_name_mut(&mut self, name: &str) -> Option<&mut District> {
        let id = self.id_of(name)?;
        Some(self.district_mut(id))
    }

    /// All districts with their ids, in insertion order.
    pub fn districts(&self) -> impl Iterator<Item = (DistrictId, &District)> + '_ {
        self.districts
            .iter()
            .enumerate()
            .map(|(i, d)| (DistrictId(i as u32), d))
    }

    pub(crate) fn districts_mut_slice(&mut self) -> &mut [District] {
        &mut self.districts
    }

    /// Name → coordinate lookup for downstream consumers (polylines,
    /// shelter ranking).
    pub fn positions(&self) -> Positions {
        self.districts
            .iter()
            .map(|d| (d.name.clone(), d.pos))
            .collect()
    }

    // ── Edges ─────────────────────────────────────────────────────────────

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeId(i as u32), e))
    }

    pub(crate) fn set_weight(&mut self, id: EdgeId, weight: f64) {
        self.edges[id.index()].weight = weight;
    }

    /// `(edge, neighbour)` pairs for every edge touching `district`.
    ///
    /// This is a contiguous slice: no heap allocation.
    #[inline]
    pub fn neighbours(&self, district: DistrictId) -> &[(EdgeId, DistrictId)] {
        let start = self.incident_start[district.index()] as usize;
        let end   = self.incident_start[district.index() + 1] as usize;
        &self.incident[start..end]
    }

    #[inline]
    pub fn degree(&self, district: DistrictId) -> usize {
        self.neighbours(district).len()
    }

    /// The edge joining `a` and `b`, if they are adjacent.
    pub fn edge_between(&self, a: DistrictId, b: DistrictId) -> Option<EdgeId> {
        self.neighbours(a)
            .iter()
            .find(|&&(_, n)| n == b)
            .map(|&(e, _)| e)
    }

    /// Sum of edge weights along consecutive districts of `path`.
    ///
    /// Returns `None` if two consecutive districts are not adjacent.
    pub fn path_weight(&self, path: &[DistrictId]) -> Option<f64> {
        path.windows(2).try_fold(0.0, |acc, w| {
            self.edge_between(w[0], w[1]).map(|e| acc + self.edge(e).weight)
        })
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The district whose centre is nearest to `pos` by great-circle distance.
    ///
    /// Returns `None` only if the graph has no districts.
    pub fn nearest_district(&self, pos: GeoPoint) -> Option<DistrictId> {
        self.spatial_idx
            .nearest_neighbor(&unit_vector(pos))
            .map(|e| e.id)
    }
}

// ── DistrictGraphBuilder ──────────────────────────────────────────────────────

/// Construct a [`DistrictGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use ev_core::GeoPoint;
/// use ev_graph::DistrictGraphBuilder;
///
/// let mut b = DistrictGraphBuilder::new();
/// let a = b.add_district("Srinagar", GeoPoint::new(34.0837, 74.7973));
/// let c = b.add_district("Budgam", GeoPoint::new(34.0159, 74.7644));
/// b.add_edge(a, c, 8.0);
/// let g = b.build();
/// assert_eq!(g.district_count(), 2);
/// assert_eq!(g.edge_count(), 1); // undirected, stored once
/// ```
pub struct DistrictGraphBuilder {
    districts: Vec<District>,
    by_name:   FxHashMap<String, DistrictId>,
    edges:     Vec<Edge>,
    seen:      FxHashSet<(DistrictId, DistrictId)>,
}

impl DistrictGraphBuilder {
    pub fn new() -> Self {
        Self {
            districts: Vec::new(),
            by_name:   FxHashMap::default(),
            edges:     Vec::new(),
            seen:      FxHashSet::default(),
        }
    }

    /// Add a district with quiet hazard fields and return its id.
    ///
    /// A name that was already added keeps its first position; the existing
    /// id is returned.
    pub fn add_district(&mut self, name: impl Into<String>, pos: GeoPoint) -> DistrictId {
        self.add_district_with(name, pos, Hazard::default())
    }

    /// Like [`add_district`](Self::add_district) with initial hazard fields.
    pub fn add_district_with(
        &mut self,
        name: impl Into<String>,
        pos: GeoPoint,
        hazard: Hazard,
    ) -> DistrictId {
        let name = name.into();
        if let Some(&id) = self.by_name.get(&name) {
            return id;
        }
        let id = DistrictId(self.districts.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.districts.push(District { name, pos, hazard });
        id
    }

    /// Add an undirected edge whose weight starts at `base_distance_km`.
    ///
    /// Self-loops and repeated pairs are ignored; returns `false` in that case.
    pub fn add_edge(&mut self, a: DistrictId, b: DistrictId, base_distance_km: f64) -> bool {
        if a == b {
            return false;
        }
        let key = if a < b { (a, b) } else { (b, a) };
        if !self.seen.insert(key) {
            return false;
        }
        self.edges.push(Edge { a, b, base_distance_km, weight: base_distance_km });
        true
    }

    pub fn district_pos(&self, id: DistrictId) -> GeoPoint {
        self.districts[id.index()].pos
    }

    pub fn district_count(&self) -> usize { self.districts.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Consume the builder and produce a [`DistrictGraph`].
    pub fn build(self) -> DistrictGraph {
        let n = self.districts.len();

        // Build CSR row pointer from degrees.
        let mut incident_start = vec![0u32; n + 1];
        for e in &self.edges {
            incident_start[e.a.index() + 1] += 1;
            incident_start[e.b.index() + 1] += 1;
        }
        for i in 1..=n {
            incident_start[i] += incident_start[i - 1];
        }

        // Scatter each edge into both endpoints' rows.
        let mut cursor: Vec<u32> = incident_start[..n].to_vec();
        let mut incident = vec![(EdgeId::INVALID, DistrictId::INVALID); 2 * self.edges.len()];
        for (i, e) in self.edges.iter().enumerate() {
            let id = EdgeId(i as u32);
            incident[cursor[e.a.index()] as usize] = (id, e.b);
            cursor[e.a.index()] += 1;
            incident[cursor[e.b.index()] as usize] = (id, e.a);
            cursor[e.b.index()] += 1;
        }
        debug_assert_eq!(incident_start[n] as usize, incident.len());

        let entries: Vec<DistrictEntry> = self
            .districts
            .iter()
            .enumerate()
            .map(|(i, d)| DistrictEntry {
                point: unit_vector(d.pos),
                id: DistrictId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        DistrictGraph {
            districts: self.districts,
            edges: self.edges,
            incident_start,
            incident,
            by_name: self.by_name,
            spatial_idx,
        }
    }
}

impl Default for DistrictGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
