//! Emergency shelters: dedup and nearest-first ranking.

use std::cmp::Ordering;

use ev_core::GeoPoint;

/// Shelters closer than this to an already kept shelter are duplicates.
pub const DEDUP_RADIUS_KM: f64 = 0.25;

/// A facility evacuees can head to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Shelter {
    pub name: String,
    /// `shelter`, `hospital`, `police`, `fire_station`, …
    pub kind: String,
    pub pos: GeoPoint,
    pub capacity: Option<u32>,
}

/// A shelter with its distance from a query point.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RankedShelter {
    pub shelter: Shelter,
    /// Great-circle distance, rounded to 2 decimals.
    pub distance_km: f64,
}

/// Drop shelters within [`DEDUP_RADIUS_KM`] of an earlier one.  The first
/// occurrence wins.  O(n²); directories are small.
pub fn dedup_by_proximity(shelters: Vec<Shelter>) -> Vec<Shelter> {
    let mut kept: Vec<Shelter> = Vec::with_capacity(shelters.len());
    for s in shelters {
        if kept.iter().all(|k| k.pos.distance_km(s.pos) >= DEDUP_RADIUS_KM) {
            kept.push(s);
        }
    }
    kept
}

/// The `k` shelters nearest to `origin`, closest first.  Equal distances keep
/// input order.
pub fn rank_nearest(origin: GeoPoint, shelters: &[Shelter], k: usize) -> Vec<RankedShelter> {
    let mut ranked: Vec<(f64, &Shelter)> = shelters
        .iter()
        .map(|s| (origin.distance_km(s.pos), s))
        .collect();
    ranked.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    ranked
        .into_iter()
        .take(k)
        .map(|(d, s)| RankedShelter {
            shelter:     s.clone(),
            distance_km: (d * 100.0).round() / 100.0,
        })
        .collect()
}

/// Built-in shelters used when no directory is available.
pub fn fallback_shelters() -> Vec<Shelter> {
    [
        ("Srinagar Emergency Shelter A", 34.0850, 74.8000, 200),
        ("Baramulla Emergency Shelter",  34.2105, 74.3490, 150),
        ("Anantnag Central Shelter",     33.7335, 75.1500, 180),
    ]
    .into_iter()
    .map(|(name, lat, lon, capacity)| Shelter {
        name:     name.to_string(),
        kind:     "shelter".to_string(),
        pos:      GeoPoint::new(lat, lon),
        capacity: Some(capacity),
    })
    .collect()
}
