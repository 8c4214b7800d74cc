//! Geocoder implementations.

use rustc_hash::FxHashMap;
use tracing::debug;

use ev_core::GeoPoint;
use ev_graph::Geocoder;

use crate::cache::{KvStore, MemoryStore};
use crate::districts::DISTRICTS;

// ── TableGeocoder ─────────────────────────────────────────────────────────────

/// Answers from a fixed name → coordinate table.
#[derive(Clone, Debug, Default)]
pub struct TableGeocoder {
    table: FxHashMap<String, GeoPoint>,
}

impl TableGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in district table.
    pub fn builtin() -> Self {
        DISTRICTS
            .iter()
            .map(|&(name, lat, lon)| (name.to_string(), GeoPoint::new(lat, lon)))
            .collect()
    }

    pub fn insert(&mut self, name: impl Into<String>, pos: GeoPoint) {
        self.table.insert(name.into(), pos);
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl FromIterator<(String, GeoPoint)> for TableGeocoder {
    fn from_iter<I: IntoIterator<Item = (String, GeoPoint)>>(iter: I) -> Self {
        Self { table: iter.into_iter().collect() }
    }
}

impl Geocoder for TableGeocoder {
    fn geocode(&self, name: &str) -> Option<GeoPoint> {
        self.table.get(name).copied()
    }
}

// ── FallbackGeocoder ──────────────────────────────────────────────────────────

/// Tries `primary` first and `fallback` when it cannot resolve a name.
pub struct FallbackGeocoder<P, F> {
    primary:  P,
    fallback: F,
}

impl<P: Geocoder, F: Geocoder> FallbackGeocoder<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: Geocoder, F: Geocoder> Geocoder for FallbackGeocoder<P, F> {
    fn geocode(&self, name: &str) -> Option<GeoPoint> {
        self.primary.geocode(name).or_else(|| {
            debug!(district = name, "primary geocoder missed, trying fallback");
            self.fallback.geocode(name)
        })
    }
}

// ── CachedGeocoder ────────────────────────────────────────────────────────────

/// Memoizes resolved coordinates by district name.  Misses are not cached,
/// so a name that failed once is asked again next time.
pub struct CachedGeocoder<G, S = MemoryStore<String, GeoPoint>> {
    inner: G,
    store: S,
}

impl<G: Geocoder> CachedGeocoder<G> {
    pub fn new(inner: G) -> Self {
        Self { inner, store: MemoryStore::new() }
    }
}

impl<G: Geocoder, S: KvStore<String, GeoPoint>> CachedGeocoder<G, S> {
    /// Wrap `inner` with an externally owned store.
    pub fn with_store(inner: G, store: S) -> Self {
        Self { inner, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<G: Geocoder, S: KvStore<String, GeoPoint>> Geocoder for CachedGeocoder<G, S> {
    fn geocode(&self, name: &str) -> Option<GeoPoint> {
        let key = name.to_string();
        if let Some(pos) = self.store.get(&key) {
            return Some(pos);
        }
        let pos = self.inner.geocode(name)?;
        self.store.set(key, pos);
        Some(pos)
    }
}
