//! Precipitation sources.

use rustc_hash::FxHashMap;

use ev_core::GeoPoint;
use ev_graph::{PrecipitationSource, SourceError, SourceResult};

use crate::cache::{KvStore, MemoryStore};

/// Decimal places used to match coordinates, ~1 m at the equator.
pub const KEY_DECIMALS: u32 = 5;

type CoordKey = (i64, i64);

// ── PrecipitationTable ────────────────────────────────────────────────────────

/// 24-hour totals keyed by coordinate.
///
/// Built from hourly readings: every reading for the same (rounded)
/// coordinate is summed.  Unknown coordinates report
/// [`SourceError::NotFound`].
#[derive(Clone, Debug, Default)]
pub struct PrecipitationTable {
    totals: FxHashMap<CoordKey, f64>,
}

impl PrecipitationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum hourly `(position, millimetres)` readings into 24 h totals.
    pub fn from_hourly<I>(readings: I) -> Self
    where
        I: IntoIterator<Item = (GeoPoint, f64)>,
    {
        let mut t = Self::new();
        for (pos, mm) in readings {
            t.add_reading(pos, mm);
        }
        t
    }

    pub fn add_reading(&mut self, pos: GeoPoint, mm: f64) {
        *self.totals.entry(pos.rounded_key(KEY_DECIMALS)).or_insert(0.0) += mm;
    }

    /// Overwrite the total for `pos`.
    pub fn set_total(&mut self, pos: GeoPoint, mm: f64) {
        self.totals.insert(pos.rounded_key(KEY_DECIMALS), mm);
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

impl PrecipitationSource for PrecipitationTable {
    fn precipitation_24h(&self, pos: GeoPoint) -> SourceResult<f64> {
        self.totals
            .get(&pos.rounded_key(KEY_DECIMALS))
            .copied()
            .ok_or(SourceError::NotFound { lat: pos.lat, lon: pos.lon })
    }
}

// ── CachedPrecipitation ───────────────────────────────────────────────────────

/// Memoizes successful readings by rounded coordinate.
pub struct CachedPrecipitation<P, S = MemoryStore<CoordKey, f64>> {
    inner: P,
    store: S,
}

impl<P: PrecipitationSource> CachedPrecipitation<P> {
    pub fn new(inner: P) -> Self {
        Self { inner, store: MemoryStore::new() }
    }
}

impl<P: PrecipitationSource, S: KvStore<CoordKey, f64>> CachedPrecipitation<P, S> {
    pub fn with_store(inner: P, store: S) -> Self {
        Self { inner, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<P: PrecipitationSource, S: KvStore<CoordKey, f64>> PrecipitationSource for CachedPrecipitation<P, S> {
    fn precipitation_24h(&self, pos: GeoPoint) -> SourceResult<f64> {
        let key = pos.rounded_key(KEY_DECIMALS);
        if let Some(mm) = self.store.get(&key) {
            return Ok(mm);
        }
        let mm = self.inner.precipitation_24h(pos)?;
        self.store.set(key, mm);
        Ok(mm)
    }
}
