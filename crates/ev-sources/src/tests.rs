//! Unit tests for ev-sources.

#[cfg(test)]
mod cache {
    use crate::{KvStore, MemoryStore};

    #[test]
    fn exists_get_set() {
        let store: MemoryStore<String, f64> = MemoryStore::new();
        assert!(!store.exists(&"k".to_string()));
        assert_eq!(store.get(&"k".to_string()), None);

        store.set("k".into(), 1.5);
        assert!(store.exists(&"k".to_string()));
        assert_eq!(store.get(&"k".to_string()), Some(1.5));
    }

    #[test]
    fn one_entry_per_key() {
        let store: MemoryStore<u32, &str> = MemoryStore::new();
        store.set(1, "a");
        store.set(1, "b");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&1), Some("b"));
        store.clear();
        assert!(store.is_empty());
    }
}

#[cfg(test)]
mod geocoding {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use ev_core::GeoPoint;
    use ev_graph::Geocoder;

    use crate::{district_names, fallback_coord, CachedGeocoder, FallbackGeocoder, KvStore, TableGeocoder};

    struct Counting {
        calls: Arc<AtomicUsize>,
        answer: Option<GeoPoint>,
    }

    impl Geocoder for Counting {
        fn geocode(&self, _name: &str) -> Option<GeoPoint> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer
        }
    }

    #[test]
    fn builtin_table_has_all_districts() {
        let names = district_names();
        assert_eq!(names.len(), 19);
        assert_eq!(names[0], "Anantnag");
        let g = TableGeocoder::builtin();
        assert_eq!(g.len(), 19);
        for n in names {
            assert_eq!(g.geocode(n), fallback_coord(n));
        }
        assert_eq!(g.geocode("Atlantis"), None);
    }

    #[test]
    fn fallback_used_when_primary_misses() {
        let primary = TableGeocoder::from_iter([("Srinagar".to_string(), GeoPoint::new(1.0, 1.0))]);
        let g = FallbackGeocoder::new(primary, TableGeocoder::builtin());
        assert_eq!(g.geocode("Srinagar"), Some(GeoPoint::new(1.0, 1.0)));
        assert_eq!(g.geocode("Jammu"), fallback_coord("Jammu"));
        assert_eq!(g.geocode("Atlantis"), None);
    }

    #[test]
    fn cache_serves_repeat_lookups() {
        let calls = Arc::new(AtomicUsize::new(0));
        let inner = Counting { calls: Arc::clone(&calls), answer: Some(GeoPoint::new(2.0, 3.0)) };
        let g = CachedGeocoder::new(inner);
        assert_eq!(g.geocode("X"), Some(GeoPoint::new(2.0, 3.0)));
        assert_eq!(g.geocode("X"), Some(GeoPoint::new(2.0, 3.0)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(g.store().exists(&"X".to_string()));
    }

    #[test]
    fn misses_are_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let inner = Counting { calls: Arc::clone(&calls), answer: None };
        let g = CachedGeocoder::new(inner);
        assert_eq!(g.geocode("X"), None);
        assert_eq!(g.geocode("X"), None);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(g.store().is_empty());
    }
}

#[cfg(test)]
mod precipitation {
    use ev_core::GeoPoint;
    use ev_graph::{PrecipitationSource, SourceError, SourceResult};

    use crate::{CachedPrecipitation, KvStore, PrecipitationTable};

    #[test]
    fn hourly_readings_are_summed() {
        let p = GeoPoint::new(34.0837, 74.7973);
        let t = PrecipitationTable::from_hourly([(p, 10.0), (p, 2.5), (GeoPoint::new(0.0, 0.0), 1.0)]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.precipitation_24h(p).unwrap(), 12.5);
        // Rounded to 5 decimals: tiny jitter still matches.
        assert_eq!(t.precipitation_24h(GeoPoint::new(34.083_701, 74.797_299)).unwrap(), 12.5);
    }

    #[test]
    fn unknown_coordinate_is_not_found() {
        let t = PrecipitationTable::new();
        let err = t.precipitation_24h(GeoPoint::new(1.0, 1.0)).unwrap_err();
        assert!(matches!(err, SourceError::NotFound { .. }));
    }

    #[test]
    fn cached_wrapper_only_stores_success() {
        let p = GeoPoint::new(5.0, 5.0);
        let mut t = PrecipitationTable::new();
        t.set_total(p, 80.0);
        let cached = CachedPrecipitation::new(t);
        assert_eq!(cached.precipitation_24h(p).unwrap(), 80.0);
        assert!(cached.store().exists(&p.rounded_key(5)));
        assert!(cached.precipitation_24h(GeoPoint::new(6.0, 6.0)).is_err());
        assert_eq!(cached.store().len(), 1);
    }

    #[test]
    fn cached_wrapper_accepts_closures() {
        let flaky = |_: GeoPoint| -> SourceResult<f64> { Ok(7.0) };
        let cached = CachedPrecipitation::new(flaky);
        assert_eq!(cached.precipitation_24h(GeoPoint::new(1.0, 2.0)).unwrap(), 7.0);
    }
}

#[cfg(test)]
mod seismic {
    use ev_core::GeoPoint;
    use ev_graph::SeismicSource;

    use crate::{QuakeCatalog, QuakeEvent};

    fn catalog() -> QuakeCatalog {
        QuakeCatalog::new(vec![
            QuakeEvent { pos: GeoPoint::new(0.0, 0.5), magnitude: Some(4.1) },  // ~56 km
            QuakeEvent { pos: GeoPoint::new(0.0, 1.2), magnitude: Some(6.3) },  // ~133 km
            QuakeEvent { pos: GeoPoint::new(0.0, 3.0), magnitude: Some(7.9) },  // ~334 km
            QuakeEvent { pos: GeoPoint::new(0.0, 0.1), magnitude: None },
        ])
    }

    #[test]
    fn max_within_radius() {
        let c = catalog();
        let origin = GeoPoint::new(0.0, 0.0);
        assert_eq!(c.max_magnitude_near(origin, 150.0), 6.3);
        assert_eq!(c.max_magnitude_near(origin, 100.0), 4.1);
        assert_eq!(c.max_magnitude_near(origin, 10.0), 0.0);
    }

    #[test]
    fn trait_matches_inherent() {
        let c = catalog();
        let origin = GeoPoint::new(0.0, 0.0);
        let via_trait = SeismicSource::max_magnitude_near(&c, origin, 150.0).unwrap();
        assert_eq!(via_trait, 6.3);
    }

    #[test]
    fn empty_catalog_is_zero() {
        assert_eq!(QuakeCatalog::default().max_magnitude_near(GeoPoint::new(0.0, 0.0), 1e6), 0.0);
    }
}

#[cfg(test)]
mod shelters {
    use ev_core::GeoPoint;

    use crate::{dedup_by_proximity, fallback_shelters, rank_nearest, Shelter};

    fn shelter(name: &str, lat: f64, lon: f64) -> Shelter {
        Shelter { name: name.into(), kind: "shelter".into(), pos: GeoPoint::new(lat, lon), capacity: None }
    }

    #[test]
    fn dedup_merges_close_entries() {
        let out = dedup_by_proximity(vec![
            shelter("A", 34.0, 74.0),
            shelter("A-annex", 34.001, 74.0), // ~111 m away
            shelter("B", 34.01, 74.0),        // ~1.1 km away
        ]);
        let names: Vec<_> = out.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn ranks_nearest_first_and_rounds() {
        let list = vec![shelter("far", 0.0, 2.0), shelter("near", 0.0, 0.5), shelter("mid", 0.0, 1.0)];
        let ranked = rank_nearest(GeoPoint::new(0.0, 0.0), &list, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].shelter.name, "near");
        assert_eq!(ranked[1].shelter.name, "mid");
        assert_eq!(ranked[1].distance_km, 111.19);
    }

    #[test]
    fn fallback_list() {
        let list = fallback_shelters();
        assert_eq!(list.len(), 3);
        let srinagar = GeoPoint::new(34.0837, 74.7973);
        let ranked = rank_nearest(srinagar, &list, 1);
        assert_eq!(ranked[0].shelter.name, "Srinagar Emergency Shelter A");
        assert!(ranked[0].distance_km < 1.0);
    }
}

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use ev_core::GeoPoint;
    use ev_graph::{Geocoder, PrecipitationSource, SourceError};

    use crate::{
        load_districts_reader, load_precipitation_reader, load_quakes_reader, load_shelters_csv,
        load_shelters_reader,
    };

    #[test]
    fn districts() {
        let csv = "name,lat,lon\nSrinagar,34.0837,74.7973\nJammu, 32.7266 ,74.8570\n";
        let (names, geocoder) = load_districts_reader(Cursor::new(csv)).unwrap();
        assert_eq!(names, ["Srinagar", "Jammu"]);
        assert_eq!(geocoder.geocode("Jammu"), Some(GeoPoint::new(32.7266, 74.8570)));
    }

    #[test]
    fn precipitation_rows_sum() {
        let csv = "lat,lon,precipitation_mm\n1.0,2.0,4.0\n1.0,2.0,6.5\n";
        let t = load_precipitation_reader(Cursor::new(csv)).unwrap();
        assert_eq!(t.precipitation_24h(GeoPoint::new(1.0, 2.0)).unwrap(), 10.5);
    }

    #[test]
    fn quakes_with_missing_magnitude() {
        let csv = "lat,lon,magnitude\n34.1,74.6,5.2\n33.9,75.0,\n";
        let c = load_quakes_reader(Cursor::new(csv)).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.events()[1].magnitude, None);
        assert_eq!(c.max_magnitude_near(GeoPoint::new(34.0, 74.7), 150.0), 5.2);
    }

    #[test]
    fn shelters_with_optional_capacity() {
        let csv = "name,kind,lat,lon,capacity\nDistrict Hospital,hospital,33.7,75.1,\nShelter,shelter,34.0,74.8,120\n";
        let s = load_shelters_reader(Cursor::new(csv)).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].kind, "hospital");
        assert_eq!(s[0].capacity, None);
        assert_eq!(s[1].capacity, Some(120));
    }

    #[test]
    fn bad_number_is_parse_error() {
        let csv = "lat,lon,magnitude\nnorth,74.6,5.2\n";
        assert!(matches!(load_quakes_reader(Cursor::new(csv)), Err(SourceError::Parse(_))));
    }

    #[test]
    fn from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "name,kind,lat,lon,capacity").unwrap();
        writeln!(f, "Police Lines,police,32.73,74.86,").unwrap();
        let s = load_shelters_csv(f.path()).unwrap();
        assert_eq!(s[0].name, "Police Lines");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_shelters_csv(std::path::Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }
}
