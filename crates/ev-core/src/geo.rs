//! Geographic coordinate type and great-circle distance.
//!
//! Districts are tens of kilometres apart and edge weights are compared
//! against a 120 km threshold, so everything here is `f64`.

/// Mean Earth radius used for every distance in the engine.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS-84 geographic coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in kilometres.
    ///
    /// Symmetric and zero for identical points.  Inputs are assumed to be
    /// valid degrees; out-of-range values produce a number, not an error.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        // Clamp guards sqrt(1 - a) against a == 1.0 + ε for antipodal points.
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// Round both components to `decimals` places, returned as integer
    /// fixed-point so the pair can be hashed.  Used as a cache key.
    pub fn rounded_key(self, decimals: u32) -> (i64, i64) {
        let scale = 10f64.powi(decimals as i32);
        ((self.lat * scale).round() as i64, (self.lon * scale).round() as i64)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Free-function form of [`GeoPoint::distance_km`].
#[inline]
pub fn distance_km(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    GeoPoint::new(lat_a, lon_a).distance_km(GeoPoint::new(lat_b, lon_b))
}
