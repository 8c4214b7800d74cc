//! Live hazard observations attached to a district.

/// Hazard fields of one district.
///
/// All fields may be refreshed any number of times before routing.  Whether a
/// district is *blocked* is never stored here; it is derived from
/// `precipitation_24h` by the risk scorer.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hazard {
    /// Total precipitation over the last 24 hours, millimetres.
    pub precipitation_24h: f64,
    /// Largest seismic magnitude observed nearby; `0.0` means none or unknown.
    pub seismic_magnitude: f64,
    /// Free-text hazard classification, e.g. `"flood"`.  Empty by default.
    pub disaster_type: String,
}

impl Hazard {
    /// `true` if no hazard has been observed.
    pub fn is_quiet(&self) -> bool {
        self.precipitation_24h == 0.0
            && self.seismic_magnitude == 0.0
            && self.disaster_type.is_empty()
    }
}
