//! Hazard enrichment: attach live observations to every district.
//!
//! Each district gets two independent fetches.  A failed or nonsensical
//! reading (error, NaN, negative) is logged and replaced by `0.0`; it never
//! aborts enrichment of other fields or other districts.  Topology is never
//! touched and re-running with identical sources yields identical state.

use tracing::{debug, warn};

use ev_core::{GeoPoint, GraphConfig};

use crate::graph::{District, DistrictGraph};
use crate::source::{PrecipitationSource, SeismicSource};
use crate::SourceResult;

/// Outcome of one enrichment pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnrichReport {
    pub districts: usize,
    /// Districts whose precipitation fell back to `0.0`.
    pub precipitation_failures: usize,
    /// Districts whose seismic magnitude fell back to `0.0`.
    pub seismic_failures: usize,
}

impl EnrichReport {
    pub fn is_complete(&self) -> bool {
        self.precipitation_failures == 0 && self.seismic_failures == 0
    }
}

/// Refresh `precipitation_24h` and `seismic_magnitude` of every district in
/// place.  `disaster_type` is left as is.
pub fn enrich<P, S>(
    graph: &mut DistrictGraph,
    precipitation: &P,
    seismic: &S,
    config: &GraphConfig,
) -> EnrichReport
where
    P: PrecipitationSource + ?Sized,
    S: SeismicSource + ?Sized,
{
    let radius_km = config.seismic_radius_km;
    let districts = graph.districts_mut_slice();

    #[cfg(feature = "parallel")]
    let outcomes: Vec<(bool, bool)> = {
        use rayon::prelude::*;
        districts
            .par_iter_mut()
            .map(|d| enrich_one(d, precipitation, seismic, radius_km))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<(bool, bool)> = districts
        .iter_mut()
        .map(|d| enrich_one(d, precipitation, seismic, radius_km))
        .collect();

    let report = EnrichReport {
        districts:              outcomes.len(),
        precipitation_failures: outcomes.iter().filter(|o| !o.0).count(),
        seismic_failures:       outcomes.iter().filter(|o| !o.1).count(),
    };
    debug!(?report, "hazard enrichment finished");
    report
}

/// Returns `(precipitation_ok, seismic_ok)`.
fn enrich_one<P, S>(district: &mut District, precipitation: &P, seismic: &S, radius_km: f64) -> (bool, bool)
where
    P: PrecipitationSource + ?Sized,
    S: SeismicSource + ?Sized,
{
    let pos: GeoPoint = district.pos();

    let (precip, precip_ok) =
        reading_or_zero("precipitation", district.name(), precipitation.precipitation_24h(pos));
    let (mag, mag_ok) =
        reading_or_zero("seismic", district.name(), seismic.max_magnitude_near(pos, radius_km));

    district.hazard.precipitation_24h = precip;
    district.hazard.seismic_magnitude = mag;
    (precip_ok, mag_ok)
}

fn reading_or_zero(kind: &'static str, district: &str, result: SourceResult<f64>) -> (f64, bool) {
    match result {
        Ok(v) if v.is_finite() && v >= 0.0 => (v, true),
        Ok(v) => {
            warn!(district, kind, value = v, "invalid hazard reading, using 0.0");
            (0.0, false)
        }
        Err(err) => {
            warn!(district, kind, %err, "hazard fetch failed, using 0.0");
            (0.0, false)
        }
    }
}
