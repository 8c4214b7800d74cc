//! `ev-plan`: end-to-end evacuation planning.
//!
//! # Per-request pipeline
//!
//! ```text
//! plan(request):
//!   ① Build    : geocode districts, connect pairs within the threshold.
//!   ② Annotate : attach reported disaster types to their districts.
//!   ③ Enrich   : fetch precipitation and seismic magnitude per district
//!                 (parallel with the `parallel` feature).
//!   ④ Reweight : penalise risky and blocked-type districts; optionally
//!                 drop blocked ones (start/end always kept).
//!   ⑤ Route    : top-k loopless routes via the configured `Router`.
//!   ⑥ Shelters : nearest shelters to the destination.
//! ```
//!
//! Nothing is carried between requests except what the collaborators cache
//! themselves.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Runs the enrichment stage on Rayon's thread pool.         |
//! | `serde`    | `Deserialize` on requests, `Serialize` on plans.          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ev_core::EngineConfig;
//! use ev_plan::{EvacuationRequest, PlannerBuilder};
//! use ev_sources::{district_names, QuakeCatalog, PrecipitationTable, TableGeocoder};
//!
//! let planner = PlannerBuilder::new(
//!     EngineConfig::default(),
//!     TableGeocoder::builtin(),
//!     PrecipitationTable::new(),
//!     QuakeCatalog::default(),
//! )
//! .districts(district_names().iter().copied())
//! .build()?;
//!
//! let plan = planner.plan(&EvacuationRequest::new("Srinagar", "Jammu").blocked_types(["flood"]));
//! ```

pub mod builder;
pub mod error;
pub mod planner;
pub mod request;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;
pub use error::{PlanError, PlanResult};
pub use planner::EvacuationPlanner;
pub use request::{EvacuationPlan, EvacuationRequest};
