//! `ev-core`: foundational types for the `rust_evac` routing engine.
//!
//! This crate is a dependency of every other `ev-*` crate.  It has no `ev-*`
//! dependencies and a single required external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `DistrictId`, `EdgeId`                                |
//! | [`geo`]         | `GeoPoint`, great-circle `distance_km`                |
//! | [`hazard`]      | `Hazard`: mutable per-district observations          |
//! | [`config`]      | `GraphConfig`, `RiskConfig`, `EngineConfig`           |
//! | [`error`]       | `EvError`, `EvResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod hazard;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{EngineConfig, GraphConfig, RiskConfig};
pub use error::{EvError, EvResult};
pub use geo::{distance_km, GeoPoint, EARTH_RADIUS_KM};
pub use hazard::Hazard;
pub use ids::{DistrictId, EdgeId};
