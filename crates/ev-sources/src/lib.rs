//! `ev-sources`: data collaborators for the evacuation pipeline.
//!
//! The graph pipeline only sees the traits in [`ev_graph::source`]; this
//! crate supplies concrete, offline-capable implementations and the cache
//! that sits in front of slow upstream feeds.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                   |
//! |-------------------|------------------------------------------------------------|
//! | [`cache`]         | `KvStore` (`exists`/`get`/`set`), `MemoryStore`            |
//! | [`districts`]     | Built-in district table with fallback centre coordinates   |
//! | [`geocode`]       | `TableGeocoder`, `FallbackGeocoder`, `CachedGeocoder`      |
//! | [`precipitation`] | `PrecipitationTable`, `CachedPrecipitation`                |
//! | [`seismic`]       | `QuakeEvent`, `QuakeCatalog`                               |
//! | [`shelters`]      | `Shelter`, proximity dedup, nearest-shelter ranking        |
//! | [`loader`]        | CSV loaders for all of the above                           |
//!
//! Caches never evict: a value stored once is served for the life of the
//! store.  Only successful lookups are stored.

pub mod cache;
pub mod districts;
pub mod geocode;
pub mod loader;
pub mod precipitation;
pub mod seismic;
pub mod shelters;

#[cfg(test)]
mod tests;

pub use cache::{KvStore, MemoryStore};
pub use districts::{district_names, fallback_coord, DISTRICTS};
pub use geocode::{CachedGeocoder, FallbackGeocoder, TableGeocoder};
pub use loader::{
    load_districts_csv, load_districts_reader, load_precipitation_csv, load_precipitation_reader,
    load_quakes_csv, load_quakes_reader, load_shelters_csv, load_shelters_reader,
};
pub use precipitation::{CachedPrecipitation, PrecipitationTable};
pub use seismic::{QuakeCatalog, QuakeEvent};
pub use shelters::{dedup_by_proximity, fallback_shelters, rank_nearest, RankedShelter, Shelter};

pub use ev_graph::{SourceError, SourceResult};
