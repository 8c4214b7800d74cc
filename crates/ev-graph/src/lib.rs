//! `ev-graph`: district adjacency graph and its enrichment pipeline.
//!
//! # Pipeline
//!
//! ```text
//! build_graph ──▶ enrich (in place) ──▶ reweight (new copy) ──▶ routing
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`graph`]     | `DistrictGraph` (CSR + R-tree), `DistrictGraphBuilder`      |
//! | [`adjacency`] | `build_graph`: proximity edges from geocoded districts     |
//! | [`enrich`]    | `enrich`, `EnrichReport`                                    |
//! | [`filter`]    | `reweight`, `ReweightOptions`                               |
//! | [`source`]    | Collaborator traits: `Geocoder`, `PrecipitationSource`, `SeismicSource` |
//! | [`error`]     | `SourceError`, `SourceResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Runs per-district hazard fetches on Rayon's thread pool.  |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `EnrichReport`.      |

pub mod adjacency;
pub mod enrich;
pub mod error;
pub mod filter;
pub mod graph;
pub mod source;


pub use adjacency::build_graph;
pub use enrich::{enrich, EnrichReport};
pub use error::{SourceError, SourceResult};
pub use filter::{reweight, ReweightOptions};
pub use graph::{District, DistrictGraph, DistrictGraphBuilder, Edge, Positions};
pub use source::{Geocoder, PrecipitationSource, SeismicSource};
