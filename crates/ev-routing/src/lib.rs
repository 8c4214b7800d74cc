//! `ev-routing`: ordered loopless shortest paths between two districts.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`route`]    | `Route`: district names, cost, risk-node count             |
//! | [`router`]   | `Router` trait, `YenRouter`, `find_k_routes`                |
//! | [`dijkstra`] | Single-pair Dijkstra with banned districts and edges        |
//!
//! # Ordering
//!
//! Routes come out in non-decreasing cost (rounded to 2 decimals).  Routes
//! with equal rounded cost are ordered by fewer risk nodes, then fewer hops,
//! then the lexicographic sequence of `DistrictId`s.  Enumeration stops
//! after `k` accepted paths; a tie at the k-th cost is settled among the
//! candidates generated so far.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                          |
//! |---------|-------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Route`.    |

pub mod dijkstra;
pub mod route;
pub mod router;


pub use route::Route;
pub use router::{find_k_routes, Router, YenRouter};
