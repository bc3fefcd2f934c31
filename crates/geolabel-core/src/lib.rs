//! Geographic node labeling
//!
//! Enriches cluster compute nodes with geographic metadata derived
//! from their network address, so operators can schedule workloads by
//! location. One pass per invocation: enumerate nodes, resolve each
//! node's advertised hostname, look the address up in a local
//! geolocation database, and merge the encoded attributes onto the
//! node object as labels.
//!
//! The crate is built around three service traits — [`AddressResolver`],
//! [`GeoLookup`] and [`NodeRegistry`] — with in-memory implementations
//! for testing, plus the pure [`labels::encode`] transformation and the
//! [`Orchestrator`] that drives the pass.

pub mod geodb;
pub mod labels;
pub mod orchestrator;
pub mod registry;
pub mod resolve;
pub mod types;

pub use geodb::{GeoLookup, LookupError, StaticGeoDb};
pub use labels::{encode, LabelSet};
pub use orchestrator::Orchestrator;
pub use registry::{InMemoryRegistry, NodeRegistry, RegistryError};
pub use resolve::{AddressResolver, ResolveError, StaticResolver, SystemResolver};
pub use types::{GeoRecord, NodeIdentity, NodeOutcome, PassSummary, UpdateOutcome};
