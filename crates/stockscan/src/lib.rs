//! Stockscan - fetch-and-filter search over inventory platform listings
//!
//! The platforms this crate talks to paginate their listings and apply
//! server-side filters unreliably, so stockscan pulls pages in order,
//! filters them locally over a configured set of record fields, and stops
//! at explicit caps. One [`scan`] call runs one listing endpoint to a
//! terminal [`ScanOutcome`] and always returns the [`ScanSession`]:
//! failures become data, and matches gathered before a failure are kept.
//!
//! ## Provider System
//!
//! Platform specifics live behind the [`Provider`] trait. Each provider
//! owns its authentication model and request shapes; the engine stays
//! platform-agnostic.
//!
//! Built-in providers:
//! - [`AuvoProvider`] - field-service platform; login handshake for a
//!   bearer token, REST listings (`equipments`, `products`, `materials`)
//! - [`OmieProvider`] - ERP platform; key/secret inlined per request,
//!   call-style listings, fault-marker classification, exact-code lookup

mod endpoint;
mod engine;
mod error;
pub mod providers;
mod store;
mod types;

pub use endpoint::{EndpointDescriptor, Envelope, FieldMap};
pub use engine::{lookup, scan};
pub use error::{ScanError, StoreError};
pub use providers::{
    provider_by_name, AuthContext, AuvoProvider, FaultKind, FaultRules, OmieProvider, PageFetch,
    Provider, PROVIDER_NAMES,
};
pub use store::{CredentialSource, CredentialStore, StoreFile, StoredEntry};
pub use types::{
    Credentials, ProductDetail, RawRecord, Record, ScanLimits, ScanOutcome, ScanQuery, ScanSession,
};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "Stockscan/0.1";
