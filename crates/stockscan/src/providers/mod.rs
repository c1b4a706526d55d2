//! Provider system for the remote inventory platforms
//!
//! Design: each provider owns one platform's authentication model and
//! request/response conventions. The scan engine stays platform-agnostic
//! and talks to providers only through the [`Provider`] trait.

mod auvo;
mod omie;

pub use auvo::AuvoProvider;
pub use omie::{FaultKind, FaultRules, OmieProvider};

use crate::endpoint::EndpointDescriptor;
use crate::error::ScanError;
use crate::types::{Credentials, ProductDetail, RawRecord};
use async_trait::async_trait;
use url::Url;

/// Authentication material attached to page requests.
///
/// Two models exist across the platforms: a short-lived bearer token
/// obtained from a login handshake, and credentials embedded directly in
/// every request body.
#[derive(Debug, Clone)]
pub enum AuthContext {
    /// Token from a login call, sent as an Authorization header
    Bearer(String),
    /// No handshake; these credentials ride inside each request
    Inline(Credentials),
}

/// One page request's result, as the provider classified it.
#[derive(Debug)]
pub enum PageFetch {
    /// Records extracted from the envelope; empty means end of data
    Records(Vec<RawRecord>),
    /// The remote reported a past-the-end page as a fault; same as empty
    NoRecords,
    /// The remote refused the listing permission for these credentials
    PermissionDenied(String),
    /// Any other non-success response, surfaced with its status
    Failed { status: u16, message: String },
}

/// A remote inventory platform the engine can scan.
///
/// Implementations translate the generic page protocol into the platform's
/// own request shapes and classify the responses. They never filter
/// records; that stays in the engine.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Identifier used for CLI selection, the credential store, and logging
    fn name(&self) -> &'static str;

    /// Listing resources this provider knows out of the box
    fn endpoints(&self) -> Vec<EndpointDescriptor>;

    /// The endpoint scanned when the caller names none
    fn default_endpoint(&self) -> EndpointDescriptor;

    /// Resolve credentials into per-request auth material.
    ///
    /// Bearer-token platforms run their login call here; inline platforms
    /// only check the credentials are present.
    async fn authenticate(
        &self,
        client: &reqwest::Client,
        credentials: &Credentials,
    ) -> Result<AuthContext, ScanError>;

    /// Request one page of a listing.
    ///
    /// `hint` is the raw search term, forwarded to platforms that accept a
    /// server-side filter. The engine filters locally either way and never
    /// relies on the hint being honored.
    async fn fetch_page(
        &self,
        client: &reqwest::Client,
        auth: &AuthContext,
        endpoint: &EndpointDescriptor,
        page: u32,
        page_size: u32,
        hint: &str,
    ) -> Result<PageFetch, ScanError>;

    /// Fetch one record by its exact code.
    ///
    /// The default refuses; platforms with a dedicated lookup call
    /// override it.
    async fn lookup(
        &self,
        _client: &reqwest::Client,
        _credentials: &Credentials,
        _code: &str,
    ) -> Result<ProductDetail, ScanError> {
        Err(ScanError::LookupUnsupported {
            provider: self.name(),
        })
    }

    /// Find a built-in endpoint by name.
    fn endpoint(&self, name: &str) -> Option<EndpointDescriptor> {
        self.endpoints().into_iter().find(|e| e.name == name)
    }
}

/// Names accepted by [`provider_by_name`], in presentation order.
pub const PROVIDER_NAMES: &[&str] = &["auvo", "omie"];

/// Look up a built-in provider by its CLI name.
pub fn provider_by_name(name: &str) -> Option<Box<dyn Provider>> {
    match name {
        "auvo" => Some(Box::new(AuvoProvider::new())),
        "omie" => Some(Box::new(OmieProvider::new())),
        _ => None,
    }
}

/// Check that a caller-supplied base URL parses and speaks HTTP(S).
/// Returns it with any trailing slash trimmed.
pub(crate) fn validate_base_url(base: &str) -> Result<String, ScanError> {
    let parsed = Url::parse(base).map_err(|e| ScanError::InvalidBaseUrl(e.to_string()))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ScanError::InvalidBaseUrl(format!(
            "unsupported scheme '{}'",
            parsed.scheme()
        )));
    }
    Ok(base.trim_end_matches('/').to_string())
}
