//! Core types shared across the scan engine, providers, and CLI

use crate::error::ScanError;
use serde::Serialize;
use std::fmt;
use std::num::{NonZeroU32, NonZeroUsize};

/// Opaque credential pair for a provider.
///
/// The field-service platform calls these an API key and token, the ERP
/// platform an app key and secret. Nothing in the engine looks inside the
/// pair beyond checking both halves are present.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Both halves must be present before any request goes out.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.key.trim().is_empty() || self.secret.trim().is_empty() {
            return Err(ScanError::Auth {
                message: "both an API key and a secret are required".to_string(),
            });
        }
        Ok(())
    }
}

// The secret stays out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

const fn nz_u32(value: u32) -> NonZeroU32 {
    match NonZeroU32::new(value) {
        Some(v) => v,
        None => panic!("limit values are non-zero"),
    }
}

const fn nz_usize(value: usize) -> NonZeroUsize {
    match NonZeroUsize::new(value) {
        Some(v) => v,
        None => panic!("limit values are non-zero"),
    }
}

/// Page and match caps bounding one scan.
///
/// The non-zero types make a zero-page or zero-size scan unrepresentable,
/// so the engine has no invalid-parameter error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLimits {
    /// Hard upper bound on pages requested
    pub max_pages: NonZeroU32,
    /// Records requested per page
    pub page_size: NonZeroU32,
    /// Optional early stop once this many records have matched
    pub max_matches: Option<NonZeroUsize>,
}

impl ScanLimits {
    pub fn new(
        max_pages: NonZeroU32,
        page_size: NonZeroU32,
        max_matches: Option<NonZeroUsize>,
    ) -> Self {
        Self {
            max_pages,
            page_size,
            max_matches,
        }
    }

    /// One page of a hundred, capped at twenty matches. For interactive
    /// "does it exist" checks.
    pub fn quick() -> Self {
        Self::new(nz_u32(1), nz_u32(100), Some(nz_usize(20)))
    }

    /// Ten pages of fifty, capped at a hundred matches.
    pub fn standard() -> Self {
        Self::new(nz_u32(10), nz_u32(50), Some(nz_usize(100)))
    }

    /// Ten wide pages with no match cap. For sweeping large catalogs.
    pub fn deep() -> Self {
        Self::new(nz_u32(10), nz_u32(500), None)
    }
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self::standard()
    }
}

/// One scan's worth of caller input.
#[derive(Debug, Clone)]
pub struct ScanQuery {
    /// Free-text search term; an empty term accepts every record
    pub term: String,
    pub limits: ScanLimits,
}

impl ScanQuery {
    /// Query with the given term and the standard limits.
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            limits: ScanLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ScanLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// A raw record as the remote returned it, before projection.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// A record projected into the fixed display shape.
///
/// Every field is optional; remote schemas differ per endpoint and the
/// projection tables fill in what they can.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Why a scan stopped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// The page cap was reached; the remote may hold more data
    PageLimit,
    /// An empty or absent page marked the end of the listing
    EndOfData,
    /// The match cap filled up mid-scan
    MatchLimit,
    /// Credentials were rejected, at login or by the listing call itself
    AuthFailed { message: String },
    /// A network failure ended the scan early
    TransportFailed { message: String },
    /// The remote answered with a failure status that means a real error
    RemoteError { status: u16, message: String },
}

impl ScanOutcome {
    /// True when the scan ended on a failure rather than a cap or the
    /// natural end of the data.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ScanOutcome::AuthFailed { .. }
                | ScanOutcome::TransportFailed { .. }
                | ScanOutcome::RemoteError { .. }
        )
    }
}

/// Accumulated result of one fetch-and-filter scan.
///
/// A scan always produces a session. Failures land in [`ScanSession::outcome`]
/// and whatever matched before the failure stays in
/// [`ScanSession::matches`].
#[derive(Debug, Clone, Serialize)]
pub struct ScanSession {
    /// Pages successfully read. An empty page counts; a failed request
    /// does not.
    pub pages_read: u32,
    /// Every record read across those pages, matched or not
    pub records_seen: usize,
    /// Matching records in the order the pages delivered them
    pub matches: Vec<Record>,
    /// Terminal condition of the scan
    pub outcome: ScanOutcome,
}

impl ScanSession {
    /// The scan stopped at a cap or on a failure, so the listing may hold
    /// records this session never saw.
    pub fn is_partial(&self) -> bool {
        !matches!(self.outcome, ScanOutcome::EndOfData)
    }

    /// The scan read data normally and nothing matched.
    pub fn is_empty_result(&self) -> bool {
        self.matches.is_empty() && !self.outcome.is_failure()
    }
}

/// One product returned by a provider's exact-code lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ncm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_weight: Option<f64>,
    /// False when the remote flags the product inactive
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_validation() {
        assert!(Credentials::new("k", "s").validate().is_ok());
        assert!(Credentials::new("", "s").validate().is_err());
        assert!(Credentials::new("k", "   ").validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", Credentials::new("app-key", "app-secret"));
        assert!(debug.contains("app-key"));
        assert!(!debug.contains("app-secret"));
    }

    #[test]
    fn test_preset_shapes() {
        let quick = ScanLimits::quick();
        assert_eq!(quick.max_pages.get(), 1);
        assert_eq!(quick.page_size.get(), 100);
        assert_eq!(quick.max_matches.map(NonZeroUsize::get), Some(20));

        let standard = ScanLimits::standard();
        assert_eq!(standard.max_pages.get(), 10);
        assert_eq!(standard.page_size.get(), 50);
        assert_eq!(standard.max_matches.map(NonZeroUsize::get), Some(100));

        let deep = ScanLimits::deep();
        assert_eq!(deep.page_size.get(), 500);
        assert!(deep.max_matches.is_none());
    }

    #[test]
    fn test_session_predicates() {
        let complete = ScanSession {
            pages_read: 2,
            records_seen: 60,
            matches: Vec::new(),
            outcome: ScanOutcome::EndOfData,
        };
        assert!(!complete.is_partial());
        assert!(complete.is_empty_result());

        let capped = ScanSession {
            pages_read: 10,
            records_seen: 500,
            matches: vec![Record::default()],
            outcome: ScanOutcome::PageLimit,
        };
        assert!(capped.is_partial());
        assert!(!capped.is_empty_result());

        let failed = ScanSession {
            pages_read: 1,
            records_seen: 50,
            matches: Vec::new(),
            outcome: ScanOutcome::TransportFailed {
                message: "connection reset".to_string(),
            },
        };
        assert!(failed.is_partial());
        // Zero matches after a failure is not a clean empty result.
        assert!(!failed.is_empty_result());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(ScanOutcome::RemoteError {
            status: 502,
            message: "bad gateway".to_string(),
        })
        .unwrap();
        assert_eq!(json["kind"], "remote_error");
        assert_eq!(json["status"], 502);
    }
}
