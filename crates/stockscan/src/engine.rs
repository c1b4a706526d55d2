//! The paginated fetch-and-filter scan loop
//!
//! One scan runs one listing endpoint: authenticate, request pages in
//! order, filter each page locally, and stop at the page cap, the end of
//! the data, the match cap, or the first failure. Page requests are
//! strictly sequential; a page must complete before the next goes out.

use crate::endpoint::{record_matches, EndpointDescriptor};
use crate::error::ScanError;
use crate::providers::{PageFetch, Provider};
use crate::types::{Credentials, ProductDetail, Record, ScanOutcome, ScanQuery, ScanSession};
use crate::DEFAULT_USER_AGENT;
use std::time::Duration;
use tracing::{debug, warn};

/// Connection timeout for provider requests
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Total per-request timeout; ERP listing calls crawl on wide pages
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Run one fetch-and-filter scan against a provider endpoint.
///
/// A session always comes back. Failures become its terminal
/// [`ScanOutcome`] and whatever matched before the failure stays in the
/// session, so callers distinguish "nothing matched" from "the scan never
/// saw the data" through the counters and the outcome, not through errors.
pub async fn scan(
    provider: &dyn Provider,
    credentials: &Credentials,
    endpoint: &EndpointDescriptor,
    query: &ScanQuery,
) -> ScanSession {
    let needle = query.term.trim().to_lowercase();
    let limits = query.limits;
    let cap_reached = |count: usize| limits.max_matches.is_some_and(|cap| count >= cap.get());

    let client = match http_client() {
        Ok(client) => client,
        Err(e) => return aborted(ScanOutcome::TransportFailed { message: e.to_string() }),
    };

    let auth = match provider.authenticate(&client, credentials).await {
        Ok(auth) => auth,
        Err(e) => {
            warn!(provider = provider.name(), "authentication failed: {e}");
            return aborted(failure_outcome(e));
        }
    };

    let mut pages_read: u32 = 0;
    let mut records_seen: usize = 0;
    let mut matches: Vec<Record> = Vec::new();
    // Assume the loop runs out of pages; every early exit overwrites this.
    let mut outcome = ScanOutcome::PageLimit;

    for page in 1..=limits.max_pages.get() {
        debug!(provider = provider.name(), endpoint = %endpoint.name, page, "requesting page");

        let fetched = provider
            .fetch_page(
                &client,
                &auth,
                endpoint,
                page,
                limits.page_size.get(),
                &query.term,
            )
            .await;

        match fetched {
            Err(e) => {
                warn!(provider = provider.name(), page, "scan aborted: {e}");
                outcome = failure_outcome(e);
                break;
            }
            Ok(PageFetch::PermissionDenied(message)) => {
                warn!(provider = provider.name(), page, "listing permission denied");
                outcome = ScanOutcome::AuthFailed { message };
                break;
            }
            Ok(PageFetch::Failed { status, message }) => {
                outcome = ScanOutcome::RemoteError { status, message };
                break;
            }
            Ok(PageFetch::NoRecords) => {
                pages_read += 1;
                outcome = ScanOutcome::EndOfData;
                break;
            }
            Ok(PageFetch::Records(records)) => {
                pages_read += 1;
                if records.is_empty() {
                    outcome = ScanOutcome::EndOfData;
                    break;
                }
                records_seen += records.len();

                for raw in &records {
                    if cap_reached(matches.len()) {
                        break;
                    }
                    if record_matches(raw, &endpoint.search_fields, &needle) {
                        matches.push(endpoint.fields.project(raw));
                    }
                }

                debug!(
                    page,
                    page_records = records.len(),
                    matches = matches.len(),
                    "page filtered"
                );

                if cap_reached(matches.len()) {
                    outcome = ScanOutcome::MatchLimit;
                    break;
                }
            }
        }
    }

    debug!(
        provider = provider.name(),
        endpoint = %endpoint.name,
        pages_read,
        records_seen,
        matches = matches.len(),
        "scan finished"
    );

    ScanSession {
        pages_read,
        records_seen,
        matches,
        outcome,
    }
}

/// Fetch one record by exact code through the provider's lookup call.
pub async fn lookup(
    provider: &dyn Provider,
    credentials: &Credentials,
    code: &str,
) -> Result<ProductDetail, ScanError> {
    let client = http_client()?;
    provider.lookup(&client, credentials, code).await
}

/// Session for a scan that never read a page.
fn aborted(outcome: ScanOutcome) -> ScanSession {
    ScanSession {
        pages_read: 0,
        records_seen: 0,
        matches: Vec::new(),
        outcome,
    }
}

/// Map a provider error onto the terminal outcome of a scan.
/// Anything without a clearer home reports as a transport-level abort.
fn failure_outcome(err: ScanError) -> ScanOutcome {
    match err {
        ScanError::Auth { message } => ScanOutcome::AuthFailed { message },
        ScanError::Remote { status, message } => ScanOutcome::RemoteError { status, message },
        ScanError::Transport { message } => ScanOutcome::TransportFailed { message },
        other => ScanOutcome::TransportFailed {
            message: other.to_string(),
        },
    }
}

/// HTTP client shared by every request of one scan
fn http_client() -> Result<reqwest::Client, ScanError> {
    reqwest::Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(ScanError::ClientBuild)
}
