//! Auvo field-service provider
//!
//! Auth is a login handshake: the API key and token are exchanged for a
//! short-lived bearer token. Listings are plain REST GETs with page and
//! pageSize query parameters. The free-text `search` parameter is
//! forwarded, but the platform applies it inconsistently across accounts,
//! which is exactly why the engine re-filters every page locally.

use crate::endpoint::{EndpointDescriptor, Envelope, FieldMap};
use crate::error::ScanError;
use crate::providers::{validate_base_url, AuthContext, PageFetch, Provider};
use crate::types::Credentials;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

/// Production API base
const AUVO_BASE_URL: &str = "https://api.auvo.com.br/v2";

/// The asset listings Auvo serves with the same record shape
const ASSET_ENDPOINTS: &[&str] = &["equipments", "products", "materials"];

/// Auvo field-service platform
pub struct AuvoProvider {
    base: String,
}

impl AuvoProvider {
    /// Provider pointed at the production API
    pub fn new() -> Self {
        Self {
            base: AUVO_BASE_URL.to_string(),
        }
    }

    /// Provider pointed at a different server, e.g. a test double
    pub fn with_base_url(base: impl AsRef<str>) -> Result<Self, ScanError> {
        Ok(Self {
            base: validate_base_url(base.as_ref())?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }
}

impl Default for AuvoProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the access token out of a login body.
///
/// The token lives under `result.accessToken`; a `result` of any other
/// shape means the login did not produce a usable session.
fn access_token(body: &Value) -> Option<String> {
    body.get("result")?
        .get("accessToken")?
        .as_str()
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl Provider for AuvoProvider {
    fn name(&self) -> &'static str {
        "auvo"
    }

    fn endpoints(&self) -> Vec<EndpointDescriptor> {
        ASSET_ENDPOINTS
            .iter()
            .map(|name| asset_endpoint(name))
            .collect()
    }

    fn default_endpoint(&self) -> EndpointDescriptor {
        asset_endpoint("equipments")
    }

    async fn authenticate(
        &self,
        client: &reqwest::Client,
        credentials: &Credentials,
    ) -> Result<AuthContext, ScanError> {
        credentials.validate()?;

        let response = client
            .post(self.url("login"))
            .json(&json!({
                "apiKey": credentials.key,
                "apiToken": credentials.secret,
            }))
            .send()
            .await
            .map_err(ScanError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScanError::Auth {
                message: format!("login rejected (HTTP {}): {}", status.as_u16(), body.trim()),
            });
        }

        let body: Value = response.json().await.map_err(|e| ScanError::InvalidResponse {
            message: format!("login response: {e}"),
        })?;

        match access_token(&body) {
            Some(token) => {
                debug!("auvo login succeeded");
                Ok(AuthContext::Bearer(token))
            }
            None => Err(ScanError::Auth {
                message: "login answered without an access token".to_string(),
            }),
        }
    }

    async fn fetch_page(
        &self,
        client: &reqwest::Client,
        auth: &AuthContext,
        endpoint: &EndpointDescriptor,
        page: u32,
        page_size: u32,
        hint: &str,
    ) -> Result<PageFetch, ScanError> {
        let mut request = client.get(self.url(&endpoint.path)).query(&[
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ]);

        // Best-effort server-side narrowing; never trusted.
        let hint = hint.trim();
        if !hint.is_empty() {
            request = request.query(&[("search", hint)]);
        }

        if let AuthContext::Bearer(token) = auth {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ScanError::from_reqwest)?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Ok(PageFetch::Failed {
                status: status.as_u16(),
                message: message.trim().to_string(),
            });
        }

        let body: Value = response.json().await.map_err(|e| ScanError::InvalidResponse {
            message: format!("listing response: {e}"),
        })?;

        Ok(PageFetch::Records(
            endpoint.envelope.extract(&body).unwrap_or_default(),
        ))
    }
}

/// Descriptor for one of the Auvo asset listings.
///
/// The three resources share a record shape, so one table covers them and
/// they differ only by path.
fn asset_endpoint(name: &str) -> EndpointDescriptor {
    EndpointDescriptor {
        name: name.to_string(),
        path: name.to_string(),
        call: None,
        envelope: Envelope::new(["result.entityList", "result"]),
        search_fields: vec![
            "name".to_string(),
            "description".to_string(),
            "identifier".to_string(),
        ],
        fields: FieldMap {
            id: vec!["id".to_string()],
            name: vec!["name".to_string(), "description".to_string()],
            code: vec!["identifier".to_string()],
            description: vec!["description".to_string()],
            quantity: vec!["stockQuantity".to_string(), "amount".to_string()],
            price: vec![],
        },
    }
}
