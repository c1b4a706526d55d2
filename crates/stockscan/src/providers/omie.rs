//! Omie ERP provider
//!
//! No login handshake: the app key and secret ride inside every request
//! body, in Omie's call-style POST envelope. The platform reports several
//! non-error conditions as HTTP 500 faults, most notably "no records for
//! page N" past the end of a listing, so fault bodies go through marker
//! rules instead of being trusted as failures.

use crate::endpoint::{number_field, string_field, EndpointDescriptor, Envelope, FieldMap};
use crate::error::ScanError;
use crate::providers::{validate_base_url, AuthContext, PageFetch, Provider};
use crate::types::{Credentials, ProductDetail, RawRecord};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

/// Production API base
const OMIE_BASE_URL: &str = "https://app.omie.com.br/api/v1";

/// Path serving both the listing and the lookup calls
const PRODUCTS_PATH: &str = "geral/produtos/";

/// What a fault body turned out to mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Normal empty page past the end of the listing
    EndOfData,
    /// The credentials lack the permission for this call
    PermissionDenied,
    /// The looked-up code matches nothing
    NotFound,
    /// A real failure
    Failure,
}

/// Marker lists classifying Omie fault messages.
///
/// Matching is lowercase substring over the faultstring. The defaults
/// cover the accented and plain spellings seen in production; accounts
/// localized differently can swap in their own lists.
#[derive(Debug, Clone)]
pub struct FaultRules {
    /// Faults that mean "past the last page"
    pub end_of_data: Vec<String>,
    /// Faults that mean the key cannot run this call
    pub permission: Vec<String>,
    /// Faults that mean an exact-code lookup missed
    pub not_found: Vec<String>,
}

impl Default for FaultRules {
    fn default() -> Self {
        Self {
            end_of_data: vec![
                "não existem registros".to_string(),
                "nao existem registros".to_string(),
            ],
            permission: vec![
                "permissão".to_string(),
                "permissao".to_string(),
                "denied".to_string(),
                "acesso negado".to_string(),
            ],
            not_found: vec![
                "não cadastrado".to_string(),
                "nao cadastrado".to_string(),
                "não encontrado".to_string(),
                "nao encontrado".to_string(),
            ],
        }
    }
}

impl FaultRules {
    /// Classify one fault message.
    pub fn classify(&self, fault: &str) -> FaultKind {
        let lowered = fault.to_lowercase();
        let hit = |markers: &[String]| {
            markers
                .iter()
                .any(|marker| lowered.contains(&marker.to_lowercase()))
        };
        if hit(&self.end_of_data) {
            FaultKind::EndOfData
        } else if hit(&self.permission) {
            FaultKind::PermissionDenied
        } else if hit(&self.not_found) {
            FaultKind::NotFound
        } else {
            FaultKind::Failure
        }
    }
}

/// Omie ERP platform
pub struct OmieProvider {
    base: String,
    fault_rules: FaultRules,
}

impl OmieProvider {
    /// Provider pointed at the production API
    pub fn new() -> Self {
        Self {
            base: OMIE_BASE_URL.to_string(),
            fault_rules: FaultRules::default(),
        }
    }

    /// Provider pointed at a different server, e.g. a test double
    pub fn with_base_url(base: impl AsRef<str>) -> Result<Self, ScanError> {
        Ok(Self {
            base: validate_base_url(base.as_ref())?,
            fault_rules: FaultRules::default(),
        })
    }

    /// Replace the fault classification rules
    pub fn with_fault_rules(mut self, rules: FaultRules) -> Self {
        self.fault_rules = rules;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    /// Omie call envelope: credentials and a single param object
    fn call_body(credentials: &Credentials, call: &str, param: Value) -> Value {
        json!({
            "call": call,
            "app_key": credentials.key,
            "app_secret": credentials.secret,
            "param": [param],
        })
    }
}

impl Default for OmieProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Fault response body; only the human-readable string matters here
#[derive(Debug, Deserialize)]
struct FaultBody {
    faultstring: Option<String>,
}

/// The faultstring out of an error body, or the raw text when the body
/// is not the usual fault JSON.
fn fault_message(body: &str) -> String {
    serde_json::from_str::<FaultBody>(body)
        .ok()
        .and_then(|fault| fault.faultstring)
        .unwrap_or_else(|| body.trim().to_string())
}

/// Build the lookup result from a product body.
///
/// Omie serves `codigo` as either a string or a number depending on how
/// the product was registered, so every field goes through the fallback
/// readers.
fn product_detail(raw: &RawRecord) -> ProductDetail {
    ProductDetail {
        code: string_field(raw, &["codigo"]),
        description: string_field(raw, &["descricao"]),
        unit_price: number_field(raw, &["valor_unitario"]),
        ncm: string_field(raw, &["ncm"]),
        family: string_field(raw, &["descricao_familia"]),
        origin: string_field(raw, &["origem_mercadoria"]),
        net_weight: number_field(raw, &["peso_liq"]),
        active: raw.get("inativo").and_then(Value::as_str) != Some("S"),
    }
}

#[async_trait]
impl Provider for OmieProvider {
    fn name(&self) -> &'static str {
        "omie"
    }

    fn endpoints(&self) -> Vec<EndpointDescriptor> {
        vec![products_endpoint()]
    }

    fn default_endpoint(&self) -> EndpointDescriptor {
        products_endpoint()
    }

    async fn authenticate(
        &self,
        _client: &reqwest::Client,
        credentials: &Credentials,
    ) -> Result<AuthContext, ScanError> {
        credentials.validate()?;
        Ok(AuthContext::Inline(credentials.clone()))
    }

    async fn fetch_page(
        &self,
        client: &reqwest::Client,
        auth: &AuthContext,
        endpoint: &EndpointDescriptor,
        page: u32,
        page_size: u32,
        _hint: &str,
    ) -> Result<PageFetch, ScanError> {
        // The term is deliberately not forwarded: server-side listing
        // filters have returned empty pages for accounts that do hold the
        // data. Pages come back unfiltered and the engine matches locally.
        let AuthContext::Inline(credentials) = auth else {
            return Err(ScanError::Auth {
                message: "omie requests carry credentials inline, not a bearer token".to_string(),
            });
        };
        let Some(call) = endpoint.call.as_deref() else {
            return Err(ScanError::BadEndpoint {
                endpoint: endpoint.name.clone(),
                message: "omie endpoints need an RPC call name".to_string(),
            });
        };

        let body = Self::call_body(
            credentials,
            call,
            json!({
                "pagina": page,
                "registros_por_pagina": page_size,
                "exibir_obs": "N",
            }),
        );

        let response = client
            .post(self.url(&endpoint.path))
            .json(&body)
            .send()
            .await
            .map_err(ScanError::from_reqwest)?;
        let status = response.status();
        let text = response.text().await.map_err(ScanError::from_reqwest)?;

        if !status.is_success() {
            let message = fault_message(&text);
            if status.is_server_error() {
                match self.fault_rules.classify(&message) {
                    FaultKind::EndOfData => {
                        debug!(page, "omie reported no records for the page");
                        return Ok(PageFetch::NoRecords);
                    }
                    FaultKind::PermissionDenied => {
                        return Ok(PageFetch::PermissionDenied(message));
                    }
                    FaultKind::NotFound | FaultKind::Failure => {}
                }
            }
            return Ok(PageFetch::Failed {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value =
            serde_json::from_str(&text).map_err(|e| ScanError::InvalidResponse {
                message: format!("listing response: {e}"),
            })?;

        Ok(PageFetch::Records(
            endpoint.envelope.extract(&body).unwrap_or_default(),
        ))
    }

    /// `ConsultarProduto`: works even for keys without listing permission.
    async fn lookup(
        &self,
        client: &reqwest::Client,
        credentials: &Credentials,
        code: &str,
    ) -> Result<ProductDetail, ScanError> {
        credentials.validate()?;

        let body = Self::call_body(
            credentials,
            "ConsultarProduto",
            json!({ "codigo": code.trim() }),
        );

        let response = client
            .post(self.url(PRODUCTS_PATH))
            .json(&body)
            .send()
            .await
            .map_err(ScanError::from_reqwest)?;
        let status = response.status();
        let text = response.text().await.map_err(ScanError::from_reqwest)?;

        if !status.is_success() {
            let message = fault_message(&text);
            if status.is_server_error() {
                match self.fault_rules.classify(&message) {
                    FaultKind::NotFound | FaultKind::EndOfData => {
                        return Err(ScanError::NotFound {
                            code: code.trim().to_string(),
                        });
                    }
                    FaultKind::PermissionDenied => {
                        return Err(ScanError::Auth { message });
                    }
                    FaultKind::Failure => {}
                }
            }
            return Err(ScanError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let raw: RawRecord = serde_json::from_str(&text).map_err(|e| ScanError::InvalidResponse {
            message: format!("lookup response: {e}"),
        })?;
        Ok(product_detail(&raw))
    }
}

/// Descriptor for the Omie product listing.
fn products_endpoint() -> EndpointDescriptor {
    EndpointDescriptor {
        name: "products".to_string(),
        path: PRODUCTS_PATH.to_string(),
        call: Some("ListarProdutos".to_string()),
        envelope: Envelope::new(["produto_servico_cadastro"]),
        search_fields: vec!["descricao".to_string(), "codigo".to_string()],
        fields: FieldMap {
            id: vec!["codigo_produto".to_string()],
            name: vec!["descricao".to_string()],
            code: vec!["codigo".to_string()],
            description: vec!["descricao".to_string()],
            quantity: vec![],
            price: vec!["valor_unitario".to_string()],
        },
    }
}
