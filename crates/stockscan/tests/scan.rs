//! Integration tests for the scan engine and providers using wiremock

use std::num::{NonZeroU32, NonZeroUsize};
use stockscan::{
    lookup, scan, AuvoProvider, Credentials, OmieProvider, Provider, ScanError, ScanLimits,
    ScanOutcome, ScanQuery,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn creds() -> Credentials {
    Credentials::new("key-1", "secret-1")
}

fn limits(max_pages: u32, page_size: u32, max_matches: Option<usize>) -> ScanLimits {
    ScanLimits::new(
        NonZeroU32::new(max_pages).unwrap(),
        NonZeroU32::new(page_size).unwrap(),
        max_matches.map(|m| NonZeroUsize::new(m).unwrap()),
    )
}

fn auvo_at(server: &MockServer) -> AuvoProvider {
    AuvoProvider::with_base_url(server.uri()).unwrap()
}

fn omie_at(server: &MockServer) -> OmieProvider {
    OmieProvider::with_base_url(server.uri()).unwrap()
}

/// Mount the Auvo login handshake answering with a fixed token.
async fn mount_auvo_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_partial_json(json!({
            "apiKey": "key-1",
            "apiToken": "secret-1",
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": {"accessToken": "tok-123"}})),
        )
        .mount(server)
        .await;
}

/// Auvo listing page with `count` sequential records; ids in `tubo_ids`
/// get a name the term "tubo" matches.
fn auvo_page(first_id: u64, count: u64, tubo_ids: &[u64]) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = (first_id..first_id + count)
        .map(|id| {
            let name = if tubo_ids.contains(&id) {
                format!("Tubo item {id}")
            } else {
                format!("Item {id}")
            };
            json!({"id": id, "name": name})
        })
        .collect();
    json!({"result": {"entityList": entries}})
}

/// Requests the server saw for a given path.
async fn requests_to(server: &MockServer, to: &str) -> usize {
    server
        .received_requests()
        .await
        .expect("request recording is on")
        .iter()
        .filter(|request| request.url.path() == to)
        .count()
}

#[tokio::test]
async fn test_auvo_login_and_filtered_scan() {
    let server = MockServer::start().await;
    mount_auvo_login(&server).await;

    // Listing pages only answer when the bearer token rides along.
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("authorization", "Bearer tok-123"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"entityList": [
                {"id": 1, "name": "TUBO PVC 100MM", "identifier": "TB-100"},
                {"id": 2, "name": "Cabo de cobre", "identifier": "CB-20"},
                {"id": 3, "name": "Luva", "description": "luva para tubo", "identifier": "LV-1"},
            ]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("authorization", "Bearer tok-123"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": {"entityList": []}})),
        )
        .mount(&server)
        .await;

    let provider = auvo_at(&server);
    let endpoint = provider.endpoint("products").unwrap();
    let query = ScanQuery::new("tubo").with_limits(limits(10, 50, None));

    let session = scan(&provider, &creds(), &endpoint, &query).await;

    assert_eq!(session.outcome, ScanOutcome::EndOfData);
    assert_eq!(session.pages_read, 2);
    assert_eq!(session.records_seen, 3);
    // Case-insensitive, and the description field matches too.
    let ids: Vec<_> = session
        .matches
        .iter()
        .map(|r| r.id.as_deref().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["1", "3"]);
    assert!(!session.is_partial());
}

#[tokio::test]
async fn test_auvo_empty_term_returns_everything() {
    let server = MockServer::start().await;
    mount_auvo_login(&server).await;

    // This page uses the plain `result` array envelope variant.
    Mock::given(method("GET"))
        .and(path("/equipments"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                {"id": 11, "name": "Compressor"},
                {"id": 12, "name": "Gerador"},
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/equipments"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
        .mount(&server)
        .await;

    let provider = auvo_at(&server);
    let endpoint = provider.default_endpoint();
    let query = ScanQuery::new("").with_limits(limits(10, 50, None));

    let session = scan(&provider, &creds(), &endpoint, &query).await;

    assert_eq!(session.matches.len(), 2);
    assert_eq!(session.matches[0].id.as_deref(), Some("11"));
    assert_eq!(session.matches[1].id.as_deref(), Some("12"));
    assert_eq!(session.outcome, ScanOutcome::EndOfData);
}

#[tokio::test]
async fn test_auvo_search_hint_is_forwarded_but_not_trusted() {
    let server = MockServer::start().await;
    mount_auvo_login(&server).await;

    // The mock insists on the search parameter; the response still mixes
    // in a record the server should have filtered out.
    Mock::given(method("GET"))
        .and(path("/materials"))
        .and(query_param("search", "tubo"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"entityList": [
                {"id": 1, "name": "Tubo PVC"},
                {"id": 2, "name": "Parafuso"},
            ]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/materials"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": {"entityList": []}})),
        )
        .mount(&server)
        .await;

    let provider = auvo_at(&server);
    let endpoint = provider.endpoint("materials").unwrap();
    let query = ScanQuery::new("tubo").with_limits(limits(10, 50, None));

    let session = scan(&provider, &creds(), &endpoint, &query).await;

    assert_eq!(session.records_seen, 2);
    // Local filtering threw out what the server let through.
    assert_eq!(session.matches.len(), 1);
    assert_eq!(session.matches[0].id.as_deref(), Some("1"));
}

#[tokio::test]
async fn test_auvo_page_cap_bounds_requests() {
    let server = MockServer::start().await;
    mount_auvo_login(&server).await;

    // Every page is full, so only the cap can stop the scan.
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"entityList": [
                {"id": 1, "name": "item a"},
                {"id": 2, "name": "item b"},
            ]}
        })))
        .mount(&server)
        .await;

    let provider = auvo_at(&server);
    let endpoint = provider.endpoint("products").unwrap();
    let query = ScanQuery::new("").with_limits(limits(3, 2, None));

    let session = scan(&provider, &creds(), &endpoint, &query).await;

    assert_eq!(session.outcome, ScanOutcome::PageLimit);
    assert_eq!(session.pages_read, 3);
    assert_eq!(session.records_seen, 6);
    assert!(session.is_partial());
    assert_eq!(requests_to(&server, "/products").await, 3);
    assert_eq!(requests_to(&server, "/login").await, 1);
}

#[tokio::test]
async fn test_auvo_match_cap_stops_requesting_pages() {
    let server = MockServer::start().await;
    mount_auvo_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"entityList": [
                {"id": 1, "name": "tubo 1"},
                {"id": 2, "name": "tubo 2"},
                {"id": 3, "name": "tubo 3"},
                {"id": 4, "name": "tubo 4"},
                {"id": 5, "name": "tubo 5"},
            ]}
        })))
        .mount(&server)
        .await;

    let provider = auvo_at(&server);
    let endpoint = provider.endpoint("products").unwrap();
    let query = ScanQuery::new("tubo").with_limits(limits(10, 5, Some(3)));

    let session = scan(&provider, &creds(), &endpoint, &query).await;

    assert_eq!(session.outcome, ScanOutcome::MatchLimit);
    assert_eq!(session.matches.len(), 3);
    assert_eq!(session.records_seen, 5);
    // The cap was hit on page one; page two never went out.
    assert_eq!(requests_to(&server, "/products").await, 1);
}

#[tokio::test]
async fn test_auvo_record_count_spans_pages() {
    let server = MockServer::start().await;
    mount_auvo_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"entityList": [
                {"id": 1, "name": "tubo fino"},
                {"id": 2, "name": "cabo"},
                {"id": 3, "name": "fita"},
            ]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"entityList": [
                {"id": 4, "name": "tubo grosso"},
                {"id": 5, "name": "tubo medio"},
                {"id": 6, "name": "arame"},
            ]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": {"entityList": []}})),
        )
        .mount(&server)
        .await;

    let provider = auvo_at(&server);
    let endpoint = provider.endpoint("products").unwrap();
    let query = ScanQuery::new("tubo").with_limits(limits(10, 3, None));

    let session = scan(&provider, &creds(), &endpoint, &query).await;

    assert_eq!(session.pages_read, 3);
    assert_eq!(session.records_seen, 6);
    let ids: Vec<_> = session
        .matches
        .iter()
        .map(|r| r.id.as_deref().unwrap().to_string())
        .collect();
    // Arrival order across pages is preserved.
    assert_eq!(ids, ["1", "4", "5"]);
    assert_eq!(requests_to(&server, "/products").await, 3);
}

#[tokio::test]
async fn test_scan_arithmetic_over_full_pages() {
    let server = MockServer::start().await;
    mount_auvo_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auvo_page(1, 50, &[7])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auvo_page(51, 50, &[63, 80])))
        .mount(&server)
        .await;

    let provider = auvo_at(&server);
    let endpoint = provider.endpoint("products").unwrap();
    let query = ScanQuery::new("tubo").with_limits(limits(2, 50, None));

    let session = scan(&provider, &creds(), &endpoint, &query).await;

    assert_eq!(session.matches.len(), 3);
    assert_eq!(session.pages_read, 2);
    // Every record on both pages is counted, matched or not.
    assert_eq!(session.records_seen, 100);
    assert_eq!(session.outcome, ScanOutcome::PageLimit);
}

#[tokio::test]
async fn test_auvo_login_rejection_scans_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let provider = auvo_at(&server);
    let endpoint = provider.endpoint("products").unwrap();
    let query = ScanQuery::new("tubo");

    let session = scan(&provider, &creds(), &endpoint, &query).await;

    match &session.outcome {
        ScanOutcome::AuthFailed { message } => {
            assert!(message.contains("401"));
            assert!(message.contains("invalid api key"));
        }
        other => panic!("expected AuthFailed, got {other:?}"),
    }
    assert_eq!(session.pages_read, 0);
    assert_eq!(requests_to(&server, "/products").await, 0);
}

#[tokio::test]
async fn test_auvo_login_without_token_is_auth_failure() {
    let server = MockServer::start().await;

    // HTTP 200 but the result is not the token-bearing shape.
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
        .mount(&server)
        .await;

    let provider = auvo_at(&server);
    let endpoint = provider.endpoint("products").unwrap();

    let session = scan(&provider, &creds(), &endpoint, &ScanQuery::new("")).await;

    assert!(matches!(session.outcome, ScanOutcome::AuthFailed { .. }));
    assert_eq!(session.pages_read, 0);
}

#[tokio::test]
async fn test_auvo_listing_error_keeps_earlier_matches() {
    let server = MockServer::start().await;
    mount_auvo_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"entityList": [{"id": 1, "name": "tubo"}]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let provider = auvo_at(&server);
    let endpoint = provider.endpoint("products").unwrap();
    let query = ScanQuery::new("tubo").with_limits(limits(10, 1, None));

    let session = scan(&provider, &creds(), &endpoint, &query).await;

    assert_eq!(
        session.outcome,
        ScanOutcome::RemoteError {
            status: 500,
            message: "internal error".to_string()
        }
    );
    // Page one's match survives the failure on page two.
    assert_eq!(session.pages_read, 1);
    assert_eq!(session.matches.len(), 1);
    assert!(session.is_partial());
}

#[tokio::test]
async fn test_missing_credentials_fail_before_any_request() {
    let server = MockServer::start().await;
    mount_auvo_login(&server).await;

    let provider = auvo_at(&server);
    let endpoint = provider.endpoint("products").unwrap();

    let session = scan(
        &provider,
        &Credentials::new("key-1", ""),
        &endpoint,
        &ScanQuery::new("tubo"),
    )
    .await;

    assert!(matches!(session.outcome, ScanOutcome::AuthFailed { .. }));
    // Not even the login went out.
    assert_eq!(requests_to(&server, "/login").await, 0);
}

#[tokio::test]
async fn test_omie_call_envelope_and_projection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/geral/produtos/"))
        .and(body_partial_json(json!({
            "call": "ListarProdutos",
            "app_key": "key-1",
            "app_secret": "secret-1",
            "param": [{"pagina": 1, "registros_por_pagina": 2}],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagina": 1,
            "produto_servico_cadastro": [
                {
                    "codigo_produto": 900001,
                    "codigo": 946,
                    "descricao": "Tubo PVC 100mm",
                    "valor_unitario": 42.9,
                    "ncm": "3917.23.00"
                },
                {
                    "codigo_produto": 900002,
                    "codigo": "CB-77",
                    "descricao": "Cabo de rede",
                    "valor_unitario": 3.5
                },
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/geral/produtos/"))
        .and(body_partial_json(json!({"param": [{"pagina": 2}]})))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "faultcode": "SOAP-ENV:Client-8020",
            "faultstring": "ERROR: Não existem registros para a página [2]!"
        })))
        .mount(&server)
        .await;

    let provider = omie_at(&server);
    let endpoint = provider.endpoint("products").unwrap();
    let query = ScanQuery::new("tubo").with_limits(limits(10, 2, None));

    let session = scan(&provider, &creds(), &endpoint, &query).await;

    assert_eq!(session.outcome, ScanOutcome::EndOfData);
    assert_eq!(session.pages_read, 2);
    assert_eq!(session.records_seen, 2);
    assert_eq!(session.matches.len(), 1);

    let record = &session.matches[0];
    assert_eq!(record.id.as_deref(), Some("900001"));
    assert_eq!(record.name.as_deref(), Some("Tubo PVC 100mm"));
    assert_eq!(record.code.as_deref(), Some("946"));
    assert_eq!(record.price, Some(42.9));
    assert_eq!(record.quantity, None);
}

#[tokio::test]
async fn test_omie_code_search_matches_numeric_codes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/geral/produtos/"))
        .and(body_partial_json(json!({"param": [{"pagina": 1}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "produto_servico_cadastro": [
                {"codigo_produto": 1, "codigo": 946, "descricao": "Tubo"},
                {"codigo_produto": 2, "codigo": 1202, "descricao": "Cabo"},
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/geral/produtos/"))
        .and(body_partial_json(json!({"param": [{"pagina": 2}]})))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "faultstring": "ERROR: Não existem registros para a página [2]!"
        })))
        .mount(&server)
        .await;

    let provider = omie_at(&server);
    let endpoint = provider.endpoint("products").unwrap();
    let query = ScanQuery::new("946").with_limits(limits(10, 50, None));

    let session = scan(&provider, &creds(), &endpoint, &query).await;

    assert_eq!(session.matches.len(), 1);
    assert_eq!(session.matches[0].code.as_deref(), Some("946"));
}

#[tokio::test]
async fn test_omie_no_records_fault_on_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/geral/produtos/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "faultstring": "ERROR: Não existem registros para a página [1]!"
        })))
        .mount(&server)
        .await;

    let provider = omie_at(&server);
    let endpoint = provider.endpoint("products").unwrap();

    let session = scan(&provider, &creds(), &endpoint, &ScanQuery::new("tubo")).await;

    // The fault is an empty listing, not an error.
    assert_eq!(session.outcome, ScanOutcome::EndOfData);
    assert_eq!(session.pages_read, 1);
    assert_eq!(session.records_seen, 0);
    assert!(session.is_empty_result());
}

#[tokio::test]
async fn test_omie_permission_fault_reports_auth_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/geral/produtos/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "faultstring": "ERROR: Permissão negada para a operação ListarProdutos"
        })))
        .mount(&server)
        .await;

    let provider = omie_at(&server);
    let endpoint = provider.endpoint("products").unwrap();

    let session = scan(&provider, &creds(), &endpoint, &ScanQuery::new("")).await;

    match &session.outcome {
        ScanOutcome::AuthFailed { message } => assert!(message.contains("Permissão")),
        other => panic!("expected AuthFailed, got {other:?}"),
    }
    assert!(!session.is_empty_result());
    assert_eq!(requests_to(&server, "/geral/produtos/").await, 1);
}

#[tokio::test]
async fn test_omie_unknown_fault_is_remote_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/geral/produtos/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "faultstring": "ERROR: Banco de dados temporariamente indisponível"
        })))
        .mount(&server)
        .await;

    let provider = omie_at(&server);
    let endpoint = provider.endpoint("products").unwrap();

    let session = scan(&provider, &creds(), &endpoint, &ScanQuery::new("tubo")).await;

    match &session.outcome {
        ScanOutcome::RemoteError { status, message } => {
            assert_eq!(*status, 500);
            assert!(message.contains("Banco de dados"));
        }
        other => panic!("expected RemoteError, got {other:?}"),
    }
    assert_eq!(session.pages_read, 0);
}

#[tokio::test]
async fn test_omie_4xx_reports_remote_error() {
    let server = MockServer::start().await;

    // 4xx bodies never go through fault classification.
    Mock::given(method("POST"))
        .and(path("/geral/produtos/"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"faultstring": "não existem registros"})),
        )
        .mount(&server)
        .await;

    let provider = omie_at(&server);
    let endpoint = provider.endpoint("products").unwrap();

    let session = scan(&provider, &creds(), &endpoint, &ScanQuery::new("")).await;

    assert!(matches!(
        session.outcome,
        ScanOutcome::RemoteError { status: 403, .. }
    ));
}

#[tokio::test]
async fn test_omie_transport_failure_reports_no_pages() {
    // Nothing listens here; the connection is refused outright.
    let provider = OmieProvider::with_base_url("http://127.0.0.1:9").unwrap();
    let endpoint = provider.endpoint("products").unwrap();

    let session = scan(&provider, &creds(), &endpoint, &ScanQuery::new("tubo")).await;

    assert!(matches!(
        session.outcome,
        ScanOutcome::TransportFailed { .. }
    ));
    assert_eq!(session.pages_read, 0);
    assert_eq!(session.records_seen, 0);
    assert!(session.matches.is_empty());
    assert!(session.is_partial());
}

#[tokio::test]
async fn test_omie_lookup_returns_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/geral/produtos/"))
        .and(body_partial_json(json!({
            "call": "ConsultarProduto",
            "app_key": "key-1",
            "param": [{"codigo": "946"}],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "codigo_produto": 900001,
            "codigo": 946,
            "descricao": "Tubo PVC 100mm",
            "valor_unitario": 42.9,
            "ncm": "3917.23.00",
            "descricao_familia": "Hidráulica",
            "origem_mercadoria": "0",
            "peso_liq": 1.2,
            "inativo": "N"
        })))
        .mount(&server)
        .await;

    let provider = omie_at(&server);
    let detail = lookup(&provider, &creds(), " 946 ").await.unwrap();

    assert_eq!(detail.code.as_deref(), Some("946"));
    assert_eq!(detail.description.as_deref(), Some("Tubo PVC 100mm"));
    assert_eq!(detail.unit_price, Some(42.9));
    assert_eq!(detail.ncm.as_deref(), Some("3917.23.00"));
    assert_eq!(detail.family.as_deref(), Some("Hidráulica"));
    assert_eq!(detail.net_weight, Some(1.2));
    assert!(detail.active);
}

#[tokio::test]
async fn test_omie_lookup_unknown_code_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/geral/produtos/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "faultstring": "ERROR: Produto não cadastrado para o Código [999]!"
        })))
        .mount(&server)
        .await;

    let provider = omie_at(&server);
    let result = lookup(&provider, &creds(), "999").await;

    assert!(matches!(result, Err(ScanError::NotFound { .. })));
}

#[tokio::test]
async fn test_omie_lookup_permission_fault_is_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/geral/produtos/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "faultstring": "Access denied for this key"
        })))
        .mount(&server)
        .await;

    let provider = omie_at(&server);
    let result = lookup(&provider, &creds(), "946").await;

    assert!(matches!(result, Err(ScanError::Auth { .. })));
}

#[tokio::test]
async fn test_auvo_lookup_is_unsupported() {
    let provider = AuvoProvider::new();
    let result = lookup(&provider, &creds(), "946").await;

    assert!(matches!(
        result,
        Err(ScanError::LookupUnsupported { provider: "auvo" })
    ));
}
