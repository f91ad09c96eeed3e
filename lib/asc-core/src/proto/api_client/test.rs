use std::sync::Arc;

use rstest::rstest;
use serde_json::json;
use similar_asserts::assert_eq;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::proto::bearer_token::MockTokenProvider;
use crate::proto::http_client::reqwest_client::ReqwestClient;

fn token_provider() -> MockTokenProvider {
    let mut token_provider = MockTokenProvider::new();
    token_provider
        .expect_get_token()
        .returning(|| Ok("signed.jwt.token".to_string()));
    token_provider
}

fn client(mock_server: &MockServer) -> AppStoreConnectClient {
    AppStoreConnectClient::new(
        format!("{}/v1", mock_server.uri()),
        Arc::new(ReqwestClient::default()),
        Arc::new(token_provider()),
    )
}

#[tokio::test]
async fn test_execute_get_with_query_and_headers() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/certificates"))
        .and(query_param("limit", "200"))
        .and(query_param("filter[certificateType]", "PASS_TYPE_ID"))
        .and(header("Authorization", "Bearer signed.jwt.token"))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "type": "certificates", "id": "ABC123" }],
            "links": { "self": "https://api.example.com/v1/certificates" },
            "meta": { "paging": { "total": 1, "limit": 200 } }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client(&mock_server)
        .execute(
            ApiRequest::get("/certificates")
                .query("limit", "200")
                .query("filter[certificateType]", "PASS_TYPE_ID"),
        )
        .await
        .unwrap();

    assert_eq!(
        response.data,
        Some(json!([{ "type": "certificates", "id": "ABC123" }]))
    );
    assert_eq!(
        response.meta.and_then(|meta| meta.paging),
        Some(dto::PagingDTO {
            total: Some(1),
            limit: Some(200)
        })
    );
}

#[tokio::test]
async fn test_execute_post_wraps_body_in_envelope() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/passTypeIds"))
        .and(body_json(json!({
            "data": {
                "type": "passTypeIds",
                "attributes": { "identifier": "pass.com.example.test", "name": "Test" }
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "type": "passTypeIds", "id": "PT1" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client(&mock_server)
        .execute(ApiRequest::post(
            "/passTypeIds",
            json!({
                "type": "passTypeIds",
                "attributes": { "identifier": "pass.com.example.test", "name": "Test" }
            }),
        ))
        .await
        .unwrap();

    #[derive(serde::Deserialize)]
    struct Resource {
        id: String,
    }
    let resource: Resource = response.into_data().unwrap();
    assert_eq!(resource.id, "PT1");
}

#[tokio::test]
async fn test_execute_delete_empty_body_is_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/passTypeIds/PT1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client(&mock_server)
        .execute(ApiRequest::delete("/passTypeIds/PT1"))
        .await
        .unwrap();

    assert_eq!(response, ApiResponse::default());
    assert!(matches!(
        response.into_data::<serde_json::Value>(),
        Err(ApiClientError::MalformedEnvelope(_))
    ));
}

#[rstest]
#[case::empty_error(
    ResponseTemplate::new(404),
    "API error (status 404): empty response"
)]
#[case::unparsable_error(
    ResponseTemplate::new(502).set_body_string("Bad Gateway"),
    "API error (status 502): Bad Gateway"
)]
#[case::aggregated_errors(
    ResponseTemplate::new(409).set_body_json(json!({
        "errors": [
            { "status": "409", "code": "ENTITY_ERROR", "title": "Conflict", "detail": "Already exists" },
            { "title": "Invalid", "detail": "Bad CSR" }
        ]
    })),
    "API error: Conflict: Already exists; Invalid: Bad CSR"
)]
#[case::status_without_errors(
    ResponseTemplate::new(500).set_body_json(json!({ "data": null })),
    "API error: HTTP 500"
)]
#[tokio::test]
async fn test_execute_error_mapping(#[case] template: ResponseTemplate, #[case] expected: &str) {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/certificates/X"))
        .respond_with(template)
        .mount(&mock_server)
        .await;

    let error = client(&mock_server)
        .execute(ApiRequest::get("/certificates/X"))
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), expected);
}

#[tokio::test]
async fn test_execute_unparsable_success_is_malformed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let error = client(&mock_server)
        .execute(ApiRequest::get("/certificates"))
        .await
        .unwrap_err();

    assert!(matches!(error, ApiClientError::MalformedEnvelope(_)));
}

#[tokio::test]
async fn test_execute_token_failure_skips_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut token_provider = MockTokenProvider::new();
    token_provider.expect_get_token().returning(|| {
        Err(TokenError::Signing(crate::proto::jwt::JwtError::Malformed(
            "test".to_string(),
        )))
    });

    let client = AppStoreConnectClient::new(
        format!("{}/v1", mock_server.uri()),
        Arc::new(ReqwestClient::default()),
        Arc::new(token_provider),
    );

    let error = client
        .execute(ApiRequest::get("/certificates"))
        .await
        .unwrap_err();
    assert!(matches!(error, ApiClientError::Token(_)));
}
