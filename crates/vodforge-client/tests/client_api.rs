//! HTTP-level tests for the encoding service client.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vodforge_client::types::{EncodingRequest, GcsInputRequest};
use vodforge_client::{ClientConfig, ClientError, EncodingClient};
use vodforge_models::ContainerFormat;

fn client_for(server: &MockServer) -> EncodingClient {
    let config = ClientConfig {
        base_url: server.uri(),
        api_key: "test-key".to_string(),
        tenant_org_id: Some("org-1".to_string()),
        timeout: Duration::from_secs(5),
        max_retries: 2,
    };
    EncodingClient::new(config).expect("client construction")
}

fn encoding_request() -> EncodingRequest {
    EncodingRequest {
        name: "vodforge-vod-clip.mp4".to_string(),
        description: Some("VOD ladder encoding".to_string()),
        cloud_region: "GOOGLE_US_CENTRAL_1".to_string(),
        infrastructure_id: None,
    }
}

#[tokio::test]
async fn create_encoding_parses_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/encoding/encodings"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "enc-1",
            "name": "vodforge-vod-clip.mp4"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let encoding = client.create_encoding(&encoding_request()).await.unwrap();

    assert_eq!(encoding.id, "enc-1");
    assert_eq!(encoding.name, "vodforge-vod-clip.mp4");
}

#[tokio::test]
async fn requests_carry_auth_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/encoding/encodings"))
        .and(wiremock::matchers::header("x-api-key", "test-key"))
        .and(wiremock::matchers::header("x-tenant-org-id", "org-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "enc-1", "name": "n"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.create_encoding(&encoding_request()).await.unwrap();
}

#[tokio::test]
async fn list_muxings_skips_entries_without_output() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/encoding/encodings/enc-1/muxings/ts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "id": "mux-1",
                    "streams": [{"streamId": "stream-1"}],
                    "outputs": [{"outputId": "out-1", "outputPath": "outputs/clip.mp4/video/ts/clear/1080-1980-3500000"}]
                },
                {
                    "id": "mux-2",
                    "streams": [{"streamId": "stream-2"}],
                    "outputs": []
                }
            ],
            "totalCount": 2
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let muxings = client.list_muxings("enc-1", ContainerFormat::Ts).await.unwrap();

    assert_eq!(muxings.len(), 1);
    assert_eq!(muxings[0].id, "mux-1");
    assert_eq!(muxings[0].stream_id, "stream-1");
    assert_eq!(muxings[0].output_path, "outputs/clip.mp4/video/ts/clear/1080-1980-3500000");
}

#[tokio::test]
async fn transient_server_errors_are_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/encoding/encodings"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/encoding/encodings"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "enc-1", "name": "vodforge-vod-clip.mp4"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let encoding = client.create_encoding(&encoding_request()).await.unwrap();
    assert_eq!(encoding.id, "enc-1");
}

#[tokio::test]
async fn definitive_rejections_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/encoding/encodings/missing/status"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such encoding"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.encoding_status("missing").await.unwrap_err();

    match err {
        ClientError::Api { status, detail } => {
            assert_eq!(status, 404);
            assert_eq!(detail, "no such encoding");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn ensure_input_reuses_existing_resource() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/encoding/inputs/gcs"))
        .and(query_param("name", "vodforge-input"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "in-1", "name": "vodforge-input"}],
            "totalCount": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = GcsInputRequest {
        name: "vodforge-input".to_string(),
        bucket_name: "ingest".to_string(),
        access_key: "ak".to_string(),
        secret_key: "sk".to_string(),
    };

    let resource = client.ensure_input(&request, true).await.unwrap();
    assert_eq!(resource.id, "in-1");

    // No create call was issued
    let created = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.to_string() == "POST")
        .count();
    assert_eq!(created, 0);
}

#[tokio::test]
async fn ensure_input_creates_when_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/encoding/inputs/gcs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [], "totalCount": 0})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/encoding/inputs/gcs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "in-2",
            "name": "vodforge-input"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = GcsInputRequest {
        name: "vodforge-input".to_string(),
        bucket_name: "ingest".to_string(),
        access_key: "ak".to_string(),
        secret_key: "sk".to_string(),
    };

    let resource = client.ensure_input(&request, true).await.unwrap();
    assert_eq!(resource.id, "in-2");
}
