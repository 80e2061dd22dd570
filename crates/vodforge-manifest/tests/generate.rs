//! HTTP-level tests for manifest generation.

use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vodforge_client::{ClientConfig, EncodingClient, PollConfig};
use vodforge_manifest::{ManifestConfig, ManifestError, ManifestGenerator};
use vodforge_models::ManifestKind;

fn generator_for(server: &MockServer) -> ManifestGenerator {
    let client = EncodingClient::new(ClientConfig {
        base_url: server.uri(),
        api_key: "test-key".to_string(),
        tenant_org_id: None,
        timeout: Duration::from_secs(5),
        max_retries: 0,
    })
    .expect("client construction");

    let config = ManifestConfig {
        poll: PollConfig::new(Duration::from_millis(10)),
        ..ManifestConfig::default()
    };

    ManifestGenerator::new(client, config)
}

fn ts_muxing_items() -> serde_json::Value {
    json!({
        "items": [
            {
                "id": "mux-v1",
                "streams": [{"streamId": "stream-v1"}],
                "outputs": [{
                    "outputId": "out-1",
                    "outputPath": "outputs/clip.mp4/video/ts/clear/1080-1980-3500000"
                }]
            },
            {
                "id": "mux-v2",
                "streams": [{"streamId": "stream-v2"}],
                "outputs": [{
                    "outputId": "out-1",
                    "outputPath": "outputs/clip.mp4/video/ts/clear/720-1280-2000000"
                }]
            },
            {
                "id": "mux-a1",
                "streams": [{"streamId": "stream-a1"}],
                "outputs": [{
                    "outputId": "out-1",
                    "outputPath": "outputs/clip.mp4/audio/ts/clear/128000"
                }]
            }
        ],
        "totalCount": 3
    })
}

#[tokio::test]
async fn hls_generation_builds_and_awaits() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/encoding/encodings/enc-1/muxings/ts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ts_muxing_items()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/encoding/manifests/hls"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "hls-1"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/encoding/manifests/hls/hls-1/media/audio"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "media-1"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/encoding/manifests/hls/hls-1/streams"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "si-1"})))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/encoding/manifests/hls/hls-1/start"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/encoding/manifests/hls/hls-1/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "FINISHED", "progress": 100})),
        )
        .mount(&server)
        .await;

    let generator = generator_for(&server);
    let manifest_id = generator
        .generate("enc-1", ManifestKind::Hls, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(manifest_id, "hls-1");

    // The top video tier URI is derived relative to the anchor root
    let requests = server.received_requests().await.unwrap();
    let stream_bodies: Vec<serde_json::Value> = requests
        .iter()
        .filter(|r| r.url.path().ends_with("/streams"))
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect();
    assert_eq!(stream_bodies[0]["uri"], "video/ts/clear/1080-1980-3500000/video.m3u8");
    assert_eq!(stream_bodies[0]["closedCaptions"], "NONE");

    let media_bodies: Vec<serde_json::Value> = requests
        .iter()
        .filter(|r| r.url.path().ends_with("/media/audio"))
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect();
    assert_eq!(media_bodies[0]["uri"], "audio/ts/clear/128000/audio.m3u8");
    assert_eq!(media_bodies[0]["language"], "eng");
}

#[tokio::test]
async fn dash_generation_builds_period_and_representations() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/encoding/encodings/enc-1/muxings/mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "id": "mux-v1",
                    "streams": [{"streamId": "stream-v1"}],
                    "outputs": [{
                        "outputId": "out-1",
                        "outputPath": "outputs/clip.mp4/video/mp4/clear/1080-1980-3500000"
                    }]
                },
                {
                    "id": "mux-a1",
                    "streams": [{"streamId": "stream-a1"}],
                    "outputs": [{
                        "outputId": "out-1",
                        "outputPath": "outputs/clip.mp4/audio/mp4/clear/128000"
                    }]
                }
            ],
            "totalCount": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/encoding/manifests/dash"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "dash-1"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/encoding/manifests/dash/dash-1/periods"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "p-1"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/encoding/manifests/dash/dash-1/periods/p-1/adaptationsets/video"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "vas-1"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/encoding/manifests/dash/dash-1/periods/p-1/adaptationsets/audio"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "aas-1"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/encoding/manifests/dash/dash-1/periods/p-1/adaptationsets/(vas|aas)-1/representations/mp4$"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "rep-1"})))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/encoding/manifests/dash/dash-1/start"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/encoding/manifests/dash/dash-1/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "FINISHED", "progress": 100})),
        )
        .mount(&server)
        .await;

    let generator = generator_for(&server);
    let manifest_id = generator
        .generate("enc-1", ManifestKind::Dash, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(manifest_id, "dash-1");

    let requests = server.received_requests().await.unwrap();
    let representation_paths: Vec<(String, serde_json::Value)> = requests
        .iter()
        .filter(|r| r.url.path().ends_with("/representations/mp4"))
        .map(|r| (r.url.path().to_string(), serde_json::from_slice(&r.body).unwrap()))
        .collect();

    // Audio representations land in the audio adaptation set, video in the
    // video one, with root-relative media paths
    assert!(representation_paths
        .iter()
        .any(|(p, b)| p.contains("/aas-1/") && b["filePath"] == "audio/mp4/clear/128000/audio.mp4"));
    assert!(representation_paths.iter().any(
        |(p, b)| p.contains("/vas-1/")
            && b["filePath"] == "video/mp4/clear/1080-1980-3500000/video.mp4"
    ));
}

#[tokio::test]
async fn manifest_job_error_surfaces_task_messages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/encoding/encodings/enc-1/muxings/ts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ts_muxing_items()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/encoding/manifests/hls"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "hls-1"})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/encoding/manifests/hls/hls-1/(media/audio|streams|start)$"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "x"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/encoding/manifests/hls/hls-1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ERROR",
            "progress": 55,
            "messages": [
                {"type": "INFO", "text": "writing playlist"},
                {"type": "ERROR", "text": "segment index out of range"}
            ]
        })))
        .mount(&server)
        .await;

    let generator = generator_for(&server);
    let err = generator
        .generate("enc-1", ManifestKind::Hls, &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        ManifestError::JobFailed { manifest_id, messages, .. } => {
            assert_eq!(manifest_id, "hls-1");
            assert_eq!(messages, vec!["segment index out of range".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn generation_requires_video_muxings() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/encoding/encodings/enc-1/muxings/ts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "mux-a1",
                "streams": [{"streamId": "stream-a1"}],
                "outputs": [{
                    "outputId": "out-1",
                    "outputPath": "outputs/clip.mp4/audio/ts/clear/128000"
                }]
            }],
            "totalCount": 1
        })))
        .mount(&server)
        .await;

    let generator = generator_for(&server);
    let err = generator
        .generate("enc-1", ManifestKind::Hls, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ManifestError::NoVideoMuxings(id) if id == "enc-1"));
}
