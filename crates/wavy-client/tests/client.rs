//! Integration tests for `ApiClient` using wiremock HTTP mocks.

use serde_json::json;
use wavy_client::{ApiClient, ClientError};
use wavy_core::{ApiPaths, Credential, EmotionalPattern, NewCampaign, SoftMatching, SpeechComplexity};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> ApiClient {
    ApiClient::with_base_url(base_url, 5, "wavy-test", ApiPaths::default())
        .expect("client construction should not fail")
}

fn token() -> Credential {
    Credential::new("tok-123").expect("non-empty token")
}

#[tokio::test]
async fn get_videos_sends_bearer_and_parses_videos() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/videos"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalVideos": 3,
            "videosProcessed": 1,
            "videos": [
                { "id": 1, "title": "Morning routine", "thumbnailUrl": "https://cdn.test/1.jpg" },
                { "id": "v2", "name": "Unboxing" },
                { "id": 3 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = test_client(&server.uri())
        .get_videos(&token())
        .await
        .expect("should parse videos");

    assert_eq!(status.total_videos, 3);
    assert_eq!(status.videos_processed, 1);
    let titles: Vec<&str> = status.videos().iter().map(|v| v.display_title()).collect();
    assert_eq!(titles, vec!["Morning routine", "Unboxing", "Untitled video"]);
}

#[tokio::test]
async fn get_profile_accepts_loosely_typed_counts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalVideos": "12",
            "videosProcessed": 4.0,
            "matchedCampaigns": 2,
            "confidence": 0.61,
            "videosNeededFor90": 5
        })))
        .mount(&server)
        .await;

    let status = test_client(&server.uri())
        .get_profile(&token())
        .await
        .expect("should parse profile");

    assert_eq!(status.total_videos, 12);
    assert_eq!(status.videos_processed, 4);
    assert_eq!(status.matched_campaigns, Some(2));
    assert_eq!(status.videos_needed_for_90, Some(5));
    assert_eq!(status.progress_percent(), 34);
    assert!(!status.is_complete());
}

#[tokio::test]
async fn unauthorized_status_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .get_profile(&token())
        .await
        .expect_err("401 should fail");

    assert!(err.is_unauthorized(), "expected Unauthorized, got: {err:?}");
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/videos"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .get_videos(&token())
        .await
        .expect_err("503 should fail");

    match err {
        ClientError::UnexpectedStatus { status, body, url } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
            assert!(url.ends_with("/api/v1/videos"));
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_json_returns_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .get_profile(&token())
        .await
        .expect_err("malformed body should fail");

    assert!(
        matches!(err, ClientError::Deserialize { ref context, .. } if context == "profile"),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn list_campaigns_normalises_every_response_shape() {
    let bodies = [
        (json!({ "campaigns": [{ "id": 1, "name": "A" }, { "id": 2, "name": "B" }] }), 2),
        (json!({ "campaigns": { "id": 1, "name": "Only" } }), 1),
        (json!({ "id": 9, "name": "Bare" }), 1),
        (json!({ "message": "nothing here" }), 0),
    ];

    for (body, expected) in bodies {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/campaigns"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let campaigns = test_client(&server.uri())
            .list_campaigns(&token())
            .await
            .expect("should list campaigns");
        assert_eq!(campaigns.len(), expected, "body: {body}");
    }
}

#[tokio::test]
async fn create_campaign_automatic_sets_header_and_omits_flags() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/campaigns"))
        .and(header("automatic-softmatching", "true"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_json(json!({ "name": "Summer", "description": "Hydration push" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "campaign": { "id": 77, "name": "Summer" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let new = NewCampaign {
        name: "Summer".to_owned(),
        description: "Hydration push".to_owned(),
        soft_matching: SoftMatching::Automatic,
    };
    let created = test_client(&server.uri())
        .create_campaign(&token(), &new)
        .await
        .expect("create should succeed")
        .expect("backend echoed the campaign");

    assert_eq!(created.id_string().as_deref(), Some("77"));
}

#[tokio::test]
async fn create_campaign_manual_sends_numeric_flags() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/campaigns"))
        .and(header("automatic-softmatching", "false"))
        .and(body_json(json!({
            "name": "Fall",
            "description": "",
            "speech_complexity": 1,
            "emotional_pattern": 0
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let new = NewCampaign {
        name: "Fall".to_owned(),
        description: String::new(),
        soft_matching: SoftMatching::Manual {
            speech: SpeechComplexity::Complex,
            emotion: EmotionalPattern::Variant,
        },
    };
    let created = test_client(&server.uri())
        .create_campaign(&token(), &new)
        .await
        .expect("create should succeed");

    assert!(created.is_none(), "empty body yields no campaign");
}

#[tokio::test]
async fn create_campaign_failure_keeps_response_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/campaigns"))
        .respond_with(ResponseTemplate::new(422).set_body_string("name already taken"))
        .mount(&server)
        .await;

    let new = NewCampaign {
        name: "Dup".to_owned(),
        description: String::new(),
        soft_matching: SoftMatching::Automatic,
    };
    let err = test_client(&server.uri())
        .create_campaign(&token(), &new)
        .await
        .expect_err("422 should fail");

    assert!(
        matches!(err, ClientError::UnexpectedStatus { status: 422, ref body, .. } if body == "name already taken"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn login_with_token_posts_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login-with-token"))
        .and(body_json(json!({ "access_token": "tok-123" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server.uri())
        .login_with_token(&token())
        .await
        .expect("login should succeed");
}

#[tokio::test]
async fn notify_logout_without_token_sends_no_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server.uri())
        .notify_logout(None)
        .await
        .expect("logout should succeed");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn base_url_path_prefix_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/backend/api/v1/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/backend/", server.uri()));
    let status = client.get_videos(&token()).await.expect("should parse");
    assert!(status.videos().is_empty());
}
