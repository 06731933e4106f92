use super::*;

fn test_client(base_url: &str) -> ApiClient {
    ApiClient::with_base_url(base_url, 30, "wavy-test/0.1", ApiPaths::default())
        .expect("client construction should not fail")
}

#[test]
fn endpoint_appends_path_to_base() {
    let client = test_client("https://wavy.dev.wavelink.co");
    let url = client.endpoint("/api/v1/profile").unwrap();
    assert_eq!(url.as_str(), "https://wavy.dev.wavelink.co/api/v1/profile");
}

#[test]
fn endpoint_strips_trailing_slash_and_keeps_prefix() {
    let client = test_client("http://127.0.0.1:3000/backend/");
    let url = client.endpoint("/api/v1/videos").unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:3000/backend/api/v1/videos");
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = ApiClient::with_base_url("not a url", 30, "ua", ApiPaths::default());
    assert!(matches!(result, Err(ClientError::InvalidUrl { .. })));
}

#[test]
fn tiktok_login_url_encodes_redirect() {
    let client = test_client("https://wavy.dev.wavelink.co");
    let url = client
        .tiktok_login_url("http://localhost:3001/callback")
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://wavy.dev.wavelink.co/api/v1/login/tiktok?redirect_uri=http%3A%2F%2Flocalhost%3A3001%2Fcallback"
    );
}

#[test]
fn strip_query_removes_parameters() {
    let url = Url::parse("https://x.test/a?access_token=secret&b=1").unwrap();
    assert_eq!(strip_query(&url), "https://x.test/a");
}

#[test]
fn decode_reports_context() {
    let err = decode::<ProfileStatus>("<html>", "profile").unwrap_err();
    assert!(
        matches!(err, ClientError::Deserialize { ref context, .. } if context == "profile"),
        "got: {err:?}"
    );
}
