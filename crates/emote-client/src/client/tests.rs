use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::json;

use super::*;
use crate::ErrorKind;
use crate::models::Provider;

async fn stub_channel(Path(channel): Path<String>) -> Response {
    match channel.as_str() {
        "forsen" => Json(json!([
            {
                "animated": false,
                "code": "forsenE",
                "provider": 0,
                "urls": [{"size": "1x", "url": "https://example.com/forsenE/1x"}],
                "zero_width": false
            },
            {
                "animated": true,
                "code": "forsene",
                "provider": 5,
                "urls": [],
                "zero_width": true
            }
        ]))
        .into_response(),
        "with space" => Json(json!([])).into_response(),
        "garbage" => (StatusCode::OK, "<html>oops</html>").into_response(),
        "flaky" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn_stub() -> String {
    let app = Router::new().route("/v1/channel/{channel}/all", get(stub_channel));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v1")
}

fn client(base: &str) -> EmoteClient {
    EmoteClient::new(base, Duration::from_secs(5)).unwrap()
}

#[test]
fn test_channel_url_encodes_segment() {
    let c = client(DEFAULT_BASE_URL);
    assert_eq!(
        c.channel_url("forsen").unwrap().as_str(),
        "https://emotes.crippled.dev/v1/channel/forsen/all"
    );
    assert_eq!(
        c.channel_url("a b/c").unwrap().as_str(),
        "https://emotes.crippled.dev/v1/channel/a%20b%2Fc/all"
    );

    let trailing = client("https://emotes.crippled.dev/v1/");
    assert_eq!(
        trailing.channel_url("xqc").unwrap().as_str(),
        "https://emotes.crippled.dev/v1/channel/xqc/all"
    );
}

#[test]
fn test_rejects_unusable_base_url() {
    assert!(matches!(
        EmoteClient::new("not a url", DEFAULT_TIMEOUT),
        Err(EmoteError::UrlParse(_))
    ));
    assert!(matches!(
        EmoteClient::new("mailto:someone@example.com", DEFAULT_TIMEOUT),
        Err(EmoteError::InvalidBaseUrl(_))
    ));
    assert!(matches!(
        EmoteClient::new("ftp://example.com/v1", DEFAULT_TIMEOUT),
        Err(EmoteError::InvalidBaseUrl(_))
    ));
}

#[tokio::test]
async fn test_fetches_and_decodes_channel_emotes() {
    let base = spawn_stub().await;
    let emotes = client(&base).channel_emotes("forsen").await.unwrap();
    assert_eq!(emotes.len(), 2);
    assert_eq!(emotes[0].code, "forsenE");
    assert_eq!(emotes[0].provider, Provider::Twitch);
    assert_eq!(emotes[1].provider, Provider::Unknown(Some(5)));
    assert!(emotes[1].zero_width);
}

#[tokio::test]
async fn test_not_found_maps_to_channel_message() {
    let base = spawn_stub().await;
    let err = client(&base).channel_emotes("xyz").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.user_message(), "Channel \"xyz\" not found");
}

#[tokio::test]
async fn test_server_error_maps_to_status_message() {
    let base = spawn_stub().await;
    let err = client(&base).channel_emotes("flaky").await.unwrap_err();
    assert!(matches!(err, EmoteError::Upstream { status: 500 }));
    assert_eq!(err.user_message(), "Failed to fetch emotes (HTTP 500)");
}

#[tokio::test]
async fn test_malformed_body_is_transport_error() {
    let base = spawn_stub().await;
    let err = client(&base).channel_emotes("garbage").await.unwrap_err();
    assert!(matches!(err, EmoteError::Decode(_)));
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.user_message(), crate::GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_encoded_channel_reaches_route() {
    let base = spawn_stub().await;
    let emotes = client(&base).channel_emotes("with space").await.unwrap();
    assert!(emotes.is_empty());
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}/v1"))
        .channel_emotes("forsen")
        .await
        .unwrap_err();
    assert!(matches!(err, EmoteError::Transport(_)));
    assert_eq!(err.user_message(), crate::GENERIC_ERROR_MESSAGE);
}
