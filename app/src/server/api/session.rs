//! Duplicate lookup API.
//!
//! Upstream failures are part of the session view (`error`), not HTTP errors
//! of this API; only requests the session cannot accept are rejected.

use axum::Json;
use axum::extract::State;
use emote_client::{SessionError, SessionView};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::task::JoinHandle;

use super::err_json;
use crate::app::SharedState;

type ApiResult = Result<Json<Value>, (axum::http::StatusCode, Json<Value>)>;

#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    pub channel: String,
}

#[derive(Debug, Deserialize)]
pub struct SettingsRequest {
    pub case_sensitive: bool,
}

fn session_err(e: SessionError) -> (axum::http::StatusCode, Json<Value>) {
    let status = match e {
        SessionError::EmptyChannel => 400,
        SessionError::Busy => 409,
    };
    err_json(status, &e.to_string())
}

/// GET /api/session
pub async fn get_session(State(state): State<SharedState>) -> ApiResult {
    let session = state.session().await;
    Ok(Json(json!(session.view())))
}

/// POST /api/lookup
pub async fn lookup(
    State(state): State<SharedState>,
    Json(body): Json<LookupRequest>,
) -> ApiResult {
    let channel = state
        .session()
        .await
        .begin_lookup(&body.channel)
        .map_err(session_err)?;

    // Runs detached so a dropped request cannot leave the session loading.
    let task_state = state.clone();
    let task = tokio::spawn(async move {
        let outcome = task_state.client().channel_emotes(&channel).await;
        let mut session = task_state.session().await;
        session.finish_lookup(outcome);
        session.view()
    });

    settle_lookup(&state, task).await
}

/// Wait for a lookup task. A task that dies without reporting its outcome
/// still releases the session.
async fn settle_lookup(state: &SharedState, task: JoinHandle<SessionView>) -> ApiResult {
    match task.await {
        Ok(view) => Ok(Json(json!(view))),
        Err(e) => {
            tracing::error!("Lookup task failed: {e}");
            state.session().await.abort_lookup();
            Err(err_json(500, "Lookup task failed"))
        }
    }
}

/// PUT /api/settings
pub async fn update_settings(
    State(state): State<SharedState>,
    Json(body): Json<SettingsRequest>,
) -> ApiResult {
    let mut session = state.session().await;
    session.set_case_sensitive(body.case_sensitive);
    tracing::debug!(case_sensitive = body.case_sensitive, "Matching mode changed");
    Ok(Json(json!(session.view())))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::Router;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use emote_client::EmoteClient;

    use super::*;
    use crate::config::AppConfig;

    async fn stub_channel(Path(channel): Path<String>) -> Response {
        match channel.as_str() {
            "forsen" => Json(json!([
                {"animated": false, "code": "Kappa", "provider": 0,
                 "urls": [{"size": "1x", "url": "https://example.com/k/1x"},
                          {"size": "4x", "url": "https://example.com/k/4x"}],
                 "zero_width": false},
                {"animated": true, "code": "kappa", "provider": 1,
                 "urls": [{"size": "1x", "url": "https://example.com/k7/1x"}],
                 "zero_width": false},
                {"animated": false, "code": "Kappa", "provider": 3,
                 "urls": [], "zero_width": false},
                {"animated": false, "code": "EZ", "provider": 2,
                 "urls": [], "zero_width": false}
            ]))
            .into_response(),
            "broken" => StatusCode::BAD_GATEWAY.into_response(),
            _ => StatusCode::NOT_FOUND.into_response(),
        }
    }

    async fn test_state() -> SharedState {
        let app = Router::new().route("/v1/channel/{channel}/all", get(stub_channel));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client =
            EmoteClient::new(&format!("http://{addr}/v1"), Duration::from_secs(5)).unwrap();
        SharedState::with_client(AppConfig::default(), client)
    }

    async fn run_lookup(state: &SharedState, channel: &str) -> ApiResult {
        lookup(
            State(state.clone()),
            Json(LookupRequest {
                channel: channel.into(),
            }),
        )
        .await
    }

    #[tokio::test]
    async fn lookup_returns_duplicate_groups() {
        let state = test_state().await;
        let Json(view) = run_lookup(&state, "  forsen ").await.unwrap();

        assert_eq!(view["channel"], "forsen");
        assert_eq!(view["loading"], false);
        assert_eq!(view["error"], Value::Null);
        assert_eq!(view["emote_count"], 4);
        assert_eq!(view["groups"].as_array().unwrap().len(), 1);
        assert_eq!(view["groups"][0]["name"], "Kappa");
        assert_eq!(view["groups"][0]["count"], 2);
        assert_eq!(
            view["groups"][0]["emotes"][0]["image_url"],
            "https://example.com/k/4x"
        );
        assert_eq!(view["groups"][0]["emotes"][1]["provider_name"], "FFZ");
    }

    #[tokio::test]
    async fn toggling_case_regroups_last_result() {
        let state = test_state().await;
        run_lookup(&state, "forsen").await.unwrap();

        let Json(view) = update_settings(
            State(state.clone()),
            Json(SettingsRequest {
                case_sensitive: false,
            }),
        )
        .await
        .unwrap();
        assert_eq!(view["case_sensitive"], false);
        assert_eq!(view["groups"][0]["count"], 3);
        assert_eq!(view["groups"][0]["variations"], json!(["Kappa", "kappa"]));
        assert_eq!(view["stats"]["total_duplicates"], 3);

        let Json(again) = get_session(State(state.clone())).await.unwrap();
        assert_eq!(again, view);
    }

    #[tokio::test]
    async fn upstream_errors_land_in_view() {
        let state = test_state().await;

        let Json(view) = run_lookup(&state, "xyz").await.unwrap();
        assert_eq!(view["error"], "Channel \"xyz\" not found");
        assert_eq!(view["groups"], json!([]));

        let Json(view) = run_lookup(&state, "broken").await.unwrap();
        assert_eq!(view["error"], "Failed to fetch emotes (HTTP 502)");

        let Json(view) = run_lookup(&state, "forsen").await.unwrap();
        assert_eq!(view["error"], Value::Null);
    }

    #[tokio::test]
    async fn rejects_empty_and_overlapping_lookups() {
        let state = test_state().await;

        let (status, Json(body)) = run_lookup(&state, "   ").await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Channel name is required");

        state.session().await.begin_lookup("forsen").unwrap();
        let (status, _) = run_lookup(&state, "xqc").await.unwrap_err();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(state.session().await.channel(), "forsen");
    }

    #[tokio::test]
    async fn crashed_lookup_task_releases_session() {
        let state = test_state().await;
        state.session().await.begin_lookup("forsen").unwrap();

        let task: JoinHandle<SessionView> = tokio::spawn(async {
            if true {
                panic!("lookup crashed");
            }
            emote_client::Session::default().view()
        });
        let (status, _) = settle_lookup(&state, task).await.unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        {
            let session = state.session().await;
            assert!(!session.is_loading());
            assert_eq!(session.error(), Some(emote_client::GENERIC_ERROR_MESSAGE));
        }

        let Json(view) = run_lookup(&state, "forsen").await.unwrap();
        assert_eq!(view["error"], Value::Null);
        assert_eq!(view["groups"][0]["name"], "Kappa");
    }
}
