//! The interpret endpoint served for real, queried by the remote client

use handsfree::config::RemoteConfig;
use handsfree::heuristic::Heuristic;
use handsfree::intent::{Action, NavTarget};
use handsfree::remote::RemoteInterpreter;
use handsfree::server::InterpretServer;
use serde_json::{Value, json};
use std::sync::Arc;

async fn server() -> InterpretServer {
    let heuristic = Arc::new(Heuristic::new(&["hey".into(), "platform".into()]));
    InterpretServer::start("127.0.0.1:0", heuristic)
        .await
        .expect("bind ephemeral port")
}

#[tokio::test]
async fn test_client_and_server_agree() {
    let server = server().await;
    let remote = RemoteInterpreter::new(&RemoteConfig {
        enabled: true,
        url: server.url(),
        timeout_ms: 1200,
    });

    let intent = remote
        .interpret("hey platform could you take me over to my profile")
        .await
        .expect("intent");
    assert_eq!(intent.action, Action::navigate(NavTarget::Profile));
    assert!(!intent.utterance.is_empty());

    assert_eq!(remote.interpret("the weather is nice").await, None);
}

#[tokio::test]
async fn test_response_shape() {
    let server = server().await;
    let response = reqwest::Client::new()
        .post(server.url())
        .json(&json!({"transcript": "um show me some puzzle games"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["intent"]["type"], "filter");
    assert_eq!(body["intent"]["tag"], "Puzzle");

    let response = reqwest::Client::new()
        .post(server.url())
        .json(&json!({"transcript": "the weather is nice"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"intent": null}));
}

#[tokio::test]
async fn test_missing_or_blank_transcript_is_bad_request() {
    let server = server().await;
    let client = reqwest::Client::new();

    for body in [json!({}), json!({"transcript": "   "}), json!({"transcript": null})] {
        let response = client.post(server.url()).json(&body).send().await.unwrap();
        assert_eq!(response.status(), 400, "{}", body);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
    }

    let response = client
        .post(server.url())
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}
