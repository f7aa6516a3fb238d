//! End-to-end tests of the task endpoint, driven through the axum router

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use a2a_bridge::{
    agent::{Agent, AgentMessage, Generation, InMemoryRegistry},
    pipeline::{FixedClock, SequentialIdGenerator},
    server,
    service::TaskBridgeBuilder,
};

/// Agent returning a canned generation and recording what it was sent
#[derive(Default)]
struct ScriptedAgent {
    reply: Generation,
    received: Mutex<Vec<Vec<AgentMessage>>>,
}

impl ScriptedAgent {
    fn replying(reply: Generation) -> Arc<Self> {
        Arc::new(Self {
            reply,
            received: Mutex::new(Vec::new()),
        })
    }

    fn received(&self) -> Vec<Vec<AgentMessage>> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl Agent for ScriptedAgent {
    async fn generate(&self, messages: Vec<AgentMessage>) -> anyhow::Result<Generation> {
        self.received.lock().unwrap().push(messages);
        Ok(self.reply.clone())
    }
}

struct FailingAgent;

#[async_trait]
impl Agent for FailingAgent {
    async fn generate(&self, _messages: Vec<AgentMessage>) -> anyhow::Result<Generation> {
        anyhow::bail!("weather service unavailable")
    }
}

struct HangingAgent;

#[async_trait]
impl Agent for HangingAgent {
    async fn generate(&self, _messages: Vec<AgentMessage>) -> anyhow::Result<Generation> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Generation::text("never"))
    }
}

fn app_with(agent_id: &str, agent: Arc<dyn Agent>) -> Router {
    let registry = InMemoryRegistry::new().with_agent(agent_id, agent);
    server::router(TaskBridgeBuilder::new(Arc::new(registry)).build())
}

async fn post(app: Router, agent_id: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/a2a/agent/{agent_id}"))
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(app: Router, agent_id: &str, body: Value) -> (StatusCode, Value) {
    post(app, agent_id, body.to_string()).await
}

fn send(params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": "r1",
        "method": "message/send",
        "params": params
    })
}

fn text_message(text: &str) -> Value {
    json!({"role": "user", "parts": [{"kind": "text", "text": text}]})
}

#[tokio::test]
async fn test_text_artifact_matches_generation() {
    let agent = ScriptedAgent::replying(Generation::text("Feeling sunny today!"));
    let app = app_with("moodAgent", agent.clone());

    let (status, body) = post_json(
        app,
        "moodAgent",
        send(json!({"message": text_message("I feel great")})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], "r1");

    let result = &body["result"];
    assert_eq!(result["kind"], "task");
    assert_eq!(result["status"]["state"], "completed");
    assert_eq!(result["status"]["message"]["role"], "agent");
    assert_eq!(result["status"]["message"]["content"], "Feeling sunny today!");

    let artifacts = result["artifacts"].as_array().unwrap();
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0]["name"], "moodAgentResponse");
    assert_eq!(
        artifacts[0]["parts"],
        json!([{"kind": "text", "text": "Feeling sunny today!"}])
    );
    assert!(artifacts[0]["artifactId"].is_string());

    assert_eq!(
        agent.received(),
        vec![vec![AgentMessage::new("user", "I feel great")]]
    );
}

#[tokio::test]
async fn test_normalized_content_reaches_agent() {
    let agent = ScriptedAgent::replying(Generation::text("ok"));
    let app = app_with("moodAgent", agent.clone());

    let (status, body) = post_json(
        app,
        "moodAgent",
        send(json!({
            "message": {
                "parts": [
                    {"kind": "text", "text": "hi"},
                    {"kind": "data", "data": {"a": 1}}
                ]
            }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        agent.received(),
        vec![vec![AgentMessage::new("user", "hi\n{\"a\":1}")]]
    );
    assert_eq!(body["result"]["history"][0]["content"], "hi\n{\"a\":1}");
}

#[tokio::test]
async fn test_wrong_protocol_version() {
    // Rejected before the agent lookup, so an unknown agent does not matter
    let app = app_with("moodAgent", ScriptedAgent::replying(Generation::default()));

    let (status, body) = post_json(
        app,
        "unknown",
        json!({
            "jsonrpc": "1.0",
            "id": "r1",
            "params": {"message": text_message("hi")}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["id"], "r1");
    assert_eq!(body["error"]["code"], -32600);
    assert_eq!(
        body["error"]["message"],
        "Invalid Request: jsonrpc must be \"2.0\" and id is required"
    );
}

#[tokio::test]
async fn test_missing_request_id() {
    let app = app_with("moodAgent", ScriptedAgent::replying(Generation::default()));

    let (status, body) = post_json(
        app,
        "moodAgent",
        json!({"jsonrpc": "2.0", "params": {"message": text_message("hi")}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["id"], Value::Null);
    assert_eq!(body["error"]["code"], -32600);
}

#[tokio::test]
async fn test_history_length_and_order() {
    let app = app_with("moodAgent", ScriptedAgent::replying(Generation::text("three")));

    let (_, body) = post_json(
        app,
        "moodAgent",
        send(json!({
            "messages": [
                text_message("one"),
                {"role": "agent", "parts": [{"kind": "text", "text": "two"}]},
                {"parts": [{"kind": "image", "url": "https://example.com/cat.png"}]}
            ]
        })),
    )
    .await;

    let history = body["result"]["history"].as_array().unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(history[0]["content"], "one");
    assert_eq!(history[1]["role"], "agent");
    assert_eq!(
        history[2]["parts"],
        json!([{"kind": "image", "url": "https://example.com/cat.png"}])
    );
    assert_eq!(history[2]["content"], "");
    assert_eq!(history[3]["role"], "agent");
    assert_eq!(history[3]["content"], "three");

    for entry in history {
        assert_eq!(entry["kind"], "message");
        assert!(entry["messageId"].is_string());
        assert!(entry["taskId"].is_string());
    }
}

#[tokio::test]
async fn test_empty_tool_results_add_no_artifact() {
    let app = app_with("moodAgent", ScriptedAgent::replying(Generation::text("plain")));

    let (_, body) = post_json(app, "moodAgent", send(json!({"message": text_message("x")}))).await;
    assert_eq!(body["result"]["artifacts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_tool_results_artifact() {
    let generation = Generation::text("It is 31°C in Lagos")
        .with_tool_result(json!({"city": "Lagos", "temperature": 31}));
    let app = app_with("moodAgent", ScriptedAgent::replying(generation));

    let (_, body) = post_json(app, "moodAgent", send(json!({"message": text_message("x")}))).await;

    let artifacts = body["result"]["artifacts"].as_array().unwrap();
    assert_eq!(artifacts.len(), 2);
    assert_eq!(artifacts[1]["name"], "ToolResults");
    assert_eq!(
        artifacts[1]["parts"],
        json!([{"kind": "data", "data": {"city": "Lagos", "temperature": 31}}])
    );
}

#[tokio::test]
async fn test_identifiers_round_trip() {
    let app = app_with("moodAgent", ScriptedAgent::replying(Generation::text("x")));

    let (_, body) = post_json(
        app,
        "moodAgent",
        send(json!({
            "message": text_message("x"),
            "taskId": "T1",
            "contextId": "C1"
        })),
    )
    .await;

    assert_eq!(body["result"]["id"], "T1");
    assert_eq!(body["result"]["contextId"], "C1");
    assert_eq!(body["result"]["history"][0]["taskId"], "T1");
}

#[tokio::test]
async fn test_numeric_identifiers_are_accepted() {
    let app = app_with("moodAgent", ScriptedAgent::replying(Generation::text("x")));

    let (status, body) = post_json(
        app,
        "moodAgent",
        send(json!({
            "message": {
                "role": "user",
                "parts": [{"kind": "text", "text": "x"}],
                "messageId": 7
            },
            "taskId": 42
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["id"], "42");
    assert_eq!(body["result"]["history"][0]["messageId"], "7");
    assert_eq!(body["result"]["history"][0]["taskId"], "42");
}

#[tokio::test]
async fn test_history_keeps_part_metadata() {
    let app = app_with("moodAgent", ScriptedAgent::replying(Generation::text("x")));
    let parts = json!([
        {"kind": "text", "text": "hi", "metadata": {"lang": "en"}},
        {"kind": "data", "data": {"mood": "calm"}, "metadata": {"source": "form"}}
    ]);

    let (status, body) = post_json(
        app,
        "moodAgent",
        send(json!({"message": {"role": "user", "parts": parts.clone()}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["history"][0]["parts"], parts);
}

#[tokio::test]
async fn test_unknown_agent_scenario() {
    let app = server::router(TaskBridgeBuilder::new(Arc::new(InMemoryRegistry::new())).build());

    let (status, body) = post_json(
        app,
        "unknown",
        json!({
            "jsonrpc": "2.0",
            "id": "r1",
            "params": {"message": {"parts": [{"kind": "text", "text": "hello"}]}}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "jsonrpc": "2.0",
            "id": "r1",
            "error": {"code": -32602, "message": "Agent 'unknown' not found"}
        })
    );
}

#[tokio::test]
async fn test_no_messages_scenario() {
    let app = app_with("moodAgent", ScriptedAgent::replying(Generation::text("x")));

    let (status, body) = post_json(app, "moodAgent", send(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["id"], "r1");
    assert_eq!(body["error"]["code"], -32602);
    assert_eq!(body["error"]["message"], "No messages provided in params");
}

#[tokio::test]
async fn test_agent_failure_is_internal_error() {
    let app = app_with("moodAgent", Arc::new(FailingAgent));

    let (status, body) = post_json(app, "moodAgent", send(json!({"message": text_message("x")}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["id"], Value::Null);
    assert_eq!(body["error"]["code"], -32603);
    assert_eq!(body["error"]["message"], "Internal error");
    assert_eq!(body["error"]["data"]["details"], "weather service unavailable");
}

#[tokio::test]
async fn test_malformed_body_is_internal_error() {
    let app = app_with("moodAgent", ScriptedAgent::replying(Generation::text("x")));

    let (status, body) = post(app, "moodAgent", "{\"jsonrpc\": \"2.0\",").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["id"], Value::Null);
    assert_eq!(body["error"]["code"], -32603);
    assert!(body["error"]["data"]["details"].is_string());
}

#[tokio::test(start_paused = true)]
async fn test_invocation_timeout() {
    let registry = InMemoryRegistry::new().with_agent("slowAgent", Arc::new(HangingAgent));
    let bridge = TaskBridgeBuilder::new(Arc::new(registry))
        .with_invocation_timeout(Duration::from_secs(2))
        .build();

    let (status, body) = post_json(
        server::router(bridge),
        "slowAgent",
        send(json!({"message": text_message("x")})),
    )
    .await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["id"], "r1");
    assert_eq!(body["error"]["code"], -32001);
    assert_eq!(
        body["error"]["message"],
        "Agent invocation timed out after 2000ms"
    );
}

#[tokio::test]
async fn test_deterministic_ids_and_timestamp() {
    let registry = InMemoryRegistry::new().with_agent(
        "moodAgent",
        ScriptedAgent::replying(Generation::text("x")) as Arc<dyn Agent>,
    );
    let bridge = TaskBridgeBuilder::new(Arc::new(registry))
        .with_id_generator(Arc::new(SequentialIdGenerator::new("id")))
        .with_clock(Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap(),
        )))
        .build();

    let (_, body) = post_json(
        server::router(bridge),
        "moodAgent",
        send(json!({"message": text_message("x")})),
    )
    .await;

    let result = &body["result"];
    assert_eq!(result["status"]["timestamp"], "2025-03-14T15:09:26.000Z");

    let mut ids = vec![
        result["id"].as_str().unwrap(),
        result["contextId"].as_str().unwrap(),
        result["artifacts"][0]["artifactId"].as_str().unwrap(),
        result["history"][0]["messageId"].as_str().unwrap(),
        result["history"][1]["messageId"].as_str().unwrap(),
    ];
    assert!(ids.iter().all(|id| id.starts_with("id-")));
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 5);
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let agent = ScriptedAgent::replying(Generation::text("pong"));
    let app = app_with("moodAgent", agent.clone());

    let requests = (0..16).map(|i| {
        let app = app.clone();
        async move {
            post_json(
                app,
                "moodAgent",
                json!({
                    "jsonrpc": "2.0",
                    "id": i,
                    "params": {"message": text_message(&format!("ping {i}"))}
                }),
            )
            .await
        }
    });
    let responses = futures::future::join_all(requests).await;

    let mut task_ids = HashSet::new();
    for (i, (status, body)) in responses.into_iter().enumerate() {
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], json!(i));
        assert_eq!(body["result"]["history"][0]["content"], format!("ping {i}"));
        task_ids.insert(body["result"]["id"].as_str().unwrap().to_string());
    }

    assert_eq!(task_ids.len(), 16);
    assert_eq!(agent.received().len(), 16);
}
