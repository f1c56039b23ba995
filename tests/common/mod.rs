#![allow(dead_code)]

use serde_json::{json, Value};
use startsnap::auth::{Session, User};
use startsnap::config::Config;
use startsnap::StartSnapClient;
use uuid::Uuid;
use wiremock::MockServer;

pub const ANON_KEY: &str = "test-anon-key";
pub const ACCESS_TOKEN: &str = "test-access-token";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Mock server plus a client pointed at it, signed out
pub async fn setup() -> (MockServer, StartSnapClient) {
    init_tracing();
    let server = MockServer::start().await;
    let config = Config::new(&server.uri(), ANON_KEY).unwrap();
    let client = StartSnapClient::new(config);
    (server, client)
}

/// Mock server plus a client signed in as a fresh user
pub async fn setup_signed_in() -> (MockServer, StartSnapClient, Uuid) {
    let (server, client) = setup().await;
    let user_id = Uuid::new_v4();
    client
        .auth()
        .set_session(Session::new(
            ACCESS_TOKEN,
            "test-refresh-token",
            User::new(user_id),
            3600,
        ));
    (server, client, user_id)
}

pub fn bearer() -> String {
    format!("Bearer {}", ACCESS_TOKEN)
}

pub fn feedback_row(id: Uuid, startsnap_id: Uuid, user_id: Uuid, content: &str) -> Value {
    json!({
        "id": id,
        "startsnap_id": startsnap_id,
        "user_id": user_id,
        "content": content,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": null
    })
}

pub fn reply_row(
    id: Uuid,
    feedback_id: Uuid,
    user_id: Uuid,
    content: &str,
    created_at: &str,
) -> Value {
    json!({
        "id": id,
        "parent_feedback_id": feedback_id,
        "user_id": user_id,
        "content": content,
        "created_at": created_at
    })
}

pub fn vibe_log_row(
    id: Uuid,
    startsnap_id: Uuid,
    log_type: &str,
    title: &str,
    content: &str,
) -> Value {
    json!({
        "id": id,
        "startsnap_id": startsnap_id,
        "log_type": log_type,
        "title": title,
        "content": content,
        "created_at": "2024-05-02T09:30:00Z"
    })
}

pub fn startsnap_row(id: Uuid, user_id: Uuid, supporters: &[Uuid]) -> Value {
    json!({
        "id": id,
        "user_id": user_id,
        "name": "Snapdeck",
        "description": "Turn screenshots into a slide deck",
        "category": "productivity",
        "type": "live",
        "screenshot_urls": ["https://cdn.example/1.png"],
        "tags": ["ai"],
        "tools_used": ["rust"],
        "feedback_tags": ["ux"],
        "is_hackathon_entry": true,
        "support_count": supporters.len(),
        "supporters": supporters,
        "created_at": "2024-04-30T08:00:00Z"
    })
}

pub fn profile_row(user_id: Uuid, username: &str) -> Value {
    json!({
        "user_id": user_id,
        "username": username,
        "bio": "Building in public",
        "status": "shipping",
        "github_url": "https://github.com/example"
    })
}
