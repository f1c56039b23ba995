mod common;

use serde_json::json;
use startsnap::error::Error;
use uuid::Uuid;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::*;

#[tokio::test]
async fn fetch_threads_embeds_and_orders_replies() {
    let (server, client) = setup().await;
    let startsnap_id = Uuid::new_v4();
    let feedback_id = Uuid::new_v4();
    let author = Uuid::new_v4();

    let mut thread = feedback_row(feedback_id, startsnap_id, author, "Love the onboarding flow");
    thread["feedback_replies"] = json!([
        reply_row(Uuid::new_v4(), feedback_id, author, "second", "2024-05-01T12:00:00Z"),
        reply_row(Uuid::new_v4(), feedback_id, author, "first", "2024-05-01T11:00:00Z"),
    ]);

    Mock::given(method("GET"))
        .and(path("/rest/v1/feedbacks"))
        .and(query_param("select", "*,feedback_replies(*)"))
        .and(query_param("startsnap_id", format!("eq.{}", startsnap_id)))
        .and(query_param("order", "created_at.asc"))
        .and(query_param("feedback_replies.order", "created_at.asc"))
        .and(header("apikey", ANON_KEY))
        .and(header("Authorization", format!("Bearer {}", ANON_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([thread])))
        .expect(1)
        .mount(&server)
        .await;

    let threads = client.feedback().fetch_threads(startsnap_id).await.unwrap();

    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].feedback.id, feedback_id);
    let replies: Vec<&str> = threads[0].replies.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(replies, vec!["first", "second"]);
}

#[tokio::test]
async fn add_feedback_inserts_once_and_refetches_once() {
    let (server, client, user_id) = setup_signed_in().await;
    let startsnap_id = Uuid::new_v4();
    let feedback_id = Uuid::new_v4();
    let content = "The pricing page is really clear";

    Mock::given(method("POST"))
        .and(path("/rest/v1/feedbacks"))
        .and(header("Authorization", bearer().as_str()))
        .and(header("Prefer", "return=representation"))
        .and(body_json(json!({
            "startsnap_id": startsnap_id,
            "user_id": user_id,
            "content": content
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([feedback_row(feedback_id, startsnap_id, user_id, content)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/feedbacks"))
        .and(query_param("startsnap_id", format!("eq.{}", startsnap_id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([feedback_row(feedback_id, startsnap_id, user_id, content)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let threads = client
        .feedback()
        .add_feedback(startsnap_id, &format!("  {}  ", content))
        .await
        .unwrap();

    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].feedback.content, content);
}

#[tokio::test]
async fn invalid_feedback_never_reaches_the_backend() {
    let (server, client, _) = setup_signed_in().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let service = client.feedback();
    let startsnap_id = Uuid::new_v4();

    let empty = service.add_feedback(startsnap_id, "   ").await.unwrap_err();
    assert!(matches!(empty, Error::Validation(ref e) if e.field == "content"));

    let short = service.add_feedback(startsnap_id, "meh").await.unwrap_err();
    assert!(matches!(short, Error::Validation(_)));

    let reply = service
        .add_reply(startsnap_id, Uuid::new_v4(), "")
        .await
        .unwrap_err();
    assert!(matches!(reply, Error::Validation(_)));
}

#[tokio::test]
async fn add_feedback_requires_sign_in() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .feedback()
        .add_feedback(Uuid::new_v4(), "Looks great, ship it!")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
}

#[tokio::test]
async fn failed_insert_does_not_refetch() {
    let (server, client, _) = setup_signed_in().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/feedbacks"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "23502",
            "message": "null value in column \"content\" violates not-null constraint"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .feedback()
        .add_feedback(Uuid::new_v4(), "Great demo video!")
        .await
        .unwrap_err();

    let api = err.api_error().expect("api error");
    assert_eq!(api.status, 400);
    assert_eq!(api.code.as_deref(), Some("23502"));
}

#[tokio::test]
async fn edit_feedback_filters_by_id_and_author() {
    let (server, client, user_id) = setup_signed_in().await;
    let startsnap_id = Uuid::new_v4();
    let feedback_id = Uuid::new_v4();

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/feedbacks"))
        .and(query_param("id", format!("eq.{}", feedback_id)))
        .and(query_param("user_id", format!("eq.{}", user_id)))
        .and(body_partial_json(json!({ "content": "Edited: the docs are great" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([feedback_row(
            feedback_id,
            startsnap_id,
            user_id,
            "Edited: the docs are great"
        )])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/feedbacks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client
        .feedback()
        .edit_feedback(startsnap_id, feedback_id, "Edited: the docs are great")
        .await
        .unwrap();
}

#[tokio::test]
async fn edit_of_foreign_feedback_is_not_found() {
    let (server, client, _) = setup_signed_in().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/feedbacks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .feedback()
        .edit_feedback(Uuid::new_v4(), Uuid::new_v4(), "Trying to edit someone else")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn delete_feedback_removes_replies_first() {
    let (server, client, user_id) = setup_signed_in().await;
    let startsnap_id = Uuid::new_v4();
    let feedback_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/feedbacks"))
        .and(query_param("id", format!("eq.{}", feedback_id)))
        .and(query_param("user_id", format!("eq.{}", user_id)))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([feedback_row(
            feedback_id,
            startsnap_id,
            user_id,
            "This will be deleted"
        )])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/feedback_replies"))
        .and(query_param("parent_feedback_id", format!("eq.{}", feedback_id)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/feedbacks"))
        .and(query_param("id", format!("eq.{}", feedback_id)))
        .and(query_param("user_id", format!("eq.{}", user_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([feedback_row(
            feedback_id,
            startsnap_id,
            user_id,
            "This will be deleted"
        )])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/feedbacks"))
        .and(query_param("startsnap_id", format!("eq.{}", startsnap_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let threads = client
        .feedback()
        .delete_feedback(startsnap_id, feedback_id)
        .await
        .unwrap();
    assert!(threads.is_empty());

    let requests = server.received_requests().await.unwrap();
    let deletes: Vec<String> = requests
        .iter()
        .filter(|r| r.method.to_string() == "DELETE")
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(
        deletes,
        vec![
            "/rest/v1/feedback_replies".to_string(),
            "/rest/v1/feedbacks".to_string()
        ]
    );
}

#[tokio::test]
async fn failed_reply_delete_keeps_feedback() {
    let (server, client, user_id) = setup_signed_in().await;
    let startsnap_id = Uuid::new_v4();
    let feedback_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/feedbacks"))
        .and(query_param("id", format!("eq.{}", feedback_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([feedback_row(
            feedback_id,
            startsnap_id,
            user_id,
            "Keep me around"
        )])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/feedback_replies"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/feedbacks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .feedback()
        .delete_feedback(startsnap_id, feedback_id)
        .await
        .unwrap_err();
    assert_eq!(err.api_error().unwrap().message.as_deref(), Some("boom"));
}

#[tokio::test]
async fn deleting_someone_elses_feedback_deletes_nothing() {
    let (server, client, user_id) = setup_signed_in().await;
    let feedback_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/feedbacks"))
        .and(query_param("id", format!("eq.{}", feedback_id)))
        .and(query_param("user_id", format!("eq.{}", user_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .feedback()
        .delete_feedback(Uuid::new_v4(), feedback_id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.method.to_string() != "DELETE"));
}

#[tokio::test]
async fn add_reply_inserts_once_and_refetches_once() {
    let (server, client, user_id) = setup_signed_in().await;
    let startsnap_id = Uuid::new_v4();
    let feedback_id = Uuid::new_v4();
    let reply_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/rest/v1/feedback_replies"))
        .and(body_json(json!({
            "parent_feedback_id": feedback_id,
            "user_id": user_id,
            "content": "Thanks, fixed!"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([reply_row(
            reply_id,
            feedback_id,
            user_id,
            "Thanks, fixed!",
            "2024-05-01T11:00:00Z"
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let mut thread = feedback_row(
        feedback_id,
        startsnap_id,
        Uuid::new_v4(),
        "Found a typo on the homepage",
    );
    thread["feedback_replies"] = json!([reply_row(
        reply_id,
        feedback_id,
        user_id,
        "Thanks, fixed!",
        "2024-05-01T11:00:00Z"
    )]);

    Mock::given(method("GET"))
        .and(path("/rest/v1/feedbacks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([thread])))
        .expect(1)
        .mount(&server)
        .await;

    let threads = client
        .feedback()
        .add_reply(startsnap_id, feedback_id, "Thanks, fixed!")
        .await
        .unwrap();
    assert_eq!(threads[0].replies[0].id, reply_id);
}

#[tokio::test]
async fn edit_and_delete_reply_are_author_scoped() {
    let (server, client, user_id) = setup_signed_in().await;
    let startsnap_id = Uuid::new_v4();
    let feedback_id = Uuid::new_v4();
    let reply_id = Uuid::new_v4();
    let row = reply_row(reply_id, feedback_id, user_id, "updated", "2024-05-01T11:00:00Z");

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/feedback_replies"))
        .and(query_param("id", format!("eq.{}", reply_id)))
        .and(query_param("user_id", format!("eq.{}", user_id)))
        .and(body_partial_json(json!({ "content": "updated" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row.clone()])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/feedback_replies"))
        .and(query_param("id", format!("eq.{}", reply_id)))
        .and(query_param("user_id", format!("eq.{}", user_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/feedbacks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let service = client.feedback();
    service.edit_reply(startsnap_id, reply_id, " updated ").await.unwrap();
    service.delete_reply(startsnap_id, reply_id).await.unwrap();
}
