// Integration tests for /api/v1/groups.

use actix_web::test::TestRequest;
use serde_json::{json, Value};

use super::fixture::{send, Fixture};
use crate::support::create_test_app;

fn member_ids(group: &Value) -> Vec<i64> {
    let mut ids: Vec<i64> = group["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect();
    ids.sort_unstable();
    ids
}

#[actix_web::test]
async fn create_group_adds_creator_and_known_users() {
    let (fx, state) = Fixture::new().await;
    let alice = fx.user("alice@x.com").await;
    let bob = fx.user("bob@x.com").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let (status, group) = send(
        &app,
        TestRequest::post().uri("/api/v1/groups").set_json(json!({
            "name": "Hiking",
            "description": "Weekend trips",
            "userIds": [bob.id, 424242, bob.id]
        })),
        Some(&fx.bearer(&alice)),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(group["name"], "Hiking");
    assert_eq!(group["description"], "Weekend trips");
    assert_eq!(group["createdBy"], alice.id);
    assert_eq!(group["creatorEmail"], "alice@x.com");
    assert_eq!(member_ids(&group), vec![alice.id, bob.id]);
    assert!(group["members"][0].get("passwordHash").is_none());
}

#[actix_web::test]
async fn duplicate_or_blank_names_are_rejected() {
    let (fx, state) = Fixture::new().await;
    let alice = fx.user("alice@x.com").await;
    let app = create_test_app(state).with_prod_routes().build().await;
    let auth = fx.bearer(&alice);

    let create = |name: &str| {
        TestRequest::post()
            .uri("/api/v1/groups")
            .set_json(json!({ "name": name }))
    };

    let (status, _) = send(&app, create("Book club"), Some(&auth)).await;
    assert_eq!(status, 201);

    let (status, body) = send(&app, create("Book club"), Some(&auth)).await;
    assert_eq!(status, 409);
    assert_eq!(body["code"], "UNIQUE_GROUP_NAME");

    let (status, body) = send(&app, create("   "), Some(&auth)).await;
    assert_eq!(status, 422);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(&app, create("Anonymous"), None).await;
    assert_eq!(status, 401);
}

#[actix_web::test]
async fn group_visibility_and_listings() {
    let (fx, state) = Fixture::new().await;
    let alice = fx.user("alice@x.com").await;
    let bob = fx.user("bob@x.com").await;
    let eve = fx.user("eve@x.com").await;
    let admin = fx.admin("admin@x.com").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let (_, owned) = send(
        &app,
        TestRequest::post()
            .uri("/api/v1/groups")
            .set_json(json!({ "name": "Alice's", "userIds": [bob.id] })),
        Some(&fx.bearer(&alice)),
    )
    .await;
    let (_, joined) = send(
        &app,
        TestRequest::post()
            .uri("/api/v1/groups")
            .set_json(json!({ "name": "Bob's", "userIds": [alice.id] })),
        Some(&fx.bearer(&bob)),
    )
    .await;

    let uri = format!("/api/v1/groups/{}", owned["id"]);
    let (status, _) = send(&app, TestRequest::get().uri(&uri), Some(&fx.bearer(&bob))).await;
    assert_eq!(status, 200);
    let (status, body) = send(&app, TestRequest::get().uri(&uri), Some(&fx.bearer(&eve))).await;
    assert_eq!(status, 403);
    assert_eq!(body["code"], "NOT_A_MEMBER");
    let (status, _) = send(&app, TestRequest::get().uri(&uri), Some(&fx.bearer(&admin))).await;
    assert_eq!(status, 200);
    let (status, body) =
        send(&app, TestRequest::get().uri("/api/v1/groups/9999"), Some(&fx.bearer(&admin))).await;
    assert_eq!(status, 404);
    assert_eq!(body["code"], "GROUP_NOT_FOUND");

    let alice_auth = fx.bearer(&alice);
    let (status, mine) = send(
        &app,
        TestRequest::get().uri("/api/v1/groups/my-groups"),
        Some(&alice_auth),
    )
    .await;
    assert_eq!(status, 200);
    let mut names: Vec<&str> = mine
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    assert_eq!(names, ["Alice's", "Bob's"]);

    let (status, created) = send(
        &app,
        TestRequest::get().uri("/api/v1/groups/my-created-groups"),
        Some(&alice_auth),
    )
    .await;
    assert_eq!(status, 200);
    let created = created.as_array().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["id"], owned["id"]);
    assert_ne!(created[0]["id"], joined["id"]);
}

#[actix_web::test]
async fn membership_changes_are_creator_only() {
    let (fx, state) = Fixture::new().await;
    let alice = fx.user("alice@x.com").await;
    let bob = fx.user("bob@x.com").await;
    let carol = fx.user("carol@x.com").await;
    let admin = fx.admin("admin@x.com").await;
    let app = create_test_app(state).with_prod_routes().build().await;
    let alice_auth = fx.bearer(&alice);

    let (_, group) = send(
        &app,
        TestRequest::post()
            .uri("/api/v1/groups")
            .set_json(json!({ "name": "Team", "userIds": [bob.id] })),
        Some(&alice_auth),
    )
    .await;
    let users_uri = format!("/api/v1/groups/{}/users", group["id"]);

    let (status, body) = send(
        &app,
        TestRequest::post()
            .uri(&users_uri)
            .set_json(json!({ "userIds": [carol.id] })),
        Some(&fx.bearer(&bob)),
    )
    .await;
    assert_eq!(status, 403);
    assert_eq!(body["code"], "NOT_OWNER");

    let (status, updated) = send(
        &app,
        TestRequest::post()
            .uri(&users_uri)
            .set_json(json!({ "userIds": [carol.id, bob.id, 31337] })),
        Some(&alice_auth),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(member_ids(&updated), vec![alice.id, bob.id, carol.id]);

    let (status, body) = send(
        &app,
        TestRequest::delete()
            .uri(&users_uri)
            .set_json(json!({ "userIds": [alice.id] })),
        Some(&alice_auth),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, updated) = send(
        &app,
        TestRequest::delete()
            .uri(&users_uri)
            .set_json(json!({ "userIds": [bob.id] })),
        Some(&fx.bearer(&admin)),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(member_ids(&updated), vec![alice.id, carol.id]);
}

#[actix_web::test]
async fn delete_group_by_creator() {
    let (fx, state) = Fixture::new().await;
    let alice = fx.user("alice@x.com").await;
    let bob = fx.user("bob@x.com").await;
    let app = create_test_app(state).with_prod_routes().build().await;
    let alice_auth = fx.bearer(&alice);

    let (_, group) = send(
        &app,
        TestRequest::post()
            .uri("/api/v1/groups")
            .set_json(json!({ "name": "Temp", "userIds": [bob.id] })),
        Some(&alice_auth),
    )
    .await;
    let uri = format!("/api/v1/groups/{}", group["id"]);

    let (status, _) = send(&app, TestRequest::delete().uri(&uri), Some(&fx.bearer(&bob))).await;
    assert_eq!(status, 403);

    let (status, _) = send(&app, TestRequest::delete().uri(&uri), Some(&alice_auth)).await;
    assert_eq!(status, 204);

    let (status, _) = send(&app, TestRequest::get().uri(&uri), Some(&alice_auth)).await;
    assert_eq!(status, 404);

    // The name is free again
    let (status, _) = send(
        &app,
        TestRequest::post()
            .uri("/api/v1/groups")
            .set_json(json!({ "name": "Temp" })),
        Some(&alice_auth),
    )
    .await;
    assert_eq!(status, 201);
}
