//! HTTP-level contract tests for the ArchNet API.
//!
//! These prove the deployed HTTP contract: JWT authentication, role gates,
//! ownership rules, the like toggle, feed ordering/mute exclusion and the
//! block rules around messaging. The router runs against the in-memory
//! fixture stores, so no database is required.

use axum::body::Body;
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use hyper::{Request, StatusCode};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use archnet_core::mem::MemStores;
use archnet_core::ports::{Stores, UserStore};
use archnet_core::principal::JwtClaims;
use archnet_core::types::{Role, User};
use archnet_server::middleware::jwt::JwtConfig;
use archnet_server::router::build_router;

// ── Test JWT helpers ───────────────────────────────────────────

const TEST_JWT_SECRET: &[u8] = b"test-secret-for-contract-tests";

fn make_jwt(id: Uuid, username: &str, role: &str) -> String {
    let claims = JwtClaims {
        sub: id.to_string(),
        username: username.to_string(),
        role: role.to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET),
    )
    .expect("failed to encode test JWT")
}

// ── Test app builder ───────────────────────────────────────────

fn build_test_app() -> (Router, Stores) {
    let stores = MemStores::stores();
    let app = build_router(stores.clone(), JwtConfig::from_secret(TEST_JWT_SECRET));
    (app, stores)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(
        |_| json!({ "raw": String::from_utf8_lossy(&bytes).to_string() }),
    )
}

/// Register through the API and mint a matching token.
async fn register_user(app: &Router, username: &str, role: &str) -> (Uuid, String) {
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "username": username,
                "email": format!("{username}@archnet.jo"),
                "password": "correct-horse-battery",
                "full_name": username,
                "role": role,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED, "register {username}");
    let body = body_json(resp).await;
    let id = Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();
    (id, make_jwt(id, username, role))
}

/// Admins cannot self-register; seed one directly into the fixture store.
async fn seed_admin(stores: &Stores) -> (Uuid, String) {
    let admin = User {
        id: Uuid::new_v4(),
        username: "admin".into(),
        email: "admin@archnet.jo".into(),
        password_hash: "unused".into(),
        full_name: "Site Admin".into(),
        role: Role::Admin,
        bio: None,
        location: None,
        website: None,
        avatar_url: None,
        created_at: Utc::now(),
    };
    stores.users.insert_user(&admin).await.unwrap();
    let token = make_jwt(admin.id, "admin", "admin");
    (admin.id, token)
}

async fn create_post(app: &Router, token: &str, content: &str) -> Uuid {
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/posts",
            Some(token),
            Some(json!({ "content": content })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    Uuid::parse_str(body["id"].as_str().unwrap()).unwrap()
}

// ── Auth ───────────────────────────────────────────────────────

#[tokio::test]
async fn health_needs_no_auth() {
    let (app, _) = build_test_app();
    let resp = app
        .oneshot(request("GET", "/api/health", None, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_route_without_token_is_401() {
    let (app, _) = build_test_app();
    let resp = app
        .oneshot(request("GET", "/api/feed", None, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_route_with_garbage_token_is_401() {
    let (app, _) = build_test_app();
    let resp = app
        .oneshot(request("GET", "/api/feed", Some("not-a-token"), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_registration_is_400() {
    let (app, stores) = build_test_app();
    register_user(&app, "zaid", "engineer").await;

    // same email, fresh username
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "username": "zaid2",
                "email": "zaid@archnet.jo",
                "password": "correct-horse-battery",
                "full_name": "Zaid",
                "role": "engineer",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // same username, fresh email
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "username": "zaid",
                "email": "zaid+alt@archnet.jo",
                "password": "correct-horse-battery",
                "full_name": "Zaid",
                "role": "engineer",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // neither rejected attempt created a row
    let users = stores.users.search_users(Some("zaid"), 10).await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn login_round_trip() {
    let (app, _) = build_test_app();
    register_user(&app, "nour", "student").await;

    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({
                "email": "nour@archnet.jo",
                "password": "correct-horse-battery",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();

    let resp = app
        .oneshot(request("GET", "/api/auth/me", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let me = body_json(resp).await;
    assert_eq!(me["username"], "nour");
}

#[tokio::test]
async fn login_with_wrong_password_is_401() {
    let (app, _) = build_test_app();
    register_user(&app, "rami", "student").await;
    let resp = app
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "rami@archnet.jo", "password": "wrong-password" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ── Role gates ─────────────────────────────────────────────────

#[tokio::test]
async fn students_cannot_publish_projects() {
    let (app, _) = build_test_app();
    let (_, student) = register_user(&app, "student1", "student").await;
    let (_, engineer) = register_user(&app, "engineer1", "engineer").await;

    let body = json!({ "title": "Amman infill housing", "description": "competition entry" });
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/projects",
            Some(&student),
            Some(body.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .oneshot(request("POST", "/api/projects", Some(&engineer), Some(body)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn job_posting_is_firm_or_admin_only() {
    let (app, _) = build_test_app();
    let (_, engineer) = register_user(&app, "engineer2", "engineer").await;
    let (_, firm) = register_user(&app, "firm2", "firm").await;

    let body = json!({
        "title": "Junior architect",
        "description": "BIM-heavy role",
        "company": "Atelier Petra",
    });
    let resp = app
        .clone()
        .oneshot(request("POST", "/api/jobs", Some(&engineer), Some(body.clone())))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .oneshot(request("POST", "/api/jobs", Some(&firm), Some(body)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
}

// ── Likes ──────────────────────────────────────────────────────

#[tokio::test]
async fn like_toggles_on_then_off() {
    let (app, _) = build_test_app();
    let (_, author) = register_user(&app, "author1", "engineer").await;
    let (_, reader) = register_user(&app, "reader1", "student").await;
    let post_id = create_post(&app, &author, "concrete shell formwork notes").await;

    let like = json!({ "target_type": "post", "target_id": post_id });
    let resp = app
        .clone()
        .oneshot(request("POST", "/api/likes", Some(&reader), Some(like.clone())))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["liked"], json!(true));
    assert_eq!(body["count"], json!(1));

    let resp = app
        .oneshot(request("POST", "/api/likes", Some(&reader), Some(like)))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["liked"], json!(false));
    assert_eq!(body["count"], json!(0));
}

#[tokio::test]
async fn liking_a_missing_target_is_404() {
    let (app, _) = build_test_app();
    let (_, reader) = register_user(&app, "reader2", "student").await;
    let resp = app
        .oneshot(request(
            "POST",
            "/api/likes",
            Some(&reader),
            Some(json!({ "target_type": "post", "target_id": Uuid::new_v4() })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ── Comments ───────────────────────────────────────────────────

#[tokio::test]
async fn comment_deletion_is_owner_or_admin() {
    let (app, stores) = build_test_app();
    let (_, author) = register_user(&app, "author3", "engineer").await;
    let (_, commenter) = register_user(&app, "commenter3", "student").await;
    let (_, stranger) = register_user(&app, "stranger3", "student").await;
    let (_, admin) = seed_admin(&stores).await;
    let post_id = create_post(&app, &author, "heritage facade survey").await;

    let mut comment_ids = Vec::new();
    for _ in 0..2 {
        let resp = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/comments",
                Some(&commenter),
                Some(json!({
                    "target_type": "post",
                    "target_id": post_id,
                    "content": "which mortar mix?",
                })),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        comment_ids.push(body["id"].as_str().unwrap().to_string());
    }

    // a third party may not delete
    let resp = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/comments/{}", comment_ids[0]),
            Some(&stranger),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // the owner may
    let resp = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/comments/{}", comment_ids[0]),
            Some(&commenter),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // so may an admin
    let resp = app
        .oneshot(request(
            "DELETE",
            &format!("/api/comments/{}", comment_ids[1]),
            Some(&admin),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn replies_cannot_nest_past_one_level() {
    let (app, _) = build_test_app();
    let (_, author) = register_user(&app, "author4", "engineer").await;
    let post_id = create_post(&app, &author, "passive cooling study").await;

    let make = |parent: Option<String>| {
        let mut body = json!({
            "target_type": "post",
            "target_id": post_id,
            "content": "note",
        });
        if let Some(parent) = parent {
            body["parent_id"] = json!(parent);
        }
        request("POST", "/api/comments", Some(&author), Some(body))
    };

    let resp = app.clone().oneshot(make(None)).await.unwrap();
    let root = body_json(resp).await["id"].as_str().unwrap().to_string();

    let resp = app.clone().oneshot(make(Some(root.clone()))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let reply = body_json(resp).await["id"].as_str().unwrap().to_string();

    // reply-to-a-reply is rejected
    let resp = app.oneshot(make(Some(reply))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ── Feed ───────────────────────────────────────────────────────

#[tokio::test]
async fn feed_is_sorted_and_excludes_muted_authors() {
    let (app, _) = build_test_app();
    let (loud_id, loud) = register_user(&app, "loud", "engineer").await;
    let (_, quiet) = register_user(&app, "quiet", "engineer").await;
    let (_, reader) = register_user(&app, "reader9", "student").await;

    create_post(&app, &loud, "first").await;
    create_post(&app, &quiet, "second").await;
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/projects",
            Some(&quiet),
            Some(json!({ "title": "Desert school", "description": "rammed earth" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // unmuted: all three items, newest first, mixed types
    let resp = app
        .clone()
        .oneshot(request("GET", "/api/feed", Some(&reader), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["feed_type"], "project");
    let times: Vec<&str> = items
        .iter()
        .map(|i| i["created_at"].as_str().unwrap())
        .collect();
    let mut sorted = times.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(times, sorted, "feed must be created_at descending");

    // after muting, the loud author disappears
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/mutes/{loud_id}"),
            Some(&reader),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .oneshot(request("GET", "/api/feed", Some(&reader), None))
        .await
        .unwrap();
    let body = body_json(resp).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items
        .iter()
        .all(|i| i["author"]["username"] != json!("loud")));
}

// ── Blocks and messaging ───────────────────────────────────────

#[tokio::test]
async fn blocked_pair_cannot_message_either_way() {
    let (app, _) = build_test_app();
    let (blocker_id, blocker) = register_user(&app, "blocker", "engineer").await;
    let (blocked_id, blocked) = register_user(&app, "blocked", "engineer").await;

    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/blocks/{blocked_id}"),
            Some(&blocker),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let send = |token: &str, to: Uuid| {
        request(
            "POST",
            "/api/messages",
            Some(token),
            Some(json!({ "receiver_id": to, "content": "hello" })),
        )
    };

    let resp = app.clone().oneshot(send(&blocked, blocker_id)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app.clone().oneshot(send(&blocker, blocked_id)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // unblock reopens the channel
    let resp = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/blocks/{blocked_id}"),
            Some(&blocker),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = app.oneshot(send(&blocker, blocked_id)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn blocking_removes_follow_edges() {
    let (app, _) = build_test_app();
    let (a_id, a) = register_user(&app, "alef", "engineer").await;
    let (b_id, b) = register_user(&app, "baa", "engineer").await;

    // b requests, a accepts
    let resp = app
        .clone()
        .oneshot(request("POST", &format!("/api/follows/{a_id}"), Some(&b), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let resp = app
        .clone()
        .oneshot(request("GET", "/api/follows/requests", Some(&a), None))
        .await
        .unwrap();
    let requests = body_json(resp).await;
    let request_id = requests[0]["id"].as_str().unwrap().to_string();
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/follows/requests/{request_id}/accept"),
            Some(&a),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(request("GET", &format!("/api/users/{a_id}/followers"), Some(&a), None))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 1);

    // blocking b severs the accepted follow
    let resp = app
        .clone()
        .oneshot(request("POST", &format!("/api/blocks/{b_id}"), Some(&a), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .oneshot(request("GET", &format!("/api/users/{a_id}/followers"), Some(&a), None))
        .await
        .unwrap();
    assert!(body_json(resp).await.as_array().unwrap().is_empty());
}

// ── Follow requests ────────────────────────────────────────────

#[tokio::test]
async fn only_the_followee_accepts_a_request() {
    let (app, _) = build_test_app();
    let (target_id, target) = register_user(&app, "target", "engineer").await;
    let (_, requester) = register_user(&app, "requester", "student").await;
    let (_, stranger) = register_user(&app, "stranger7", "student").await;

    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/follows/{target_id}"),
            Some(&requester),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let follow = body_json(resp).await;
    assert_eq!(follow["status"], "pending");
    let follow_id = follow["id"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/follows/requests/{follow_id}/accept"),
            Some(&stranger),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .oneshot(request(
            "POST",
            &format!("/api/follows/requests/{follow_id}/accept"),
            Some(&target),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "accepted");
}

// ── Jobs and applications ──────────────────────────────────────

#[tokio::test]
async fn job_applications_are_once_per_job_and_owner_readable() {
    let (app, _) = build_test_app();
    let (_, firm) = register_user(&app, "firm9", "firm").await;
    let (_, applicant) = register_user(&app, "applicant9", "engineer").await;
    let (_, stranger) = register_user(&app, "stranger9", "student").await;

    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/jobs",
            Some(&firm),
            Some(json!({
                "title": "Site architect",
                "description": "supervision",
                "company": "Atelier Petra",
            })),
        ))
        .await
        .unwrap();
    let job_id = body_json(resp).await["id"].as_str().unwrap().to_string();

    let apply = json!({ "cover_letter": "five years on site" });
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/jobs/{job_id}/applications"),
            Some(&applicant),
            Some(apply.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // a second application to the same job is rejected
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/jobs/{job_id}/applications"),
            Some(&applicant),
            Some(apply),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // only the job owner (or admin) reads the pile
    let resp = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/jobs/{job_id}/applications"),
            Some(&stranger),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .oneshot(request(
            "GET",
            &format!("/api/jobs/{job_id}/applications"),
            Some(&firm),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 1);
}

// ── University memberships ─────────────────────────────────────

#[tokio::test]
async fn membership_review_is_admin_only() {
    let (app, stores) = build_test_app();
    let (_, student) = register_user(&app, "student8", "student").await;
    let (_, admin) = seed_admin(&stores).await;

    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/university-memberships",
            Some(&student),
            Some(json!({ "university": "University of Jordan" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let membership = body_json(resp).await;
    assert_eq!(membership["status"], "pending");
    let membership_id = membership["id"].as_str().unwrap().to_string();

    // duplicate pending request is rejected
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/university-memberships",
            Some(&student),
            Some(json!({ "university": "University of Jordan" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // the requester cannot approve themselves
    let review = json!({ "status": "approved" });
    let resp = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/university-memberships/{membership_id}"),
            Some(&student),
            Some(review.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .oneshot(request(
            "PUT",
            &format!("/api/university-memberships/{membership_id}"),
            Some(&admin),
            Some(review),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "approved");
}

// ── Notifications ──────────────────────────────────────────────

#[tokio::test]
async fn engagement_produces_notifications() {
    let (app, _) = build_test_app();
    let (_, author) = register_user(&app, "author7", "engineer").await;
    let (_, fan) = register_user(&app, "fan7", "student").await;
    let post_id = create_post(&app, &author, "brutalist survey").await;

    for body in [
        json!({ "target_type": "post", "target_id": post_id }),
        json!({ "target_type": "post", "target_id": post_id, "content": "great set" }),
    ] {
        let uri = if body.get("content").is_some() {
            "/api/comments"
        } else {
            "/api/likes"
        };
        let resp = app
            .clone()
            .oneshot(request("POST", uri, Some(&fan), Some(body)))
            .await
            .unwrap();
        assert!(resp.status().is_success());
    }

    let resp = app
        .clone()
        .oneshot(request("GET", "/api/notifications/unread-count", Some(&author), None))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["count"], json!(2));

    let resp = app
        .clone()
        .oneshot(request("POST", "/api/notifications/read-all", Some(&author), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(request("GET", "/api/notifications/unread-count", Some(&author), None))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["count"], json!(0));
}

// ── Ownership on content ───────────────────────────────────────

#[tokio::test]
async fn content_mutation_requires_owner_or_admin() {
    let (app, stores) = build_test_app();
    let (_, author) = register_user(&app, "author5", "engineer").await;
    let (_, stranger) = register_user(&app, "stranger5", "engineer").await;
    let (_, admin) = seed_admin(&stores).await;
    let post_id = create_post(&app, &author, "original").await;

    let edit = json!({ "content": "edited" });
    let resp = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/posts/{post_id}"),
            Some(&stranger),
            Some(edit.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/posts/{post_id}"),
            Some(&author),
            Some(edit),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["content"], "edited");

    let resp = app
        .oneshot(request(
            "DELETE",
            &format!("/api/posts/{post_id}"),
            Some(&admin),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
