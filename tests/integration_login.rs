//! Login, registration and user management against a real database.
//!
//! Run with `DATABASE_URL` pointing at a disposable PostgreSQL server:
//! `cargo test --test integration_login -- --ignored`

mod common;

use std::sync::Arc;

use axum::http::{StatusCode, header};
use chrono::Duration;
use common::{
    body_json, body_text, create_test_user, generate_unique_email, post_form, set_cookie_header,
    set_cookie_value, test_app,
};
use farmmarket::farmmarket_auth::{MemorySessionStore, PgSessionStore, Role, SessionStore, UserId};
use sqlx::PgPool;
use tower::ServiceExt;

const CSRF: &str = "csrf_token=abc";

fn login_body(email: &str, password: &str) -> String {
    format!(
        "email={}&password={}&csrf_token=abc",
        email.replace('@', "%40"),
        password
    )
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_login_success_starts_session(pool: PgPool) {
    let user = create_test_user(&pool, Role::Buyer, true).await;
    let store = Arc::new(MemorySessionStore::new());
    let app = test_app(pool, store.clone());

    let response = app
        .oneshot(post_form(
            "/buyer/login",
            Some(CSRF),
            &login_body(&user.email, &user.password),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/buyer/home");

    let raw = set_cookie_header(response.headers(), "session_token").unwrap();
    assert!(raw.contains("HttpOnly"));
    assert!(raw.contains("SameSite=Lax"));

    let session_id = set_cookie_value(response.headers(), "session_token").unwrap();
    let identity = store.lookup(&session_id).await.unwrap().unwrap();
    assert_eq!(identity.user_id, user.id);
    assert_eq!(identity.role, Role::Buyer);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_login_wrong_password(pool: PgPool) {
    let user = create_test_user(&pool, Role::Buyer, true).await;
    let store = Arc::new(MemorySessionStore::new());
    let app = test_app(pool, store.clone());

    let response = app
        .oneshot(post_form(
            "/buyer/login",
            Some(CSRF),
            &login_body(&user.email, "wrongpass123"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(store.is_empty().await);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_login_through_other_portal_is_rejected(pool: PgPool) {
    let user = create_test_user(&pool, Role::Farmer, true).await;
    let app = test_app(pool, Arc::new(MemorySessionStore::new()));

    let response = app
        .oneshot(post_form(
            "/admin/login",
            Some(CSRF),
            &login_body(&user.email, &user.password),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid email or password"
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_farmer_registers_inactive_until_approved(pool: PgPool) {
    let store = Arc::new(MemorySessionStore::new());
    let app = test_app(pool.clone(), store.clone());
    let email = generate_unique_email();

    let body = format!(
        "first_name=Tunde&last_name=Bello&email={}&password=harvest2024&csrf_token=abc",
        email.replace('@', "%40")
    );
    let response = app
        .clone()
        .oneshot(post_form("/farmer/register", Some(CSRF), &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/farmer/login");

    let response = app
        .clone()
        .oneshot(post_form(
            "/farmer/login",
            Some(CSRF),
            &login_body(&email, "harvest2024"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let farmer_id: UserId = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();

    let admin = create_test_user(&pool, Role::Admin, true).await;
    let admin_session = store
        .create(admin.id, Role::Admin, Duration::hours(1))
        .await
        .unwrap();
    let cookie = format!("session_token={}; {}", admin_session.id, CSRF);
    let response = app
        .clone()
        .oneshot(post_form(
            "/admin/users/toggle-status",
            Some(&cookie),
            &format!("user_id={}&csrf_token=abc", farmer_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .oneshot(post_form(
            "/farmer/login",
            Some(CSRF),
            &login_body(&email, "harvest2024"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/farmer/dashboard");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_duplicate_registration_conflicts(pool: PgPool) {
    let user = create_test_user(&pool, Role::Buyer, true).await;
    let app = test_app(pool, Arc::new(MemorySessionStore::new()));

    let body = format!(
        "first_name=Ada&last_name=Obi&email={}&password=password123&csrf_token=abc",
        user.email.replace('@', "%40")
    );
    let response = app
        .oneshot(post_form("/buyer/register", Some(CSRF), &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_deactivation_revokes_sessions(pool: PgPool) {
    let store = Arc::new(MemorySessionStore::new());
    let app = test_app(pool.clone(), store.clone());

    let buyer = create_test_user(&pool, Role::Buyer, true).await;
    let buyer_session = store
        .create(buyer.id, Role::Buyer, Duration::hours(1))
        .await
        .unwrap();

    let admin = create_test_user(&pool, Role::Admin, true).await;
    let admin_session = store
        .create(admin.id, Role::Admin, Duration::hours(1))
        .await
        .unwrap();

    let cookie = format!("session_token={}; {}", admin_session.id, CSRF);
    let response = app
        .oneshot(post_form(
            "/admin/users/toggle-status",
            Some(&cookie),
            &format!("user_id={}&csrf_token=abc", buyer.id),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.lookup(&buyer_session.id).await.unwrap(), None);
    assert!(store.lookup(&admin_session.id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_admin_accounts_cannot_be_toggled(pool: PgPool) {
    let store = Arc::new(MemorySessionStore::new());
    let app = test_app(pool.clone(), store.clone());

    let admin = create_test_user(&pool, Role::Admin, true).await;
    let session = store
        .create(admin.id, Role::Admin, Duration::hours(1))
        .await
        .unwrap();

    let cookie = format!("session_token={}; {}", session.id, CSRF);
    let response = app
        .oneshot(post_form(
            "/admin/users/toggle-status",
            Some(&cookie),
            &format!("user_id={}&csrf_token=abc", admin.id),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_pg_session_store_lifecycle(pool: PgPool) {
    let user = create_test_user(&pool, Role::Farmer, true).await;
    let store = PgSessionStore::new(pool.clone());

    let record = store
        .create(user.id, Role::Farmer, Duration::hours(1))
        .await
        .unwrap();
    let identity = store.lookup(&record.id).await.unwrap().unwrap();
    assert_eq!(identity.user_id, user.id);
    assert_eq!(identity.role, Role::Farmer);

    assert_eq!(store.lookup("unknown").await.unwrap(), None);

    let expired = store
        .create(user.id, Role::Farmer, Duration::seconds(-1))
        .await
        .unwrap();
    assert_eq!(store.lookup(&expired.id).await.unwrap(), None);
    assert_eq!(store.purge_expired().await.unwrap(), 1);

    store.revoke(&record.id).await.unwrap();
    assert_eq!(store.lookup(&record.id).await.unwrap(), None);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_pg_session_store_revoke_user(pool: PgPool) {
    let user = create_test_user(&pool, Role::Buyer, true).await;
    let store = PgSessionStore::new(pool.clone());

    store.create(user.id, Role::Buyer, Duration::hours(1)).await.unwrap();
    store.create(user.id, Role::Buyer, Duration::hours(1)).await.unwrap();

    assert_eq!(store.revoke_user(user.id).await.unwrap(), 2);
}

async fn admin_cookie(pool: &PgPool, store: &MemorySessionStore) -> String {
    let admin = create_test_user(pool, Role::Admin, true).await;
    let session = store
        .create(admin.id, Role::Admin, Duration::hours(1))
        .await
        .unwrap();
    format!("session_token={}; {}", session.id, CSRF)
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_pending_farmers_lists_and_approves(pool: PgPool) {
    let store = Arc::new(MemorySessionStore::new());
    let app = test_app(pool.clone(), store.clone());
    let cookie = admin_cookie(&pool, &store).await;

    let pending = create_test_user(&pool, Role::Farmer, false).await;
    let approved = create_test_user(&pool, Role::Farmer, true).await;

    let response = app
        .clone()
        .oneshot(common::get("/admin/dashboard/pending-farmers", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains(&pending.email));
    assert!(!page.contains(&approved.email));

    let response = app
        .clone()
        .oneshot(post_form(
            "/admin/dashboard/approve-farmer",
            Some(&cookie),
            &format!("user_id={}&csrf_token=abc", pending.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/admin/dashboard/pending-farmers"
    );

    let is_active: bool = sqlx::query_scalar("SELECT is_active FROM users WHERE id = $1")
        .bind(pending.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(is_active);

    // Already approved farmers are no longer pending.
    let response = app
        .oneshot(post_form(
            "/admin/dashboard/approve-farmer",
            Some(&cookie),
            &format!("user_id={}&csrf_token=abc", approved.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_reject_farmer_deletes_account_and_sessions(pool: PgPool) {
    let store = Arc::new(MemorySessionStore::new());
    let app = test_app(pool.clone(), store.clone());
    let cookie = admin_cookie(&pool, &store).await;

    let farmer = create_test_user(&pool, Role::Farmer, false).await;
    let farmer_session = store
        .create(farmer.id, Role::Farmer, Duration::hours(1))
        .await
        .unwrap();

    let response = app
        .oneshot(post_form(
            "/admin/dashboard/reject-farmer",
            Some(&cookie),
            &format!("user_id={}&csrf_token=abc", farmer.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(farmer.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
    assert_eq!(store.lookup(&farmer_session.id).await.unwrap(), None);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_delete_buyer_revokes_sessions(pool: PgPool) {
    let store = Arc::new(MemorySessionStore::new());
    let app = test_app(pool.clone(), store.clone());
    let cookie = admin_cookie(&pool, &store).await;

    let buyer = create_test_user(&pool, Role::Buyer, true).await;
    let buyer_session = store
        .create(buyer.id, Role::Buyer, Duration::hours(1))
        .await
        .unwrap();

    let response = app
        .oneshot(post_form(
            "/admin/users/delete-buyer",
            Some(&cookie),
            &format!("user_id={}&csrf_token=abc", buyer.id),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/admin/users");
    assert_eq!(store.lookup(&buyer_session.id).await.unwrap(), None);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_delete_checks_account_role(pool: PgPool) {
    let store = Arc::new(MemorySessionStore::new());
    let app = test_app(pool.clone(), store.clone());
    let cookie = admin_cookie(&pool, &store).await;

    let farmer = create_test_user(&pool, Role::Farmer, true).await;
    let farmer_session = store
        .create(farmer.id, Role::Farmer, Duration::hours(1))
        .await
        .unwrap();

    let response = app
        .oneshot(post_form(
            "/admin/users/delete-buyer",
            Some(&cookie),
            &format!("user_id={}&csrf_token=abc", farmer.id),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(store.lookup(&farmer_session.id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_login_unknown_email_matches_wrong_password(pool: PgPool) {
    let user = create_test_user(&pool, Role::Buyer, true).await;
    let app = test_app(pool, Arc::new(MemorySessionStore::new()));

    let unknown = app
        .clone()
        .oneshot(post_form(
            "/buyer/login",
            Some(CSRF),
            &login_body(&generate_unique_email(), "whatever123"),
        ))
        .await
        .unwrap();
    let wrong = app
        .oneshot(post_form(
            "/buyer/login",
            Some(CSRF),
            &login_body(&user.email, "whatever123"),
        ))
        .await
        .unwrap();

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(unknown).await, body_json(wrong).await);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_concurrent_registration_yields_one_conflict(pool: PgPool) {
    let app = test_app(pool, Arc::new(MemorySessionStore::new()));
    let body = format!(
        "first_name=Ada&last_name=Obi&email={}&password=password123&csrf_token=abc",
        generate_unique_email().replace('@', "%40")
    );

    let (first, second) = tokio::join!(
        app.clone()
            .oneshot(post_form("/buyer/register", Some(CSRF), &body)),
        app.clone()
            .oneshot(post_form("/buyer/register", Some(CSRF), &body)),
    );

    let mut statuses = [first.unwrap().status(), second.unwrap().status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::SEE_OTHER, StatusCode::CONFLICT]);
}
