mod common;

mod session {
    use crate::common::*;
    use http::StatusCode;
    use perftrack::app::domain::UserId;

    #[tokio::test]
    async fn no_cookie_redirects_to_login() {
        let pool = test_pool().await;
        let app = test_router(pool);

        let response = get(&app, "/employees", None).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn no_cookie_can_reach_login_page() {
        let pool = test_pool().await;
        let app = test_router(pool);

        let response = get(&app, "/login", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookie(&response).is_none());
    }

    #[tokio::test]
    async fn structured_cookie_for_existing_user_proceeds() {
        let pool = test_pool().await;
        let app = test_router(pool.clone());
        let user_id = create_user(&pool, "alice", None, None).await;

        let response = get(&app, "/", Some(&structured_cookie(&user_id, None))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookie(&response).is_none(), "valid cookie is left alone");
        let body = body_string(response).await;
        assert!(body.contains("alice"));
    }

    #[tokio::test]
    async fn signed_in_user_is_sent_home_from_login() {
        let pool = test_pool().await;
        let app = test_router(pool.clone());
        let user_id = create_user(&pool, "alice", None, None).await;

        let response = get(&app, "/login", Some(&structured_cookie(&user_id, None))).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
    }

    #[tokio::test]
    async fn deleted_user_clears_cookie_and_redirects() {
        let pool = test_pool().await;
        let app = test_router(pool);
        let ghost = UserId::new().as_str();

        let response = get(&app, "/employees", Some(&structured_cookie(&ghost, None))).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        let cleared = set_cookie(&response).expect("cookie should be cleared");
        assert!(cleared.starts_with("sessionId="));
        assert!(cleared.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn malformed_cookie_is_cleared() {
        let pool = test_pool().await;
        let app = test_router(pool);

        let response = get(&app, "/", Some("sessionId=%7Bnot-json")).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        assert!(set_cookie(&response).unwrap().contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn legacy_cookie_is_upgraded_to_structured() {
        let pool = test_pool().await;
        let app = test_router(pool.clone());
        create_organization(&pool, "acme", "alice").await;
        let user_id = create_user(&pool, "alice", None, Some("acme")).await;

        let response = get(&app, "/", Some(&format!("sessionId={}", user_id))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let reissued = set_cookie(&response).expect("legacy token should be reissued");
        let decoded = urlencoding::decode(reissued).unwrap();
        assert!(decoded.contains(&format!("\"userId\":\"{}\"", user_id)), "got {decoded}");
        assert!(decoded.contains("\"orgCode\":\"acme\""), "got {decoded}");
    }

    #[tokio::test]
    async fn org_admin_may_create_positions() {
        let pool = test_pool().await;
        let app = test_router(pool.clone());
        create_organization(&pool, "acme", "alice").await;
        let alice = create_user(&pool, "alice", None, Some("acme")).await;

        let response = post_form(
            &app,
            "/positions",
            Some(&structured_cookie(&alice, Some("acme"))),
            &form_body(&[("title", "Developer")]),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).starts_with("/positions?success="));
    }

    #[tokio::test]
    async fn org_member_is_not_admin() {
        let pool = test_pool().await;
        let app = test_router(pool.clone());
        create_organization(&pool, "acme", "alice").await;
        create_user(&pool, "alice", None, Some("acme")).await;
        let bob = create_user(&pool, "bob", None, Some("acme")).await;

        let response = post_form(
            &app,
            "/positions",
            Some(&structured_cookie(&bob, Some("acme"))),
            &form_body(&[("title", "Developer")]),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn org_claim_for_foreign_organization_signs_out() {
        let pool = test_pool().await;
        let app = test_router(pool.clone());
        create_organization(&pool, "acme", "alice").await;
        let mallory = create_user(&pool, "mallory", None, None).await;

        let response = get(&app, "/", Some(&structured_cookie(&mallory, Some("acme")))).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        assert!(set_cookie(&response).unwrap().contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn logout_clears_cookie() {
        let pool = test_pool().await;
        let app = test_router(pool.clone());
        let user_id = create_user(&pool, "alice", None, None).await;

        let response = post_form(&app, "/logout", Some(&structured_cookie(&user_id, None)), "").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        let cleared = set_cookie(&response).unwrap();
        assert!(cleared.starts_with("sessionId="));
        assert!(cleared.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn opaque_user_id_in_cookie_resolves() {
        let pool = test_pool().await;
        let app = test_router(pool.clone());
        sqlx::query(
            "INSERT INTO users (id, username, created_at, updated_at) VALUES ('u1', 'u1', 0, 0)",
        )
        .execute(&pool)
        .await
        .unwrap();

        let cookie = format!(
            "sessionId={}",
            urlencoding::encode(r#"{"userId":"u1","orgCode":null}"#)
        );
        let response = get(&app, "/", Some(&cookie)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookie(&response).is_none());
    }

    #[tokio::test]
    async fn unreachable_database_signs_out_without_server_error() {
        let pool = test_pool().await;
        let app = test_router(pool.clone());
        let user_id = create_user(&pool, "alice", None, None).await;
        pool.close().await;

        let response = get(&app, "/employees", Some(&structured_cookie(&user_id, None))).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        assert!(set_cookie(&response).is_none(), "cookie survives a lookup failure");
    }
}
