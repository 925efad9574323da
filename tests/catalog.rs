mod common;

mod positions {
    use crate::common::*;
    use http::StatusCode;
    use perftrack::app::{db, tenant::Tenant};

    #[tokio::test]
    async fn create_update_delete() {
        let pool = test_pool().await;
        let app = test_router(pool.clone());
        let cookie = login(&app, "alice", "", "").await;
        let tenant = Tenant::new("alice", None);

        let response = post_form(&app, "/positions", Some(&cookie), &form_body(&[("title", "Developer"), ("color", "#ABC")])).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let position = db::positions::list_for_tenant(&pool, &tenant).await.unwrap().remove(0);
        assert_eq!(position.color.as_deref(), Some("#aabbcc"));

        let response = post_form(
            &app,
            &format!("/positions/{}/update", position.id),
            Some(&cookie),
            &form_body(&[("title", "Engineer"), ("description", "Writes code")]),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let position = db::positions::list_for_tenant(&pool, &tenant).await.unwrap().remove(0);
        assert_eq!(position.title, "Engineer");
        assert_eq!(position.color, None);

        let response = post_form(&app, &format!("/positions/{}/delete", position.id), Some(&cookie), "").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(db::positions::list_for_tenant(&pool, &tenant).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_title_redirects_with_error() {
        let pool = test_pool().await;
        let app = test_router(pool.clone());
        let cookie = login(&app, "alice", "", "").await;

        let response = post_form(&app, "/positions", Some(&cookie), &form_body(&[("title", "  ")])).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/positions?error=Title%20is%20required.");
    }

    #[tokio::test]
    async fn non_admin_can_read_but_not_write() {
        let pool = test_pool().await;
        let app = test_router(pool.clone());
        let admin = login(&app, "alice", "", "acme").await;
        post_form(&app, "/positions", Some(&admin), &form_body(&[("title", "Developer")])).await;
        let member = login(&app, "bob", "", "acme").await;

        let page = get(&app, "/positions", Some(&member)).await;
        assert_eq!(page.status(), StatusCode::OK);
        assert!(body_string(page).await.contains("Developer"));

        let position = db::positions::list_for_tenant(&pool, &Tenant::new("bob", Some("acme")))
            .await
            .unwrap()
            .remove(0);
        let response = post_form(&app, &format!("/positions/{}/delete", position.id), Some(&member), "").await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

mod tags {
    use crate::common::*;
    use http::StatusCode;
    use perftrack::app::{db, tenant::Tenant};

    #[tokio::test]
    async fn create_and_list() {
        let pool = test_pool().await;
        let app = test_router(pool.clone());
        let cookie = login(&app, "alice", "", "").await;

        let response = post_form(&app, "/tags", Some(&cookie), &form_body(&[("name", "Mentoring"), ("color", "#10b981")])).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).starts_with("/tags?success="));

        let page = body_string(get(&app, "/tags", Some(&cookie)).await).await;
        assert!(page.contains("Mentoring"));
        let tags = db::tags::list_for_tenant(&pool, &Tenant::new("alice", None)).await.unwrap();
        assert_eq!(tags[0].color.as_deref(), Some("#10b981"));
    }

    #[tokio::test]
    async fn invalid_color_is_rejected() {
        let pool = test_pool().await;
        let app = test_router(pool.clone());
        let cookie = login(&app, "alice", "", "").await;

        let response = post_form(&app, "/tags", Some(&cookie), &form_body(&[("name", "Mentoring"), ("color", "green")])).await;

        assert!(location(&response).starts_with("/tags?error="));
        assert!(db::tags::list_for_tenant(&pool, &Tenant::new("alice", None)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_tag_is_not_found() {
        let pool = test_pool().await;
        let app = test_router(pool.clone());
        let cookie = login(&app, "alice", "", "").await;

        let response = post_form(&app, "/tags/not-an-id/delete", Some(&cookie), "").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
