//! Navigation guard integration tests
//!
//! Exercises the guard middleware and the navigation pre-flight endpoint
//! over the real HTTP stack. No backend calls happen here: every request
//! either resolves before a handler runs or only reads the session.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{IdentityFactory, bearer_token, identity_header};
    use crate::common::app_state;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use leadflow_rs::server::middleware::GuardMiddleware;
    use leadflow_rs::server::routes;
    use serde_json::{Value, json};

    macro_rules! guarded_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .wrap(GuardMiddleware)
                    .configure(routes::health::configure_routes)
                    .configure(routes::identity::configure_routes)
                    .configure(routes::pipeline::configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_health_is_public() {
        let state = app_state("http://localhost:1");
        let app = guarded_app!(state);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request())
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_board_access_without_session_redirects_to_signin() {
        let state = app_state("http://localhost:1");
        let app = guarded_app!(state);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/v1/pipeline/field/board")
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get("location").unwrap().to_str().unwrap(),
            "/signin"
        );
    }

    #[actix_web::test]
    async fn test_super_admin_is_kept_out_of_employee_area() {
        let state = app_state("http://localhost:1");
        let app = guarded_app!(state);

        let identity = IdentityFactory::field_executive();
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/v1/pipeline/field/board")
                .insert_header(("authorization", format!("Bearer {}", bearer_token(&identity))))
                .insert_header(("x-role-tag", "super-admin"))
                .insert_header(("x-identity", identity_header(&identity)))
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get("location").unwrap().to_str().unwrap(),
            "/superadmin"
        );
    }

    #[actix_web::test]
    async fn test_wrong_team_is_redirected_to_its_own_landing() {
        let state = app_state("http://localhost:1");
        let app = guarded_app!(state);

        let identity = IdentityFactory::tele_head();
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/v1/pipeline/field/board")
                .insert_header(("authorization", format!("Bearer {}", bearer_token(&identity))))
                .insert_header(("x-role-tag", "employee"))
                .insert_header(("x-identity", identity_header(&identity)))
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get("location").unwrap().to_str().unwrap(),
            "/employee/tele/dashboard"
        );
    }

    #[actix_web::test]
    async fn test_navigate_preflight_reports_redirect_for_anonymous() {
        let state = app_state("http://localhost:1");
        let app = guarded_app!(state);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/v1/navigate")
                .set_json(json!({"path": "/employee/field/dashboard"}))
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["outcome"], "redirect");
        assert_eq!(body["data"]["to"], "/signin");
    }

    #[actix_web::test]
    async fn test_navigate_preflight_allows_own_team() {
        let state = app_state("http://localhost:1");
        let app = guarded_app!(state);

        let identity = IdentityFactory::field_executive();
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/v1/navigate")
                .insert_header(("authorization", format!("Bearer {}", bearer_token(&identity))))
                .insert_header(("x-identity", identity_header(&identity)))
                .set_json(json!({"path": "/employee/field/dashboard"}))
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["outcome"], "allow");
    }

    #[actix_web::test]
    async fn test_whoami_resolves_designations() {
        let state = app_state("http://localhost:1");
        let app = guarded_app!(state);

        let identity = IdentityFactory::tele_head();
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/v1/identity/me")
                .insert_header(("authorization", format!("Bearer {}", bearer_token(&identity))))
                .insert_header(("x-identity", identity_header(&identity)))
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["team_slug"], "tele");
        assert_eq!(body["data"]["team_head"], true);
        assert_eq!(body["data"]["org_head"], false);
    }

    #[actix_web::test]
    async fn test_whoami_works_from_credential_alone() {
        let state = app_state("http://localhost:1");
        let app = guarded_app!(state);

        // No X-Identity record: the payload decode fallback carries it
        let identity = IdentityFactory::field_executive();
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/v1/identity/me")
                .insert_header(("authorization", format!("Bearer {}", bearer_token(&identity))))
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["team_slug"], "field");
    }

    #[actix_web::test]
    async fn test_landing_for_quotation_team_is_the_sub_page() {
        let state = app_state("http://localhost:1");
        let app = guarded_app!(state);

        let identity = IdentityFactory::create("Quotation Team", "Estimator");
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/v1/identity/landing")
                .insert_header(("authorization", format!("Bearer {}", bearer_token(&identity))))
                .insert_header(("x-identity", identity_header(&identity)))
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["path"], "/employee/quotation-team/quotations");
    }
}
