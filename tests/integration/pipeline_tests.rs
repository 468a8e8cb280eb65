//! Pipeline transition integration tests
//!
//! Full-stack tests against a wiremock backend: optimistic application,
//! rollback on rejection, confirmation handling, and batch assignment.

#[cfg(test)]
mod tests {
    use crate::common::app_state;
    use crate::common::fixtures::{
        IdentityFactory, bearer_token, employee_json, identity_header, lead_json,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use leadflow_rs::auth::Identity;
    use leadflow_rs::server::middleware::GuardMiddleware;
    use leadflow_rs::server::routes;
    use serde_json::{Value, json};
    use uuid::Uuid;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

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

    fn session_headers(identity: &Identity) -> [(String, String); 3] {
        [
            (
                "authorization".to_string(),
                format!("Bearer {}", bearer_token(identity)),
            ),
            ("x-role-tag".to_string(), "employee".to_string()),
            ("x-identity".to_string(), identity_header(identity)),
        ]
    }

    async fn mount_leads(server: &MockServer, team: &str, leads: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/teams/{}/leads", team)))
            .respond_with(ResponseTemplate::new(200).set_body_json(leads))
            .mount(server)
            .await;
    }

    async fn mount_employees(server: &MockServer, team: &str, employees: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/teams/{}/employees", team)))
            .respond_with(ResponseTemplate::new(200).set_body_json(employees))
            .mount(server)
            .await;
    }

    fn bucket_of<'a>(board: &'a Value, lead: &Uuid) -> &'a str {
        board
            .as_array()
            .unwrap()
            .iter()
            .find(|bucket| {
                bucket["leads"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .any(|l| l["id"] == lead.to_string())
            })
            .map(|bucket| bucket["key"].as_str().unwrap())
            .unwrap()
    }

    #[actix_web::test]
    async fn test_board_fetch_buckets_by_stage() {
        let server = MockServer::start().await;
        let l1 = Uuid::new_v4();
        let l2 = Uuid::new_v4();
        mount_leads(
            &server,
            "field",
            json!([lead_json(l1, "marketing"), lead_json(l2, "solutions")]),
        )
        .await;

        let state = app_state(&server.uri());
        let app = guarded_app!(state);
        let identity = IdentityFactory::field_executive();

        let mut req = test::TestRequest::get().uri("/v1/pipeline/field/board");
        for (name, value) in session_headers(&identity) {
            req = req.insert_header((name.as_str(), value.as_str()));
        }
        let resp = test::call_service(&app, req.to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(bucket_of(&body["data"], &l1), "marketing");
        assert_eq!(bucket_of(&body["data"], &l2), "solutions");
    }

    #[actix_web::test]
    async fn test_forward_stage_change_applies_and_reconciles() {
        let server = MockServer::start().await;
        let l1 = Uuid::new_v4();
        mount_leads(&server, "field", json!([lead_json(l1, "marketing")])).await;
        Mock::given(method("POST"))
            .and(path(format!("/leads/{}/stage", l1)))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let state = app_state(&server.uri());
        let app = guarded_app!(state);
        let identity = IdentityFactory::field_executive();

        let mut req = test::TestRequest::post()
            .uri(&format!("/v1/pipeline/field/leads/{}/stage", l1))
            .set_json(json!({"to": "technical", "reason": "qualified by field team"}));
        for (name, value) in session_headers(&identity) {
            req = req.insert_header((name.as_str(), value.as_str()));
        }
        let resp = test::call_service(&app, req.to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(bucket_of(&body["data"], &l1), "technical");
    }

    #[actix_web::test]
    async fn test_regression_without_confirmation_is_refused() {
        let server = MockServer::start().await;
        let l1 = Uuid::new_v4();
        mount_leads(&server, "field", json!([lead_json(l1, "quotation")])).await;
        Mock::given(method("POST"))
            .and(path(format!("/leads/{}/stage", l1)))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let state = app_state(&server.uri());
        let app = guarded_app!(state);
        let identity = IdentityFactory::field_executive();

        let mut req = test::TestRequest::post()
            .uri(&format!("/v1/pipeline/field/leads/{}/stage", l1))
            .set_json(json!({"to": "technical", "reason": "pricing redo"}));
        for (name, value) in session_headers(&identity) {
            req = req.insert_header((name.as_str(), value.as_str()));
        }
        let resp = test::call_service(&app, req.to_request()).await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "CONFIRMATION_REQUIRED");
    }

    #[actix_web::test]
    async fn test_rejected_stage_change_rolls_back_the_board() {
        let server = MockServer::start().await;
        let l1 = Uuid::new_v4();
        mount_leads(&server, "field", json!([lead_json(l1, "marketing")])).await;
        Mock::given(method("POST"))
            .and(path(format!("/leads/{}/stage", l1)))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let state = app_state(&server.uri());
        let app = guarded_app!(state);
        let identity = IdentityFactory::field_executive();

        let mut req = test::TestRequest::post()
            .uri(&format!("/v1/pipeline/field/leads/{}/stage", l1))
            .set_json(json!({"to": "technical", "reason": "qualified"}));
        for (name, value) in session_headers(&identity) {
            req = req.insert_header((name.as_str(), value.as_str()));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        // The page stays usable and the board is back to its pre-transition state
        let mut req = test::TestRequest::get().uri("/v1/pipeline/field/board");
        for (name, value) in session_headers(&identity) {
            req = req.insert_header((name.as_str(), value.as_str()));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(bucket_of(&body["data"], &l1), "marketing");
    }

    #[actix_web::test]
    async fn test_batch_assignment_reports_partial_failure() {
        let server = MockServer::start().await;
        let good = Uuid::new_v4();
        let bad = Uuid::new_v4();
        let assignee = Uuid::new_v4();
        mount_leads(
            &server,
            "corporate",
            json!([lead_json(good, "marketing"), lead_json(bad, "marketing")]),
        )
        .await;
        mount_employees(&server, "corporate", json!([employee_json(assignee, "Dana")])).await;
        Mock::given(method("POST"))
            .and(path(format!("/leads/{}/assign", good)))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/leads/{}/assign", bad)))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let state = app_state(&server.uri());
        let app = guarded_app!(state);
        let identity = IdentityFactory::create("Corporate Marketing", "Executive");

        let mut req = test::TestRequest::post()
            .uri("/v1/pipeline/corporate/assignments/batch")
            .set_json(json!({"lead_ids": [good, bad], "assignee": assignee}));
        for (name, value) in session_headers(&identity) {
            req = req.insert_header((name.as_str(), value.as_str()));
        }
        let resp = test::call_service(&app, req.to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["succeeded"], json!([good.to_string()]));
        assert_eq!(body["data"]["failed"][0]["lead_id"], bad.to_string());

        // Succeeded call stays applied, failed one rolled back
        let mut req = test::TestRequest::get().uri("/v1/pipeline/corporate/assignments");
        for (name, value) in session_headers(&identity) {
            req = req.insert_header((name.as_str(), value.as_str()));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(bucket_of(&body["data"], &good), assignee.to_string());
        assert_eq!(bucket_of(&body["data"], &bad), "unassigned");
    }

    #[actix_web::test]
    async fn test_marketing_board_regression_needs_confirmation() {
        let server = MockServer::start().await;
        let l1 = Uuid::new_v4();
        mount_leads(&server, "tele", json!([lead_json(l1, "closed")])).await;

        let state = app_state(&server.uri());
        let app = guarded_app!(state);
        let identity = IdentityFactory::tele_head();

        // Unconfirmed regression: refused, board untouched
        let mut req = test::TestRequest::post()
            .uri(&format!("/v1/marketing/tele/leads/{}/move", l1))
            .set_json(json!({"to": "contacted"}));
        for (name, value) in session_headers(&identity) {
            req = req.insert_header((name.as_str(), value.as_str()));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        // Confirmed: applied locally, no backend mutation involved
        let mut req = test::TestRequest::post()
            .uri(&format!("/v1/marketing/tele/leads/{}/move", l1))
            .set_json(json!({"to": "contacted", "confirmed": true}));
        for (name, value) in session_headers(&identity) {
            req = req.insert_header((name.as_str(), value.as_str()));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(bucket_of(&body["data"], &l1), "contacted");
    }

    #[actix_web::test]
    async fn test_org_head_reaches_any_team_board() {
        let server = MockServer::start().await;
        let l1 = Uuid::new_v4();
        mount_leads(&server, "payments-team", json!([lead_json(l1, "payments")])).await;

        let state = app_state(&server.uri());
        let app = guarded_app!(state);
        let identity = IdentityFactory::org_head();

        let mut req = test::TestRequest::get().uri("/v1/pipeline/payments-team/board");
        for (name, value) in session_headers(&identity) {
            req = req.insert_header((name.as_str(), value.as_str()));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_revert_moves_back_one_stage() {
        let server = MockServer::start().await;
        let l1 = Uuid::new_v4();
        mount_leads(&server, "solution", json!([lead_json(l1, "quotation")])).await;
        Mock::given(method("POST"))
            .and(path(format!("/leads/{}/revert", l1)))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let state = app_state(&server.uri());
        let app = guarded_app!(state);
        let identity = IdentityFactory::create("Solutions", "Architect");

        let mut req = test::TestRequest::post()
            .uri(&format!("/v1/pipeline/solution/leads/{}/revert", l1))
            .set_json(json!({"reason": "customer renegotiating"}));
        for (name, value) in session_headers(&identity) {
            req = req.insert_header((name.as_str(), value.as_str()));
        }
        let resp = test::call_service(&app, req.to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(bucket_of(&body["data"], &l1), "solutions");
    }
}
