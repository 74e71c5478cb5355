//! Request gate integration tests
//!
//! The full app runs in process: built-in routes plus an application route
//! behind the same gate.

#[cfg(test)]
mod tests {
    use crate::common::TestGateway;
    use crate::common::fixtures::{TEST_PEER, TEST_PEER_IP, TEST_SECRET};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpRequest, HttpResponse, web};
    use actix_web::test as actix_test;
    use shield_rs::auth::Signer;
    use shield_rs::core::gate::{AuthMethod, AuthenticatedUser, HandlerPolicy};
    use shield_rs::core::rate_limiter::RateLimitStore;
    use shield_rs::server::middleware::RequestGate;
    use shield_rs::server::routes::configure_routes;
    use serde_json::{Value, json};
    use std::time::Duration;

    /// Application handler: reports who the gate said the caller is
    async fn posts(req: HttpRequest, user: Option<web::ReqData<AuthenticatedUser>>) -> HttpResponse {
        HttpResponse::Ok().json(json!({
            "query": req.query_string(),
            "user": user.map(|u| u.name().to_string()),
        }))
    }

    async fn slow_posts() -> HttpResponse {
        tokio::time::sleep(Duration::from_millis(30)).await;
        HttpResponse::Ok().finish()
    }

    macro_rules! app {
        ($gateway:expr) => {
            actix_test::init_service(
                App::new()
                    .app_data(web::Data::new($gateway.state.clone()))
                    .wrap(RequestGate::new($gateway.gatekeeper().clone()))
                    .configure(configure_routes)
                    .route("/posts", web::get().to(posts))
                    .route("/posts", web::post().to(posts))
                    .route("/slow", web::get().to(slow_posts)),
            )
            .await
        };
    }

    fn request(method: &str, uri: &str) -> actix_test::TestRequest {
        let req = match method {
            "POST" => actix_test::TestRequest::post(),
            _ => actix_test::TestRequest::get(),
        };
        req.uri(uri).peer_addr(TEST_PEER.parse().unwrap())
    }

    /// Token required everywhere, user auth on POST only
    #[actix_web::test]
    async fn test_gate_scenario() {
        let gateway = TestGateway::with_routes([(
            "/posts",
            HandlerPolicy::default().require_user_auth([AuthMethod::Post]),
        )]);
        let app = app!(gateway);
        let api_token = gateway.api_token();

        // GET with an api token only
        let req = request("GET", "/posts")
            .insert_header(("X-API-TOKEN", api_token.as_str()))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["user"], Value::Null);

        // POST without a user token
        let req = request("POST", "/posts")
            .insert_header(("X-API-TOKEN", api_token.as_str()))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(actix_test::read_body(resp).await, "user token missing\n");

        // POST with a user token signed under another secret
        let forged = Signer::new("not the secret");
        let forged = shield_rs::auth::new_user_token(&forged, "alice", Duration::from_secs(60))
            .unwrap();
        let req = request("POST", "/posts")
            .insert_header(("X-API-TOKEN", api_token.as_str()))
            .insert_header(("X-USER-TOKEN", forged.as_str()))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(actix_test::read_body(resp).await, "user token invalid\n");

        // POST with a real user token
        let req = request("POST", "/posts")
            .insert_header(("X-API-TOKEN", api_token.as_str()))
            .insert_header(("X-USER-TOKEN", gateway.user_token("alice").as_str()))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["user"], "alice");
        assert_eq!(body["query"], "_asUser=alice");
    }

    /// A token from `/token` works on application routes
    #[actix_web::test]
    async fn test_issued_token_is_accepted() {
        let gateway = TestGateway::new();
        let app = app!(gateway);

        let resp = actix_test::call_service(&app, request("GET", "/token").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(resp).await;
        let token = body["token"].as_str().unwrap().to_string();

        let req = request("GET", "/posts")
            .insert_header(("X-API-TOKEN", token.as_str()))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        // /token itself was charged to the address, /posts to the token
        assert!(gateway.store.bucket(TEST_PEER_IP).is_some());
        assert!(gateway.store.bucket(&token).is_some());
    }

    #[actix_web::test]
    async fn test_invalid_api_token() {
        let gateway = TestGateway::new();
        let app = app!(gateway);

        let req = request("GET", "/posts")
            .insert_header(("X-API-TOKEN", "definitely:not:valid"))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(actix_test::read_body(resp).await, "api token invalid\n");
        assert!(gateway.store.is_empty());
    }

    /// Once handling time exceeds the budget the token is limited
    #[actix_web::test]
    async fn test_token_runs_into_debt() {
        let mut config = TestGateway::config();
        config.gateway.rate_limit.capacity_ms = 40;
        config.gateway.rate_limit.per_interval_ms = 40;
        config.gateway.rate_limit.interval_ms = 60_000;
        let gateway = TestGateway::with_config(config);
        let app = app!(gateway);
        let token = gateway.api_token();

        for _ in 0..2 {
            let req = request("GET", "/slow")
                .insert_header(("X-API-TOKEN", token.as_str()))
                .to_request();
            let resp = actix_test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = request("GET", "/slow")
            .insert_header(("X-API-TOKEN", token.as_str()))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 420);
        assert_eq!(actix_test::read_body(resp).await, "rate limited\n");
        assert!(gateway.store.get(&token).await.unwrap() <= 0);
    }

    /// Without a secret, token routes fail closed and open routes still work
    #[actix_web::test]
    async fn test_missing_secret() {
        let gateway = TestGateway::with_config(shield_rs::Config::default());
        let app = app!(gateway);

        let req = request("GET", "/posts")
            .insert_header(("X-API-TOKEN", "anything"))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(actix_test::read_body(resp).await, "secret not set on server\n");

        let resp = actix_test::call_service(&app, request("GET", "/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    /// Address limiting keys on the forwarded client when told to trust it
    #[actix_web::test]
    async fn test_forwarded_for_address() {
        let mut config = TestGateway::config();
        config.gateway.server.trust_forwarded_for = true;
        let gateway = TestGateway::with_config(config);
        let app = app!(gateway);

        let req = request("GET", "/token")
            .insert_header(("X-Forwarded-For", "10.0.0.1, 203.0.113.50"))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        assert!(gateway.store.bucket("203.0.113.50").is_some());
        assert!(gateway.store.bucket(TEST_PEER_IP).is_none());
    }

    #[actix_web::test]
    async fn test_user_token_matches_secret() {
        let gateway = TestGateway::new();
        let signer = Signer::new(TEST_SECRET);
        assert_eq!(
            shield_rs::auth::extract_user(&signer, &gateway.user_token("bob")),
            "bob"
        );
    }
}
