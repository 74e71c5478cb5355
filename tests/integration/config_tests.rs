//! Configuration integration tests
//!
//! Configuration files all the way to the policies the gate enforces.

#[cfg(test)]
mod tests {
    use crate::common::TestGateway;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, web};
    use actix_web::test as actix_test;
    use shield_rs::config::Config;
    use shield_rs::server::middleware::RequestGate;
    use shield_rs::server::routes::configure_routes;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const EXAMPLE: &str = include_str!("../../config/shield.yaml.example");

    async fn status() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    /// The shipped example parses and validates
    #[test]
    fn test_example_config_is_valid() {
        let config = Config::from_yaml(EXAMPLE).unwrap();
        assert_eq!(config.server().port, 8000);
        assert_eq!(config.routes().len(), 3);
        assert!(config.auth().signer().is_none());
        assert!(config.routes()[1].policy.requires_user_auth("PATCH"));
    }

    /// Configured routes override the built-in policies
    #[actix_web::test]
    async fn test_file_routes_reach_the_gate() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
auth:
  secret: "from-a-file"
routes:
  - pattern: /health
    by_address_not_token: true
  - pattern: /status
    token_not_required: true
"#,
        )
        .unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        let gateway = TestGateway::with_config(config);
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(gateway.state.clone()))
                .wrap(RequestGate::new(gateway.gatekeeper().clone()))
                .configure(configure_routes)
                .route("/status", web::get().to(status)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/health")
            .peer_addr("192.0.2.1:1".parse().unwrap())
            .to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::OK);
        assert!(gateway.store.bucket("192.0.2.1").is_some());

        let req = actix_test::TestRequest::get().uri("/status").to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[test]
    fn test_conflicting_route_is_rejected() {
        let yaml = r#"
routes:
  - pattern: /both
    by_address_not_token: true
    token_not_required: true
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("/both"));
    }

    #[test]
    fn test_short_stale_window_is_rejected() {
        let yaml = r#"
rate_limit:
  capacity_ms: 600000
  stale_after_secs: 60
"#;
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        assert!(Config::from_yaml("storage:\n  backend: etcd\n").is_err());
    }
}
