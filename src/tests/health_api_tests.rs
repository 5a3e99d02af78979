#[cfg(test)]
mod tests {
    use axum::http::{header, Method, StatusCode};

    use crate::config::SecurityConfig;
    use crate::routes;
    use crate::state::AppState;
    use crate::tests::support::{send, setup_test_app, setup_test_db, test_config};

    #[tokio::test]
    async fn test_healthz_is_public() {
        let (app, _db) = setup_test_app(true).await;

        let res = send(&app, Method::GET, "/healthz", None, None).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body, "ok");
    }

    #[tokio::test]
    async fn test_version_endpoint() {
        let (app, _db) = setup_test_app(true).await;

        let res = send(&app, Method::GET, "/version", None, None).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(res.body["version"], env!("CARGO_PKG_VERSION"));
        assert!(res.body["build"]["profile"].is_string());
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let (app, _db) = setup_test_app(false).await;

        let res = send(&app, Method::GET, "/subjects", None, None).await;
        assert_eq!(res.headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(res.headers.get("x-frame-options").unwrap(), "DENY");
        assert_eq!(res.headers.get("referrer-policy").unwrap(), "no-referrer");
        assert_eq!(res.headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
        assert!(res.headers.get("strict-transport-security").is_none());

        // Error envelopes are JSON too
        let res = send(&app, Method::GET, "/subjects/404", None, None).await;
        assert_eq!(res.headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
    }

    #[tokio::test]
    async fn test_hsts_and_csp_from_config() {
        let test_db = setup_test_db().await;
        let mut cfg = test_config(false);
        cfg.security = Some(SecurityConfig {
            enable_hsts: Some(true),
            hsts_max_age: Some(600),
            hsts_include_subdomains: Some(true),
            csp: Some("default-src 'none'".to_string()),
        });
        let app = routes::service(routes::api(AppState::new(test_db.pool.clone(), cfg)));

        let res = send(&app, Method::GET, "/healthz", None, None).await;
        assert_eq!(res.headers.get("strict-transport-security").unwrap(), "max-age=600; includeSubDomains");
        assert_eq!(res.headers.get("content-security-policy").unwrap(), "default-src 'none'");
        // Plain text is cacheable
        assert!(res.headers.get(header::CACHE_CONTROL).is_none());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (app, _db) = setup_test_app(false).await;
        let res = send(&app, Method::GET, "/nope", None, None).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
    }
}
