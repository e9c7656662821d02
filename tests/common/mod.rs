use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{header, HeaderMap, HeaderValue, Method, Request},
    response::Response,
    Router,
};
use lead_capture::{config::AppConfig, db, notice::Notice, session, AppState};
use tower::ServiceExt;

/// Helper harness for spinning up an application router backed by a
/// throwaway SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _db_dir: tempfile::TempDir,
}

/// A rendered form page: session cookie, embedded token, page body.
pub struct FormPage {
    pub session_cookie: String,
    pub csrf_token: String,
    pub html: String,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let db_dir = tempfile::tempdir().expect("failed to create temp dir for test database");
        let db_path = db_dir.path().join("leads_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "a_sufficiently_long_test_session_secret_value".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");

        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = lead_capture::app_router(state.clone());

        Self {
            router,
            state,
            _db_dir: db_dir,
        }
    }

    /// Perform a request against the router.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }

    /// GET the form view, optionally presenting cookies.
    pub async fn get_form(&self, cookies: Option<&str>) -> Response {
        let mut builder = Request::builder().method(Method::GET).uri("/");
        if let Some(cookies) = cookies {
            builder = builder.header(header::COOKIE, cookies);
        }
        self.request(builder.body(Body::empty()).expect("request body"))
            .await
    }

    /// GET the form and pull out the session cookie and embedded token.
    pub async fn open_form(&self) -> FormPage {
        let response = self.get_form(None).await;
        let session_cookie = set_cookie_value(&response, session::SESSION_COOKIE)
            .expect("form view should establish a session cookie");
        let html = response_text(response).await;
        let csrf_token = extract_csrf_token(&html).expect("form should embed a csrf token");
        FormPage {
            session_cookie: format!("{}={}", session::SESSION_COOKIE, session_cookie),
            csrf_token,
            html,
        }
    }

    /// POST a form submission with the given cookies and urlencoded body.
    pub async fn submit(&self, cookies: &str, body: String) -> Response {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/submit")
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .header(header::COOKIE, cookies)
            .body(Body::from(body))
            .expect("request body");
        self.request(request).await
    }
}

/// Collect a response body into a string.
pub async fn response_text(response: Response) -> String {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    String::from_utf8(bytes.to_vec()).expect("utf-8 response body")
}

/// Extract the value of a named cookie from a response's `Set-Cookie`
/// headers, stripping attributes.
pub fn set_cookie_value(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|raw| {
            let pair = raw.split(';').next()?;
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}

/// Decode the one-shot notice a redirect attached to the response.
pub fn notice_from_response(response: &Response) -> Option<Notice> {
    let value = set_cookie_value(response, lead_capture::notice::NOTICE_COOKIE)?;
    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        HeaderValue::from_str(&format!(
            "{}={}",
            lead_capture::notice::NOTICE_COOKIE,
            value
        ))
        .ok()?,
    );
    Notice::from_headers(&headers)
}

/// Pull the anti-forgery token out of the rendered form.
pub fn extract_csrf_token(html: &str) -> Option<String> {
    let marker = r#"name="csrf_token" value=""#;
    let start = html.find(marker)? + marker.len();
    let end = html[start..].find('"')? + start;
    Some(html[start..end].to_string())
}
