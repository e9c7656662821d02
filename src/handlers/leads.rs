use crate::errors::ServiceError;
use crate::notice::{self, Notice};
use crate::services::leads::NewLead;
use crate::session;
use crate::views;
use crate::AppState;
use axum::{
    extract::{rejection::FormRejection, Form, State},
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{AppendHeaders, Html, IntoResponse},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracing::{debug, error};

const SUCCESS_MSG: &str = "Lead submitted successfully!";
const DUPLICATE_MSG: &str = "Error: This email address is already registered.";
const FAILURE_MSG: &str = "An error occurred. Please try again later.";
const INVALID_FORM_MSG: &str = "Invalid form data. Please check your input.";

/// Raw submitted field values. Every field is optional at the wire level;
/// the anti-forgery token is the only thing actually checked.
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub csrf_token: Option<String>,
}

impl SubmitForm {
    /// Empty optional fields normalize to absent values.
    fn into_new_lead(self) -> NewLead {
        let clean = |v: Option<String>| v.filter(|s| !s.is_empty());
        NewLead {
            email: self.email.unwrap_or_default(),
            name: clean(self.name),
            company: clean(self.company),
        }
    }
}

/// Validate a submission: the posted token must match the session cookie it
/// was issued for. Field contents pass through untouched; empty or
/// malformed emails are accepted and length limits live in the schema.
fn validate_submission(
    secret: &str,
    headers: &HeaderMap,
    form: SubmitForm,
) -> Result<NewLead, ServiceError> {
    let session_id = session::session_from_headers(headers);
    let token = form.csrf_token.as_deref();

    let valid = match (&session_id, token) {
        (Some(session_id), Some(token)) => session::verify_token(secret, session_id, token),
        _ => false,
    };

    if !valid {
        debug!("Form data received: {:?}", form);
        return Err(ServiceError::InvalidForm);
    }

    Ok(form.into_new_lead())
}

/// GET / - render the form with a fresh anti-forgery token, consuming any
/// pending notice from the previous redirect.
async fn index(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let mut cookies: Vec<(HeaderName, String)> = Vec::new();

    let session_id = match session::session_from_headers(&headers) {
        Some(existing) => existing,
        None => {
            let fresh = session::new_session_id();
            cookies.push((header::SET_COOKIE, session::session_cookie(&fresh)));
            fresh
        }
    };

    let pending = Notice::from_headers(&headers);
    if pending.is_some() {
        // Rendered once, then discarded.
        cookies.push((header::SET_COOKIE, notice::clear_cookie()));
    }

    let token = session::issue_token(&state.config.session_secret, &session_id);
    let html = views::render_form(&token, pending.as_ref());

    (AppendHeaders(cookies), Html(html))
}

/// POST /submit - validate, persist, and always redirect back to the form
/// with a one-shot notice describing the outcome. A body the form extractor
/// cannot parse counts as an invalid submission, not an extractor error.
async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<SubmitForm>, FormRejection>,
) -> impl IntoResponse {
    let validated = match form {
        Ok(Form(form)) => validate_submission(&state.config.session_secret, &headers, form),
        Err(rejection) => {
            debug!("Form body rejected: {}", rejection);
            Err(ServiceError::InvalidForm)
        }
    };

    let notice = match validated {
        Err(_) => Notice::error(INVALID_FORM_MSG),
        Ok(new_lead) => match state.leads.submit_lead(new_lead).await {
            Ok(_) => Notice::success(SUCCESS_MSG),
            Err(ServiceError::DuplicateEmail) => Notice::error(DUPLICATE_MSG),
            Err(e) => {
                error!("Lead submission failed: {}", e);
                Notice::error(FAILURE_MSG)
            }
        },
    };

    (
        StatusCode::SEE_OTHER,
        AppendHeaders(vec![
            (header::LOCATION, "/".to_string()),
            (header::SET_COOKIE, notice.set_cookie()),
        ]),
    )
}

pub fn lead_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/submit", post(submit))
}
