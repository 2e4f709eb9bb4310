//! Login page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::api::middleware::auth::SESSION_COOKIE;

/// Template for the login page.
///
/// The page stores the pasted session token in the session cookie and
/// continues to the profile page.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {
    cookie_name: &'static str,
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login`
pub async fn login_handler() -> impl IntoResponse {
    LoginTemplate {
        cookie_name: SESSION_COOKIE,
    }
}
