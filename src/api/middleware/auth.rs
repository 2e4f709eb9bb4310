//! Session authentication middleware and the authenticated-user extractor.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::COOKIE, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Name of the cookie carrying the session token for browser clients.
pub const SESSION_COOKIE: &str = "session_token";

/// The user a request was authenticated as.
///
/// Inserted into request extensions by [`layer`] and
/// [`crate::web::middleware::web_auth::layer`]. Extracting it from a request
/// that did not pass through either layer yields `401 Unauthorized`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(AppError::authentication_required)
    }
}

/// Authenticates API requests by session token.
///
/// # Token Sources
///
/// 1. `Authorization: Bearer <token>` header
/// 2. `session_token` cookie, for same-origin browser requests
///
/// # Errors
///
/// Returns `401 Unauthorized` with `{"success": false, "error": "Authentication required"}`
/// if no token is present or the token does not resolve to an active session.
/// No handler runs in that case, so nothing is read or written.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/api/templates", get(list_templates_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => Some(token),
        Err(_) => session_token_from_cookies(&parts.headers),
    }
    .ok_or_else(AppError::authentication_required)?;

    let user_id = st.auth_service.authenticate(&token).await.map_err(|e| {
        if !matches!(e, AppError::Unauthorized { .. }) {
            tracing::error!(error = %e, "Session lookup failed");
        }
        AppError::authentication_required()
    })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentUser { id: user_id });

    Ok(next.run(req).await)
}

/// Extracts the session token from the `Cookie` header, if present.
///
/// Handles multiple cookies by splitting on semicolons; other cookies are ignored.
pub fn session_token_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_token_from_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; session_token=abc123; lang=en"),
        );

        assert_eq!(session_token_from_cookies(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_session_token_missing_or_empty() {
        let mut headers = HeaderMap::new();
        assert!(session_token_from_cookies(&headers).is_none());

        headers.insert(COOKIE, HeaderValue::from_static("session_token="));
        assert!(session_token_from_cookies(&headers).is_none());

        headers.insert(COOKIE, HeaderValue::from_static("other_session_token=x"));
        assert!(session_token_from_cookies(&headers).is_none());
    }
}
