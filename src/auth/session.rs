//! Session extractors.
//!
//! Sessions are issued by the external sign-in flow and stored in the
//! `sessions` table. A handler that takes [`AuthSession`] only runs for a
//! caller with a live session; [`MaybeAuthSession`] lets pages branch on it.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::app_state::AppState;
use crate::db::SessionUser;
use crate::error::AppError;

const SECURE_COOKIE_PREFIX: &str = "__Secure-";

/// The signed-in caller. Rejects with `401` and an empty body otherwise.
#[derive(Debug, Clone)]
pub struct AuthSession(pub SessionUser);

/// The caller's session, if any.
#[derive(Debug, Clone)]
pub struct MaybeAuthSession(pub Option<SessionUser>);

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let MaybeAuthSession(user) = MaybeAuthSession::from_request_parts(parts, state).await?;
        user.map(AuthSession).ok_or(AppError::Unauthenticated)
    }
}

impl FromRequestParts<AppState> for MaybeAuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<SessionUser>() {
            return Ok(MaybeAuthSession(Some(user.clone())));
        }

        let Some(token) = session_token(&parts.headers, &state.env.auth.session_cookie_name) else {
            return Ok(MaybeAuthSession(None));
        };

        let user = state.sessions.find_session_user(&token).await?;
        match &user {
            Some(user) => {
                debug!(user_id = %user.id, "Resolved session");
                parts.extensions.insert(user.clone());
            }
            None => debug!("Session token did not match a live session"),
        }

        Ok(MaybeAuthSession(user))
    }
}

/// Pull the session token from the session cookie (plain or `__Secure-`
/// prefixed) or from an `Authorization: Bearer` header.
fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let secure_name = format!("{}{}", SECURE_COOKIE_PREFIX, cookie_name);

    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name || *name == secure_name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|token| !token.is_empty());

    from_cookie
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(|token| token.trim().to_string())
        })
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const COOKIE: &str = "next-auth.session-token";

    fn headers(pairs: &[(header::HeaderName, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.append(name.clone(), HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn reads_the_session_cookie() {
        let headers = headers(&[(
            header::COOKIE,
            "theme=dark; next-auth.session-token=abc123; other=1",
        )]);

        assert_eq!(session_token(&headers, COOKIE).as_deref(), Some("abc123"));
    }

    #[test]
    fn reads_the_secure_cookie_variant() {
        let headers = headers(&[(header::COOKIE, "__Secure-next-auth.session-token=s3cure")]);

        assert_eq!(session_token(&headers, COOKIE).as_deref(), Some("s3cure"));
    }

    #[test]
    fn falls_back_to_bearer_token() {
        let headers = headers(&[
            (header::COOKIE, "theme=dark"),
            (header::AUTHORIZATION, "Bearer tok"),
        ]);

        assert_eq!(session_token(&headers, COOKIE).as_deref(), Some("tok"));
    }

    #[test]
    fn empty_cookie_does_not_hide_bearer_token() {
        let headers = headers(&[
            (header::COOKIE, "next-auth.session-token="),
            (header::AUTHORIZATION, "Bearer tok"),
        ]);

        assert_eq!(session_token(&headers, COOKIE).as_deref(), Some("tok"));
    }

    #[test]
    fn ignores_empty_and_missing_tokens() {
        assert_eq!(session_token(&HeaderMap::new(), COOKIE), None);
        assert_eq!(
            session_token(&headers(&[(header::COOKIE, "next-auth.session-token=")]), COOKIE),
            None
        );
        assert_eq!(
            session_token(&headers(&[(header::AUTHORIZATION, "Basic dXNlcg==")]), COOKIE),
            None
        );
    }
}
