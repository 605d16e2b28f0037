use crate::{
    AppState,
    gate::{GATE_COOKIE, GATE_TOKEN_TTL_SECS, GATE_URL, issue_gate_token, verify_password},
    models::{GateSubmission, MessageResponse},
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

/// GateNext
///
/// Query parameters of the gate endpoints: the path to return to after a
/// successful password check.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct GateNext {
    pub next: Option<String>,
}

/// Resolve the post-gate redirect target. Only same-site absolute paths are
/// honored; anything else ("//evil", "https://...", relative junk) falls back
/// to the site root.
fn safe_next(next: Option<String>) -> String {
    match next {
        Some(n) if n.starts_with('/') && !n.starts_with("//") => n,
        _ => "/".to_string(),
    }
}

fn gate_cookie(token: String, remember: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build((GATE_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    // Remembered passes persist for the token lifetime; otherwise the cookie
    // is session-scoped and dies with the browser.
    if remember {
        cookie.set_max_age(time::Duration::seconds(GATE_TOKEN_TTL_SECS as i64));
    }
    cookie
}

/// gate_page
///
/// [Public Route] The gate page itself. Returns the prompt copy; the
/// front-end renders the password form around it.
#[utoipa::path(
    get,
    path = "/gate/",
    params(GateNext),
    responses((status = 200, description = "Gate prompt", body = MessageResponse))
)]
pub async fn gate_page(Query(_next): Query<GateNext>) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "This site requires an access password.".to_string(),
    })
}

/// gate_accept
///
/// [Public Route] Checks the shared password and, on success, sets the
/// signed gate cookie and redirects to the sanitized `next` target.
///
/// The comparison is constant-time over NFC-normalized bytes, so composed
/// and decomposed Unicode spellings of the same password both pass. A wrong
/// password is a 401 with a user-facing message and no cookie change.
#[utoipa::path(
    post,
    path = "/gate/",
    params(GateNext),
    request_body = GateSubmission,
    responses(
        (status = 303, description = "Password accepted, cookie set"),
        (status = 401, description = "Wrong password", body = MessageResponse)
    )
)]
pub async fn gate_accept(
    State(state): State<AppState>,
    Query(query): Query<GateNext>,
    jar: CookieJar,
    Json(submission): Json<GateSubmission>,
) -> Result<(CookieJar, Redirect), (StatusCode, Json<MessageResponse>)> {
    if !verify_password(&submission.password, &state.config.gate_password) {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(MessageResponse {
                message: "Incorrect password.".to_string(),
            }),
        ));
    }

    let token = issue_gate_token(&state.config);
    let jar = jar.add(gate_cookie(token, submission.remember));
    let target = safe_next(query.next);
    Ok((jar, Redirect::to(&target)))
}

/// gate_logout
///
/// [Public Route] Drops the gate cookie and returns to the gate page.
#[utoipa::path(
    get,
    path = "/gate/logout/",
    responses((status = 303, description = "Cookie cleared"))
)]
pub async fn gate_logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build((GATE_COOKIE, "")).path("/").build());
    (jar, Redirect::to(GATE_URL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_next_accepts_site_paths() {
        assert_eq!(safe_next(Some("/news/".to_string())), "/news/");
        assert_eq!(safe_next(Some("/roadmap/start/intro/".to_string())), "/roadmap/start/intro/");
    }

    #[test]
    fn test_safe_next_rejects_offsite_targets() {
        assert_eq!(safe_next(None), "/");
        assert_eq!(safe_next(Some("https://evil.example".to_string())), "/");
        assert_eq!(safe_next(Some("//evil.example".to_string())), "/");
        assert_eq!(safe_next(Some("news".to_string())), "/");
    }

    #[test]
    fn test_gate_cookie_scope() {
        let remembered = gate_cookie("tok".to_string(), true);
        assert_eq!(remembered.path(), Some("/"));
        assert!(remembered.max_age().is_some());

        let session = gate_cookie("tok".to_string(), false);
        assert!(session.max_age().is_none());
    }
}
