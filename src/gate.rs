//! Site-wide shared-password access gate.
//!
//! Every request outside an explicit exemption list must carry a valid gate
//! cookie: a signed token whose `ver` claim matches the currently configured
//! gate version. Staff callers pass through unconditionally. Everyone else is
//! redirected to `/gate/?next=<path>`, where the gate-accept endpoint checks
//! the shared password and sets the cookie.
//!
//! Bumping `GATE_VERSION` invalidates every outstanding cookie by claim
//! mismatch; no session store needs flushing.

use std::sync::LazyLock;
use std::time::SystemTime;

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use regex::Regex;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use unicode_normalization::UnicodeNormalization;

use crate::{AppState, auth::StaffUser, config::AppConfig};

/// Name of the cookie carrying the signed gate token.
pub const GATE_COOKIE: &str = "wolfe_gate";

/// Where the gate sends callers that have not passed yet.
pub const GATE_URL: &str = "/gate/";

/// Lifetime of a gate pass. The cookie itself is session-scoped unless the
/// caller asked to be remembered, but the signed token never outlives this.
pub const GATE_TOKEN_TTL_SECS: u64 = 60 * 60 * 24;

/// Paths that bypass the gate: the gate page itself, static assets, favicon,
/// robots.txt, the admin API (it has its own auth), and the ops/docs surface.
static EXEMPT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^/gate/",
        r"^/static/",
        r"^/favicon\.ico$",
        r"^/robots\.txt$",
        r"^/admin/",
        r"^/health$",
        r"^/run-migrate/",
        r"^/swagger-ui",
        r"^/api-docs/",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("invalid gate exemption pattern"))
    .collect()
});

/// GateClaims
///
/// Payload of the signed gate token. `ver` carries the gate version the
/// caller passed under; `exp` bounds the pass at 24 hours regardless of the
/// cookie's own lifetime.
#[derive(Debug, Serialize, Deserialize)]
pub struct GateClaims {
    /// Gate version at issue time. Must equal the configured version.
    pub ver: String,
    pub iat: usize,
    pub exp: usize,
}

fn unix_now() -> usize {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .unwrap_or(0)
}

/// Issue a gate token for the currently configured version.
pub fn issue_gate_token(config: &AppConfig) -> String {
    let now = unix_now();
    let claims = GateClaims {
        ver: config.gate_version.clone(),
        iat: now,
        exp: now + GATE_TOKEN_TTL_SECS as usize,
    };
    let key = EncodingKey::from_secret(config.gate_secret.as_bytes());
    // HS256 over a fixed claim set; encoding only fails on key/serde misuse.
    encode(&Header::default(), &claims, &key).unwrap_or_default()
}

/// Verify a gate token: signature, expiry, and version match.
pub fn verify_gate_token(config: &AppConfig, token: &str) -> bool {
    let key = DecodingKey::from_secret(config.gate_secret.as_bytes());
    let validation = Validation::default();
    match decode::<GateClaims>(token, &key, &validation) {
        Ok(data) => data.claims.ver == config.gate_version,
        Err(_) => false,
    }
}

/// Constant-time password comparison over NFC-normalized UTF-8 bytes.
///
/// NFC normalization keeps canonically equivalent inputs (composed vs
/// decomposed accents, full-width forms typed on some IMEs) from failing the
/// byte comparison; `subtle` keeps the comparison timing-independent.
pub fn verify_password(submitted: &str, configured: &str) -> bool {
    let a = norm_bytes(submitted);
    let b = norm_bytes(configured);
    // ct_eq on slices still short-circuits on length, which only leaks the
    // password length, not its content.
    a.ct_eq(&b).into()
}

fn norm_bytes(s: &str) -> Vec<u8> {
    s.nfc().collect::<String>().into_bytes()
}

/// True when the path matches one of the gate exemptions. Patterns are
/// anchored at the start of the path.
pub fn is_exempt(path: &str) -> bool {
    EXEMPT_PATTERNS.iter().any(|p| p.is_match(path))
}

/// access_gate
///
/// The gate middleware. Order of checks:
/// 1. staff callers pass (bearer token or local dev bypass),
/// 2. exempt paths pass,
/// 3. a valid gate cookie with a matching version passes,
/// 4. everyone else is redirected to the gate page, carrying the original
///    path as the return target.
pub async fn access_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    if is_exempt(&path) {
        return next.run(request).await;
    }

    let (mut parts, body) = request.into_parts();

    // Staff pass-through. Extraction failure is not a rejection here; the
    // caller simply continues through the gate checks.
    if StaffUser::from_request_parts(&mut parts, &state).await.is_ok() {
        return next.run(Request::from_parts(parts, body)).await;
    }

    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(GATE_COOKIE)
        && verify_gate_token(&state.config, cookie.value())
    {
        return next.run(Request::from_parts(parts, body)).await;
    }

    let target = if path == GATE_URL {
        GATE_URL.to_string()
    } else {
        format!("{}?next={}", GATE_URL, path)
    };
    Redirect::to(&target).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_password_match_and_mismatch() {
        assert!(verify_password("wolfe-education", "wolfe-education"));
        assert!(!verify_password("wrong", "wolfe-education"));
        assert!(!verify_password("", "wolfe-education"));
    }

    #[test]
    fn test_password_unicode_normalization() {
        // é composed (U+00E9) vs decomposed (e + U+0301) must compare equal.
        assert!(verify_password("caf\u{00e9}", "cafe\u{0301}"));
    }

    #[test]
    fn test_token_roundtrip() {
        let config = AppConfig::default();
        let token = issue_gate_token(&config);
        assert!(verify_gate_token(&config, &token));
    }

    #[test]
    fn test_version_bump_invalidates_token() {
        let config = AppConfig::default();
        let token = issue_gate_token(&config);

        let mut bumped = config.clone();
        bumped.gate_version = "v2".to_string();
        assert!(!verify_gate_token(&bumped, &token));
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let config = AppConfig::default();
        let token = issue_gate_token(&config);

        let mut other = config.clone();
        other.gate_secret = "a-different-signing-secret".to_string();
        assert!(!verify_gate_token(&other, &token));
    }

    #[test]
    fn test_exemptions() {
        assert!(is_exempt("/gate/"));
        assert!(is_exempt("/gate/logout/"));
        assert!(is_exempt("/static/css/site.css"));
        assert!(is_exempt("/favicon.ico"));
        assert!(is_exempt("/robots.txt"));
        assert!(is_exempt("/admin/news/"));
        assert!(is_exempt("/health"));

        assert!(!is_exempt("/"));
        assert!(!is_exempt("/news/"));
        assert!(!is_exempt("/roadmap/start/intro/"));
        // Exemptions anchor at the start of the path.
        assert!(!is_exempt("/news/favicon.ico"));
    }
}
