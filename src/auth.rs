use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    repository::RepositoryState,
};

/// Claims
///
/// Payload structure expected inside a staff bearer token (JWT). Signed with
/// the staff secret and validated on every admin request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the staff user's UUID in `staff_users`.
    pub sub: Uuid,
    /// Expiration time. Always validated to keep old tokens out.
    pub exp: usize,
    /// Issued at.
    pub iat: usize,
}

/// StaffUser
///
/// Resolved identity of an authenticated admin request. Handlers use it to
/// enforce the staff role; the access gate uses it to let staff browse the
/// site without the shared password.
#[derive(Debug, Clone)]
pub struct StaffUser {
    pub id: Uuid,
    /// 'staff' for every admin user; kept as a field so roles can split
    /// later without an extractor change.
    pub role: String,
}

/// StaffUser Extractor
///
/// Implements Axum's FromRequestParts so StaffUser can appear as a handler
/// argument. The flow:
/// 1. Dependency resolution: Repository and AppConfig from the app state.
/// 2. Local bypass: in Env::Local, a known staff UUID in the 'x-staff-id'
///    header authenticates, provided the user exists in the database.
/// 3. Bearer token extraction and JWT decoding.
/// 4. Database lookup, so deleted staff lose access immediately.
///
/// Rejection: 401 Unauthorized on any failure.
impl<S> FromRequestParts<S> for StaffUser
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);

        // Local development bypass, guarded by the Env check.
        if config.env == Env::Local
            && let Some(header_value) = parts.headers.get("x-staff-id")
            && let Ok(id_str) = header_value.to_str()
            && let Ok(staff_id) = Uuid::parse_str(id_str)
            && let Some(user) = repo.get_staff_user(staff_id).await
        {
            return Ok(StaffUser {
                id: user.id,
                role: user.role,
            });
        }

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let decoding_key = DecodingKey::from_secret(config.staff_jwt_secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        let token_data = match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(data) => data,
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => return Err(StatusCode::UNAUTHORIZED),
                _ => return Err(StatusCode::UNAUTHORIZED),
            },
        };

        // Final verification against the database.
        let user = repo
            .get_staff_user(token_data.claims.sub)
            .await
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(StaffUser {
            id: user.id,
            role: user.role,
        })
    }
}
