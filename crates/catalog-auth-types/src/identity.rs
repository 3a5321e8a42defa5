//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use catalog_domain::user::UserRole;

pub const USER_ID_HEADER: &str = "x-catalog-user-id";
pub const USER_ROLE_HEADER: &str = "x-catalog-user-role";

/// An authenticated requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Identity {
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}

/// Whoever sent the request, as asserted by the gateway.
///
/// No `x-catalog-user-id` header means [`Principal::Anonymous`]. A present but
/// unparsable user id or role is rejected with 401 rather than downgraded.
/// A missing role header means [`UserRole::Normal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Anonymous,
    User(Identity),
}

impl Principal {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Anonymous => None,
            Self::User(identity) => Some(identity),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdentityRejection {
    #[error("authentication required")]
    Missing,
    #[error("malformed user id")]
    MalformedUserId,
    #[error("malformed user role")]
    MalformedUserRole,
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": "UNAUTHORIZED",
            "message": self.to_string(),
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

fn principal_from_parts(parts: &Parts) -> Result<Principal, IdentityRejection> {
    let Some(raw_user_id) = parts.headers.get(USER_ID_HEADER) else {
        return Ok(Principal::Anonymous);
    };
    let user_id = raw_user_id
        .to_str()
        .ok()
        .and_then(|s| s.parse::<Uuid>().ok())
        .ok_or(IdentityRejection::MalformedUserId)?;

    let role = match parts.headers.get(USER_ROLE_HEADER) {
        None => UserRole::Normal,
        Some(raw_role) => raw_role
            .to_str()
            .ok()
            .and_then(|s| s.parse::<u8>().ok())
            .and_then(UserRole::from_u8)
            .ok_or(IdentityRejection::MalformedUserRole)?,
    };
    Ok(Principal::User(Identity { user_id, role }))
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract synchronously and return a 'static async block so the future
    // does not capture the `parts` borrow.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = principal_from_parts(parts);
        if let Err(ref rejection) = result {
            tracing::debug!(%rejection, "rejecting identity headers");
        }
        async move { result }
    }
}

/// Like [`Principal`] but rejects anonymous requests with 401.
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = principal_from_parts(parts).and_then(|principal| match principal {
            Principal::User(identity) => Ok(identity),
            Principal::Anonymous => Err(IdentityRejection::Missing),
        });
        async move { result }
    }
}
