//! Mock gateway identity for integration tests.
//!
//! Services behind the gateway receive `x-catalog-user-id` + `x-catalog-user-role`
//! headers. In tests, `MockAuth` produces these headers directly so no real
//! gateway is needed.

use axum::http::{HeaderName, HeaderValue};
use uuid::Uuid;

use catalog_auth_types::identity::{USER_ID_HEADER, USER_ROLE_HEADER};
use catalog_domain::user::UserRole;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// A fresh normal user.
    pub fn user() -> Self {
        Self::new(Uuid::new_v4(), UserRole::Normal)
    }

    /// A fresh staff user.
    pub fn staff() -> Self {
        Self::new(Uuid::new_v4(), UserRole::Staff)
    }

    pub fn user_id_header(&self) -> (HeaderName, HeaderValue) {
        (
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        )
    }

    pub fn role_header(&self) -> (HeaderName, HeaderValue) {
        (
            HeaderName::from_static(USER_ROLE_HEADER),
            HeaderValue::from(u16::from(self.role.as_u8())),
        )
    }
}
