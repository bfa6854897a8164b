//! Request session resolution and the portal/back-office access gate
//!
//! Identity arrives from the external identity provider as the
//! `x-user-id` header; the users table carries the role flag. The gate is
//! evaluated once per request by an extractor: handlers receive either a
//! `TenantSession` or an `AdminSession` and never re-check roles inline.

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::repos::tenant_repo::{self, Tenant, User};
use crate::routes::ApiError;
use crate::services::reading_submission::SubmittingTenant;
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

/// A resolved tenant-portal session
#[derive(Debug, Clone)]
pub struct TenantSession {
    pub user: User,
    pub tenant: Tenant,
}

impl TenantSession {
    pub fn submitting_tenant(&self) -> SubmittingTenant {
        let display_name = if self.user.full_name.is_empty() {
            self.user.username.clone()
        } else {
            self.user.full_name.clone()
        };
        SubmittingTenant {
            id: self.tenant.id,
            display_name,
        }
    }
}

/// A resolved back-office session
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub user: User,
}

/// Gate verdict for a portal request, before tenant-profile resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalGate {
    /// Non-administrator identity; proceed to tenant resolution
    Proceed,
    /// Administrators never act on the portal; send them to the back office
    RedirectToBackOffice,
    /// Identity unknown or deactivated
    Denied,
}

/// Evaluate the portal gate on the identity alone
///
/// Administrators are redirected before any tenant lookup, so an admin
/// invoking a portal operation causes no portal side effects.
pub fn evaluate_portal_gate(user: Option<&User>) -> PortalGate {
    match user {
        None => PortalGate::Denied,
        Some(u) if !u.is_active => PortalGate::Denied,
        Some(u) if u.is_admin => PortalGate::RedirectToBackOffice,
        Some(_) => PortalGate::Proceed,
    }
}

/// Whether an identity may act on the back office
pub fn evaluate_admin_gate(user: Option<&User>) -> bool {
    matches!(user, Some(u) if u.is_active && u.is_admin)
}

fn identity_from_parts(parts: &Parts) -> Result<Uuid, ApiError> {
    let raw = parts
        .headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("missing identity"))?;

    raw.parse()
        .map_err(|_| ApiError::unauthorized("invalid identity"))
}

impl FromRequestParts<AppState> for TenantSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = identity_from_parts(parts)?;
        let Some(user) = tenant_repo::find_user(&state.db, user_id).await? else {
            return Err(ApiError::unauthorized("unknown identity"));
        };

        match evaluate_portal_gate(Some(&user)) {
            PortalGate::Denied => Err(ApiError::unauthorized("unknown identity")),
            PortalGate::RedirectToBackOffice => Err(ApiError::RedirectToBackOffice),
            PortalGate::Proceed => {
                let tenant = tenant_repo::find_tenant_by_user(&state.db, user.id)
                    .await?
                    .ok_or_else(|| ApiError::not_found("no tenant profile for this account"))?;
                Ok(TenantSession { user, tenant })
            }
        }
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = identity_from_parts(parts)?;
        let user = tenant_repo::find_user(&state.db, user_id).await?;

        if !evaluate_admin_gate(user.as_ref()) {
            return Err(ApiError::forbidden("administrator role required"));
        }

        match user {
            Some(user) => Ok(AdminSession { user }),
            None => Err(ApiError::forbidden("administrator role required")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(is_admin: bool, is_active: bool) -> User {
        User {
            id: Uuid::new_v4(),
            username: "u".into(),
            email: "u@example.com".into(),
            full_name: "U Ser".into(),
            is_admin,
            is_active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn administrators_are_redirected_off_the_portal() {
        let admin = user(true, true);
        assert_eq!(
            evaluate_portal_gate(Some(&admin)),
            PortalGate::RedirectToBackOffice
        );
    }

    #[test]
    fn plain_tenants_proceed() {
        let tenant = user(false, true);
        assert_eq!(evaluate_portal_gate(Some(&tenant)), PortalGate::Proceed);
    }

    #[test]
    fn unknown_or_inactive_identities_are_denied() {
        assert_eq!(evaluate_portal_gate(None), PortalGate::Denied);
        let inactive = user(false, false);
        assert_eq!(evaluate_portal_gate(Some(&inactive)), PortalGate::Denied);
    }

    #[test]
    fn back_office_requires_an_active_administrator() {
        assert!(evaluate_admin_gate(Some(&user(true, true))));
        assert!(!evaluate_admin_gate(Some(&user(false, true))));
        assert!(!evaluate_admin_gate(Some(&user(true, false))));
        assert!(!evaluate_admin_gate(None));
    }
}
