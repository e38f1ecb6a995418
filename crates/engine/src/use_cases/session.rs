//! Caller identity passed into every use case.

use notiflow_domain::{EnvironmentId, OrganizationId, UserId};

/// Authenticated caller, scoped to one environment of one organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserSession {
    pub user_id: UserId,
    pub environment_id: EnvironmentId,
    pub organization_id: OrganizationId,
}

impl UserSession {
    pub fn new(
        user_id: UserId,
        environment_id: EnvironmentId,
        organization_id: OrganizationId,
    ) -> Self {
        Self {
            user_id,
            environment_id,
            organization_id,
        }
    }
}
