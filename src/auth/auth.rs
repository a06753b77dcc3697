use crate::error::ReportError;
use crate::model::role::Role;
use crate::report::ReportKind;
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};

/// Identity of the caller, placed in the request extensions by
/// [`auth_middleware`](crate::auth::middleware::auth_middleware) and handed to
/// each handler explicitly.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: u64,
    pub username: String,
    pub role: Role,

    /// Present only if this user is linked to an employee record
    pub employee_id: Option<u64>,
}

impl FromRequest for AuthUser {
    type Error = ReportError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthUser>()
                .cloned()
                .ok_or_else(|| ReportError::Unauthorized("Missing token".into())),
        )
    }
}

impl AuthUser {
    pub fn require_report(&self, kind: ReportKind) -> Result<(), ReportError> {
        if kind.allows(self.role) {
            Ok(())
        } else {
            Err(ReportError::Forbidden(format!(
                "{} is not allowed to run the {} report",
                self.role,
                kind.title()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser { user_id: 1, username: "u".into(), role, employee_id: None }
    }

    #[test]
    fn managers_pass_every_gate() {
        for role in [Role::AdminUser, Role::HrManager] {
            assert!(user(role).require_report(ReportKind::LeaveBalance).is_ok());
        }
    }

    #[test]
    fn employees_reach_detail_reports_only() {
        let employee = user(Role::Employee);
        assert!(employee.require_report(ReportKind::EmployeesByDepartment).is_ok());
        assert!(matches!(
            employee.require_report(ReportKind::CustomField),
            Err(ReportError::Forbidden(_))
        ));
    }
}
